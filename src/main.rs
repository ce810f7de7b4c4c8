mod api;
mod app;
mod board;
mod clock;
mod greeting;
mod loading;
mod location;
mod message;
mod state;

use app::*;
use leptos::*;

fn main() {
    console_error_panic_hook::set_once();
    mount_to_body(|| {
        view! { <App /> }
    })
}
