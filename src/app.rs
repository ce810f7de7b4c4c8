use crate::api::ApiClient;
use crate::board::Board;
use crate::clock::Clock;
use crate::greeting::HelloButton;
use crate::location::LocationBadge;
use leptos::logging::{log, warn};
use leptos::*;
use url::Url;

const DEFAULT_ORIGIN: &str = "http://localhost:8080";

/// Base URL for the backend, taken from the page the app was served from.
/// Outside a browser (tests) there is no location, so fall back to the
/// local development origin.
fn page_origin() -> Url {
    let origin = window()
        .location()
        .origin()
        .unwrap_or_else(|_| DEFAULT_ORIGIN.to_string());
    Url::parse(&origin).unwrap_or_else(|err| {
        warn!("Unusable page origin {origin:?}: {err}");
        Url::parse(DEFAULT_ORIGIN).expect("default origin is a valid URL")
    })
}

#[component]
pub fn App() -> impl IntoView {
    let http = reqwest::Client::new();
    let api = ApiClient::new(http.clone(), page_origin());

    log!("guestbook-ui v{}", env!("CARGO_PKG_VERSION"));

    view! {
        <main class="min-h-dvh flex flex-col items-center gap-10 p-8 bg-white dark:bg-gray-900">
            <header class="flex flex-col items-center gap-4 text-center">
                <h1 class="text-3xl font-bold text-gray-900 dark:text-white">Guestbook</h1>
                <HelloButton api=api.clone() />
            </header>
            <section class="flex flex-col items-center gap-1">
                <Clock />
                <LocationBadge http=http />
            </section>
            <Board api=api />
        </main>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_origin_parses() {
        let url = Url::parse(DEFAULT_ORIGIN).unwrap();
        assert_eq!(url.scheme(), "http");
        assert_eq!(url.port(), Some(8080));
    }
}
