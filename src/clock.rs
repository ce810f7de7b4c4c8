use chrono::{DateTime, Local, TimeZone};
use leptos::*;
use std::time::Duration;

/// Long-form local time, matching the message cards' absolute timestamps.
pub fn format_clock<Tz>(now: DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    now.format("%a, %b %-d, %Y, %I:%M:%S %p").to_string()
}

/// The visitor's current local time, ticking once a second.
#[component]
pub fn Clock() -> impl IntoView {
    let (now, set_now) = create_signal(Local::now());
    set_interval(
        move || set_now.set(Local::now()),
        Duration::from_secs(1),
    );

    view! {
        <span class="text-sm font-medium text-gray-700 dark:text-gray-300">
            {move || format_clock(now.get())}
        </span>
    }
}
