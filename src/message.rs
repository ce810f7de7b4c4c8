use crate::state::Message;
use chrono::{DateTime, Local, TimeZone, Utc};
use leptos::*;
use pulldown_cmark_escape::escape_html;

/// Escapes message content for insertion into the document. Stored content
/// is user input and must never be interpreted as markup, so the rendered
/// fragment goes through a full HTML escaping pass first.
pub fn escape_content(content: &str) -> String {
    let mut escaped = String::with_capacity(content.len());
    escape_html(&mut escaped, content).expect("writing into a String cannot fail");
    escaped
}

/// Relative age label for a message, bucketed with fixed thresholds:
/// under a minute, minutes, hours, then days. Elapsed time is clamped at
/// zero so a timestamp slightly ahead of the local clock reads "just now".
pub fn time_ago(posted: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = now.signed_duration_since(posted).num_seconds().max(0);
    if seconds < 60 {
        "just now".to_string()
    } else if seconds < 3600 {
        format!("{} minutes ago", seconds / 60)
    } else if seconds < 86400 {
        format!("{} hours ago", seconds / 3600)
    } else {
        format!("{} days ago", seconds / 86400)
    }
}

/// Absolute creation time in the visitor's locale, long form.
pub fn format_posted_at<Tz>(posted: DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    posted.format("%a, %b %-d, %Y, %I:%M:%S %p").to_string()
}

#[component]
pub fn MessageCard(message: Message) -> impl IntoView {
    let escaped = escape_content(&message.content);
    let age = time_ago(message.timestamp, Utc::now());
    let posted_at = format_posted_at(DateTime::<Local>::from(message.timestamp));
    view! {
        <div
            class="flex flex-col gap-1 p-4 border border-gray-200 bg-gray-50 rounded-xl dark:bg-gray-800 dark:border-gray-700"
            title=posted_at
        >
            <p
                class="text-sm font-normal break-words text-gray-900 dark:text-white"
                inner_html=escaped
            />
            <span class="text-xs font-normal text-gray-500 dark:text-gray-400">{age}</span>
        </div>
    }
}
