use crate::api::ApiClient;
use leptos::*;

/// Button that asks the backend for its greeting and shows the reply in
/// place. Failures are shown in the same slot; nothing here retries.
#[component]
pub fn HelloButton(api: ApiClient) -> impl IntoView {
    let (reply, set_reply) = create_signal(None::<String>);
    let (waiting, set_waiting) = create_signal(false);

    let click = move |_| {
        if waiting.get_untracked() {
            return;
        }
        set_waiting.set(true);
        set_reply.set(Some("Thinking...".to_string()));
        let api = api.clone();
        spawn_local(async move {
            match api.greeting().await {
                Ok(message) => set_reply.set(Some(message)),
                Err(err) => set_reply.set(Some(format!("Error: {err}"))),
            }
            set_waiting.set(false);
        });
    };

    view! {
        <div class="flex flex-col items-center gap-3">
            <button
                type="button"
                disabled=move || waiting.get()
                class="text-white bg-blue-700 hover:bg-blue-800 focus:ring-4 focus:ring-blue-300 font-medium rounded-lg text-sm px-5 py-2.5 focus:outline-none dark:bg-blue-600 dark:hover:bg-blue-700 dark:focus:ring-blue-800 disabled:opacity-50 disabled:cursor-not-allowed"
                on:click=click
            >
                "Say hello"
            </button>
            <p class="text-sm whitespace-pre-line text-gray-700 dark:text-gray-300">
                {move || reply.get()}
            </p>
        </div>
    }
}
