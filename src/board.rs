use crate::api::ApiClient;
use crate::loading::Loading;
use crate::message::MessageCard;
use crate::state::Message;
use leptos::leptos_dom::ev::SubmitEvent;
use leptos::logging::error;
use leptos::*;

/// Clears the submitting flag when dropped, so the form is re-enabled on
/// every exit path of the submission, including failures.
struct BusyGuard(WriteSignal<bool>);

impl BusyGuard {
    fn engage(flag: WriteSignal<bool>) -> Self {
        flag.set(true);
        Self(flag)
    }
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

/// Trims the raw input, rejecting anything that is empty afterwards.
fn trimmed_input(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn alert(text: &str) {
    if let Err(err) = window().alert_with_message(text) {
        error!("Alert failed: {err:?}");
    }
}

#[component]
pub fn Board(api: ApiClient) -> impl IntoView {
    let (input, set_input) = create_signal(String::new());
    let (submitting, set_submitting) = create_signal(false);
    // None until the first successful fetch; read failures leave the last
    // successful render in place.
    let (messages, set_messages) = create_signal(None::<Vec<Message>>);

    let refresh = {
        let api = api.clone();
        move || {
            let api = api.clone();
            spawn_local(async move {
                match api.list_messages().await {
                    Ok(list) => set_messages.set(Some(list)),
                    Err(err) => error!("Failed to load messages: {err}"),
                }
            });
        }
    };
    refresh();

    let update_input = move |ev| {
        set_input.set(event_target_value(&ev));
    };

    let on_submit = {
        let refresh = refresh.clone();
        move |ev: SubmitEvent| {
            ev.prevent_default();
            let Some(content) = trimmed_input(&input.get_untracked()) else {
                alert("Please enter a message");
                return;
            };
            if submitting.get_untracked() {
                // A request is already in flight; the disabled button is the
                // primary gate, this check catches anything that slips past it.
                return;
            }
            let guard = BusyGuard::engage(set_submitting);
            let api = api.clone();
            let refresh = refresh.clone();
            spawn_local(async move {
                let _guard = guard;
                match api.submit_message(&content).await {
                    Ok(()) => {
                        set_input.set(String::new());
                        refresh();
                    }
                    Err(err) => alert(&format!("Could not post message: {err}")),
                }
            });
        }
    };

    view! {
        <section class="w-full max-w-xl flex flex-col gap-4">
            <h2 class="text-lg font-semibold text-gray-900 dark:text-white">Leave a message</h2>
            <form class="flex items-center gap-2" on:submit=on_submit>
                <label for="message" class="sr-only">
                    Your message
                </label>
                <input
                    id="message"
                    class="block p-2.5 w-full text-sm text-gray-900 bg-white rounded-lg border border-gray-300 focus:ring-blue-500 focus:border-blue-500 dark:bg-gray-800 dark:border-gray-600 dark:placeholder-gray-400 dark:text-white"
                    placeholder="Say something nice..."
                    on:input=update_input
                    prop:value=input
                />
                <button
                    type="submit"
                    disabled=move || submitting.get()
                    class="text-white bg-blue-700 hover:bg-blue-800 focus:ring-4 focus:ring-blue-300 font-medium rounded-lg text-sm px-5 py-2.5 focus:outline-none dark:bg-blue-600 dark:hover:bg-blue-700 dark:focus:ring-blue-800 disabled:opacity-50 disabled:cursor-not-allowed"
                >
                    {move || if submitting.get() { "Posting..." } else { "Post" }}
                </button>
            </form>
            <div class="flex flex-col gap-3">
                {move || match messages.get() {
                    None => view! { <Loading /> }.into_view(),
                    Some(list) if list.is_empty() => {
                        view! {
                            <p class="text-sm text-center text-gray-500 dark:text-gray-400 p-4">
                                "No messages yet. Be the first to leave one!"
                            </p>
                        }
                            .into_view()
                    }
                    Some(list) => {
                        list.into_iter()
                            .map(|message| {
                                view! { <MessageCard message=message /> }
                            })
                            .collect_view()
                    }
                }}
            </div>
        </section>
    }
}
