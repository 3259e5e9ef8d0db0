use crate::api::LmsApi;
use crate::auth::use_api;
use crate::components::icons::{RefreshCw, Send, Trash2};
use crate::components::widgets::{ConfirmDeleteDialog, PaginationBar, SearchBox, Toast};
use crate::controller::ListController;
use async_trait::async_trait;
use classdesk_shared::error::ApiResult;
use classdesk_shared::listing::{CollectionClient, ListQuery, ListStore};
use classdesk_shared::protocol::{AllNotificationsRequest, DeleteNotificationRequest};
use classdesk_shared::{Notification, SendNotificationRequest};
use leptos::prelude::*;
use leptos::task::spawn_local;

#[derive(Clone)]
struct NotificationClient {
    api: LmsApi,
}

#[async_trait(?Send)]
impl CollectionClient<Notification> for NotificationClient {
    async fn fetch(&self, _query: &ListQuery) -> ApiResult<Vec<Notification>> {
        // 这个端点历史上时而裸数组、时而包一层，归一化兜底
        self.api
            .send(&AllNotificationsRequest)
            .await
            .map(|env| env.into_items())
    }

    async fn delete(&self, id: &str) -> ApiResult<()> {
        self.api
            .send(&DeleteNotificationRequest { id: id.to_string() })
            .await
            .map(|_| ())
    }
}

#[component]
pub fn NotificationManager() -> impl IntoView {
    let api = use_api();
    let controller = ListController::new(
        NotificationClient { api: api.clone() },
        ListStore::new(|n: &Notification| n.title.as_str()),
        |n: &Notification| n.id.as_str(),
    );
    let api = StoredValue::new(api);

    let (title, set_title) = signal(String::new());
    let (message, set_message) = signal(String::new());
    let (sending, set_sending) = signal(false);
    let (notification, set_notification) = signal(Option::<(String, bool)>::None);

    controller.reload();

    Effect::new(move |_| {
        if notification.get().is_some() {
            set_timeout(
                move || set_notification.set(None),
                std::time::Duration::from_secs(3),
            );
        }
    });

    let on_send = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        if title.get().trim().is_empty() || message.get().trim().is_empty() {
            set_notification.set(Some(("Title and message are required".to_string(), true)));
            return;
        }

        set_sending.set(true);
        spawn_local(async move {
            let request = SendNotificationRequest {
                title: title.get_untracked(),
                message: message.get_untracked(),
                // None = 发送给全体用户
                user_ids: None,
            };
            match api.get_value().send(&request).await {
                Ok(_) => {
                    set_notification.set(Some(("Notification sent".to_string(), false)));
                    set_title.set(String::new());
                    set_message.set(String::new());
                    controller.after_mutation();
                }
                Err(e) => set_notification.set(Some((e.to_string(), true))),
            }
            set_sending.set(false);
        });
    };

    let pending_title = Signal::derive(move || {
        controller.pending_delete().map(|n: Notification| n.title)
    });

    view! {
        <div class="space-y-4">
            <Toast notification=notification.into() />

            <div class="card bg-base-100 shadow-xl">
                <div class="card-body">
                    <h3 class="card-title">"Send a notification"</h3>
                    <form class="grid grid-cols-1 md:grid-cols-3 gap-3 items-end" on:submit=on_send>
                        <div class="form-control">
                            <label class="label" for="notif_title">
                                <span class="label-text">"Title"</span>
                            </label>
                            <input
                                id="notif_title"
                                type="text"
                                class="input input-bordered"
                                on:input=move |ev| set_title.set(event_target_value(&ev))
                                prop:value=title
                                required
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="notif_message">
                                <span class="label-text">"Message"</span>
                            </label>
                            <input
                                id="notif_message"
                                type="text"
                                class="input input-bordered"
                                on:input=move |ev| set_message.set(event_target_value(&ev))
                                prop:value=message
                                required
                            />
                        </div>
                        <button type="submit" class="btn btn-primary gap-2" disabled=move || sending.get()>
                            {move || if sending.get() {
                                view! { <span class="loading loading-spinner"></span> }.into_any()
                            } else {
                                view! { <Send attr:class="h-4 w-4" /> }.into_any()
                            }}
                            "Send to all users"
                        </button>
                    </form>
                </div>
            </div>

            <div class="card bg-base-100 shadow-xl">
                <div class="card-body">
                    <div class="flex items-center justify-between flex-wrap gap-2">
                        <h3 class="card-title">"Sent notifications"</h3>
                        <div class="flex items-center gap-2">
                            <SearchBox
                                value=Signal::derive(move || controller.read(|s| s.query().search.clone()))
                                on_input=move |text: String| controller.set_search(text)
                                placeholder="Search by title"
                            />
                            <button
                                class="btn btn-ghost btn-circle"
                                on:click=move |_| controller.reload()
                                disabled=move || controller.is_loading()
                            >
                                <RefreshCw attr:class=move || if controller.is_loading() { "h-5 w-5 animate-spin" } else { "h-5 w-5" } />
                            </button>
                        </div>
                    </div>

                    <Show when=move || controller.fetch_error().is_some()>
                        <div role="alert" class="alert alert-warning text-sm py-2">
                            <span>{move || controller.fetch_error().unwrap_or_default()}</span>
                        </div>
                    </Show>

                    <Show when=move || controller.visible().items.is_empty() && !controller.is_loading()>
                        <p class="text-center py-8 text-base-content/50">"Nothing sent yet."</p>
                    </Show>

                    <div class="space-y-2">
                        <For
                            each=move || controller.visible().items
                            key=|n| n.id.clone()
                            children=move |item| {
                                let delete_target = item.clone();
                                view! {
                                    <div class="flex items-start justify-between bg-base-200 rounded p-3 gap-2">
                                        <div>
                                            <p class="font-bold">{item.title.clone()}</p>
                                            <p class="text-sm opacity-70">{item.message.clone()}</p>
                                            <p class="text-xs opacity-50">
                                                {item.created_at.clone().unwrap_or_default()}
                                            </p>
                                        </div>
                                        <button
                                            class="btn btn-ghost btn-sm text-error"
                                            on:click=move |_| controller.request_delete(delete_target.clone())
                                        >
                                            <Trash2 attr:class="h-4 w-4" />
                                        </button>
                                    </div>
                                }
                            }
                        />
                    </div>

                    <PaginationBar
                        page=Signal::derive(move || controller.visible().page)
                        total_pages=Signal::derive(move || controller.visible().total_pages)
                        on_page=move |p: usize| controller.set_page(p)
                    />
                </div>
            </div>

            <ConfirmDeleteDialog
                target=pending_title
                error=controller.mutation_error().into()
                on_confirm=move |_: ()| controller.confirm_delete()
                on_cancel=move |_: ()| controller.cancel_delete()
            />
        </div>
    }
}
