use crate::api::LmsApi;
use crate::auth::use_api;
use crate::components::icons::{Bell, CheckCircle, RefreshCw};
use crate::components::widgets::{PaginationBar, Toast};
use crate::controller::ListController;
use async_trait::async_trait;
use classdesk_shared::Notification;
use classdesk_shared::error::ApiResult;
use classdesk_shared::listing::{CollectionClient, ListQuery, ListStore};
use classdesk_shared::protocol::{ListNotificationsRequest, MarkNotificationReadRequest};
use leptos::prelude::*;
use leptos::task::spawn_local;

/// 通知是轮询/手动刷新的，没有推送
#[derive(Clone)]
struct InboxClient {
    api: LmsApi,
}

#[async_trait(?Send)]
impl CollectionClient<Notification> for InboxClient {
    async fn fetch(&self, _query: &ListQuery) -> ApiResult<Vec<Notification>> {
        self.api
            .send(&ListNotificationsRequest)
            .await
            .map(|env| env.into_items())
    }
}

#[component]
pub fn UserNotifications() -> impl IntoView {
    let api = use_api();
    let controller = ListController::new(
        InboxClient { api: api.clone() },
        ListStore::new(|n: &Notification| n.title.as_str()),
        |n: &Notification| n.id.as_str(),
    );
    let api = StoredValue::new(api);

    let (notification, set_notification) = signal(Option::<(String, bool)>::None);

    controller.reload();

    let mark_read = move |id: String| {
        spawn_local(async move {
            match api
                .get_value()
                .send(&MarkNotificationReadRequest { id })
                .await
            {
                Ok(_) => controller.after_mutation(),
                Err(e) => set_notification.set(Some((e.to_string(), true))),
            }
        });
    };

    view! {
        <div class="card bg-base-100 shadow-xl">
            <div class="card-body">
                <Toast notification=notification.into() />

                <div class="flex items-center justify-between">
                    <h3 class="card-title gap-2">
                        <Bell attr:class="h-5 w-5" /> "Notifications"
                    </h3>
                    <button
                        class="btn btn-ghost btn-circle"
                        on:click=move |_| controller.reload()
                        disabled=move || controller.is_loading()
                    >
                        <RefreshCw attr:class=move || if controller.is_loading() { "h-5 w-5 animate-spin" } else { "h-5 w-5" } />
                    </button>
                </div>

                <Show when=move || controller.fetch_error().is_some()>
                    <div role="alert" class="alert alert-warning text-sm py-2">
                        <span>{move || controller.fetch_error().unwrap_or_default()}</span>
                    </div>
                </Show>

                <Show when=move || controller.visible().items.is_empty() && !controller.is_loading()>
                    <p class="text-center py-8 text-base-content/50">"All caught up."</p>
                </Show>

                <div class="space-y-2">
                    <For
                        each=move || controller.visible().items
                        key=|n| (n.id.clone(), n.read)
                        children=move |item| {
                            let id = item.id.clone();
                            let unread = !item.read;
                            view! {
                                <div class=move || {
                                    if unread {
                                        "flex items-start justify-between rounded p-3 gap-2 bg-primary/10"
                                    } else {
                                        "flex items-start justify-between rounded p-3 gap-2 bg-base-200"
                                    }
                                }>
                                    <div>
                                        <p class="font-bold">{item.title.clone()}</p>
                                        <p class="text-sm opacity-70">{item.message.clone()}</p>
                                        <p class="text-xs opacity-50">
                                            {item.created_at.clone().unwrap_or_default()}
                                        </p>
                                    </div>
                                    <Show when=move || unread>
                                        <button
                                            class="btn btn-ghost btn-sm gap-1"
                                            on:click={
                                                let id = id.clone();
                                                move |_| mark_read(id.clone())
                                            }
                                        >
                                            <CheckCircle attr:class="h-4 w-4" /> "Mark read"
                                        </button>
                                    </Show>
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
    }
}
