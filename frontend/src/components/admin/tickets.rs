use crate::api::LmsApi;
use crate::auth::use_api;
use crate::components::icons::{CheckCircle, RefreshCw, Send, Trash2};
use crate::components::widgets::{ConfirmDeleteDialog, PaginationBar, SearchBox, Toast};
use crate::controller::ListController;
use async_trait::async_trait;
use classdesk_shared::error::ApiResult;
use classdesk_shared::listing::{CollectionClient, ListQuery, ListStore};
use classdesk_shared::protocol::{
    CloseTicketRequest, DeleteTicketRequest, ListTicketsRequest, ReplyTicketRequest,
};
use classdesk_shared::{Ticket, TicketStatus};
use leptos::prelude::*;
use leptos::task::spawn_local;

#[derive(Clone)]
struct TicketClient {
    api: LmsApi,
}

#[async_trait(?Send)]
impl CollectionClient<Ticket> for TicketClient {
    async fn fetch(&self, _query: &ListQuery) -> ApiResult<Vec<Ticket>> {
        self.api
            .send(&ListTicketsRequest)
            .await
            .map(|env| env.into_items())
    }

    async fn delete(&self, id: &str) -> ApiResult<()> {
        self.api
            .send(&DeleteTicketRequest { id: id.to_string() })
            .await
            .map(|_| ())
    }
}

fn status_badge(status: TicketStatus) -> &'static str {
    match status {
        TicketStatus::Open => "badge badge-info",
        TicketStatus::Resolved => "badge badge-success",
        TicketStatus::Closed => "badge badge-ghost",
    }
}

#[component]
pub fn TicketManager() -> impl IntoView {
    let api = use_api();
    let controller = ListController::new(
        TicketClient { api: api.clone() },
        ListStore::new(|t: &Ticket| t.subject.as_str()),
        |t: &Ticket| t.id.as_str(),
    );
    let api = StoredValue::new(api);

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

    // 回复/关闭共用一套"请求成功后整体重拉"的善后
    let run_mutation = move |label: &'static str, fut_id: String, close: bool, reply: String| {
        spawn_local(async move {
            let result = if close {
                api.get_value().send(&CloseTicketRequest { id: fut_id }).await
            } else {
                api.get_value()
                    .send(&ReplyTicketRequest {
                        id: fut_id,
                        reply,
                    })
                    .await
            };
            match result {
                Ok(_) => {
                    set_notification.set(Some((format!("{} succeeded", label), false)));
                    controller.after_mutation();
                }
                Err(e) => set_notification.set(Some((e.to_string(), true))),
            }
        });
    };

    let pending_subject = Signal::derive(move || {
        controller.pending_delete().map(|t: Ticket| t.subject)
    });

    view! {
        <div class="space-y-4">
            <Toast notification=notification.into() />

            <div class="card bg-base-100 shadow-xl">
                <div class="card-body">
                    <div class="flex items-center justify-between flex-wrap gap-2">
                        <div>
                            <h3 class="card-title">"Support tickets"</h3>
                            <p class="text-base-content/70 text-sm">
                                "Reply, resolve or remove learner tickets."
                            </p>
                        </div>
                        <div class="flex items-center gap-2">
                            <SearchBox
                                value=Signal::derive(move || controller.read(|s| s.query().search.clone()))
                                on_input=move |text: String| controller.set_search(text)
                                placeholder="Search by subject"
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
                        <p class="text-center py-8 text-base-content/50">"No tickets."</p>
                    </Show>

                    <div class="space-y-3">
                        <For
                            each=move || controller.visible().items
                            key=|t| t.id.clone()
                            children=move |ticket| {
                                let (reply_text, set_reply_text) = signal(String::new());
                                let reply_id = ticket.id.clone();
                                let close_id = ticket.id.clone();
                                let delete_target = ticket.clone();
                                let closed = ticket.status == TicketStatus::Closed;
                                view! {
                                    <div class="card bg-base-200">
                                        <div class="card-body p-4 gap-2">
                                            <div class="flex items-center justify-between flex-wrap gap-2">
                                                <div>
                                                    <span class="font-bold">{ticket.subject.clone()}</span>
                                                    <span class="text-sm opacity-60 ml-2">
                                                        {ticket.user_email.clone().unwrap_or_default()}
                                                    </span>
                                                </div>
                                                <div class=status_badge(ticket.status)>
                                                    {ticket.status.as_str()}
                                                </div>
                                            </div>
                                            <p class="text-sm">{ticket.description.clone()}</p>
                                            <Show when={
                                                let has_reply = ticket.reply.is_some();
                                                move || has_reply
                                            }>
                                                <p class="text-sm bg-base-100 rounded p-2">
                                                    <span class="font-bold">"Reply: "</span>
                                                    {ticket.reply.clone().unwrap_or_default()}
                                                </p>
                                            </Show>
                                            <Show when=move || !closed>
                                                <div class="flex items-center gap-2">
                                                    <input
                                                        type="text"
                                                        class="input input-bordered input-sm grow"
                                                        placeholder="Write a reply..."
                                                        prop:value=reply_text
                                                        on:input=move |ev| set_reply_text.set(event_target_value(&ev))
                                                    />
                                                    <button
                                                        class="btn btn-primary btn-sm gap-1"
                                                        on:click={
                                                            let reply_id = reply_id.clone();
                                                            move |_| {
                                                                let text = reply_text.get();
                                                                if text.trim().is_empty() {
                                                                    set_notification.set(Some(("Reply text is required".to_string(), true)));
                                                                    return;
                                                                }
                                                                run_mutation("Reply", reply_id.clone(), false, text);
                                                            }
                                                        }
                                                    >
                                                        <Send attr:class="h-4 w-4" /> "Reply"
                                                    </button>
                                                    <button
                                                        class="btn btn-outline btn-sm gap-1"
                                                        on:click={
                                                            let close_id = close_id.clone();
                                                            move |_| run_mutation("Close", close_id.clone(), true, String::new())
                                                        }
                                                    >
                                                        <CheckCircle attr:class="h-4 w-4" /> "Close"
                                                    </button>
                                                </div>
                                            </Show>
                                            <div class="card-actions justify-end">
                                                <button
                                                    class="btn btn-ghost btn-sm text-error gap-1"
                                                    on:click=move |_| controller.request_delete(delete_target.clone())
                                                >
                                                    <Trash2 attr:class="h-4 w-4" /> "Delete"
                                                </button>
                                            </div>
                                        </div>
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
                target=pending_subject
                error=controller.mutation_error().into()
                on_confirm=move |_: ()| controller.confirm_delete()
                on_cancel=move |_: ()| controller.cancel_delete()
            />
        </div>
    }
}
