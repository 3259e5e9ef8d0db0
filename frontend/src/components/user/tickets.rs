use crate::api::LmsApi;
use crate::auth::use_api;
use crate::components::icons::{RefreshCw, Send};
use crate::components::widgets::{PaginationBar, Toast};
use crate::controller::ListController;
use async_trait::async_trait;
use classdesk_shared::error::ApiResult;
use classdesk_shared::listing::{CollectionClient, ListQuery, ListStore};
use classdesk_shared::protocol::{CreateTicketRequest, MyTicketsRequest};
use classdesk_shared::{Ticket, TicketPayload, TicketStatus};
use leptos::prelude::*;
use leptos::task::spawn_local;

/// 学员只能看自己的工单；删除是管理端的事
#[derive(Clone)]
struct MyTicketClient {
    api: LmsApi,
}

#[async_trait(?Send)]
impl CollectionClient<Ticket> for MyTicketClient {
    async fn fetch(&self, _query: &ListQuery) -> ApiResult<Vec<Ticket>> {
        self.api
            .send(&MyTicketsRequest)
            .await
            .map(|env| env.into_items())
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
pub fn MyTickets() -> impl IntoView {
    let api = use_api();
    let controller = ListController::new(
        MyTicketClient { api: api.clone() },
        ListStore::new(|t: &Ticket| t.subject.as_str()),
        |t: &Ticket| t.id.as_str(),
    );
    let api = StoredValue::new(api);

    let (subject, set_subject) = signal(String::new());
    let (description, set_description) = signal(String::new());
    let (raising, set_raising) = signal(false);
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

    let on_raise = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        if subject.get().trim().is_empty() || description.get().trim().is_empty() {
            set_notification.set(Some(("Subject and description are required".to_string(), true)));
            return;
        }

        set_raising.set(true);
        spawn_local(async move {
            let request = CreateTicketRequest(TicketPayload {
                subject: subject.get_untracked(),
                description: description.get_untracked(),
            });
            match api.get_value().send(&request).await {
                Ok(_) => {
                    set_notification.set(Some(("Ticket raised".to_string(), false)));
                    set_subject.set(String::new());
                    set_description.set(String::new());
                    controller.after_mutation();
                }
                Err(e) => set_notification.set(Some((e.to_string(), true))),
            }
            set_raising.set(false);
        });
    };

    view! {
        <div class="space-y-4">
            <Toast notification=notification.into() />

            <div class="card bg-base-100 shadow-xl">
                <div class="card-body">
                    <h3 class="card-title">"Raise a ticket"</h3>
                    <form class="grid grid-cols-1 md:grid-cols-3 gap-3 items-end" on:submit=on_raise>
                        <div class="form-control">
                            <label class="label" for="ticket_subject">
                                <span class="label-text">"Subject"</span>
                            </label>
                            <input
                                id="ticket_subject"
                                type="text"
                                class="input input-bordered"
                                on:input=move |ev| set_subject.set(event_target_value(&ev))
                                prop:value=subject
                                required
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="ticket_description">
                                <span class="label-text">"Description"</span>
                            </label>
                            <input
                                id="ticket_description"
                                type="text"
                                class="input input-bordered"
                                on:input=move |ev| set_description.set(event_target_value(&ev))
                                prop:value=description
                                required
                            />
                        </div>
                        <button type="submit" class="btn btn-primary gap-2" disabled=move || raising.get()>
                            {move || if raising.get() {
                                view! { <span class="loading loading-spinner"></span> }.into_any()
                            } else {
                                view! { <Send attr:class="h-4 w-4" /> }.into_any()
                            }}
                            "Submit"
                        </button>
                    </form>
                </div>
            </div>

            <div class="card bg-base-100 shadow-xl">
                <div class="card-body">
                    <div class="flex items-center justify-between">
                        <h3 class="card-title">"My tickets"</h3>
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
                        <p class="text-center py-8 text-base-content/50">
                            "You have not raised any tickets yet."
                        </p>
                    </Show>

                    <div class="space-y-2">
                        <For
                            each=move || controller.visible().items
                            key=|t| t.id.clone()
                            children=move |ticket| {
                                view! {
                                    <div class="bg-base-200 rounded p-3 space-y-1">
                                        <div class="flex items-center justify-between">
                                            <span class="font-bold">{ticket.subject.clone()}</span>
                                            <div class=status_badge(ticket.status)>
                                                {ticket.status.as_str()}
                                            </div>
                                        </div>
                                        <p class="text-sm opacity-70">{ticket.description.clone()}</p>
                                        <Show when={
                                            let has_reply = ticket.reply.is_some();
                                            move || has_reply
                                        }>
                                            <p class="text-sm bg-base-100 rounded p-2">
                                                <span class="font-bold">"Support: "</span>
                                                {ticket.reply.clone().unwrap_or_default()}
                                            </p>
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
        </div>
    }
}
