use crate::api::LmsApi;
use crate::auth::use_api;
use crate::components::icons::{RefreshCw, Trash2};
use crate::components::widgets::{ConfirmDeleteDialog, PaginationBar, SearchBox};
use crate::controller::ListController;
use async_trait::async_trait;
use classdesk_shared::error::ApiResult;
use classdesk_shared::listing::{CollectionClient, ListQuery, ListStore};
use classdesk_shared::protocol::{DeleteUserRequest, ListUsersRequest};
use classdesk_shared::UserAccount;
use leptos::prelude::*;

/// 用户集合的后端适配器（该端点的应答包在 `{ users: [...] }` 里，
/// 归一化由 ListEnvelope 处理）
#[derive(Clone)]
struct UserClient {
    api: LmsApi,
}

#[async_trait(?Send)]
impl CollectionClient<UserAccount> for UserClient {
    async fn fetch(&self, _query: &ListQuery) -> ApiResult<Vec<UserAccount>> {
        self.api
            .send(&ListUsersRequest)
            .await
            .map(|env| env.into_items())
    }

    async fn delete(&self, id: &str) -> ApiResult<()> {
        self.api
            .send(&DeleteUserRequest { id: id.to_string() })
            .await
            .map(|_| ())
    }
}

#[component]
pub fn UserManager() -> impl IntoView {
    let api = use_api();
    let controller = ListController::new(
        UserClient { api },
        ListStore::new(|u: &UserAccount| u.full_name.as_str()),
        |u: &UserAccount| u.id.as_str(),
    );

    controller.reload();

    let pending_name = Signal::derive(move || {
        controller
            .pending_delete()
            .map(|u: UserAccount| format!("{} ({})", u.full_name, u.email))
    });

    view! {
        <div class="card bg-base-100 shadow-xl">
            <div class="card-body">
                <div class="flex items-center justify-between flex-wrap gap-2">
                    <div>
                        <h3 class="card-title">"Registered users"</h3>
                        <p class="text-base-content/70 text-sm">
                            {move || format!("{} accounts", controller.visible().filtered_total)}
                        </p>
                    </div>
                    <div class="flex items-center gap-2">
                        <SearchBox
                            value=Signal::derive(move || controller.read(|s| s.query().search.clone()))
                            on_input=move |text: String| controller.set_search(text)
                            placeholder="Search by name"
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

                <div class="overflow-x-auto w-full">
                    <table class="table table-zebra w-full">
                        <thead>
                            <tr>
                                <th>"Name"</th>
                                <th>"Email"</th>
                                <th class="hidden md:table-cell">"Role"</th>
                                <th class="hidden md:table-cell">"Date of birth"</th>
                                <th></th>
                            </tr>
                        </thead>
                        <tbody>
                            <Show when=move || controller.visible().items.is_empty() && !controller.is_loading()>
                                <tr>
                                    <td colspan="5" class="text-center py-8 text-base-content/50">
                                        "No users match the current search."
                                    </td>
                                </tr>
                            </Show>
                            <Show when=move || controller.is_loading() && controller.visible().items.is_empty()>
                                <tr>
                                    <td colspan="5" class="text-center py-8 text-base-content/50">
                                        <span class="loading loading-spinner loading-md"></span> " Loading..."
                                    </td>
                                </tr>
                            </Show>
                            <For
                                each=move || controller.visible().items
                                key=|u| u.id.clone()
                                children=move |user| {
                                    let delete_target = user.clone();
                                    view! {
                                        <tr>
                                            <td class="font-bold">{user.full_name.clone()}</td>
                                            <td class="font-mono text-sm opacity-70">{user.email.clone()}</td>
                                            <td class="hidden md:table-cell">
                                                <div class="badge badge-outline">{user.role.as_str()}</div>
                                            </td>
                                            <td class="hidden md:table-cell text-sm opacity-50">
                                                {user.date_of_birth.clone().unwrap_or_default()}
                                            </td>
                                            <td>
                                                <button
                                                    class="btn btn-ghost btn-sm text-error"
                                                    on:click=move |_| controller.request_delete(delete_target.clone())
                                                >
                                                    <Trash2 attr:class="h-4 w-4" />
                                                </button>
                                            </td>
                                        </tr>
                                    }
                                }
                            />
                        </tbody>
                    </table>
                </div>

                <PaginationBar
                    page=Signal::derive(move || controller.visible().page)
                    total_pages=Signal::derive(move || controller.visible().total_pages)
                    on_page=move |p: usize| controller.set_page(p)
                />
            </div>
        </div>

        <ConfirmDeleteDialog
            target=pending_name
            error=controller.mutation_error().into()
            on_confirm=move |_: ()| controller.confirm_delete()
            on_cancel=move |_: ()| controller.cancel_delete()
        />
    }
}
