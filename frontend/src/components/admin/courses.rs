use crate::auth::use_api;
use crate::api::LmsApi;
use crate::components::icons::{Pencil, Plus, RefreshCw, Trash2};
use crate::components::widgets::{ConfirmDeleteDialog, PaginationBar, SearchBox, Toast};
use crate::controller::ListController;
use async_trait::async_trait;
use classdesk_shared::error::ApiResult;
use classdesk_shared::listing::{CollectionClient, ListQuery, ListStore};
use classdesk_shared::protocol::{
    CreateCourseRequest, DeleteCourseRequest, ListCoursesRequest, UpdateCourseRequest,
};
use classdesk_shared::{Course, CoursePayload};
use leptos::prelude::*;
use leptos::task::spawn_local;

/// 课程集合的后端适配器
#[derive(Clone)]
struct CourseClient {
    api: LmsApi,
}

#[async_trait(?Send)]
impl CollectionClient<Course> for CourseClient {
    async fn fetch(&self, _query: &ListQuery) -> ApiResult<Vec<Course>> {
        // 该端点不支持服务端筛选，拉全量、本地筛
        self.api
            .send(&ListCoursesRequest)
            .await
            .map(|env| env.into_items())
    }

    async fn delete(&self, id: &str) -> ApiResult<()> {
        self.api
            .send(&DeleteCourseRequest { id: id.to_string() })
            .await
            .map(|_| ())
    }
}

#[component]
pub fn CourseManager() -> impl IntoView {
    let api = use_api();
    let controller = ListController::new(
        CourseClient { api: api.clone() },
        ListStore::new(|c: &Course| c.title.as_str()),
        |c: &Course| c.id.as_str(),
    );
    let api = StoredValue::new(api);

    // 表单字段；edit_id 非空时表单处于编辑模式
    let (title, set_title) = signal(String::new());
    let (category, set_category) = signal(String::new());
    let (subcategory, set_subcategory) = signal(String::new());
    let (edit_id, set_edit_id) = signal(Option::<String>::None);
    let (saving, set_saving) = signal(false);
    let (notification, set_notification) = signal(Option::<(String, bool)>::None);

    // 初始加载
    controller.reload();

    // 3 秒后清除通知
    Effect::new(move |_| {
        if notification.get().is_some() {
            set_timeout(
                move || set_notification.set(None),
                std::time::Duration::from_secs(3),
            );
        }
    });

    let reset_form = move || {
        set_title.set(String::new());
        set_category.set(String::new());
        set_subcategory.set(String::new());
        set_edit_id.set(None);
    };

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        if title.get().trim().is_empty() {
            set_notification.set(Some(("Course title is required".to_string(), true)));
            return;
        }

        let payload = CoursePayload {
            title: title.get(),
            category: category.get(),
            subcategory: subcategory.get(),
        };
        set_saving.set(true);

        spawn_local(async move {
            let result = match edit_id.get_untracked() {
                Some(id) => api.get_value().send(&UpdateCourseRequest { id, payload }).await,
                None => api.get_value().send(&CreateCourseRequest(payload)).await,
            };
            match result {
                Ok(_) => {
                    set_notification.set(Some(("Course saved".to_string(), false)));
                    reset_form();
                    // 成功后整体重拉，不做本地拼接
                    controller.after_mutation();
                }
                Err(e) => set_notification.set(Some((e.to_string(), true))),
            }
            set_saving.set(false);
        });
    };

    let start_edit = move |course: Course| {
        set_title.set(course.title);
        set_category.set(course.category);
        set_subcategory.set(course.subcategory);
        set_edit_id.set(Some(course.id));
    };

    let pending_title = Signal::derive(move || {
        controller.pending_delete().map(|c: Course| c.title)
    });

    view! {
        <div class="space-y-4">
            <Toast notification=notification.into() />

            <div class="card bg-base-100 shadow-xl">
                <div class="card-body">
                    <h3 class="card-title">
                        {move || if edit_id.get().is_some() { "Edit course" } else { "Add a course" }}
                    </h3>
                    <form class="grid grid-cols-1 md:grid-cols-4 gap-3 items-end" on:submit=on_submit>
                        <div class="form-control">
                            <label class="label" for="course_category">
                                <span class="label-text">"Category"</span>
                            </label>
                            <input
                                id="course_category"
                                type="text"
                                class="input input-bordered"
                                on:input=move |ev| set_category.set(event_target_value(&ev))
                                prop:value=category
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="course_subcategory">
                                <span class="label-text">"Subcategory"</span>
                            </label>
                            <input
                                id="course_subcategory"
                                type="text"
                                class="input input-bordered"
                                on:input=move |ev| set_subcategory.set(event_target_value(&ev))
                                prop:value=subcategory
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="course_title">
                                <span class="label-text">"Course title"</span>
                            </label>
                            <input
                                id="course_title"
                                type="text"
                                class="input input-bordered"
                                on:input=move |ev| set_title.set(event_target_value(&ev))
                                prop:value=title
                                required
                            />
                        </div>
                        <div class="flex gap-2">
                            <button type="submit" class="btn btn-primary gap-2" disabled=move || saving.get()>
                                {move || if saving.get() {
                                    view! { <span class="loading loading-spinner"></span> }.into_any()
                                } else {
                                    view! { <Plus attr:class="h-4 w-4" /> }.into_any()
                                }}
                                {move || if edit_id.get().is_some() { "Update" } else { "Add" }}
                            </button>
                            <Show when=move || edit_id.get().is_some()>
                                <button type="button" class="btn btn-ghost" on:click=move |_| reset_form()>
                                    "Cancel"
                                </button>
                            </Show>
                        </div>
                    </form>
                </div>
            </div>

            <div class="card bg-base-100 shadow-xl">
                <div class="card-body">
                    <div class="flex items-center justify-between flex-wrap gap-2">
                        <SearchBox
                            value=Signal::derive(move || controller.read(|s| s.query().search.clone()))
                            on_input=move |text: String| controller.set_search(text)
                            placeholder="Search by course name"
                        />
                        <button
                            class="btn btn-ghost btn-circle"
                            on:click=move |_| controller.reload()
                            disabled=move || controller.is_loading()
                        >
                            <RefreshCw attr:class=move || if controller.is_loading() { "h-5 w-5 animate-spin" } else { "h-5 w-5" } />
                        </button>
                    </div>

                    // 拉取失败：上一次成功的数据留在下面，错误单独提示
                    <Show when=move || controller.fetch_error().is_some()>
                        <div role="alert" class="alert alert-warning text-sm py-2">
                            <span>{move || controller.fetch_error().unwrap_or_default()}</span>
                        </div>
                    </Show>

                    <Show when=move || controller.visible().items.is_empty() && !controller.is_loading()>
                        <p class="text-center py-8 text-base-content/50">
                            "No courses found."
                        </p>
                    </Show>

                    <div class="grid grid-cols-1 md:grid-cols-3 gap-3">
                        <For
                            each=move || controller.visible().items
                            key=|c| c.id.clone()
                            children=move |course| {
                                let edit_target = course.clone();
                                let delete_target = course.clone();
                                view! {
                                    <div class="card bg-base-200">
                                        <div class="card-body p-4">
                                            <p class="text-xs text-base-content/60">
                                                {course.category.clone()} " / " {course.subcategory.clone()}
                                            </p>
                                            <h4 class="font-bold">{course.title.clone()}</h4>
                                            <div class="card-actions justify-end">
                                                <button
                                                    class="btn btn-ghost btn-sm gap-1"
                                                    on:click=move |_| start_edit(edit_target.clone())
                                                >
                                                    <Pencil attr:class="h-4 w-4" /> "Edit"
                                                </button>
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
                target=pending_title
                error=controller.mutation_error().into()
                on_confirm=move |_: ()| controller.confirm_delete()
                on_cancel=move |_: ()| controller.cancel_delete()
            />
        </div>
    }
}
