use crate::api::LmsApi;
use crate::auth::use_api;
use crate::components::icons::RefreshCw;
use crate::components::widgets::{PaginationBar, SearchBox};
use crate::controller::ListController;
use async_trait::async_trait;
use classdesk_shared::error::ApiResult;
use classdesk_shared::listing::{CollectionClient, ListQuery, ListStore};
use classdesk_shared::protocol::LearningHistoryRequest;
use classdesk_shared::{DateRange, LearningRecord, Timestamp};
use leptos::prelude::*;

/// 学习历史是只读报表
#[derive(Clone)]
struct HistoryClient {
    api: LmsApi,
}

#[async_trait(?Send)]
impl CollectionClient<LearningRecord> for HistoryClient {
    async fn fetch(&self, _query: &ListQuery) -> ApiResult<Vec<LearningRecord>> {
        self.api
            .send(&LearningHistoryRequest)
            .await
            .map(|env| env.into_items())
    }
}

/// `<input type="date">` 给的是 `YYYY-MM-DD`；起点取当天零点，终点取当天末尾
fn parse_day(value: &str, end_of_day: bool) -> Option<Timestamp> {
    if value.is_empty() {
        return None;
    }
    let suffix = if end_of_day { "T23:59:59Z" } else { "T00:00:00Z" };
    Timestamp::parse_rfc3339(&format!("{}{}", value, suffix))
}

#[component]
pub fn LearningHistory() -> impl IntoView {
    let controller = ListController::new(
        HistoryClient { api: use_api() },
        ListStore::new(|r: &LearningRecord| r.course.as_str())
            .with_date_key(|r: &LearningRecord| r.started_timestamp()),
        |r: &LearningRecord| r.course.as_str(),
    );

    let (from_day, set_from_day) = signal(String::new());
    let (to_day, set_to_day) = signal(String::new());

    controller.reload();

    let apply_range = move || {
        let range = DateRange::new(
            parse_day(&from_day.get_untracked(), false),
            parse_day(&to_day.get_untracked(), true),
        );
        controller.set_date_range(Some(range));
    };

    view! {
        <div class="card bg-base-100 shadow-xl">
            <div class="card-body">
                <div class="flex items-center justify-between flex-wrap gap-2">
                    <div>
                        <h3 class="card-title">"Learning history"</h3>
                        <p class="text-base-content/70 text-sm">
                            {move || {
                                let view = controller.visible();
                                let size = controller.read(|s| s.query().page_size);
                                if view.filtered_total == 0 {
                                    "No entries".to_string()
                                } else {
                                    let first = (view.page - 1) * size + 1;
                                    let last = (first + view.items.len()).saturating_sub(1);
                                    format!("Showing {}-{} of {}", first, last, view.filtered_total)
                                }
                            }}
                        </p>
                    </div>
                    <div class="flex items-center gap-2 flex-wrap">
                        <SearchBox
                            value=Signal::derive(move || controller.read(|s| s.query().search.clone()))
                            on_input=move |text: String| controller.set_search(text)
                            placeholder="Search by course"
                        />
                        <input
                            type="date"
                            class="input input-bordered input-sm"
                            prop:value=from_day
                            on:input=move |ev| {
                                set_from_day.set(event_target_value(&ev));
                                apply_range();
                            }
                        />
                        <span class="opacity-50">"–"</span>
                        <input
                            type="date"
                            class="input input-bordered input-sm"
                            prop:value=to_day
                            on:input=move |ev| {
                                set_to_day.set(event_target_value(&ev));
                                apply_range();
                            }
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
                                <th>"Course"</th>
                                <th>"Lesson"</th>
                                <th class="hidden md:table-cell">"Start date"</th>
                                <th class="hidden md:table-cell">"End date"</th>
                                <th>"Lesson status"</th>
                                <th>"Quiz score"</th>
                                <th class="hidden md:table-cell">"Quiz status"</th>
                                <th class="hidden md:table-cell">"Attempts"</th>
                            </tr>
                        </thead>
                        <tbody>
                            <Show when=move || controller.visible().items.is_empty() && !controller.is_loading()>
                                <tr>
                                    <td colspan="8" class="text-center py-8 text-base-content/50">
                                        "No learning activity in this window."
                                    </td>
                                </tr>
                            </Show>
                            <Show when=move || controller.is_loading() && controller.visible().items.is_empty()>
                                <tr>
                                    <td colspan="8" class="text-center py-8 text-base-content/50">
                                        <span class="loading loading-spinner loading-md"></span> " Loading..."
                                    </td>
                                </tr>
                            </Show>
                            <For
                                each=move || controller.visible().items
                                key=|r| format!("{}::{}", r.course, r.lesson)
                                children=move |row| {
                                    view! {
                                        <tr>
                                            <td class="font-bold">{row.course.clone()}</td>
                                            <td>{row.lesson.clone()}</td>
                                            <td class="hidden md:table-cell text-sm opacity-70">
                                                {row.start_date.clone().unwrap_or_default()}
                                            </td>
                                            <td class="hidden md:table-cell text-sm opacity-70">
                                                {row.end_date.clone().unwrap_or_default()}
                                            </td>
                                            <td>{row.lesson_status.clone()}</td>
                                            <td>
                                                {row.quiz_score
                                                    .map(|s| format!("{:.0}%", s))
                                                    .unwrap_or_else(|| "—".to_string())}
                                            </td>
                                            <td class="hidden md:table-cell">
                                                {row.quiz_status.clone().unwrap_or_default()}
                                            </td>
                                            <td class="hidden md:table-cell">
                                                {row.attempts.map(|a| a.to_string()).unwrap_or_default()}
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
    }
}
