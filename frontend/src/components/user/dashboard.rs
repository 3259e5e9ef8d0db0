use crate::api::LmsApi;
use crate::auth::{self, use_api, use_session};
use crate::components::icons::{
    Bell, BookOpen, Clock, GraduationCap, HelpCircle, LogOut, RefreshCw, TicketIcon,
};
use crate::components::user::help::HelpPage;
use crate::components::user::history::LearningHistory;
use crate::components::user::notifications::UserNotifications;
use crate::components::user::tickets::MyTickets;
use crate::components::widgets::{PaginationBar, SearchBox};
use crate::controller::ListController;
use crate::web::route::AppRoute;
use crate::web::router::use_router;
use async_trait::async_trait;
use classdesk_shared::Course;
use classdesk_shared::error::ApiResult;
use classdesk_shared::listing::{CollectionClient, ListQuery, ListStore};
use classdesk_shared::protocol::ListCoursesRequest;
use leptos::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UserTab {
    Courses,
    History,
    Tickets,
    Notifications,
    Help,
}

impl UserTab {
    fn label(&self) -> &'static str {
        match self {
            UserTab::Courses => "Courses",
            UserTab::History => "Learning history",
            UserTab::Tickets => "My tickets",
            UserTab::Notifications => "Notifications",
            UserTab::Help => "Help",
        }
    }
}

/// 课程目录是只读集合，不实现删除
#[derive(Clone)]
struct CatalogueClient {
    api: LmsApi,
}

#[async_trait(?Send)]
impl CollectionClient<Course> for CatalogueClient {
    async fn fetch(&self, _query: &ListQuery) -> ApiResult<Vec<Course>> {
        self.api
            .send(&ListCoursesRequest)
            .await
            .map(|env| env.into_items())
    }
}

#[component]
fn CourseCatalogue() -> impl IntoView {
    let router = use_router();
    let controller = ListController::new(
        CatalogueClient { api: use_api() },
        ListStore::new(|c: &Course| c.title.as_str()),
        |c: &Course| c.id.as_str(),
    );

    controller.reload();

    view! {
        <div class="card bg-base-100 shadow-xl">
            <div class="card-body">
                <div class="flex items-center justify-between flex-wrap gap-2">
                    <div>
                        <h3 class="card-title">"Course catalogue"</h3>
                        <p class="text-base-content/70 text-sm">
                            "Pick a course and take its quiz when you are ready."
                        </p>
                    </div>
                    <div class="flex items-center gap-2">
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
                </div>

                <Show when=move || controller.fetch_error().is_some()>
                    <div role="alert" class="alert alert-warning text-sm py-2">
                        <span>{move || controller.fetch_error().unwrap_or_default()}</span>
                    </div>
                </Show>

                <Show when=move || controller.visible().items.is_empty() && !controller.is_loading()>
                    <p class="text-center py-8 text-base-content/50">"No courses available."</p>
                </Show>

                <div class="grid grid-cols-1 md:grid-cols-3 gap-3">
                    <For
                        each=move || controller.visible().items
                        key=|c| c.id.clone()
                        children=move |course| {
                            let quiz_id = course.id.clone();
                            view! {
                                <div class="card bg-base-200">
                                    <div class="card-body p-4">
                                        <p class="text-xs text-base-content/60">
                                            {course.category.clone()} " / " {course.subcategory.clone()}
                                        </p>
                                        <h4 class="font-bold">{course.title.clone()}</h4>
                                        <div class="card-actions justify-end">
                                            <button
                                                class="btn btn-primary btn-sm gap-1"
                                                on:click=move |_| {
                                                    router.navigate_route(AppRoute::QuizTake(quiz_id.clone()))
                                                }
                                            >
                                                <Clock attr:class="h-4 w-4" /> "Take quiz"
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
    }
}

#[component]
pub fn UserDashboardPage() -> impl IntoView {
    let session_ctx = use_session();
    let router = use_router();

    let (tab, set_tab) = signal(UserTab::Courses);

    let learner_name = move || {
        session_ctx
            .session
            .get()
            .claims()
            .and_then(|c| c.name.clone().or_else(|| c.email.clone()))
            .unwrap_or_default()
    };

    let on_logout = move |_| {
        auth::logout(&session_ctx);
        router.navigate("/");
    };

    let tab_button = move |target: UserTab, icon: AnyView| {
        view! {
            <button
                class=move || {
                    if tab.get() == target { "tab tab-active gap-2" } else { "tab gap-2" }
                }
                on:click=move |_| set_tab.set(target)
            >
                {icon}
                {target.label()}
            </button>
        }
    };

    view! {
        <div class="min-h-screen bg-base-200 p-4 md:p-8 font-sans">
            <div class="max-w-7xl mx-auto space-y-6">
                <div class="navbar bg-base-100 rounded-box shadow-xl">
                    <div class="flex-1 gap-2">
                        <GraduationCap attr:class="text-primary h-6 w-6" />
                        <a class="btn btn-ghost text-xl">"ClassDesk"</a>
                        <span class="badge badge-neutral hidden md:inline-flex">
                            {learner_name}
                        </span>
                    </div>
                    <div class="flex-none gap-2">
                        <button on:click=on_logout class="btn btn-outline btn-error gap-2">
                            <LogOut attr:class="h-4 w-4" /> "Logout"
                        </button>
                    </div>
                </div>

                <div role="tablist" class="tabs tabs-boxed bg-base-100 shadow">
                    {tab_button(UserTab::Courses, view! { <BookOpen attr:class="h-4 w-4" /> }.into_any())}
                    {tab_button(UserTab::History, view! { <Clock attr:class="h-4 w-4" /> }.into_any())}
                    {tab_button(UserTab::Tickets, view! { <TicketIcon attr:class="h-4 w-4" /> }.into_any())}
                    {tab_button(UserTab::Notifications, view! { <Bell attr:class="h-4 w-4" /> }.into_any())}
                    {tab_button(UserTab::Help, view! { <HelpCircle attr:class="h-4 w-4" /> }.into_any())}
                </div>

                <Show when=move || tab.get() == UserTab::Courses>
                    <CourseCatalogue />
                </Show>
                <Show when=move || tab.get() == UserTab::History>
                    <LearningHistory />
                </Show>
                <Show when=move || tab.get() == UserTab::Tickets>
                    <MyTickets />
                </Show>
                <Show when=move || tab.get() == UserTab::Notifications>
                    <UserNotifications />
                </Show>
                <Show when=move || tab.get() == UserTab::Help>
                    <HelpPage />
                </Show>
            </div>
        </div>
    }
}
