use crate::auth::{self, use_session};
use crate::components::admin::courses::CourseManager;
use crate::components::admin::notifications::NotificationManager;
use crate::components::admin::tickets::TicketManager;
use crate::components::admin::users::UserManager;
use crate::components::icons::{Bell, BookOpen, LogOut, TicketIcon, Users};
use crate::web::router::use_router;
use leptos::prelude::*;

/// 管理控制台的分区
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AdminTab {
    Courses,
    Users,
    Tickets,
    Notifications,
}

impl AdminTab {
    fn label(&self) -> &'static str {
        match self {
            AdminTab::Courses => "Courses",
            AdminTab::Users => "Users",
            AdminTab::Tickets => "Tickets",
            AdminTab::Notifications => "Notifications",
        }
    }
}

#[component]
pub fn AdminDashboardPage() -> impl IntoView {
    let session_ctx = use_session();
    let router = use_router();

    let (tab, set_tab) = signal(AdminTab::Courses);

    let admin_email = move || {
        session_ctx
            .session
            .get()
            .claims()
            .and_then(|c| c.email.clone())
            .unwrap_or_default()
    };

    let on_logout = move |_| {
        auth::logout(&session_ctx);
        router.navigate("/");
    };

    let tab_button = move |target: AdminTab, icon: AnyView| {
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
                        <a class="btn btn-ghost text-xl">"ClassDesk Admin"</a>
                        <span class="badge badge-neutral hidden md:inline-flex">
                            {admin_email}
                        </span>
                    </div>
                    <div class="flex-none gap-2">
                        <button on:click=on_logout class="btn btn-outline btn-error gap-2">
                            <LogOut attr:class="h-4 w-4" /> "Logout"
                        </button>
                    </div>
                </div>

                <div role="tablist" class="tabs tabs-boxed bg-base-100 shadow">
                    {tab_button(AdminTab::Courses, view! { <BookOpen attr:class="h-4 w-4" /> }.into_any())}
                    {tab_button(AdminTab::Users, view! { <Users attr:class="h-4 w-4" /> }.into_any())}
                    {tab_button(AdminTab::Tickets, view! { <TicketIcon attr:class="h-4 w-4" /> }.into_any())}
                    {tab_button(AdminTab::Notifications, view! { <Bell attr:class="h-4 w-4" /> }.into_any())}
                </div>

                // 每个分区都是同一套列表模式的一个实例
                <Show when=move || tab.get() == AdminTab::Courses>
                    <CourseManager />
                </Show>
                <Show when=move || tab.get() == AdminTab::Users>
                    <UserManager />
                </Show>
                <Show when=move || tab.get() == AdminTab::Tickets>
                    <TicketManager />
                </Show>
                <Show when=move || tab.get() == AdminTab::Notifications>
                    <NotificationManager />
                </Show>
            </div>
        </div>
    }
}
