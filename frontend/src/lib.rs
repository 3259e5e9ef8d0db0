//! ClassDesk 前端应用
//!
//! 采用 Context-Driven 的高内聚低耦合架构：
//! - `web::route`: 路由定义（领域模型）
//! - `web::router`: 路由服务（核心引擎，含角色守卫）
//! - `auth`: 会话状态管理（令牌生命周期）
//! - `controller`: 通用列表控制器（拉取 → 筛选 → 分页 → 变更 → 重拉）
//! - `components`: UI 组件层

mod api;
mod auth;
mod config;
mod controller;

mod components {
    pub mod icons;
    pub mod login;
    pub mod widgets;

    pub mod admin {
        pub mod courses;
        pub mod dashboard;
        pub mod notifications;
        pub mod tickets;
        pub mod users;
    }

    pub mod user {
        pub mod dashboard;
        pub mod help;
        pub mod history;
        pub mod notifications;
        pub mod quiz_take;
        pub mod tickets;
    }
}

// 原生 Web API 封装模块
// 此模块提供对浏览器原生 API 的轻量级封装（存储、定时器、History），
// 以减小 WASM 二进制体积。
pub(crate) mod web {
    pub mod route;
    pub mod router;
    mod storage;
    mod timer;

    pub use storage::LocalStorage;
    pub use timer::Interval;
}

use crate::auth::{SessionContext, init_session};
use crate::components::admin::dashboard::AdminDashboardPage;
use crate::components::login::LoginPage;
use crate::components::user::dashboard::UserDashboardPage;
use crate::components::user::quiz_take::QuizTakePage;

use leptos::prelude::*;
use web::route::AppRoute;
use web::router::{Router, RouterOutlet};

/// 路由匹配函数
///
/// 根据 AppRoute 枚举返回对应的视图组件。守卫已在路由服务里做完，
/// 走到这里的路由都是放行过的。
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::AdminDashboard => view! { <AdminDashboardPage /> }.into_any(),
        AppRoute::UserDashboard => view! { <UserDashboardPage /> }.into_any(),
        AppRoute::QuizTake(id) => view! { <QuizTakePage quiz_id=id /> }.into_any(),
        AppRoute::Unauthorized => view! {
            <div class="flex items-center justify-center min-h-screen bg-base-200">
                <div class="text-center">
                    <h1 class="text-6xl font-bold text-warning">"403"</h1>
                    <p class="text-xl mt-4">"You do not have access to this area."</p>
                    <a href="/" class="btn btn-primary mt-6">"Back to login"</a>
                </div>
            </div>
        }
        .into_any(),
        AppRoute::NotFound => view! {
            <div class="flex items-center justify-center min-h-screen bg-base-200">
                <div class="text-center">
                    <h1 class="text-6xl font-bold text-error">"404"</h1>
                    <p class="text-xl mt-4">"Page not found"</p>
                </div>
            </div>
        }
        .into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 创建会话上下文
    let session_ctx = SessionContext::new();
    provide_context(session_ctx);

    // 2. 初始化会话状态（从 LocalStorage 恢复令牌，坏令牌就地清除）
    init_session(&session_ctx);

    // 3. 获取声明信号，用于注入路由服务（解耦！）
    let claims = session_ctx.claims_signal();

    view! {
        // 4. 路由器组件：注入声明信号实现角色守卫
        <Router claims=claims>
            <RouterOutlet matcher=route_matcher />
        </Router>
    }
}
