//! 路由服务模块 - 核心引擎
//!
//! 封装了 web_sys 的 History API，实现高内聚：
//! 所有对 window.history 的操作都集中在此模块。
//! 实现了"监听 -> 验证 -> 处理 -> 加载"的导航流程。
//!
//! 守卫判定本身是纯函数（见 `classdesk_shared::guard`），这里只负责
//! 把判定结果落到 History 与信号上。

use classdesk_shared::claims::Claims;
use classdesk_shared::guard::{Access, check_access};
use leptos::prelude::*;
use wasm_bindgen::prelude::*;

use super::route::AppRoute;

/// 获取当前浏览器路径
fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

/// 推送 History 状态（内部工具函数）
fn push_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.push_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 替换 History 状态（内部工具函数，用于重定向）
fn replace_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 路由器服务
///
/// 封装所有路由操作，通过 Signal 驱动界面更新。
/// 通过注入声明信号实现与会话系统的解耦。
#[derive(Clone, Copy)]
pub struct RouterService {
    /// 当前路由（只读信号）
    current_route: ReadSignal<AppRoute>,
    /// 设置当前路由（写入信号）
    set_route: WriteSignal<AppRoute>,
    /// 当前身份声明（注入的信号，实现解耦）
    claims: Signal<Option<Claims>>,
}

impl RouterService {
    /// 创建新的路由服务
    ///
    /// # Arguments
    /// * `claims` - 身份声明信号，由外部注入实现解耦
    fn new(claims: Signal<Option<Claims>>) -> Self {
        let path = current_path();
        let initial_route = AppRoute::from_path(&path);
        let (current_route, set_route) = signal(initial_route);

        Self {
            current_route,
            set_route,
            claims,
        }
    }

    /// 获取当前路由信号
    pub fn current_route(&self) -> ReadSignal<AppRoute> {
        self.current_route
    }

    /// 对目标路由执行守卫判定，返回实际应落地的路由
    fn resolve(&self, target: AppRoute) -> AppRoute {
        let claims = self.claims.get_untracked();
        match check_access(claims.as_ref(), target.required_role()) {
            Access::Unauthenticated => {
                web_sys::console::log_1(&"[Router] Access denied: not logged in.".into());
                AppRoute::auth_failure_redirect()
            }
            Access::WrongRole => {
                web_sys::console::log_1(&"[Router] Access denied: wrong role.".into());
                AppRoute::wrong_role_redirect()
            }
            Access::Authorized => {
                // 已认证用户访问登录页时送回各自的控制台
                match claims {
                    Some(c) if target.should_redirect_when_authenticated() => {
                        AppRoute::home_for(c.role)
                    }
                    _ => target,
                }
            }
        }
    }

    /// **核心方法：导航与守卫**
    ///
    /// 流程：请求 -> 验证(Guard) -> 处理 -> 加载
    pub fn navigate(&self, path: &str) {
        self.navigate_to_route(AppRoute::from_path(path), true);
    }

    /// 直接导航到路由值（带参数的路由用这个，省去拼 path）
    pub fn navigate_route(&self, target: AppRoute) {
        self.navigate_to_route(target, true);
    }

    /// 导航到指定路由
    ///
    /// # Arguments
    /// * `target` - 目标路由
    /// * `use_push` - true 使用 pushState, false 使用 replaceState
    fn navigate_to_route(&self, target: AppRoute, use_push: bool) {
        let resolved = self.resolve(target);
        if use_push {
            push_history_state(&resolved.to_path());
        } else {
            replace_history_state(&resolved.to_path());
        }
        self.set_route.set(resolved);
    }

    /// 初始化浏览器后退/前进按钮监听
    fn init_popstate_listener(&self) {
        let this = *self;

        let closure = Closure::<dyn Fn()>::new(move || {
            // popstate 时也执行守卫逻辑；重定向用 replace 避免污染历史栈
            let target = AppRoute::from_path(&current_path());
            let resolved = this.resolve(target.clone());
            if resolved != target {
                replace_history_state(&resolved.to_path());
            }
            this.set_route.set(resolved);
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // 泄漏闭包以保持监听器存活
        closure.forget();
    }

    /// 设置会话状态变化时的自动重定向
    fn setup_session_redirect(&self) {
        let this = *self;

        Effect::new(move |_| {
            let claims = this.claims.get();
            let route = this.current_route.get_untracked();

            match claims {
                Some(c) => {
                    // 用户刚登录：离开登录页，落到角色对应的控制台
                    if route.should_redirect_when_authenticated() {
                        let redirect = AppRoute::home_for(c.role);
                        web_sys::console::log_1(
                            &"[Router] Session established, leaving login page.".into(),
                        );
                        push_history_state(&redirect.to_path());
                        this.set_route.set(redirect);
                    }
                }
                None => {
                    // 用户登出：受保护页面一律送回登录页
                    if route.required_role().is_some() {
                        let redirect = AppRoute::auth_failure_redirect();
                        web_sys::console::log_1(
                            &"[Router] Session cleared, redirecting to login.".into(),
                        );
                        push_history_state(&redirect.to_path());
                        this.set_route.set(redirect);
                    }
                }
            }
        });
    }

    /// 初始路由也要过守卫（直接输入受保护 URL 的场景）
    fn enforce_initial_route(&self) {
        let initial = self.current_route.get_untracked();
        self.navigate_to_route(initial, false);
    }
}

/// 提供路由服务到 Context 并初始化
fn provide_router(claims: Signal<Option<Claims>>) -> RouterService {
    let router = RouterService::new(claims);

    router.enforce_initial_route();
    router.init_popstate_listener();
    router.setup_session_redirect();

    provide_context(router);
    router
}

/// 从 Context 获取路由服务
pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

// ============================================================================
// UI 组件
// ============================================================================

/// 路由器根组件
///
/// 提供路由上下文，应在 App 根部使用。
#[component]
pub fn Router(
    /// 身份声明信号
    claims: Signal<Option<Claims>>,
    /// 子组件
    children: Children,
) -> impl IntoView {
    provide_router(claims);

    children()
}

/// 路由出口组件
///
/// 根据当前路由状态渲染对应的组件。
#[component]
pub fn RouterOutlet(
    /// 路由匹配函数：接收当前路由，返回对应视图
    matcher: fn(AppRoute) -> AnyView,
) -> impl IntoView {
    let router = use_router();

    move || {
        let current = router.current_route().get();
        matcher(current)
    }
}
