//! 认证模块
//!
//! 管理会话状态（令牌 + 解码后的声明），与路由系统解耦。
//! 路由服务通过注入的声明信号来执行守卫。
//!
//! 状态转换本身是纯函数（见 `classdesk_shared::session`），这里负责
//! 接到 Leptos 信号和 LocalStorage 上。每次变更都是同步的信号写入，
//! 所有消费者立即可见。

use crate::api::LmsApi;
use crate::config;
use crate::web::LocalStorage;
use classdesk_shared::Role;
use classdesk_shared::claims::{Claims, ClaimsError};
use classdesk_shared::date::Timestamp;
use classdesk_shared::session::{self, InitOutcome, Session};
use leptos::prelude::*;

/// 浏览器当前时钟（毫秒）
pub fn now() -> Timestamp {
    Timestamp::new(js_sys::Date::now() as i64)
}

/// 会话上下文
///
/// 包含读写信号，通过 Context 在组件间共享。除本模块的
/// login/logout/initialize 外，其他组件一律只读。
#[derive(Clone, Copy)]
pub struct SessionContext {
    /// 会话状态（只读）
    pub session: ReadSignal<Session>,
    /// 设置会话状态（写入）
    set_session: WriteSignal<Session>,
}

impl SessionContext {
    /// 创建新的会话上下文
    pub fn new() -> Self {
        let (session, set_session) = signal(Session::default());
        Self {
            session,
            set_session,
        }
    }

    /// 获取声明信号（用于路由服务注入）
    pub fn claims_signal(&self) -> Signal<Option<Claims>> {
        let session = self.session;
        Signal::derive(move || session.get().claims().cloned())
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new()
    }
}

/// 从 Context 获取会话上下文
pub fn use_session() -> SessionContext {
    use_context::<SessionContext>().expect("SessionContext should be provided")
}

/// 以当前会话的令牌构造 API 客户端（统一挂 Bearer 头）
pub fn use_api() -> LmsApi {
    let ctx = use_session();
    let token = ctx
        .session
        .get_untracked()
        .token()
        .map(str::to_string);
    LmsApi::new(config::api_base().to_string(), token)
}

/// 初始化会话状态
///
/// 页面加载时尝试从 LocalStorage 恢复令牌；解码失败（含过期）时
/// 清除持久化值，绝不带着坏令牌启动。
pub fn init_session(ctx: &SessionContext) {
    match session::initialize(LocalStorage::token().as_deref(), now()) {
        InitOutcome::Restored(restored) => {
            web_sys::console::log_1(&"[Auth] Session restored from storage.".into());
            ctx.set_session.set(restored);
        }
        InitOutcome::CleanStart => {}
        InitOutcome::CorruptToken(e) => {
            web_sys::console::warn_1(
                &format!("[Auth] Persisted token rejected ({}), clearing.", e).into(),
            );
            LocalStorage::clear_token();
            ctx.set_session.set(session::logout());
        }
    }
}

/// 登录：解码通过才落地令牌并持久化；失败的解码不产生半截会话
pub fn login(ctx: &SessionContext, token: &str) -> Result<Role, ClaimsError> {
    let established = session::login(token, now())?;
    let role = established.role().ok_or(ClaimsError::Malformed)?;
    LocalStorage::set_token(token);
    ctx.set_session.set(established);
    Ok(role)
}

/// 注销并清除状态与持久化令牌
///
/// 导航由路由服务的会话监听自动处理。
pub fn logout(ctx: &SessionContext) {
    LocalStorage::clear_token();
    ctx.set_session.set(session::logout());
}
