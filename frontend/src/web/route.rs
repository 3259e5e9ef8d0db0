//! 路由定义模块 - 领域模型
//!
//! 这是纯粹的业务逻辑层，不依赖于 DOM 或 web_sys。
//! 定义了应用的所有路由、每个路由要求的角色，以及守卫的重定向目标。

use classdesk_shared::Role;
use std::fmt::Display;

/// 应用路由枚举
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// 登录/注册页面 (默认路由)
    #[default]
    Login,
    /// 管理控制台 (仅 admin)
    AdminDashboard,
    /// 学员控制台 (仅 user)
    UserDashboard,
    /// 答题页面，携带测验 id (仅 user)
    QuizTake(String),
    /// 角色不符时的落点
    Unauthorized,
    /// 页面未找到
    NotFound,
}

impl AppRoute {
    /// 将 URL path 解析为路由枚举
    pub fn from_path(path: &str) -> Self {
        match path {
            "/" | "/login" => Self::Login,
            "/admin/dashboard" => Self::AdminDashboard,
            "/user/dashboard" => Self::UserDashboard,
            "/unauthorized" => Self::Unauthorized,
            _ => match path.strip_prefix("/quiz/") {
                Some(id) if !id.is_empty() && !id.contains('/') => {
                    Self::QuizTake(id.to_string())
                }
                _ => Self::NotFound,
            },
        }
    }

    /// 获取路由对应的 URL path
    pub fn to_path(&self) -> String {
        match self {
            Self::Login => "/".to_string(),
            Self::AdminDashboard => "/admin/dashboard".to_string(),
            Self::UserDashboard => "/user/dashboard".to_string(),
            Self::QuizTake(id) => format!("/quiz/{}", id),
            Self::Unauthorized => "/unauthorized".to_string(),
            Self::NotFound => "/404".to_string(),
        }
    }

    /// **核心守卫输入：该路由要求的角色**（None 表示对所有人开放）
    pub fn required_role(&self) -> Option<Role> {
        match self {
            Self::AdminDashboard => Some(Role::Admin),
            Self::UserDashboard | Self::QuizTake(_) => Some(Role::User),
            Self::Login | Self::Unauthorized | Self::NotFound => None,
        }
    }

    /// 定义已认证用户是否应该离开此路由（如登录页）
    pub fn should_redirect_when_authenticated(&self) -> bool {
        matches!(self, Self::Login)
    }

    /// 获取认证失败时的重定向目标
    pub fn auth_failure_redirect() -> Self {
        Self::Login
    }

    /// 获取角色不符时的重定向目标
    pub fn wrong_role_redirect() -> Self {
        Self::Unauthorized
    }

    /// 各角色登录成功后的落点
    pub fn home_for(role: Role) -> Self {
        match role {
            Role::Admin => Self::AdminDashboard,
            Role::User => Self::UserDashboard,
        }
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_roundtrip() {
        for route in [
            AppRoute::Login,
            AppRoute::AdminDashboard,
            AppRoute::UserDashboard,
            AppRoute::QuizTake("q-12".into()),
            AppRoute::Unauthorized,
        ] {
            assert_eq!(AppRoute::from_path(&route.to_path()), route);
        }
        assert_eq!(AppRoute::from_path("/login"), AppRoute::Login);
        assert_eq!(AppRoute::from_path("/nope"), AppRoute::NotFound);
        assert_eq!(AppRoute::from_path("/quiz/"), AppRoute::NotFound);
        assert_eq!(AppRoute::from_path("/quiz/a/b"), AppRoute::NotFound);
    }

    #[test]
    fn role_requirements() {
        assert_eq!(AppRoute::AdminDashboard.required_role(), Some(Role::Admin));
        assert_eq!(
            AppRoute::QuizTake("q".into()).required_role(),
            Some(Role::User)
        );
        assert_eq!(AppRoute::Login.required_role(), None);
        assert_eq!(AppRoute::Unauthorized.required_role(), None);
    }
}
