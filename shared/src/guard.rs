//! 路由守卫决策模块 - 领域模型
//!
//! 纯同步判定，不发起任何网络请求：守卫信任本地解码的声明。

use crate::Role;
use crate::claims::Claims;

/// 对目标路由的访问判定
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// 放行，渲染目标视图
    Authorized,
    /// 未登录，重定向到登录页
    Unauthenticated,
    /// 已登录但角色不符，重定向到 unauthorized 页
    WrongRole,
}

/// **核心守卫逻辑**
///
/// 没有声明 → `Unauthenticated`；角色不匹配 → `WrongRole`；
/// 否则放行。`required` 为 None 的路由对所有人开放。
pub fn check_access(claims: Option<&Claims>, required: Option<Role>) -> Access {
    let Some(required) = required else {
        return Access::Authorized;
    };
    match claims {
        None => Access::Unauthenticated,
        Some(c) if c.role == required => Access::Authorized,
        Some(_) => Access::WrongRole,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(role: Role) -> Claims {
        Claims {
            sub: "u-1".into(),
            name: None,
            email: None,
            role,
            exp: i64::MAX / 1000,
            iat: None,
        }
    }

    #[test]
    fn open_route_admits_everyone() {
        assert_eq!(check_access(None, None), Access::Authorized);
        assert_eq!(
            check_access(Some(&claims(Role::User)), None),
            Access::Authorized
        );
    }

    #[test]
    fn missing_claims_means_unauthenticated() {
        assert_eq!(
            check_access(None, Some(Role::Admin)),
            Access::Unauthenticated
        );
    }

    #[test]
    fn role_gating() {
        let admin = claims(Role::Admin);
        // admin 声明可以进 admin 路由，进 user 专属路由则被拒
        assert_eq!(
            check_access(Some(&admin), Some(Role::Admin)),
            Access::Authorized
        );
        assert_eq!(
            check_access(Some(&admin), Some(Role::User)),
            Access::WrongRole
        );

        let user = claims(Role::User);
        assert_eq!(
            check_access(Some(&user), Some(Role::User)),
            Access::Authorized
        );
        assert_eq!(
            check_access(Some(&user), Some(Role::Admin)),
            Access::WrongRole
        );
    }
}
