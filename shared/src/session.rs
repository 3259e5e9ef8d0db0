//! 会话状态模块
//!
//! "谁在登录"的唯一事实来源。状态转换全部是纯函数，由前端的
//! 上下文层负责接到信号和 LocalStorage 上；这里不碰任何平台 API。
//!
//! 不变量：`token` 与 `claims` 同生同灭。解码失败一律回到未登录，
//! 绝不保留半截会话。

use crate::claims::{self, Claims, ClaimsError};
use crate::date::Timestamp;
use crate::Role;

/// 当前会话：令牌 + 解码后的声明
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    token: Option<String>,
    claims: Option<Claims>,
}

impl Session {
    pub fn authenticated(&self) -> bool {
        self.claims.is_some()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn claims(&self) -> Option<&Claims> {
        self.claims.as_ref()
    }

    pub fn role(&self) -> Option<Role> {
        self.claims.as_ref().map(|c| c.role)
    }
}

/// 登录：解码成功则建立会话，失败则返回错误（会话保持清空）
pub fn login(token: &str, now: Timestamp) -> Result<Session, ClaimsError> {
    let decoded = claims::decode(token, now)?;
    Ok(Session {
        token: Some(token.to_string()),
        claims: Some(decoded),
    })
}

/// 注销：无条件清空
pub fn logout() -> Session {
    Session::default()
}

/// 页面加载时从持久化令牌恢复会话的结果
#[derive(Debug, Clone, PartialEq)]
pub enum InitOutcome {
    /// 恢复成功
    Restored(Session),
    /// 没有持久化令牌，正常以未登录启动
    CleanStart,
    /// 持久化令牌已坏（或过期）——调用方必须删除持久化值，
    /// 而不是把坏令牌留在存储里
    CorruptToken(ClaimsError),
}

impl InitOutcome {
    /// 折叠成会话：恢复失败一律等价于未登录
    pub fn into_session(self) -> Session {
        match self {
            InitOutcome::Restored(session) => session,
            InitOutcome::CleanStart | InitOutcome::CorruptToken(_) => Session::default(),
        }
    }
}

/// 启动时恢复：有持久化令牌就尝试解码，失败则指示清除
pub fn initialize(persisted: Option<&str>, now: Timestamp) -> InitOutcome {
    match persisted {
        None => InitOutcome::CleanStart,
        Some(token) => match login(token, now) {
            Ok(session) => InitOutcome::Restored(session),
            Err(e) => InitOutcome::CorruptToken(e),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::Engine;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use serde_json::json;

    fn token(role: &str, exp: i64) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let body = URL_SAFE_NO_PAD.encode(
            json!({ "sub": "u-9", "role": role, "exp": exp })
                .to_string()
                .as_bytes(),
        );
        format!("{}.{}.sig", header, body)
    }

    fn now() -> Timestamp {
        Timestamp::from_secs(1_700_000_000)
    }

    /// token 和 claims 要么都有、要么都没有
    fn invariant_holds(s: &Session) -> bool {
        s.token().is_some() == s.claims().is_some()
    }

    #[test]
    fn login_builds_full_session() {
        let session = login(&token("admin", 1_700_003_600), now()).unwrap();
        assert!(session.authenticated());
        assert_eq!(session.role(), Some(Role::Admin));
        assert!(invariant_holds(&session));
    }

    #[test]
    fn login_failure_leaves_nothing_behind() {
        let expired = token("admin", 1);
        for bad in ["garbage", "a.b", expired.as_str()] {
            assert!(login(bad, now()).is_err());
        }
    }

    #[test]
    fn logout_clears_unconditionally() {
        let session = logout();
        assert!(!session.authenticated());
        assert!(invariant_holds(&session));
    }

    #[test]
    fn initialize_restores_good_token() {
        let outcome = initialize(Some(&token("user", 1_700_003_600)), now());
        let InitOutcome::Restored(session) = outcome else {
            panic!("expected restore");
        };
        assert_eq!(session.role(), Some(Role::User));
        assert!(invariant_holds(&session));
    }

    #[test]
    fn initialize_flags_corrupt_token_for_deletion() {
        let outcome = initialize(Some("not.a.jwt!"), now());
        assert!(matches!(outcome, InitOutcome::CorruptToken(_)));
        assert!(!outcome.into_session().authenticated());
    }

    #[test]
    fn initialize_flags_expired_token_for_deletion() {
        let outcome = initialize(Some(&token("user", 1)), now());
        assert!(matches!(
            outcome,
            InitOutcome::CorruptToken(crate::claims::ClaimsError::Expired)
        ));
    }

    #[test]
    fn initialize_without_token_is_clean_start() {
        assert_eq!(initialize(None, now()), InitOutcome::CleanStart);
    }
}
