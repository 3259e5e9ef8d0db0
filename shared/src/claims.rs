//! 令牌解码模块
//!
//! 客户端只解码 JWT 的 payload 段获取身份声明，不做签名校验——
//! 校验是服务端的职责，客户端信任本地解码结果（已吊销但未过期的
//! 令牌属于已知并接受的陈旧窗口）。过期检查在解码时完成。

use crate::{Role, date::Timestamp};
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 解码后的身份声明
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// 用户 id (Subject)
    pub sub: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    pub role: Role,
    /// 过期时间（Unix 秒）
    pub exp: i64,
    /// 签发时间（Unix 秒）
    #[serde(default)]
    pub iat: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClaimsError {
    /// 不是三段式 `header.payload.signature` 结构
    Malformed,
    /// payload 段不是合法的 base64url
    Base64,
    /// payload 解出来的 JSON 缺字段或类型不对
    Json(String),
    /// `exp` 已过（按解码时刻判断）
    Expired,
}

impl fmt::Display for ClaimsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClaimsError::Malformed => write!(f, "令牌结构无效"),
            ClaimsError::Base64 => write!(f, "令牌编码无效"),
            ClaimsError::Json(msg) => write!(f, "令牌声明无效: {}", msg),
            ClaimsError::Expired => write!(f, "令牌已过期"),
        }
    }
}

impl std::error::Error for ClaimsError {}

/// 解码令牌 payload 为 [`Claims`]
///
/// 任何一步失败都返回错误，调用方必须把会话整体清空，
/// 绝不允许出现"有令牌没声明"的半截会话。
pub fn decode(token: &str, now: Timestamp) -> Result<Claims, ClaimsError> {
    let mut segments = token.split('.');
    let (Some(_header), Some(payload), Some(_signature), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        return Err(ClaimsError::Malformed);
    };

    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .map_err(|_| ClaimsError::Base64)?;

    let claims: Claims =
        serde_json::from_slice(&bytes).map_err(|e| ClaimsError::Json(e.to_string()))?;

    if Timestamp::from_secs(claims.exp) <= now {
        return Err(ClaimsError::Expired);
    }

    Ok(claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    /// 构造一个结构正确（签名随意）的测试令牌
    pub(crate) fn make_token(payload: serde_json::Value) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let body = URL_SAFE_NO_PAD.encode(payload.to_string().as_bytes());
        format!("{}.{}.sig", header, body)
    }

    fn now() -> Timestamp {
        Timestamp::from_secs(1_700_000_000)
    }

    #[test]
    fn decode_valid_token() {
        let token = make_token(json!({
            "sub": "u-1",
            "email": "admin@example.com",
            "role": "admin",
            "exp": 1_700_003_600,
            "iat": 1_700_000_000,
        }));
        let claims = decode(&token, now()).unwrap();
        assert_eq!(claims.sub, "u-1");
        assert_eq!(claims.role, Role::Admin);
    }

    #[test]
    fn decode_rejects_expired() {
        let token = make_token(json!({
            "sub": "u-1",
            "role": "user",
            "exp": 1_699_999_999,
        }));
        assert_eq!(decode(&token, now()), Err(ClaimsError::Expired));
        // exp == now 也算过期
        let token = make_token(json!({
            "sub": "u-1",
            "role": "user",
            "exp": 1_700_000_000,
        }));
        assert_eq!(decode(&token, now()), Err(ClaimsError::Expired));
    }

    #[test]
    fn decode_rejects_malformed_structure() {
        assert_eq!(decode("", now()), Err(ClaimsError::Malformed));
        assert_eq!(decode("only-one-segment", now()), Err(ClaimsError::Malformed));
        assert_eq!(decode("a.b", now()), Err(ClaimsError::Malformed));
        assert_eq!(decode("a.b.c.d", now()), Err(ClaimsError::Malformed));
    }

    #[test]
    fn decode_rejects_bad_base64() {
        assert_eq!(decode("a.!!!!.c", now()), Err(ClaimsError::Base64));
    }

    #[test]
    fn decode_rejects_bad_json() {
        let body = URL_SAFE_NO_PAD.encode(b"not json at all");
        let token = format!("h.{}.s", body);
        assert!(matches!(decode(&token, now()), Err(ClaimsError::Json(_))));

        // 未知角色同样视为无效声明
        let token = make_token(json!({
            "sub": "u-1",
            "role": "superuser",
            "exp": 1_700_003_600,
        }));
        assert!(matches!(decode(&token, now()), Err(ClaimsError::Json(_))));
    }
}
