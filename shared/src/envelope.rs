//! 应答归一化模块
//!
//! 后端的集合接口形状不统一：有的返回裸数组，有的返回
//! `{ items, total }`，还有的按资源名包一层（`{ users: [...] }`）。
//! 这里用一个 untagged 枚举把差异挡在边界上，界面层永远只拿到
//! `Vec<T>`，不必逐屏猜形状。

use serde::Deserialize;
use std::collections::BTreeMap;

/// 集合接口的三种已知应答形状
///
/// 变体顺序即匹配顺序：先裸数组，再 `{ items, total }`，
/// 最后才是按资源名包装的单键对象。
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ListEnvelope<T> {
    Bare(Vec<T>),
    Paged {
        items: Vec<T>,
        #[serde(default)]
        total: Option<u64>,
    },
    Keyed(BTreeMap<String, Vec<T>>),
}

impl<T> ListEnvelope<T> {
    /// 展开为统一的内部形状
    pub fn into_items(self) -> Vec<T> {
        match self {
            ListEnvelope::Bare(items) => items,
            ListEnvelope::Paged { items, .. } => items,
            ListEnvelope::Keyed(map) => map.into_values().next().unwrap_or_default(),
        }
    }

    /// 服务端报告的总数（仅 `{ items, total }` 形状有）
    pub fn server_total(&self) -> Option<u64> {
        match self {
            ListEnvelope::Paged { total, .. } => *total,
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::UserAccount;

    fn parse(json: &str) -> ListEnvelope<UserAccount> {
        serde_json::from_str(json).unwrap()
    }

    const USER: &str = r#"{"_id":"u1","fullName":"Ada","email":"ada@example.com","role":"user"}"#;

    #[test]
    fn bare_array() {
        let env = parse(&format!("[{USER}]"));
        assert_eq!(env.into_items().len(), 1);
    }

    #[test]
    fn items_total_envelope() {
        let env = parse(&format!(r#"{{"items":[{USER}],"total":37}}"#));
        assert_eq!(env.server_total(), Some(37));
        assert_eq!(env.into_items()[0].id, "u1");
    }

    #[test]
    fn keyed_envelope() {
        let env = parse(&format!(r#"{{"users":[{USER}]}}"#));
        assert_eq!(env.into_items()[0].email, "ada@example.com");
    }

    #[test]
    fn empty_shapes() {
        assert!(parse("[]").into_items().is_empty());
        assert!(parse(r#"{"users":[]}"#).into_items().is_empty());
        assert!(parse(r#"{"items":[]}"#).into_items().is_empty());
    }
}
