//! 时间类型模块
//!
//! 提供两种概念：
//! - `Timestamp`: 可序列化的毫秒时间戳，用于传输和存储
//! - `DateRange`: 列表筛选用的时间窗口

use chrono::DateTime;
use serde::{Deserialize, Serialize};
use std::ops::Sub;
use std::time::Duration;

// =========================================================
// Timestamp - 可传输的时间戳类型
// =========================================================

/// 毫秒时间戳，用于序列化传输和存储
///
/// 内部存储为 `i64`，表示自 Unix 纪元以来的毫秒数
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Timestamp(i64);

impl Timestamp {
    /// 创建新的时间戳
    #[inline]
    pub const fn new(ms: i64) -> Self {
        Self(ms)
    }

    /// 获取毫秒值
    #[inline]
    pub const fn as_millis(&self) -> i64 {
        self.0
    }

    /// 获取秒值
    #[inline]
    pub const fn as_secs(&self) -> i64 {
        self.0 / 1000
    }

    /// 从秒级时间戳创建（JWT 的 `exp`/`iat` 是秒）
    #[inline]
    pub const fn from_secs(secs: i64) -> Self {
        Self(secs * 1000)
    }

    /// 从 ISO 8601 / RFC 3339 字符串解析
    ///
    /// 返回 None 如果解析失败
    pub fn parse_rfc3339(s: &str) -> Option<Timestamp> {
        DateTime::parse_from_rfc3339(s)
            .ok()
            .map(|dt| Timestamp(dt.timestamp_millis()))
    }
}

impl From<i64> for Timestamp {
    fn from(ms: i64) -> Self {
        Self(ms)
    }
}

impl From<Timestamp> for i64 {
    fn from(ts: Timestamp) -> Self {
        ts.0
    }
}

impl Sub<Timestamp> for Timestamp {
    type Output = Duration;

    /// 计算两个时间戳之间的差值（返回 Duration）
    fn sub(self, rhs: Timestamp) -> Self::Output {
        let diff_ms = (self.0 - rhs.0).max(0);
        Duration::from_millis(diff_ms as u64)
    }
}

// =========================================================
// DateRange - 筛选窗口
// =========================================================

/// 列表筛选用的时间窗口
///
/// 两端都可选；缺省端不限制。闭区间。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DateRange {
    pub from: Option<Timestamp>,
    pub to: Option<Timestamp>,
}

impl DateRange {
    pub fn new(from: Option<Timestamp>, to: Option<Timestamp>) -> Self {
        Self { from, to }
    }

    /// 判断时间戳是否落在窗口内
    pub fn contains(&self, ts: Timestamp) -> bool {
        if let Some(from) = self.from {
            if ts < from {
                return false;
            }
        }
        if let Some(to) = self.to {
            if ts > to {
                return false;
            }
        }
        true
    }

    /// 窗口是否完全开放（等价于没有筛选）
    pub fn is_unbounded(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_rfc3339_roundtrip() {
        let ts = Timestamp::parse_rfc3339("2023-02-01T00:00:00Z").unwrap();
        assert_eq!(ts.as_secs(), 1675209600);
        assert!(Timestamp::parse_rfc3339("not a date").is_none());
    }

    #[test]
    fn range_contains() {
        let range = DateRange::new(Some(Timestamp::new(1000)), Some(Timestamp::new(2000)));
        assert!(range.contains(Timestamp::new(1000)));
        assert!(range.contains(Timestamp::new(1500)));
        assert!(range.contains(Timestamp::new(2000)));
        assert!(!range.contains(Timestamp::new(999)));
        assert!(!range.contains(Timestamp::new(2001)));
    }

    #[test]
    fn open_ended_range() {
        let after = DateRange::new(Some(Timestamp::new(1000)), None);
        assert!(after.contains(Timestamp::new(i64::MAX)));
        assert!(!after.contains(Timestamp::new(0)));
        assert!(DateRange::default().is_unbounded());
    }
}
