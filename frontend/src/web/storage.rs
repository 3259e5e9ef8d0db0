//! LocalStorage 封装模块
//!
//! 使用 `web_sys::Storage` 提供简洁的本地存储接口。
//! 整个应用唯一持久化的客户端状态是认证令牌（键 `"token"`）——
//! 筛选、分页、表单草稿都只活在内存里，刷新即丢。

use classdesk_shared::STORAGE_TOKEN_KEY;

/// 本地存储操作封装
///
/// 提供静态方法访问浏览器 LocalStorage API。
pub struct LocalStorage;

impl LocalStorage {
    /// 获取 LocalStorage 实例
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }

    /// 获取存储的字符串值；键不存在或出错时返回 None
    pub fn get(key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok()?
    }

    /// 设置存储值，返回操作是否成功
    pub fn set(key: &str, value: &str) -> bool {
        Self::storage()
            .and_then(|s| s.set_item(key, value).ok())
            .is_some()
    }

    /// 删除存储的键值对，返回操作是否成功
    pub fn delete(key: &str) -> bool {
        Self::storage()
            .and_then(|s| s.remove_item(key).ok())
            .is_some()
    }

    // --- 令牌专用入口 ---

    /// 上次会话持久化的令牌（如有）
    pub fn token() -> Option<String> {
        Self::get(STORAGE_TOKEN_KEY)
    }

    pub fn set_token(token: &str) -> bool {
        Self::set(STORAGE_TOKEN_KEY, token)
    }

    /// 解码失败或注销时必须调用：坏令牌不许留在存储里
    pub fn clear_token() -> bool {
        Self::delete(STORAGE_TOKEN_KEY)
    }
}
