//! 运行时配置模块
//!
//! 唯一的环境配置是后端源站：构建期由 `build.rs` 从 `.env` 注入，
//! 同时用于解析 API 调用与静态文件（`/uploads/` 下的缩略图、手册）。

const DEFAULT_API_BASE: &str = "http://localhost:5000/api";
const DEFAULT_ASSET_ORIGIN: &str = "http://localhost:5000";

/// REST 接口的基地址
pub fn api_base() -> &'static str {
    option_env!("CLASSDESK_API_BASE").unwrap_or(DEFAULT_API_BASE)
}

/// 静态文件源站（缩略图、手册等上传内容）
pub fn asset_origin() -> &'static str {
    option_env!("CLASSDESK_ASSET_ORIGIN").unwrap_or(DEFAULT_ASSET_ORIGIN)
}

/// 把服务端给的文件路径解析成可用的绝对地址
///
/// 绝对 URL 原样返回；`/uploads/...` 之类的相对路径挂到资产源站上。
pub fn uploads_url(path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }
    let origin = asset_origin().trim_end_matches('/');
    if path.starts_with('/') {
        format!("{}{}", origin, path)
    } else {
        format!("{}/{}", origin, path)
    }
}
