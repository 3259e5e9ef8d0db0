//! API 客户端模块
//!
//! 所有请求走同一个客户端：统一基地址、统一 `Content-Type`、统一在
//! 这里挂 `Authorization: Bearer <token>`（不再让每个屏幕自己拼头）。
//! 端点的路径/方法/应答类型由 `classdesk_shared::protocol` 静态描述。

use classdesk_shared::error::{ApiError, ApiResult};
use classdesk_shared::protocol::{ApiRequest, HttpMethod};
use classdesk_shared::{BEARER_PREFIX, HEADER_AUTHORIZATION};
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;

/// 服务端错误体里通常带的 `{ message }`
#[derive(Debug, Deserialize)]
struct ServerMessage {
    #[serde(default)]
    message: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LmsApi {
    base_url: String,
    token: Option<String>,
}

impl LmsApi {
    pub fn new(base_url: String, token: Option<String>) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        Self { base_url, token }
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    fn builder(&self, method: HttpMethod, url: &str) -> RequestBuilder {
        match method {
            HttpMethod::Get => Request::get(url),
            HttpMethod::Post => Request::post(url),
            HttpMethod::Put => Request::put(url),
            HttpMethod::Delete => Request::delete(url),
        }
    }

    /// 发送一个协议请求，返回其声明的应答类型
    pub async fn send<R: ApiRequest>(&self, request: &R) -> ApiResult<R::Response> {
        let url = self.url(&request.path());
        let mut builder = self.builder(R::METHOD, &url);

        if R::AUTHENTICATED {
            // 没有令牌就不必打扰服务端了
            let Some(token) = self.token.as_deref() else {
                return Err(ApiError::Unauthorized);
            };
            builder = builder.header(
                HEADER_AUTHORIZATION,
                &format!("{}{}", BEARER_PREFIX, token),
            );
        }

        let response = if R::METHOD.has_body() {
            builder
                .json(request)
                .map_err(|e| ApiError::Decode(e.to_string()))?
                .send()
                .await
        } else {
            builder.send().await
        }
        .map_err(|e| ApiError::Network(e.to_string()))?;

        Self::read_response(response).await
    }

    /// 状态码分类 + 应答体解析
    ///
    /// 401 一律映射为 [`ApiError::Unauthorized`]：本系统没有令牌刷新
    /// 流程，过期会话只能由用户重新登录。
    async fn read_response<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
        if response.status() == 401 {
            return Err(ApiError::Unauthorized);
        }

        if !response.ok() {
            let status = response.status();
            let message = response
                .json::<ServerMessage>()
                .await
                .ok()
                .and_then(|m| m.message)
                .unwrap_or_default();
            return Err(ApiError::server(status, message));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}
