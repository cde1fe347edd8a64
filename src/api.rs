//! 后端 API 访问层
//!
//! 每种资源一个操作，全部挂在 [`BackendApi`] trait 上，
//! 生产实现 [`HttpBackendApi`] 走 fetch；测试注入内存 mock。
//! 约定：不重试、不退避；401/403 一律视为会话失效。

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use kanri_shared::{
    ActivityRecord, DashboardStats, ErrorResponse, LoginRequest, LoginResponse, MenuResponse,
    RegisterRequest, UserInfo,
};

use crate::web::{HttpClient, HttpError, HttpRequestBuilder};

// =========================================================
// 错误类型
// =========================================================

#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// 401/403：令牌缺失或已失效
    Unauthorized,
    /// 其余非 2xx，携带后端 message（可解析时）
    Api { status: u16, message: Option<String> },
    /// 网络层失败（含请求构建失败）
    Network(String),
    /// 响应体解析失败
    Decode(String),
}

impl ApiError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }

    /// 后端下发的业务错误消息（存在时原样展示给用户）
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Api { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

impl core::fmt::Display for ApiError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ApiError::Unauthorized => write!(f, "unauthorized"),
            ApiError::Api { status, message } => match message {
                Some(msg) => write!(f, "server error ({}): {}", status, msg),
                None => write!(f, "server error ({})", status),
            },
            ApiError::Network(msg) => write!(f, "network error: {}", msg),
            ApiError::Decode(msg) => write!(f, "decode error: {}", msg),
        }
    }
}

impl From<HttpError> for ApiError {
    fn from(e: HttpError) -> Self {
        match e {
            HttpError::RequestBuildFailed(msg) | HttpError::NetworkError(msg) => {
                ApiError::Network(msg)
            }
            HttpError::ResponseParseFailed(msg) => ApiError::Decode(msg),
        }
    }
}

// =========================================================
// 抽象接口
// =========================================================

/// 后端 REST 面的访问契约。
/// 需要令牌的操作显式接收 token，由会话层负责传入。
#[async_trait(?Send)]
pub trait BackendApi {
    async fn login(&self, req: &LoginRequest) -> Result<LoginResponse, ApiError>;
    async fn register(&self, req: &RegisterRequest) -> Result<(), ApiError>;
    async fn logout(&self, token: &str) -> Result<(), ApiError>;
    async fn menu(&self, token: &str) -> Result<MenuResponse, ApiError>;
    async fn profile(&self, token: &str) -> Result<UserInfo, ApiError>;
    async fn stats(&self, token: &str) -> Result<DashboardStats, ApiError>;
    async fn activity(&self, token: &str) -> Result<Vec<ActivityRecord>, ApiError>;
}

// =========================================================
// 生产环境实现 (fetch)
// =========================================================

#[derive(Debug, Clone, PartialEq, Default)]
pub struct HttpBackendApi {
    base_url: String,
}

impl HttpBackendApi {
    /// `base_url` 为空时请求同源绝对路径（页面与 API 同域部署，即原始形态）
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// 发送并处理状态码；成功时返回响应体文本
    async fn fetch_text(&self, builder: HttpRequestBuilder) -> Result<String, ApiError> {
        let res = builder.send().await?;
        let status = res.status();

        if res.ok() {
            return res.text().await.map_err(ApiError::from);
        }

        if status == 401 || status == 403 {
            return Err(ApiError::Unauthorized);
        }

        // 错误体尽力解析，拿不到 message 也要把状态码报上去
        let message = match res.text().await {
            Ok(body) => serde_json::from_str::<ErrorResponse>(&body)
                .ok()
                .and_then(|e| e.message),
            Err(_) => None,
        };
        Err(ApiError::Api { status, message })
    }

    async fn fetch_json<T: DeserializeOwned>(
        &self,
        builder: HttpRequestBuilder,
    ) -> Result<T, ApiError> {
        let text = self.fetch_text(builder).await?;
        serde_json::from_str(&text).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

#[async_trait(?Send)]
impl BackendApi for HttpBackendApi {
    async fn login(&self, req: &LoginRequest) -> Result<LoginResponse, ApiError> {
        let builder = HttpClient::post(&self.url("/auth/login")).json(req)?;
        self.fetch_json(builder).await
    }

    async fn register(&self, req: &RegisterRequest) -> Result<(), ApiError> {
        let builder = HttpClient::post(&self.url("/auth/register")).json(req)?;
        self.fetch_text(builder).await.map(|_| ())
    }

    async fn logout(&self, token: &str) -> Result<(), ApiError> {
        let builder = HttpClient::post(&self.url("/auth/logout")).bearer(token);
        self.fetch_text(builder).await.map(|_| ())
    }

    async fn menu(&self, token: &str) -> Result<MenuResponse, ApiError> {
        self.fetch_json(HttpClient::get(&self.url("/menu")).bearer(token))
            .await
    }

    async fn profile(&self, token: &str) -> Result<UserInfo, ApiError> {
        self.fetch_json(HttpClient::get(&self.url("/api/users/profile")).bearer(token))
            .await
    }

    async fn stats(&self, token: &str) -> Result<DashboardStats, ApiError> {
        self.fetch_json(HttpClient::get(&self.url("/api/dashboard/stats")).bearer(token))
            .await
    }

    async fn activity(&self, token: &str) -> Result<Vec<ActivityRecord>, ApiError> {
        self.fetch_json(HttpClient::get(&self.url("/api/dashboard/activity")).bearer(token))
            .await
    }
}

// =========================================================
// 测试 mock（会话 / 加载测试共用）
// =========================================================

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use futures::channel::oneshot;
    use kanri_shared::Role;
    use std::cell::RefCell;

    pub fn sample_user() -> UserInfo {
        UserInfo {
            username: "admin".to_string(),
            role: Role::Admin,
        }
    }

    pub fn sample_login() -> LoginResponse {
        LoginResponse {
            token: "jwt-abc".to_string(),
            user: sample_user(),
        }
    }

    pub fn sample_activity() -> Vec<ActivityRecord> {
        serde_json::from_str(
            r#"[{
                "createdAt": "2024-06-01T09:30:00",
                "username": "admin",
                "action": "USER_LOGIN",
                "status": "SUCCESS"
            }]"#,
        )
        .unwrap()
    }

    /// 内存 mock：每个操作一次性取走预置结果，并记录调用顺序。
    /// `*_gate` 用于并发测试里控制完成顺序。
    #[derive(Default)]
    pub struct MockApi {
        pub log: RefCell<Vec<String>>,
        pub login_result: RefCell<Option<Result<LoginResponse, ApiError>>>,
        pub register_result: RefCell<Option<Result<(), ApiError>>>,
        pub logout_result: RefCell<Option<Result<(), ApiError>>>,
        pub menu_result: RefCell<Option<Result<MenuResponse, ApiError>>>,
        pub profile_result: RefCell<Option<Result<UserInfo, ApiError>>>,
        pub stats_result: RefCell<Option<Result<DashboardStats, ApiError>>>,
        pub activity_result: RefCell<Option<Result<Vec<ActivityRecord>, ApiError>>>,
        pub stats_gate: RefCell<Option<oneshot::Receiver<()>>>,
        pub activity_gate: RefCell<Option<oneshot::Receiver<()>>>,
    }

    impl MockApi {
        fn push_log(&self, op: &str) {
            self.log.borrow_mut().push(op.to_string());
        }

        fn take<T>(slot: &RefCell<Option<Result<T, ApiError>>>) -> Result<T, ApiError> {
            slot.borrow_mut()
                .take()
                .unwrap_or(Err(ApiError::Network("no mock response".to_string())))
        }
    }

    #[async_trait(?Send)]
    impl BackendApi for MockApi {
        async fn login(&self, req: &LoginRequest) -> Result<LoginResponse, ApiError> {
            self.push_log(&format!("login:{}", req.username));
            Self::take(&self.login_result)
        }

        async fn register(&self, req: &RegisterRequest) -> Result<(), ApiError> {
            self.push_log(&format!("register:{}", req.username));
            Self::take(&self.register_result)
        }

        async fn logout(&self, _token: &str) -> Result<(), ApiError> {
            self.push_log("logout");
            Self::take(&self.logout_result)
        }

        async fn menu(&self, _token: &str) -> Result<MenuResponse, ApiError> {
            self.push_log("menu");
            Self::take(&self.menu_result)
        }

        async fn profile(&self, _token: &str) -> Result<UserInfo, ApiError> {
            self.push_log("profile");
            Self::take(&self.profile_result)
        }

        async fn stats(&self, _token: &str) -> Result<DashboardStats, ApiError> {
            self.push_log("stats");
            let gate = self.stats_gate.borrow_mut().take();
            if let Some(rx) = gate {
                let _ = rx.await;
            }
            Self::take(&self.stats_result)
        }

        async fn activity(&self, _token: &str) -> Result<Vec<ActivityRecord>, ApiError> {
            self.push_log("activity");
            let gate = self.activity_gate.borrow_mut().take();
            if let Some(rx) = gate {
                let _ = rx.await;
            }
            Self::take(&self.activity_result)
        }
    }

    #[test]
    fn base_url_trailing_slash_trimmed() {
        let api = HttpBackendApi::new("https://example.com/");
        assert_eq!(api.url("/menu"), "https://example.com/menu");

        let same_origin = HttpBackendApi::default();
        assert_eq!(same_origin.url("/auth/login"), "/auth/login");
    }

    #[test]
    fn http_error_mapping() {
        assert_eq!(
            ApiError::from(HttpError::NetworkError("offline".to_string())),
            ApiError::Network("offline".to_string())
        );
        assert_eq!(
            ApiError::from(HttpError::ResponseParseFailed("bad json".to_string())),
            ApiError::Decode("bad json".to_string())
        );
    }

    #[test]
    fn server_message_only_from_api_errors() {
        let with_msg = ApiError::Api {
            status: 400,
            message: Some("ユーザー名は既に使用されています".to_string()),
        };
        assert_eq!(
            with_msg.server_message(),
            Some("ユーザー名は既に使用されています")
        );
        assert_eq!(ApiError::Unauthorized.server_message(), None);
        assert_eq!(ApiError::Network("x".to_string()).server_message(), None);
    }
}
