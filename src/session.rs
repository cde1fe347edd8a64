//! 会话门面（Session Gate）
//!
//! 令牌与用户信息的唯一持有者。四个操作：login / register / restore / logout。
//! 依赖全部显式注入（API 实现 + 令牌存储），模块内不碰任何全局状态。
//! 路由守卫只消费 [`AuthStatus`] 信号，与会话细节解耦。

use leptos::prelude::*;

use kanri_shared::{LoginRequest, RegisterRequest, UserInfo};

use crate::api::{ApiError, BackendApi};
use crate::logging::log_info;
use crate::web::TokenStore;

/// 路由守卫视角的认证状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthStatus {
    /// 会话恢复尚未完成
    Pending,
    Authenticated,
    Anonymous,
}

/// 会话状态。`token` 为 None 即未认证。
#[derive(Clone, Default, PartialEq)]
pub struct SessionState {
    pub token: Option<String>,
    pub user: Option<UserInfo>,
    /// restore 完成前为 true
    pub is_loading: bool,
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

/// 会话上下文：读写信号对，经 Context 在组件间共享
#[derive(Clone, Copy)]
pub struct SessionContext {
    pub state: ReadSignal<SessionState>,
    pub set_state: WriteSignal<SessionState>,
}

impl SessionContext {
    /// 初始为"恢复中"，页面挂载后由 [`restore`] 落定
    pub fn new() -> Self {
        let (state, set_state) = signal(SessionState {
            is_loading: true,
            ..SessionState::default()
        });
        Self { state, set_state }
    }

    /// 路由守卫注入用的状态信号
    pub fn auth_status_signal(&self) -> Signal<AuthStatus> {
        let state = self.state;
        Signal::derive(move || {
            let s = state.get();
            if s.is_loading {
                AuthStatus::Pending
            } else if s.is_authenticated() {
                AuthStatus::Authenticated
            } else {
                AuthStatus::Anonymous
            }
        })
    }

    /// 当前令牌快照（事件处理器用，不建立响应式依赖）
    pub fn token(&self) -> Option<String> {
        self.state.get_untracked().token
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new()
    }
}

/// 从 Context 获取会话上下文
pub fn use_session() -> SessionContext {
    use_context::<SessionContext>().expect("SessionContext should be provided")
}

// =========================================================
// 操作
// =========================================================

/// 登录。成功时持久化令牌并填充会话；失败时不触碰任何状态，
/// 错误交给表单层展示（后端 message 优先）。
pub async fn login(
    ctx: SessionContext,
    api: &impl BackendApi,
    store: &impl TokenStore,
    username: String,
    password: String,
) -> Result<(), ApiError> {
    let req = LoginRequest { username, password };
    let res = api.login(&req).await?;

    store.save(&res.token);
    ctx.set_state.update(|s| {
        s.token = Some(res.token.clone());
        s.user = Some(res.user.clone());
        s.is_loading = false;
    });
    log_info!("[Session] logged in as {}", res.user.username);
    Ok(())
}

/// 注册。成功与否都不触碰会话，更不会存令牌；
/// 表单回填由调用方（认证页）处理。
pub async fn register(api: &impl BackendApi, req: RegisterRequest) -> Result<(), ApiError> {
    api.register(&req).await
}

/// 恢复持久化会话。
/// 无令牌 -> 匿名落地；有令牌 -> 取用户资料验证，
/// 任何失败都作废令牌（不重试），回到匿名。
pub async fn restore(ctx: SessionContext, api: &impl BackendApi, store: &impl TokenStore) {
    let Some(token) = store.load() else {
        ctx.set_state.update(|s| s.is_loading = false);
        return;
    };

    match api.profile(&token).await {
        Ok(user) => {
            log_info!("[Session] restored session for {}", user.username);
            ctx.set_state.update(|s| {
                s.token = Some(token.clone());
                s.user = Some(user.clone());
                s.is_loading = false;
            });
        }
        Err(e) => {
            log_info!("[Session] stored token rejected: {}", e);
            store.clear();
            ctx.set_state.set(SessionState::default());
        }
    }
}

/// 登出。尽力通知后端（结果忽略），随后无条件清除持久化令牌
/// 与内存会话——即使通知失败也必须清除。
pub async fn logout(ctx: SessionContext, api: &impl BackendApi, store: &impl TokenStore) {
    if let Some(token) = ctx.token() {
        let _ = api.logout(&token).await;
    }

    store.clear();
    ctx.set_state.set(SessionState::default());
    log_info!("[Session] logged out");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::tests::{MockApi, sample_login, sample_user};
    use crate::web::storage::tests::MemoryTokenStore;
    use kanri_shared::Role;

    #[tokio::test]
    async fn login_success_populates_session_and_stores_token() {
        let ctx = SessionContext::new();
        let api = MockApi::default();
        *api.login_result.borrow_mut() = Some(Ok(sample_login()));
        let store = MemoryTokenStore::default();

        login(ctx, &api, &store, "admin".into(), "pw".into())
            .await
            .unwrap();

        let state = ctx.state.get_untracked();
        assert!(state.is_authenticated());
        assert_eq!(state.token.as_deref(), Some("jwt-abc"));
        assert_eq!(state.user.as_ref().unwrap().role, Role::Admin);
        assert_eq!(store.load().as_deref(), Some("jwt-abc"));
        assert_eq!(
            ctx.auth_status_signal().get_untracked(),
            AuthStatus::Authenticated
        );
    }

    #[tokio::test]
    async fn login_failure_leaves_everything_untouched() {
        let ctx = SessionContext::new();
        let api = MockApi::default();
        *api.login_result.borrow_mut() = Some(Err(ApiError::Api {
            status: 401,
            message: Some("ユーザー名またはパスワードが正しくありません".to_string()),
        }));
        let store = MemoryTokenStore::default();

        let err = login(ctx, &api, &store, "admin".into(), "bad".into())
            .await
            .unwrap_err();

        assert!(err.server_message().is_some());
        assert!(store.load().is_none());
        let state = ctx.state.get_untracked();
        assert!(!state.is_authenticated());
        assert!(state.user.is_none());
    }

    #[tokio::test]
    async fn register_never_touches_token_store() {
        let ctx = SessionContext::new();
        let api = MockApi::default();
        *api.register_result.borrow_mut() = Some(Ok(()));
        let store = MemoryTokenStore::default();

        register(
            &api,
            RegisterRequest {
                username: "newuser".into(),
                email: "new@example.com".into(),
                password: "pw".into(),
                role: "USER".into(),
            },
        )
        .await
        .unwrap();

        assert!(store.load().is_none());
        assert!(!ctx.state.get_untracked().is_authenticated());
    }

    #[tokio::test]
    async fn restore_without_token_lands_anonymous() {
        let ctx = SessionContext::new();
        assert_eq!(ctx.auth_status_signal().get_untracked(), AuthStatus::Pending);

        let api = MockApi::default();
        let store = MemoryTokenStore::default();
        restore(ctx, &api, &store).await;

        assert_eq!(
            ctx.auth_status_signal().get_untracked(),
            AuthStatus::Anonymous
        );
        // 无令牌时不应发起任何请求
        assert!(api.log.borrow().is_empty());
    }

    #[tokio::test]
    async fn restore_with_valid_token_authenticates() {
        let ctx = SessionContext::new();
        let api = MockApi::default();
        *api.profile_result.borrow_mut() = Some(Ok(sample_user()));
        let store = MemoryTokenStore::with_token("jwt-abc");

        restore(ctx, &api, &store).await;

        let state = ctx.state.get_untracked();
        assert_eq!(state.token.as_deref(), Some("jwt-abc"));
        assert_eq!(state.user.as_ref().unwrap().username, "admin");
        assert_eq!(store.load().as_deref(), Some("jwt-abc"));
    }

    #[tokio::test]
    async fn restore_invalidates_rejected_token() {
        let ctx = SessionContext::new();
        let api = MockApi::default();
        *api.profile_result.borrow_mut() = Some(Err(ApiError::Unauthorized));
        let store = MemoryTokenStore::with_token("stale-jwt");

        restore(ctx, &api, &store).await;

        assert!(store.load().is_none());
        assert_eq!(
            ctx.auth_status_signal().get_untracked(),
            AuthStatus::Anonymous
        );
    }

    #[tokio::test]
    async fn logout_clears_token_even_when_backend_fails() {
        let ctx = SessionContext::new();
        let api = MockApi::default();
        *api.login_result.borrow_mut() = Some(Ok(sample_login()));
        *api.logout_result.borrow_mut() = Some(Err(ApiError::Network("offline".to_string())));
        let store = MemoryTokenStore::default();

        login(ctx, &api, &store, "admin".into(), "pw".into())
            .await
            .unwrap();
        assert!(store.load().is_some());

        logout(ctx, &api, &store).await;

        assert!(store.load().is_none());
        let state = ctx.state.get_untracked();
        assert!(!state.is_authenticated());
        assert!(state.user.is_none());
        assert_eq!(
            ctx.auth_status_signal().get_untracked(),
            AuthStatus::Anonymous
        );
        // 后端确实被通知过
        assert!(api.log.borrow().contains(&"logout".to_string()));
    }

    #[tokio::test]
    async fn logout_without_token_skips_backend_call() {
        let ctx = SessionContext::new();
        ctx.set_state.update(|s| s.is_loading = false);
        let api = MockApi::default();
        let store = MemoryTokenStore::default();

        logout(ctx, &api, &store).await;

        assert!(api.log.borrow().is_empty());
        assert!(!ctx.state.get_untracked().is_authenticated());
    }
}
