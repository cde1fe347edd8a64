//! 管理コンソールのフロントエンド
//!
//! Context-Driven の高内聚低耦合架构：
//! - `session`: 会话门面（令牌 + 用户信息的唯一持有者）
//! - `web::route` / `web::router`: 页面路由（领域模型 + 核心引擎）
//! - `section` / `view`: 仪表盘内部的区块切换
//! - `api` / `loader`: 后端访问与并发数据加载
//! - `notify` / `i18n`: 通知横幅与多语言
//! - `components`: UI 组件层

mod api;
mod components {
    pub mod auth;
    pub mod dashboard;
    pub(crate) mod icons;
}
mod i18n;
mod loader;
mod logging;
mod menu;
mod notify;
mod section;
mod session;
mod view;

// 原生 Web API 封装模块
// 此模块提供对浏览器原生 API 的轻量级封装，替代 gloo-* 系列 crate，
// 以减小 WASM 二进制体积。
pub(crate) mod web {
    mod http;
    pub mod route;
    pub mod router;
    pub mod storage;
    mod timer;

    pub use http::{HttpClient, HttpError, HttpRequestBuilder};
    pub use storage::{BrowserTokenStore, TokenStore};
    pub use timer::Timeout;
}

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::HttpBackendApi;
use crate::components::auth::AuthPage;
use crate::components::dashboard::DashboardPage;
use crate::session::SessionContext;
use crate::web::BrowserTokenStore;
use crate::web::route::PageRoute;
use crate::web::router::{Router, RouterOutlet};

/// 路由匹配函数
///
/// 根据 PageRoute 枚举返回对应的视图组件。
fn route_matcher(route: PageRoute) -> AnyView {
    match route {
        PageRoute::Login => view! { <AuthPage /> }.into_any(),
        PageRoute::Dashboard => view! { <DashboardPage /> }.into_any(),
        PageRoute::NotFound => view! {
            <div class="flex items-center justify-center min-h-screen bg-base-200">
                <div class="text-center">
                    <h1 class="text-6xl font-bold text-error">"404"</h1>
                    <p class="text-xl mt-4">"Not Found"</p>
                </div>
            </div>
        }
        .into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 创建会话上下文（初始为恢复中）
    let session_ctx = SessionContext::new();
    provide_context(session_ctx);

    // 2. 从 LocalStorage 恢复持久化会话
    spawn_local(async move {
        let api = HttpBackendApi::default();
        session::restore(session_ctx, &api, &BrowserTokenStore).await;
    });

    // 3. 认证状态信号注入路由服务（解耦）
    let auth = session_ctx.auth_status_signal();

    view! {
        // 4. 路由器组件：注入认证信号实现守卫
        <Router auth=auth>
            <RouterOutlet matcher=route_matcher />
        </Router>
    }
}
