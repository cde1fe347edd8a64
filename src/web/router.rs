//! 路由服务模块 - 核心引擎
//!
//! 封装 History / Location API，集中所有 window.history 操作。
//! 认证状态以信号注入，路由层不感知会话细节；
//! 导航时保留 `?lang=` 等查询参数，语言切换走整页跳转。

use leptos::prelude::*;
use wasm_bindgen::prelude::*;

use super::route::PageRoute;
use crate::logging::log_info;
use crate::session::AuthStatus;

/// 获取当前浏览器路径
fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

/// 获取当前查询串（含 `?`，可能为空）
fn current_search() -> String {
    web_sys::window()
        .and_then(|w| w.location().search().ok())
        .unwrap_or_default()
}

/// 推送 History 状态，保留查询参数
fn push_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let url = format!("{}{}", path, current_search());
            let _ = history.push_state_with_url(&JsValue::NULL, "", Some(&url));
        }
    }
}

/// 替换 History 状态（用于重定向）
fn replace_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let url = format!("{}{}", path, current_search());
            let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(&url));
        }
    }
}

// =========================================================
// 语言参数（整页导航，不走 History）
// =========================================================

/// 读取 `?lang=` 参数
pub fn current_lang_param() -> Option<String> {
    let search = current_search();
    let params = web_sys::UrlSearchParams::new_with_str(&search).ok()?;
    params.get("lang")
}

/// 浏览器语言标签（如 `ja-JP`）
pub fn browser_lang() -> Option<String> {
    web_sys::window()?.navigator().language()
}

/// 以新的 `lang` 参数整页跳转当前地址
pub fn reload_with_lang(code: &str) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let location = window.location();
    let Ok(href) = location.href() else {
        return;
    };
    let Ok(url) = web_sys::Url::new(&href) else {
        return;
    };
    url.search_params().set("lang", code);
    let _ = location.assign(&url.href());
}

// =========================================================
// 路由服务
// =========================================================

/// 路由器服务
///
/// 所有路由操作通过 Signal 驱动界面更新。
#[derive(Clone, Copy)]
pub struct RouterService {
    current_route: ReadSignal<PageRoute>,
    set_route: WriteSignal<PageRoute>,
    /// 认证状态（注入的信号，实现解耦）
    auth: Signal<AuthStatus>,
}

impl RouterService {
    fn new(auth: Signal<AuthStatus>) -> Self {
        let initial_route = PageRoute::from_path(&current_path());
        let (current_route, set_route) = signal(initial_route);

        Self {
            current_route,
            set_route,
            auth,
        }
    }

    /// 当前路由信号
    pub fn current_route(&self) -> ReadSignal<PageRoute> {
        self.current_route
    }

    /// 导航入口：请求 -> 守卫 -> 更新 History -> 更新状态
    pub fn navigate(&self, path: &str) {
        self.navigate_to_route(PageRoute::from_path(path), true);
    }

    fn navigate_to_route(&self, target: PageRoute, use_push: bool) {
        let status = self.auth.get_untracked();
        let resolved = target.resolve(status);

        if resolved != target {
            log_info!("[Router] {} blocked, redirecting to {}", target, resolved);
        }

        if use_push {
            push_history_state(resolved.to_path());
        } else {
            replace_history_state(resolved.to_path());
        }
        self.set_route.set(resolved);
    }

    /// 监听浏览器前进/后退，popstate 时同样执行守卫
    fn init_popstate_listener(&self) {
        let set_route = self.set_route;
        let auth = self.auth;

        let closure = Closure::<dyn Fn()>::new(move || {
            let target = PageRoute::from_path(&current_path());
            let resolved = target.resolve(auth.get_untracked());
            if resolved != target {
                replace_history_state(resolved.to_path());
            }
            set_route.set(resolved);
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // 泄漏闭包以保持监听器存活
        closure.forget();
    }

    /// 认证状态变化时的自动重定向：
    /// 登出（或令牌失效）后停留在受保护页面时送回登录页。
    fn setup_auth_redirect(&self) {
        let current_route = self.current_route;
        let set_route = self.set_route;
        let auth = self.auth;

        Effect::new(move |_| {
            let status = auth.get();
            let route = current_route.get_untracked();

            if status == AuthStatus::Anonymous && route.requires_auth() {
                log_info!("[Router] session gone, redirecting to login");
                push_history_state(PageRoute::Login.to_path());
                set_route.set(PageRoute::Login);
            }
        });
    }
}

/// 提供路由服务到 Context 并初始化监听
fn provide_router(auth: Signal<AuthStatus>) -> RouterService {
    let router = RouterService::new(auth);

    router.init_popstate_listener();
    router.setup_auth_redirect();

    provide_context(router);
    router
}

/// 从 Context 获取路由服务
pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

// =========================================================
// UI 组件
// =========================================================

/// 路由器根组件，应在 App 根部使用
#[component]
pub fn Router(
    /// 认证状态信号
    auth: Signal<AuthStatus>,
    /// 子组件
    children: Children,
) -> impl IntoView {
    provide_router(auth);

    children()
}

/// 路由出口组件：按当前路由渲染对应视图
#[component]
pub fn RouterOutlet(
    /// 路由匹配函数：接收当前路由，返回对应视图
    matcher: fn(PageRoute) -> AnyView,
) -> impl IntoView {
    let router = use_router();

    move || {
        let current = router.current_route().get();
        matcher(current)
    }
}
