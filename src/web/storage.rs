//! 令牌持久化模块
//!
//! 会话令牌需要在页面刷新后存活，因此写入浏览器 LocalStorage。
//! 读写契约通过 trait 抽象，原生测试用内存实现替代。

/// 与既有后端页面共用的存储键，不可随意更名
const TOKEN_KEY: &str = "authToken";

/// 令牌存储契约：一个键，登出或失效时必须清除
pub trait TokenStore {
    fn load(&self) -> Option<String>;
    fn save(&self, token: &str) -> bool;
    fn clear(&self) -> bool;
}

/// 生产环境实现：浏览器 LocalStorage
#[derive(Clone, Copy)]
pub struct BrowserTokenStore;

impl BrowserTokenStore {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }
}

impl TokenStore for BrowserTokenStore {
    fn load(&self) -> Option<String> {
        Self::storage()?.get_item(TOKEN_KEY).ok()?
    }

    fn save(&self, token: &str) -> bool {
        Self::storage()
            .and_then(|s| s.set_item(TOKEN_KEY, token).ok())
            .is_some()
    }

    fn clear(&self) -> bool {
        Self::storage()
            .and_then(|s| s.remove_item(TOKEN_KEY).ok())
            .is_some()
    }
}
