//! 定时器封装模块
//!
//! 封装 `setTimeout`，用于通知横幅的自动关闭。

use wasm_bindgen::prelude::*;

/// 一次性定时器
///
/// 默认在 drop 时取消；调用 [`Timeout::forget`] 可放弃取消权，
/// 让回调必定触发（通知自动关闭即属此类）。
pub struct Timeout {
    handle: i32,
    #[allow(dead_code)]
    closure: Closure<dyn FnMut()>,
}

impl Timeout {
    /// 创建一次性定时器；无法获取 window 时返回 None
    pub fn new<F>(millis: u32, callback: F) -> Option<Self>
    where
        F: FnOnce() + 'static,
    {
        let closure = Closure::once(callback);
        let window = web_sys::window()?;

        let handle = window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                millis as i32,
            )
            .ok()?;

        Some(Self { handle, closure })
    }

    /// 放弃对定时器的所有权，回调到期必定执行
    pub fn forget(self) {
        std::mem::forget(self);
    }

    fn cancel(&self) {
        if let Some(window) = web_sys::window() {
            window.clear_timeout_with_handle(self.handle);
        }
    }
}

impl Drop for Timeout {
    fn drop(&mut self) {
        self.cancel();
    }
}
