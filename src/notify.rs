//! 通知横幅模块
//!
//! 两个页面的通知策略不同且都保留：认证页单横幅（新消息替换旧消息），
//! 仪表盘为堆叠式告警。每条消息展示后固定延时自动关闭，
//! 手动关闭后迟到的定时回调是无害的空操作。
//! 定时能力以 [`Callback`] 注入，浏览器实现走 `setTimeout`，
//! 原生测试注入记录型实现。

use leptos::prelude::*;

use crate::web::Timeout;

/// 自动关闭延时（毫秒）
pub const AUTO_DISMISS_MS: u32 = 5_000;

pub type NotificationId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Info,
    Warning,
    Danger,
}

impl Severity {
    pub fn css_class(self) -> &'static str {
        match self {
            Severity::Success => "alert-success",
            Severity::Info => "alert-info",
            Severity::Warning => "alert-warning",
            Severity::Danger => "alert-error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: NotificationId,
    pub severity: Severity,
    pub text: String,
}

/// 展示策略：认证页替换，仪表盘堆叠
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyPolicy {
    Replace,
    Stack,
}

/// 通知中心
///
/// 全部状态放在信号里，结构体本身 Copy，方便在组件闭包间传递。
#[derive(Clone, Copy)]
pub struct NotificationCenter {
    policy: NotifyPolicy,
    items: RwSignal<Vec<Notification>>,
    next_id: StoredValue<NotificationId>,
    /// (延时毫秒, 到期回调)
    timer: Callback<(u32, Callback<()>)>,
}

impl NotificationCenter {
    pub fn new(policy: NotifyPolicy, timer: Callback<(u32, Callback<()>)>) -> Self {
        Self {
            policy,
            items: RwSignal::new(Vec::new()),
            next_id: StoredValue::new(0),
            timer,
        }
    }

    /// 浏览器环境的通知中心，自动关闭走 `setTimeout`
    pub fn browser(policy: NotifyPolicy) -> Self {
        let timer = Callback::new(|(millis, cb): (u32, Callback<()>)| {
            if let Some(timeout) = Timeout::new(millis, move || cb.run(())) {
                timeout.forget();
            }
        });
        Self::new(policy, timer)
    }

    /// 当前可见的通知（渲染用）
    pub fn items(&self) -> RwSignal<Vec<Notification>> {
        self.items
    }

    /// 展示一条通知，并安排恰好一次的自动关闭
    pub fn push(&self, severity: Severity, text: impl Into<String>) -> NotificationId {
        let id = self.next_id.with_value(|n| *n);
        self.next_id.update_value(|n| *n += 1);

        let note = Notification {
            id,
            severity,
            text: text.into(),
        };

        match self.policy {
            NotifyPolicy::Replace => self.items.set(vec![note]),
            NotifyPolicy::Stack => self.items.update(|v| v.push(note)),
        }

        let items = self.items;
        let on_expire = Callback::new(move |_| {
            items.update(|v| v.retain(|n| n.id != id));
        });
        self.timer.run((AUTO_DISMISS_MS, on_expire));

        id
    }

    /// 手动关闭。id 不存在时为空操作。
    pub fn dismiss(&self, id: NotificationId) {
        self.items.update(|v| v.retain(|n| n.id != id));
    }

    /// 清空全部（表单切换时使用）
    pub fn clear(&self) {
        self.items.set(Vec::new());
    }
}
