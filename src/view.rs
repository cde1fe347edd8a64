//! 仪表盘区块切换
//!
//! 页面级路由之下还有一层：仪表盘内部按 [`Section`] 切换内容面板。
//! 激活区块是单一信号，面板可见性全部由它派生；
//! 区块可以注册刷新回调，切换到该区块时触发（含重复切换）。

use std::collections::HashMap;

use leptos::prelude::*;

use crate::logging::log_info;
use crate::section::Section;

/// 区块路由器。Copy，可直接塞进事件闭包。
#[derive(Clone, Copy)]
pub struct SectionRouter {
    active: RwSignal<Section>,
    loaders: StoredValue<HashMap<Section, Callback<()>>>,
}

impl SectionRouter {
    pub fn new() -> Self {
        Self {
            active: RwSignal::new(Section::default()),
            loaders: StoredValue::new(HashMap::new()),
        }
    }

    pub fn active(&self) -> RwSignal<Section> {
        self.active
    }

    /// 某区块是否激活（渲染用派生信号）
    pub fn is_active(&self, section: Section) -> Signal<bool> {
        let active = self.active;
        Signal::derive(move || active.get() == section)
    }

    /// 注册区块的刷新回调。同一区块重复注册时后者覆盖前者。
    pub fn register_loader(&self, section: Section, loader: Callback<()>) {
        self.loaders.update_value(|m| {
            m.insert(section, loader);
        });
    }

    /// 切换到指定区块并触发其刷新回调。
    /// 重复点击当前区块同样触发刷新，激活状态保持不变。
    pub fn show(&self, section: Section) {
        log_info!("[View] showing section: {}", section.key());
        self.active.set(section);
        let loader = self.loaders.with_value(|m| m.get(&section).copied());
        if let Some(loader) = loader {
            loader.run(());
        }
    }
}

impl Default for SectionRouter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn counting_loader() -> (Callback<()>, Arc<AtomicU32>) {
        let count = Arc::new(AtomicU32::new(0));
        let inner = count.clone();
        let cb = Callback::new(move |_| {
            inner.fetch_add(1, Ordering::SeqCst);
        });
        (cb, count)
    }

    #[test]
    fn defaults_to_dashboard() {
        let router = SectionRouter::new();
        assert_eq!(router.active().get_untracked(), Section::Dashboard);
        assert!(router.is_active(Section::Dashboard).get_untracked());
        assert!(!router.is_active(Section::Settings).get_untracked());
    }

    #[test]
    fn show_switches_active_and_runs_loader() {
        let router = SectionRouter::new();
        let (loader, count) = counting_loader();
        router.register_loader(Section::Sales, loader);

        router.show(Section::Sales);
        assert_eq!(router.active().get_untracked(), Section::Sales);
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn repeated_show_reruns_loader_idempotent_state() {
        let router = SectionRouter::new();
        let (loader, count) = counting_loader();
        router.register_loader(Section::Dashboard, loader);

        router.show(Section::Dashboard);
        router.show(Section::Dashboard);
        router.show(Section::Dashboard);

        assert_eq!(router.active().get_untracked(), Section::Dashboard);
        assert_eq!(count.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn section_without_loader_still_activates() {
        let router = SectionRouter::new();
        router.show(Section::Reports);
        assert_eq!(router.active().get_untracked(), Section::Reports);
    }

    #[test]
    fn reregistering_replaces_loader() {
        let router = SectionRouter::new();
        let (first, first_count) = counting_loader();
        let (second, second_count) = counting_loader();
        router.register_loader(Section::Settings, first);
        router.register_loader(Section::Settings, second);

        router.show(Section::Settings);
        assert_eq!(first_count.load(Ordering::SeqCst), 0);
        assert_eq!(second_count.load(Ordering::SeqCst), 1);
    }
}
