//! 仪表盘数据加载
//!
//! 统计卡片与活动列表并发拉取，加载标记在两路都落定后才清除。
//! 单路失败不阻塞另一路：失败侧保持旧数据（或空态），
//! 并向通知中心推一条本地化告警。

use futures::join;

use kanri_shared::{ActivityRecord, DashboardStats};
use leptos::prelude::*;

use crate::api::BackendApi;
use crate::i18n::{Lang, Msg, text};
use crate::logging::{log_error, log_info};
use crate::notify::{NotificationCenter, Severity};

/// 仪表盘远程数据。Copy 结构体，信号承载全部状态。
#[derive(Clone, Copy)]
pub struct DashboardData {
    pub stats: RwSignal<Option<DashboardStats>>,
    pub activities: RwSignal<Option<Vec<ActivityRecord>>>,
    /// 两路请求至少一路在途时为 true
    pub loading: RwSignal<bool>,
}

impl DashboardData {
    pub fn new() -> Self {
        Self {
            stats: RwSignal::new(None),
            activities: RwSignal::new(None),
            loading: RwSignal::new(false),
        }
    }
}

impl Default for DashboardData {
    fn default() -> Self {
        Self::new()
    }
}

/// 拉取统计与活动。两路并发，合流后统一落信号、清加载标记。
pub async fn load_dashboard_data(
    data: DashboardData,
    api: &impl BackendApi,
    token: &str,
    notifications: NotificationCenter,
    lang: Lang,
) {
    data.loading.set(true);
    log_info!("[Loader] refreshing dashboard data");

    let (stats_res, activity_res) = join!(api.stats(token), api.activity(token));

    match stats_res {
        Ok(stats) => data.stats.set(Some(stats)),
        Err(e) => {
            log_error!("[Loader] stats fetch failed: {}", e);
            notifications.push(Severity::Warning, text(lang, Msg::StatsLoadFailed));
        }
    }

    match activity_res {
        Ok(activities) => data.activities.set(Some(activities)),
        Err(e) => {
            log_error!("[Loader] activity fetch failed: {}", e);
            notifications.push(Severity::Warning, text(lang, Msg::ActivityLoadFailed));
        }
    }

    data.loading.set(false);
}
