use leptos::prelude::*;
use leptos::task::spawn_local;

use kanri_shared::{ActivityStatus, SystemStatus, date::format_datetime};

use crate::api::{BackendApi, HttpBackendApi};
use crate::components::icons::{
    Gauge, Globe, LogIn, LogOut, RefreshCw, Server, UserCheck, Users, menu_icon,
};
use crate::i18n::{Lang, Msg, detect, text};
use crate::loader::{DashboardData, load_dashboard_data};
use crate::menu::{MenuEntry, resolve_menus};
use crate::notify::{NotificationCenter, NotifyPolicy, Severity};
use crate::section::Section;
use crate::session::{self, AuthStatus, use_session};
use crate::view::SectionRouter;
use crate::web::BrowserTokenStore;
use crate::web::router::{browser_lang, current_lang_param, reload_with_lang};

fn activity_status_msg(status: ActivityStatus) -> Msg {
    match status {
        ActivityStatus::Success => Msg::ActSuccess,
        ActivityStatus::Failure => Msg::ActFailure,
        ActivityStatus::Error => Msg::ActError,
        ActivityStatus::Unknown => Msg::ActUnknown,
    }
}

fn activity_badge_class(status: ActivityStatus) -> &'static str {
    match status {
        ActivityStatus::Success => "badge badge-success",
        ActivityStatus::Failure => "badge badge-warning",
        ActivityStatus::Error => "badge badge-error",
        ActivityStatus::Unknown => "badge badge-ghost",
    }
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let session = use_session();
    let status = session.auth_status_signal();

    // ダッシュボードはブラウザ言語も見る（?lang= が優先）
    let lang = detect(
        current_lang_param().as_deref(),
        browser_lang().as_deref(),
        Lang::En,
    );

    // 積み上げ式アラート
    let notifications = NotificationCenter::browser(NotifyPolicy::Stack);
    let data = DashboardData::new();
    let sections = SectionRouter::new();
    let menus: RwSignal<Vec<MenuEntry>> = RwSignal::new(Vec::new());

    // ダッシュボード区画の再表示で統計と活動を取り直す
    let load_dashboard = Callback::new(move |_| {
        let Some(token) = session.token() else {
            return;
        };
        spawn_local(async move {
            let api = HttpBackendApi::default();
            load_dashboard_data(data, &api, &token, notifications, lang).await;
        });
    });
    sections.register_loader(Section::Dashboard, load_dashboard);

    // 初回：メニューと統計を取得（認証確定後に一度だけ）
    Effect::new(move |_| {
        if status.get() != AuthStatus::Authenticated {
            return;
        }
        let Some(token) = session.token() else {
            return;
        };
        spawn_local(async move {
            let api = HttpBackendApi::default();
            match api.menu(&token).await {
                Ok(res) => menus.set(resolve_menus(&res.menus)),
                Err(_) => {
                    notifications.push(Severity::Warning, text(lang, Msg::MenuLoadFailed));
                }
            }
        });
        load_dashboard.run(());
    });

    let on_logout = move |_| {
        spawn_local(async move {
            let api = HttpBackendApi::default();
            session::logout(session, &api, &BrowserTokenStore).await;
        });
    };

    let on_lang_change = move |ev: leptos::web_sys::Event| {
        reload_with_lang(&event_target_value(&ev));
    };

    let is_admin = move || {
        session
            .state
            .get()
            .user
            .map(|u| u.role.is_admin())
            .unwrap_or(false)
    };
    let username = move || {
        session
            .state
            .get()
            .user
            .map(|u| u.username)
            .unwrap_or_default()
    };

    let system_status_text = move || match data.stats.get() {
        Some(stats) if stats.system_status == SystemStatus::Online => {
            text(lang, Msg::StatusOnline)
        }
        Some(_) => text(lang, Msg::StatusOffline),
        None => "-",
    };
    let system_status_class = move || match data.stats.get() {
        Some(stats) if stats.system_status == SystemStatus::Online => "stat-value text-success",
        Some(_) => "stat-value text-error",
        None => "stat-value",
    };
    let stat_number = move |f: fn(&kanri_shared::DashboardStats) -> u64| {
        data.stats
            .get()
            .map(|s| f(&s).to_string())
            .unwrap_or_else(|| "-".to_string())
    };

    view! {
        <div class="drawer lg:drawer-open min-h-screen bg-base-200">
            <input id="sidebar" type="checkbox" class="drawer-toggle" />

            <div class="drawer-content flex flex-col">
                // ヘッダー
                <div class="navbar bg-base-100 shadow">
                    <div class="flex-1 gap-2">
                        <label for="sidebar" class="btn btn-ghost btn-square lg:hidden">"☰"</label>
                        <span class="text-xl font-bold">{move || text(lang, Msg::DashboardTitle)}</span>
                    </div>
                    <div class="flex-none gap-2 items-center">
                        <label class="flex items-center gap-1 text-sm">
                            <Globe attr:class="h-4 w-4" />
                            <select class="select select-bordered select-xs" on:change=on_lang_change prop:value=lang.code()>
                                {Lang::ALL
                                    .iter()
                                    .map(|l| view! { <option value=l.code()>{l.native_name()}</option> })
                                    .collect_view()}
                            </select>
                        </label>
                        <span class="badge badge-neutral hidden md:inline-flex">{username}</span>
                        <button on:click=on_logout class="btn btn-outline btn-error btn-sm gap-2">
                            <LogOut attr:class="h-4 w-4" />
                            {move || text(lang, Msg::Logout)}
                        </button>
                    </div>
                </div>

                // 積み上げアラート
                <div class="toast toast-top toast-end z-50">
                    <For
                        each=move || notifications.items().get()
                        key=|n| n.id
                        children=move |n| {
                            let id = n.id;
                            view! {
                                <div role="alert" class=format!("alert {} shadow-lg", n.severity.css_class())>
                                    <span>{n.text.clone()}</span>
                                    <button class="btn btn-ghost btn-xs" on:click=move |_| notifications.dismiss(id)>"✕"</button>
                                </div>
                            }
                        }
                    />
                </div>

                <main class="p-4 md:p-8 space-y-6">
                    // パンくず
                    <div class="breadcrumbs text-sm">
                        <ul>
                            <li>{move || text(lang, Msg::DashboardTitle)}</li>
                            <li class="font-bold">{move || sections.active().get().label(lang)}</li>
                        </ul>
                    </div>

                    // ダッシュボード区画
                    <Show when=move || sections.is_active(Section::Dashboard).get()>
                        <div class="space-y-6">
                            <div class="stats shadow w-full stats-vertical md:stats-horizontal bg-base-100">
                                <div class="stat">
                                    <div class="stat-figure text-primary">
                                        <Users attr:class="h-8 w-8" />
                                    </div>
                                    <div class="stat-title">{move || text(lang, Msg::TotalUsers)}</div>
                                    <div class="stat-value text-primary">{move || stat_number(|s| s.total_users)}</div>
                                </div>
                                <div class="stat">
                                    <div class="stat-figure text-secondary">
                                        <UserCheck attr:class="h-8 w-8" />
                                    </div>
                                    <div class="stat-title">{move || text(lang, Msg::ActiveUsers)}</div>
                                    <div class="stat-value text-secondary">{move || stat_number(|s| s.active_users)}</div>
                                </div>
                                <div class="stat">
                                    <div class="stat-figure text-accent">
                                        <LogIn attr:class="h-8 w-8" />
                                    </div>
                                    <div class="stat-title">{move || text(lang, Msg::TodayLogins)}</div>
                                    <div class="stat-value text-accent">{move || stat_number(|s| s.today_logins)}</div>
                                </div>
                                <div class="stat">
                                    <div class="stat-figure">
                                        <Server attr:class="h-8 w-8" />
                                    </div>
                                    <div class="stat-title">{move || text(lang, Msg::SystemStatusLabel)}</div>
                                    <div class=system_status_class>{system_status_text}</div>
                                </div>
                            </div>

                            <div class="card bg-base-100 shadow-xl">
                                <div class="card-body p-0">
                                    <div class="flex items-center justify-between p-6 pb-2">
                                        <h3 class="card-title">{move || text(lang, Msg::RecentActivity)}</h3>
                                        <button
                                            on:click=move |_| sections.show(Section::Dashboard)
                                            disabled=move || data.loading.get()
                                            class="btn btn-ghost btn-circle"
                                            title=text(lang, Msg::Refresh)
                                        >
                                            <RefreshCw attr:class=move || if data.loading.get() { "h-5 w-5 animate-spin" } else { "h-5 w-5" } />
                                        </button>
                                    </div>

                                    <div class="overflow-x-auto w-full">
                                        <table class="table table-zebra w-full">
                                            <thead>
                                                <tr>
                                                    <th>{move || text(lang, Msg::ColTime)}</th>
                                                    <th>{move || text(lang, Msg::ColUser)}</th>
                                                    <th>{move || text(lang, Msg::ColAction)}</th>
                                                    <th>{move || text(lang, Msg::ColStatus)}</th>
                                                </tr>
                                            </thead>
                                            <tbody>
                                                <Show when=move || data.activities.get().map(|a| a.is_empty()).unwrap_or(true)>
                                                    <tr>
                                                        <td colspan="4" class="text-center py-8 text-base-content/50">
                                                            {move || if data.loading.get() {
                                                                view! { <span class="loading loading-spinner loading-md"></span> }.into_any()
                                                            } else {
                                                                text(lang, Msg::NoData).into_any()
                                                            }}
                                                        </td>
                                                    </tr>
                                                </Show>
                                                <For
                                                    each=move || data.activities.get().unwrap_or_default()
                                                    key=|a| (a.created_at, a.username.clone(), a.action.clone())
                                                    children=move |activity| {
                                                        view! {
                                                            <tr>
                                                                <td class="font-mono text-sm">{format_datetime(&activity.created_at)}</td>
                                                                <td>{activity.username.clone()}</td>
                                                                <td>{activity.action.clone()}</td>
                                                                <td>
                                                                    <span class=activity_badge_class(activity.status)>
                                                                        {text(lang, activity_status_msg(activity.status))}
                                                                    </span>
                                                                </td>
                                                            </tr>
                                                        }
                                                    }
                                                />
                                            </tbody>
                                        </table>
                                    </div>
                                </div>
                            </div>

                            // クイックアクション
                            <div class="card bg-base-100 shadow-xl">
                                <div class="card-body">
                                    <h3 class="card-title">{move || text(lang, Msg::QuickActions)}</h3>
                                    <div class="flex flex-wrap gap-2">
                                        <button class="btn btn-outline btn-sm" on:click=move |_| sections.show(Section::Reports)>
                                            {move || text(lang, Msg::ViewReports)}
                                        </button>
                                        <Show when=is_admin>
                                            <button class="btn btn-outline btn-sm" on:click=move |_| sections.show(Section::Settings)>
                                                {move || text(lang, Msg::SystemSettingsAction)}
                                            </button>
                                        </Show>
                                    </div>
                                </div>
                            </div>
                        </div>
                    </Show>

                    // その他の区画はプレースホルダー
                    {Section::ALL
                        .iter()
                        .filter(|s| **s != Section::Dashboard)
                        .map(|section| {
                            let section = *section;
                            view! {
                                <Show when=move || sections.is_active(section).get()>
                                    <div class="card bg-base-100 shadow-xl">
                                        <div class="card-body items-center text-center py-16">
                                            <h3 class="card-title">{section.label(lang)}</h3>
                                            <p class="text-base-content/50">{move || text(lang, Msg::SectionPlaceholder)}</p>
                                        </div>
                                    </div>
                                </Show>
                            }
                        })
                        .collect_view()}
                </main>
            </div>

            // サイドバー
            <div class="drawer-side">
                <label for="sidebar" class="drawer-overlay"></label>
                <ul class="menu p-4 w-64 min-h-full bg-base-100 text-base-content">
                    <li class="menu-title">{move || text(lang, Msg::DashboardTitle)}</li>
                    <li>
                        <a
                            class=move || if sections.is_active(Section::Dashboard).get() { "active" } else { "" }
                            on:click=move |_| sections.show(Section::Dashboard)
                        >
                            <Gauge attr:class="h-4 w-4" />
                            {Section::Dashboard.label(lang)}
                        </a>
                    </li>
                    <For
                        each=move || menus.get()
                        key=|entry| (entry.name.clone(), entry.path.clone())
                        children=move |entry| {
                            let section = entry.section;
                            let label = entry.name.clone();
                            view! {
                                <li>
                                    <a
                                        class=move || if sections.is_active(section).get() { "active" } else { "" }
                                        on:click=move |_| sections.show(section)
                                    >
                                        {menu_icon(entry.icon)}
                                        {label}
                                    </a>
                                </li>
                            }
                        }
                    />
                </ul>
            </div>
        </div>
    }
}
