use leptos::prelude::*;
use leptos::task::spawn_local;

use kanri_shared::RegisterRequest;

use crate::api::HttpBackendApi;
use crate::components::icons::{Globe, LogOut, ShieldCheck};
use crate::i18n::{Lang, Msg, detect, menu_clicked, text};
use crate::menu::{MenuEntry, resolve_menus};
use crate::notify::{NotificationCenter, NotifyPolicy, Severity};
use crate::session::{self, AuthStatus, use_session};
use crate::web::router::{current_lang_param, reload_with_lang, use_router};
use crate::web::{BrowserTokenStore, route::PageRoute};

/// 认证表单的模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormMode {
    #[default]
    Login,
    Register,
}

/// 认证表单状态。Copy 结构体，字段全部是信号。
///
/// 提交在途守卫（`is_submitting`）在这里收口：
/// 提交期间的重复提交一律拒绝，按钮同时置灰。
#[derive(Clone, Copy)]
pub struct AuthFormState {
    pub mode: RwSignal<FormMode>,
    pub username: RwSignal<String>,
    pub password: RwSignal<String>,
    pub email: RwSignal<String>,
    pub role: RwSignal<String>,
    pub is_submitting: RwSignal<bool>,
}

impl AuthFormState {
    pub fn new() -> Self {
        Self {
            mode: RwSignal::new(FormMode::default()),
            username: RwSignal::new(String::new()),
            password: RwSignal::new(String::new()),
            email: RwSignal::new(String::new()),
            role: RwSignal::new("USER".to_string()),
            is_submitting: RwSignal::new(false),
        }
    }

    /// 登录/注册互切。密码类字段清空，用户名保留。
    pub fn toggle(&self) {
        self.mode.update(|m| {
            *m = match m {
                FormMode::Login => FormMode::Register,
                FormMode::Register => FormMode::Login,
            }
        });
        self.password.set(String::new());
    }

    /// 在途守卫：已在提交中则拒绝，否则占位并放行
    pub fn try_begin_submit(&self) -> bool {
        if self.is_submitting.get_untracked() {
            return false;
        }
        self.is_submitting.set(true);
        true
    }

    pub fn end_submit(&self) {
        self.is_submitting.set(false);
    }

    /// 注册成功后的表单回填：切回登录模式，
    /// 用户名留在登录框里，敏感字段清空。
    pub fn apply_registration_success(&self) {
        self.mode.set(FormMode::Login);
        self.password.set(String::new());
        self.email.set(String::new());
        self.role.set("USER".to_string());
    }

    pub fn register_request(&self) -> RegisterRequest {
        RegisterRequest {
            username: self.username.get_untracked(),
            email: self.email.get_untracked(),
            password: self.password.get_untracked(),
            role: self.role.get_untracked(),
        }
    }
}

impl Default for AuthFormState {
    fn default() -> Self {
        Self::new()
    }
}

/// 认证页：登录 / 注册切换 + 登录後のメニュープレビュー
#[component]
pub fn AuthPage() -> impl IntoView {
    let session = use_session();
    let router = use_router();
    let status = session.auth_status_signal();

    // 認証ページは元の形のまま既定日本語（ブラウザ言語は見ない）
    let lang = detect(current_lang_param().as_deref(), None, Lang::Ja);

    // 単一バナー（新しいメッセージが古いものを置き換える）
    let notifications = NotificationCenter::browser(NotifyPolicy::Replace);
    let form = AuthFormState::new();

    let menus: RwSignal<Vec<MenuEntry>> = RwSignal::new(Vec::new());

    // ログイン直後にメニュープレビューを取得
    Effect::new(move |_| {
        if status.get() != AuthStatus::Authenticated {
            menus.set(Vec::new());
            return;
        }
        let Some(token) = session.token() else {
            return;
        };
        spawn_local(async move {
            let api = HttpBackendApi::default();
            match crate::api::BackendApi::menu(&api, &token).await {
                Ok(res) => menus.set(resolve_menus(&res.menus)),
                Err(_) => {
                    notifications.push(Severity::Danger, text(lang, Msg::MenuFetchFailed));
                }
            }
        });
    });

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        if !form.try_begin_submit() {
            return;
        }
        notifications.clear();

        spawn_local(async move {
            let api = HttpBackendApi::default();
            let store = BrowserTokenStore;
            match form.mode.get_untracked() {
                FormMode::Login => {
                    let result = session::login(
                        session,
                        &api,
                        &store,
                        form.username.get_untracked(),
                        form.password.get_untracked(),
                    )
                    .await;
                    if let Err(e) = result {
                        let msg = e
                            .server_message()
                            .map(str::to_string)
                            .unwrap_or_else(|| text(lang, Msg::LoginFailed).to_string());
                        notifications.push(Severity::Danger, msg);
                    }
                }
                FormMode::Register => {
                    match session::register(&api, form.register_request()).await {
                        Ok(()) => {
                            form.apply_registration_success();
                            notifications.push(Severity::Success, text(lang, Msg::RegisterSuccess));
                        }
                        Err(e) => {
                            let msg = e
                                .server_message()
                                .map(str::to_string)
                                .unwrap_or_else(|| text(lang, Msg::RegisterFailed).to_string());
                            notifications.push(Severity::Danger, msg);
                        }
                    }
                }
            }
            form.end_submit();
        });
    };

    let on_toggle = move |_| {
        form.toggle();
        notifications.clear();
    };

    let on_lang_change = move |ev: leptos::web_sys::Event| {
        reload_with_lang(&event_target_value(&ev));
    };

    let on_logout = move |_| {
        spawn_local(async move {
            let api = HttpBackendApi::default();
            session::logout(session, &api, &BrowserTokenStore).await;
        });
    };

    let open_dashboard = move |_| {
        router.navigate(PageRoute::Dashboard.to_path());
    };

    let is_register = move || form.mode.get() == FormMode::Register;
    let title = move || {
        if is_register() {
            text(lang, Msg::RegisterTitle)
        } else {
            text(lang, Msg::LoginTitle)
        }
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <div class="flex flex-col items-center gap-2">
                        <div class="p-3 bg-primary/10 rounded-2xl text-primary">
                            <ShieldCheck attr:class="h-8 w-8" />
                        </div>
                        <h1 class="text-3xl font-bold">{move || text(lang, Msg::DashboardTitle)}</h1>
                        <label class="flex items-center gap-2 text-sm text-base-content/70">
                            <Globe attr:class="h-4 w-4" />
                            <select class="select select-bordered select-xs" on:change=on_lang_change prop:value=lang.code()>
                                {Lang::ALL
                                    .iter()
                                    .map(|l| view! { <option value=l.code()>{l.native_name()}</option> })
                                    .collect_view()}
                            </select>
                        </label>
                    </div>
                </div>

                // 単一バナー
                <For
                    each=move || notifications.items().get()
                    key=|n| n.id
                    children=move |n| {
                        let id = n.id;
                        view! {
                            <div role="alert" class=format!("alert {} text-sm py-2 w-full", n.severity.css_class())>
                                <span>{n.text.clone()}</span>
                                <button class="btn btn-ghost btn-xs" on:click=move |_| notifications.dismiss(id)>"✕"</button>
                            </div>
                        }
                    }
                />

                <Show
                    when=move || status.get() == AuthStatus::Authenticated
                    fallback=move || {
                        view! {
                            <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                                <form class="card-body" on:submit=on_submit>
                                    <h2 class="card-title">{title}</h2>

                                    <div class="form-control">
                                        <label class="label" for="username">
                                            <span class="label-text">{move || text(lang, Msg::Username)}</span>
                                        </label>
                                        <input
                                            id="username"
                                            type="text"
                                            on:input=move |ev| form.username.set(event_target_value(&ev))
                                            prop:value=form.username
                                            class="input input-bordered"
                                            required
                                        />
                                    </div>

                                    <Show when=is_register>
                                        <div class="form-control">
                                            <label class="label" for="email">
                                                <span class="label-text">{move || text(lang, Msg::Email)}</span>
                                            </label>
                                            <input
                                                id="email"
                                                type="email"
                                                on:input=move |ev| form.email.set(event_target_value(&ev))
                                                prop:value=form.email
                                                class="input input-bordered"
                                                required
                                            />
                                        </div>
                                    </Show>

                                    <div class="form-control">
                                        <label class="label" for="password">
                                            <span class="label-text">{move || text(lang, Msg::Password)}</span>
                                        </label>
                                        <input
                                            id="password"
                                            type="password"
                                            on:input=move |ev| form.password.set(event_target_value(&ev))
                                            prop:value=form.password
                                            class="input input-bordered"
                                            required
                                        />
                                    </div>

                                    <Show when=is_register>
                                        <div class="form-control">
                                            <label class="label" for="role">
                                                <span class="label-text">{move || text(lang, Msg::RoleLabel)}</span>
                                            </label>
                                            <select
                                                id="role"
                                                class="select select-bordered"
                                                on:change=move |ev| form.role.set(event_target_value(&ev))
                                                prop:value=form.role
                                            >
                                                <option value="USER">"USER"</option>
                                                <option value="ADMIN">"ADMIN"</option>
                                                <option value="SALES">"SALES"</option>
                                            </select>
                                        </div>
                                    </Show>

                                    <div class="form-control mt-6">
                                        <button class="btn btn-primary" disabled=move || form.is_submitting.get()>
                                            {move || if form.is_submitting.get() {
                                                view! { <span class="loading loading-spinner"></span> }.into_any()
                                            } else if is_register() {
                                                text(lang, Msg::RegisterButton).into_any()
                                            } else {
                                                text(lang, Msg::LoginButton).into_any()
                                            }}
                                        </button>
                                    </div>

                                    <div class="text-center mt-2">
                                        <a class="link link-primary text-sm" on:click=on_toggle>
                                            {move || if is_register() {
                                                text(lang, Msg::ToggleToLogin)
                                            } else {
                                                text(lang, Msg::ToggleToRegister)
                                            }}
                                        </a>
                                    </div>
                                </form>
                            </div>
                        }
                    }
                >
                    // ログイン済み：メニュープレビュー
                    <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                        <div class="card-body">
                            <ul class="menu bg-base-100 w-full">
                                <li>
                                    <a class="font-bold" on:click=open_dashboard>
                                        {move || text(lang, Msg::OpenDashboard)}
                                    </a>
                                </li>
                                <For
                                    each=move || menus.get()
                                    key=|entry| (entry.name.clone(), entry.path.clone())
                                    children=move |entry| {
                                        let label = entry.name.clone();
                                        let clicked = menu_clicked(lang, &entry.name, &entry.path);
                                        view! {
                                            <li>
                                                <a on:click=move |_| {
                                                    notifications.push(Severity::Info, clicked.clone());
                                                }>
                                                    {crate::components::icons::menu_icon(entry.icon)}
                                                    {label}
                                                </a>
                                            </li>
                                        }
                                    }
                                />
                            </ul>
                            <div class="card-actions justify-end mt-4">
                                <button class="btn btn-outline btn-error btn-sm gap-2" on:click=on_logout>
                                    <LogOut attr:class="h-4 w-4" />
                                    {move || text(lang, Msg::Logout)}
                                </button>
                            </div>
                        </div>
                    </div>
                </Show>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registration_success_prefills_login_form() {
        let form = AuthFormState::new();
        form.mode.set(FormMode::Register);
        form.username.set("newuser".to_string());
        form.email.set("new@example.com".to_string());
        form.password.set("secret".to_string());
        form.role.set("SALES".to_string());

        form.apply_registration_success();

        assert_eq!(form.mode.get_untracked(), FormMode::Login);
        assert_eq!(form.username.get_untracked(), "newuser");
        assert!(form.password.get_untracked().is_empty());
        assert!(form.email.get_untracked().is_empty());
        assert_eq!(form.role.get_untracked(), "USER");
    }

    #[test]
    fn toggle_switches_mode_and_clears_password() {
        let form = AuthFormState::new();
        form.username.set("admin".to_string());
        form.password.set("secret".to_string());

        form.toggle();
        assert_eq!(form.mode.get_untracked(), FormMode::Register);
        assert!(form.password.get_untracked().is_empty());
        assert_eq!(form.username.get_untracked(), "admin");

        form.toggle();
        assert_eq!(form.mode.get_untracked(), FormMode::Login);
    }

    #[test]
    fn submit_guard_rejects_reentry() {
        let form = AuthFormState::new();
        assert!(form.try_begin_submit());
        // 在途中は二重送信を拒否
        assert!(!form.try_begin_submit());
        assert!(!form.try_begin_submit());

        form.end_submit();
        assert!(form.try_begin_submit());
    }

    #[test]
    fn register_request_snapshots_fields() {
        let form = AuthFormState::new();
        form.username.set("alice".to_string());
        form.email.set("alice@example.com".to_string());
        form.password.set("pw".to_string());
        form.role.set("ADMIN".to_string());

        let req = form.register_request();
        assert_eq!(req.username, "alice");
        assert_eq!(req.email, "alice@example.com");
        assert_eq!(req.password, "pw");
        assert_eq!(req.role, "ADMIN");
    }
}
