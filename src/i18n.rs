//! 多语言模块
//!
//! 界面文案一律通过机器键（[`Msg`]）查表，不在代码里散落显示文本。
//! 语言的选择顺序：`?lang=` 参数 > 浏览器语言 > 页面默认值。
//! 切换语言走整页跳转，由路由服务负责。

/// 支持的语言
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lang {
    /// 日本語（既定）
    #[default]
    Ja,
    En,
    Zh,
}

impl Lang {
    pub const ALL: [Lang; 3] = [Lang::Ja, Lang::En, Lang::Zh];

    pub fn code(self) -> &'static str {
        match self {
            Lang::Ja => "ja",
            Lang::En => "en",
            Lang::Zh => "zh",
        }
    }

    /// 语言选择框里的自称
    pub fn native_name(self) -> &'static str {
        match self {
            Lang::Ja => "日本語",
            Lang::En => "English",
            Lang::Zh => "中文",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "ja" => Some(Lang::Ja),
            "en" => Some(Lang::En),
            "zh" => Some(Lang::Zh),
            _ => None,
        }
    }

    /// 按浏览器语言标签前缀匹配（`ja-JP` -> Ja），兜底英文
    pub fn from_browser(tag: &str) -> Self {
        if tag.starts_with("ja") {
            Lang::Ja
        } else if tag.starts_with("zh") {
            Lang::Zh
        } else {
            Lang::En
        }
    }
}

/// 决定当前语言。
///
/// `query` 为 `?lang=` 的值，`browser` 为 `navigator.language`；
/// 认证页不做浏览器探测（传 None），直接落到默认日文。
pub fn detect(query: Option<&str>, browser: Option<&str>, fallback: Lang) -> Lang {
    if let Some(code) = query {
        if let Some(lang) = Lang::from_code(code) {
            return lang;
        }
    }
    if let Some(tag) = browser {
        return Lang::from_browser(tag);
    }
    fallback
}

// =========================================================
// 文案键
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Msg {
    // 认证页
    RegisterSuccess,
    RegisterFailed,
    LoginFailed,
    MenuFetchFailed,
    ToggleToLogin,
    ToggleToRegister,
    LoginTitle,
    RegisterTitle,
    Username,
    Password,
    Email,
    RoleLabel,
    LoginButton,
    RegisterButton,
    OpenDashboard,
    // 仪表盘
    MenuLoadFailed,
    StatsLoadFailed,
    ActivityLoadFailed,
    DashboardTitle,
    RecentActivity,
    QuickActions,
    ViewReports,
    SystemSettingsAction,
    Logout,
    Refresh,
    TotalUsers,
    ActiveUsers,
    TodayLogins,
    SystemStatusLabel,
    StatusOnline,
    StatusOffline,
    ColTime,
    ColUser,
    ColAction,
    ColStatus,
    ActSuccess,
    ActFailure,
    ActError,
    ActUnknown,
    NoData,
    SectionPlaceholder,
}

/// 查表取文案
pub fn text(lang: Lang, msg: Msg) -> &'static str {
    use Lang::*;
    use Msg::*;
    match (msg, lang) {
        (RegisterSuccess, Ja) => "登録が完了しました。ログインしてください。",
        (RegisterSuccess, En) => "Registration complete. Please log in.",
        (RegisterSuccess, Zh) => "注册完成，请登录。",

        (RegisterFailed, Ja) => "登録に失敗しました",
        (RegisterFailed, En) => "Registration failed",
        (RegisterFailed, Zh) => "注册失败",

        (LoginFailed, Ja) => "ログインに失敗しました",
        (LoginFailed, En) => "Login failed",
        (LoginFailed, Zh) => "登录失败",

        (MenuFetchFailed, Ja) => "メニューの取得に失敗しました",
        (MenuFetchFailed, En) => "Failed to fetch menu",
        (MenuFetchFailed, Zh) => "获取菜单失败",

        (ToggleToLogin, Ja) => "ログインはこちら",
        (ToggleToLogin, En) => "Log in here",
        (ToggleToLogin, Zh) => "前往登录",

        (ToggleToRegister, Ja) => "新規登録はこちら",
        (ToggleToRegister, En) => "Register here",
        (ToggleToRegister, Zh) => "前往注册",

        (LoginTitle, Ja) => "ログイン",
        (LoginTitle, En) => "Log in",
        (LoginTitle, Zh) => "登录",

        (RegisterTitle, Ja) => "新規登録",
        (RegisterTitle, En) => "Register",
        (RegisterTitle, Zh) => "注册",

        (Username, Ja) => "ユーザー名",
        (Username, En) => "Username",
        (Username, Zh) => "用户名",

        (Password, Ja) => "パスワード",
        (Password, En) => "Password",
        (Password, Zh) => "密码",

        (Email, Ja) => "メールアドレス",
        (Email, En) => "Email",
        (Email, Zh) => "邮箱",

        (RoleLabel, Ja) => "ロール",
        (RoleLabel, En) => "Role",
        (RoleLabel, Zh) => "角色",

        (LoginButton, Ja) => "ログイン",
        (LoginButton, En) => "Log in",
        (LoginButton, Zh) => "登录",

        (RegisterButton, Ja) => "登録",
        (RegisterButton, En) => "Register",
        (RegisterButton, Zh) => "注册",

        (OpenDashboard, Ja) => "ダッシュボードを開く",
        (OpenDashboard, En) => "Open dashboard",
        (OpenDashboard, Zh) => "打开仪表盘",

        (MenuLoadFailed, Ja) => "メニューの読み込みに失敗しました",
        (MenuLoadFailed, En) => "Failed to load menu",
        (MenuLoadFailed, Zh) => "菜单加载失败",

        (StatsLoadFailed, Ja) => "統計データの読み込みに失敗しました",
        (StatsLoadFailed, En) => "Failed to load statistics",
        (StatsLoadFailed, Zh) => "统计数据加载失败",

        (ActivityLoadFailed, Ja) => "アクティビティの読み込みに失敗しました",
        (ActivityLoadFailed, En) => "Failed to load activity",
        (ActivityLoadFailed, Zh) => "活动记录加载失败",

        (DashboardTitle, Ja) => "管理コンソール",
        (DashboardTitle, En) => "Admin Console",
        (DashboardTitle, Zh) => "管理控制台",

        (RecentActivity, Ja) => "最近のアクティビティ",
        (RecentActivity, En) => "Recent activity",
        (RecentActivity, Zh) => "最近活动",

        (QuickActions, Ja) => "クイックアクション",
        (QuickActions, En) => "Quick actions",
        (QuickActions, Zh) => "快捷操作",

        (ViewReports, Ja) => "レポートを見る",
        (ViewReports, En) => "View reports",
        (ViewReports, Zh) => "查看报表",

        (SystemSettingsAction, Ja) => "システム設定",
        (SystemSettingsAction, En) => "System settings",
        (SystemSettingsAction, Zh) => "系统设置",

        (Logout, Ja) => "ログアウト",
        (Logout, En) => "Log out",
        (Logout, Zh) => "退出登录",

        (Refresh, Ja) => "更新",
        (Refresh, En) => "Refresh",
        (Refresh, Zh) => "刷新",

        (TotalUsers, Ja) => "総ユーザー数",
        (TotalUsers, En) => "Total users",
        (TotalUsers, Zh) => "用户总数",

        (ActiveUsers, Ja) => "アクティブユーザー",
        (ActiveUsers, En) => "Active users",
        (ActiveUsers, Zh) => "活跃用户",

        (TodayLogins, Ja) => "本日のログイン",
        (TodayLogins, En) => "Today's logins",
        (TodayLogins, Zh) => "今日登录",

        (SystemStatusLabel, Ja) => "システムステータス",
        (SystemStatusLabel, En) => "System status",
        (SystemStatusLabel, Zh) => "系统状态",

        (StatusOnline, Ja) => "オンライン",
        (StatusOnline, En) => "Online",
        (StatusOnline, Zh) => "在线",

        (StatusOffline, Ja) => "オフライン",
        (StatusOffline, En) => "Offline",
        (StatusOffline, Zh) => "离线",

        (ColTime, Ja) => "日時",
        (ColTime, En) => "Time",
        (ColTime, Zh) => "时间",

        (ColUser, Ja) => "ユーザー",
        (ColUser, En) => "User",
        (ColUser, Zh) => "用户",

        (ColAction, Ja) => "アクション",
        (ColAction, En) => "Action",
        (ColAction, Zh) => "操作",

        (ColStatus, Ja) => "ステータス",
        (ColStatus, En) => "Status",
        (ColStatus, Zh) => "状态",

        (ActSuccess, Ja) => "成功",
        (ActSuccess, En) => "Success",
        (ActSuccess, Zh) => "成功",

        (ActFailure, Ja) => "失敗",
        (ActFailure, En) => "Failure",
        (ActFailure, Zh) => "失败",

        (ActError, Ja) => "エラー",
        (ActError, En) => "Error",
        (ActError, Zh) => "错误",

        (ActUnknown, Ja) => "不明",
        (ActUnknown, En) => "Unknown",
        (ActUnknown, Zh) => "未知",

        (NoData, Ja) => "データがありません",
        (NoData, En) => "No data",
        (NoData, Zh) => "暂无数据",

        (SectionPlaceholder, Ja) => "このセクションは準備中です",
        (SectionPlaceholder, En) => "This section is under construction",
        (SectionPlaceholder, Zh) => "该模块正在建设中",
    }
}

/// 认证页菜单预览的点击提示（占位行为，真正的跳转尚未实现）
pub fn menu_clicked(lang: Lang, name: &str, path: &str) -> String {
    match lang {
        Lang::Ja => format!("{} ({}) がクリックされました", name, path),
        Lang::En => format!("{} ({}) was clicked", name, path),
        Lang::Zh => format!("已点击 {} ({})", name, path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detect_prefers_query_param() {
        assert_eq!(detect(Some("zh"), Some("ja-JP"), Lang::En), Lang::Zh);
    }

    #[test]
    fn detect_falls_back_to_browser_then_default() {
        assert_eq!(detect(None, Some("ja-JP"), Lang::En), Lang::Ja);
        assert_eq!(detect(None, Some("zh-CN"), Lang::En), Lang::Zh);
        assert_eq!(detect(None, Some("fr-FR"), Lang::Ja), Lang::En);
        assert_eq!(detect(None, None, Lang::Ja), Lang::Ja);
    }

    #[test]
    fn detect_ignores_unknown_code() {
        // 未知的 lang 参数按不存在处理
        assert_eq!(detect(Some("de"), None, Lang::Ja), Lang::Ja);
    }

    #[test]
    fn original_japanese_messages_preserved() {
        assert_eq!(
            text(Lang::Ja, Msg::RegisterSuccess),
            "登録が完了しました。ログインしてください。"
        );
        assert_eq!(text(Lang::Ja, Msg::LoginFailed), "ログインに失敗しました");
        assert_eq!(
            text(Lang::Ja, Msg::StatsLoadFailed),
            "統計データの読み込みに失敗しました"
        );
    }

    #[test]
    fn menu_clicked_contains_name_and_path() {
        for lang in Lang::ALL {
            let msg = menu_clicked(lang, "レポート", "/reports");
            assert!(msg.contains("レポート"));
            assert!(msg.contains("/reports"));
        }
    }
}
