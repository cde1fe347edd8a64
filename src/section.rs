//! 仪表盘内容区块定义 - 领域模型
//!
//! 区块是仪表盘里的一个逻辑面板，以稳定键标识。
//! 后端菜单只下发当前语言的显示名，因此名称到区块的解析
//! 是跨三种语言的精确匹配表；未知名称统一落到仪表盘区块。

use crate::i18n::Lang;

/// 仪表盘内容区块（封闭枚举）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Section {
    #[default]
    Dashboard,
    UserManagement,
    Settings,
    Sales,
    Reports,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Section::Dashboard,
        Section::UserManagement,
        Section::Settings,
        Section::Sales,
        Section::Reports,
    ];

    /// 菜单显示名 -> 区块。精确匹配，不做部分匹配；未知名 -> Dashboard。
    pub fn from_menu_name(name: &str) -> Self {
        match name {
            "ユーザー管理" | "User Management" | "用户管理" => Section::UserManagement,
            "システム設定" | "System Settings" | "系统设置" => Section::Settings,
            "売上管理" | "Sales Management" | "销售管理" => Section::Sales,
            "レポート" | "Reports" | "报表" => Section::Reports,
            _ => Section::Dashboard,
        }
    }

    /// 稳定键，用作 DOM id 等机器标识
    pub fn key(self) -> &'static str {
        match self {
            Section::Dashboard => "dashboard",
            Section::UserManagement => "user-management",
            Section::Settings => "settings",
            Section::Sales => "sales",
            Section::Reports => "reports",
        }
    }

    /// 面包屑 / 菜单标签（按机器键查表，不依赖菜单下发的显示名）
    pub fn label(self, lang: Lang) -> &'static str {
        use Lang::*;
        match (self, lang) {
            (Section::Dashboard, Ja) => "ダッシュボード",
            (Section::Dashboard, En) => "Dashboard",
            (Section::Dashboard, Zh) => "仪表盘",

            (Section::UserManagement, Ja) => "ユーザー管理",
            (Section::UserManagement, En) => "User Management",
            (Section::UserManagement, Zh) => "用户管理",

            (Section::Settings, Ja) => "システム設定",
            (Section::Settings, En) => "System Settings",
            (Section::Settings, Zh) => "系统设置",

            (Section::Sales, Ja) => "売上管理",
            (Section::Sales, En) => "Sales Management",
            (Section::Sales, Zh) => "销售管理",

            (Section::Reports, Ja) => "レポート",
            (Section::Reports, En) => "Reports",
            (Section::Reports, Zh) => "报表",
        }
    }
}
