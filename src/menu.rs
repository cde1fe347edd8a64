//! 菜单解析模块
//!
//! 把后端下发的菜单描述（name + path）解析为可渲染的条目：
//! 区块键与图标令牌都由这里决定，组件层只管画。
//! 渲染顺序 = 下发顺序；固定的第一项（仪表盘入口）由组件层保留，
//! 不参与解析。

use kanri_shared::MenuDescriptor;

use crate::section::Section;

/// 图标令牌（机器键，组件层映射到具体 SVG）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuIcon {
    Gauge,
    Users,
    Gear,
    TrendingUp,
    FileText,
    /// 未知菜单项的兜底图标
    Circle,
}

impl MenuIcon {
    /// 区块对应的标准图标
    pub fn for_section(section: Section) -> Self {
        match section {
            Section::Dashboard => MenuIcon::Gauge,
            Section::UserManagement => MenuIcon::Users,
            Section::Settings => MenuIcon::Gear,
            Section::Sales => MenuIcon::TrendingUp,
            Section::Reports => MenuIcon::FileText,
        }
    }
}

/// 解析后的菜单条目
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    pub section: Section,
    pub icon: MenuIcon,
    pub name: String,
    pub path: String,
}

/// 单个描述的解析。
///
/// 未知名称区块落到 Dashboard，但图标保持 Circle 兜底，
/// 与已解析条目在视觉上区分开。
pub fn resolve_menu(menu: &MenuDescriptor) -> MenuEntry {
    let section = Section::from_menu_name(&menu.name);
    let icon = if is_known_name(&menu.name) {
        MenuIcon::for_section(section)
    } else {
        MenuIcon::Circle
    };
    MenuEntry {
        section,
        icon,
        name: menu.name.clone(),
        path: menu.path.clone(),
    }
}

fn is_known_name(name: &str) -> bool {
    matches!(
        name,
        "ユーザー管理"
            | "User Management"
            | "用户管理"
            | "システム設定"
            | "System Settings"
            | "系统设置"
            | "売上管理"
            | "Sales Management"
            | "销售管理"
            | "レポート"
            | "Reports"
            | "报表"
    )
}

/// 整表解析：顺序保持，不去重、不排序
pub fn resolve_menus(menus: &[MenuDescriptor]) -> Vec<MenuEntry> {
    menus.iter().map(resolve_menu).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(name: &str, path: &str) -> MenuDescriptor {
        MenuDescriptor {
            name: name.to_string(),
            path: path.to_string(),
        }
    }

    #[test]
    fn known_and_unknown_names() {
        let menus = vec![
            descriptor("User Management", "/admin/users"),
            descriptor("Unknown Item", "/mystery"),
        ];
        let entries = resolve_menus(&menus);
        assert_eq!(entries[0].section, Section::UserManagement);
        assert_eq!(entries[0].icon, MenuIcon::Users);
        assert_eq!(entries[1].section, Section::Dashboard);
        assert_eq!(entries[1].icon, MenuIcon::Circle);
    }

    #[test]
    fn order_preserved_no_dedup() {
        let menus = vec![
            descriptor("レポート", "/reports"),
            descriptor("売上管理", "/sales"),
            descriptor("レポート", "/reports"),
        ];
        let entries = resolve_menus(&menus);
        let sections: Vec<_> = entries.iter().map(|e| e.section).collect();
        assert_eq!(
            sections,
            vec![Section::Reports, Section::Sales, Section::Reports]
        );
        assert_eq!(entries[0].path, "/reports");
    }

    #[test]
    fn icons_follow_sections_for_known_names() {
        let entries = resolve_menus(&[
            descriptor("システム設定", "/admin/settings"),
            descriptor("销售管理", "/sales"),
        ]);
        assert_eq!(entries[0].icon, MenuIcon::Gear);
        assert_eq!(entries[1].icon, MenuIcon::TrendingUp);
    }
}
