use serde::{Deserialize, Serialize};

pub mod date;

pub use date::format_datetime;

// =========================================================
// 常量定义 (Constants)
// =========================================================

pub const AUTH_HEADER: &str = "Authorization";
pub const BEARER_PREFIX: &str = "Bearer ";

// =========================================================
// 认证相关模型 (Auth Models)
// =========================================================

/// 用户角色，与后端的角色枚举保持一致。
/// 未来新增角色时前端旧版本仍需能解析，因此保留 `Unknown` 兜底。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    #[default]
    User,
    Sales,
    #[serde(other)]
    Unknown,
}

impl Role {
    pub fn is_admin(self) -> bool {
        self == Role::Admin
    }

    /// 注册表单提交时使用的字符串形式
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::User => "USER",
            Role::Sales => "SALES",
            Role::Unknown => "UNKNOWN",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    pub username: String,
    pub role: Role,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserInfo,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: String,
}

// =========================================================
// 菜单模型 (Menu Models)
// =========================================================

/// 后端返回的菜单项：`name` 为当前语言的显示名，`path` 为稳定路径。
/// 列表顺序即显示顺序。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuDescriptor {
    pub name: String,
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuResponse {
    pub menus: Vec<MenuDescriptor>,
    #[serde(default)]
    pub role: Option<Role>,
}

// =========================================================
// 仪表盘模型 (Dashboard Models)
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SystemStatus {
    Online,
    #[default]
    Offline,
}

/// 仪表盘统计。整体刷新，不做增量更新。
/// 后端可能附带额外统计字段（按角色等），这里只解析前端消费的部分。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardStats {
    pub total_users: u64,
    pub active_users: u64,
    pub today_logins: u64,
    pub system_status: SystemStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivityStatus {
    Success,
    Failure,
    Error,
    #[serde(other)]
    Unknown,
}

/// 审计日志条目。排序由服务端决定（约定为时间倒序）。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityRecord {
    pub created_at: chrono::NaiveDateTime,
    pub username: String,
    pub action: String,
    pub status: ActivityStatus,
}

// =========================================================
// 错误响应 (Error Response)
// =========================================================

/// 后端统一错误体。前端只消费 `message`（存在时原样展示）。
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ErrorResponse {
    pub error_code: Option<String>,
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_parse_camel_case_and_ignore_extras() {
        let json = r#"{
            "totalUsers": 42,
            "activeUsers": 40,
            "inactiveUsers": 2,
            "todayLogins": 7,
            "systemStatus": "online",
            "roleStats": {"ADMIN": 1}
        }"#;
        let stats: DashboardStats = serde_json::from_str(json).unwrap();
        assert_eq!(stats.total_users, 42);
        assert_eq!(stats.active_users, 40);
        assert_eq!(stats.today_logins, 7);
        assert_eq!(stats.system_status, SystemStatus::Online);
    }

    #[test]
    fn stats_missing_fields_default_to_zero() {
        let stats: DashboardStats = serde_json::from_str("{}").unwrap();
        assert_eq!(stats.total_users, 0);
        assert_eq!(stats.system_status, SystemStatus::Offline);
    }

    #[test]
    fn activity_status_unknown_fallback() {
        let json = r#"[{
            "createdAt": "2024-06-01T09:30:00",
            "username": "admin",
            "action": "USER_LOGIN",
            "status": "TIMEOUT"
        }]"#;
        let records: Vec<ActivityRecord> = serde_json::from_str(json).unwrap();
        assert_eq!(records[0].status, ActivityStatus::Unknown);
        assert_eq!(records[0].username, "admin");
    }

    #[test]
    fn role_parse() {
        let user: UserInfo =
            serde_json::from_str(r#"{"username": "sales01", "role": "SALES"}"#).unwrap();
        assert_eq!(user.role, Role::Sales);
        assert!(!user.role.is_admin());

        let future: UserInfo =
            serde_json::from_str(r#"{"username": "x", "role": "AUDITOR"}"#).unwrap();
        assert_eq!(future.role, Role::Unknown);
    }

    #[test]
    fn login_response_parse() {
        let json = r#"{"token": "jwt-abc", "user": {"username": "admin", "role": "ADMIN"}}"#;
        let res: LoginResponse = serde_json::from_str(json).unwrap();
        assert_eq!(res.token, "jwt-abc");
        assert!(res.user.role.is_admin());
    }
}
