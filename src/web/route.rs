//! 页面路由定义模块 - 领域模型
//!
//! 纯粹的业务逻辑层，不依赖 DOM。守卫规则集中在 [`PageRoute::resolve`]：
//! 未认证用户不能停留在仪表盘，认证状态未恢复完成时不做任何跳转。

use std::fmt::Display;

use crate::session::AuthStatus;

/// 应用页面路由
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageRoute {
    /// 认证页（登录 / 注册，默认路由）
    #[default]
    Login,
    /// 管理仪表盘（需要认证）
    Dashboard,
    /// 页面未找到
    NotFound,
}

impl PageRoute {
    /// 将 URL path 解析为路由
    pub fn from_path(path: &str) -> Self {
        match path {
            "/" | "/login" => Self::Login,
            "/dashboard" => Self::Dashboard,
            _ => Self::NotFound,
        }
    }

    pub fn to_path(&self) -> &'static str {
        match self {
            Self::Login => "/login",
            Self::Dashboard => "/dashboard",
            Self::NotFound => "/404",
        }
    }

    /// 该路由是否需要认证
    pub fn requires_auth(&self) -> bool {
        matches!(self, Self::Dashboard)
    }

    /// 给定认证状态下实际应落地的路由。
    ///
    /// 会话恢复尚未完成（`Pending`）时保持原路由，等待状态明朗后
    /// 由路由服务的监听逻辑再次执行守卫。
    pub fn resolve(self, status: AuthStatus) -> Self {
        if self.requires_auth() && status == AuthStatus::Anonymous {
            return Self::Login;
        }
        self
    }
}

impl Display for PageRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}
