//! 时间显示模块
//!
//! 审计日志的 `createdAt` 由后端以 ISO 本地时间下发（无时区）。
//! 这里只负责转换为界面展示格式，不做任何时区换算。

use chrono::NaiveDateTime;

/// 界面展示格式：`2024/06/01 09:30`
const DISPLAY_FORMAT: &str = "%Y/%m/%d %H:%M";

pub fn format_datetime(dt: &NaiveDateTime) -> String {
    dt.format(DISPLAY_FORMAT).to_string()
}
