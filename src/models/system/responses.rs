use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/system.ts")]
pub struct SystemSettingsResponse {
    pub system_name: String,       // 系统名称
    pub school_name: String,       // 学校名称
    pub currency: String,          // 货币单位
    pub session_idle_timeout: i64, // 会话无操作超时（分钟）
    pub environment: String,       // 运行环境
    pub log_level: String,         // 日志级别
}
