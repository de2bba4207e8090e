use serde::{Deserialize, Serialize};

/// 应用配置结构体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub backend: BackendConfig,
    pub files: FilesConfig,
    pub attendance: AttendanceConfig,
}

/// 应用设置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    pub system_name: String,
    pub environment: String,
    pub log_level: String,
}

/// 后端 REST 服务配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    pub base_url: String,   // 后端根地址，如 http://localhost:5000
    pub api_prefix: String, // 接口前缀，如 /api
    pub user_agent: String,
    pub timeouts: TimeoutConfig,
}

/// 超时配置（毫秒）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeoutConfig {
    pub connect_ms: u64,
    pub request_ms: u64,
}

/// 文件查看/下载端点配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilesConfig {
    pub view_path: String,
    pub download_path: String,
}

/// 考勤历史分页配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceConfig {
    pub default_page_size: i64,
    pub page_size_options: Vec<i64>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            api_prefix: "/api".to_string(),
            user_agent: format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
            timeouts: TimeoutConfig {
                connect_ms: 5_000,
                request_ms: 30_000,
            },
        }
    }
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            view_path: "/files/view".to_string(),
            download_path: "/files/download".to_string(),
        }
    }
}

impl Default for AttendanceConfig {
    fn default() -> Self {
        Self {
            default_page_size: 20,
            page_size_options: vec![10, 20, 50, 100],
        }
    }
}
