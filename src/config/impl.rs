use config::{Config, ConfigError, Environment, File};
use std::sync::OnceLock;

use super::AppConfig;

static APP_CONFIG: OnceLock<AppConfig> = OnceLock::new();

impl AppConfig {
    /// 加载配置
    pub fn load() -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            // 内置默认值，保证无配置文件时也能启动
            .set_default("app.system_name", "LMS Portal")?
            .set_default("app.environment", "development")?
            .set_default("app.log_level", "info")?
            .set_default("backend.base_url", "http://localhost:5000")?
            .set_default("backend.api_prefix", "/api")?
            .set_default(
                "backend.user_agent",
                format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
            )?
            .set_default("backend.timeouts.connect_ms", 5_000)?
            .set_default("backend.timeouts.request_ms", 30_000)?
            .set_default("files.view_path", "/files/view")?
            .set_default("files.download_path", "/files/download")?
            .set_default("attendance.default_page_size", 20)?
            .set_default("attendance.page_size_options", vec![10, 20, 50, 100])?
            // 首先加载默认配置文件
            .add_source(File::with_name("config").required(false))
            // 然后根据环境加载特定配置文件
            .add_source(
                File::with_name(&format!(
                    "config.{}",
                    std::env::var("APP_ENV").unwrap_or_else(|_| "development".into())
                ))
                .required(false),
            )
            // 最后加载环境变量覆盖
            .add_source(
                Environment::with_prefix("LMS")
                    .separator("_")
                    .try_parsing(true),
            );

        // 支持从环境变量加载
        builder = builder
            .set_override_option("app.environment", std::env::var("APP_ENV").ok())?
            .set_override_option("app.log_level", std::env::var("RUST_LOG").ok())?
            .set_override_option("backend.base_url", std::env::var("API_BASE_URL").ok())?;

        let config = builder.build()?;
        let app_config: AppConfig = config.try_deserialize()?;
        app_config.validate()?;

        Ok(app_config)
    }

    /// 校验配置的一致性
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.attendance.page_size_options.is_empty() {
            return Err(ConfigError::Message(
                "attendance.page_size_options must not be empty".to_string(),
            ));
        }
        if self.attendance.page_size_options.iter().any(|s| *s <= 0) {
            return Err(ConfigError::Message(
                "attendance.page_size_options must be positive".to_string(),
            ));
        }
        if !self
            .attendance
            .page_size_options
            .contains(&self.attendance.default_page_size)
        {
            return Err(ConfigError::Message(format!(
                "attendance.default_page_size {} is not one of {:?}",
                self.attendance.default_page_size, self.attendance.page_size_options
            )));
        }
        reqwest::Url::parse(&self.backend.base_url).map_err(|e| {
            ConfigError::Message(format!(
                "backend.base_url '{}' is invalid: {e}",
                self.backend.base_url
            ))
        })?;
        Ok(())
    }

    /// 获取全局配置实例
    pub fn get() -> &'static AppConfig {
        APP_CONFIG.get_or_init(|| {
            Self::load().unwrap_or_else(|e| {
                eprintln!("Failed to load configuration: {e}");
                std::process::exit(1);
            })
        })
    }

    /// 初始化配置 (在应用启动时调用)
    pub fn init() -> Result<(), ConfigError> {
        let config = Self::load()?;
        APP_CONFIG
            .set(config)
            .map_err(|_| ConfigError::Message("Configuration already initialized".to_string()))?;
        Ok(())
    }

    /// 检查是否为生产环境
    pub fn is_production(&self) -> bool {
        self.app.environment == "production"
    }

    /// 检查是否为开发环境
    pub fn is_development(&self) -> bool {
        self.app.environment == "development"
    }

    /// 获取接口根地址（base_url + api_prefix）
    pub fn api_root(&self) -> String {
        format!(
            "{}{}",
            self.backend.base_url.trim_end_matches('/'),
            self.backend.api_prefix
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AppSettings, AttendanceConfig, BackendConfig, FilesConfig};

    fn sample() -> AppConfig {
        AppConfig {
            app: AppSettings {
                system_name: "LMS Portal".to_string(),
                environment: "development".to_string(),
                log_level: "debug".to_string(),
            },
            backend: BackendConfig::default(),
            files: FilesConfig::default(),
            attendance: AttendanceConfig::default(),
        }
    }

    #[test]
    fn test_validate_default_sample() {
        assert!(sample().validate().is_ok());
        assert!(sample().is_development());
        assert!(!sample().is_production());
    }

    #[test]
    fn test_validate_rejects_default_page_size_outside_options() {
        let mut config = sample();
        config.attendance.default_page_size = 25;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_base_url() {
        let mut config = sample();
        config.backend.base_url = "not a url".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_api_root_joins_prefix() {
        let mut config = sample();
        config.backend.base_url = "http://lms.local/".to_string();
        assert_eq!(config.api_root(), "http://lms.local/api");
    }
}
