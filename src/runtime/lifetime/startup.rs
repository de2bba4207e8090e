use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::client::{LmsBackend, create_backend};
use crate::config::AppConfig;
use crate::errors::{PortalError, Result};
use crate::models::users::entities::UserRole;
use crate::session::{Session, SessionContext};

pub const USER_ID_ENV: &str = "PORTAL_USER_ID";
pub const USER_ROLE_ENV: &str = "PORTAL_USER_ROLE";
pub const USER_NAME_ENV: &str = "PORTAL_USER_NAME";

pub struct StartupContext {
    pub backend: Arc<dyn LmsBackend>,
    pub session: SessionContext,
}

/// 从原始值恢复会话；两个值都缺失时视为未登录
pub fn session_from_values(
    user_id: Option<&str>,
    role: Option<&str>,
    display_name: Option<&str>,
) -> Result<Option<Session>> {
    let (user_id, role) = match (user_id, role) {
        (None, None) => return Ok(None),
        (Some(id), Some(role)) => (id, role),
        _ => {
            return Err(PortalError::configuration(format!(
                "{USER_ID_ENV} 与 {USER_ROLE_ENV} 必须同时设置"
            )));
        }
    };

    let user_id = user_id.trim().parse::<i64>().map_err(|e| {
        PortalError::configuration(format!("{USER_ID_ENV} 不是有效的用户 ID: {e}"))
    })?;
    let role = role
        .trim()
        .parse::<UserRole>()
        .map_err(PortalError::configuration)?;

    let mut session = Session::new(user_id, role);
    if let Some(name) = display_name.filter(|n| !n.trim().is_empty()) {
        session = session.with_display_name(name.trim());
    }
    Ok(Some(session))
}

fn restore_session(session: &SessionContext) -> Result<()> {
    let user_id = std::env::var(USER_ID_ENV).ok();
    let role = std::env::var(USER_ROLE_ENV).ok();
    let name = std::env::var(USER_NAME_ENV).ok();

    match session_from_values(user_id.as_deref(), role.as_deref(), name.as_deref())? {
        Some(restored) => session.login(restored),
        None => warn!("No session configured, starting logged out"),
    }
    Ok(())
}

/// 准备门户启动的上下文
/// 包括后端客户端与会话
pub async fn prepare_portal_startup(config: &AppConfig) -> Result<StartupContext> {
    debug!(api_root = %config.api_root(), "Creating backend client");
    let backend = create_backend(&config.backend, &config.files).await?;
    info!("Backend client initialized");

    let session = SessionContext::new();
    restore_session(&session)?;

    Ok(StartupContext { backend, session })
}
