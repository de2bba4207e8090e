//! 会话上下文
//!
//! 登录时设置、登出时清除，显式传给每个服务，不依赖任何全局存储。

use serde::{Deserialize, Serialize};
use std::sync::{Arc, RwLock};
use tracing::{debug, info};

use crate::errors::{PortalError, Result};
use crate::models::users::entities::UserRole;

/// 当前登录用户
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: i64,
    pub role: UserRole,
    pub display_name: Option<String>,
}

impl Session {
    pub fn new(user_id: i64, role: UserRole) -> Self {
        Self {
            user_id,
            role,
            display_name: None,
        }
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// 要求讲师或管理员身份
    pub fn require_staff(&self) -> Result<()> {
        if self.role.is_staff() {
            Ok(())
        } else {
            Err(PortalError::session(format!(
                "角色 {} 无权执行该操作",
                self.role
            )))
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    inner: Arc<RwLock<Option<Session>>>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn login(&self, session: Session) {
        info!(user_id = session.user_id, role = %session.role, "Session started");
        let mut slot = self.inner.write().unwrap_or_else(|e| e.into_inner());
        *slot = Some(session);
    }

    pub fn logout(&self) {
        let mut slot = self.inner.write().unwrap_or_else(|e| e.into_inner());
        if let Some(previous) = slot.take() {
            info!(user_id = previous.user_id, "Session cleared");
        } else {
            debug!("Logout requested without an active session");
        }
    }

    pub fn current(&self) -> Result<Session> {
        self.inner
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
            .ok_or_else(|| PortalError::session("未登录"))
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner
            .read()
            .map(|slot| slot.is_some())
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifecycle() {
        let ctx = SessionContext::new();
        assert!(!ctx.is_authenticated());
        assert_eq!(ctx.current().unwrap_err().code(), "E007");

        ctx.login(Session::new(7, UserRole::Instructor).with_display_name("Ms. Wu"));
        assert!(ctx.is_authenticated());
        let session = ctx.current().unwrap();
        assert_eq!(session.user_id, 7);
        assert_eq!(session.display_name.as_deref(), Some("Ms. Wu"));

        ctx.logout();
        assert!(ctx.current().is_err());
    }

    #[test]
    fn test_clones_share_the_same_session() {
        let ctx = SessionContext::new();
        let view = ctx.clone();
        ctx.login(Session::new(1, UserRole::Student));
        assert_eq!(view.current().unwrap().user_id, 1);
    }

    #[test]
    fn test_require_staff() {
        assert!(Session::new(1, UserRole::Instructor).require_staff().is_ok());
        assert!(Session::new(1, UserRole::Admin).require_staff().is_ok());
        assert!(Session::new(1, UserRole::Student).require_staff().is_err());
    }
}
