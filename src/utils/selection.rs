//! 选择作用域
//!
//! 每次切换选择（日期/课程/作业）都会推进代数；请求发出时携带票据，
//! 响应返回时票据已过期则丢弃结果。

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::errors::{PortalError, Result};

#[derive(Debug, Clone, Default)]
pub struct SelectionScope {
    generation: Arc<AtomicU64>,
}

#[derive(Debug, Clone)]
pub struct SelectionTicket {
    generation: Arc<AtomicU64>,
    issued: u64,
}

impl SelectionScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// 新的选择：之前发出的票据全部失效
    pub fn advance(&self) -> SelectionTicket {
        let issued = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        SelectionTicket {
            generation: self.generation.clone(),
            issued,
        }
    }

    /// 当前选择下的票据（同一选择的刷新）
    pub fn current(&self) -> SelectionTicket {
        SelectionTicket {
            generation: self.generation.clone(),
            issued: self.generation.load(Ordering::Acquire),
        }
    }
}

impl SelectionTicket {
    pub fn is_current(&self) -> bool {
        self.generation.load(Ordering::Acquire) == self.issued
    }

    /// 过期时返回 StaleResponse 错误
    pub fn ensure_current(&self, what: &str) -> Result<()> {
        if self.is_current() {
            Ok(())
        } else {
            tracing::debug!(what, issued = self.issued, "Discarding stale response");
            Err(PortalError::stale_response(format!(
                "{what} 的响应已过期，选择已变更"
            )))
        }
    }
}
