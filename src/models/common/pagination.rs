use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::errors::{PortalError, Result};

// 分页状态：页码从 1 开始，total 由服务端返回
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/pagination.ts")]
pub struct HistoryPaging {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
}

// 分页信息（供界面渲染）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/pagination.ts")]
pub struct PaginationInfo {
    pub page: i64,
    pub page_size: i64,
    pub total: i64,
    pub total_pages: i64,
    pub has_prev: bool,
    pub has_next: bool,
}

impl HistoryPaging {
    pub fn new(limit: i64) -> Self {
        Self {
            page: 1,
            limit: limit.max(1),
            total: 0,
        }
    }

    /// 发送给服务端的偏移量：(page - 1) * limit
    pub fn offset(&self) -> i64 {
        (self.page - 1).max(0) * self.limit
    }

    /// 总页数：ceil(total / limit)
    pub fn total_pages(&self) -> i64 {
        if self.total <= 0 || self.limit <= 0 {
            return 0;
        }
        (self.total - 1) / self.limit + 1
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }

    /// 切换每页条数，只接受配置中的选项，并回到第一页
    pub fn set_limit(&mut self, limit: i64, options: &[i64]) -> Result<()> {
        if !options.contains(&limit) {
            return Err(PortalError::validation(format!(
                "每页条数必须为 {options:?} 之一，收到 {limit}"
            )));
        }
        self.limit = limit;
        self.page = 1;
        Ok(())
    }

    /// 跳转到指定页，越界时拒绝
    pub fn go_to(&mut self, page: i64) -> Result<()> {
        let last = self.total_pages().max(1);
        if page < 1 || page > last {
            return Err(PortalError::validation(format!(
                "页码 {page} 超出范围 1..={last}"
            )));
        }
        self.page = page;
        Ok(())
    }

    pub fn info(&self) -> PaginationInfo {
        PaginationInfo {
            page: self.page,
            page_size: self.limit,
            total: self.total,
            total_pages: self.total_pages(),
            has_prev: self.has_prev(),
            has_next: self.has_next(),
        }
    }
}

impl Default for HistoryPaging {
    fn default() -> Self {
        Self::new(20)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_and_total_pages() {
        let paging = HistoryPaging {
            page: 2,
            limit: 20,
            total: 45,
        };
        assert_eq!(paging.offset(), 20);
        assert_eq!(paging.total_pages(), 3);
        assert!(paging.has_prev());
        assert!(paging.has_next());
    }

    #[test]
    fn test_bounds_disable_navigation() {
        let first = HistoryPaging {
            page: 1,
            limit: 10,
            total: 30,
        };
        assert!(!first.has_prev());
        assert!(first.has_next());

        let last = HistoryPaging {
            page: 3,
            limit: 10,
            total: 30,
        };
        assert!(last.has_prev());
        assert!(!last.has_next());
    }

    #[test]
    fn test_huge_total_does_not_overflow() {
        let paging = HistoryPaging {
            page: 1,
            limit: 100,
            total: i64::MAX,
        };
        assert_eq!(paging.total_pages(), i64::MAX / 100 + 1);
        assert!(paging.has_next());
    }

    #[test]
    fn test_empty_total() {
        let paging = HistoryPaging::new(50);
        assert_eq!(paging.total_pages(), 0);
        assert_eq!(paging.offset(), 0);
        assert!(!paging.has_next());
        assert!(!paging.has_prev());
    }

    #[test]
    fn test_set_limit_resets_page() {
        let mut paging = HistoryPaging {
            page: 4,
            limit: 10,
            total: 100,
        };
        paging.set_limit(50, &[10, 20, 50, 100]).unwrap();
        assert_eq!(paging.page, 1);
        assert_eq!(paging.limit, 50);
        assert!(paging.set_limit(30, &[10, 20, 50, 100]).is_err());
        assert_eq!(paging.limit, 50);
    }

    #[test]
    fn test_go_to_rejects_out_of_range() {
        let mut paging = HistoryPaging {
            page: 1,
            limit: 20,
            total: 45,
        };
        assert!(paging.go_to(3).is_ok());
        assert!(paging.go_to(4).is_err());
        assert!(paging.go_to(0).is_err());
        assert_eq!(paging.page, 3);
    }
}
