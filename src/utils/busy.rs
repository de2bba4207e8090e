//! 加载/进行中标记
//!
//! 标记由守卫对象持有，守卫释放时自动复位，任何退出路径都不会让界面卡在加载状态。

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug, Clone, Default)]
pub struct BusyFlag {
    inner: Arc<AtomicBool>,
}

/// 守卫：drop 时清除标记
#[derive(Debug)]
pub struct BusyGuard {
    inner: Arc<AtomicBool>,
}

impl BusyFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_busy(&self) -> bool {
        self.inner.load(Ordering::Acquire)
    }

    /// 尝试进入；已在进行中时返回 `None`，用于阻止同一动作的重复提交
    pub fn try_begin(&self) -> Option<BusyGuard> {
        self.inner
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| BusyGuard {
                inner: self.inner.clone(),
            })
    }

    /// 无条件进入（加载指示，不互斥）
    pub fn begin(&self) -> BusyGuard {
        self.inner.store(true, Ordering::Release);
        BusyGuard {
            inner: self.inner.clone(),
        }
    }
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.inner.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_begin_is_exclusive() {
        let flag = BusyFlag::new();
        let guard = flag.try_begin().expect("first begin succeeds");
        assert!(flag.is_busy());
        assert!(flag.try_begin().is_none());
        drop(guard);
        assert!(!flag.is_busy());
        assert!(flag.try_begin().is_some());
    }

    #[test]
    fn test_guard_resets_on_error_path() {
        fn failing(flag: &BusyFlag) -> Result<(), String> {
            let _guard = flag.begin();
            Err("boom".to_string())
        }
        let flag = BusyFlag::new();
        assert!(failing(&flag).is_err());
        assert!(!flag.is_busy());
    }

    #[test]
    fn test_clones_share_state() {
        let flag = BusyFlag::new();
        let view = flag.clone();
        let _guard = flag.begin();
        assert!(view.is_busy());
    }
}
