//! 弹窗状态机：关闭或携带载荷打开，替代多个可见性布尔值

/// 弹窗状态
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ModalState<T> {
    #[default]
    Closed,
    Open(T),
}

impl<T> ModalState<T> {
    pub fn open(&mut self, payload: T) {
        *self = ModalState::Open(payload);
    }

    /// 关闭弹窗并取回载荷
    pub fn close(&mut self) -> Option<T> {
        match std::mem::take(self) {
            ModalState::Open(payload) => Some(payload),
            ModalState::Closed => None,
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, ModalState::Open(_))
    }

    pub fn payload(&self) -> Option<&T> {
        match self {
            ModalState::Open(payload) => Some(payload),
            ModalState::Closed => None,
        }
    }

    pub fn payload_mut(&mut self) -> Option<&mut T> {
        match self {
            ModalState::Open(payload) => Some(payload),
            ModalState::Closed => None,
        }
    }
}
