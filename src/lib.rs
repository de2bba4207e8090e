//! LMS Portal - 学习管理平台前端视图状态核心
//!
//! 与界面框架无关：每个页面的状态、派生值与动作都在这里实现，
//! 渲染层只读取状态并转发用户操作。
//!
//! # 架构
//! - `client`: 后端 REST 客户端（reqwest）
//! - `config`: 配置管理
//! - `errors`: 统一错误处理
//! - `models`: 规范化的数据模型
//! - `runtime`: 运行时生命周期管理
//! - `services`: 页面视图状态服务
//! - `session`: 会话上下文
//! - `utils`: 工具函数

pub mod client;
pub mod config;
pub mod errors;
pub mod models;
pub mod runtime;
pub mod services;
pub mod session;
pub mod utils;
