//! # Container Registry
//!
//! Wirelight 的注册引擎: 类型标识到单例实例的进程级映射,
//! 带递归依赖注册、循环依赖拒绝与字段注入。
//!
//! ## 核心类型
//!
//! - [`ComponentRegistry`] - 注册表本体, 提供 `register` / `resolve`

pub mod engine;

pub use engine::ComponentRegistry;
