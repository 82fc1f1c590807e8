//! # Container Common
//!
//! Wirelight 依赖注入容器的公共层, 定义组件能力接口与声明式元数据。
//!
//! ## 核心类型
//!
//! - [`Component`] - 组件基础 trait
//! - [`Injectable`] - 提供组件描述符的能力 trait
//! - [`Dep`] - 注入字段单元
//! - [`ComponentDescriptor`] / [`InjectionSite`] - 声明式注册清单
//! - 错误分类: [`ConfigurationError`]、[`TypeSourceError`]、
//!   [`RegistrationError`]、[`SkipReason`] 与统一的 [`ContainerError`]

pub mod component;
pub mod errors;
pub mod metadata;

pub use component::*;
pub use errors::*;
pub use metadata::*;
