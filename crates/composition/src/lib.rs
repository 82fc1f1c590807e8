//! # Composition
//!
//! Wirelight 的组合层: 把类型发现与注册引擎装配成容器,
//! 并提供进程级的幂等引导入口。
//!
//! ## 核心类型
//!
//! - [`Container`] - 持有注册表的容器句柄
//! - [`BootstrapOptions`] - 发现根目录与类型索引的引导选项
//! - [`boot`] - 按环境变量引导的进程级入口

pub mod bootstrap;

pub use bootstrap::{boot, BootstrapOptions, Container, SEARCH_PATH_VAR};
