//! # Type Source
//!
//! Wirelight 的类型发现层: 启动时构建的类型登记索引,
//! 加上把目录树还原为可装载类型序列的构件装载器。
//!
//! ## 核心类型
//!
//! - [`TypeIndex`] / [`global_type_index`] - 完整限定名到构件描述符的清单
//! - [`TypeDescriptor`] - 可装载类型的只读句柄
//! - [`FileTypeLoader`] - 尽力而为的目录装载器, 返回装载集与跳过清单

pub mod index;
pub mod loader;

pub use index::{global_type_index, TypeDescriptor, TypeIndex};
pub use loader::{
    FileTypeLoader, FileTypeLoaderBuilder, LoadOutcome, SkippedArtifact, ARTIFACT_EXTENSION,
};
