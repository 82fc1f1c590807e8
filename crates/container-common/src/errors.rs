//! 错误类型定义

use std::path::PathBuf;
use thiserror::Error;

/// 配置错误类型
///
/// 容器唯一的配置输入是组件发现根目录的搜索路径，
/// 因此配置错误只与发现根目录的定位有关。
#[derive(Error, Debug)]
pub enum ConfigurationError {
    #[error("没有可用的发现根目录: 候选路径 {searched:?} 中不存在目录")]
    NoValidRoot { searched: Vec<PathBuf> },

    #[error("搜索路径环境变量 {variable} 未设置")]
    MissingSearchPath { variable: String },
}

/// 类型源错误类型
#[derive(Error, Debug)]
pub enum TypeSourceError {
    #[error("目录遍历失败: {root:?}, 原因: {source}")]
    Walk {
        root: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("配置错误: {0}")]
    Configuration(#[from] ConfigurationError),
}

/// 单个类型构件被跳过的原因
///
/// 发现过程是尽力而为的: 无法装载的构件被记录并跳过, 不会中断整个遍历。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    #[error("类型名未登记: {fqn}")]
    UnknownType { fqn: String },

    #[error("不是类型构件文件 (扩展名应为 .{expected})")]
    UnsupportedExtension { expected: &'static str },

    #[error("构件路径不是合法的 UTF-8")]
    NonUtf8Path,

    #[error("构件不在发现根目录之内")]
    OutsideRoot,
}

/// 依赖注入注册错误类型
#[derive(Error, Debug)]
pub enum RegistrationError {
    #[error("组件实例化失败: {type_name}, 原因: {message}")]
    InstantiationFailed { type_name: String, message: String },

    #[error("检测到循环依赖: {chain}")]
    CircularDependency { chain: String },

    #[error("依赖注入失败: {type_name} 的字段 {field}, 原因: {message}")]
    InjectionFailed {
        type_name: String,
        field: String,
        message: String,
    },
}

/// 容器统一错误类型
#[derive(Error, Debug)]
pub enum ContainerError {
    #[error("配置错误: {source}")]
    Configuration {
        #[from]
        source: ConfigurationError,
    },

    #[error("类型源错误: {source}")]
    TypeSource {
        #[from]
        source: TypeSourceError,
    },

    #[error("注册错误: {source}")]
    Registration {
        #[from]
        source: RegistrationError,
    },
}

/// 结果类型别名
pub type RegistrationResult<T> = Result<T, RegistrationError>;
pub type TypeSourceResult<T> = Result<T, TypeSourceError>;
pub type ContainerResult<T> = Result<T, ContainerError>;
