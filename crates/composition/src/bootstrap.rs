//! 容器引导
//!
//! 把类型发现与注册引擎装配为一个可用的容器:
//! 装载发现根目录下的类型构件, 注册所有带组件标记的类型,
//! 返回持有注册表的容器句柄。引导是尽力而为的:
//! 单个组件注册失败只记录, 不会中断其余组件的注册。

use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use once_cell::sync::OnceCell;
use tracing::{debug, error, info, warn};

use container_common::{
    Component, ConfigurationError, ContainerResult, Injectable, RegistrationResult,
};
use container_registry::ComponentRegistry;
use type_source::{FileTypeLoader, TypeIndex};

/// 组件发现搜索路径的环境变量
///
/// 取值为平台惯例的路径列表 (Unix 下冒号分隔, Windows 下分号分隔)。
pub const SEARCH_PATH_VAR: &str = "WIRELIGHT_COMPONENT_PATH";

/// 容器引导选项
#[derive(Debug, Default)]
pub struct BootstrapOptions {
    roots: Vec<PathBuf>,
    index: Option<&'static TypeIndex>,
}

impl BootstrapOptions {
    /// 从环境变量读取发现根目录搜索路径
    pub fn from_env() -> ContainerResult<Self> {
        let raw = env::var_os(SEARCH_PATH_VAR).ok_or_else(|| ConfigurationError::MissingSearchPath {
            variable: SEARCH_PATH_VAR.to_string(),
        })?;
        Ok(Self {
            roots: env::split_paths(&raw).collect(),
            index: None,
        })
    }

    /// 使用指定的发现根目录
    pub fn with_roots(roots: impl IntoIterator<Item = PathBuf>) -> Self {
        Self {
            roots: roots.into_iter().collect(),
            index: None,
        }
    }

    /// 使用单个发现根目录
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self::with_roots([root.into()])
    }

    /// 使用指定的类型索引 (测试用)
    #[must_use]
    pub fn index(mut self, index: &'static TypeIndex) -> Self {
        self.index = Some(index);
        self
    }
}

/// 容器句柄
///
/// 持有组件注册表, 提供注册与解析的入口。
/// 通过 [`Container::bootstrap`] 创建, 或经 [`boot`] 获取进程级实例。
#[derive(Debug)]
pub struct Container {
    registry: ComponentRegistry,
}

impl Container {
    /// 引导容器
    ///
    /// 发现选项指定的根目录下的类型构件, 注册其中所有带组件标记的类型。
    /// 没有构件或没有带标记的构件不是错误, 得到的是空容器。
    pub fn bootstrap(options: BootstrapOptions) -> ContainerResult<Self> {
        info!(roots = ?options.roots, "开始容器引导");

        let mut builder = FileTypeLoader::builder().with_roots(options.roots);
        if let Some(index) = options.index {
            builder = builder.with_index(index);
        }
        let loader = builder.build();
        let outcome = loader.load()?;

        for skipped in outcome.skipped() {
            warn!(name = %skipped.name, reason = %skipped.reason, "发现阶段跳过构件");
        }

        let registry = ComponentRegistry::new();
        let mut registered = 0usize;
        let mut failed = 0usize;
        for descriptor in outcome.descriptors() {
            if !descriptor.is_tagged() {
                debug!(fqn = %descriptor.fqn(), "未带组件标记, 不注册");
                continue;
            }
            match registry.register_with(&descriptor.descriptor()) {
                Ok(()) => registered += 1,
                Err(error) => {
                    failed += 1;
                    error!(fqn = %descriptor.fqn(), %error, "组件注册失败, 继续处理其余组件");
                }
            }
        }

        info!(registered, failed, "容器引导完成");
        Ok(Self { registry })
    }

    /// 注册组件类型
    pub fn register<T: Injectable>(&self) -> RegistrationResult<()> {
        self.registry.register::<T>()
    }

    /// 解析组件
    pub fn resolve<T: Component>(&self) -> Option<Arc<T>> {
        self.registry.resolve::<T>()
    }

    /// 底层注册表
    pub fn registry(&self) -> &ComponentRegistry {
        &self.registry
    }
}

static GLOBAL_CONTAINER: OnceCell<Container> = OnceCell::new();

/// 进程级容器引导
///
/// 首次调用按 [`SEARCH_PATH_VAR`] 环境变量执行引导并缓存容器;
/// 之后的调用直接返回同一个容器, 不会重新发现或重新注册。
/// 首次引导失败不会被缓存, 下一次调用会重新尝试。
pub fn boot() -> ContainerResult<&'static Container> {
    GLOBAL_CONTAINER.get_or_try_init(|| Container::bootstrap(BootstrapOptions::from_env()?))
}
