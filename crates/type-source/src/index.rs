//! 类型登记索引
//!
//! 启动时构建的声明式类型清单: 完整限定名到类型构件描述符的映射。
//! 由 `#[derive(Component)]` 生成的 `ctor` 登记函数在进程启动时填充,
//! 测试中也可以手工登记。这是对"按名字装载编译产物"的无反射替代:
//! 装载一个类型名即在此索引中查找它。

use std::collections::HashMap;

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use tracing::{debug, warn};

use container_common::{ComponentDescriptor, Injectable, ProviderFn, TypeInfo};

/// 类型构件描述符
///
/// 一个可装载类型的只读句柄: 完整限定名、类型信息、
/// 是否带组件标记, 以及组件描述符的提供函数。
#[derive(Debug, Clone)]
pub struct TypeDescriptor {
    fqn: String,
    info: TypeInfo,
    tagged: bool,
    provider: ProviderFn,
}

impl TypeDescriptor {
    /// 为可注入类型创建构件描述符
    pub fn new<T: Injectable>(fqn: impl Into<String>, tagged: bool, provider: ProviderFn) -> Self {
        Self {
            fqn: fqn.into(),
            info: TypeInfo::of::<T>(),
            tagged,
            provider,
        }
    }

    /// 完整限定名
    pub fn fqn(&self) -> &str {
        &self.fqn
    }

    /// 类型信息
    pub fn info(&self) -> &TypeInfo {
        &self.info
    }

    /// 是否带组件标记 (可被自动发现注册)
    pub fn is_tagged(&self) -> bool {
        self.tagged
    }

    /// 组件描述符
    pub fn descriptor(&self) -> ComponentDescriptor {
        (self.provider)()
    }
}

/// 类型登记索引
#[derive(Debug)]
pub struct TypeIndex {
    entries: RwLock<HashMap<String, TypeDescriptor>>,
}

impl TypeIndex {
    /// 创建空索引
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// 登记一个类型构件
    pub fn enroll(&self, descriptor: TypeDescriptor) {
        let mut entries = self.entries.write();
        debug!(fqn = %descriptor.fqn, tagged = descriptor.tagged, "登记类型构件");
        if let Some(previous) = entries.insert(descriptor.fqn.clone(), descriptor) {
            warn!(fqn = %previous.fqn, "类型构件重复登记, 旧条目被覆盖");
        }
    }

    /// 按完整限定名查找类型构件
    pub fn lookup(&self, fqn: &str) -> Option<TypeDescriptor> {
        self.entries.read().get(fqn).cloned()
    }

    /// 已登记的完整限定名列表
    pub fn enrolled_fqns(&self) -> Vec<String> {
        self.entries.read().keys().cloned().collect()
    }

    /// 已登记条目数量
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// 索引是否为空
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl Default for TypeIndex {
    fn default() -> Self {
        Self::new()
    }
}

static GLOBAL_TYPE_INDEX: Lazy<TypeIndex> = Lazy::new(TypeIndex::new);

/// 进程级全局类型索引
pub fn global_type_index() -> &'static TypeIndex {
    &GLOBAL_TYPE_INDEX
}
