//! 组件基础接口定义
//!
//! 提供所有可注册组件必须实现的基础 trait, 以及注入字段使用的 [`Dep`] 单元。

use std::any::TypeId;
use std::fmt;
use std::sync::Arc;

use once_cell::sync::OnceCell;

use crate::metadata::ComponentDescriptor;

/// 组件基础 trait
///
/// 所有参与容器装配的类型都必须实现此 trait。
pub trait Component: Send + Sync + fmt::Debug + 'static {
    /// 组件名称
    fn name(&self) -> &'static str;

    /// 组件类型ID
    fn type_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }
}

/// 可注入组件 trait
///
/// 为类型提供声明式的组件描述符: 构造路径加注入点列表。
/// 通常由 `#[derive(Component)]` 生成, 也可以手工实现
/// (即"显式注册调用"的清单形式)。
pub trait Injectable: Component + Sized {
    /// 本类型的组件描述符
    fn descriptor() -> ComponentDescriptor;
}

/// 依赖注入字段单元
///
/// 对应"注入点"的字段侧: 一个只能被填充一次的格子,
/// 由注册引擎在依赖注册完成后通过共享引用填入。
/// 这是对"绕过可见性规则的反射字段写入"的显式替代。
pub struct Dep<T>(OnceCell<Arc<T>>);

impl<T> Dep<T> {
    /// 创建空的注入单元
    pub const fn empty() -> Self {
        Self(OnceCell::new())
    }

    /// 填入依赖实例, 首次填充返回 `true`, 此后为无操作并返回 `false`
    pub fn fill(&self, value: Arc<T>) -> bool {
        self.0.set(value).is_ok()
    }

    /// 读取已注入的依赖实例
    pub fn get(&self) -> Option<&Arc<T>> {
        self.0.get()
    }

    /// 是否已完成注入
    pub fn is_filled(&self) -> bool {
        self.0.get().is_some()
    }
}

impl<T> Default for Dep<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> fmt::Debug for Dep<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_filled() {
            write!(f, "Dep(<filled>)")
        } else {
            write!(f, "Dep(<empty>)")
        }
    }
}
