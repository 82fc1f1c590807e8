//! 注册引擎实现
//!
//! 容器本体: 维护类型标识到单例实例的映射, 实现递归注册算法与字段注入。
//!
//! 注册顺序与原始设计一致: 先实例化并入表, 再处理依赖, 最后注入字段。
//! 在此之上引入了显式的"注册进行中"集合: 依赖链重新进入一个尚未完成
//! 注入的类型被视为真正的循环依赖, 直接以 [`RegistrationError::CircularDependency`]
//! 拒绝, 而不是依赖入表顺序的偶然性。

use std::any::{Any, TypeId};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, info, warn};

use container_common::{
    Component, ComponentDescriptor, ConstructFn, Injectable, RegistrationError,
    RegistrationResult, TypeInfo,
};

/// 已注册组件
struct RegisteredComponent {
    info: TypeInfo,
    instance: Arc<dyn Any + Send + Sync>,
}

#[derive(Default)]
struct RegistryState {
    /// 类型标识 -> 单例实例。条目一旦写入便不再替换或删除。
    instances: HashMap<TypeId, RegisteredComponent>,
    /// 已入表但注入尚未完成的类型
    in_progress: HashSet<TypeId>,
    /// 当前注册链, 仅用于循环依赖的错误报告
    chain: Vec<String>,
}

/// 组件注册表
///
/// 注册与解析设计上在单线程内完成; 内部互斥锁只是对共享 map
/// 变更的最小保护, 不构成并发使用的承诺。锁从不跨越递归注册、
/// 构造函数或注入回调持有。
pub struct ComponentRegistry {
    state: Mutex<RegistryState>,
}

impl ComponentRegistry {
    /// 创建空的注册表
    pub fn new() -> Self {
        Self {
            state: Mutex::new(RegistryState::default()),
        }
    }

    /// 注册组件类型
    ///
    /// 确保该类型与其全部直接和传递依赖都拥有单例条目后返回。
    pub fn register<T: Injectable>(&self) -> RegistrationResult<()> {
        self.register_with(&T::descriptor())
    }

    /// 按描述符注册组件
    ///
    /// 抽象描述符是无操作 (接口绑定是明确的非目标);
    /// 已注册类型同样是无操作, 不会产生第二个实例或重复注入。
    pub fn register_with(&self, descriptor: &ComponentDescriptor) -> RegistrationResult<()> {
        let info = descriptor.type_info().clone();

        let Some(construct) = descriptor.construct() else {
            debug!(type_name = %info.qualified_name, "抽象类型, 跳过注册");
            return Ok(());
        };

        {
            let mut state = self.state.lock();
            if state.in_progress.contains(&info.id) {
                let chain = chain_with(&state.chain, &info.name);
                return Err(RegistrationError::CircularDependency { chain });
            }
            if state.instances.contains_key(&info.id) {
                debug!(type_name = %info.qualified_name, "组件已注册, 跳过");
                return Ok(());
            }
            state.in_progress.insert(info.id);
            state.chain.push(info.name.clone());
        }

        let result = self.register_inner(descriptor, construct, &info);

        {
            let mut state = self.state.lock();
            state.in_progress.remove(&info.id);
            state.chain.pop();
        }

        result
    }

    fn register_inner(
        &self,
        descriptor: &ComponentDescriptor,
        construct: &ConstructFn,
        info: &TypeInfo,
    ) -> RegistrationResult<()> {
        // 先实例化并入表, 再处理依赖
        let instance = construct()?;
        {
            let mut state = self.state.lock();
            state.instances.insert(
                info.id,
                RegisteredComponent {
                    info: info.clone(),
                    instance: Arc::clone(&instance),
                },
            );
        }
        debug!(type_name = %info.qualified_name, "组件实例已入表");

        // 确保所有直接依赖都有条目
        for site in descriptor.sites() {
            let dependency = site.dependency();
            let pending = {
                let state = self.state.lock();
                if state.in_progress.contains(&dependency.id) {
                    let chain = chain_with(&state.chain, &dependency.name);
                    return Err(RegistrationError::CircularDependency { chain });
                }
                !state.instances.contains_key(&dependency.id)
            };
            if pending {
                self.register_with(&(site.provider())())?;
            }
        }

        // 字段注入
        for site in descriptor.sites() {
            let dependency = site.dependency();
            let Some(dep_instance) = self.resolve_by_type_id(dependency.id) else {
                return Err(RegistrationError::InjectionFailed {
                    type_name: info.qualified_name.clone(),
                    field: site.field().to_string(),
                    message: format!("依赖 {} 不可实例化", dependency.qualified_name),
                });
            };
            site.assign(instance.as_ref(), dep_instance)?;
        }

        info!(type_name = %info.qualified_name, "组件注册完成");
        Ok(())
    }

    /// 解析组件
    ///
    /// 只做查找, 从不触发注册; 未注册的类型返回 `None`。
    pub fn resolve<T: Component>(&self) -> Option<Arc<T>> {
        let instance = self.resolve_by_type_id(TypeId::of::<T>())?;
        match instance.downcast::<T>() {
            Ok(typed) => Some(typed),
            Err(_) => {
                warn!(
                    type_name = std::any::type_name::<T>(),
                    "注册表中的实例与请求类型不匹配"
                );
                None
            }
        }
    }

    /// 按类型ID解析组件
    pub fn resolve_by_type_id(&self, type_id: TypeId) -> Option<Arc<dyn Any + Send + Sync>> {
        let state = self.state.lock();
        state
            .instances
            .get(&type_id)
            .map(|registered| Arc::clone(&registered.instance))
    }

    /// 检查组件是否已注册
    pub fn is_registered<T: 'static>(&self) -> bool {
        self.is_registered_by_type_id(TypeId::of::<T>())
    }

    /// 检查组件是否已注册（通过 TypeId）
    pub fn is_registered_by_type_id(&self, type_id: TypeId) -> bool {
        self.state.lock().instances.contains_key(&type_id)
    }

    /// 获取所有已注册类型的类型信息
    pub fn registered_types(&self) -> Vec<TypeInfo> {
        let state = self.state.lock();
        state
            .instances
            .values()
            .map(|registered| registered.info.clone())
            .collect()
    }

    /// 已注册组件数量
    pub fn len(&self) -> usize {
        self.state.lock().instances.len()
    }

    /// 注册表是否为空
    pub fn is_empty(&self) -> bool {
        self.state.lock().instances.is_empty()
    }
}

impl Default for ComponentRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ComponentRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock();
        f.debug_struct("ComponentRegistry")
            .field("registered", &state.instances.len())
            .field("in_progress", &state.in_progress.len())
            .finish()
    }
}

fn chain_with(chain: &[String], last: &str) -> String {
    let mut parts: Vec<&str> = chain.iter().map(String::as_str).collect();
    parts.push(last);
    parts.join(" -> ")
}
