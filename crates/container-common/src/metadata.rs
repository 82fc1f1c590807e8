//! 组件元数据定义
//!
//! 提供类型信息、组件描述符与注入点的声明式清单表示。
//! 描述符取代了运行时反射: 每个可注册类型在编译期生成自己的
//! [`ComponentDescriptor`], 其中包含构造路径与全部注入点。

use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

use crate::component::Component;
use crate::errors::RegistrationError;

/// 类型信息
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeInfo {
    /// 类型ID
    pub id: TypeId,
    /// 短名称 (不含模块路径)
    pub name: String,
    /// 完整限定名
    pub qualified_name: String,
}

impl TypeInfo {
    /// 从具体类型获取类型信息
    pub fn of<T: 'static>() -> Self {
        Self::of_abstract::<T>()
    }

    /// 从抽象类型 (trait object 等非 Sized 类型) 获取类型信息
    pub fn of_abstract<T: ?Sized + 'static>() -> Self {
        let qualified_name = std::any::type_name::<T>().to_string();
        Self {
            id: TypeId::of::<T>(),
            name: qualified_name
                .rsplit("::")
                .next()
                .unwrap_or(&qualified_name)
                .to_string(),
            qualified_name,
        }
    }
}

/// 组件构造函数类型
///
/// 对应"默认构造路径": 成功时返回被类型擦除的单例实例。
pub type ConstructFn =
    Box<dyn Fn() -> Result<Arc<dyn Any + Send + Sync>, RegistrationError> + Send + Sync>;

/// 注入点描述符提供函数类型
///
/// 返回依赖类型自己的描述符, 供注册引擎递归注册使用。
pub type ProviderFn = fn() -> ComponentDescriptor;

type AssignFn =
    Box<dyn Fn(&(dyn Any + Send + Sync), Arc<dyn Any + Send + Sync>) -> Result<(), RegistrationError> + Send + Sync>;

/// 注入点
///
/// 标记宿主类型的一个字段需要在注册时被填入依赖实例,
/// 连同字段的声明类型与赋值方式一起声明。
pub struct InjectionSite {
    field: &'static str,
    dependency: TypeInfo,
    provider: ProviderFn,
    apply: AssignFn,
}

impl fmt::Debug for InjectionSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InjectionSite")
            .field("field", &self.field)
            .field("dependency", &self.dependency)
            .field("apply", &"<function>")
            .finish()
    }
}

impl InjectionSite {
    /// 创建新的注入点
    ///
    /// `apply` 在宿主与依赖实例都完成向下转型后执行实际的字段填充。
    pub fn new<O, D>(field: &'static str, provider: ProviderFn, apply: fn(&O, Arc<D>)) -> Self
    where
        O: Component,
        D: Component,
    {
        let assign: AssignFn = Box::new(move |owner, dependency| {
            let owner = owner.downcast_ref::<O>().ok_or_else(|| {
                RegistrationError::InjectionFailed {
                    type_name: std::any::type_name::<O>().to_string(),
                    field: field.to_string(),
                    message: "宿主实例类型不匹配".to_string(),
                }
            })?;
            let dependency = dependency.downcast::<D>().map_err(|_| {
                RegistrationError::InjectionFailed {
                    type_name: std::any::type_name::<O>().to_string(),
                    field: field.to_string(),
                    message: format!("依赖实例不是 {}", std::any::type_name::<D>()),
                }
            })?;
            apply(owner, dependency);
            Ok(())
        });

        Self {
            field,
            dependency: TypeInfo::of::<D>(),
            provider,
            apply: assign,
        }
    }

    /// 字段名
    pub fn field(&self) -> &'static str {
        self.field
    }

    /// 依赖类型信息
    pub fn dependency(&self) -> &TypeInfo {
        &self.dependency
    }

    /// 依赖类型的描述符提供函数
    pub fn provider(&self) -> ProviderFn {
        self.provider
    }

    /// 对宿主实例执行字段注入
    pub fn assign(
        &self,
        owner: &(dyn Any + Send + Sync),
        dependency: Arc<dyn Any + Send + Sync>,
    ) -> Result<(), RegistrationError> {
        (self.apply)(owner, dependency)
    }
}

/// 组件描述符
///
/// 一个类型在清单中的完整登记项: 类型信息、构造路径与注入点列表。
/// `construct` 为 `None` 表示抽象/不可实例化类型, 注册引擎对其直接跳过。
pub struct ComponentDescriptor {
    type_info: TypeInfo,
    construct: Option<ConstructFn>,
    sites: Vec<InjectionSite>,
}

impl fmt::Debug for ComponentDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentDescriptor")
            .field("type_info", &self.type_info)
            .field("instantiable", &self.construct.is_some())
            .field("sites", &self.sites)
            .finish()
    }
}

impl ComponentDescriptor {
    /// 使用默认构造路径创建描述符
    pub fn of<T: Component + Default>() -> Self {
        Self {
            type_info: TypeInfo::of::<T>(),
            construct: Some(Box::new(|| {
                Ok(Arc::new(T::default()) as Arc<dyn Any + Send + Sync>)
            })),
            sites: Vec::new(),
        }
    }

    /// 使用可失败的自定义构造函数创建描述符
    pub fn with_constructor<T, E>(construct: fn() -> Result<T, E>) -> Self
    where
        T: Component,
        E: fmt::Display + 'static,
    {
        Self {
            type_info: TypeInfo::of::<T>(),
            construct: Some(Box::new(move || match construct() {
                Ok(instance) => Ok(Arc::new(instance) as Arc<dyn Any + Send + Sync>),
                Err(e) => Err(RegistrationError::InstantiationFailed {
                    type_name: std::any::type_name::<T>().to_string(),
                    message: e.to_string(),
                }),
            })),
            sites: Vec::new(),
        }
    }

    /// 为抽象类型创建描述符 (无构造路径, 注册时跳过)
    pub fn abstract_of<T: ?Sized + 'static>() -> Self {
        Self {
            type_info: TypeInfo::of_abstract::<T>(),
            construct: None,
            sites: Vec::new(),
        }
    }

    /// 追加一个注入点
    #[must_use]
    pub fn with_site(mut self, site: InjectionSite) -> Self {
        self.sites.push(site);
        self
    }

    /// 类型信息
    pub fn type_info(&self) -> &TypeInfo {
        &self.type_info
    }

    /// 构造路径 (抽象类型为 `None`)
    pub fn construct(&self) -> Option<&ConstructFn> {
        self.construct.as_ref()
    }

    /// 注入点列表
    pub fn sites(&self) -> &[InjectionSite] {
        &self.sites
    }

    /// 是否可实例化
    pub fn is_instantiable(&self) -> bool {
        self.construct.is_some()
    }
}
