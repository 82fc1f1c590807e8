//! # Component Macros
//!
//! 这个 crate 提供了用于组件声明与注入站点登记的过程宏。
//!
//! ## 核心宏
//!
//! - [`Component`](macro@Component) - 组件派生宏
//!
//! ## 使用示例
//!
//! ```rust,ignore
//! use component_macros::Component;
//! use container_common::Dep;
//!
//! #[derive(Debug, Default, Component)]
//! #[component]
//! pub struct OrderService {
//!     #[inject]
//!     repository: Dep<OrderRepository>,
//! }
//! ```

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

mod component;
mod utils;

/// 组件派生宏
///
/// 为结构体实现 `Component` 与 `Injectable` trait, 并在程序启动时
/// 把类型构件登记到全局类型索引中。
///
/// # 结构体属性
///
/// - `#[component]` - 组件标记, 使类型可被目录发现自动注册
/// - `#[component(name = "custom_name")]` - 自定义组件名称
/// - `#[component(constructor = "path::to::fn")]` - 自定义构造函数,
///   签名为 `fn() -> Result<Self, E>`; 缺省使用 `Default`
///
/// # 字段属性
///
/// - `#[inject]` - 注入站点, 字段类型必须是 `Dep<T>`
///
/// # 示例
///
/// ```rust,ignore
/// #[derive(Debug, Default, Component)]
/// #[component]
/// pub struct OrderService {
///     #[inject]
///     repository: Dep<OrderRepository>,
/// }
/// ```
#[proc_macro_derive(Component, attributes(component, inject))]
pub fn derive_component(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    component::derive_component_impl(input)
}
