//! 组件派生宏的集成测试

use component_macros::Component;
use container_common::{Component as _, Dep, Injectable};
use type_source::global_type_index;

/// 基础组件
#[derive(Debug, Default, Component)]
#[component]
pub struct Relay {
    pub enabled: bool,
}

/// 自定义名称的组件
#[derive(Debug, Default, Component)]
#[component(name = "primary_switch")]
pub struct Switch;

/// 登记但未带组件标记的类型
#[derive(Debug, Default, Component)]
pub struct Probe;

/// 带注入字段的组件
#[derive(Debug, Default, Component)]
#[component]
pub struct Panel {
    #[inject]
    relay: Dep<Relay>,
    #[inject]
    switch: Dep<Switch>,
    pub label: Option<String>,
}

fn build_meter() -> Result<Meter, String> {
    Ok(Meter { reading: 42 })
}

/// 使用自定义构造函数的组件
#[derive(Debug, Component)]
#[component(constructor = "build_meter")]
pub struct Meter {
    pub reading: i64,
}

#[test]
fn derive_implements_component_with_struct_name() {
    let relay = Relay::default();
    assert_eq!(relay.name(), "Relay");
}

#[test]
fn name_attribute_overrides_component_name() {
    let switch = Switch;
    assert_eq!(switch.name(), "primary_switch");
}

#[test]
fn descriptor_lists_injection_sites_in_field_order() {
    let descriptor = Panel::descriptor();
    assert!(descriptor.is_instantiable());

    let fields: Vec<&str> = descriptor.sites().iter().map(|site| site.field()).collect();
    assert_eq!(fields, vec!["relay", "switch"]);
}

#[test]
fn plain_fields_are_not_injection_sites() {
    let descriptor = Relay::descriptor();
    assert!(descriptor.sites().is_empty());
}

#[test]
fn custom_constructor_builds_the_instance() {
    let descriptor = Meter::descriptor();
    let construct = descriptor.construct().unwrap();

    let instance = construct().unwrap();
    let meter = instance.downcast::<Meter>().unwrap();
    assert_eq!(meter.reading, 42);
}

#[test]
fn derived_types_are_enrolled_at_startup() {
    let index = global_type_index();

    let relay = index.lookup("integration_tests::Relay").unwrap();
    assert!(relay.is_tagged());
    assert!(relay.descriptor().is_instantiable());

    let probe = index.lookup("integration_tests::Probe").unwrap();
    assert!(!probe.is_tagged());
}
