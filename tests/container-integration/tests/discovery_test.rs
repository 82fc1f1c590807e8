//! 容器端到端集成测试: 目录发现、标记过滤、注入与故障隔离

use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::Arc;

use component_macros::Component;
use composition::{BootstrapOptions, Container};
use container_common::{Dep, RegistrationError};

/// 示例依赖组件
#[derive(Debug, Default, Component)]
#[component]
struct Gadget {
    value: AtomicI32,
}

/// 示例组件, 注入 [`Gadget`]
#[derive(Debug, Default, Component)]
#[component]
struct Widget {
    value: AtomicI32,
    #[inject]
    gadget: Dep<Gadget>,
}

/// 已登记但未带组件标记的类型
#[derive(Debug, Default, Component)]
struct Bystander;

fn failing_constructor() -> Result<Faulty, String> {
    Err("故意失败".to_string())
}

/// 构造总是失败的组件
#[derive(Debug, Component)]
#[component(constructor = "failing_constructor")]
struct Faulty;

#[derive(Debug, Default, Component)]
#[component]
struct LoopLeft {
    #[inject]
    right: Dep<LoopRight>,
}

#[derive(Debug, Default, Component)]
#[component]
struct LoopRight {
    #[inject]
    left: Dep<LoopLeft>,
}

fn write_artifact(root: &Path, type_name: &str) {
    let module = root.join("discovery_test");
    fs::create_dir_all(&module).unwrap();
    fs::write(module.join(format!("{type_name}.component")), b"").unwrap();
}

#[test]
fn bootstrap_registers_tagged_artifacts_and_skips_the_rest() {
    let dir = tempfile::tempdir().unwrap();
    write_artifact(dir.path(), "Widget");
    write_artifact(dir.path(), "Gadget");
    write_artifact(dir.path(), "Bystander");
    write_artifact(dir.path(), "NeverEnrolled");
    fs::write(dir.path().join("notes.txt"), b"x").unwrap();

    let container = Container::bootstrap(BootstrapOptions::with_root(dir.path())).unwrap();

    assert!(container.resolve::<Widget>().is_some());
    assert!(container.resolve::<Gadget>().is_some());
    assert!(container.resolve::<Bystander>().is_none());
    assert_eq!(container.registry().len(), 2);
}

#[test]
fn injected_dependency_is_the_registered_singleton() {
    let dir = tempfile::tempdir().unwrap();
    write_artifact(dir.path(), "Widget");

    let container = Container::bootstrap(BootstrapOptions::with_root(dir.path())).unwrap();

    let widget = container.resolve::<Widget>().unwrap();
    let gadget = container.resolve::<Gadget>().unwrap();
    assert!(Arc::ptr_eq(widget.gadget.get().unwrap(), &gadget));

    widget.value.store(12, Ordering::SeqCst);
    gadget.value.store(10, Ordering::SeqCst);
    assert_eq!(widget.value.load(Ordering::SeqCst), 12);
    assert_eq!(
        widget.gadget.get().unwrap().value.load(Ordering::SeqCst),
        10
    );
}

#[test]
fn failing_component_does_not_abort_bootstrap() {
    let dir = tempfile::tempdir().unwrap();
    write_artifact(dir.path(), "Faulty");
    write_artifact(dir.path(), "Gadget");

    let container = Container::bootstrap(BootstrapOptions::with_root(dir.path())).unwrap();

    assert!(container.resolve::<Gadget>().is_some());
    assert!(container.resolve::<Faulty>().is_none());
}

#[test]
fn registration_after_bootstrap_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    write_artifact(dir.path(), "Gadget");

    let container = Container::bootstrap(BootstrapOptions::with_root(dir.path())).unwrap();
    let first = container.resolve::<Gadget>().unwrap();

    container.register::<Gadget>().unwrap();
    let second = container.resolve::<Gadget>().unwrap();
    assert!(Arc::ptr_eq(&first, &second));
}

#[test]
fn circular_dependency_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let container = Container::bootstrap(BootstrapOptions::with_root(dir.path())).unwrap();

    let error = container.register::<LoopLeft>().unwrap_err();
    assert!(matches!(
        error,
        RegistrationError::CircularDependency { .. }
    ));

    // 已入表的条目保留, 但失败链路上的注入没有发生
    let left = container.resolve::<LoopLeft>().unwrap();
    assert!(left.right.get().is_none());
}
