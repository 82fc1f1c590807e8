//! 进程级 `boot` 入口的集成测试
//!
//! `boot` 读取环境变量并缓存容器, 因此所有断言放在同一个
//! 测试函数里, 避免并行测试之间的环境变量竞争。

use std::fs;

use component_macros::Component;
use composition::{boot, SEARCH_PATH_VAR};

#[derive(Debug, Default, Component)]
#[component]
struct BootProbe;

#[test]
fn boot_is_idempotent_and_reads_the_search_path() {
    // 未设置搜索路径时引导失败, 失败不会被缓存
    std::env::remove_var(SEARCH_PATH_VAR);
    assert!(boot().is_err());

    let dir = tempfile::tempdir().unwrap();
    let module = dir.path().join("boot_test");
    fs::create_dir_all(&module).unwrap();
    fs::write(module.join("BootProbe.component"), b"").unwrap();
    std::env::set_var(SEARCH_PATH_VAR, dir.path());

    let first = boot().unwrap();
    assert!(first.resolve::<BootProbe>().is_some());

    // 再次调用返回同一个容器, 不会重新引导
    let second = boot().unwrap();
    assert!(std::ptr::eq(first, second));

    // 之后环境变量的变化不再影响已缓存的容器
    std::env::remove_var(SEARCH_PATH_VAR);
    assert!(std::ptr::eq(boot().unwrap(), first));
}
