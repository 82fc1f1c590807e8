//! # 演示应用程序
//!
//! 演示 Wirelight 容器的完整流程: 从构件目录发现组件类型,
//! 引导容器并注册带标记的组件, 解析组件并使用注入的依赖。

use std::sync::atomic::{AtomicI32, Ordering};

use clap::Parser;
use tracing::info;

use component_macros::Component;
use composition::{boot, SEARCH_PATH_VAR};
use container_common::Dep;

/// 命令行参数
#[derive(Parser, Debug)]
#[command(name = "demo-app")]
#[command(about = "Wirelight 演示应用")]
struct Args {
    /// 组件构件目录
    #[arg(short, long, default_value = "components")]
    components: String,

    /// 日志级别
    #[arg(long, default_value = "info")]
    log_level: String,
}

/// 示例依赖组件
#[derive(Debug, Default, Component)]
#[component]
struct SampleDependency {
    value: AtomicI32,
}

/// 示例组件, 依赖 [`SampleDependency`]
#[derive(Debug, Default, Component)]
#[component]
struct SampleComponent {
    value: AtomicI32,
    #[inject]
    dependency: Dep<SampleDependency>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // 初始化日志
    tracing_subscriber::fmt()
        .with_max_level(parse_log_level(&args.log_level))
        .init();

    info!("启动 Wirelight 演示应用");

    // 引导进程级容器: 发现搜索路径下的组件并注册
    if std::env::var_os(SEARCH_PATH_VAR).is_none() {
        std::env::set_var(SEARCH_PATH_VAR, &args.components);
    }
    let container = boot()?;

    // 已经通过发现注册过的类型, 再次注册是无操作
    container.register::<SampleComponent>()?;

    let component = container
        .resolve::<SampleComponent>()
        .ok_or("SampleComponent 未注册")?;
    let dependency = component.dependency.get().ok_or("依赖未注入")?;

    component.value.store(12, Ordering::SeqCst);
    dependency.value.store(10, Ordering::SeqCst);

    println!(
        "{}, {}",
        component.value.load(Ordering::SeqCst),
        dependency.value.load(Ordering::SeqCst)
    );

    info!("演示应用结束");
    Ok(())
}

/// 解析日志级别
fn parse_log_level(level: &str) -> tracing::Level {
    match level.to_lowercase().as_str() {
        "trace" => tracing::Level::TRACE,
        "debug" => tracing::Level::DEBUG,
        "info" => tracing::Level::INFO,
        "warn" => tracing::Level::WARN,
        "error" => tracing::Level::ERROR,
        _ => tracing::Level::INFO,
    }
}
