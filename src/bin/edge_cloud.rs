//! 边缘-云流水线仿真
//!
//! 运行一个场景（JSON 文件或内置演示场景），输出 JSON 摘要。

use clap::Parser;
use edgesim_rs::broker::Broker;
use edgesim_rs::demo::{build_scenario, default_scenario};
use edgesim_rs::sim::{ScenarioSpec, SimTime};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "edge-cloud", about = "边缘-云 SDN 流水线仿真")]
struct Args {
    /// 场景 JSON 文件；缺省使用内置演示场景
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// 仿真运行到多少毫秒；缺省运行到事件耗尽
    #[arg(long)]
    until_ms: Option<u64>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 初始化 tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .init();

    let args = Args::parse();

    let spec: ScenarioSpec = match &args.scenario {
        Some(path) => serde_json::from_str(&fs::read_to_string(path)?)?,
        None => default_scenario(),
    };

    let mut built = build_scenario(&spec)?;
    match args.until_ms {
        Some(ms) => {
            built.engine.run_until(SimTime::from_millis(ms))?;
            built.engine.finish()?;
        }
        None => built.engine.run()?,
    }

    let broker = built
        .engine
        .entity(built.broker)
        .as_any()
        .downcast_ref::<Broker>()
        .expect("broker entity");
    let summary = serde_json::json!({
        "workflows_total": broker.workflows().len(),
        "workflows_completed": broker.workflows().completed_count(),
        "stats": broker.stats(),
        "final_time_secs": built.engine.kernel.now().as_secs_f64(),
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
