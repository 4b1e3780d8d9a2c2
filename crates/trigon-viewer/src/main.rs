use std::process::ExitCode;

use trigon_engine::device::GpuInit;
use trigon_engine::logging::{init_logging, LoggingConfig};
use trigon_engine::render::{DriverConfig, ShaderSource};
use trigon_engine::window::{Runtime, RuntimeConfig};

const TRIANGLE_WGSL: &str = include_str!("../shaders/triangle.wgsl");

fn main() -> ExitCode {
    init_logging(LoggingConfig::default());

    let config = RuntimeConfig {
        title: "trigon (hold Space)".to_string(),
        ..Default::default()
    };
    let shader = ShaderSource::wgsl(TRIANGLE_WGSL).with_label("triangle.wgsl");

    match run(config, shader) {
        Ok(()) => ExitCode::SUCCESS,
        // Already logged by the runtime.
        Err(_) => ExitCode::FAILURE,
    }
}

fn run(config: RuntimeConfig, shader: ShaderSource) -> anyhow::Result<()> {
    let driver = DriverConfig::default();
    log::info!("hold {} to switch fragment shaders, Escape to quit", driver.toggle_key);
    Runtime::run(config, GpuInit::default(), driver, shader)
}
