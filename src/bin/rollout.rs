use std::env;
use std::path::Path;

use tracing::info;
use tracing_subscriber::EnvFilter;

use driver::{CarEnv, EnvConfig, Environment, RenderFrame, RenderMode};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let mut args = env::args().skip(1);
    let config = match args.next() {
        Some(path) => EnvConfig::from_yaml(Path::new(&path))?,
        None => EnvConfig::default(),
    };
    let steps: usize = match args.next() {
        Some(raw) => raw.parse()?,
        None => 90,
    };

    let force = config.act_limit.min(40.0);
    let mut env = CarEnv::new(config)?;

    let observation = env.reset()?;
    info!(pose = ?observation.pose, "reset complete");

    let mut last = None;
    for step in 0..steps {
        let result = env.step(Some([force, force]), RenderMode::RgbArray)?;
        if step % 30 == 0 {
            info!(
                step,
                pose = ?result.observation.pose,
                v = result.observation.velocity,
                trans_coef = result.observation.trans_coef,
                "rollout"
            );
        }
        last = Some(result);
    }

    if let Some(result) = last {
        info!(info = %serde_json::to_string(&result.info)?, "final step");
    }

    if let Some(RenderFrame::Pixels {
        width,
        height,
        data,
    }) = env.render(RenderMode::RgbArray)?
    {
        image::save_buffer("rollout.png", &data, width, height, image::ColorType::Rgba8)?;
        info!(width, height, "wrote rollout.png");
    }

    env.close();
    Ok(())
}
