use anyhow::Context;
use probsim_app::config::AppConfig;
use probsim_app::logging::init_logging;
use probsim_app::{BUILD_DATE, SimulatorController, platform};
use probsim_core::AppInfo;
use probsim_core::sampler::RandomOutcomes;
use probsim_ui::AssetStore;
use tracing::{info, warn};

fn main() -> anyhow::Result<()> {
    let config = AppConfig::discover().context("loading configuration")?;
    let _logging_guard = init_logging(&config.logging)?;
    info!(
        app = AppInfo::name(),
        version = AppInfo::version(),
        built = BUILD_DATE,
        seed = ?config.seed,
        "starting"
    );

    let mut assets = AssetStore::from_current_manifest();
    if let Some(root) = &config.assets.root {
        assets = assets.with_root(root);
    }
    let missing = assets.missing();
    if !missing.is_empty() {
        warn!(
            root = %assets.root().display(),
            count = missing.len(),
            "some outcome images are unavailable"
        );
    }

    let source = RandomOutcomes::from_optional_seed(config.seed);
    let controller = SimulatorController::new(source, assets, &config.animation);
    platform::run(controller)
}
