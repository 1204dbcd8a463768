//=========================================================================
// Aetheric Stage - Binary Entry Point
//=========================================================================
//
// config.toml → logging → resource cache → engine with menu + image scene.
//
//=========================================================================

use std::sync::Arc;

use anyhow::Context;
use log::info;

use aetheric_stage::core::config::AppConfig;
use aetheric_stage::core::logging::init_logging;
use aetheric_stage::core::resources::ResourceCache;
use aetheric_stage::scenes::{self, AppScene};
use aetheric_stage::{EngineBuilder, EngineError};

fn main() -> anyhow::Result<()> {
    run().context("aetheric stage terminated with an error")
}

fn run() -> Result<(), EngineError> {
    let config = AppConfig::load_from_env()?;

    // Held until exit so queued records are flushed on shutdown.
    let _log_guard = init_logging(&config.logging)?;

    info!("Starting \"{}\"", config.screen.title);

    let resources = Arc::new(ResourceCache::load(
        &config.assets.dir,
        config.assets.default_font_size,
    ));

    EngineBuilder::<AppScene>::from_config(&config)
        .build(resources)
        .init(|s, ctx| scenes::register_all(s, ctx.resources, &config))
        .run()
}
