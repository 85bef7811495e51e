//! Cat Platformer entry point
//!
//! The browser build is driven from JavaScript through `WebHost`; the native
//! binary plays a short scripted run headlessly and logs what happened.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use cat_platformer::platform::{HeadlessRunner, ScriptStep};
    use cat_platformer::sim::GameEvent;
    use cat_platformer::{Engine, EngineConfig, InputLatch};

    env_logger::init();
    log::info!("Cat Platformer (native) starting...");

    let config = match std::env::args().nth(1) {
        Some(path) => match std::fs::read_to_string(&path) {
            Ok(json) => match EngineConfig::from_json(&json) {
                Ok(config) => config,
                Err(err) => {
                    log::error!("Invalid config {}: {}", path, err);
                    std::process::exit(1);
                }
            },
            Err(err) => {
                log::error!("Cannot read {}: {}", path, err);
                std::process::exit(1);
            }
        },
        None => EngineConfig::default(),
    };

    let engine = match Engine::new(config, InputLatch::new()) {
        Ok(engine) => engine,
        Err(err) => {
            log::error!("Stage rejected: {}", err);
            std::process::exit(1);
        }
    };

    // Drop onto the ground, run right, jump twice, then wander to the end
    let mut runner = HeadlessRunner::new(engine, 60.0);
    let report = runner.run(&[
        ScriptStep::idle(60),
        ScriptStep::new(30, &["ArrowRight"]),
        ScriptStep::new(10, &["ArrowRight", " "]),
        ScriptStep::new(5, &["ArrowRight"]),
        ScriptStep::new(10, &["ArrowRight", " "]),
        ScriptStep::new(120, &["ArrowRight"]),
        ScriptStep::idle(60),
    ]);

    for event in &report.events {
        match event {
            GameEvent::Landed { impact } => log::debug!("Landed (impact {:.1})", impact),
            other => log::info!("{:?}", other),
        }
    }
    log::info!(
        "{} frames, {} ticks, player at {:?}",
        report.frames,
        report.ticks,
        report.final_pos
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is WebHost, this is just to satisfy the compiler
}
