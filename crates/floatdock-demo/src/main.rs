//! Headless floatdock host.
//!
//! Usage: `floatdock-demo [script.json]`. Without a script a built-in
//! replay is used. Set `RUST_LOG=debug` to trace every snap and transition.

mod host;
mod script;

use std::path::Path;

use floatdock_core::FloatingOverlay;

use crate::host::HostController;
use crate::script::{DemoError, Script, Step};

fn run(overlay: &mut FloatingOverlay, script: &Script) {
    overlay.display(script.container, script.initial_edge, script.initial_state);
    for step in &script.steps {
        log::debug!("Replaying {:?}", step);
        match *step {
            Step::Drag(event) => overlay.handle_drag(event),
            Step::Tap(target) => overlay.tap(target),
            Step::TapTag(tag) => overlay.tap_action_tag(tag),
            Step::Align(edge) => overlay.align_to(edge),
            Step::Resize(bounds) => overlay.set_container_bounds(Some(bounds)),
        }
    }
}

fn load_script() -> Result<Script, DemoError> {
    match std::env::args().nth(1) {
        Some(path) => Script::load(Path::new(&path)),
        None => Ok(Script::builtin()),
    }
}

fn main() {
    env_logger::init();
    log::info!("Starting floatdock demo");

    let script = match load_script() {
        Ok(script) => script,
        Err(err) => {
            log::error!("{}", err);
            std::process::exit(1);
        }
    };

    let mut overlay = match FloatingOverlay::new(script.config.clone()) {
        Ok(overlay) => overlay,
        Err(err) => {
            log::error!("{}", err);
            std::process::exit(1);
        }
    };
    overlay.subscribe(HostController::new());

    run(&mut overlay, &script);

    let events = overlay.poll_events();
    log::info!("{} notifications fired", events.len());
    match serde_json::to_string_pretty(&overlay.layout()) {
        Ok(json) => println!("{}", json),
        Err(err) => log::error!("Failed to serialize layout: {}", err),
    }
}
