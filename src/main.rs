use std::env;

use anyhow::bail;
use ribbon_ink::{
    batch::{Batch, Renderer},
    config::Config,
    controller::InputController,
    replay::Replay,
};

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_module(env!("CARGO_CRATE_NAME"), log::LevelFilter::Debug)
        .parse_default_env()
        .init();

    let (config, replay) = match &*env::args_os().skip(1).collect::<Vec<_>>() {
        [config, gestures] => (Config::load(config)?, Replay::load(gestures)?),
        _ => {
            bail!(
                "usage: {} <config.toml> <gestures.toml>",
                env!("CARGO_PKG_NAME")
            );
        }
    };

    let mut controller = InputController::new(&config);
    let batcher = config.batcher();
    let mut renderer = LogRenderer::default();
    for gesture in &replay.gestures {
        if let Some(index) = gesture.edit {
            controller.begin_editing(index)?;
        }
        for event in gesture.events() {
            // Geometry is rebuilt from scratch whenever a sample is accepted.
            if controller.handle(event) {
                batcher.render(controller.store(), config.render_mode, &mut renderer);
            }
        }
        if gesture.edit.is_some() {
            controller.end_editing();
        }
    }

    let store = controller.store();
    log::info!(
        "replayed {} gestures: {} strokes, {} samples, {} draw calls ({} vertices)",
        replay.gestures.len(),
        store.len(),
        store.sample_count(),
        renderer.draws,
        renderer.vertices,
    );
    Ok(())
}

/// Stands in for a GPU backend by logging what would be uploaded.
#[derive(Default)]
struct LogRenderer {
    draws: usize,
    vertices: usize,
}

impl Renderer for LogRenderer {
    fn draw(&mut self, batch: &Batch) {
        self.draws += 1;
        self.vertices += batch.vertex_count();
        log::trace!(
            "draw {:?} ({:?}): {} vertices, {} position bytes, {} radius bytes, {} color bytes",
            batch.primitive,
            batch.primitive.topology(),
            batch.vertex_count(),
            batch.position_bytes().len(),
            batch.radius_bytes().map_or(0, <[u8]>::len),
            batch.color_bytes().len(),
        );
    }
}
