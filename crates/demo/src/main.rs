mod app;
mod config;
mod logger;
mod meshes;
mod physics;

use std::{cell::RefCell, rc::Rc};

use anyhow::{anyhow, Context, Result};
use awsm_unified_renderer::{debug::AwsmRendererLogging, AwsmRendererBuilder};
use wasm_bindgen::JsCast;
use web_sys::HtmlCanvasElement;

use crate::{app::App, config::CONFIG};

pub fn main() {
    wasm_bindgen_futures::spawn_local(async {
        if let Err(err) = init().await {
            tracing::error!("{err:?}");
        }
    });
}

async fn init() -> Result<()> {
    logger::init_logger();

    let window = web_sys::window().context("no window")?;
    let document = window.document().context("no document")?;
    let canvas: HtmlCanvasElement = document
        .get_element_by_id(CONFIG.canvas_id)
        .with_context(|| format!("no element with id {}", CONFIG.canvas_id))?
        .dyn_into()
        .map_err(|_| anyhow!("{} is not a canvas", CONFIG.canvas_id))?;

    canvas.set_width(canvas.client_width().max(1) as u32);
    canvas.set_height(canvas.client_height().max(1) as u32);

    let renderer = AwsmRendererBuilder::new(window.navigator().gpu(), canvas.clone())
        .with_config(CONFIG.renderer.clone())
        .with_logging(AwsmRendererLogging::default().with_render_timings(CONFIG.render_timings))
        .build()
        .await?;

    tracing::info!(
        "renderer ready, indirect draws {}",
        if renderer.indirect_supported() {
            "enabled"
        } else {
            "unavailable"
        }
    );

    let app = App::new(renderer, canvas)?;
    app::start(Rc::new(RefCell::new(app)));

    Ok(())
}
