use std::sync::LazyLock;

use awsm_unified_renderer::config::RendererConfig;

#[derive(Debug, Clone)]
pub struct Config {
    pub canvas_id: &'static str,
    pub log_level: tracing::Level,
    pub render_timings: bool,
    pub renderer: RendererConfig,
    pub ball_count: usize,
    pub crate_count: usize,
    pub grid_size: f32,
    pub grid_divisions: u32,
    pub camera_distance: f32,
    // radians per millisecond
    pub camera_orbit_speed: f32,
}

pub static CONFIG: LazyLock<Config> = LazyLock::new(|| Config {
    canvas_id: "canvas",
    log_level: if cfg!(debug_assertions) {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    },
    render_timings: false,
    renderer: RendererConfig::default(),
    ball_count: 40,
    crate_count: 6,
    grid_size: 40.0,
    grid_divisions: 20,
    camera_distance: 30.0,
    camera_orbit_speed: 0.0001,
});
