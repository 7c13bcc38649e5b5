use tracing_subscriber::{filter::LevelFilter, fmt::format::Pretty, prelude::*};
use tracing_web::{performance_layer, MakeWebConsoleWriter};

#[cfg(debug_assertions)]
use crate::config::CONFIG;

cfg_if::cfg_if! {
    if #[cfg(debug_assertions)] {
        fn max_level() -> LevelFilter {
            LevelFilter::from_level(CONFIG.log_level)
        }
    } else {
        fn max_level() -> LevelFilter {
            LevelFilter::WARN
        }
    }
}

pub fn init_logger() {
    std::panic::set_hook(Box::new(tracing_panic::panic_hook));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .without_time()
        .with_writer(MakeWebConsoleWriter::new());

    let perf_layer = performance_layer().with_details_from_fields(Pretty::default());

    tracing_subscriber::registry()
        .with(max_level())
        .with(fmt_layer)
        .with(perf_layer)
        .init();
}
