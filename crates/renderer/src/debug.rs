#[derive(Debug, Clone, Default)]
pub struct AwsmRendererLogging {
    // wraps gpu writes and frame submission in tracing spans
    pub render_timings: bool,
}

impl AwsmRendererLogging {
    pub fn with_render_timings(mut self, render_timings: bool) -> Self {
        self.render_timings = render_timings;
        self
    }
}
