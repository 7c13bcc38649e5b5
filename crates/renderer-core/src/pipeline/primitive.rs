//! How vertices are assembled into triangles.
//! https://developer.mozilla.org/en-US/docs/Web/API/GPUDevice/createRenderPipeline#primitive

pub type PrimitiveTopology = web_sys::GpuPrimitiveTopology;
pub type FrontFace = web_sys::GpuFrontFace;
// https://docs.rs/web-sys/latest/web_sys/enum.GpuCullMode.html
pub type CullMode = web_sys::GpuCullMode;
// https://docs.rs/web-sys/latest/web_sys/enum.GpuIndexFormat.html
pub type IndexFormat = web_sys::GpuIndexFormat;

/// Every field is always written to the descriptor.
/// The default is the WebGPU default: a counter-clockwise triangle list with no culling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrimitiveState {
    pub topology: PrimitiveTopology,
    pub front_face: FrontFace,
    pub cull_mode: CullMode,
}

impl Default for PrimitiveState {
    fn default() -> Self {
        Self {
            topology: PrimitiveTopology::TriangleList,
            front_face: FrontFace::Ccw,
            cull_mode: CullMode::None,
        }
    }
}

impl PrimitiveState {
    /// Indexed triangle lists, counter-clockwise front faces
    pub fn triangle_list(cull_mode: CullMode) -> Self {
        Self {
            cull_mode,
            ..Self::default()
        }
    }
}

impl From<PrimitiveState> for web_sys::GpuPrimitiveState {
    fn from(state: PrimitiveState) -> web_sys::GpuPrimitiveState {
        let state_js = web_sys::GpuPrimitiveState::new();
        state_js.set_topology(state.topology);
        state_js.set_front_face(state.front_face);
        state_js.set_cull_mode(state.cull_mode);

        state_js
    }
}
