//! Thin, typed wrappers over the browser WebGPU API.
//!
//! Descriptor structs are plain Rust builders that convert into their
//! `web_sys` counterparts via `From`, so callers rarely touch `JsValue`.

pub mod bind_groups;
pub mod buffers;
pub mod command;
pub mod error;
pub mod methods;
pub mod pipeline;
pub mod renderer;
pub mod texture;
