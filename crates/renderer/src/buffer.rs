pub mod growable;

pub use growable::{BufferCapacity, GrowableBuffer};
