//! Page surface adapters.

mod recording;
mod tracing;

pub use self::tracing::TracingSurface;
pub use recording::{RecordingSurface, SurfaceOp};
