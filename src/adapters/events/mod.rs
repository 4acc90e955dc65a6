//! Page event adapters.

mod in_memory;
mod tracing;

pub use self::tracing::TracingPageEvents;
pub use in_memory::InMemoryPageEvents;
