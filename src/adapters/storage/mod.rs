//! Token store adapters.

mod file;
mod in_memory;

pub use file::FileTokenStore;
pub use in_memory::InMemoryTokenStore;
