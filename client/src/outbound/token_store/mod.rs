//! Token store adapters.

mod file;
mod memory;

pub use file::{FileTokenStore, TOKEN_KEY};
pub use memory::MemoryTokenStore;
