//! Session storage adapters: process memory and a JSON file on disk.

mod file;
mod memory;

pub use file::FileSessionStorage;
pub use memory::MemorySessionStorage;
