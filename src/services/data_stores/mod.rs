mod in_memory_block_store;
mod postgres_block_store;

pub use in_memory_block_store::*;
pub use postgres_block_store::*;
