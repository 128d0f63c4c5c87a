pub mod state;

pub use state::{sort_tokens, PoolSnapshot, PoolStateReader, TickInfo};
