pub mod engine;

pub use engine::{next_batch, next_single, summarize, Summary};
