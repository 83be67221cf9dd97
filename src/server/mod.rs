//! TCP listener and the worker pool that handles accepted connections.

pub mod listener;
pub mod pool;

pub use pool::WorkerPool;
