pub mod config;
pub mod names;
pub mod queue;
pub mod storage;
pub mod undo;
