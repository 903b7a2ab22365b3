pub mod config;
pub mod fetch;
pub mod merge;
pub mod pipeline;
pub mod process;
pub mod record;
