pub mod artist;
pub mod batch;
pub mod config;

pub use artist::run_artist;
pub use batch::run_batch;
