//! Command implementations
//!
//! Each command is a module with an execute function that takes parsed CLI args
//! and runs the operation against the loaded search engine.

pub mod fetch;
pub mod import;
pub mod list;
pub mod partner;
pub mod pick;
pub mod random;
pub mod search;
pub mod stats;

// Re-export execute functions for convenience
pub use fetch::execute as fetch;
pub use import::execute as import;
pub use list::execute as list;
pub use partner::execute as partner;
pub use pick::execute as pick;
pub use random::execute as random;
pub use search::{execute_closest as closest, execute_prefix as prefix, execute_search as search};
pub use stats::execute as stats;
