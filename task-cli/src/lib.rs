pub mod clock;
pub mod collection;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod store;
pub mod task;

pub use collection::TaskCollection;
pub use error::StoreError;
pub use store::TaskStore;
pub use task::{Status, Task, Timestamp};
