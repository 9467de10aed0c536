//! Data models
//!
//! Shared between the engine and its presentation layer. Every type
//! round-trips through JSON unchanged; that JSON is also the persisted form.

pub mod cart;
pub mod category;
pub mod daily_report;
pub mod dining_table;
pub mod order;
pub mod product;
pub mod sale;
pub mod session;

// Re-exports
pub use cart::*;
pub use category::*;
pub use daily_report::*;
pub use dining_table::*;
pub use order::*;
pub use product::*;
pub use sale::*;
pub use session::*;
