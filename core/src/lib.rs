pub mod config;
pub mod errors;
pub mod context;
pub mod model;
pub mod ext;
pub mod cache;
pub mod selector;

pub mod ledger;
pub mod transition;
pub mod traits;

pub use context::Context;
pub use config::Config;
pub use errors::DepotResult as Result;
pub use errors::DepotError as Error;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
