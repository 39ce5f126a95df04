pub mod admin;
pub mod directory;
pub mod inventory;
pub mod ledger;

pub use admin::Administrable;
pub use directory::Directory;
pub use inventory::Inventory;
pub use ledger::Ledgered;
