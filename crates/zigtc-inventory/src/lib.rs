mod inventory;
mod reconcile;

pub use inventory::Inventory;
pub use reconcile::{archive_file_name, reconcile, DirEntryInfo, Observations};
