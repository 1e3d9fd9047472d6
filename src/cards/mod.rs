//! Card system: catalog, pack pools, odds, and pack opening.

pub mod catalog;
pub mod odds;
pub mod opening;
pub mod packs;
pub mod types;

pub use catalog::*;
pub use odds::*;
pub use opening::*;
pub use packs::*;
pub use types::*;
