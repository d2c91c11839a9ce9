//! Sample MID catalog.
//!
//! These entries are thin declarations against the framework in
//! [`crate::protocol`]: each supplies its MID number, its per-revision
//! field layout and typed accessors, nothing else. The framework never
//! depends on this module — downstream crates register their own types
//! with a [`MidCatalog`] the same way [`default_catalog`] does here.

pub mod alarm;
pub mod communication;
pub mod job;
pub mod keep_alive;
pub mod tool;

pub use alarm::Mid0070;
pub use communication::{CommandError, Mid0001, Mid0004, Mid0005};
pub use job::Mid0038;
pub use keep_alive::Mid9999;
pub use tool::Mid0262;

use crate::protocol::dispatch::MidCatalog;
use crate::protocol::error::ProtocolError;

/// Catalog with every built-in MID type registered.
pub fn default_catalog() -> Result<MidCatalog, ProtocolError> {
    let mut catalog = MidCatalog::new();
    catalog.register::<Mid0001>()?;
    catalog.register::<Mid0004>()?;
    catalog.register::<Mid0005>()?;
    catalog.register::<Mid0038>()?;
    catalog.register::<Mid0070>()?;
    catalog.register::<Mid0262>()?;
    catalog.register::<Mid9999>()?;
    Ok(catalog)
}
