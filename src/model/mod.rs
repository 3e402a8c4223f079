//! Catalog model types.
//!
//! These are the output of parsing: a [`Catalog`] holds [`Record`]s in
//! document order, each stamped with the [`YearMonth`] of its section.

mod catalog;
mod record;

pub use catalog::{Catalog, CatalogStats};
pub use record::{Record, YearMonth, RESERVED_FIELDS};
