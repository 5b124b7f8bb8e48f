//! Part catalog implementations
//!
//! | Catalog | Parts |
//! |---------|-------|
//! | [`TypeCatalog`] | An explicit list of part types or definitions |
//! | [`AggregateCatalog`] | The union of other catalogs, in order |
//! | [`DiscoveredCatalog`] | Every part type submitted to `PART_TYPES` |

mod aggregate;
mod discovered;
mod type_catalog;

pub use aggregate::AggregateCatalog;
pub use discovered::DiscoveredCatalog;
pub use type_catalog::TypeCatalog;
