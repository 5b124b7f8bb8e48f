//! # Domain Layer
//!
//! Types and ports shared by the catalog model, the registry model and the
//! bridge between them. No composition logic lives here.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`constants`] | Reserved metadata keys, identity formatting |
//! | [`error`] | Error type and `Result` alias |
//! | [`identity`] | Process-wide type identity cache |
//! | [`ports`] | Catalog and registry interfaces |
//! | [`value_objects`] | Contract names, services, metadata, policies |

pub mod constants;
pub mod error;
pub mod identity;
pub mod ports;
pub mod value_objects;

pub use error::{Error, Result};
pub use identity::{TypeIdentityCache, format_type_identity, type_identity};
pub use ports::*;
pub use value_objects::*;
