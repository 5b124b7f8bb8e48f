//! In-memory component container
//!
//! Registrations are collected by a [`ContainerBuilder`] and frozen into a
//! [`Container`] whose root [`LifetimeScope`] resolves them.
//!
//! Resolution semantics:
//!
//! - single-service resolution picks the last registration for the service
//! - single-instance registrations are built at most once per container,
//!   also under concurrent resolution
//! - activating hooks run before an instance is handed out or cached
//! - activated hooks run when the outermost resolution completes, only for
//!   instances created during it
//! - a registration resolved again while it is still being built fails
//!   with `CircularDependency`
//! - scope-owned instances are released when their scope is disposed;
//!   single instances are released with the root scope

mod builder;
mod operation;
mod scope;
mod store;

pub use builder::ContainerBuilder;
pub use scope::{Container, LifetimeScope};
