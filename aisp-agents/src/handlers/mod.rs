//! Component Route Handlers
//!
//! Route synthesis runs once at startup: every ready component becomes a
//! [`RouteDescriptor`] carrying its path and bound instruction. A
//! [`ComponentHandler`] then serves one descriptor, building a fresh agent
//! per request.

pub mod component;
pub mod synthesis;

pub use component::*;
pub use synthesis::*;
