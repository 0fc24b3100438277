//! Component Contracts
//!
//! Row shapes of the specification store and the request body accepted by
//! every synthesized component route.

pub mod component;
pub mod payload;

pub use component::*;
pub use payload::*;
