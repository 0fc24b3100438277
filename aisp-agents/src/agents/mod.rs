//! AISP Agents
//!
//! An agent is built per request from the instruction text bound to a route
//! and answers a single payload.
//!
//! # Agent Types
//!
//! - `EchoAgent`: returns `{"echo": <payload>}` without consulting a model

pub mod echo;
pub mod traits;

pub use echo::*;
pub use traits::*;
