//! Specification Store Clients
//!
//! The `components` and `aisp_raw` tables are reached through the
//! [`ComponentStore`] trait. [`SupabaseClient`] talks to the hosted store over
//! its REST interface; [`MemoryStore`] keeps rows in process.

pub mod memory;
pub mod store;
pub mod supabase;

pub use memory::*;
pub use store::*;
pub use supabase::*;
