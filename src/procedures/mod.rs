//! Various procedures for mutating a context.
//!
//! For the most part these are methods accessed via a context, and primarily placed here for documentation.

pub mod analysis;
pub mod assignment;
pub mod backjump;
pub mod bcp;
pub mod conflict;
pub mod decision;
pub mod decision_stack;
pub mod incremental;
pub mod reduction;
pub mod solve;
pub mod verify;
