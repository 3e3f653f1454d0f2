//! Generic structures, not specific to satisfiability.

pub mod index_heap;
pub mod luby;
pub mod stack;
