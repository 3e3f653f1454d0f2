/*!
Databases for holding information relevant to a solve.

- [Variables](variable), with values, reasons, phases, and scores.
- [Clauses](clause), as unit facts and long clauses.
- [Watches](watches), for both binary and long clauses.
- The [trail](trail) of values, and the current level.

The databases are fields of a [context](crate::context), and procedures on a context combine them.
As fields, the databases may be borrowed independently, e.g. a clause may be mutated while the values of variables are read.
*/

pub mod clause;
pub mod keys;
pub mod trail;
pub mod variable;
pub mod watches;

/// The index of a level.
pub type LevelIndex = u32;
