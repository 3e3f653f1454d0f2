/*!
Abstract elements of a solve and their representation.

- [Literals](literal) pair a variable with a polarity.
- [Variables](variable) record values, the reasons for values, and phases.
- [Reasons](reason) justify the values on a trail.
- [Models](model) record satisfying assignments by name.

Clauses, when stored, are [database clauses](crate::db::clause::db_clause).
*/

pub mod literal;
pub mod model;
pub mod reason;
pub mod variable;
