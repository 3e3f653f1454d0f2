//! A library for determining the satisfiability of boolean formulas written in conjunctive normal form.
//!
//! prover_sat is a conflict-driven clause-learning solver, with support for incremental use through marks, tracing of derivations for unsatisfiable cores and refutations, and a decision stack for knowledge compilation.
//!
//! # Orientation
//!
//! The library is designed around the core structure of a [context].
//!
//! Contexts are built from a [configuration](crate::config).
//! Clauses may be added through the [DIMACS](crate::context::Context::read_dimacs) representation of a formula or [programatically](crate::context::Context::add_clause).
//!
//! Internally, a solve is viewed in terms of a handful of [databases](crate::db):
//! - A formula is stored in a clause database, together with watch lists.
//! - A valuation is stored in a variable database, and in order on a trail.
//!
//! Useful starting points, then, may be:
//! - The high-level [solve procedure](crate::procedures::solve) to inspect the dynamics of a solve.
//! - The [database module](crate::db) to inspect the data considered during a solve.
//! - The [structures] to familiarise yourself with the abstract elements of a solve.
//! - The [configuration](crate::config) to see what features are supported.
//!
//! # Examples
//!
//! + Find (a count of) all valuations of some collection of variables.
//!
//! ```rust
//! # use prover_sat::config::Config;
//! # use prover_sat::context::Context;
//! # use prover_sat::reports::Report;
//! use prover_sat::structures::literal::Literal;
//!
//! let mut the_context = Context::from_config(Config::default());
//! let names = ["m", "o", "d", "e", "l"];
//! for name in names {
//!     assert!(the_context.fresh_variable(Some(name)).is_ok());
//! }
//!
//! let mut count = 0;
//!
//! loop {
//!     match the_context.solve() {
//!         Ok(Report::Satisfiable) => {}
//!         _ => break,
//!     }
//!
//!     count += 1;
//!
//!     let blocking_clause = the_context
//!         .trail
//!         .literals
//!         .iter()
//!         .map(|literal| -*literal)
//!         .collect::<Vec<Literal>>();
//!
//!     match the_context.add_clause(blocking_clause) {
//!         Ok(true) => {}
//!         _ => break,
//!     }
//! }
//!
//! assert_eq!(count, 2_usize.pow(names.len() as u32));
//! ```
//!
//! + Parse and solve a DIMACS formula.
//!
//! ```rust
//! # use prover_sat::context::Context;
//! # use prover_sat::config::Config;
//! # use prover_sat::reports::Report;
//! # use std::io::Write;
//! let mut the_context = Context::from_config(Config::default());
//!
//! let mut dimacs = vec![];
//! let _ = dimacs.write(b"
//!  1  2 0
//! -1  2 0
//! -1 -2 0
//!  1 -2 0
//! ");
//!
//! assert!(the_context.read_dimacs(dimacs.as_slice()).is_ok());
//! assert_eq!(the_context.solve(), Ok(Report::Unsatisfiable));
//! ```
//!
//! # Logs
//!
//! To help diagnose issues calls to [log!](log) are made throughout, with targets to narrow output to relevant parts of the library.
//! The targets are listed in [misc::log].
//!
//! For example, when used with [env_logger](https://docs.rs/env_logger/latest/env_logger/):
//! - Logs related to [the clause database](crate::db::clause) can be filtered with `RUST_LOG=clause_db …` or,
//! - Logs of reductions can be found with `RUST_LOG=reduction=info …`

#![allow(clippy::single_match)]
#![allow(clippy::collapsible_else_if)]

pub mod builder;
pub mod procedures;

pub mod config;
pub mod context;
pub mod reports;
pub mod structures;
pub mod types;

pub mod generic;

pub mod db;
pub mod proof;

pub mod misc;
