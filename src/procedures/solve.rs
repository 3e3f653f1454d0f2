//! Determines the satisfiability of the formula in a context.
//!
//! # Overview
//!
//! A solve alternates between propagation and decisions, with conflicts as the point of interest:
//!
//! ```none
//!           +--------+
//!   +-------| decide |-----> satisfiable, if every variable has a value
//!   |       +--------+
//!   |            ⌃
//!   |            | if no conflict is found
//!   ⌄            |
//! --+-->+-----+--+                 +-----> unsatisfiable, if the conflict is at level zero
//!   ⌃   | bcp |--------------------+
//!   |   +-----+   on a conflict    |
//!   |                              ⌄
//!   |                    +-----------------+
//!   +--------------------| handle_conflict |
//!                        +-----------------+
//! ```
//!
//! Further, before each decision the learnt clause database may be [reduced](crate::procedures::reduction), if the count of learnt clauses, less the count of values, exceeds the budget of the [counters](crate::context::Counters).
//!
//! A solve with a known result returns the result without further work.
//! Otherwise, the solve continues from the current trail.
//! In particular, a solve interrupted by a [Timeout](crate::types::err::ErrorKind::Timeout) may be resumed, with a larger decision budget.
//!
//! # Example
//!
//! ```rust
//! # use prover_sat::{config::Config, context::Context, reports::Report};
//! let mut the_context = Context::from_config(Config::default());
//!
//! for clause in ["a b c", "-a -b", "-a -c", "-b -c", "a -b", "b -c"] {
//!     let clause = the_context.clause_from_string(clause).unwrap();
//!     assert!(the_context.add_clause(clause).is_ok());
//! }
//!
//! assert_eq!(the_context.solve(), Ok(Report::Satisfiable));
//! assert!(the_context.verify());
//! ```

use std::time::Instant;

use crate::{
    context::{Context, ContextState},
    misc::log::targets::{self},
    reports::Report,
    types::err::{self},
};

impl Context {
    /// Determines the satisfiability of the formula in the context.
    ///
    /// For documentation, see [procedures::solve](crate::procedures::solve).
    pub fn solve(&mut self) -> Result<Report, err::ErrorKind> {
        let time = Instant::now();
        let result = self.solve_from_trail();
        self.counters.time = time.elapsed();

        if let Ok(report) = &result {
            log::info!(target: targets::DECISION, "Solve: {report} in {:.2?}", self.counters.time);
        }
        result
    }

    fn solve_from_trail(&mut self) -> Result<Report, err::ErrorKind> {
        match self.state {
            ContextState::Unsatisfiable | ContextState::Satisfiable => return Ok(self.report()),
            ContextState::Unknown => {}
        }

        self.counters
            .set_learnt_budget(&self.config, self.clause_db.original_count());

        loop {
            if !self.bcp()? {
                if self.trail.level() == 0 {
                    self.state = ContextState::Unsatisfiable;
                    self.derive_refutation()?;
                    return Ok(self.report());
                }

                self.handle_conflict()?;
                if self.state == ContextState::Unsatisfiable {
                    return Ok(self.report());
                }
                continue;
            }

            if self.config.reduction.value
                && self
                    .clause_db
                    .learnt_count()
                    .saturating_sub(self.trail.len())
                    > self.counters.learnt_budget
            {
                self.reduce_learnt()?;
            }

            if !self.decide()? {
                self.state = ContextState::Satisfiable;
                return Ok(self.report());
            }
        }
    }
}
