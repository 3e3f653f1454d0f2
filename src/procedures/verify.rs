/*!
Checks of, and views on, the formula and valuation of a context.

- [verify](Context::verify) checks every clause of the context has a true literal on the current valuation.
  This is a self-check, and plays no part in a solve.
- [model](Context::model) gives the satisfying valuation of a satisfiable formula, by name.
- [write_dimacs](Context::write_dimacs) writes the formula of the context in the DIMACS format.
*/

use std::io::Write;

use crate::{
    context::{Context, ContextState},
    structures::{literal::Literal, model::Model},
    types::err::{self},
};

impl Context {
    /// True if every clause in the context, original or learnt, has a true literal on the current valuation.
    pub fn verify(&self) -> bool {
        let true_literal = |literal: &Literal| self.variable_db.literal_value(*literal) == Some(true);

        self.clause_db.unit_facts().iter().all(true_literal)
            && self
                .watches
                .binary_clauses()
                .all(|clause| clause.iter().any(true_literal))
            && self
                .clause_db
                .original_clauses()
                .all(|clause| clause.literals().iter().any(true_literal))
            && self
                .clause_db
                .learnt_clauses()
                .all(|clause| clause.literals().iter().any(true_literal))
    }

    /// The satisfying valuation found by the most recent solve.
    ///
    /// Returns [ModelUnavailable](err::StateError::ModelUnavailable) unless the formula is known to be satisfiable.
    pub fn model(&self) -> Result<Model, err::ErrorKind> {
        if self.state != ContextState::Satisfiable {
            return Err(err::StateError::ModelUnavailable.into());
        }

        let mut model = Model::default();
        for literal in &self.trail.literals {
            model.push(
                self.variable_db.name_of(literal.variable()).to_string(),
                literal.polarity(),
            );
        }
        Ok(model)
    }

    /// Writes the formula of the context in the DIMACS format, with each variable written as its index.
    ///
    /// Unit facts are written first, then binary clauses, and then long original clauses.
    /// Learnt clauses are not written, excepting learnt unit and binary clauses.
    pub fn write_dimacs(&self, out: &mut impl Write) -> std::io::Result<()> {
        let units = self.clause_db.unit_facts();
        let binaries = self.watches.binary_clauses().collect::<Vec<_>>();
        let clause_count = units.len() + binaries.len() + self.clause_db.original_count();

        writeln!(out, "p cnf {} {clause_count}", self.variable_db.count())?;

        for literal in units {
            writeln!(out, "{} 0", literal.as_int())?;
        }

        for [a, b] in binaries {
            writeln!(out, "{} {} 0", a.as_int(), b.as_int())?;
        }

        for clause in self.clause_db.original_clauses() {
            for literal in clause.literals() {
                write!(out, "{} ", literal.as_int())?;
            }
            writeln!(out, "0")?;
        }

        Ok(())
    }
}
