/*!
Recovery from a conflict found during a solve.

The conflict is [analysed](crate::procedures::analysis), and the learnt clause is stored after a backjump to the level at which the clause is asserting.

Each conflict counts toward the restart schedule of the [counters](crate::context::Counters).
If a restart is due the context backjumps to level zero before the learnt clause is stored, and the asserted literal of the clause is only assigned if the clause is asserting at level zero.
Otherwise, the literal will be found again by propagation, if still of interest.
*/

use crate::{
    context::Context,
    misc::log::targets::{self},
    types::err::{self},
};

impl Context {
    /// Analyses the recorded conflict, learns a clause, and asserts the clause if no restart was made.
    pub fn handle_conflict(&mut self) -> Result<(), err::ErrorKind> {
        let analysis = self.analyse_conflict()?;
        self.counters.note_conflict(&self.config);

        let restart = self.config.restart.value && self.counters.restart_due();
        if restart {
            self.backjump(0);
            self.counters.note_restart(&self.config);
            log::debug!(target: targets::RESTART, "Restart {}", self.counters.restarts);
        }

        let Some(asserted) = analysis.literals.first().copied() else {
            return Err(err::AnalysisError::NoConflict.into());
        };
        let backjump_level = analysis.backjump_level;

        if let Some(reason) = self.store_learnt(analysis)? {
            if (!restart || backjump_level == 0) && !self.assign(asserted, reason) {
                log::error!(target: targets::ANALYSIS, "Learnt clause asserts a false literal {asserted}");
                return Err(err::BCPError::CorruptWatch.into());
            }
        }

        Ok(())
    }
}
