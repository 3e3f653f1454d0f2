/*!
Counts for various things which count, roughly, together with the schedules built on those counts.

- Restarts follow the [luby sequence](crate::generic::luby), scaled by the `luby_u` option of a [Config].
- Decisions are counted against the `max_decisions` option, and a decision beyond the budget is a timeout.
- Scores are decayed every `decay_rate` decisions.
- The budget of learnt clauses grows on the [reduction schedule](crate::config::ReductionSchedule).
*/

use std::time::Duration;

use crate::{config::Config, generic::luby::Luby, types::err};

/// Counts, and schedules.
pub struct Counters {
    /// A count of every conflict seen.
    pub total_conflicts: usize,

    /// A count of all decisions made.
    pub total_decisions: usize,

    /// The number of restarts.
    pub restarts: usize,

    /// The highest level reached.
    pub max_level: u32,

    /// A count of long clauses learnt.
    pub learnt_long: usize,

    /// A count of binary clauses learnt.
    pub learnt_binary: usize,

    /// A count of unit clauses learnt.
    pub learnt_unit: usize,

    /// A count of reductions.
    pub reductions: usize,

    /// A count of clauses deleted by reductions.
    pub deleted_clauses: usize,

    /// The budget of learnt clauses, before a reduction is due.
    pub learnt_budget: usize,

    /// The time taken by the most recent solve.
    pub time: Duration,

    /// Conflicts remaining before a restart is due.
    conflicts_until_restart: i64,

    /// The current length of the interval between enlargements of the budget.
    enlarge_interval: usize,

    /// Conflicts remaining before the budget is enlarged.
    conflicts_until_enlarge: i64,

    /// The luby sequence, positioned at the current restart interval.
    luby: Luby,
}

impl Counters {
    pub fn new(config: &Config) -> Self {
        let mut luby = Luby::default();
        let first_interval = luby.next().unwrap_or(1);
        let enlarge_initial = config.reduction_schedule.enlarge_initial;

        Counters {
            total_conflicts: 0,
            total_decisions: 0,
            restarts: 0,
            max_level: 0,

            learnt_long: 0,
            learnt_binary: 0,
            learnt_unit: 0,

            reductions: 0,
            deleted_clauses: 0,
            learnt_budget: 0,

            time: Duration::from_secs(0),

            conflicts_until_restart: first_interval as i64 * config.luby_u.value as i64,
            enlarge_interval: enlarge_initial,
            conflicts_until_enlarge: enlarge_initial as i64,
            luby,
        }
    }

    /// Notes a conflict, enlarging the learnt clause budget if the enlargement interval has passed.
    pub fn note_conflict(&mut self, config: &Config) {
        self.total_conflicts += 1;
        self.conflicts_until_restart -= 1;
        self.conflicts_until_enlarge -= 1;

        if self.conflicts_until_enlarge <= 0 {
            let schedule = &config.reduction_schedule;
            let (budget_numerator, budget_denominator) = schedule.learnt_growth;
            let (interval_numerator, interval_denominator) = schedule.enlarge_growth;

            self.learnt_budget = (self.learnt_budget * budget_numerator) / budget_denominator.max(1);
            self.enlarge_interval =
                (self.enlarge_interval * interval_numerator) / interval_denominator.max(1);
            self.conflicts_until_enlarge = schedule.enlarge_initial.max(self.enlarge_interval) as i64;
        }
    }

    /// True if enough conflicts have been seen since the last restart.
    pub fn restart_due(&self) -> bool {
        self.conflicts_until_restart <= 0
    }

    /// Notes a restart, and schedules the next restart.
    pub fn note_restart(&mut self, config: &Config) {
        self.restarts += 1;
        let interval = self.luby.next().unwrap_or(1);
        self.conflicts_until_restart = interval as i64 * config.luby_u.value as i64;
    }

    /// Notes a decision, or returns a timeout if the decision budget is exhausted.
    pub fn note_decision(&mut self, config: &Config) -> Result<(), err::ErrorKind> {
        if config.max_decisions.value <= self.total_decisions {
            return Err(err::ErrorKind::Timeout);
        }
        self.total_decisions += 1;
        Ok(())
    }

    /// True if scores should be decayed, given the count of decisions.
    pub fn decay_due(&self, config: &Config) -> bool {
        self.total_decisions % config.decay_rate.value.max(1) == 0
    }

    /// Notes the level reached by a decision.
    pub fn note_level(&mut self, level: u32) {
        self.max_level = self.max_level.max(level);
    }

    /// Sets the learnt clause budget from a count of original clauses, and restarts the enlargement schedule.
    pub fn set_learnt_budget(&mut self, config: &Config, original_clauses: usize) {
        let schedule = &config.reduction_schedule;
        self.learnt_budget = schedule
            .learnt_floor
            .max(original_clauses / schedule.learnt_divisor.max(1));
        self.enlarge_interval = schedule.enlarge_initial;
        self.conflicts_until_enlarge = schedule.enlarge_initial as i64;
    }

    /// Conflicts remaining before a restart is due.
    pub fn conflicts_until_restart(&self) -> i64 {
        self.conflicts_until_restart
    }

    /// Resets every count and schedule.
    pub fn reset(&mut self, config: &Config) {
        *self = Counters::new(config);
    }
}

impl std::fmt::Display for Counters {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "c Decisions:              {}", self.total_decisions)?;
        writeln!(f, "c Conflicts:              {}", self.total_conflicts)?;
        writeln!(f, "c Restarts:               {}", self.restarts)?;
        writeln!(f, "c Learnt clauses:         {}", self.learnt_long)?;
        writeln!(f, "c Learnt binary clauses:  {}", self.learnt_binary)?;
        writeln!(f, "c Learnt unit clauses:    {}", self.learnt_unit)?;
        writeln!(f, "c Reductions:             {}", self.reductions)?;
        writeln!(f, "c Deleted clauses:        {}", self.deleted_clauses)?;
        writeln!(f, "c Learnt clause budget:   {}", self.learnt_budget)?;
        write!(f, "c Max. level:             {}", self.max_level)
    }
}
