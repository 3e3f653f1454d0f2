/*!
Configuration of a context.

All configuration for a context is contained within a [Config], given when the context is built.
Most options are [ConfigOption]s, which pair a value with a name and bounds.

The default configuration:
- Restarts on a luby sequence scaled by 100.
- Decides with phase saving, after an initial phase from Jeroslow-Wang weights.
- Bumps the activity of learnt clauses as they are used, and reduces the learnt clauses on a schedule.
- Decays scores every 256 decisions, by a right shift of 2.
*/

mod config_option;
pub use config_option::ConfigOption;

mod activity;
pub use activity::ClauseActivity;

mod phase;
pub use phase::InitialPhase;

use crate::generic::luby::LubyRepresentation;

/// The schedule of learnt clause reductions.
///
/// At the start of a solve the budget of learnt clauses is set to the larger of `learnt_floor` and the count of original clauses divided by `learnt_divisor`.
/// Then, after an interval of conflicts, the budget is scaled by `learnt_growth` and the interval is scaled by `enlarge_growth`.
/// The first interval is `enlarge_initial` conflicts, and no interval is shorter.
#[derive(Clone)]
pub struct ReductionSchedule {
    pub learnt_floor: usize,
    pub learnt_divisor: usize,
    /// A (numerator, denominator) pair.
    pub learnt_growth: (usize, usize),
    /// A (numerator, denominator) pair.
    pub enlarge_growth: (usize, usize),
    pub enlarge_initial: usize,
}

impl Default for ReductionSchedule {
    fn default() -> Self {
        ReductionSchedule {
            learnt_floor: 2000,
            learnt_divisor: 3,
            learnt_growth: (11, 10),
            enlarge_growth: (3, 2),
            enlarge_initial: 100,
        }
    }
}

/// The primary configuration structure.
#[derive(Clone)]
pub struct Config {
    /// How learnt clauses are scored.
    pub clause_activity: ConfigOption<ClauseActivity>,

    /// Every `decay_rate` decisions, scores are decayed.
    pub decay_rate: ConfigOption<usize>,

    /// Scores are decayed by a right shift of `decay_factor`.
    pub decay_factor: ConfigOption<u32>,

    /// The initial phase of a variable.
    pub initial_phase: ConfigOption<InitialPhase>,

    /// The `u` value to multiply the luby sequence by when determining whether to perform a restart.
    pub luby_u: ConfigOption<LubyRepresentation>,

    /// The maximum count of decisions, across solves, before a solve times out.
    pub max_decisions: ConfigOption<usize>,

    /// Default to the last set value of a variable when choosing a value for the variable.
    pub phase_saving: ConfigOption<bool>,

    /// Trace the derivations of learnt clauses, to support cores and refutations.
    pub proof_tracing: ConfigOption<bool>,

    /// Permit (scheduled) reductions of learnt clauses.
    pub reduction: ConfigOption<bool>,

    /// The schedule of reductions.
    pub reduction_schedule: ReductionSchedule,

    /// Permit (scheduled) restarts.
    pub restart: ConfigOption<bool>,

    /// Save scores and phases with each mark, and restore these on a pop.
    pub score_saving: ConfigOption<bool>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            clause_activity: ConfigOption {
                name: "clause_activity",
                min: ClauseActivity::MIN,
                max: ClauseActivity::MAX,
                value: ClauseActivity::MiniSAT,
            },

            decay_rate: ConfigOption {
                name: "decay_rate",
                min: 1,
                max: usize::MAX,
                value: 256,
            },

            decay_factor: ConfigOption {
                name: "decay_factor",
                min: 0,
                max: 31,
                value: 2,
            },

            initial_phase: ConfigOption {
                name: "initial_phase",
                min: InitialPhase::MIN,
                max: InitialPhase::MAX,
                value: InitialPhase::JeroslowWang,
            },

            luby_u: ConfigOption {
                name: "luby",
                min: 1,
                max: LubyRepresentation::MAX,
                value: 100,
            },

            max_decisions: ConfigOption {
                name: "max_decisions",
                min: 0,
                max: usize::MAX,
                value: 25_000_000,
            },

            phase_saving: ConfigOption {
                name: "phase_saving",
                min: false,
                max: true,
                value: true,
            },

            proof_tracing: ConfigOption {
                name: "proof_tracing",
                min: false,
                max: true,
                value: false,
            },

            reduction: ConfigOption {
                name: "reduction",
                min: false,
                max: true,
                value: true,
            },

            reduction_schedule: ReductionSchedule::default(),

            restart: ConfigOption {
                name: "restart",
                min: false,
                max: true,
                value: true,
            },

            score_saving: ConfigOption {
                name: "score_saving",
                min: false,
                max: true,
                value: false,
            },
        }
    }
}
