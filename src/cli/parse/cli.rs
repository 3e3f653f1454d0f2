use std::path::PathBuf;

use clap::{value_parser, Arg, Command};

use prover_sat::config::{ClauseActivity, Config, InitialPhase};

pub fn cli() -> Command {
    let defaults = Config::default();

    Command::new("prover_cli")
        .about("Determines whether a formula is satisfiable or unsatisfiable")
        .version(clap::crate_version!())

        .arg(Arg::new("paths")
            .required(true)
            .trailing_var_arg(true)
            .num_args(1..)
            .value_parser(value_parser!(PathBuf))
            .help("The DIMACS form CNF files to parse (as a single formula).")
            .long_help("The DIMACS form CNF files to parse (as a single formula).
Files with an 'xz' extension are decompressed, if built with the 'xz' feature."))

        .arg(Arg::new("core")
            .short('c')
            .long("core")
            .value_parser(value_parser!(bool))
            .required(false)
            .num_args(0)
            .help("Display an unsatisfiable core on finding a given formula is unsatisfiable.")
            .long_help("Display an unsatisfiable core on finding a given formula is unsatisfiable.
Implies '--trace'."))

        .arg(Arg::new("trace")
            .long("trace")
            .value_parser(value_parser!(bool))
            .required(false)
            .num_args(0)
            .help("Trace derivations, and display a TraceCheck refutation on finding a given formula is unsatisfiable."))

        .arg(Arg::new("model")
            .short('m')
            .long("model")
            .value_parser(value_parser!(bool))
            .required(false)
            .num_args(0)
            .help("Display the model on finding a given formula is satisfiable."))

        .arg(Arg::new("stats")
            .short('s')
            .long("stats")
            .value_parser(value_parser!(bool))
            .required(false)
            .num_args(0)
            .help("Display stats on completion."))

        .arg(Arg::new("no_reduction")
            .long("no-reduction")
            .value_parser(value_parser!(bool))
            .required(false)
            .num_args(0)
            .help("Prevent learnt clauses from being forgotten."))

        .arg(Arg::new("no_restarts")
            .long("no-restart")
            .value_parser(value_parser!(bool))
            .required(false)
            .num_args(0)
            .help("Prevent decisions from being forgotten."))

        .arg(Arg::new("no_phase_saving")
            .long("no-phase-saving")
            .value_parser(value_parser!(bool))
            .required(false)
            .num_args(0)
            .help("Decide on the initial phase of a variable, always."))

        .arg(Arg::new("luby")
            .long("luby")
            .short('l')
            .value_name("U")
            .value_parser(value_parser!(u32))
            .required(false)
            .num_args(1)
            .help(format!("The 'u' value to use for the luby calculation when restarts are permitted.
Default: {}", defaults.luby_u.value)))

        .arg(Arg::new("decay_rate")
            .long("decay-rate")
            .value_name("DECISIONS")
            .value_parser(value_parser!(usize))
            .required(false)
            .num_args(1)
            .help(format!("The count of decisions between decays of variable scores.
Default: {}", defaults.decay_rate.value)))

        .arg(Arg::new("decay_factor")
            .long("decay-factor")
            .value_name("SHIFT")
            .value_parser(value_parser!(u32))
            .required(false)
            .num_args(1)
            .help(format!("The right shift applied to variable scores on a decay.
Default: {}", defaults.decay_factor.value)))

        .arg(Arg::new("max_decisions")
            .long("max-decisions")
            .value_name("DECISIONS")
            .value_parser(value_parser!(usize))
            .required(false)
            .num_args(1)
            .help(format!("The count of decisions after which a solve is abandoned.
Default: {}", defaults.max_decisions.value)))

        .arg(Arg::new("clause_activity")
            .long("clause-activity")
            .value_name("VARIANT")
            .value_parser(clap::builder::ValueParser::new(clause_activity_parser))
            .required(false)
            .num_args(1)
            .help(format!("How to score learnt clauses.
Default: {}", defaults.clause_activity.value))
            .long_help(format!("How to score learnt clauses.
Default: {}

  - minisat: Bump the activity of learnt clauses used during analysis, and forget the least active first.
  - glucose: Score by literal block distance, and forget the highest first.", defaults.clause_activity.value)))

        .arg(Arg::new("initial_phase")
            .long("initial-phase")
            .value_name("PHASE")
            .value_parser(clap::builder::ValueParser::new(initial_phase_parser))
            .required(false)
            .num_args(1)
            .help(format!("The phase of a variable before any value is saved.
Default: {}", defaults.initial_phase.value))
            .long_help(format!("The phase of a variable before any value is saved.
Default: {}

  - negative
  - positive
  - jeroslow-wang: Weigh the clauses added before the first decision.", defaults.initial_phase.value)))
}

fn clause_activity_parser(arg: &str) -> Result<ClauseActivity, std::io::Error> {
    arg.parse().map_err(|_| {
        std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Unknown clause activity variant",
        )
    })
}

fn initial_phase_parser(arg: &str) -> Result<InitialPhase, std::io::Error> {
    arg.parse().map_err(|_| {
        std::io::Error::new(std::io::ErrorKind::NotFound, "Unknown initial phase")
    })
}
