use std::path::PathBuf;

use clap::ArgMatches;

use prover_sat::config::{ClauseActivity, Config, ConfigOption, InitialPhase};

/// Options of the cli, distinct from the configuration of a context.
#[derive(Clone, Default)]
pub struct ConfigIO {
    pub files: Vec<PathBuf>,
    pub show_core: bool,
    pub show_model: bool,
    pub show_stats: bool,
    pub trace: bool,
}

impl ConfigIO {
    pub fn from_args(args: &ArgMatches) -> Self {
        let flag = |id: &str| matches!(args.try_get_one::<bool>(id), Ok(Some(true)));

        ConfigIO {
            files: args
                .get_many::<PathBuf>("paths")
                .map(|paths| paths.cloned().collect())
                .unwrap_or_default(),
            show_core: flag("core"),
            show_model: flag("model"),
            show_stats: flag("stats"),
            trace: flag("trace"),
        }
    }
}

fn set_or_warn<T: Clone + PartialOrd + std::fmt::Display>(option: &mut ConfigOption<T>, value: T) {
    if !option.set(value.clone()) {
        let (min, max) = option.min_max();
        println!("c {value} is outside the bounds of {} ({min} to {max}), and was ignored", option.name);
    }
}

pub fn config_from_args(args: &ArgMatches, config_io: &ConfigIO) -> Config {
    let mut the_config = Config::default();

    if let Ok(Some(u)) = args.try_get_one::<u32>("luby") {
        set_or_warn(&mut the_config.luby_u, *u);
    };

    if let Ok(Some(rate)) = args.try_get_one::<usize>("decay_rate") {
        set_or_warn(&mut the_config.decay_rate, *rate);
    };

    if let Ok(Some(factor)) = args.try_get_one::<u32>("decay_factor") {
        set_or_warn(&mut the_config.decay_factor, *factor);
    };

    if let Ok(Some(decisions)) = args.try_get_one::<usize>("max_decisions") {
        set_or_warn(&mut the_config.max_decisions, *decisions);
    };

    if let Ok(Some(activity)) = args.try_get_one::<ClauseActivity>("clause_activity") {
        the_config.clause_activity.value = *activity;
    };

    if let Ok(Some(phase)) = args.try_get_one::<InitialPhase>("initial_phase") {
        the_config.initial_phase.value = *phase;
    };

    if let Ok(Some(true)) = args.try_get_one::<bool>("no_restarts") {
        the_config.restart.value = false;
    };

    if let Ok(Some(true)) = args.try_get_one::<bool>("no_reduction") {
        the_config.reduction.value = false;
    };

    if let Ok(Some(true)) = args.try_get_one::<bool>("no_phase_saving") {
        the_config.phase_saving.value = false;
    };

    if config_io.trace || config_io.show_core {
        the_config.proof_tracing.value = true;
    }

    the_config
}
