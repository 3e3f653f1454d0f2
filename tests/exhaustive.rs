use prover_sat::{
    config::{ClauseActivity, Config, InitialPhase},
    context::Context,
    reports::Report,
};

use rand::{rngs::StdRng, Rng, SeedableRng};

type Formula = Vec<Vec<i64>>;

/// A random formula over `variables` variables, of mostly three literal clauses.
/// No clause contains a variable twice.
fn random_formula(rng: &mut StdRng, variables: u32, clauses: usize) -> Formula {
    (0..clauses)
        .map(|_| {
            let length = match rng.random_bool(0.1) {
                true => rng.random_range(1..=2),
                false => 3,
            };

            let mut clause: Vec<i64> = Vec::with_capacity(length);
            while clause.len() < length {
                let variable = rng.random_range(1..=variables) as i64;
                if clause.iter().any(|literal| literal.abs() == variable) {
                    continue;
                }
                clause.push(match rng.random_bool(0.5) {
                    true => variable,
                    false => -variable,
                });
            }
            clause
        })
        .collect()
}

/// Satisfiability by truth table.
fn satisfiable_by_table(variables: u32, formula: &[Vec<i64>]) -> bool {
    (0..1_u64 << variables).any(|valuation| {
        formula.iter().all(|clause| {
            clause.iter().any(|literal| {
                let value = (valuation >> (literal.unsigned_abs() - 1)) & 1 == 1;
                value == (*literal > 0)
            })
        })
    })
}

fn solve_formula(config: Config, formula: &[Vec<i64>]) -> (Context, Report) {
    let mut ctx = Context::from_config(config);
    for clause in formula {
        let clause = clause
            .iter()
            .map(|int| ctx.literal_from_string(&int.to_string()))
            .collect::<Result<Vec<_>, _>>()
            .expect("literals");
        assert!(ctx.add_clause(clause).is_ok());
    }

    let report = ctx.solve().expect("solve");
    (ctx, report)
}

fn configs() -> Vec<Config> {
    let mut configs = vec![Config::default()];

    let mut glucose = Config::default();
    glucose.clause_activity.value = ClauseActivity::Glucose;
    configs.push(glucose);

    let mut restless = Config::default();
    restless.luby_u.value = 1;
    restless.initial_phase.value = InitialPhase::Positive;
    configs.push(restless);

    let mut forgetful = Config::default();
    forgetful.reduction_schedule.learnt_floor = 1;
    forgetful.reduction_schedule.learnt_divisor = 1000;
    forgetful.phase_saving.value = false;
    configs.push(forgetful);

    let mut traced = Config::default();
    traced.proof_tracing.value = true;
    traced.clause_activity.value = ClauseActivity::Glucose;
    traced.reduction_schedule.learnt_floor = 1;
    traced.reduction_schedule.learnt_divisor = 1000;
    configs.push(traced);

    configs
}

/// Checks the solve of `formula` on every configuration against the truth table.
fn check_formula(variables: u32, formula: &[Vec<i64>]) {
    let expected = satisfiable_by_table(variables, formula);

    for config in configs() {
        let tracing = config.proof_tracing.value;
        let (ctx, report) = solve_formula(config, formula);

        match expected {
            true => {
                assert_eq!(report, Report::Satisfiable, "{formula:?}");
                assert!(ctx.verify());

                let model = ctx.model().expect("model");
                for clause in formula {
                    assert!(clause.iter().any(|literal| {
                        model.value_of(&literal.unsigned_abs().to_string()) == Some(*literal > 0)
                    }));
                }
            }

            false => {
                assert_eq!(report, Report::Unsatisfiable, "{formula:?}");

                if tracing {
                    // Original identifiers follow the order of addition, as no clause is a tautology.
                    let core = ctx.core().expect("core");
                    assert!(!core.is_empty());
                    let core_formula = core
                        .iter()
                        .map(|id| formula[*id as usize - 1].clone())
                        .collect::<Vec<_>>();
                    assert!(!satisfiable_by_table(variables, &core_formula));
                }
            }
        }
    }
}

mod exhaustive {
    use super::*;

    #[test]
    fn small_random() {
        let mut rng = StdRng::seed_from_u64(0x5a7);

        for variables in 3..=12 {
            for _ in 0..12 {
                let clauses = (variables as f64 * 4.3) as usize;
                let formula = random_formula(&mut rng, variables, clauses);
                check_formula(variables, &formula);
            }
        }
    }

    #[test]
    fn dense_random() {
        let mut rng = StdRng::seed_from_u64(1337);

        for _ in 0..24 {
            let variables = rng.random_range(6..=14);
            let formula = random_formula(&mut rng, variables, variables as usize * 7);
            check_formula(variables, &formula);
        }
    }

    #[test]
    fn twenty_variables() {
        let mut rng = StdRng::seed_from_u64(20);

        for _ in 0..2 {
            let formula = random_formula(&mut rng, 20, 86);
            check_formula(20, &formula);
        }
    }
}
