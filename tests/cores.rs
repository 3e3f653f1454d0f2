use prover_sat::{
    config::{ClauseActivity, Config},
    context::Context,
    reports::Report,
    structures::literal::Literal,
    types::err::{ErrorKind, ProofError},
};

use rand::{rngs::StdRng, Rng, SeedableRng};

fn tracing_config() -> Config {
    let mut config = Config::default();
    config.proof_tracing.value = true;
    config
}

fn context_from_ints(config: Config, clauses: &[&[i64]]) -> Context {
    let mut ctx = Context::from_config(config);
    for clause in clauses {
        let clause = clause
            .iter()
            .map(|int| int.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        let clause = ctx.clause_from_string(&clause).expect("clause");
        assert!(ctx.add_clause(clause).is_ok());
    }
    ctx
}

/// The clauses of the core of `ctx`, written by name with literals sorted.
fn core_strings(ctx: &Context) -> Vec<String> {
    let write_literal = |literal: &Literal| {
        let name = ctx.variable_db.name_of(literal.variable());
        match literal.polarity() {
            true => name.to_string(),
            false => format!("-{name}"),
        }
    };

    ctx.core_clauses()
        .expect("core")
        .iter()
        .map(|clause| {
            let mut literals = clause.iter().map(write_literal).collect::<Vec<_>>();
            literals.sort();
            literals.join(" ")
        })
        .collect()
}

/// True if the clauses, by name, are unsatisfiable.
fn unsatisfiable(clauses: &[String]) -> bool {
    let mut ctx = Context::from_config(Config::default());
    for clause in clauses {
        let clause = ctx.clause_from_string(clause).expect("clause");
        assert!(ctx.add_clause(clause).is_ok());
    }
    ctx.solve() == Ok(Report::Unsatisfiable)
}

mod cores {
    use super::*;

    #[test]
    fn pigeons_in_one_hole() {
        let mut ctx = context_from_ints(tracing_config(), &[&[1, 2], &[-1, -2], &[1], &[2]]);

        assert_eq!(ctx.solve(), Ok(Report::Unsatisfiable));
        assert_eq!(ctx.core(), Ok(vec![2, 3, 4]));

        let core = core_strings(&ctx);
        assert_eq!(core, vec!["-1 -2", "1", "2"]);
        assert!(unsatisfiable(&core));
    }

    #[test]
    fn tracecheck() {
        let mut ctx = context_from_ints(tracing_config(), &[&[1, 2], &[-1, -2], &[1], &[2]]);
        assert_eq!(ctx.solve(), Ok(Report::Unsatisfiable));

        let mut out = Vec::default();
        assert!(ctx.write_tracecheck(&mut out).is_ok());
        let out = String::from_utf8(out).expect("utf8");

        let lines = out.lines().collect::<Vec<_>>();
        assert_eq!(lines, vec!["5 -2 -1 0 0", "7 1 0 0", "9 2 0 0", "1 0 5 9 7 0"]);
    }

    #[test]
    fn tracecheck_with_deductions() {
        let mut ctx = context_from_ints(
            tracing_config(),
            &[&[1, 2], &[-1, 2], &[1, -2], &[-1, -2]],
        );
        assert_eq!(ctx.solve(), Ok(Report::Unsatisfiable));
        assert_eq!(ctx.core(), Ok(vec![1, 2, 3, 4]));

        let mut out = Vec::default();
        assert!(ctx.write_tracecheck(&mut out).is_ok());
        let out = String::from_utf8(out).expect("utf8");

        let lines = out.lines().collect::<Vec<_>>();
        assert_eq!(lines.last().map(|line| line.starts_with("1 0 ")), Some(true));

        // Every deduced clause is even, and every antecedent is written before use.
        let mut written = Vec::default();
        for line in lines {
            let mut ints = line.split_whitespace().map(|int| int.parse::<i64>().expect("int"));
            let id = ints.next().expect("id");
            let mut ints = ints.skip_while(|int| *int != 0).skip(1);
            for antecedent in ints.by_ref().take_while(|int| *int != 0) {
                assert!(written.contains(&antecedent));
            }
            written.push(id);
        }
        assert!(written.iter().any(|id| id % 2 == 0));
    }

    #[test]
    fn tags() {
        let mut ctx = Context::from_config(tracing_config());
        for (clause, name) in [("p q", "either"), ("-p", "not p"), ("r", "r"), ("-q", "not q")] {
            let clause = ctx.clause_from_string(clause).expect("clause");
            assert!(ctx.add_named_clause(clause, name).is_ok());
        }
        let clause = ctx.clause_from_string("-q r").expect("clause");
        assert!(ctx.add_clause(clause).is_ok());

        assert_eq!(ctx.solve(), Ok(Report::Unsatisfiable));
        assert_eq!(
            ctx.core_tags(),
            Ok(vec!["either".to_string(), "not p".to_string(), "not q".to_string()])
        );
    }

    #[test]
    fn empty_clause() {
        let mut ctx = Context::from_config(tracing_config());
        let clause = ctx.clause_from_string("p").expect("clause");
        assert!(ctx.add_clause(clause).is_ok());
        assert_eq!(ctx.add_clause(vec![]), Ok(false));

        assert_eq!(ctx.solve(), Ok(Report::Unsatisfiable));
        assert_eq!(ctx.core(), Ok(vec![2]));
    }

    #[test]
    fn unavailable() {
        let mut ctx = context_from_ints(Config::default(), &[&[1], &[-1]]);
        assert_eq!(ctx.solve(), Ok(Report::Unsatisfiable));
        assert_eq!(ctx.core(), Err(ErrorKind::Proof(ProofError::Disabled)));

        let mut ctx = context_from_ints(tracing_config(), &[&[1, 2], &[-1]]);
        assert_eq!(ctx.solve(), Ok(Report::Satisfiable));
        assert_eq!(ctx.core(), Err(ErrorKind::Proof(ProofError::NoRefutation)));

        let mut out = Vec::default();
        assert_eq!(
            ctx.write_tracecheck(&mut out),
            Err(ErrorKind::Proof(ProofError::NoRefutation))
        );
    }

    #[test]
    fn random_cores() {
        let mut rng = StdRng::seed_from_u64(41);
        let mut refutations = 0;

        for round in 0..40 {
            let mut config = tracing_config();
            if round % 2 == 0 {
                config.clause_activity.value = ClauseActivity::Glucose;
                config.reduction_schedule.learnt_floor = 8;
                config.reduction_schedule.enlarge_initial = 4;
            }

            let variables = 16;
            let clauses = (0..80)
                .map(|_| {
                    let mut clause: Vec<i64> = Vec::with_capacity(3);
                    while clause.len() < 3 {
                        let variable = rng.random_range(1..=variables);
                        if clause.iter().any(|int| int.abs() == variable) {
                            continue;
                        }
                        clause.push(match rng.random_bool(0.5) {
                            true => variable,
                            false => -variable,
                        });
                    }
                    clause
                })
                .collect::<Vec<_>>();
            let clause_refs = clauses.iter().map(|clause| clause.as_slice()).collect::<Vec<_>>();

            let mut ctx = context_from_ints(config, &clause_refs);
            match ctx.solve() {
                Ok(Report::Unsatisfiable) => {
                    refutations += 1;

                    let core = ctx.core().expect("core");
                    assert!(!core.is_empty());
                    assert!(core.iter().all(|id| *id >= 1 && *id <= 80));
                    assert!(unsatisfiable(&core_strings(&ctx)));

                    let mut out = Vec::default();
                    assert!(ctx.write_tracecheck(&mut out).is_ok());
                    let mut derivation = Vec::default();
                    assert!(ctx.write_derivation(&mut derivation).is_ok());
                }

                Ok(Report::Satisfiable) => {
                    assert!(ctx.verify());
                    assert_eq!(ctx.core(), Err(ErrorKind::Proof(ProofError::NoRefutation)));
                }

                other => panic!("unexpected {other:?}"),
            }
        }

        assert!(refutations > 0);
    }
}
