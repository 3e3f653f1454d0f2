use prover_sat::{
    config::{ClauseActivity, Config},
    context::Context,
    reports::Report,
};

use rand::{rngs::StdRng, Rng, SeedableRng};

/// The pigeonhole formula of `pigeons` pigeons and `holes` holes.
fn pigeonhole(config: Config, pigeons: usize, holes: usize) -> Context {
    let mut ctx = Context::from_config(config);

    for pigeon in 0..pigeons {
        let clause = (0..holes)
            .map(|hole| format!("p{pigeon}h{hole}"))
            .collect::<Vec<_>>()
            .join(" ");
        let clause = ctx.clause_from_string(&clause).expect("clause");
        assert!(ctx.add_clause(clause).is_ok());
    }

    for hole in 0..holes {
        for a in 0..pigeons {
            for b in a + 1..pigeons {
                let clause = format!("-p{a}h{hole} -p{b}h{hole}");
                let clause = ctx.clause_from_string(&clause).expect("clause");
                assert!(ctx.add_clause(clause).is_ok());
            }
        }
    }

    ctx
}

fn random_context(config: Config, rng: &mut StdRng, variables: u32, clauses: usize) -> Context {
    let mut ctx = Context::from_config(config);
    for _ in 0..clauses {
        let mut clause = Vec::with_capacity(3);
        while clause.len() < 3 {
            let variable = rng.random_range(1..=variables);
            if clause.iter().any(|(v, _)| *v == variable) {
                continue;
            }
            clause.push((variable, rng.random_bool(0.5)));
        }

        let clause = clause
            .into_iter()
            .map(|(variable, polarity)| match polarity {
                true => format!("{variable}"),
                false => format!("-{variable}"),
            })
            .collect::<Vec<_>>()
            .join(" ");
        let clause = ctx.clause_from_string(&clause).expect("clause");
        assert!(ctx.add_clause(clause).is_ok());
    }
    ctx
}

fn eager_restarts() -> Config {
    let mut config = Config::default();
    config.luby_u.value = 1;
    config
}

mod luby {
    use super::*;

    #[test]
    fn pigeonholes_with_eager_restarts() {
        for (pigeons, holes) in [(3, 2), (4, 3), (5, 4)] {
            let mut ctx = pigeonhole(eager_restarts(), pigeons, holes);
            assert_eq!(ctx.solve(), Ok(Report::Unsatisfiable));
            assert!(ctx.counters.total_conflicts > 0);
        }

        let mut ctx = pigeonhole(eager_restarts(), 5, 4);
        assert_eq!(ctx.solve(), Ok(Report::Unsatisfiable));
        assert!(ctx.counters.restarts > 0);
    }

    #[test]
    fn pigeons_fit() {
        let mut ctx = pigeonhole(eager_restarts(), 5, 5);
        assert_eq!(ctx.solve(), Ok(Report::Satisfiable));
        assert!(ctx.verify());
    }

    #[test]
    fn verdicts_agree() {
        let mut rng = StdRng::seed_from_u64(97);

        for _ in 0..24 {
            let seed = rng.random::<u64>();

            let mut eager = random_context(eager_restarts(), &mut StdRng::seed_from_u64(seed), 30, 128);
            let mut standard =
                random_context(Config::default(), &mut StdRng::seed_from_u64(seed), 30, 128);

            let mut never = Config::default();
            never.restart.value = false;
            let mut never = random_context(never, &mut StdRng::seed_from_u64(seed), 30, 128);

            let eager_report = eager.solve();
            assert_eq!(eager_report, standard.solve());
            assert_eq!(eager_report, never.solve());
            assert_eq!(never.counters.restarts, 0);

            if eager_report == Ok(Report::Satisfiable) {
                assert!(eager.verify());
                assert!(standard.verify());
                assert!(never.verify());
            }
        }
    }

    #[test]
    fn glucose_with_eager_restarts() {
        let mut config = eager_restarts();
        config.clause_activity.value = ClauseActivity::Glucose;

        let mut ctx = pigeonhole(config, 6, 5);
        assert_eq!(ctx.solve(), Ok(Report::Unsatisfiable));
        assert!(ctx.counters.restarts > 0);
    }
}
