use std::collections::HashMap;

use prover_sat::{
    config::{ClauseActivity, Config},
    context::Context,
    db::keys::ClauseKey,
    reports::Report,
    structures::reason::Reason,
    types::err::ErrorKind,
};

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

/// Checks every clause reason on the trail is stored, and that the references of each learnt clause count its uses as a reason.
fn references_agree(ctx: &Context) {
    let mut uses: HashMap<ClauseKey, u32> = HashMap::default();

    for literal in &ctx.trail.literals {
        if let Reason::Clause(key) = ctx.variable_db.reason_of(literal.variable()) {
            assert!(ctx.clause_db.get(key).is_ok(), "missing reason {key:?}");
            *uses.entry(key).or_default() += 1;
        }
    }

    for clause in ctx.clause_db.learnt_clauses() {
        let references = clause.learnt_details().map(|details| details.references);
        let expected = uses.get(&clause.key()).copied().unwrap_or(0);
        assert_eq!(references, Some(expected));
        assert_eq!(clause.is_locked(), expected > 0);
    }
}

mod references {
    use super::*;

    fn small_budget(config: &mut Config) {
        config.max_decisions.value = 20;
        config.reduction_schedule.learnt_floor = 1;
        config.reduction_schedule.learnt_divisor = usize::MAX;
    }

    #[test]
    fn after_timeout_and_reduction() {
        for activity in [ClauseActivity::MiniSAT, ClauseActivity::Glucose] {
            let mut config = Config::default();
            config.clause_activity.value = activity;
            small_budget(&mut config);

            let mut ctx = pigeonhole(config, 7, 6);
            assert_eq!(ctx.solve(), Err(ErrorKind::Timeout));
            references_agree(&ctx);

            assert!(ctx.reduce_learnt().is_ok());
            references_agree(&ctx);

            ctx.backjump(0);
            references_agree(&ctx);
            assert!(ctx
                .clause_db
                .learnt_clauses()
                .all(|clause| !clause.is_locked()));
        }
    }

    #[test]
    fn through_resumed_solves() {
        let mut config = Config::default();
        config.max_decisions.value = 200;
        config.luby_u.value = 3;
        config.reduction_schedule.learnt_floor = 4;

        let mut ctx = pigeonhole(config, 6, 5);
        let mut report = ctx.solve();
        while report == Err(ErrorKind::Timeout) {
            references_agree(&ctx);
            ctx.config.max_decisions.value += 200;
            report = ctx.solve();
        }

        assert_eq!(report, Ok(Report::Unsatisfiable));
        references_agree(&ctx);
    }
}
