use prover_sat::{
    config::Config,
    context::Context,
    reports::Report,
    structures::literal::Literal,
    types::err::{self},
};

/// Adds each clause, written with DIMACS integers, to a fresh context.
fn context_from_ints(config: Config, clauses: &[&[i64]]) -> Context {
    let mut ctx = Context::from_config(config);
    for clause in clauses {
        let clause = clause
            .iter()
            .map(|int| ctx.literal_from_string(&int.to_string()))
            .collect::<Result<Vec<_>, _>>()
            .expect("literals");
        assert!(ctx.add_clause(clause).is_ok());
    }
    ctx
}

mod basic {
    use super::*;

    #[test]
    fn one_literal() {
        let mut ctx = Context::from_config(Config::default());
        let p = ctx.fresh_variable(None).expect("variable");

        assert_eq!(ctx.add_clause(vec![Literal::new(p, true)]), Ok(true));
        assert_eq!(ctx.solve(), Ok(Report::Satisfiable));
        assert_eq!(ctx.report(), Report::Satisfiable);
    }

    #[test]
    fn conflict() {
        let mut ctx = Context::from_config(Config::default());

        let p = Literal::new(ctx.fresh_variable(None).expect("variable"), true);
        let q = Literal::new(ctx.fresh_variable(None).expect("variable"), true);

        assert!(ctx.add_clause(vec![p, q]).is_ok());
        assert!(ctx.add_clause(vec![-p, -q]).is_ok());
        assert!(ctx.add_clause(vec![p, -q]).is_ok());
        assert!(ctx.add_clause(vec![-p, q]).is_ok());

        assert_eq!(ctx.solve(), Ok(Report::Unsatisfiable));
    }

    #[test]
    fn unit_conjunct() {
        let mut ctx = Context::from_config(Config::default());

        let p = Literal::new(ctx.fresh_variable(None).expect("variable"), true);
        let q = Literal::new(ctx.fresh_variable(None).expect("variable"), true);

        assert_eq!(ctx.add_clause(vec![p, q]), Ok(true));
        assert!(ctx.add_clause(vec![-p]).is_ok());

        assert_eq!(ctx.solve(), Ok(Report::Satisfiable));
        assert_eq!(ctx.variable_db.value_of(p.variable()), Some(false));
        assert_eq!(ctx.variable_db.value_of(q.variable()), Some(true));
    }

    #[test]
    fn chain_to_contradiction() {
        let mut ctx = context_from_ints(Config::default(), &[&[1, 2], &[-1, 2], &[-2]]);
        assert_eq!(ctx.solve(), Ok(Report::Unsatisfiable));
    }

    #[test]
    fn two_units() {
        let mut ctx = context_from_ints(Config::default(), &[&[1], &[2]]);
        assert_eq!(ctx.solve(), Ok(Report::Satisfiable));

        let model = ctx.model().expect("model");
        assert_eq!(model.value_of("1"), Some(true));
        assert_eq!(model.value_of("2"), Some(true));
        assert!(model.negative().is_empty());
    }

    #[test]
    fn long_clauses() {
        let clauses: &[&[i64]] = &[
            &[1, 2, 3],
            &[-1, -2, 3],
            &[1, -2, -3],
            &[-1, 2, -3],
            &[-1, -2, -3],
            &[4, 5, -1],
            &[-4, -5, 2],
        ];
        let mut ctx = context_from_ints(Config::default(), clauses);

        assert_eq!(ctx.solve(), Ok(Report::Satisfiable));
        assert!(ctx.verify());
    }

    #[test]
    fn empty_clause() {
        let mut ctx = Context::from_config(Config::default());
        assert_eq!(ctx.add_clause(vec![]), Ok(false));
        assert_eq!(ctx.solve(), Ok(Report::Unsatisfiable));
    }

    #[test]
    fn tautology_skipped() {
        let mut ctx = Context::from_config(Config::default());
        let p = Literal::new(ctx.fresh_variable(None).expect("variable"), true);
        let q = Literal::new(ctx.fresh_variable(None).expect("variable"), true);

        assert_eq!(ctx.add_clause(vec![p, q, -p]), Ok(true));
        assert_eq!(ctx.clause_db.original_count(), 0);
        assert_eq!(ctx.watches.binary_clauses().count(), 0);
    }

    #[test]
    fn duplicates_removed() {
        let mut ctx = Context::from_config(Config::default());
        let clause = ctx.clause_from_string("p q p q").expect("clause");
        assert!(ctx.add_clause(clause).is_ok());

        assert_eq!(ctx.clause_db.original_count(), 0);
        assert_eq!(ctx.watches.binary_clauses().count(), 1);
    }

    #[test]
    fn clause_false_on_the_trail() {
        let mut ctx = context_from_ints(Config::default(), &[&[1, 2, 3], &[-1, -2]]);
        assert_eq!(ctx.solve(), Ok(Report::Satisfiable));

        // Block the found model, until none remain.
        let mut count = 1;
        loop {
            let blocking = ctx.trail.literals.iter().map(|l| -*l).collect::<Vec<_>>();
            match ctx.add_clause(blocking) {
                Ok(true) => {}
                _ => break,
            }
            match ctx.solve() {
                Ok(Report::Satisfiable) => {
                    assert!(ctx.verify());
                    count += 1
                }
                _ => break,
            }
        }

        // Seven valuations satisfy the first clause, and two of these falsify the second.
        assert_eq!(count, 5);
    }
}

mod errors {
    use super::*;

    #[test]
    fn unknown_variable() {
        let mut ctx = Context::from_config(Config::default());
        assert_eq!(
            ctx.add_clause(vec![Literal::new(7, true)]),
            Err(err::ErrorKind::ClauseDB(err::ClauseDBError::UnknownVariable))
        );
    }

    #[test]
    fn duplicate_name() {
        let mut ctx = Context::from_config(Config::default());
        assert!(ctx.fresh_variable(Some("p")).is_ok());
        assert_eq!(
            ctx.fresh_variable(Some("p")),
            Err(err::ErrorKind::VariableDB(err::VariableDBError::DuplicateName))
        );
        assert!(ctx.variable_exists("p"));
        assert_eq!(ctx.variable_index("p"), Ok(1));
        assert!(ctx.variable_index("q").is_err());
    }

    #[test]
    fn model_unavailable() {
        let mut ctx = context_from_ints(Config::default(), &[&[1, 2], &[-1, -2]]);
        assert_eq!(
            ctx.model(),
            Err(err::ErrorKind::State(err::StateError::ModelUnavailable))
        );

        assert_eq!(ctx.solve(), Ok(Report::Satisfiable));
        assert!(ctx.model().is_ok());

        let clause = ctx.clause_from_string("3").expect("clause");
        assert!(ctx.add_clause(clause).is_ok());
        assert!(ctx.model().is_err());
    }

    #[test]
    fn timeout_then_resume() {
        let mut config = Config::default();
        config.max_decisions.value = 0;
        let mut ctx = context_from_ints(config, &[&[1, 2], &[-1, 3], &[-2, -3]]);

        assert_eq!(ctx.solve(), Err(err::ErrorKind::Timeout));
        assert_eq!(ctx.report(), Report::Unknown);

        ctx.config.max_decisions.value = 100;
        assert_eq!(ctx.solve(), Ok(Report::Satisfiable));
        assert!(ctx.verify());
    }
}
