use prover_sat::{
    config::Config,
    context::{Context, ContextState},
    structures::literal::Literal,
    types::err::{ClauseDBError, DecisionStackError, ErrorKind},
};

fn context_with(clauses: &[&str]) -> Context {
    let mut ctx = Context::from_config(Config::default());
    for clause in clauses {
        let clause = ctx.clause_from_string(clause).expect("clause");
        assert!(ctx.add_clause(clause).is_ok());
    }
    ctx
}

fn literal(ctx: &mut Context, string: &str) -> Literal {
    ctx.literal_from_string(string).expect("literal")
}

mod decision_stack {
    use super::*;

    #[test]
    fn backjump_over_levels() {
        let mut ctx = context_with(&["-a -b c", "-a -b -c"]);
        let a = literal(&mut ctx, "a");
        let b = literal(&mut ctx, "b");

        assert_eq!(ctx.decide_literal(a), Ok(true));
        assert_eq!(ctx.newly_implied(), vec![]);

        assert_eq!(ctx.decide_literal(b), Ok(false));
        assert_eq!(ctx.trail.level(), 2);
        assert!(!ctx.at_assertion_level());

        assert!(ctx.undo_decide(b.variable()).is_ok());
        assert_eq!(ctx.trail.level(), 1);
        assert!(ctx.at_assertion_level());

        assert_eq!(ctx.assert_cd_literal(), Ok(true));
        assert_eq!(ctx.variable_db.literal_value(b), Some(false));
        assert_eq!(ctx.variable_db.literal_value(a), Some(true));
        assert_eq!(ctx.newly_implied(), vec![-b]);
        assert_eq!(ctx.counters.learnt_binary, 1);
    }

    #[test]
    fn implied_after_decision() {
        let mut ctx = context_with(&["x", "-x y", "-w v", "-v u"]);
        let w = literal(&mut ctx, "w");
        let v = literal(&mut ctx, "v");
        let u = literal(&mut ctx, "u");
        let y = literal(&mut ctx, "y");

        assert_eq!(ctx.decide_literal(w), Ok(true));
        assert_eq!(ctx.newly_implied(), vec![v, u]);
        assert_eq!(ctx.variable_db.level_of(y.variable()), Some(0));

        assert!(ctx.undo_decide(w.variable()).is_ok());
        assert_eq!(ctx.variable_db.literal_value(v), None);

        let mut implied = ctx.newly_implied();
        implied.sort();
        let x = literal(&mut ctx, "x");
        let mut expected = vec![x, y];
        expected.sort();
        assert_eq!(implied, expected);
    }

    #[test]
    fn unsatisfiable() {
        let mut ctx = context_with(&["p q", "-p q", "p -q", "-p -q"]);
        let p = literal(&mut ctx, "p");
        let r = literal(&mut ctx, "r");

        assert_eq!(ctx.decide_literal(p), Ok(false));
        assert!(!ctx.at_assertion_level());

        assert!(ctx.undo_decide(p.variable()).is_ok());
        assert!(ctx.at_assertion_level());
        assert_eq!(ctx.assert_cd_literal(), Ok(false));
        assert_eq!(ctx.state, ContextState::Unsatisfiable);

        assert_eq!(ctx.decide_literal(r), Ok(false));
    }

    #[test]
    fn errors() {
        let mut ctx = context_with(&["a", "-b c"]);
        let a = literal(&mut ctx, "a");
        let b = literal(&mut ctx, "b");
        let c = literal(&mut ctx, "c");

        assert_eq!(
            ctx.decide_literal(a),
            Err(ErrorKind::DecisionStack(DecisionStackError::AssignedLiteral))
        );
        assert_eq!(
            ctx.decide_literal(Literal::new(99, true)),
            Err(ErrorKind::ClauseDB(ClauseDBError::UnknownVariable))
        );
        assert_eq!(
            ctx.assert_cd_literal(),
            Err(ErrorKind::DecisionStack(DecisionStackError::NotAtAssertionLevel))
        );

        assert_eq!(ctx.decide_literal(b), Ok(true));
        assert_eq!(
            ctx.undo_decide(c.variable()),
            Err(ErrorKind::DecisionStack(DecisionStackError::NoDecision))
        );
        assert_eq!(
            ctx.undo_decide(a.variable()),
            Err(ErrorKind::DecisionStack(DecisionStackError::NoDecision))
        );
        assert!(ctx.undo_decide(b.variable()).is_ok());
        assert_eq!(ctx.trail.level(), 0);
    }

    #[test]
    fn solve_after_decisions() {
        let mut ctx = context_with(&["-a -b c", "-a -b -c", "a b"]);
        let a = literal(&mut ctx, "a");
        let b = literal(&mut ctx, "b");

        assert_eq!(ctx.decide_literal(a), Ok(true));
        assert_eq!(ctx.decide_literal(b), Ok(false));
        assert!(ctx.undo_decide(b.variable()).is_ok());
        assert_eq!(ctx.assert_cd_literal(), Ok(true));

        assert!(ctx.undo_decide(a.variable()).is_ok());
        assert_eq!(ctx.solve(), Ok(prover_sat::reports::Report::Satisfiable));
        assert!(ctx.verify());
    }
}
