//! A satisfying assignment, by variable name.

use std::collections::HashMap;

/// The variables made true and the variables made false by a satisfying assignment.
///
/// Both lists are in the order values were given during the solve.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Model {
    positive: Vec<String>,
    negative: Vec<String>,

    /// The value of each variable, by name.
    values: HashMap<String, bool>,
}

impl Model {
    pub(crate) fn push(&mut self, name: String, value: bool) {
        self.values.insert(name.clone(), value);
        match value {
            true => self.positive.push(name),
            false => self.negative.push(name),
        }
    }

    /// The names of variables with a true value.
    pub fn positive(&self) -> &[String] {
        &self.positive
    }

    /// The names of variables with a false value.
    pub fn negative(&self) -> &[String] {
        &self.negative
    }

    /// The value of the variable named `name` on the model, if the variable is known.
    pub fn value_of(&self, name: &str) -> Option<bool> {
        self.values.get(name).copied()
    }

    /// The model as a conjunction of literals, joined by `and` with negation written as `not`.
    ///
    /// ```rust
    /// # use prover_sat::{config::Config, context::Context};
    /// let mut the_context = Context::from_config(Config::default());
    /// let clause = the_context.clause_from_string("-p").unwrap();
    /// assert!(the_context.add_clause(clause).is_ok());
    /// assert!(the_context.solve().is_ok());
    ///
    /// let model = the_context.model().unwrap();
    /// assert_eq!(model.conjunction(" & ", "!"), "!p");
    /// ```
    pub fn conjunction(&self, and: &str, not: &str) -> String {
        let positive = self.positive.iter().map(|name| name.to_string());
        let negative = self.negative.iter().map(|name| format!("{not}{name}"));

        positive.chain(negative).collect::<Vec<_>>().join(and)
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.conjunction(" ", "-"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_by_name() {
        let mut model = Model::default();
        model.push("p".to_string(), true);
        model.push("q".to_string(), false);

        assert_eq!(model.value_of("p"), Some(true));
        assert_eq!(model.value_of("q"), Some(false));
        assert_eq!(model.value_of("r"), None);
        assert_eq!(model.to_string(), "p -q");
    }
}
