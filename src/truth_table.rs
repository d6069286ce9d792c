//! Truth tables of Boolean rules.
//!
//! The truth table of a rule over n variables lists its value for the 2ⁿ states,
//! in binary counting order: the last variable changes at each row, the first variable
//! is the most significant bit of the row index.

use crate::{BoolminError, Rule, State, VarSpace};
use log::debug;

/// Hard limit on the number of variables: the rows of the table are indexed by ```u64``` minterms
pub const MAX_VARIABLES: usize = 63;

/// Bounds on the size of the generated tables.
///
/// The truth table and the minimization are exponential in the number of variables, the default
/// limit keeps them in a practical range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Limits {
    /// Maximal number of variables accepted in a truth table
    pub max_variables: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self { max_variables: 20 }
    }
}

impl Limits {
    pub fn with_max_variables(max_variables: usize) -> Self {
        Self { max_variables }
    }

    /// Check that a table over ```count``` variables respects these limits
    pub fn check(&self, count: usize) -> Result<(), BoolminError> {
        let max = self.max_variables.min(MAX_VARIABLES);
        match count > max {
            true => Err(BoolminError::TooManyVariables { count, max }),
            false => Ok(()),
        }
    }
}

/// The complete truth table of a rule.
///
/// The contexts (rows) and the corresponding results are stored in two parallel lists.
///
/// ```
/// use boolmin::{parse_expression, TruthTable};
/// # use boolmin::BoolminError;
/// # fn main() -> Result<(), BoolminError> {
///
/// let parsed = parse_expression("(A . B) + C")?;
/// let table = TruthTable::generate(parsed.expr(), parsed.variables())?;
///
/// assert_eq!(table.len(), 8);
/// assert_eq!(table.results(), [false, true, false, true, false, true, true, true]);
/// assert_eq!(table.minterms().collect::<Vec<_>>(), vec![1, 3, 5, 6, 7]);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TruthTable {
    variables: usize,
    contexts: Vec<State>,
    results: Vec<bool>,
}

impl TruthTable {
    /// Evaluate a rule on all states of the given variables with the default limits
    pub fn generate<R: Rule + ?Sized>(
        rule: &R,
        variables: &VarSpace,
    ) -> Result<Self, BoolminError> {
        Self::generate_with_limits(rule, variables, &Limits::default())
    }

    /// Evaluate a rule on all states of the given variables
    pub fn generate_with_limits<R: Rule + ?Sized>(
        rule: &R,
        variables: &VarSpace,
        limits: &Limits,
    ) -> Result<Self, BoolminError> {
        let n = variables.len();
        limits.check(n)?;

        let contexts: Vec<State> = (0..1u64 << n).map(|m| State::from_minterm(m, n)).collect();
        let results = contexts
            .iter()
            .map(|state| rule.eval(state))
            .collect::<Result<Vec<bool>, _>>()?;

        debug!(
            "truth table: {} rows over {} variables, {} true",
            results.len(),
            n,
            results.iter().filter(|r| **r).count()
        );
        Ok(Self {
            variables: n,
            contexts,
            results,
        })
    }

    /// Number of variables of the table
    pub fn variable_count(&self) -> usize {
        self.variables
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// A table always has at least one row (the empty state)
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// The states of the rows, in order
    pub fn contexts(&self) -> &[State] {
        &self.contexts
    }

    /// The value of the rule for each row, in order
    pub fn results(&self) -> &[bool] {
        &self.results
    }

    /// Iterate over pairs of state and value
    pub fn rows(&self) -> impl Iterator<Item = (&State, bool)> {
        self.contexts.iter().zip(self.results.iter().copied())
    }

    /// Iterate over the encoded states for which the rule is true
    pub fn minterms(&self) -> impl Iterator<Item = u64> + '_ {
        self.rows()
            .filter(|(_, value)| *value)
            .map(|(state, _)| state.to_minterm())
    }
}

#[cfg(test)]
mod tests {
    use crate::*;

    #[test]
    fn row_order() -> Result<(), BoolminError> {
        let parsed = parse_expression("A . !B")?;
        let table = TruthTable::generate(parsed.expr(), parsed.variables())?;

        let rows: Vec<String> = table.contexts().iter().map(|s| format!("{}", s)).collect();
        assert_eq!(rows, ["00", "01", "10", "11"]);
        assert_eq!(table.results(), [false, false, true, false]);
        assert_eq!(table.variable_count(), 2);
        Ok(())
    }

    #[test]
    fn constant_expression() -> Result<(), BoolminError> {
        let parsed = parse_expression("!0")?;
        let table = TruthTable::generate(parsed.expr(), parsed.variables())?;
        assert_eq!(table.len(), 1);
        assert_eq!(table.minterms().collect::<Vec<_>>(), vec![0]);
        Ok(())
    }

    #[test]
    fn limits() -> Result<(), BoolminError> {
        let parsed = parse_expression("A + B + C + D")?;
        let limits = Limits::with_max_variables(3);
        assert_eq!(
            TruthTable::generate_with_limits(parsed.expr(), parsed.variables(), &limits),
            Err(BoolminError::TooManyVariables { count: 4, max: 3 })
        );

        let limits = Limits::with_max_variables(1000);
        assert!(limits.check(63).is_ok());
        assert!(limits.check(64).is_err());
        Ok(())
    }

    #[test]
    fn unbound_variable() -> Result<(), BoolminError> {
        // the table of an expression is built over the variables of another expression
        let parsed = parse_expression("A . B")?;
        let other = VarSpace::from_names(["A"])?;
        assert_eq!(
            TruthTable::generate(parsed.expr(), &other),
            Err(BoolminError::UnboundVariable(Variable::from(1)))
        );
        Ok(())
    }
}
