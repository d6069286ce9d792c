use crate::efmt::{ExprFormatter, InfixFormatter};
use crate::{BoolminError, State, VarSet};
use std::fmt;

/// Common API for all Boolean rules.
///
/// This trait defines the API to evaluate and display Boolean rules.
/// Expressions, patterns and lists of implicants are rules.
pub trait Rule {
    /// Display the rule using the selected formatter
    fn fmt_with(&self, f: &mut dyn ExprFormatter) -> fmt::Result;

    /// Display the rule with the default infix formatter
    fn fmt_rule(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.fmt_with(&mut InfixFormatter::new(f))
    }

    /// Evaluate the rule on the given state.
    ///
    /// Fails if the state does not bind a variable needed by the rule.
    fn eval(&self, state: &State) -> Result<bool, BoolminError>;

    /// Add all regulators to the set of variables
    fn collect_regulators(&self, regulators: &mut VarSet);

    /// Construct the set of regulators
    fn get_regulators(&self) -> VarSet {
        let mut regulators = VarSet::default();
        self.collect_regulators(&mut regulators);
        regulators
    }
}
