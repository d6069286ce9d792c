//! Minimize Boolean expressions into a minimal sum of products.
//!
//! An expression is [parsed](parse_expression) into an [expression tree](Expr) over a [collection of named
//! variables](VarSpace). The [truth table](TruthTable) of the expression gives the list of *minterms*: the states
//! in which the expression is true, encoded as integers where the first variable is the most significant bit.
//! The Quine-McCluskey method extracts the [prime implicants](Primes) of the expression from these minterms and
//! Petrick's method [selects](CoverSolver) a subset of prime implicants covering all minterms with the fewest literals.
//!
//! ```
//! use boolmin::minimize;
//! # use boolmin::BoolminError;
//! # fn main() -> Result<(), BoolminError> {
//!
//! let minimized = minimize("(A . B) + C + (A . B . !C)")?;
//! assert_eq!(format!("{}", minimized), "F = AB + C");
//! assert_eq!(minimized.function().literal_count(), 3);
//! # Ok(())
//! # }
//! ```
//!
//! # Variables, states and patterns
//!
//! [Boolean variables](Variable) are identified by an integer UID: their rank in the sorted list of names.
//! A [State] is the set of variables associated to the ```true``` value among a fixed number of variables.
//! A [Pattern] is defined by two sets of fixed variables (```true``` or ```false```), while other variables remain free.
//! This pattern represents all the states in which the fixed variables take the same value: it is the implicant
//! manipulated by the Quine-McCluskey method.
//!
//! ```
//! use boolmin::{Pattern, State};
//! # use boolmin::BoolminError;
//! # fn main() -> Result<(), BoolminError> {
//!
//! let pattern: Pattern = "1--0".parse()?;
//! let state1: State = "0110".parse()?;
//! let state2: State = "1010".parse()?;
//!
//! assert!(!pattern.contains_state(&state1)?);
//! assert!( pattern.contains_state(&state2)?);
//! # Ok(())
//! # }
//! ```
//!
//! # Rules
//!
//! The [Rule trait](Rule) is shared by all representations of Boolean functions: [expressions](Expr),
//! [patterns](Pattern) and [lists of implicants](Implicants). A rule can be evaluated in a state and displayed
//! with several formatters (see the [efmt] module).
//!
//! ```
//! use boolmin::{Expr, Rule, State, Variable};
//! # use boolmin::BoolminError;
//! # fn main() -> Result<(), BoolminError> {
//!
//! let a = Variable::from(0);
//! let b = Variable::from(1);
//! let c = Variable::from(2);
//! let expr = a & (b | !c);
//!
//! let state: State = "110".parse()?;
//! assert!(expr.eval(&state)?);
//! # Ok(())
//! # }
//! ```
//!
//! # Step by step
//!
//! The [Minimizer] runs the whole pipeline, each stage is also available separately.
//!
//! ```
//! use boolmin::{parse_expression, solve, Primes, TruthTable};
//! # use boolmin::BoolminError;
//! # fn main() -> Result<(), BoolminError> {
//!
//! let parsed = parse_expression("(A . B) + C")?;
//! let table = TruthTable::generate(parsed.expr(), parsed.variables())?;
//! let primes = Primes::from_table(&table)?;
//! let solution = solve(&primes.coverage())?;
//!
//! assert_eq!(format!("{}", solution.function().named(parsed.variables())), "AB + C");
//! # Ok(())
//! # }
//! ```

mod cover;
pub mod efmt;
mod error;
mod expr;
mod implicants;
mod parse;
mod pattern;
mod primes;
mod rules;
mod space;
mod states;
mod truth_table;
mod variable;

use log::debug;
use std::fmt;

#[macro_use]
extern crate pest_derive;

// Export public structures and API
pub use cover::{solve, CoverSolver, Solution};
pub use error::BoolminError;
pub use expr::{Expr, Operator};
pub use implicants::Implicants;
pub use parse::{parse_expression, Parsed};
pub use pattern::{Pattern, PatternWidth};
pub use primes::{CoverageTable, PrimeKey, Primes};
pub use rules::Rule;
pub use space::{NamedRule, VarSpace};
pub use states::State;
pub use truth_table::{Limits, TruthTable, MAX_VARIABLES};
pub use variable::{VarSet, Variable};

/// Run the complete minimization pipeline with configurable limits.
///
/// ```
/// use boolmin::{BoolminError, Limits, Minimizer};
///
/// let minimizer = Minimizer::new().with_limits(Limits::with_max_variables(2));
/// assert!(minimizer.minimize("A + !B").is_ok());
/// assert_eq!(
///     minimizer.minimize("A + B + C").unwrap_err(),
///     BoolminError::TooManyVariables { count: 3, max: 2 }
/// );
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct Minimizer {
    limits: Limits,
}

/// The result of a successful minimization.
///
/// It keeps all intermediate stages of the pipeline: the parsed expression, its truth table,
/// its prime implicants and the selected cover.
#[derive(Clone, Debug)]
pub struct Minimized {
    parsed: Parsed,
    table: TruthTable,
    primes: Primes,
    solution: Solution,
}

impl Minimizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    /// Parse and minimize an expression
    pub fn minimize(&self, text: &str) -> Result<Minimized, BoolminError> {
        let parsed = parse_expression(text)?;
        let table =
            TruthTable::generate_with_limits(parsed.expr(), parsed.variables(), &self.limits)?;
        let primes = Primes::from_table(&table)?;
        let solution = solve(&primes.coverage())?;
        debug!(
            "minimized '{}' into {} terms",
            text,
            solution.function().len()
        );

        Ok(Minimized {
            parsed,
            table,
            primes,
            solution,
        })
    }
}

/// Parse and minimize an expression with the default limits
pub fn minimize(text: &str) -> Result<Minimized, BoolminError> {
    Minimizer::new().minimize(text)
}

/// Describe the result of a minimization: the minimized function or the reason of the failure.
///
/// ```
/// use boolmin::{minimize, render_result};
///
/// assert_eq!(render_result(&minimize("A + !A")), "F = 1");
/// assert_eq!(render_result(&minimize("A . !A")), "no solution");
/// ```
pub fn render_result(result: &Result<Minimized, BoolminError>) -> String {
    match result {
        Ok(minimized) => minimized.to_string(),
        Err(BoolminError::NoSatisfyingAssignment) => "no solution".to_string(),
        Err(e) => e.to_string(),
    }
}

impl Minimized {
    pub fn variables(&self) -> &VarSpace {
        self.parsed.variables()
    }

    pub fn expression(&self) -> &Expr {
        self.parsed.expr()
    }

    pub fn table(&self) -> &TruthTable {
        &self.table
    }

    pub fn primes(&self) -> &Primes {
        &self.primes
    }

    pub fn essentials(&self) -> &Implicants {
        self.solution.essentials()
    }

    /// The minimized function: essential prime implicants followed by the chosen ones
    pub fn function(&self) -> &Implicants {
        self.solution.function()
    }
}

impl fmt::Display for Minimized {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "F = {}", self.function().named(self.variables()))
    }
}
