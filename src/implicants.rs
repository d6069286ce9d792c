//! Manipulate lists of (prime) implicants.

use crate::efmt::{ExprFormatter, SopFormatted};
use crate::{BoolminError, Expr, Operator, Pattern, Rule, State, VarSet, VarSpace};
use std::fmt;
use std::iter::FromIterator;
use std::slice::Iter;
use std::str::FromStr;
use std::vec::IntoIter;

pub(crate) static PATTERN_SEPARATORS: [char; 4] = [',', ';', '|', '\n'];

/// Boolean function represented as a sum of products.
///
/// Each implicant is a [Pattern], read as the conjunction of its fixed variables.
/// The function is true in a state if at least one of its implicants contains it:
/// an empty list is the ```false``` function and a list containing the free pattern is ```true```.
///
/// The order of the implicants is preserved, it defines the order of the terms when displaying the function.
///
/// ```
/// use boolmin::{Implicants, Rule, State};
/// # use boolmin::BoolminError;
/// # fn main() -> Result<(), BoolminError> {
///
/// let implicants: Implicants = "11- ; --1".parse()?;
/// assert_eq!(implicants.len(), 2);
/// assert_eq!(implicants.literal_count(), 3);
/// assert_eq!(format!("{}", implicants), "_0__1_ + _2_");
///
/// let state: State = "110".parse()?;
/// assert!(implicants.eval(&state)?);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Default, Debug, PartialEq, Eq)]
pub struct Implicants {
    patterns: Vec<Pattern>,
}

impl Implicants {
    pub fn iter(&self) -> Iter<'_, Pattern> {
        self.patterns.iter()
    }

    /// Number of terms
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// An empty list of implicants is the ```false``` function
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Add a pattern at the end of the list
    pub fn push(&mut self, p: Pattern) {
        self.patterns.push(p);
    }

    /// Add all patterns from another list
    pub fn append(&mut self, other: &mut Self) {
        self.patterns.append(&mut other.patterns)
    }

    /// Total number of literals in all terms
    pub fn literal_count(&self) -> usize {
        self.patterns.iter().map(Pattern::literal_count).sum()
    }

    /// Test if the given pattern is one of the terms
    pub fn has_term(&self, p: &Pattern) -> bool {
        self.patterns.contains(p)
    }

    /// Test if the given pattern is covered by at least one of the terms.
    ///
    /// Note that if it returns false, the states of the target pattern could still be contained in
    /// the union of several terms. This corner case is eliminated if the implicants are prime.
    pub fn contains(&self, p: &Pattern) -> bool {
        self.patterns.iter().any(|t| t.contains(p))
    }

    /// Display the sum of products with the names of a variable collection
    pub fn named<'a>(&'a self, variables: &'a VarSpace) -> SopFormatted<'a, Self> {
        SopFormatted(self, Some(variables))
    }
}

impl Rule for Implicants {
    fn fmt_with(&self, f: &mut dyn ExprFormatter) -> fmt::Result {
        match self.patterns.len() {
            0 => f.write_bool(false),
            1 => f.write_pattern(&self.patterns[0], None),
            _ => {
                f.start_operation(Operator::Or, None)?;
                for (idx, p) in self.patterns.iter().enumerate() {
                    if idx > 0 {
                        f.sep_operation(Operator::Or)?;
                    }
                    f.write_pattern(p, Some(Operator::Or))?;
                }
                f.end_operation(Operator::Or, None)
            }
        }
    }

    fn eval(&self, state: &State) -> Result<bool, BoolminError> {
        for p in &self.patterns {
            if p.contains_state(state)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn collect_regulators(&self, regulators: &mut VarSet) {
        for p in &self.patterns {
            p.collect_regulators(regulators);
        }
    }
}

impl FromStr for Implicants {
    type Err = BoolminError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split(&PATTERN_SEPARATORS[..])
            .map(str::trim)
            .filter(|descr| !descr.is_empty())
            .map(Pattern::from_str)
            .collect()
    }
}

impl fmt::Display for Implicants {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", SopFormatted(self, None))
    }
}

impl From<&Implicants> for Expr {
    fn from(implicants: &Implicants) -> Expr {
        Operator::Or.join(implicants.iter().map(Expr::from).collect())
    }
}

impl FromIterator<Pattern> for Implicants {
    fn from_iter<T: IntoIterator<Item = Pattern>>(iter: T) -> Self {
        Self {
            patterns: iter.into_iter().collect(),
        }
    }
}

impl Extend<Pattern> for Implicants {
    fn extend<T: IntoIterator<Item = Pattern>>(&mut self, iter: T) {
        self.patterns.extend(iter)
    }
}

impl IntoIterator for Implicants {
    type Item = Pattern;
    type IntoIter = IntoIter<Pattern>;

    fn into_iter(self) -> Self::IntoIter {
        self.patterns.into_iter()
    }
}

impl<'a> IntoIterator for &'a Implicants {
    type Item = &'a Pattern;
    type IntoIter = Iter<'a, Pattern>;

    fn into_iter(self) -> Self::IntoIter {
        self.patterns.iter()
    }
}

#[cfg(test)]
mod tests {
    use crate::*;

    #[test]
    fn parse_and_display() -> Result<(), BoolminError> {
        let implicants: Implicants = " 0-1, 11-\n--1 |".parse()?;
        assert_eq!(implicants.len(), 3);
        assert_eq!(format!("{}", implicants), "_0_'_2_ + _0__1_ + _2_");

        let vs = VarSpace::from_names(["A", "B", "C"])?;
        assert_eq!(format!("{}", implicants.named(&vs)), "A'C + AB + C");

        assert!("01x ; 1-".parse::<Implicants>().is_err());
        Ok(())
    }

    #[test]
    fn constant_functions() -> Result<(), BoolminError> {
        let state: State = "01".parse()?;

        let empty = Implicants::default();
        assert_eq!(format!("{}", empty), "0");
        assert!(!empty.eval(&state)?);

        let full: Implicants = "--".parse()?;
        assert_eq!(full.len(), 1);
        assert_eq!(format!("{}", full), "1");
        assert!(full.eval(&state)?);
        assert_eq!(full.literal_count(), 0);
        Ok(())
    }

    #[test]
    fn to_expression() -> Result<(), BoolminError> {
        let implicants: Implicants = "10- ; --1".parse()?;
        let expr = Expr::from(&implicants);
        assert_eq!(format!("{}", expr), "_0_ . !_1_ + _2_");

        for m in 0..8 {
            let state = State::from_minterm(m, 3);
            assert_eq!(expr.eval(&state)?, implicants.eval(&state)?);
        }
        assert_eq!(implicants.get_regulators(), expr.get_regulators());
        Ok(())
    }

    #[test]
    fn covered_patterns() -> Result<(), BoolminError> {
        let implicants: Implicants = "1-- ; 01-".parse()?;
        assert!(implicants.contains(&"11-".parse()?));
        assert!(implicants.contains(&"010".parse()?));
        assert!(!implicants.contains(&"-1-".parse()?));
        assert!(implicants.has_term(&"01-".parse()?));
        assert!(!implicants.has_term(&"010".parse()?));
        Ok(())
    }
}
