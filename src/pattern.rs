use crate::efmt::ExprFormatter;
use crate::{BoolminError, Operator, Rule, State, VarSet, Variable};

use itertools::Itertools;
use std::fmt;
use std::str::FromStr;

/// A subspace defined by sets of active and inactive variables, the others are implicitly free.
///
/// They are represented as a pair of [VarSet] to store positive and negative variables.
/// A pattern is the implicant manipulated by the Quine-McCluskey method: a conjunction of literals,
/// or equivalently the set of minterms obtained by giving all possible values to its free variables.
///
/// A Pattern can be parsed from strings where the position in the string defines the
/// variable UID and the character defines the activation state: - for free, 0 for inactive, 1 for active.
/// To make the strings easier to read, spaces and single quotes are ignored around and inside the string.
/// For example "0-100-100", "  0-100-100", and "0-100 -100" are equivalent.
///
/// Trailing free variables are not visible in the default display, use [Pattern::with_width] to
/// display the pattern over a fixed number of variables.
///
/// ```
/// use boolmin::Pattern;
/// # use boolmin::BoolminError;
/// # fn main() -> Result<(), BoolminError> {
///
/// let p1: Pattern = "0110".parse()?;
/// let p2: Pattern = "0100".parse()?;
/// let merged = p1.merge_adjacent(&p2).unwrap();
/// assert_eq!(format!("{}", merged.with_width(4)), "01-0");
/// assert_eq!(merged.minterms(4), vec![0b0100, 0b0110]);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, PartialEq, Eq, Hash, Default, Debug)]
pub struct Pattern {
    pub(crate) positive: VarSet,
    pub(crate) negative: VarSet,
}

/// Display a pattern over a fixed number of variables
pub struct PatternWidth<'a> {
    pattern: &'a Pattern,
    width: usize,
}

impl Pattern {
    /// Create a pattern from the two inner sets of fixed variables
    pub fn with(positive: VarSet, negative: VarSet) -> Self {
        Self { positive, negative }
    }

    /// Create a pattern restricted to a single row of the truth table
    pub fn from_minterm(minterm: u64, width: usize) -> Self {
        let mut p = Pattern::default();
        for uid in 0..width {
            let var = Variable::from(uid);
            p.set(var, minterm & var.bit(width) != 0);
        }
        p
    }

    /// Fix a variable to a specific value.
    ///
    /// If this variable was free, this leads to a restriction of the pattern.
    /// If it was fixed to the opposite value, the existing restriction is replaced.
    pub fn set(&mut self, var: Variable, value: bool) {
        if value {
            self.negative.remove(var);
            self.positive.insert(var);
        } else {
            self.positive.remove(var);
            self.negative.insert(var);
        }
    }

    /// Remove all constraints on a given variable.
    pub fn free_variable(&mut self, var: Variable) {
        self.positive.remove(var);
        self.negative.remove(var);
    }

    /// Test if a variable is fixed at a specific value in this pattern
    pub fn has_restriction(&self, var: Variable, value: bool) -> bool {
        match value {
            true => self.positive.contains(var),
            false => self.negative.contains(var),
        }
    }

    /// Test if the pattern is free (no fixed variable): it covers all states
    pub fn is_free_pattern(&self) -> bool {
        self.positive.is_empty() && self.negative.is_empty()
    }

    /// Number of variables fixed at ```true```: the group of this pattern in the Quine-McCluskey tables
    pub fn count_ones(&self) -> usize {
        self.positive.len()
    }

    /// Number of literals in the conjunction represented by this pattern
    pub fn literal_count(&self) -> usize {
        self.positive.len() + self.negative.len()
    }

    /// The set of fixed variables, regardless of their value
    pub fn fixed_variables(&self) -> VarSet {
        let mut fixed = self.positive.clone();
        fixed.union_with(&self.negative);
        fixed
    }

    /// Iterate over the fixed variables and their values, by increasing UID
    pub fn iter_fixed_values(&self) -> impl Iterator<Item = (Variable, bool)> + '_ {
        self.positive
            .iter()
            .map(|v| (v, true))
            .merge_by(self.negative.iter().map(|v| (v, false)), |a, b| a.0 < b.0)
    }

    /// Merge two patterns which differ on a single variable.
    ///
    /// Both patterns must fix the same variables and disagree on the value of exactly one of them.
    /// This variable is then free in the merged pattern, which covers the union of the two patterns.
    pub fn merge_adjacent(&self, other: &Self) -> Option<Self> {
        if self.fixed_variables() != other.fixed_variables() {
            return None;
        }

        let mut diff = self.positive.clone();
        diff.symmetric_difference_with(&other.positive);
        if diff.len() != 1 {
            return None;
        }

        let mut merged = self.clone();
        diff.iter().for_each(|v| merged.free_variable(v));
        Some(merged)
    }

    /// Check if this pattern contains all the states of another pattern
    pub fn contains(&self, p: &Pattern) -> bool {
        p.positive.contains_all(&self.positive) && p.negative.contains_all(&self.negative)
    }

    /// Check if a state is contained in this pattern.
    ///
    /// Fails if a fixed variable is not bound by the state.
    pub fn contains_state(&self, state: &State) -> Result<bool, BoolminError> {
        for (var, value) in self.iter_fixed_values() {
            if state.is_active(var)? != value {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// List the minterms covered by this pattern over ```width``` variables, in increasing order.
    ///
    /// Each free variable doubles the number of minterms.
    pub fn minterms(&self, width: usize) -> Vec<u64> {
        let base = self
            .positive
            .iter()
            .fold(0, |minterm, var| minterm | var.bit(width));
        let free: Vec<u64> = (0..width)
            .map(Variable::from)
            .filter(|v| !self.positive.contains(*v) && !self.negative.contains(*v))
            .map(|v| v.bit(width))
            .collect();

        let mut result: Vec<u64> = (0..1u64 << free.len())
            .map(|combination| {
                free.iter()
                    .rev()
                    .enumerate()
                    .filter(|(idx, _)| combination & (1 << idx) != 0)
                    .fold(base, |minterm, (_, bit)| minterm | bit)
            })
            .collect();
        result.sort_unstable();
        result
    }

    /// Display this pattern over a fixed number of variables
    pub fn with_width(&self, width: usize) -> PatternWidth {
        PatternWidth {
            pattern: self,
            width,
        }
    }

    /// Test if all fixed variables of this pattern have a UID lower than ```width```
    pub fn fits_width(&self, width: usize) -> bool {
        self.iter_fixed_values().all(|(v, _)| v.uid() < width)
    }

    /// Parse a pattern and check that it fits in the given number of variables
    pub fn parse_with_width(descr: &str, width: usize) -> Result<Self, BoolminError> {
        let p: Pattern = descr.parse()?;
        let fits = p.fits_width(width);
        match fits {
            true => Ok(p),
            false => Err(BoolminError::InvalidPattern(descr.to_string())),
        }
    }

    fn char_at(&self, var: Variable) -> char {
        match (self.positive.contains(var), self.negative.contains(var)) {
            (true, _) => '1',
            (false, true) => '0',
            (false, false) => '-',
        }
    }
}

impl FromStr for Pattern {
    type Err = BoolminError;

    fn from_str(descr: &str) -> Result<Pattern, BoolminError> {
        let mut p = Pattern::default();
        let mut idx = 0;
        for c in descr.chars() {
            match c {
                ' ' | '\t' | '\'' => (), // skip spacing and ` for formatting
                '-' => idx += 1,
                '0' | '1' => {
                    p.set(Variable(idx), c == '1');
                    idx += 1;
                }
                _ => return Err(BoolminError::InvalidPattern(descr.to_string())),
            };
        }
        Ok(p)
    }
}

impl Rule for Pattern {
    fn fmt_with(&self, f: &mut dyn ExprFormatter) -> fmt::Result {
        f.write_pattern(self, None)
    }

    fn eval(&self, state: &State) -> Result<bool, BoolminError> {
        self.contains_state(state)
    }

    fn collect_regulators(&self, regulators: &mut VarSet) {
        regulators.union_with(&self.positive);
        regulators.union_with(&self.negative);
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let width = self
            .iter_fixed_values()
            .last()
            .map(|(v, _)| v.uid() + 1)
            .unwrap_or(0);
        write!(f, "{}", self.with_width(width))
    }
}

impl fmt::Display for PatternWidth<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s: String = (0..self.width)
            .map(|uid| self.pattern.char_at(Variable::from(uid)))
            .collect();
        write!(f, "{}", &s)
    }
}

impl From<Variable> for Pattern {
    fn from(var: Variable) -> Self {
        let mut pattern = Pattern::default();
        pattern.set(var, true);
        pattern
    }
}

impl From<&Pattern> for crate::Expr {
    fn from(pattern: &Pattern) -> crate::Expr {
        let literals: Vec<crate::Expr> = pattern
            .iter_fixed_values()
            .map(|(v, value)| match value {
                true => v.into(),
                false => !v,
            })
            .collect();
        Operator::And.join(literals)
    }
}

#[cfg(test)]
mod tests {
    use crate::pattern::*;

    #[test]
    fn construct_and_display() -> Result<(), BoolminError> {
        let p = Pattern::from_str("-0--01-11--0-1---")?;
        assert_eq!(format!("{}", p), "-0--01-11--0-1");
        assert_eq!(format!("{}", p.with_width(17)), "-0--01-11--0-1---");
        assert_eq!(p.literal_count(), 7);
        assert_eq!(p.count_ones(), 4);

        let p = Pattern::from_minterm(0b1010, 4);
        assert_eq!(format!("{}", p), "1010");
        assert_eq!(format!("{}", Pattern::default().with_width(3)), "---");

        assert!(Pattern::from_str("01x").is_err());
        assert_eq!(
            Pattern::parse_with_width("0-1", 2),
            Err(BoolminError::InvalidPattern("0-1".to_string()))
        );
        assert_eq!(Pattern::parse_with_width("0-1-", 3), "0-1".parse::<Pattern>());
        assert!(p.fits_width(4));
        assert!(!p.fits_width(3));
        assert!(Pattern::default().fits_width(0));
        Ok(())
    }

    #[test]
    fn merge() -> Result<(), BoolminError> {
        let p: Pattern = "1-01".parse()?;
        let t: Pattern = "1-00".parse()?;
        let merged = p.merge_adjacent(&t).unwrap();
        assert_eq!(format!("{}", merged.with_width(4)), "1-0-");
        assert_eq!(t.merge_adjacent(&p), Some(merged));

        // Different free variables
        let t: Pattern = "110-".parse()?;
        assert_eq!(p.merge_adjacent(&t), None);

        // More than one difference
        let t: Pattern = "0-00".parse()?;
        assert_eq!(p.merge_adjacent(&t), None);

        // Identical patterns
        assert_eq!(p.merge_adjacent(&p), None);
        Ok(())
    }

    #[test]
    fn expand_minterms() -> Result<(), BoolminError> {
        let p: Pattern = "1-0-".parse()?;
        assert_eq!(p.minterms(4), vec![0b1000, 0b1001, 0b1100, 0b1101]);

        let p: Pattern = "011".parse()?;
        assert_eq!(p.minterms(3), vec![3]);

        assert_eq!(Pattern::default().minterms(2), vec![0, 1, 2, 3]);
        assert_eq!(Pattern::default().minterms(0), vec![0]);
        Ok(())
    }

    #[test]
    fn contained() -> Result<(), BoolminError> {
        let p: Pattern = "-11".parse()?;
        let t: Pattern = "011".parse()?;
        assert!(p.contains(&t));
        assert!(!t.contains(&p));

        assert!(p.contains_state(&"111".parse()?)?);
        assert!(!p.contains_state(&"110".parse()?)?);
        assert!(p.contains_state(&"11".parse()?).is_err());
        Ok(())
    }
}
