//! Implementation for variables and sets of variables

use bit_set::BitSet;
use std::fmt;
use std::iter::FromIterator;
use std::str::FromStr;

use crate::efmt::ExprFormatter;
use crate::{BoolminError, Rule, State};

/// A single Boolean variable identified by its canonical position.
///
/// The UID of a variable is the rank of its name in the sorted list of names collected by the parser
/// (see [VarSpace](crate::VarSpace)). The first variable is the most significant bit of a minterm.
#[derive(Clone, Copy, Default, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub struct Variable(pub(crate) usize);

impl Variable {
    /// Create a new variable with a specific UID
    pub fn new(uid: usize) -> Self {
        Self(uid)
    }

    /// Return the internal integer UID
    pub fn uid(&self) -> usize {
        self.0
    }

    /// Position of this variable in a minterm of the given width
    pub(crate) fn bit(&self, width: usize) -> u64 {
        1 << (width - 1 - self.0)
    }
}

impl From<usize> for Variable {
    fn from(uid: usize) -> Self {
        Self(uid)
    }
}

impl Rule for Variable {
    fn fmt_with(&self, f: &mut dyn ExprFormatter) -> fmt::Result {
        f.write_variable(*self, true)
    }

    fn eval(&self, state: &State) -> Result<bool, BoolminError> {
        state.is_active(*self)
    }

    fn collect_regulators(&self, regulators: &mut VarSet) {
        regulators.insert(*self);
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "_{}_", self.0)
    }
}

/// A set of selected variables with efficient bitwise operations.
///
/// A VarSet is an abstraction over [BitSet], providing a similar API.
/// It can be parsed from strings where the position in the string defines the
/// variable UID and the character defines the activation state: 0 for inactive, 1 for active.
/// Spaces and ' are ignored around and inside the string.
///
/// ```
/// use boolmin::{Variable, VarSet};
///
/// let mut vs = VarSet::default();
/// vs.insert(Variable::from(1));
/// vs.insert(Variable::from(3));
/// vs.remove(Variable::from(3));
///
/// # assert!(!vs.contains(Variable::from(0)));
/// # assert!( vs.contains(Variable::from(1)));
/// # assert!(!vs.contains(Variable::from(3)));
/// ```
#[derive(Clone, PartialEq, Eq, Hash, Default, Debug)]
pub struct VarSet {
    variables: BitSet,
}

impl VarSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an iterator over the contained variables, by increasing UID
    pub fn iter(&self) -> Iter {
        self.into_iter()
    }

    /// Add a variable to this set
    pub fn insert(&mut self, var: Variable) {
        self.variables.insert(var.uid());
    }

    /// Remove a variable from this set
    pub fn remove(&mut self, var: Variable) {
        self.variables.remove(var.uid());
    }

    /// Test if a specific variable is in this set
    pub fn contains(&self, var: Variable) -> bool {
        self.variables.contains(var.uid())
    }

    /// Remove all variables from the other set
    pub fn difference_with(&mut self, vars: &Self) {
        self.variables.difference_with(&vars.variables);
    }

    /// Retain only the variables also included in the other set
    pub fn intersect_with(&mut self, vars: &Self) {
        self.variables.intersect_with(&vars.variables);
    }

    /// Add all variables from the other set
    pub fn union_with(&mut self, vars: &Self) {
        self.variables.union_with(&vars.variables);
    }

    /// Retain the variables contained in exactly one of the two sets
    pub fn symmetric_difference_with(&mut self, vars: &Self) {
        self.variables.symmetric_difference_with(&vars.variables);
    }

    /// Return true if this set contains all variables of the other set
    pub fn contains_all(&self, other: &Self) -> bool {
        self.variables.is_superset(&other.variables)
    }

    /// Return true if the two sets have no common variable
    pub fn is_disjoint(&self, other: &Self) -> bool {
        self.variables.is_disjoint(&other.variables)
    }

    /// Return the number of variables in this set
    pub fn len(&self) -> usize {
        self.variables.len()
    }

    /// Return whether there are no selected variable in this set
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}

impl From<BitSet> for VarSet {
    fn from(variables: BitSet) -> Self {
        Self { variables }
    }
}

impl FromIterator<Variable> for VarSet {
    fn from_iter<I: IntoIterator<Item = Variable>>(iter: I) -> Self {
        let mut vs = VarSet::default();
        vs.extend(iter);
        vs
    }
}

impl Extend<Variable> for VarSet {
    fn extend<T: IntoIterator<Item = Variable>>(&mut self, iter: T) {
        for v in iter {
            self.insert(v);
        }
    }
}

impl fmt::Display for VarSet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut pos = 0;
        for v in self {
            while pos < v.uid() {
                write!(f, "0")?;
                pos += 1;
            }
            write!(f, "1")?;
            pos += 1;
        }
        Ok(())
    }
}

impl FromStr for VarSet {
    type Err = BoolminError;

    fn from_str(descr: &str) -> Result<Self, BoolminError> {
        let mut s = Self::default();
        let mut idx = 0;
        for c in descr.chars() {
            match c {
                ' ' | '\t' | '\'' => (), // skip spacing and ` for formatting
                '0' => idx += 1,
                '1' => {
                    s.insert(Variable(idx));
                    idx += 1;
                }
                _ => return Err(BoolminError::InvalidPattern(descr.to_string())),
            };
        }
        Ok(s)
    }
}

/// Iterate over variables in a [VarSet]
pub struct Iter<'a>(bit_set::Iter<'a, u32>);

impl Iterator for Iter<'_> {
    type Item = Variable;
    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(Variable::from)
    }
}

impl<'a> IntoIterator for &'a VarSet {
    type Item = Variable;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        Iter(self.variables.iter())
    }
}
