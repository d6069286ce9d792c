use crate::variable::Iter;
use crate::{BoolminError, VarSet, Variable};
use std::fmt;
use std::str::FromStr;

/// An assignment of Boolean values to the first `len` variables.
///
/// The state is defined as the set of active variables, all other bound variables are implicitly
/// inactive. Variables with a UID beyond the size of the state are unbound: asking for their value
/// is an error rather than an implicit ```false```.
///
/// A state corresponds to a row of the truth table. It can be converted to and from the integer
/// encoding of this row (the *minterm*) where the first variable is the most significant bit.
///
/// ```
/// use boolmin::{State, Variable};
///
/// let state = State::from_minterm(0b011, 3);
/// assert_eq!(state.is_active(Variable::from(0)), Ok(false));
/// assert_eq!(state.is_active(Variable::from(2)), Ok(true));
/// assert!(state.is_active(Variable::from(3)).is_err());
/// assert_eq!(state.to_minterm(), 0b011);
/// assert_eq!(format!("{}", state), "011");
/// ```
#[derive(Clone, Default, Debug, PartialEq, Eq)]
pub struct State {
    active: VarSet,
    len: usize,
}

impl State {
    /// Create a state binding `len` variables, all inactive
    pub fn new(len: usize) -> Self {
        Self {
            active: VarSet::default(),
            len,
        }
    }

    /// Decode a row of the truth table over `len` variables
    pub fn from_minterm(minterm: u64, len: usize) -> Self {
        let mut state = Self::new(len);
        for uid in 0..len {
            let var = Variable::from(uid);
            if minterm & var.bit(len) != 0 {
                state.active.insert(var);
            }
        }
        state
    }

    /// Encode this state as the index of its row in the truth table
    pub fn to_minterm(&self) -> u64 {
        self.active
            .iter()
            .fold(0, |minterm, var| minterm | var.bit(self.len))
    }

    /// Number of variables bound by this state
    pub fn len(&self) -> usize {
        self.len
    }

    /// Return whether this state binds no variable at all
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Test if a variable is bound by this state
    pub fn binds(&self, var: Variable) -> bool {
        var.uid() < self.len
    }

    /// Assign a value to a bound variable
    pub fn set(&mut self, var: Variable, value: bool) -> Result<(), BoolminError> {
        if !self.binds(var) {
            return Err(BoolminError::UnboundVariable(var));
        }
        match value {
            true => self.active.insert(var),
            false => self.active.remove(var),
        }
        Ok(())
    }

    /// Retrieve the value of a variable in this state
    pub fn is_active(&self, var: Variable) -> Result<bool, BoolminError> {
        match self.binds(var) {
            true => Ok(self.active.contains(var)),
            false => Err(BoolminError::UnboundVariable(var)),
        }
    }

    /// The set of active variables
    pub fn active(&self) -> &VarSet {
        &self.active
    }

    /// Iterate over the set of active variables
    pub fn iter_active(&self) -> Iter {
        self.active.iter()
    }
}

impl FromStr for State {
    type Err = BoolminError;

    /// Parse a state from a string of 0 and 1, the length of the string gives the number of variables
    fn from_str(descr: &str) -> Result<State, BoolminError> {
        let active: VarSet = descr.parse()?;
        let len = descr.chars().filter(|c| matches!(c, '0' | '1')).count();
        Ok(Self { active, len })
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for uid in 0..self.len {
            match self.active.contains(Variable::from(uid)) {
                true => write!(f, "1")?,
                false => write!(f, "0")?,
            }
        }
        Ok(())
    }
}
