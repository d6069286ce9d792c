use crate::efmt::InfixFormatter;
use crate::{BoolminError, Rule, State, Variable};

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use std::fmt;

static RE_NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\p{Alphabetic}+$").unwrap());

static NAME_SEPARATORS: [char; 3] = [' ', ',', ';'];

/// The collection of named variables used by an expression.
///
/// Names are kept in sorted order and the rank of a name in this order is the UID of the
/// associated [Variable]. This canonical order fixes the position of each variable in the rows of the
/// truth table and in implicant patterns: the first name is the most significant bit.
///
/// The collection is used to retrieve the name associated with variables, which is especially useful
/// to display Boolean expressions and minimized functions.
///
/// ```
/// use boolmin::VarSpace;
/// # use boolmin::BoolminError;
/// # fn main() -> Result<(), BoolminError> {
///
/// let variables = VarSpace::from_names(["C", "A", "B", "A"])?;
/// assert_eq!(variables.len(), 3);
///
/// let b = variables.get_or_err("B")?;
/// assert_eq!(b.uid(), 1);
/// assert_eq!(format!("{}", variables.named(&b)), "B");
///
/// let state = variables.parse_state("A C")?;
/// assert_eq!(format!("{}", state), "101");
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Default, Debug, PartialEq, Eq)]
pub struct VarSpace {
    /// Sorted list of names
    names: Vec<String>,

    /// Find a variable by name
    name2uid: HashMap<String, Variable>,
}

/// A named rule associates a rule to a variable collection to provide prettier display output
pub struct NamedRule<'a, R: Rule + ?Sized> {
    namer: &'a VarSpace,
    rule: &'a R,
}

impl VarSpace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a collection from a list of names.
    ///
    /// Duplicated names are merged. Returns an error if one of the names is not a run of alphabetic characters.
    pub fn from_names<'a, T: IntoIterator<Item = &'a str>>(names: T) -> Result<Self, BoolminError> {
        let mut names: Vec<String> = names
            .into_iter()
            .map(|name| match RE_NAME.is_match(name) {
                true => Ok(name.to_string()),
                false => Err(BoolminError::InvalidName(name.to_string())),
            })
            .collect::<Result<_, _>>()?;
        names.sort();
        names.dedup();

        let name2uid = names
            .iter()
            .enumerate()
            .map(|(uid, name)| (name.clone(), Variable::from(uid)))
            .collect();
        Ok(Self { names, name2uid })
    }

    /// Get the number of variables
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Return whether there are no variables in this collection
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Check if a variable is part of the collection
    pub fn contains(&self, var: Variable) -> bool {
        var.uid() < self.names.len()
    }

    /// Check if a name is part of the collection
    pub fn contains_name(&self, name: &str) -> bool {
        self.name2uid.contains_key(name)
    }

    /// Search a variable with the given name
    pub fn get(&self, name: &str) -> Option<Variable> {
        self.name2uid.get(name).copied()
    }

    /// Search a variable with the given name
    pub fn get_or_err(&self, name: &str) -> Result<Variable, BoolminError> {
        self.get(name)
            .ok_or_else(|| BoolminError::NoSuchVariableName(name.into()))
    }

    /// Retrieve the name of a variable
    pub fn name(&self, var: Variable) -> Option<&str> {
        self.names.get(var.uid()).map(String::as_str)
    }

    /// Iterate over all variables and their names in canonical order
    pub fn iter(&self) -> impl Iterator<Item = (Variable, &str)> {
        self.names
            .iter()
            .enumerate()
            .map(|(uid, name)| (Variable::from(uid), name.as_str()))
    }

    /// Sorted list of names
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Build a state binding all variables of this collection from named values.
    ///
    /// Variables missing from the list are inactive.
    pub fn state<'a, T: IntoIterator<Item = (&'a str, bool)>>(
        &self,
        values: T,
    ) -> Result<State, BoolminError> {
        let mut state = State::new(self.len());
        for (name, value) in values {
            state.set(self.get_or_err(name)?, value)?;
        }
        Ok(state)
    }

    /// Parse a state given as a list of active variable names
    pub fn parse_state(&self, s: &str) -> Result<State, BoolminError> {
        self.state(
            s.split(&NAME_SEPARATORS[..])
                .filter(|n| !n.is_empty())
                .map(|n| (n, true)),
        )
    }

    /// Check that a rule uses only variables from this collection
    pub fn check_rule<R: Rule + ?Sized>(&self, rule: &R) -> Result<(), BoolminError> {
        match rule.get_regulators().iter().find(|v| !self.contains(*v)) {
            None => Ok(()),
            Some(v) => Err(BoolminError::UnboundVariable(v)),
        }
    }

    /// Display a rule using the names of this collection
    pub fn named<'a, R: Rule + ?Sized>(&'a self, rule: &'a R) -> NamedRule<'a, R> {
        NamedRule { namer: self, rule }
    }

    pub(crate) fn format_variable(&self, f: &mut fmt::Formatter, var: Variable) -> fmt::Result {
        match self.name(var) {
            Some(name) => write!(f, "{}", name),
            None => write!(f, "{}", var),
        }
    }
}

impl<R: Rule + ?Sized> fmt::Display for NamedRule<'_, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.rule.fmt_with(&mut InfixFormatter::named(f, self.namer))
    }
}

#[cfg(test)]
mod tests {
    use crate::*;

    #[test]
    fn canonical_order() -> Result<(), BoolminError> {
        let vs = VarSpace::from_names(["delta", "B", "alpha", "B"])?;
        assert_eq!(vs.names(), ["B", "alpha", "delta"]);
        assert_eq!(vs.get("alpha"), Some(Variable::from(1)));
        assert_eq!(vs.name(Variable::from(2)), Some("delta"));
        assert_eq!(vs.name(Variable::from(3)), None);
        assert!(vs.get_or_err("gamma").is_err());
        Ok(())
    }

    #[test]
    fn reject_names() {
        assert!(VarSpace::from_names(["A1"]).is_err());
        assert!(VarSpace::from_names(["te%t"]).is_err());
        assert!(VarSpace::from_names([""]).is_err());
        assert!(VarSpace::from_names(["ÄÖ"]).is_ok());
    }

    #[test]
    fn named_states() -> Result<(), BoolminError> {
        let vs = VarSpace::from_names(["A", "B", "C"])?;
        let state = vs.state([("B", true), ("C", false)])?;
        assert_eq!(format!("{}", state), "010");

        let state = vs.parse_state("A; C")?;
        assert_eq!(state.to_minterm(), 0b101);

        assert!(vs.parse_state("A D").is_err());
        Ok(())
    }

    #[test]
    fn check_rule() -> Result<(), BoolminError> {
        let vs = VarSpace::from_names(["A", "B"])?;
        let a = vs.get_or_err("A")?;
        let b = vs.get_or_err("B")?;
        assert!(vs.check_rule(&(a | !b)).is_ok());

        let other = Variable::from(5);
        assert!(vs.check_rule(&(a & other)).is_err());
        Ok(())
    }
}
