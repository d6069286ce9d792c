//! Boolean rules defined as expression trees

use core::ops::BitAnd;
use core::ops::BitOr;
use core::ops::Not;
use std::fmt;

use crate::efmt::ExprFormatter;
use crate::{BoolminError, Rule, State, VarSet, Variable};

/// A Boolean expression tree.
///
/// Represents a Boolean rule as a tree where internal nodes are classical Boolean operations
/// and leaves are individual variables or fixed Boolean values.
/// Operations carry the full list of their operands: ```A + B + C``` is a single node with three children.
/// Each node owns its children and the tree is not modified after construction.
///
/// Expressions overload the ```&```, ```|```, and ```!``` operators to facilitate their definition
/// as readable rust statements. Unlike parsed expressions, these constructions flatten nested
/// operations of the same type.
///
/// ```
/// use boolmin::{Expr, Rule, State, Variable};
/// # use boolmin::BoolminError;
/// # fn main() -> Result<(), BoolminError> {
///
/// let a = Variable::from(0);
/// let b = Variable::from(1);
/// let c = Variable::from(2);
///
/// let expr = a & (b | !c);
///
/// let state: State = "100".parse()?;
/// assert!(expr.eval(&state)?);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Expr {
    /// A fixed Boolean value
    Literal(bool),

    /// A single variable
    Variable(Variable),

    /// Negation of a sub-expression
    Not(Box<Expr>),

    /// A list of expressions connected with the same operator
    Operation(Operator, Vec<Expr>),
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
/// Expression trees can use the AND and OR operators.
pub enum Operator {
    /// AND operator: all children need to be true
    And,
    /// OR operator: at least one child needs to be true
    Or,
}

impl Expr {
    fn _fmt_expr(&self, f: &mut dyn ExprFormatter, parent: Option<Operator>) -> fmt::Result {
        match self {
            Expr::Literal(b) => f.write_bool(*b),
            Expr::Variable(var) => f.write_variable(*var, true),
            Expr::Not(e) => {
                let compound = matches!(e.as_ref(), Expr::Operation(_, c) if c.len() > 1);
                f.start_negation(compound)?;
                e._fmt_expr(f, None)?;
                f.end_negation(compound)
            }
            Expr::Operation(o, children) => {
                f.start_operation(*o, parent)?;
                for (idx, child) in children.iter().enumerate() {
                    if idx > 0 {
                        f.sep_operation(*o)?;
                    }
                    child._fmt_expr(f, Some(*o))?;
                }
                f.end_operation(*o, parent)
            }
        }
    }

    /// Get the fixed value associated to this expression, or none if it is not a literal
    pub fn get_fixed(&self) -> Option<bool> {
        match self {
            Expr::Literal(b) => Some(*b),
            _ => None,
        }
    }

    /// Number of nodes in the expression tree
    pub fn size(&self) -> usize {
        match self {
            Expr::Literal(_) | Expr::Variable(_) => 1,
            Expr::Not(e) => 1 + e.size(),
            Expr::Operation(_, children) => 1 + children.iter().map(Expr::size).sum::<usize>(),
        }
    }

    fn push_operand(self, op: Operator, rhs: Expr) -> Expr {
        let mut children = match self {
            Expr::Operation(o, children) if o == op => children,
            e => vec![e],
        };
        match rhs {
            Expr::Operation(o, rhs_children) if o == op => children.extend(rhs_children),
            e => children.push(e),
        }
        Expr::Operation(op, children)
    }
}

impl Operator {
    /// Define the priority of operators
    ///
    /// This priority controls the addition of necessary parenthesis when formatting expressions.
    pub fn priority(self) -> u8 {
        match self {
            Operator::And => 2,
            Operator::Or => 1,
        }
    }

    /// Value of the operation without any operand
    pub fn neutral(self) -> bool {
        match self {
            Operator::And => true,
            Operator::Or => false,
        }
    }

    /// Test if a single operand with the given value fixes the result of the operation
    pub fn is_fixed_by(self, b: bool) -> bool {
        b != self.neutral()
    }

    /// Join a list of operands.
    ///
    /// An empty list gives the neutral value and a single operand is returned unchanged.
    pub fn join(self, mut operands: Vec<Expr>) -> Expr {
        match operands.len() {
            0 => Expr::Literal(self.neutral()),
            1 => operands.remove(0),
            _ => Expr::Operation(self, operands),
        }
    }
}

impl From<bool> for Expr {
    fn from(b: bool) -> Self {
        Expr::Literal(b)
    }
}

impl From<Variable> for Expr {
    fn from(var: Variable) -> Self {
        Expr::Variable(var)
    }
}

impl From<&Variable> for Expr {
    fn from(var: &Variable) -> Self {
        Self::from(*var)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Operator::And => write!(f, "."),
            Operator::Or => write!(f, "+"),
        }
    }
}

impl Rule for Expr {
    fn fmt_with(&self, f: &mut dyn ExprFormatter) -> fmt::Result {
        self._fmt_expr(f, None)
    }

    fn eval(&self, state: &State) -> Result<bool, BoolminError> {
        match self {
            Expr::Literal(b) => Ok(*b),
            Expr::Variable(var) => state.is_active(*var),
            Expr::Not(e) => Ok(!e.eval(state)?),
            Expr::Operation(op, children) => {
                for child in children {
                    let value = child.eval(state)?;
                    if op.is_fixed_by(value) {
                        return Ok(value);
                    }
                }
                Ok(op.neutral())
            }
        }
    }

    fn collect_regulators(&self, regulators: &mut VarSet) {
        match self {
            Expr::Literal(_) => (),
            Expr::Variable(var) => regulators.insert(*var),
            Expr::Not(e) => e.collect_regulators(regulators),
            Expr::Operation(_, children) => {
                for child in children {
                    child.collect_regulators(regulators);
                }
            }
        }
    }
}

// Delegate Display to the rule trait
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Rule::fmt_rule(self, f)
    }
}

/* ************************************************************************************* */
/* ******************************   Operator overloading  ****************************** */
/* ************************************************************************************* */

impl Not for Expr {
    type Output = Self;
    fn not(self) -> Self::Output {
        Expr::Not(Box::new(self))
    }
}

impl Not for &Expr {
    type Output = Expr;
    fn not(self) -> Self::Output {
        Expr::Not(Box::new(self.clone()))
    }
}

impl Not for Variable {
    type Output = Expr;
    fn not(self) -> Self::Output {
        !Expr::from(self)
    }
}

impl<T: Into<Expr>> BitAnd<T> for Expr {
    type Output = Expr;
    fn bitand(self, rhs: T) -> Self::Output {
        self.push_operand(Operator::And, rhs.into())
    }
}

impl<T: Into<Expr>> BitAnd<T> for &Expr {
    type Output = Expr;
    fn bitand(self, rhs: T) -> Self::Output {
        self.clone().push_operand(Operator::And, rhs.into())
    }
}

impl<T: Into<Expr>> BitAnd<T> for Variable {
    type Output = Expr;
    fn bitand(self, rhs: T) -> Self::Output {
        Expr::from(self).push_operand(Operator::And, rhs.into())
    }
}

impl<T: Into<Expr>> BitOr<T> for Expr {
    type Output = Self;
    fn bitor(self, rhs: T) -> Self::Output {
        self.push_operand(Operator::Or, rhs.into())
    }
}

impl<T: Into<Expr>> BitOr<T> for &Expr {
    type Output = Expr;
    fn bitor(self, rhs: T) -> Self::Output {
        self.clone().push_operand(Operator::Or, rhs.into())
    }
}

impl<T: Into<Expr>> BitOr<T> for Variable {
    type Output = Expr;
    fn bitor(self, rhs: T) -> Self::Output {
        Expr::from(self).push_operand(Operator::Or, rhs.into())
    }
}

#[cfg(test)]
mod tests {
    use crate::*;

    #[test]
    fn construct_and_display() {
        let a = Variable::from(0);
        let b = Variable::from(1);
        let c = Variable::from(2);

        let e = a | (b & c) | !c;
        assert_eq!(format!("{}", &e), "_0_ + _1_ . _2_ + !_2_");

        let e = (a | b) & c;
        assert_eq!(format!("{}", &e), "(_0_ + _1_) . _2_");
        assert_eq!(e.size(), 5);

        let e = !((a | b) & false);
        assert_eq!(format!("{}", &e), "!((_0_ + _1_) . 0)");
        assert_eq!(e.get_fixed(), None);
        assert_eq!(Expr::from(true).get_fixed(), Some(true));
    }

    #[test]
    fn eval() -> Result<(), BoolminError> {
        let a = Variable::from(0);
        let b = Variable::from(1);
        let c = Variable::from(2);
        let e = (a & b) | c;

        assert!(!e.eval(&"000".parse()?)?);
        assert!(e.eval(&"001".parse()?)?);
        assert!(e.eval(&"110".parse()?)?);
        assert!(!e.eval(&"100".parse()?)?);

        // empty operations are neutral
        let state = State::new(0);
        assert!(Expr::Operation(Operator::And, vec![]).eval(&state)?);
        assert!(!Expr::Operation(Operator::Or, vec![]).eval(&state)?);
        Ok(())
    }

    #[test]
    fn unbound_variable() -> Result<(), BoolminError> {
        let a = Variable::from(0);
        let d = Variable::from(3);
        let e = a & d;

        assert_eq!(e.eval(&"100".parse()?), Err(BoolminError::UnboundVariable(d)));

        // short-circuit before reaching the unbound variable
        assert_eq!(e.eval(&"000".parse()?), Ok(false));
        Ok(())
    }

    #[test]
    fn regulators() {
        let a = Variable::from(0);
        let c = Variable::from(2);
        let e = !(a & true) | (c & a);
        let regulators = e.get_regulators();
        assert_eq!(regulators.iter().collect::<Vec<_>>(), vec![a, c]);
    }
}
