//! Formatting API for expressions

use crate::{Operator, Pattern, Rule, VarSpace, Variable};
use delegate::delegate;

use std::fmt;

/// Symbols used by the infix formatter.
///
/// Both provided configurations produce text accepted by the expression parser.
pub struct FormatterConfig<'a> {
    s_and: &'a str,
    s_or: &'a str,
    s_not: &'a str,
}

pub static DEFAULT_FMT_CFG: FormatterConfig = FormatterConfig {
    s_and: ".",
    s_or: "+",
    s_not: "!",
};

pub static LOWERCASE_FMT_CFG: FormatterConfig = FormatterConfig {
    s_and: "and",
    s_or: "or",
    s_not: "not ",
};

pub struct InfixFormatted<'a, T: Rule + ?Sized> {
    rule: &'a T,
    cfg: &'a FormatterConfig<'a>,
    ovs: Option<&'a VarSpace>,
}

/// Define hooks to display separate parts of expressions.
///
/// This trait provide entry points used by [Rule::fmt_with] to control the presentation of the expression.
/// The expression visits the inner tree and calls the hooks defined in this trait for each node and leaf.
///
/// A default formatter is implemented on top of [fmt::Formatter], additional formatters are used through
/// Rule wrappers overriding the Display trait.
pub trait ExprFormatter {
    /// Pass-through function calling an internal [fmt::Formatter].
    ///
    /// This function enables the use of the ```write!``` macro in other functions.
    fn write_fmt(&mut self, args: fmt::Arguments) -> fmt::Result;

    /// Write a fixed Boolean node
    fn write_bool(&mut self, b: bool) -> fmt::Result;

    /// Write a single variable, which can be negated
    fn write_variable(&mut self, var: Variable, value: bool) -> fmt::Result;

    /// Start writing a negated sub-expression.
    ///
    /// The ```compound``` flag is set when the negated child is an operation.
    fn start_negation(&mut self, compound: bool) -> fmt::Result;

    /// Stop writing a negated sub-expression
    fn end_negation(&mut self, compound: bool) -> fmt::Result;

    /// Start writing an operation
    fn start_operation(&mut self, op: Operator, parent: Option<Operator>) -> fmt::Result;

    /// Stop writing an operation
    fn end_operation(&mut self, op: Operator, parent: Option<Operator>) -> fmt::Result;

    /// Separate operands in the ongoing operation
    fn sep_operation(&mut self, op: Operator) -> fmt::Result;

    /// Write a full pattern
    ///
    /// In absence of specialized operation, this functions emulate a conjunction of the fixed variables.
    /// A free pattern is written as the ```true``` constant.
    fn write_pattern(&mut self, p: &Pattern, parent: Option<Operator>) -> fmt::Result {
        if p.is_free_pattern() {
            return self.write_bool(true);
        }
        if p.literal_count() == 1 {
            let (var, value) = p.iter_fixed_values().next().unwrap_or_default();
            return self.write_variable(var, value);
        }

        self.start_operation(Operator::And, parent)?;
        let mut first = true;
        for (var, value) in p.iter_fixed_values() {
            match first {
                true => first = false,
                false => self.sep_operation(Operator::And)?,
            }
            self.write_variable(var, value)?;
        }
        self.end_operation(Operator::And, parent)
    }
}

impl FormatterConfig<'_> {
    pub fn operator(&self, op: Operator) -> &str {
        match op {
            Operator::And => self.s_and,
            Operator::Or => self.s_or,
        }
    }

    pub fn infix<'a, T: Rule + ?Sized>(
        &'a self,
        rule: &'a T,
        vs: Option<&'a VarSpace>,
    ) -> InfixFormatted<'a, T> {
        InfixFormatted {
            rule,
            ovs: vs,
            cfg: self,
        }
    }
}

pub struct InfixFormatter<'a, 'b>(
    &'a mut fmt::Formatter<'b>,
    Option<&'a VarSpace>,
    &'a FormatterConfig<'a>,
);

/// Lisp-like formatter, mostly useful to inspect the shape of an expression tree
pub struct PrefixFormatter<'a, 'b>(InfixFormatter<'a, 'b>);

/// Compact sum-of-products formatter: ```AB' + C```
///
/// Literals of a conjunction are concatenated and negated literals are suffixed with an apostrophe.
pub struct SopFormatter<'a, 'b>(InfixFormatter<'a, 'b>);

impl<'a, 'b> InfixFormatter<'a, 'b> {
    pub fn new(f: &'a mut fmt::Formatter<'b>) -> Self {
        Self(f, None, &DEFAULT_FMT_CFG)
    }
    pub fn named(f: &'a mut fmt::Formatter<'b>, vs: &'a VarSpace) -> Self {
        Self(f, Some(vs), &DEFAULT_FMT_CFG)
    }
    pub fn with(
        f: &'a mut fmt::Formatter<'b>,
        ovs: Option<&'a VarSpace>,
        cfg: &'a FormatterConfig,
    ) -> Self {
        Self(f, ovs, cfg)
    }

    fn write_name(&mut self, var: Variable) -> fmt::Result {
        match self.1 {
            None => write!(self, "{}", var),
            Some(vs) => vs.format_variable(self.0, var),
        }
    }
}

impl<'a, 'b> PrefixFormatter<'a, 'b> {
    pub fn new(f: &'a mut fmt::Formatter<'b>) -> Self {
        Self(InfixFormatter::new(f))
    }
    pub fn named(f: &'a mut fmt::Formatter<'b>, vs: &'a VarSpace) -> Self {
        Self(InfixFormatter::named(f, vs))
    }
}

impl<'a, 'b> SopFormatter<'a, 'b> {
    pub fn new(f: &'a mut fmt::Formatter<'b>) -> Self {
        Self(InfixFormatter::new(f))
    }
    pub fn named(f: &'a mut fmt::Formatter<'b>, vs: &'a VarSpace) -> Self {
        Self(InfixFormatter::named(f, vs))
    }
}

impl ExprFormatter for InfixFormatter<'_, '_> {
    fn write_fmt(&mut self, args: fmt::Arguments) -> fmt::Result {
        fmt::Formatter::write_fmt(self.0, args)
    }

    fn write_bool(&mut self, b: bool) -> fmt::Result {
        match b {
            false => write!(self, "0"),
            true => write!(self, "1"),
        }
    }

    fn write_variable(&mut self, var: Variable, value: bool) -> fmt::Result {
        if !value {
            let s_not = self.2.s_not;
            write!(self, "{}", s_not)?;
        }
        self.write_name(var)
    }

    fn start_negation(&mut self, compound: bool) -> fmt::Result {
        let s_not = self.2.s_not;
        write!(self, "{}", s_not)?;
        match compound {
            true => write!(self, "("),
            false => Ok(()),
        }
    }

    fn end_negation(&mut self, compound: bool) -> fmt::Result {
        match compound {
            true => write!(self, ")"),
            false => Ok(()),
        }
    }

    fn start_operation(&mut self, op: Operator, parent: Option<Operator>) -> fmt::Result {
        match op.priority() < parent.map(|o| o.priority()).unwrap_or(0) {
            true => write!(self, "("),
            false => Ok(()),
        }
    }

    fn end_operation(&mut self, op: Operator, parent: Option<Operator>) -> fmt::Result {
        match op.priority() < parent.map(|o| o.priority()).unwrap_or(0) {
            true => write!(self, ")"),
            false => Ok(()),
        }
    }

    fn sep_operation(&mut self, op: Operator) -> fmt::Result {
        let cfg = self.2;
        write!(self, " {} ", cfg.operator(op))
    }
}

impl<T: Rule + ?Sized> fmt::Display for InfixFormatted<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut ef = InfixFormatter::with(f, self.ovs, self.cfg);
        self.rule.fmt_with(&mut ef)
    }
}

pub struct PrefixFormatted<'a, R: Rule + ?Sized>(pub &'a R);

impl<R: Rule + ?Sized> fmt::Display for PrefixFormatted<'_, R> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut ef = PrefixFormatter::new(f);
        self.0.fmt_with(&mut ef)
    }
}

/// Display a rule as a sum of products, with optional variable names
pub struct SopFormatted<'a, R: Rule + ?Sized>(pub &'a R, pub Option<&'a VarSpace>);

impl<R: Rule + ?Sized> fmt::Display for SopFormatted<'_, R> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.1 {
            None => self.0.fmt_with(&mut SopFormatter::new(f)),
            Some(vs) => self.0.fmt_with(&mut SopFormatter::named(f, vs)),
        }
    }
}

impl ExprFormatter for PrefixFormatter<'_, '_> {
    delegate! {
        to self.0 {
            fn write_fmt(&mut self, args: fmt::Arguments) -> fmt::Result;
            fn write_bool(&mut self, b: bool) -> fmt::Result;
            fn write_variable(&mut self, var: Variable, value: bool) -> fmt::Result;
        }
    }

    fn start_negation(&mut self, _compound: bool) -> fmt::Result {
        write!(self, "(! ")
    }

    fn end_negation(&mut self, _compound: bool) -> fmt::Result {
        write!(self, ")")
    }

    fn start_operation(&mut self, op: Operator, _parent: Option<Operator>) -> fmt::Result {
        match op {
            Operator::And => write!(self, "(& "),
            Operator::Or => write!(self, "(| "),
        }
    }

    fn end_operation(&mut self, _op: Operator, _parent: Option<Operator>) -> fmt::Result {
        write!(self, ")")
    }

    fn sep_operation(&mut self, _op: Operator) -> fmt::Result {
        write!(self, " ")
    }
}

impl ExprFormatter for SopFormatter<'_, '_> {
    delegate! {
        to self.0 {
            fn write_fmt(&mut self, args: fmt::Arguments) -> fmt::Result;
            fn write_bool(&mut self, b: bool) -> fmt::Result;
            fn start_operation(&mut self, op: Operator, parent: Option<Operator>) -> fmt::Result;
            fn end_operation(&mut self, op: Operator, parent: Option<Operator>) -> fmt::Result;
        }
    }

    fn write_variable(&mut self, var: Variable, value: bool) -> fmt::Result {
        self.0.write_name(var)?;
        match value {
            true => Ok(()),
            false => write!(self, "'"),
        }
    }

    fn start_negation(&mut self, _compound: bool) -> fmt::Result {
        write!(self, "(")
    }

    fn end_negation(&mut self, _compound: bool) -> fmt::Result {
        write!(self, ")'")
    }

    fn sep_operation(&mut self, op: Operator) -> fmt::Result {
        match op {
            Operator::And => Ok(()),
            Operator::Or => write!(self, " + "),
        }
    }
}
