use crate::{BoolminError, Expr, Operator, VarSpace};
use log::debug;
use pest::error::{ErrorVariant, InputLocation};
use pest::{iterators, Parser};
use std::fmt;
use std::str::FromStr;

#[derive(Parser)]
#[grammar_inline = r####"
expr   = _{ SOI ~ disj ~ EOI }
disj   =  { conj ~ ( or_op ~ conj )* }
conj   =  { factor ~ ( and_op ~ factor )* }
factor = _{ neg | bt | bf | var | "(" ~ disj ~ ")" }
neg    =  { not_op ~ factor }
bt     =  { "1" }
bf     =  { "0" }
var    = @{ !("not" ~ !ALPHABETIC) ~ ALPHABETIC+ }

not_op = @{ "!" | "~" | "¬" | "-" | "not" ~ !ALPHABETIC }
or_op  = @{ "+" | "|" | ("or" | "v") ~ !ALPHABETIC }
and_op = @{ "." | "^" | "&" | "and" ~ !ALPHABETIC }

WHITESPACE = _{ " " | "\t" }
"####]
struct ExpressionParser;

/// A parsed expression and the collection of variables it uses.
///
/// The variables are sorted by name, this canonical order defines the UID of each variable in the
/// expression tree and its position in the truth table.
///
/// ```
/// use boolmin::{parse_expression, Rule};
/// # use boolmin::BoolminError;
/// # fn main() -> Result<(), BoolminError> {
///
/// let parsed = parse_expression("(C and A) or not B")?;
/// assert_eq!(parsed.variables().names(), ["A", "B", "C"]);
/// assert_eq!(format!("{}", parsed), "C . A + !B");
///
/// let state = parsed.variables().parse_state("A C")?;
/// assert!(parsed.expr().eval(&state)?);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Parsed {
    expr: Expr,
    variables: VarSpace,
}

impl Parsed {
    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    pub fn variables(&self) -> &VarSpace {
        &self.variables
    }

    pub fn into_inner(self) -> (Expr, VarSpace) {
        (self.expr, self.variables)
    }
}

/// Parse an expression and collect its variables.
///
/// Operators can be written with several alternative spellings:
/// * NOT: ```!```, ```~```, ```¬```, ```-```, ```not```
/// * AND: ```.```, ```&```, ```^```, ```and```
/// * OR: ```+```, ```|```, ```v```, ```or```
///
/// Variables are runs of letters, ```0``` and ```1``` are the Boolean constants.
/// Textual operators are only recognised as complete words: ```vx``` and ```notA``` are variables.
/// In the place of an operand, any word except ```not``` is a variable.
pub fn parse_expression(s: &str) -> Result<Parsed, BoolminError> {
    let root = ExpressionParser::parse(Rule::expr, s)
        .map_err(syntax_error)?
        .next()
        .ok_or_else(|| BoolminError::syntax(0, "empty expression"))?;

    let names: Vec<&str> = root
        .clone()
        .into_inner()
        .flatten()
        .filter(|p| p.as_rule() == Rule::var)
        .map(|p| p.as_str())
        .collect();
    let variables = VarSpace::from_names(names)?;
    debug!("parsed variables: {:?}", variables.names());

    let expr = load_expr(root, &variables)?;
    Ok(Parsed { expr, variables })
}

fn load_expr(pair: iterators::Pair<Rule>, variables: &VarSpace) -> Result<Expr, BoolminError> {
    let position = pair.as_span().start();
    match pair.as_rule() {
        Rule::bt => Ok(Expr::from(true)),
        Rule::bf => Ok(Expr::from(false)),
        Rule::var => variables.get_or_err(pair.as_str()).map(Expr::from),
        Rule::neg => {
            let operand = pair
                .into_inner()
                .find(|p| p.as_rule() != Rule::not_op)
                .ok_or_else(|| BoolminError::syntax(position, "missing operand"))?;
            Ok(!load_expr(operand, variables)?)
        }
        Rule::disj => load_operation(Operator::Or, pair, variables),
        Rule::conj => load_operation(Operator::And, pair, variables),
        // Other rules are hidden or consumed by their parent
        r => Err(BoolminError::syntax(position, format!("unexpected {:?}", r))),
    }
}

fn load_operation(
    op: Operator,
    pair: iterators::Pair<Rule>,
    variables: &VarSpace,
) -> Result<Expr, BoolminError> {
    let operands = pair
        .into_inner()
        .filter(|p| !matches!(p.as_rule(), Rule::and_op | Rule::or_op))
        .map(|p| load_expr(p, variables))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(op.join(operands))
}

fn syntax_error(e: pest::error::Error<Rule>) -> BoolminError {
    let position = match e.location {
        InputLocation::Pos(p) => p,
        InputLocation::Span((start, _)) => start,
    };
    let message = match &e.variant {
        ErrorVariant::ParsingError { positives, .. } if positives.is_empty() => {
            "unexpected token".to_string()
        }
        ErrorVariant::ParsingError { positives, .. } => {
            let expected: Vec<&str> = positives.iter().map(describe_rule).collect();
            format!("expected {}", expected.join(" or "))
        }
        ErrorVariant::CustomError { message } => message.clone(),
    };
    BoolminError::syntax(position, message)
}

fn describe_rule(rule: &Rule) -> &'static str {
    match rule {
        Rule::EOI => "end of input",
        Rule::disj | Rule::conj | Rule::neg => "an operand",
        Rule::bt | Rule::bf => "a constant",
        Rule::var => "a variable",
        Rule::not_op => "a negation",
        Rule::or_op => "an OR operator",
        Rule::and_op => "an AND operator",
        _ => "a token",
    }
}

impl FromStr for Parsed {
    type Err = BoolminError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_expression(s)
    }
}

impl fmt::Display for Parsed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.variables.named(&self.expr))
    }
}
