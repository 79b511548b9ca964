use crate::error_handling::*;
use crate::memory::Environment;
use crate::operating::*;
use crate::scanning::*;
use crate::stack::Stack;

use std::fmt;
use std::str::FromStr;

/// What may sit on the yard's stack: a pending operator or an open paren.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Symbol {
    operator(Operator),
    left_paren,
    right_paren,
}

impl FromStr for Symbol {
    type Err = InvalidOperator;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "(" => Ok(Self::left_paren),
            ")" => Ok(Self::right_paren),
            _ => s.parse().map(Self::operator),
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::operator(operator) => write!(f, "{operator}"),
            Self::left_paren => f.write_str("("),
            Self::right_paren => f.write_str(")"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Term {
    value(Value),
    symbol(Symbol),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExprNode {
    value(Value),
    operator(Operator),
}

/// Terms in postfix order, ready for evaluation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Expression {
    nodes: Vec<ExprNode>,
}

impl Expression {
    pub fn nodes(&self) -> &[ExprNode] {
        &self.nodes
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl From<Vec<ExprNode>> for Expression {
    fn from(nodes: Vec<ExprNode>) -> Self {
        Self{nodes}
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, node) in self.nodes.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            match node {
                ExprNode::value(value) => write!(f, "{value}")?,
                ExprNode::operator(operator) => write!(f, "{operator}")?,
            }
        }
        Ok(())
    }
}

/// Resolves one raw term. An untouched term resolves to nothing.
pub fn validate<E: Environment + ?Sized>(term: &RawTerm, environment: &E) -> Result<Option<Term>> {
    let invalid = || CalcError::invalid_token(term.text.clone());
    match term.kind {
        TermKind::none => Ok(None),
        TermKind::number => term.text.parse().map(|value| Some(Term::value(value))).map_err(|_| invalid()),
        TermKind::identifier => match environment.lookup(&term.text) {
            Some(value) => Ok(Some(Term::value(value))),
            None if is_identifier(&term.text) => Err(CalcError::unknown_variable(term.text.clone())),
            None => Err(invalid()),
        },
        TermKind::operator | TermKind::parenthesis =>
            term.text.parse().map(|symbol| Some(Term::symbol(symbol))).map_err(|_| invalid()),
    }
}

pub struct Yard {
    expression: Vec<ExprNode>,
    stack: Stack<Symbol>,
}

impl Yard {
    pub fn new() -> Self {
        Self{expression: Vec::new(), stack: Stack::new()}
    }

    pub fn add(&mut self, term: Term) -> Result<()> {
        match term {
            Term::value(value) => self.add_value(value),
            Term::symbol(Symbol::left_paren) => self.add_left_paren(),
            Term::symbol(Symbol::right_paren) => return self.add_right_paren(),
            Term::symbol(Symbol::operator(operator)) => self.add_operator(operator),
        }
        Ok(())
    }

    fn add_value(&mut self, value: Value) {
        self.expression.push(ExprNode::value(value));
    }

    fn pop_higher_operator(&mut self, precedence: u8) -> Option<Operator> {
        match self.stack.peek() {
            Some(&Symbol::operator(operator)) if operator.precedence() >= precedence => {
                self.stack.pop();
                Some(operator)
            },
            _ => None,
        }
    }

    fn add_operator(&mut self, operator: Operator) {
        while let Some(higher) = self.pop_higher_operator(operator.precedence()) {
            self.expression.push(ExprNode::operator(higher));
        }
        self.stack.push(Symbol::operator(operator));
    }

    fn add_left_paren(&mut self) {
        self.stack.push(Symbol::left_paren);
    }

    fn add_right_paren(&mut self) -> Result<()> {
        while let Some(symbol) = self.stack.pop() {
            match symbol {
                Symbol::left_paren => return Ok(()),
                Symbol::operator(operator) => self.expression.push(ExprNode::operator(operator)),
                Symbol::right_paren => {},
            }
        }
        Err(CalcError::invalid_token(")".into()))
    }

    /// Drains what is left on the stack. An unclosed paren is dropped quietly.
    pub fn finish(mut self) -> Expression {
        while let Some(symbol) = self.stack.pop() {
            if let Symbol::operator(operator) = symbol {
                self.expression.push(ExprNode::operator(operator));
            }
        }
        Expression::from(self.expression)
    }
}

impl Default for Yard {
    fn default() -> Self {
        Self::new()
    }
}

/// Scans, validates and converts an infix line to postfix.
pub fn parse<E: Environment + ?Sized>(line: &str, environment: &E) -> Result<Expression> {
    let mut source = StringScanner::new(line)?;
    if source.is_empty() {
        return Err(CalcError::empty_expression);
    }

    let mut yard = Yard::new();
    while let Some(raw) = source.get_current() {
        if let Some(term) = validate(raw, environment)? {
            yard.add(term)?;
        }
        source.advance();
    }

    let expression = yard.finish();
    if expression.is_empty() {
        return Err(CalcError::empty_expression);
    }
    tracing::debug!(%line, postfix = %expression, "converted to postfix");
    Ok(expression)
}
