use crate::error_handling::*;
use unicode_script::{Script, UnicodeScript};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TermKind {
    #[default]
    none,
    number,
    identifier,
    operator,
    parenthesis,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawTerm {
    pub kind: TermKind,
    pub text: String,
}

impl RawTerm {
    pub fn new(kind: TermKind, text: impl Into<String>) -> Self {
        Self{kind, text: text.into()}
    }

    /// Whether a sign directly after this term must be read as a binary operator.
    fn is_operand(&self) -> bool {
        match self.kind {
            TermKind::number | TermKind::identifier => true,
            TermKind::parenthesis => self.text == ")",
            _ => false,
        }
    }
}

pub fn is_sign(character: char) -> bool {
    matches!(character, '+' | '-')
}

pub fn is_operator(character: char) -> bool {
    matches!(character, '+' | '-' | '*' | '/' | '%' | '^')
}

pub fn is_punctuation(character: char) -> bool {
    matches!(character, '(' | ')')
}

pub fn is_latin(character: char) -> bool {
    character.is_alphabetic() && character.script() == Script::Latin
}

pub fn is_identifier(text: &str) -> bool {
    !text.is_empty() && text.chars().all(is_latin)
}

/// Collapses a run of `+` and `-` into the single sign it amounts to.
pub fn normalize_signs(run: &str) -> &'static str {
    let negative = run.chars().filter(|&c| c == '-').count() % 2 == 1;
    if negative { "-" } else { "+" }
}

#[derive(Default)]
enum State {
    #[default]
    empty,
    number(String),
    identifier(String),
    // only sign runs linger here, every other operator closes on the spot
    operator{run: String, spaced: bool},
}

#[derive(Default)]
struct Lexer {
    state: State,
    terms: Vec<RawTerm>,
}

impl Lexer {
    fn previous_is_operand(&self) -> bool {
        self.terms.last().is_some_and(RawTerm::is_operand)
    }

    fn emit(&mut self, term: RawTerm) {
        tracing::trace!(kind = ?term.kind, text = %term.text, "closed raw term");
        self.terms.push(term);
    }

    fn close(&mut self, state: State) {
        match state {
            State::empty => {},
            State::number(text) => self.emit(RawTerm::new(TermKind::number, text)),
            State::identifier(text) => self.emit(RawTerm::new(TermKind::identifier, text)),
            State::operator{run, ..} => self.emit(RawTerm::new(TermKind::operator, normalize_signs(&run))),
        }
    }

    fn open(&mut self, character: char) -> Result<State> {
        if character.is_ascii_digit() {
            Ok(State::number(character.into()))
        } else if is_sign(character) {
            Ok(State::operator{run: character.into(), spaced: false})
        } else if is_operator(character) {
            self.emit(RawTerm::new(TermKind::operator, character));
            Ok(State::empty)
        } else if is_punctuation(character) {
            self.emit(RawTerm::new(TermKind::parenthesis, character));
            Ok(State::empty)
        } else if is_latin(character) {
            Ok(State::identifier(character.into()))
        } else {
            Err(CalcError::invalid_token(character.into()))
        }
    }

    fn feed(&mut self, character: char) -> Result<()> {
        let absorbs_sign = !self.previous_is_operand();
        let next = match (std::mem::take(&mut self.state), character) {
            (State::operator{run, ..}, c) if c.is_whitespace() => State::operator{run, spaced: true},
            (state, c) if c.is_whitespace() => {
                self.close(state);
                State::empty
            },
            (State::number(mut text), c) if c.is_ascii_digit() => {
                text.push(c);
                State::number(text)
            },
            (State::identifier(mut text), c) if is_latin(c) => {
                text.push(c);
                State::identifier(text)
            },
            (State::operator{mut run, spaced}, c) if is_sign(c) => {
                run.push(c);
                State::operator{run, spaced}
            },
            (State::operator{mut run, spaced: false}, c) if c.is_ascii_digit() && run.len() == 1 && absorbs_sign => {
                run.push(c);
                State::number(run)
            },
            (state, c) => {
                self.close(state);
                self.open(c)?
            },
        };
        self.state = next;
        Ok(())
    }

    fn finish(mut self) -> Vec<RawTerm> {
        let state = std::mem::take(&mut self.state);
        self.close(state);
        self.terms
    }
}

pub fn scan(line: &str) -> Result<Vec<RawTerm>> {
    let mut lexer = Lexer::default();
    for character in line.chars() {
        lexer.feed(character)?;
    }
    Ok(lexer.finish())
}

pub trait Scanner {
    fn get_current(&self) -> Option<&RawTerm>;
    fn advance(&mut self);
}

pub struct StringScanner {
    terms: Vec<RawTerm>,
    index: usize,
}

impl StringScanner {
    pub fn new(line: &str) -> Result<Self> {
        Ok(Self{terms: scan(line)?, index: 0})
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

impl Scanner for StringScanner {
    fn get_current(&self) -> Option<&RawTerm> {
        self.terms.get(self.index)
    }

    fn advance(&mut self) {
        self.index += 1;
    }
}
