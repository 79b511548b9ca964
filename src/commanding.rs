use crate::error_handling::*;
use crate::evaluating::*;
use crate::memory::Variables;
use crate::parsing::parse;
use crate::scanning::is_identifier;

use std::fmt;
use std::path::Path;

pub const GREETING: &str = "+-+-+   Welcome to Smart Calculator   */*/*\n\
Enter a command or start calculation or type '/help'";

pub const FAREWELL: &str = "Bye!";

pub const HELP: &str = "Smart calculator commands:
/clear\tclears all variables
/vars\tprints variables
/del\tdeletes variables (space separated)
/con\tconverts infix to postfix notation
/read\treads given file and updates variables
/write\twrites variables to given file
/help\tprints help
/exit\texits program

Smart calculator operations:
(   )   +   -   *   /   %   ^

Smart calculator supports only Latin characters for variables
Smart calculator supports only integers for numerical types.";

/// What the caller should do with one line's result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    silent,
    print(String),
    exit(String),
}

impl Outcome {
    fn lines(lines: Vec<String>) -> Self {
        if lines.is_empty() {
            Self::silent
        } else {
            Self::print(lines.join("\n"))
        }
    }
}

#[derive(Clone, Copy, Debug)]
enum Context {
    expression,
    assignment,
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::expression => f.write_str("expression"),
            Self::assignment => f.write_str("assignment"),
        }
    }
}

fn report(error: CalcError, context: Context) -> Outcome {
    tracing::debug!(%error, %context, "line rejected");
    match error {
        CalcError::empty_expression => Outcome::silent,
        CalcError::invalid_token(_) | CalcError::invalid_expression => Outcome::print(format!("Invalid {context}")),
        CalcError::unknown_variable(_) => Outcome::print("Unknown variable".into()),
        CalcError::division_by_zero => Outcome::print("Division by zero".into()),
        CalcError::invalid_identifier(_) => Outcome::print("Invalid identifier".into()),
        error @ CalcError::io{..} => Outcome::print(error.to_string()),
    }
}

/// One calculator session: its variables and the commands that act on them.
#[derive(Debug, Default)]
pub struct Session {
    variables: Variables,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_variables(variables: Variables) -> Self {
        Self{variables}
    }

    pub fn variables(&self) -> &Variables {
        &self.variables
    }

    pub fn execute(&mut self, line: &str) -> Outcome {
        let line = line.trim_start();
        match line.strip_prefix('/') {
            Some(command) => self.command(command),
            None => self.assign_or_evaluate(line.trim_end()),
        }
    }

    fn command(&mut self, text: &str) -> Outcome {
        let (name, argument) = match text.split_once(' ') {
            Some((name, argument)) => (name, Some(argument.trim())),
            None => (text, None),
        };

        match (name, argument) {
            ("exit", _) => Outcome::exit(FAREWELL.into()),
            ("help", _) => Outcome::print(HELP.into()),
            ("vars", _) => self.list(),
            ("clear", _) => {
                self.variables.clear();
                Outcome::silent
            },
            ("con" | "del" | "read" | "write", None) => Outcome::silent,
            ("con", Some(infix)) => self.convert(infix),
            ("del", Some(names)) => {
                self.delete(names);
                Outcome::silent
            },
            ("read", Some(path)) => match self.read_file(Path::new(path)) {
                Ok(lines) => Outcome::lines(lines),
                Err(e) => Outcome::print(e.to_string()),
            },
            ("write", Some(path)) => match self.variables.save(Path::new(path)) {
                Ok(()) => Outcome::silent,
                Err(e) => Outcome::print(e.to_string()),
            },
            _ => Outcome::print("Unknown command".into()),
        }
    }

    fn list(&self) -> Outcome {
        Outcome::lines(self.variables.iter().map(|(name, value)| format!("{name} = {value}")).collect())
    }

    fn convert(&self, infix: &str) -> Outcome {
        match parse(infix, &self.variables) {
            Ok(postfix) => Outcome::print(postfix.to_string()),
            Err(CalcError::empty_expression) => Outcome::print(CalcError::empty_expression.to_string()),
            Err(e) => report(e, Context::expression),
        }
    }

    fn delete(&mut self, names: &str) {
        for name in names.split_whitespace() {
            if self.variables.remove(name).is_none() {
                tracing::debug!(%name, "nothing to delete");
            }
        }
    }

    /// Runs every line of a file as an assignment or expression and returns
    /// whatever those lines printed.
    pub fn read_file(&mut self, path: &Path) -> Result<Vec<String>> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            tracing::warn!(path = %path.display(), error = %e, "could not read variables");
            CalcError::io(path, e)
        })?;

        let mut printed = Vec::new();
        for line in contents.lines() {
            if let Outcome::print(text) = self.assign_or_evaluate(line.trim()) {
                printed.push(text);
            }
        }
        tracing::info!(path = %path.display(), count = self.variables.len(), "read variables");
        Ok(printed)
    }

    fn assign_or_evaluate(&mut self, line: &str) -> Outcome {
        match line.split_once('=') {
            Some((assignee, assigned)) => match self.assign(assignee.trim(), assigned.trim()) {
                Ok(()) => Outcome::silent,
                Err(e) => report(e, Context::assignment),
            },
            None => match evaluate_expression(line, &self.variables) {
                Ok(value) => Outcome::print(value.to_string()),
                Err(e) => report(e, Context::expression),
            },
        }
    }

    fn assign(&mut self, assignee: &str, assigned: &str) -> Result<()> {
        if !is_identifier(assignee) {
            return Err(CalcError::invalid_identifier(assignee.into()));
        }
        let value = evaluate_expression(assigned, &self.variables)?;
        self.variables.assign(assignee, value);
        Ok(())
    }
}
