//! Pest grammar parser for session scripts

use std::time::Duration;

use pest::Parser;
use pest_derive::Parser;

use crate::error::{DevdeckError, Result};
use crate::history::Direction;
use crate::parser::ast::*;

#[derive(Parser)]
#[grammar = "../grammar/session.pest"]
pub struct SessionParser;

/// Parse a whole script, one statement per line
pub fn parse_script(input: &str) -> Result<Script> {
    let pair = SessionParser::parse(Rule::script, input)
        .map_err(|e| DevdeckError::ParseError(e.to_string()))?
        .next()
        .ok_or_else(|| DevdeckError::ParseError("Empty script".to_string()))?;

    let mut statements = Vec::new();
    for inner in pair.into_inner() {
        if inner.as_rule() == Rule::statement {
            let line = inner.as_span().start_pos().line_col().0;
            statements.push(ScriptLine {
                line,
                statement: parse_statement(inner)?,
            });
        }
    }

    Ok(Script { statements })
}

/// Parse a single prompt line; `None` for a blank line
pub fn parse_line(input: &str) -> Result<Option<Statement>> {
    let pair = SessionParser::parse(Rule::command, input)
        .map_err(|e| DevdeckError::ParseError(e.to_string()))?
        .next()
        .ok_or_else(|| DevdeckError::ParseError("Empty input".to_string()))?;

    pair.into_inner()
        .find(|p| p.as_rule() == Rule::statement)
        .map(parse_statement)
        .transpose()
}

fn parse_statement(pair: pest::iterators::Pair<Rule>) -> Result<Statement> {
    let inner = pair
        .into_inner()
        .next()
        .ok_or_else(|| DevdeckError::ParseError("Expected statement content".to_string()))?;

    let statement = match inner.as_rule() {
        Rule::up => Statement::Event(SessionEvent::HistoryKey(Direction::Previous)),
        Rule::down => Statement::Event(SessionEvent::HistoryKey(Direction::Next)),
        Rule::tests => Statement::Event(SessionEvent::RunTestsClicked),
        Rule::status => Statement::Status,
        Rule::wait => Statement::Wait,
        Rule::toggle => Statement::Event(SessionEvent::ContainerToggle(single_arg(inner)?)),
        Rule::remove => Statement::Event(SessionEvent::ContainerRemove(single_arg(inner)?)),
        Rule::sleep => {
            let raw = single_arg(inner)?;
            let millis = raw
                .parse::<u64>()
                .map_err(|_| DevdeckError::ParseError(format!("Invalid sleep duration: {}", raw)))?;
            Statement::Sleep(Duration::from_millis(millis))
        }
        Rule::edit => {
            let string = inner
                .into_inner()
                .next()
                .ok_or_else(|| DevdeckError::ParseError("Expected string after :edit".to_string()))?;
            let raw = string
                .into_inner()
                .next()
                .map(|p| p.as_str())
                .unwrap_or("");
            Statement::Event(SessionEvent::CodeBufferEdited(unescape(raw)))
        }
        Rule::load => Statement::LoadBuffer(single_arg(inner)?.trim_end().to_string()),
        Rule::shell => Statement::Event(SessionEvent::CommandSubmitted(inner.as_str().trim().to_string())),
        _ => {
            return Err(DevdeckError::ParseError(format!(
                "Unexpected rule: {:?}",
                inner.as_rule()
            )))
        }
    };

    Ok(statement)
}

fn single_arg(pair: pest::iterators::Pair<Rule>) -> Result<String> {
    let rule = pair.as_rule();
    pair.into_inner()
        .next()
        .map(|p| p.as_str().to_string())
        .ok_or_else(|| DevdeckError::ParseError(format!("Missing argument for {:?}", rule)))
}

fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}
