//! Wire-format handling for CDDB server responses.
//!
//! Responses are UTF-8 text with CRLF line endings. The first line starts
//! with a numeric status code; multi-entry bodies end with a line holding a
//! single `.`. Everything here is pure string work so it can be tested with
//! canned responses, with no transport involved.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::record::DiscRecord;

/// Terminator line closing a multi-entry response body.
const TERMINATOR: &str = ".";

/// One query match: where the entry is filed and what it is called.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryMatch {
    /// Category the entry is filed under (e.g. `jazz`, `misc`).
    pub category: String,
    /// 8-hex-digit disc id of the stored entry.
    pub disc_id: String,
    /// Album title, typically `Artist / Title`. May contain spaces.
    pub title: String,
}

/// Outcome of a `cddb query` command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum QueryResult {
    /// Status 200: the server found exactly one entry.
    Exact(QueryMatch),
    /// Status 210 or 211: zero or more candidate entries; the caller picks
    /// one and follows up with a read.
    Inexact { status: u16, matches: Vec<QueryMatch> },
    /// Any other status (202 no match, 403 corrupt database, 5xx server
    /// trouble). Interpreting the code is the caller's business.
    Other(u16),
}

impl QueryResult {
    /// The protocol status code this result was built from.
    pub fn status(&self) -> u16 {
        match self {
            Self::Exact(_) => 200,
            Self::Inexact { status, .. } => *status,
            Self::Other(status) => *status,
        }
    }
}

/// Outcome of a `cddb read` command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ReadResult {
    /// Status 210: the entry body, parsed.
    Entry(DiscRecord),
    /// Status 417: the server refused access. The raw body lines are kept
    /// verbatim; this is a protocol-level rejection, not a parse failure.
    AccessDenied(Vec<String>),
    /// Any other status, no payload.
    Other(u16),
}

impl ReadResult {
    /// The protocol status code this result was built from.
    pub fn status(&self) -> u16 {
        match self {
            Self::Entry(_) => 210,
            Self::AccessDenied(_) => 417,
            Self::Other(status) => *status,
        }
    }
}

/// Parse the body of a `cddb query` response.
pub fn parse_query_response(body: &str) -> Result<QueryResult> {
    let lines = split_lines(body);
    let status = status_code(lines[0])?;

    match status {
        200 => {
            // Fixed-position body: category, disc id, title.
            if lines.len() < 4 {
                return Err(Error::protocol(format!(
                    "exact match body has {} lines, expected 4",
                    lines.len()
                )));
            }
            Ok(QueryResult::Exact(QueryMatch {
                category: lines[1].to_string(),
                disc_id: lines[2].to_string(),
                title: lines[3].to_string(),
            }))
        }
        210 | 211 => {
            let mut matches = Vec::new();
            for line in &lines[1..] {
                if *line == TERMINATOR {
                    break;
                }
                matches.push(parse_match_line(line)?);
            }
            Ok(QueryResult::Inexact { status, matches })
        }
        other => Ok(QueryResult::Other(other)),
    }
}

/// Parse the body of a `cddb read` response.
pub fn parse_read_response(body: &str) -> Result<ReadResult> {
    let lines = split_lines(body);
    let status = status_code(lines[0])?;

    match status {
        210 => Ok(ReadResult::Entry(DiscRecord::parse(
            body_lines(&lines).into_iter(),
        ))),
        417 => Ok(ReadResult::AccessDenied(
            body_lines(&lines).into_iter().map(String::from).collect(),
        )),
        other => Ok(ReadResult::Other(other)),
    }
}

/// Split a response into lines on the protocol's CRLF terminator.
/// Always yields at least one element.
fn split_lines(body: &str) -> Vec<&str> {
    body.split("\r\n").collect()
}

/// Extract the numeric status code from the first response line.
fn status_code(line: &str) -> Result<u16> {
    let token = line
        .split_whitespace()
        .next()
        .ok_or_else(|| Error::protocol("empty status line"))?;
    token
        .parse()
        .map_err(|_| Error::protocol(format!("status line {line:?} has no numeric code")))
}

/// Body lines between the status line and the `.` terminator.
fn body_lines<'a>(lines: &[&'a str]) -> Vec<&'a str> {
    lines[1..]
        .iter()
        .take_while(|line| **line != TERMINATOR)
        .copied()
        .collect()
}

/// Split a match line into category, disc id, and title. The title may
/// contain spaces, so only the first two space boundaries split.
fn parse_match_line(line: &str) -> Result<QueryMatch> {
    let mut fields = line.splitn(3, ' ');
    let (Some(category), Some(disc_id), Some(title)) =
        (fields.next(), fields.next(), fields.next())
    else {
        return Err(Error::protocol(format!(
            "match line {line:?} has fewer than 3 fields"
        )));
    };
    Ok(QueryMatch {
        category: category.to_string(),
        disc_id: disc_id.to_string(),
        title: title.to_string(),
    })
}
