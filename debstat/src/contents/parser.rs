//! Parsing of individual Contents records.
//!
//! A record is `<file-path><whitespace><package-spec>` where the package spec
//! is one or more comma-separated `section/package` tokens:
//!
//! ```text
//! usr/bin/ash                          shells/ash
//! usr/share/doc/x/copyright            doc/x-doc,admin/x
//! ```
//!
//! Parsing works on raw bytes. Package names that are not valid UTF-8 are
//! decoded lossily; in practice the archive only uses ASCII names.

use std::borrow::Cow;
use std::slice::Split;

use thiserror::Error;

use super::lines::strip_line_terminator;

/// A record without a path/package-spec separator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed Contents line: no whitespace between path and package list")]
pub struct MalformedLine;

fn is_comma(b: &u8) -> bool {
    *b == b','
}

/// Iterator over the package names referenced by one record.
///
/// Yields names in the order they appear in the package spec. Tokens whose
/// last `/` segment is empty are skipped.
#[derive(Debug, Clone)]
pub struct PackageNames<'a> {
    tokens: Option<Split<'a, u8, fn(&u8) -> bool>>,
}

impl<'a> PackageNames<'a> {
    fn new(field: &'a [u8]) -> Self {
        Self {
            tokens: Some(field.split(is_comma as fn(&u8) -> bool)),
        }
    }

    fn empty() -> Self {
        Self { tokens: None }
    }
}

impl<'a> Iterator for PackageNames<'a> {
    type Item = Cow<'a, str>;

    fn next(&mut self) -> Option<Self::Item> {
        let tokens = self.tokens.as_mut()?;
        for token in tokens {
            if let Some(name) = package_name(token) {
                return Some(name);
            }
        }
        None
    }
}

/// Last `/` segment of a package-spec token, if non-empty.
fn package_name(token: &[u8]) -> Option<Cow<'_, str>> {
    let segment = token.rsplit(|&b| b == b'/').next()?;
    if segment.is_empty() {
        return None;
    }
    Some(String::from_utf8_lossy(segment))
}

/// Locate the package-spec field of a record.
///
/// The path is the longest non-whitespace prefix and must be non-empty; it
/// must be followed by at least one whitespace byte.
fn package_field(record: &[u8]) -> Result<&[u8], MalformedLine> {
    let record = strip_line_terminator(record);

    let path_len = record
        .iter()
        .position(u8::is_ascii_whitespace)
        .ok_or(MalformedLine)?;
    if path_len == 0 {
        return Err(MalformedLine);
    }

    let rest = &record[path_len..];
    let sep_len = rest
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(rest.len());

    Ok(&rest[sep_len..])
}

/// Parse a record into the package names it references.
///
/// Returns [`MalformedLine`] when the record has no path/package separator.
/// A record whose package field is empty parses successfully to no names.
pub fn parse_record(record: &[u8]) -> Result<PackageNames<'_>, MalformedLine> {
    package_field(record).map(PackageNames::new)
}

/// Lenient form of [`parse_record`]: malformed records yield no names.
pub fn parse_line(record: &[u8]) -> PackageNames<'_> {
    parse_record(record).unwrap_or_else(|_| PackageNames::empty())
}
