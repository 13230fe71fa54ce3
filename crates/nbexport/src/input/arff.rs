//! ARFF header reader.
//!
//! Reads `@relation` and `@attribute` declarations up to `@data`. Data rows
//! are never touched. Keywords are case-insensitive, `%` starts a comment
//! outside quotes, and names or nominal values may be quoted with `'` or `"`.

use std::collections::HashSet;

use crate::error::{ExportError, Result};
use crate::schema::{AttributeKind, DatasetAttribute, DatasetDescription};

/// Reads dataset descriptions from ARFF text.
#[derive(Debug, Clone, Default)]
pub struct ArffReader;

impl ArffReader {
    pub fn new() -> Self {
        Self
    }

    /// Parse the header of an ARFF document.
    pub fn read_str(&self, text: &str) -> Result<DatasetDescription> {
        let mut relation = None;
        let mut attributes: Vec<DatasetAttribute> = Vec::new();
        let mut names = HashSet::new();
        // Name of the relational attribute whose nested declarations are being skipped.
        let mut nested: Option<String> = None;

        for (idx, raw) in text.lines().enumerate() {
            let line_no = idx + 1;
            let line = strip_comment(raw);
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let mut cursor = Cursor::new(line);
            let keyword = cursor.keyword().to_ascii_lowercase();

            if let Some(ref outer) = nested {
                match keyword.as_str() {
                    "@end" => {
                        let name = cursor.token(line_no, is_name_end)?;
                        if name != *outer {
                            return Err(parse_error(
                                line_no,
                                format!(
                                    "@end {} does not close relational attribute {}",
                                    name, outer
                                ),
                            ));
                        }
                        nested = None;
                    }
                    "@attribute" => {}
                    _ => {
                        return Err(parse_error(
                            line_no,
                            format!(
                                "unexpected '{}' inside relational attribute {}",
                                keyword, outer
                            ),
                        ));
                    }
                }
                continue;
            }

            match keyword.as_str() {
                "@relation" => {
                    if relation.is_some() {
                        return Err(parse_error(line_no, "duplicate @relation"));
                    }
                    relation = Some(cursor.token(line_no, is_name_end)?);
                }
                "@attribute" => {
                    if relation.is_none() {
                        return Err(parse_error(line_no, "@attribute before @relation"));
                    }
                    let attribute = parse_attribute(&mut cursor, line_no)?;
                    if !names.insert(attribute.name.clone()) {
                        return Err(parse_error(
                            line_no,
                            format!("duplicate attribute name '{}'", attribute.name),
                        ));
                    }
                    if attribute.kind == AttributeKind::Relational {
                        nested = Some(attribute.name.clone());
                    }
                    attributes.push(attribute);
                }
                "@data" => break,
                other => {
                    return Err(parse_error(line_no, format!("unexpected '{}'", other)));
                }
            }
        }

        if let Some(outer) = nested {
            return Err(ExportError::Parse {
                line: text.lines().count(),
                message: format!("relational attribute {} is never closed", outer),
            });
        }

        let relation = relation.ok_or_else(|| {
            ExportError::EmptyData("ARFF header has no @relation".to_string())
        })?;
        if attributes.is_empty() {
            return Err(ExportError::EmptyData(format!(
                "relation '{}' declares no attributes",
                relation
            )));
        }

        Ok(DatasetDescription::new(relation, attributes))
    }
}

fn parse_error(line: usize, message: impl Into<String>) -> ExportError {
    ExportError::Parse {
        line,
        message: message.into(),
    }
}

fn parse_attribute(cursor: &mut Cursor<'_>, line_no: usize) -> Result<DatasetAttribute> {
    let name = cursor.token(line_no, is_name_end)?;
    cursor.skip_whitespace();

    if cursor.peek() == Some('{') {
        cursor.bump();
        let values = parse_nominal(cursor, line_no, &name)?;
        return Ok(DatasetAttribute::new(name, AttributeKind::Nominal { values }));
    }

    let type_name = cursor.keyword().to_ascii_lowercase();
    let kind = match type_name.as_str() {
        "numeric" | "real" | "integer" => AttributeKind::Numeric,
        "string" => AttributeKind::String,
        "date" => {
            cursor.skip_whitespace();
            let format = if cursor.is_done() {
                None
            } else {
                Some(cursor.token(line_no, char::is_whitespace)?)
            };
            AttributeKind::Date { format }
        }
        "relational" => AttributeKind::Relational,
        "" => return Err(parse_error(line_no, format!("attribute '{}' has no type", name))),
        other => {
            return Err(parse_error(
                line_no,
                format!("unknown type '{}' for attribute '{}'", other, name),
            ));
        }
    };

    cursor.skip_whitespace();
    if !cursor.is_done() {
        return Err(parse_error(
            line_no,
            format!("trailing input after type of attribute '{}'", name),
        ));
    }
    Ok(DatasetAttribute::new(name, kind))
}

fn parse_nominal(cursor: &mut Cursor<'_>, line_no: usize, name: &str) -> Result<Vec<String>> {
    let mut values = Vec::new();
    let mut seen = HashSet::new();

    cursor.skip_whitespace();
    if cursor.peek() == Some('}') {
        cursor.bump();
        return Ok(values);
    }

    loop {
        let value = cursor.token(line_no, |c| c == ',' || c == '}')?;
        if !seen.insert(value.clone()) {
            return Err(parse_error(
                line_no,
                format!("duplicate value '{}' in attribute '{}'", value, name),
            ));
        }
        values.push(value);

        cursor.skip_whitespace();
        match cursor.bump() {
            Some(',') => continue,
            Some('}') => break,
            _ => {
                return Err(parse_error(
                    line_no,
                    format!("unterminated value list for attribute '{}'", name),
                ));
            }
        }
    }

    Ok(values)
}

fn is_name_end(c: char) -> bool {
    c.is_whitespace() || c == '{'
}

/// Drop a trailing `%` comment that is not inside quotes.
fn strip_comment(line: &str) -> &str {
    let mut quote = None;
    let mut escaped = false;
    for (i, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match (c, quote) {
            ('\\', Some(_)) => escaped = true,
            ('\'' | '"', None) => quote = Some(c),
            (q, Some(open)) if q == open => quote = None,
            ('%', None) => return &line[..i],
            _ => {}
        }
    }
    line
}

/// Character cursor over one header line.
struct Cursor<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn is_done(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    /// A bare word up to whitespace or `{`.
    fn keyword(&mut self) -> &'a str {
        self.skip_whitespace();
        let input = self.input;
        let start = self.pos;
        while self.peek().is_some_and(|c| !is_name_end(c)) {
            self.bump();
        }
        &input[start..self.pos]
    }

    /// A quoted or bare token. Bare tokens end where `is_end` holds and are
    /// trimmed.
    fn token(&mut self, line_no: usize, is_end: impl Fn(char) -> bool) -> Result<String> {
        self.skip_whitespace();
        match self.peek() {
            Some(q @ ('\'' | '"')) => {
                self.bump();
                self.quoted(q, line_no)
            }
            Some(_) => {
                let start = self.pos;
                while self.peek().is_some_and(|c| !is_end(c)) {
                    self.bump();
                }
                let token = self.input[start..self.pos].trim();
                if token.is_empty() {
                    Err(parse_error(line_no, "expected a name or value"))
                } else {
                    Ok(token.to_string())
                }
            }
            None => Err(parse_error(line_no, "unexpected end of line")),
        }
    }

    fn quoted(&mut self, quote: char, line_no: usize) -> Result<String> {
        let mut out = String::new();
        loop {
            match self.bump() {
                Some('\\') => match self.bump() {
                    Some('n') => out.push('\n'),
                    Some('t') => out.push('\t'),
                    Some('r') => out.push('\r'),
                    Some(c) => out.push(c),
                    None => return Err(parse_error(line_no, "dangling escape")),
                },
                Some(c) if c == quote => return Ok(out),
                Some(c) => out.push(c),
                None => return Err(parse_error(line_no, "unterminated quoted string")),
            }
        }
    }
}
