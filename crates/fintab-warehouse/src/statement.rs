//! Classification of user SQL before it reaches `DuckDB`.
//!
//! The scanner only understands enough SQL to find statement boundaries and bare
//! keywords: quoted strings, quoted identifiers and comments are skipped, so a
//! `';'` literal or a `-- drop` comment does not affect the verdict.

use crate::WarehouseError;

/// Keywords that mutate the database, the catalog or the filesystem.
const WRITE_KEYWORDS: &[&str] = &[
    "ALTER",
    "ATTACH",
    "CALL",
    "CHECKPOINT",
    "COPY",
    "CREATE",
    "DELETE",
    "DETACH",
    "DROP",
    "EXPORT",
    "IMPORT",
    "INSERT",
    "INSTALL",
    "LOAD",
    "MERGE",
    "PRAGMA",
    "TRUNCATE",
    "UPDATE",
    "VACUUM",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token<'a> {
    Word(&'a str),
    Terminator(usize),
}

/// A single SELECT or WITH statement, without its trailing terminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ReadOnlyStatement<'a> {
    sql: &'a str,
}

impl<'a> ReadOnlyStatement<'a> {
    pub(crate) fn parse(sql: &'a str) -> Result<Self, WarehouseError> {
        let tokens = scan(sql);
        let boundary = tokens
            .iter()
            .position(|token| matches!(token, Token::Terminator(_)))
            .unwrap_or(tokens.len());
        let (statement, rest) = tokens.split_at(boundary);

        if rest.iter().any(|token| matches!(token, Token::Word(_))) {
            return Err(rejected("multiple SQL statements are not allowed"));
        }
        let body = match rest.first() {
            Some(Token::Terminator(offset)) => &sql[..*offset],
            _ => sql,
        };

        let mut words = statement.iter().filter_map(|token| match token {
            Token::Word(word) => Some(*word),
            Token::Terminator(_) => None,
        });
        let Some(leading) = words.next() else {
            return Err(rejected("query must not be empty"));
        };
        if !["SELECT", "WITH"]
            .iter()
            .any(|keyword| leading.eq_ignore_ascii_case(keyword))
        {
            return Err(rejected("only SELECT/CTE queries are accepted"));
        }

        if let Some(keyword) = std::iter::once(leading)
            .chain(words)
            .find(|word| is_write_keyword(word))
        {
            return Err(WarehouseError::QueryRejected(format!(
                "{} is not allowed in a read-only query",
                keyword.to_ascii_uppercase()
            )));
        }

        Ok(Self { sql: body.trim() })
    }

    pub(crate) fn as_str(&self) -> &'a str {
        self.sql
    }
}

fn rejected(reason: &str) -> WarehouseError {
    WarehouseError::QueryRejected(reason.to_owned())
}

fn is_write_keyword(word: &str) -> bool {
    WRITE_KEYWORDS
        .iter()
        .any(|keyword| word.eq_ignore_ascii_case(keyword))
}

fn scan(sql: &str) -> Vec<Token<'_>> {
    let bytes = sql.as_bytes();
    let mut tokens = Vec::new();
    let mut index = 0;

    while index < bytes.len() {
        match bytes[index] {
            quote @ (b'\'' | b'"') => index = skip_quoted(bytes, index + 1, quote),
            b'-' if bytes.get(index + 1) == Some(&b'-') => {
                index = skip_past(bytes, index + 2, b"\n");
            }
            b'/' if bytes.get(index + 1) == Some(&b'*') => {
                index = skip_past(bytes, index + 2, b"*/");
            }
            b';' => {
                tokens.push(Token::Terminator(index));
                index += 1;
            }
            byte if byte.is_ascii_alphabetic() || byte == b'_' => {
                let start = index;
                while index < bytes.len()
                    && (bytes[index].is_ascii_alphanumeric() || bytes[index] == b'_')
                {
                    index += 1;
                }
                tokens.push(Token::Word(&sql[start..index]));
            }
            _ => index += 1,
        }
    }

    tokens
}

/// Index just past the closing quote; a doubled quote is an escaped one.
fn skip_quoted(bytes: &[u8], mut index: usize, quote: u8) -> usize {
    while index < bytes.len() {
        if bytes[index] == quote {
            if bytes.get(index + 1) == Some(&quote) {
                index += 2;
                continue;
            }
            return index + 1;
        }
        index += 1;
    }
    bytes.len()
}

fn skip_past(bytes: &[u8], from: usize, marker: &[u8]) -> usize {
    bytes
        .get(from..)
        .and_then(|rest| rest.windows(marker.len()).position(|window| window == marker))
        .map_or(bytes.len(), |offset| from + offset + marker.len())
}
