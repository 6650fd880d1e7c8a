//! Reader for list literals stored in ingredient cells
//!
//! Datasets exported from notebooks often serialize the ingredient list as
//! `['1 cup flour', "2 eggs", 'salt']`. Only flat lists are understood;
//! string items are returned, other scalars (numbers, `None`) are skipped.

use crate::error::UnparseableCell;

/// True when the trimmed cell is bracketed like a list literal
pub fn looks_like_list(cell: &str) -> bool {
    let trimmed = cell.trim();
    trimmed.starts_with('[') && trimmed.ends_with(']')
}

/// Parse a flat list literal of quoted strings
pub fn parse_list_literal(cell: &str) -> Result<Vec<String>, UnparseableCell> {
    let trimmed = cell.trim();
    let mut parser = Parser {
        chars: trimmed.char_indices().peekable(),
        len: trimmed.len(),
    };
    parser.parse_list()
}

struct Parser<'a> {
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    len: usize,
}

impl Parser<'_> {
    fn parse_list(&mut self) -> Result<Vec<String>, UnparseableCell> {
        self.expect('[')?;
        let mut items = Vec::new();

        loop {
            self.skip_whitespace();
            match self.peek() {
                Some((_, ']')) => {
                    self.chars.next();
                    break;
                }
                Some((_, quote @ ('\'' | '"'))) => {
                    self.chars.next();
                    items.push(self.parse_string(quote)?);
                }
                Some((pos, '[' | '{' | '(')) => {
                    return Err(UnparseableCell {
                        position: pos,
                        reason: "nested collections are not supported",
                    });
                }
                Some(_) => self.skip_scalar()?,
                None => return Err(self.eof("unterminated list")),
            }

            self.skip_whitespace();
            match self.chars.next() {
                Some((_, ',')) => continue,
                Some((_, ']')) => break,
                Some((pos, _)) => {
                    return Err(UnparseableCell {
                        position: pos,
                        reason: "expected ',' or ']'",
                    });
                }
                None => return Err(self.eof("unterminated list")),
            }
        }

        self.skip_whitespace();
        match self.chars.next() {
            None => Ok(items),
            Some((pos, _)) => Err(UnparseableCell {
                position: pos,
                reason: "trailing characters after list",
            }),
        }
    }

    fn parse_string(&mut self, quote: char) -> Result<String, UnparseableCell> {
        let mut value = String::new();

        loop {
            match self.chars.next() {
                Some((_, c)) if c == quote => return Ok(value),
                Some((_, '\\')) => match self.chars.next() {
                    Some((_, 'n')) => value.push('\n'),
                    Some((_, 't')) => value.push('\t'),
                    Some((_, 'r')) => value.push('\r'),
                    Some((_, other)) => value.push(other),
                    None => return Err(self.eof("dangling escape")),
                },
                Some((_, c)) => value.push(c),
                None => return Err(self.eof("unterminated string")),
            }
        }
    }

    /// Skip an unquoted scalar such as `None`, `42` or `True`
    fn skip_scalar(&mut self) -> Result<(), UnparseableCell> {
        let mut consumed = false;
        while let Some((pos, c)) = self.peek() {
            if c == ',' || c == ']' || c.is_whitespace() {
                break;
            }
            if !(c.is_alphanumeric() || matches!(c, '.' | '-' | '+' | '_')) {
                return Err(UnparseableCell {
                    position: pos,
                    reason: "unexpected character in list item",
                });
            }
            consumed = true;
            self.chars.next();
        }

        if consumed {
            Ok(())
        } else {
            Err(self.eof("empty list item"))
        }
    }

    fn expect(&mut self, expected: char) -> Result<(), UnparseableCell> {
        match self.chars.next() {
            Some((_, c)) if c == expected => Ok(()),
            Some((pos, _)) => Err(UnparseableCell {
                position: pos,
                reason: "expected '['",
            }),
            None => Err(self.eof("empty cell")),
        }
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some((_, c)) if c.is_whitespace()) {
            self.chars.next();
        }
    }

    fn peek(&mut self) -> Option<(usize, char)> {
        self.chars.peek().copied()
    }

    fn eof(&mut self, reason: &'static str) -> UnparseableCell {
        let position = self.peek().map(|(pos, _)| pos).unwrap_or(self.len);
        UnparseableCell { position, reason }
    }
}
