//! Structural validation of ICU MessageFormat strings.
//!
//! This is a validator, not a formatter: it checks that a message can be
//! parsed (balanced braces, well-formed arguments, `other` present in every
//! `plural`/`select`/`selectordinal`, apostrophe quoting) and reports the
//! first problem with its byte offset.

use std::fmt;

/// Why a message is not valid ICU.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IcuError {
    /// Byte offset into the message.
    pub offset: usize,
    pub message: String,
}

impl fmt::Display for IcuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at offset {}", self.message, self.offset)
    }
}

impl std::error::Error for IcuError {}

/// Validate `message` as ICU MessageFormat.
///
/// # Examples
///
/// ```
/// use lexid::core::icu::validate_icu;
///
/// assert!(validate_icu("Hello {name}").is_ok());
/// assert!(validate_icu("{count, plural, one {# item}}").is_err());
/// ```
pub fn validate_icu(message: &str) -> Result<(), IcuError> {
    let mut parser = Parser {
        src: message,
        pos: 0,
    };
    parser.message(false)?;
    match parser.peek() {
        None => Ok(()),
        Some(_) => Err(parser.error("unmatched '}'")),
    }
}

const SELECT_TYPES: &[&str] = &["plural", "select", "selectordinal"];
const SIMPLE_TYPES: &[&str] = &["number", "date", "time", "spellout", "ordinal", "duration"];

struct Parser<'a> {
    src: &'a str,
    pos: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn peek_at(&self, skip: usize) -> Option<char> {
        self.src[self.pos..].chars().nth(skip)
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    fn error(&self, message: impl Into<String>) -> IcuError {
        IcuError {
            offset: self.pos,
            message: message.into(),
        }
    }

    fn skip_ws(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    /// Message text up to (not including) a closing `}` or end of input.
    fn message(&mut self, in_plural: bool) -> Result<(), IcuError> {
        while let Some(ch) = self.peek() {
            match ch {
                '{' => self.argument()?,
                '}' => return Ok(()),
                '\'' => self.apostrophe(in_plural)?,
                _ => {
                    self.bump();
                }
            }
        }
        Ok(())
    }

    /// `''` is a literal quote; `'` before a syntax char opens a quoted run.
    fn apostrophe(&mut self, in_plural: bool) -> Result<(), IcuError> {
        let start = self.pos;
        self.bump();
        match self.peek() {
            Some('\'') => {
                self.bump();
            }
            Some('{') | Some('}') | Some('|') => self.quoted(start)?,
            Some('#') if in_plural => self.quoted(start)?,
            _ => {}
        }
        Ok(())
    }

    fn quoted(&mut self, start: usize) -> Result<(), IcuError> {
        loop {
            match self.bump() {
                None => {
                    return Err(IcuError {
                        offset: start,
                        message: "unterminated quoted literal".to_string(),
                    });
                }
                Some('\'') if self.peek() == Some('\'') => {
                    self.bump();
                }
                Some('\'') => return Ok(()),
                Some(_) => {}
            }
        }
    }

    fn identifier(&mut self) -> &str {
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|c| !c.is_whitespace() && !matches!(c, '{' | '}' | ',' | '\'' | '#'))
        {
            self.bump();
        }
        &self.src[start..self.pos]
    }

    fn expect(&mut self, expected: char) -> Result<(), IcuError> {
        match self.peek() {
            Some(ch) if ch == expected => {
                self.bump();
                Ok(())
            }
            Some(ch) => Err(self.error(format!("expected '{}', found '{}'", expected, ch))),
            None => Err(self.error(format!("expected '{}', found end of message", expected))),
        }
    }

    fn argument(&mut self) -> Result<(), IcuError> {
        let open = self.pos;
        self.bump();
        self.skip_ws();
        if self.identifier().is_empty() {
            return Err(self.error("missing argument name"));
        }
        self.skip_ws();
        match self.peek() {
            Some('}') => {
                self.bump();
                return Ok(());
            }
            Some(',') => {
                self.bump();
            }
            None => {
                return Err(IcuError {
                    offset: open,
                    message: "unclosed argument".to_string(),
                });
            }
            Some(ch) => return Err(self.error(format!("unexpected '{}' in argument", ch))),
        }

        self.skip_ws();
        let type_start = self.pos;
        let arg_type = self.identifier().to_string();
        self.skip_ws();
        if SELECT_TYPES.contains(&arg_type.as_str()) {
            self.expect(',')?;
            self.select_body(&arg_type)
        } else if SIMPLE_TYPES.contains(&arg_type.as_str()) {
            match self.peek() {
                Some('}') => {
                    self.bump();
                    Ok(())
                }
                Some(',') => {
                    self.bump();
                    self.style()
                }
                _ => Err(self.error("expected ',' or '}' after argument type")),
            }
        } else if arg_type.is_empty() {
            Err(self.error("missing argument type"))
        } else {
            Err(IcuError {
                offset: type_start,
                message: format!("unknown argument type '{}'", arg_type),
            })
        }
    }

    /// Style text of a simple argument; nested braces must balance.
    fn style(&mut self) -> Result<(), IcuError> {
        let mut depth = 0usize;
        loop {
            match self.bump() {
                None => return Err(self.error("unclosed argument style")),
                Some('\'') => {
                    let start = self.pos - 1;
                    if self.peek() == Some('\'') {
                        self.bump();
                    } else {
                        self.quoted(start)?;
                    }
                }
                Some('{') => depth += 1,
                Some('}') if depth == 0 => return Ok(()),
                Some('}') => depth -= 1,
                Some(_) => {}
            }
        }
    }

    fn select_body(&mut self, arg_type: &str) -> Result<(), IcuError> {
        let is_plural = arg_type != "select";
        let mut has_other = false;
        let mut seen_case = false;
        loop {
            self.skip_ws();
            match self.peek() {
                Some('}') => break,
                None => return Err(self.error(format!("unclosed {} argument", arg_type))),
                _ => {}
            }

            let selector_start = self.pos;
            let selector = self.identifier().to_string();
            if selector.is_empty() {
                return Err(self.error("missing selector"));
            }
            if is_plural && let Some(offset) = selector.strip_prefix("offset:") {
                if seen_case || offset.parse::<u32>().is_err() {
                    return Err(IcuError {
                        offset: selector_start,
                        message: "invalid plural offset".to_string(),
                    });
                }
                continue;
            }
            if is_plural
                && let Some(exact) = selector.strip_prefix('=')
                && exact.parse::<f64>().is_err()
            {
                return Err(IcuError {
                    offset: selector_start,
                    message: format!("invalid exact selector '{}'", selector),
                });
            }
            if selector == "other" {
                has_other = true;
            }
            seen_case = true;

            self.skip_ws();
            self.expect('{')?;
            self.message(is_plural)?;
            self.expect('}')?;
        }

        if !seen_case {
            return Err(self.error(format!("{} argument has no cases", arg_type)));
        }
        if !has_other {
            return Err(self.error(format!("{} argument is missing an 'other' case", arg_type)));
        }
        self.bump();
        Ok(())
    }
}
