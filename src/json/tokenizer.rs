//! Single-pass JSON tokenizer over a fixed token pool
//!
//! Tokens are stored flat and addressed by index; the container tree is
//! encoded through `parent` links and per-container child counts. Nothing is
//! decoded here: strings and primitives are byte spans into the source text.

use crate::error::{ParseError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Object,
    Array,
    String,
    Primitive,
}

/// One lexical element of the document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// First byte of the span (for strings, the byte after the opening quote)
    pub start: usize,
    /// One past the last byte; `None` while a container is still open
    pub end: Option<usize>,
    /// Direct children of an object or array (object keys and values both count)
    pub size: usize,
    /// Index of the enclosing container
    pub parent: Option<usize>,
}

impl Token {
    fn new(kind: TokenKind, start: usize, end: Option<usize>, parent: Option<usize>) -> Self {
        Self {
            kind,
            start,
            end,
            size: 0,
            parent,
        }
    }

    pub fn is_container(&self) -> bool {
        matches!(self.kind, TokenKind::Object | TokenKind::Array)
    }

    /// End offset, falling back to `start` for a container that never closed
    pub fn end_offset(&self) -> usize {
        self.end.unwrap_or(self.start)
    }
}

/// Pool size used for a document of `text_len` bytes
pub fn token_capacity_for(text_len: usize) -> usize {
    text_len / 4 + 256
}

/// Tokenize `text` with the default pool size
///
/// The input is raw bytes; anything that is not structural passes through
/// untouched, so string values need not be valid UTF-8.
pub fn tokenize<T: AsRef<[u8]> + ?Sized>(text: &T) -> Result<Vec<Token>> {
    let text = text.as_ref();
    tokenize_with_capacity(text, token_capacity_for(text.len()))
}

/// Tokenize `text` into a pool of at most `capacity` tokens
///
/// Either every byte is accounted for and every container closed, or the
/// whole parse fails.
pub fn tokenize_with_capacity<T: AsRef<[u8]> + ?Sized>(
    text: &T,
    capacity: usize,
) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    tokens.try_reserve_exact(capacity)?;

    let mut parser = Parser {
        text: text.as_ref(),
        position: 0,
        open_container: None,
        tokens,
        capacity,
    };
    parser.run()?;
    Ok(parser.tokens)
}

struct Parser<'t> {
    text: &'t [u8],
    position: usize,
    open_container: Option<usize>,
    tokens: Vec<Token>,
    capacity: usize,
}

impl Parser<'_> {
    fn run(&mut self) -> std::result::Result<(), ParseError> {
        while self.position < self.text.len() {
            match self.text[self.position] {
                c @ (b'{' | b'[') => {
                    let kind = if c == b'{' {
                        TokenKind::Object
                    } else {
                        TokenKind::Array
                    };
                    let index = self.allocate(Token::new(
                        kind,
                        self.position,
                        None,
                        self.open_container,
                    ))?;
                    self.count_child();
                    self.open_container = Some(index);
                }
                c @ (b'}' | b']') => {
                    let expected = if c == b'}' {
                        TokenKind::Object
                    } else {
                        TokenKind::Array
                    };
                    self.close(expected)?;
                }
                b'"' => {
                    self.parse_string()?;
                    self.count_child();
                }
                b'\t' | b'\r' | b'\n' | b' ' | b':' | b',' => {}
                _ => {
                    self.parse_primitive()?;
                    self.count_child();
                }
            }
            self.position += 1;
        }

        let unclosed = self
            .tokens
            .iter()
            .find(|token| token.is_container() && token.end.is_none());
        match unclosed {
            Some(unclosed) => Err(ParseError::UnclosedContainer {
                start: unclosed.start,
            }),
            None => Ok(()),
        }
    }

    fn allocate(&mut self, token: Token) -> std::result::Result<usize, ParseError> {
        if self.tokens.len() >= self.capacity {
            return Err(ParseError::PoolExhausted {
                capacity: self.capacity,
            });
        }
        self.tokens.push(token);
        Ok(self.tokens.len() - 1)
    }

    fn count_child(&mut self) {
        if let Some(open) = self.open_container {
            self.tokens[open].size += 1;
        }
    }

    /// Close the most recent unclosed container, which must be of `expected` kind
    fn close(&mut self, expected: TokenKind) -> std::result::Result<(), ParseError> {
        let offset = self.position;
        let index = self
            .tokens
            .iter()
            .rposition(|token| token.is_container() && token.end.is_none())
            .ok_or(ParseError::UnmatchedCloser { offset })?;

        let token = &mut self.tokens[index];
        if token.kind != expected {
            return Err(ParseError::MismatchedCloser { offset });
        }
        token.end = Some(offset + 1);
        self.open_container = token.parent;
        Ok(())
    }

    /// Leaves `position` on the closing quote
    fn parse_string(&mut self) -> std::result::Result<(), ParseError> {
        let start = self.position;
        self.position += 1;

        while self.position < self.text.len() {
            match self.text[self.position] {
                b'"' => {
                    self.allocate(Token::new(
                        TokenKind::String,
                        start + 1,
                        Some(self.position),
                        self.open_container,
                    ))?;
                    return Ok(());
                }
                b'\\' => {
                    self.position += 1;
                    if self.position >= self.text.len() {
                        break;
                    }
                }
                c if c < 0x20 => {
                    return Err(ParseError::ControlCharacter {
                        offset: self.position,
                    })
                }
                _ => {}
            }
            self.position += 1;
        }
        Err(ParseError::UnterminatedString { start })
    }

    /// Leaves `position` on the last byte of the primitive
    fn parse_primitive(&mut self) -> std::result::Result<(), ParseError> {
        let start = self.position;

        while self.position < self.text.len() {
            match self.text[self.position] {
                b'\t' | b'\r' | b'\n' | b' ' | b',' | b']' | b'}' => break,
                c if c < 0x20 => {
                    return Err(ParseError::ControlCharacter {
                        offset: self.position,
                    })
                }
                _ => self.position += 1,
            }
        }

        self.allocate(Token::new(
            TokenKind::Primitive,
            start,
            Some(self.position),
            self.open_container,
        ))?;
        self.position -= 1;
        Ok(())
    }
}
