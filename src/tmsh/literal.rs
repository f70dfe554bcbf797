//! A minimal recursive-descent parser for the literal expression the decoder assembles -- mappings
//! (`{"k": v, ...}`), sequences (`["a", ...]`) and double quoted strings only. Trailing commas are
//! accepted in both containers. Nothing here evaluates code.

use crate::tmsh::node::{
    Mapping,
    Node,
};

/// Error raised by the literal parser, `offset` is the byte offset into the parsed text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiteralError {
    pub offset: usize,
    pub details: String,
}

/// Escapes `s` so it can be embedded in a double quoted literal. Braces are hex escaped so that
/// any `}"` left in the assembled text is structural.
pub fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);

    out.push('"');

    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '{' => out.push_str("\\x7b"),
            '}' => out.push_str("\\x7d"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }

    out.push('"');

    out
}

/// Parses `src` as a single literal mapping, failing if anything but whitespace follows it.
pub fn parse_mapping(src: &str) -> Result<Mapping, LiteralError> {
    let mut parser = Parser { src, pos: 0 };

    parser.skip_whitespace();

    let mapping = parser.mapping()?;

    parser.skip_whitespace();

    if parser.pos != src.len() {
        return Err(parser.error("unexpected trailing content"));
    }

    Ok(mapping)
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<char> {
        self.src.get(self.pos..).and_then(|rest| rest.chars().next())
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;

        self.pos += c.len_utf8();

        Some(c)
    }

    fn error(
        &self,
        details: &str,
    ) -> LiteralError {
        LiteralError {
            offset: self.pos,
            details: details.to_owned(),
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    fn expect(
        &mut self,
        want: char,
    ) -> Result<(), LiteralError> {
        match self.peek() {
            Some(c) if c == want => {
                self.bump();
                Ok(())
            }
            Some(c) => Err(self.error(&format!("expected '{want}', found '{c}'"))),
            None => Err(self.error(&format!("expected '{want}', found end of input"))),
        }
    }

    fn value(&mut self) -> Result<Node, LiteralError> {
        self.skip_whitespace();

        match self.peek() {
            Some('{') => Ok(Node::Mapping(self.mapping()?)),
            Some('[') => Ok(Node::List(self.sequence()?)),
            Some('"') => Ok(Node::Scalar(self.string()?)),
            Some(c) => Err(self.error(&format!("unexpected character '{c}'"))),
            None => Err(self.error("unexpected end of input")),
        }
    }

    fn mapping(&mut self) -> Result<Mapping, LiteralError> {
        self.expect('{')?;

        let mut mapping = Mapping::new();

        loop {
            self.skip_whitespace();

            if self.peek() == Some('}') {
                self.bump();
                return Ok(mapping);
            }

            let key = self.string()?;

            self.skip_whitespace();
            self.expect(':')?;

            let value = self.value()?;

            mapping.insert(key, value);

            self.skip_whitespace();

            match self.peek() {
                Some(',') => {
                    self.bump();
                }
                Some('}') => {}
                Some(c) => return Err(self.error(&format!("expected ',' or '}}', found '{c}'"))),
                None => return Err(self.error("unterminated mapping")),
            }
        }
    }

    fn sequence(&mut self) -> Result<Vec<Node>, LiteralError> {
        self.expect('[')?;

        let mut items = vec![];

        loop {
            self.skip_whitespace();

            if self.peek() == Some(']') {
                self.bump();
                return Ok(items);
            }

            items.push(self.value()?);

            self.skip_whitespace();

            match self.peek() {
                Some(',') => {
                    self.bump();
                }
                Some(']') => {}
                Some(c) => return Err(self.error(&format!("expected ',' or ']', found '{c}'"))),
                None => return Err(self.error("unterminated sequence")),
            }
        }
    }

    fn string(&mut self) -> Result<String, LiteralError> {
        self.skip_whitespace();
        self.expect('"')?;

        let mut out = String::new();

        loop {
            match self.bump() {
                Some('"') => return Ok(out),
                Some('\\') => out.push(self.escape()?),
                Some(c) => out.push(c),
                None => return Err(self.error("unterminated string")),
            }
        }
    }

    fn escape(&mut self) -> Result<char, LiteralError> {
        match self.bump() {
            Some('"') => Ok('"'),
            Some('\\') => Ok('\\'),
            Some('t') => Ok('\t'),
            Some('n') => Ok('\n'),
            Some('x') => {
                let start = self.pos;
                let digits = self
                    .src
                    .get(start..start + 2)
                    .ok_or_else(|| self.error("truncated hex escape"))?;
                let code = u8::from_str_radix(digits, 16)
                    .map_err(|_| self.error(&format!("invalid hex escape '{digits}'")))?;

                self.pos += 2;

                Ok(char::from(code))
            }
            Some(c) => Err(self.error(&format!("unknown escape '\\{c}'"))),
            None => Err(self.error("unterminated escape")),
        }
    }
}
