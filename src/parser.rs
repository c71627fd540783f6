use crate::error::ParseError;
use crate::value::{Compound, Value};

type ParseResult<T> = std::result::Result<T, ParseError>;

/// Parse SNBT text into a value tree. Content after the first value is ignored.
pub fn parse(text: &str) -> ParseResult<Value> {
    Parser::new(text).parse_value()
}

/// Parse a whole SNBT document whose root must be a compound.
///
/// Only whitespace and comments may follow the closing brace.
pub fn parse_root_compound(text: &str) -> ParseResult<Compound> {
    let mut parser = Parser::new(text);
    let root = match parser.parse_value()? {
        Value::Compound(map) => map,
        _ => return Err(ParseError::RootNotCompound),
    };
    parser.skip_trivia()?;
    if parser.pos < parser.chars.len() {
        return Err(ParseError::TrailingContent(parser.pos));
    }
    Ok(root)
}

/// Deepest compound/list nesting accepted before parsing stops with `TooDeep`.
pub const MAX_DEPTH: usize = 512;

struct Parser {
    chars: Vec<char>,
    pos: usize,
    depth: usize,
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '+' | '-' | '.' | ':' | '/' | '#')
}

fn is_key_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '/' | '-')
}

impl Parser {
    fn new(text: &str) -> Self {
        Parser {
            chars: text.chars().collect(),
            pos: 0,
            depth: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, ahead: usize) -> Option<char> {
        self.chars.get(self.pos + ahead).copied()
    }

    fn eat(&mut self, c: char) -> bool {
        if self.peek() == Some(c) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn at_comment_start(&self) -> bool {
        self.peek() == Some('/') && matches!(self.peek_at(1), Some('/' | '*'))
    }

    fn skip_line(&mut self) {
        while let Some(c) = self.peek() {
            self.pos += 1;
            if c == '\n' {
                break;
            }
        }
    }

    /// Skip whitespace and `//`, `/* */`, `#` comments.
    fn skip_trivia(&mut self) -> ParseResult<()> {
        loop {
            match self.peek() {
                Some(c) if c.is_whitespace() => self.pos += 1,
                Some('#') => self.skip_line(),
                Some('/') if self.peek_at(1) == Some('/') => self.skip_line(),
                Some('/') if self.peek_at(1) == Some('*') => {
                    let start = self.pos;
                    self.pos += 2;
                    loop {
                        match self.peek() {
                            None => return Err(ParseError::UnterminatedComment(start)),
                            Some('*') if self.peek_at(1) == Some('/') => {
                                self.pos += 2;
                                break;
                            }
                            Some(_) => self.pos += 1,
                        }
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    fn parse_value(&mut self) -> ParseResult<Value> {
        self.skip_trivia()?;
        match self.peek() {
            None => Err(ParseError::UnexpectedEof(self.pos)),
            Some('{') => self.nested(Self::parse_compound),
            Some('[') => self.nested(Self::parse_list),
            Some('"' | '\'') => self.parse_string().map(Value::Str),
            Some(c) if is_word_char(c) => {
                let word = self.read_run(is_word_char);
                Ok(classify_word(&word))
            }
            Some(found) => Err(ParseError::UnexpectedChar {
                found,
                offset: self.pos,
            }),
        }
    }

    /// Runs `f` one nesting level deeper, refusing to go past `MAX_DEPTH`.
    fn nested(&mut self, f: fn(&mut Self) -> ParseResult<Value>) -> ParseResult<Value> {
        if self.depth >= MAX_DEPTH {
            return Err(ParseError::TooDeep(self.pos));
        }
        self.depth += 1;
        let value = f(self);
        self.depth -= 1;
        value
    }

    fn parse_compound(&mut self) -> ParseResult<Value> {
        self.pos += 1;
        let mut map = Compound::new();
        loop {
            self.skip_trivia()?;
            // empty compound, or a trailing comma
            if self.eat('}') {
                break;
            }
            let key = self.parse_key()?;
            self.skip_trivia()?;
            match self.peek() {
                Some(':') => self.pos += 1,
                Some(found) => {
                    return Err(ParseError::UnexpectedChar {
                        found,
                        offset: self.pos,
                    });
                }
                None => return Err(ParseError::UnexpectedEof(self.pos)),
            }
            let value = self.parse_value()?;
            map.insert(key, value);
            self.skip_trivia()?;
            match self.peek() {
                Some(',') => self.pos += 1,
                Some('}') => {
                    self.pos += 1;
                    break;
                }
                Some(found) => {
                    return Err(ParseError::UnmatchedDelimiter {
                        expected: "',' or '}'",
                        found,
                        offset: self.pos,
                    });
                }
                None => return Err(ParseError::UnexpectedEof(self.pos)),
            }
        }
        Ok(Value::Compound(map))
    }

    fn parse_key(&mut self) -> ParseResult<String> {
        match self.peek() {
            None => Err(ParseError::UnexpectedEof(self.pos)),
            Some('"' | '\'') => self.parse_string(),
            Some(c) if is_key_char(c) && !self.at_comment_start() => Ok(self.read_run(is_key_char)),
            Some(_) => Err(ParseError::InvalidKey(self.pos)),
        }
    }

    fn parse_list(&mut self) -> ParseResult<Value> {
        self.pos += 1;
        // typed arrays: [B; ...], [I; ...], [L; ...]
        let array_kind = match (self.peek(), self.peek_at(1)) {
            (Some(k @ ('B' | 'I' | 'L')), Some(';')) => {
                self.pos += 2;
                Some(k)
            }
            _ => None,
        };

        let mut items = Vec::new();
        loop {
            self.skip_trivia()?;
            if self.eat(']') {
                break;
            }
            let value = self.parse_value()?;
            items.push(match array_kind {
                Some(kind) => narrow_array_element(kind, value),
                None => value,
            });
            self.skip_trivia()?;
            match self.peek() {
                Some(',') => self.pos += 1,
                Some(']') => {
                    self.pos += 1;
                    break;
                }
                Some(found) => {
                    return Err(ParseError::UnmatchedDelimiter {
                        expected: "',' or ']'",
                        found,
                        offset: self.pos,
                    });
                }
                None => return Err(ParseError::UnexpectedEof(self.pos)),
            }
        }
        Ok(Value::List(items))
    }

    fn parse_string(&mut self) -> ParseResult<String> {
        let start = self.pos;
        let quote = self.chars[start];
        self.pos += 1;
        let mut out = String::new();
        loop {
            let Some(c) = self.peek() else {
                return Err(ParseError::UnterminatedString(start));
            };
            self.pos += 1;
            if c == quote {
                return Ok(out);
            }
            if c != '\\' {
                out.push(c);
                continue;
            }
            let Some(escaped) = self.peek() else {
                return Err(ParseError::UnterminatedString(start));
            };
            self.pos += 1;
            match escaped {
                '"' | '\\' | '\'' | '/' => out.push(escaped),
                'b' => out.push('\u{8}'),
                'f' => out.push('\u{c}'),
                'n' => out.push('\n'),
                'r' => out.push('\r'),
                't' => out.push('\t'),
                'u' => out.push(self.read_unicode_escape(self.pos - 2)?),
                other => {
                    out.push('\\');
                    out.push(other);
                }
            }
        }
    }

    /// Reads the hex part of a `\u` escape, combining surrogate pairs.
    fn read_unicode_escape(&mut self, escape_start: usize) -> ParseResult<char> {
        let unit = self.read_hex4(escape_start)?;
        if (0xD800..0xDC00).contains(&unit)
            && self.peek() == Some('\\')
            && self.peek_at(1) == Some('u')
        {
            let low_start = self.pos;
            self.pos += 2;
            let low = self.read_hex4(low_start)?;
            if (0xDC00..0xE000).contains(&low) {
                let combined = 0x10000 + ((unit - 0xD800) << 10) + (low - 0xDC00);
                return Ok(char::from_u32(combined).unwrap_or(char::REPLACEMENT_CHARACTER));
            }
            self.pos = low_start;
        }
        Ok(char::from_u32(unit).unwrap_or(char::REPLACEMENT_CHARACTER))
    }

    fn read_hex4(&mut self, escape_start: usize) -> ParseResult<u32> {
        let mut code = 0u32;
        for _ in 0..4 {
            let digit = self
                .peek()
                .and_then(|c| c.to_digit(16))
                .ok_or(ParseError::InvalidUnicodeEscape(escape_start))?;
            code = code * 16 + digit;
            self.pos += 1;
        }
        Ok(code)
    }

    fn read_run(&mut self, accept: fn(char) -> bool) -> String {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if !accept(c) || self.at_comment_start() {
                break;
            }
            self.pos += 1;
        }
        self.chars[start..self.pos].iter().collect()
    }
}

fn narrow_array_element(kind: char, value: Value) -> Value {
    let n = value.as_i64();
    match (kind, n) {
        ('B', Some(n)) => i8::try_from(n).map(Value::Byte).unwrap_or(value),
        ('I', Some(n)) => i32::try_from(n).map(Value::Int).unwrap_or(value),
        ('L', Some(n)) => Value::Long(n),
        _ => value,
    }
}

/// Classify a bare token: boolean, resource identifier, suffixed number, or plain string.
fn classify_word(word: &str) -> Value {
    if word.eq_ignore_ascii_case("true") {
        return Value::Bool(true);
    }
    if word.eq_ignore_ascii_case("false") {
        return Value::Bool(false);
    }
    if word.contains([':', '/']) {
        return Value::Str(word.to_string());
    }
    parse_number(word).unwrap_or_else(|| Value::Str(word.to_string()))
}

fn parse_number(word: &str) -> Option<Value> {
    let (body, suffix) = match word.char_indices().last() {
        Some((i, c)) if i > 0 && matches!(c.to_ascii_lowercase(), 'b' | 's' | 'l' | 'f' | 'd') => {
            (&word[..i], Some(c.to_ascii_lowercase()))
        }
        _ => (word, None),
    };
    if !looks_numeric(body) {
        return None;
    }
    match suffix {
        Some('b') => body.parse::<i8>().ok().map(Value::Byte),
        Some('s') => body.parse::<i16>().ok().map(Value::Short),
        Some('l') => body.parse::<i64>().ok().map(Value::Long),
        Some('f') => body.parse::<f32>().ok().map(Value::Float),
        Some('d') => body.parse::<f64>().ok().map(Value::Double),
        _ if body.contains(['.', 'e', 'E']) => body.parse::<f64>().ok().map(Value::Double),
        _ => body.parse::<i64>().ok().map(Value::Long),
    }
}

// Keeps words like `NaN` or `inf` out of float parsing.
fn looks_numeric(s: &str) -> bool {
    s.chars().any(|c| c.is_ascii_digit())
        && s
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("true", Value::Bool(true))]
    #[case("FALSE", Value::Bool(false))]
    #[case("1b", Value::Byte(1))]
    #[case("-3S", Value::Short(-3))]
    #[case("42", Value::Long(42))]
    #[case("42L", Value::Long(42))]
    #[case("1.5f", Value::Float(1.5))]
    #[case("5d", Value::Double(5.0))]
    #[case("2.25", Value::Double(2.25))]
    #[case("1e3", Value::Double(1000.0))]
    #[case("minecraft:stone", Value::Str("minecraft:stone".into()))]
    #[case("textures/gui/bg.png", Value::Str("textures/gui/bg.png".into()))]
    #[case("300b", Value::Str("300b".into()))]
    #[case("NaN", Value::Str("NaN".into()))]
    #[case("inf", Value::Str("inf".into()))]
    #[case("VISIBLE", Value::Str("VISIBLE".into()))]
    fn classifies_bare_words(#[case] text: &str, #[case] expected: Value) {
        assert_eq!(parse(text).unwrap(), expected);
    }

    #[rstest]
    #[case(r#""a\"b""#, "a\"b")]
    #[case(r"'it\'s'", "it's")]
    #[case(r#""tab\there""#, "tab\there")]
    #[case(r#""\u00e9""#, "é")]
    #[case(r#""\ud83d\ude00""#, "😀")]
    #[case(r#""keep \q""#, "keep \\q")]
    #[case("\"multi\nline\"", "multi\nline")]
    fn decodes_strings(#[case] text: &str, #[case] expected: &str) {
        assert_eq!(parse(text).unwrap(), Value::Str(expected.into()));
    }

    #[test]
    fn compound_keeps_insertion_order_and_last_write_wins() {
        let root = parse_root_compound("{b: 1, a: 2, b: 3}").unwrap();
        let keys: Vec<&str> = root.keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, vec!["b", "a"]);
        assert_eq!(root["b"], Value::Long(3));
    }

    #[test]
    fn skips_all_comment_styles() {
        let text = r#"
            # leading hash comment
            {
                // line comment
                id: "x", /* block
                comment */ count: 2
            }
            // trailing comment
        "#;
        let root = parse_root_compound(text).unwrap();
        assert_eq!(root["id"], Value::Str("x".into()));
        assert_eq!(root["count"], Value::Long(2));
    }

    #[test]
    fn parses_nested_lists_and_typed_arrays() {
        let root = parse_root_compound("{l: [[1b], []], ints: [I; 1, 2], bytes: [B; 3, 4]}").unwrap();
        assert_eq!(
            root["l"],
            Value::List(vec![Value::List(vec![Value::Byte(1)]), Value::List(vec![])])
        );
        assert_eq!(root["ints"], Value::List(vec![Value::Int(1), Value::Int(2)]));
        assert_eq!(root["bytes"], Value::List(vec![Value::Byte(3), Value::Byte(4)]));
    }

    #[test]
    fn tolerates_trailing_comma() {
        let root = parse_root_compound("{a: [1, 2,], b: 1,}").unwrap();
        assert_eq!(root.len(), 2);
    }

    #[test]
    fn quoted_keys() {
        let root = parse_root_compound(r#"{"with space": 1b, 'single': "s"}"#).unwrap();
        assert!(root.contains_key("with space"));
        assert!(root.contains_key("single"));
    }

    #[test]
    fn root_must_be_compound() {
        let err = parse_root_compound("[1,2,3]").unwrap_err();
        assert_eq!(err, ParseError::RootNotCompound);
        assert!(err.to_string().contains("Root of SNBT must be a compound"));
    }

    #[test]
    fn rejects_trailing_content() {
        let err = parse_root_compound("{id:\"x\"} extra").unwrap_err();
        assert_eq!(err, ParseError::TrailingContent(9));
        assert!(err.to_string().contains("Trailing content"));
        // plain parse ignores what follows the first value
        assert!(parse("{id:\"x\"} extra").is_ok());
    }

    #[rstest]
    #[case("", ParseError::UnexpectedEof(0))]
    #[case("{id:\"oops", ParseError::UnterminatedString(4))]
    #[case("{a: 1", ParseError::UnexpectedEof(5))]
    #[case("/* never closed", ParseError::UnterminatedComment(0))]
    #[case("{\"\\u12\"}", ParseError::InvalidUnicodeEscape(2))]
    #[case("{,}", ParseError::InvalidKey(1))]
    #[case("{a 1}", ParseError::UnexpectedChar { found: '1', offset: 3 })]
    #[case("{a: 1]", ParseError::UnmatchedDelimiter { expected: "',' or '}'", found: ']', offset: 5 })]
    #[case("[1 }", ParseError::UnmatchedDelimiter { expected: "',' or ']'", found: '}', offset: 3 })]
    fn reports_failures_with_offsets(#[case] text: &str, #[case] expected: ParseError) {
        assert_eq!(parse(text).unwrap_err(), expected);
    }

    #[test]
    fn stops_at_the_nesting_limit() {
        let lists = "[".repeat(20_000);
        assert_eq!(parse(&lists).unwrap_err(), ParseError::TooDeep(MAX_DEPTH));

        let compounds = format!("{}{{}}", "{a:".repeat(MAX_DEPTH));
        let err = parse_root_compound(&compounds).unwrap_err();
        assert_eq!(err, ParseError::TooDeep(3 * MAX_DEPTH));
        assert_eq!(err.offset(), Some(3 * MAX_DEPTH));
    }

    #[test]
    fn accepts_nesting_up_to_the_limit() {
        let text = format!("{}{}", "[".repeat(MAX_DEPTH), "]".repeat(MAX_DEPTH));
        let mut value = parse(&text).unwrap();
        let mut levels = 1;
        while let Value::List(mut items) = value {
            let Some(inner) = items.pop() else { break };
            value = inner;
            levels += 1;
        }
        assert_eq!(levels, MAX_DEPTH);
    }
}
