use crate::error::SyntaxError;
use crate::lex::chars::{
    is_iri_char, is_pn_chars, is_pn_chars_base, is_pn_chars_u, is_varname_char,
    is_varname_start, is_ws,
};
use crate::lex::token::{Token, TokenKind};
use crate::span::SourceSpan;

/// Tokenizes the entire `source`. The last token is always [TokenKind::Eof].
pub fn tokenize(source: &str) -> Result<Vec<Token>, SyntaxError> {
    let mut lexer = Lexer::new(source);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token()?;
        let is_eof = token.kind == TokenKind::Eof;
        tokens.push(token);
        if is_eof {
            return Ok(tokens);
        }
    }
}

/// A hand-written SPARQL lexer working on the UTF-8 source.
#[derive(Debug)]
pub struct Lexer<'a> {
    source: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self { source, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        self.source.get(self.pos..).unwrap_or("")
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn peek_nth(&self, n: usize) -> Option<char> {
        self.rest().chars().nth(n)
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn error(&self, start: usize, message: impl Into<String>) -> SyntaxError {
        SyntaxError::new(self.source, SourceSpan::new(start, self.pos.max(start)), message)
    }

    fn skip_ws_and_comments(&mut self) {
        while let Some(c) = self.peek() {
            if is_ws(c) {
                self.bump();
            } else if c == '#' {
                while let Some(c) = self.bump() {
                    if c == '\n' {
                        break;
                    }
                }
            } else {
                break;
            }
        }
    }

    /// Produces the next token.
    pub fn next_token(&mut self) -> Result<Token, SyntaxError> {
        self.skip_ws_and_comments();
        let start = self.pos;
        let Some(c) = self.peek() else {
            return Ok(Token::new(TokenKind::Eof, SourceSpan::point(start)));
        };

        let kind = match c {
            '<' => self.lex_lt()?,
            '"' | '\'' => self.lex_string(c)?,
            '?' | '$' => self.lex_var_or_question(c)?,
            '@' => self.lex_lang_tag()?,
            '_' if self.peek_nth(1) == Some(':') => self.lex_blank_node_label()?,
            '0'..='9' => self.lex_number()?,
            '.' if self.peek_nth(1).is_some_and(|c| c.is_ascii_digit()) => self.lex_number()?,
            ':' => {
                self.bump();
                let local = self.lex_local_name()?;
                TokenKind::PrefixedName {
                    prefix: String::new(),
                    local,
                }
            }
            c if is_pn_chars_base(c) => self.lex_word_or_prefixed_name()?,
            _ => self.lex_punctuation(c)?,
        };
        Ok(Token::new(kind, SourceSpan::new(start, self.pos)))
    }

    fn lex_punctuation(&mut self, c: char) -> Result<TokenKind, SyntaxError> {
        let start = self.pos;
        self.bump();
        let kind = match c {
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '[' => TokenKind::LBracket,
            ']' => TokenKind::RBracket,
            '.' => TokenKind::Dot,
            ',' => TokenKind::Comma,
            ';' => TokenKind::Semicolon,
            '=' => TokenKind::Eq,
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Star,
            '/' => TokenKind::Slash,
            '>' => self.followed_by('=', TokenKind::GtEq, TokenKind::Gt),
            '!' => self.followed_by('=', TokenKind::NotEq, TokenKind::Bang),
            '^' => self.followed_by('^', TokenKind::DoubleCaret, TokenKind::Caret),
            '|' => self.followed_by('|', TokenKind::OrOr, TokenKind::Pipe),
            '&' if self.peek() == Some('&') => {
                self.bump();
                TokenKind::AndAnd
            }
            _ => return Err(self.error(start, format!("unexpected character '{c}'"))),
        };
        Ok(kind)
    }

    fn followed_by(&mut self, next: char, matched: TokenKind, single: TokenKind) -> TokenKind {
        if self.peek() == Some(next) {
            self.bump();
            matched
        } else {
            single
        }
    }

    /// `<` either starts an IRIREF or is the less-than operator. An IRIREF must be closed by `>`
    /// before any character that is not allowed in IRIs.
    fn lex_lt(&mut self) -> Result<TokenKind, SyntaxError> {
        let start = self.pos;
        if let Some(iri) = self.try_lex_iri_ref(start)? {
            return Ok(TokenKind::IriRef(iri));
        }
        self.bump();
        Ok(self.followed_by('=', TokenKind::LtEq, TokenKind::Lt))
    }

    fn try_lex_iri_ref(&mut self, start: usize) -> Result<Option<String>, SyntaxError> {
        let mut chars = self.rest().char_indices().skip(1);
        let mut iri = String::new();
        while let Some((i, c)) = chars.next() {
            match c {
                '>' => {
                    self.pos = start + i + 1;
                    return Ok(Some(iri));
                }
                '\\' => {
                    let (len, expected) = match chars.next() {
                        Some((_, 'u')) => (4, "\\u"),
                        Some((_, 'U')) => (8, "\\U"),
                        _ => return Ok(None),
                    };
                    let hex: String = chars.by_ref().take(len).map(|(_, c)| c).collect();
                    let decoded = decode_hex_char(&hex).ok_or_else(|| {
                        SyntaxError::new(
                            self.source,
                            SourceSpan::new(start, start + i + 2 + hex.len()),
                            format!("invalid {expected} escape in IRI"),
                        )
                    })?;
                    iri.push(decoded);
                }
                c if is_iri_char(c) => iri.push(c),
                _ => return Ok(None),
            }
        }
        Ok(None)
    }

    fn lex_string(&mut self, quote: char) -> Result<TokenKind, SyntaxError> {
        let start = self.pos;
        let long = self.peek_nth(1) == Some(quote) && self.peek_nth(2) == Some(quote);
        let quote_len = if long { 3 } else { 1 };
        for _ in 0..quote_len {
            self.bump();
        }

        let mut value = String::new();
        loop {
            let Some(c) = self.bump() else {
                return Err(self.error(start, "unterminated string literal"));
            };
            match c {
                c if c == quote && !long => return Ok(TokenKind::String(value)),
                c if c == quote
                    && self.peek() == Some(quote)
                    && self.peek_nth(1) == Some(quote) =>
                {
                    // A long string may end with up to two quotes of content.
                    while self.peek_nth(2) == Some(quote) {
                        value.push(quote);
                        self.bump();
                    }
                    self.bump();
                    self.bump();
                    return Ok(TokenKind::String(value));
                }
                '\\' => value.push(self.lex_string_escape()?),
                '\n' | '\r' if !long => {
                    return Err(self.error(start, "line break in short string literal"))
                }
                c => value.push(c),
            }
        }
    }

    fn lex_string_escape(&mut self) -> Result<char, SyntaxError> {
        let start = self.pos - 1;
        let escaped = match self.bump() {
            Some('t') => '\t',
            Some('b') => '\u{8}',
            Some('n') => '\n',
            Some('r') => '\r',
            Some('f') => '\u{c}',
            Some('"') => '"',
            Some('\'') => '\'',
            Some('\\') => '\\',
            Some('u') => self.lex_hex_escape(start, 4)?,
            Some('U') => self.lex_hex_escape(start, 8)?,
            _ => return Err(self.error(start, "invalid escape sequence in string")),
        };
        Ok(escaped)
    }

    fn lex_hex_escape(&mut self, start: usize, len: usize) -> Result<char, SyntaxError> {
        let hex: String = self.rest().chars().take(len).collect();
        self.pos += hex.len();
        decode_hex_char(&hex).ok_or_else(|| self.error(start, "invalid unicode escape"))
    }

    fn lex_var_or_question(&mut self, sigil: char) -> Result<TokenKind, SyntaxError> {
        let start = self.pos;
        self.bump();
        if !self.peek().is_some_and(is_varname_start) {
            return if sigil == '?' {
                Ok(TokenKind::Question)
            } else {
                Err(self.error(start, "expected a variable name after '$'"))
            };
        }
        let name_start = self.pos;
        while self.peek().is_some_and(is_varname_char) {
            self.bump();
        }
        Ok(TokenKind::Var(self.source[name_start..self.pos].to_owned()))
    }

    fn lex_lang_tag(&mut self) -> Result<TokenKind, SyntaxError> {
        let start = self.pos;
        self.bump();
        let tag_start = self.pos;
        while self.peek().is_some_and(|c| c.is_ascii_alphabetic()) {
            self.bump();
        }
        if self.pos == tag_start {
            return Err(self.error(start, "expected a language tag after '@'"));
        }
        while self.peek() == Some('-')
            && self.peek_nth(1).is_some_and(|c| c.is_ascii_alphanumeric())
        {
            self.bump();
            while self.peek().is_some_and(|c| c.is_ascii_alphanumeric()) {
                self.bump();
            }
        }
        Ok(TokenKind::LangTag(self.source[tag_start..self.pos].to_owned()))
    }

    fn lex_blank_node_label(&mut self) -> Result<TokenKind, SyntaxError> {
        let start = self.pos;
        self.bump();
        self.bump();
        if !self
            .peek()
            .is_some_and(|c| is_pn_chars_u(c) || c.is_ascii_digit())
        {
            return Err(self.error(start, "expected a blank node label after '_:'"));
        }
        let label_start = self.pos;
        self.bump();
        self.consume_dotted(is_pn_chars);
        Ok(TokenKind::BlankNodeLabel(
            self.source[label_start..self.pos].to_owned(),
        ))
    }

    /// Consumes `(accept | '.')* accept` without consuming trailing dots.
    fn consume_dotted(&mut self, accept: impl Fn(char) -> bool) {
        let mut last_valid = self.pos;
        while let Some(c) = self.peek() {
            if accept(c) {
                self.bump();
                last_valid = self.pos;
            } else if c == '.' {
                self.bump();
            } else {
                break;
            }
        }
        self.pos = last_valid;
    }

    fn lex_number(&mut self) -> Result<TokenKind, SyntaxError> {
        let start = self.pos;
        self.consume_digits();
        let mut is_decimal = false;
        if self.peek() == Some('.')
            && (self.peek_nth(1).is_some_and(|c| c.is_ascii_digit())
                || (self.pos > start && self.exponent_follows(1)))
        {
            self.bump();
            self.consume_digits();
            is_decimal = true;
        }
        if self.exponent_follows(0) {
            self.bump();
            if matches!(self.peek(), Some('+' | '-')) {
                self.bump();
            }
            self.consume_digits();
            return Ok(TokenKind::Double(self.source[start..self.pos].to_owned()));
        }

        let lexical = self.source[start..self.pos].to_owned();
        Ok(if is_decimal {
            TokenKind::Decimal(lexical)
        } else {
            TokenKind::Integer(lexical)
        })
    }

    fn consume_digits(&mut self) {
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.bump();
        }
    }

    /// Checks whether an exponent (`e`, optional sign, digits) starts at char offset `n`.
    fn exponent_follows(&self, n: usize) -> bool {
        if !matches!(self.peek_nth(n), Some('e' | 'E')) {
            return false;
        }
        match self.peek_nth(n + 1) {
            Some('+' | '-') => self.peek_nth(n + 2).is_some_and(|c| c.is_ascii_digit()),
            Some(c) => c.is_ascii_digit(),
            None => false,
        }
    }

    fn lex_word_or_prefixed_name(&mut self) -> Result<TokenKind, SyntaxError> {
        let start = self.pos;
        self.bump();
        self.consume_dotted(is_pn_chars);
        let prefix = self.source[start..self.pos].to_owned();

        if self.peek() == Some(':') {
            self.bump();
            let local = self.lex_local_name()?;
            return Ok(TokenKind::PrefixedName { prefix, local });
        }
        Ok(TokenKind::Word(prefix))
    }

    /// Lexes a `PN_LOCAL`, which may be empty. Returns the local name with escapes resolved.
    fn lex_local_name(&mut self) -> Result<String, SyntaxError> {
        let mut local = String::new();
        let mut committed_len = 0;
        let mut committed_pos = self.pos;
        let mut first = true;

        while let Some(c) = self.peek() {
            let start = self.pos;
            if c == '%' {
                let hex: String = self.rest().chars().skip(1).take(2).collect();
                if hex.len() != 2 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
                    return Err(self.error(start, "invalid percent encoding in local name"));
                }
                self.pos += 3;
                local.push('%');
                local.push_str(&hex);
            } else if c == '\\' {
                self.bump();
                match self.bump() {
                    Some(
                        c @ ('_' | '~' | '.' | '-' | '!' | '$' | '&' | '\'' | '(' | ')' | '*'
                        | '+' | ',' | ';' | '=' | '/' | '?' | '#' | '@' | '%'),
                    ) => local.push(c),
                    _ => return Err(self.error(start, "invalid escape in local name")),
                }
            } else if is_pn_chars_u(c) || c == ':' || c.is_ascii_digit() || (!first && is_pn_chars(c))
            {
                self.bump();
                local.push(c);
            } else if c == '.' && !first {
                self.bump();
                local.push(c);
                first = false;
                continue;
            } else {
                break;
            }
            first = false;
            committed_len = local.len();
            committed_pos = self.pos;
        }

        // A local name never ends with a dot.
        local.truncate(committed_len);
        self.pos = committed_pos;
        Ok(local)
    }
}

fn decode_hex_char(hex: &str) -> Option<char> {
    if hex.is_empty() || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source)
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_iri_vs_less_than() {
        assert_eq!(
            kinds("<http://ex.com/a> ?a < ?b"),
            vec![
                TokenKind::IriRef("http://ex.com/a".to_owned()),
                TokenKind::Var("a".to_owned()),
                TokenKind::Lt,
                TokenKind::Var("b".to_owned()),
                TokenKind::Eof
            ]
        );
        assert_eq!(
            kinds("?a<=3"),
            vec![
                TokenKind::Var("a".to_owned()),
                TokenKind::LtEq,
                TokenKind::Integer("3".to_owned()),
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_prefixed_names() {
        assert_eq!(
            kinds("rdfs:label ex:a.b. :"),
            vec![
                TokenKind::PrefixedName {
                    prefix: "rdfs".to_owned(),
                    local: "label".to_owned()
                },
                TokenKind::PrefixedName {
                    prefix: "ex".to_owned(),
                    local: "a.b".to_owned()
                },
                TokenKind::Dot,
                TokenKind::PrefixedName {
                    prefix: String::new(),
                    local: String::new()
                },
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_numbers() {
        assert_eq!(
            kinds("1 1.5 .5 1e3 1. 2.0E-1"),
            vec![
                TokenKind::Integer("1".to_owned()),
                TokenKind::Decimal("1.5".to_owned()),
                TokenKind::Decimal(".5".to_owned()),
                TokenKind::Double("1e3".to_owned()),
                TokenKind::Integer("1".to_owned()),
                TokenKind::Dot,
                TokenKind::Double("2.0E-1".to_owned()),
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_strings() {
        assert_eq!(
            kinds(r#""a\tb" 'c' """multi "quoted"
line""""#),
            vec![
                TokenKind::String("a\tb".to_owned()),
                TokenKind::String("c".to_owned()),
                TokenKind::String("multi \"quoted\"\nline".to_owned()),
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_lang_tag_and_datatype() {
        assert_eq!(
            kinds(r#""x"@en-US "1"^^xsd:int"#),
            vec![
                TokenKind::String("x".to_owned()),
                TokenKind::LangTag("en-US".to_owned()),
                TokenKind::String("1".to_owned()),
                TokenKind::DoubleCaret,
                TokenKind::PrefixedName {
                    prefix: "xsd".to_owned(),
                    local: "int".to_owned()
                },
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_comments_and_path_question() {
        assert_eq!(
            kinds("# comment\n?s ex:p? _:b1"),
            vec![
                TokenKind::Var("s".to_owned()),
                TokenKind::PrefixedName {
                    prefix: "ex".to_owned(),
                    local: "p".to_owned()
                },
                TokenKind::Question,
                TokenKind::BlankNodeLabel("b1".to_owned()),
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_unterminated_string_reports_position() {
        let error = tokenize("SELECT\n \"abc").unwrap_err();
        assert_eq!(error.offset(), 8);
        assert_eq!(error.line(), 2);
        assert_eq!(error.column(), 2);
    }
}
