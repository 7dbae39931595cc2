use crate::ast::{NegatedPathItem, PathAst};
use crate::lex::TokenKind;
use crate::parse::{ParseResult, Parser};

impl Parser<'_> {
    /// Checks whether the current token can start a property path.
    pub(super) fn check_path_start(&self) -> bool {
        self.check_iri()
            || self.check_keyword_a()
            || matches!(
                self.peek(),
                TokenKind::Caret | TokenKind::Bang | TokenKind::LParen
            )
    }

    /// `a` is case-sensitive, unlike all other keywords.
    pub(super) fn check_keyword_a(&self) -> bool {
        matches!(self.peek(), TokenKind::Word(word) if word == "a")
    }

    /// `Path ::= PathSequence ( '|' PathSequence )*`
    pub(super) fn parse_path(&mut self) -> ParseResult<PathAst> {
        self.nested(|parser| {
            let mut alternatives = vec![parser.parse_path_sequence()?];
            while parser.eat(&TokenKind::Pipe) {
                alternatives.push(parser.parse_path_sequence()?);
            }
            Ok(flatten(alternatives, PathAst::Alternative))
        })
    }

    fn parse_path_sequence(&mut self) -> ParseResult<PathAst> {
        let mut elements = vec![self.parse_path_elt_or_inverse()?];
        while self.eat(&TokenKind::Slash) {
            elements.push(self.parse_path_elt_or_inverse()?);
        }
        Ok(flatten(elements, PathAst::Sequence))
    }

    fn parse_path_elt_or_inverse(&mut self) -> ParseResult<PathAst> {
        if self.eat(&TokenKind::Caret) {
            Ok(PathAst::Inverse(Box::new(self.parse_path_elt()?)))
        } else {
            self.parse_path_elt()
        }
    }

    fn parse_path_elt(&mut self) -> ParseResult<PathAst> {
        let primary = self.parse_path_primary()?;
        let path = match self.peek() {
            TokenKind::Question => PathAst::ZeroOrOne(Box::new(primary)),
            TokenKind::Star => PathAst::ZeroOrMore(Box::new(primary)),
            TokenKind::Plus => PathAst::OneOrMore(Box::new(primary)),
            _ => return Ok(primary),
        };
        self.advance();
        Ok(path)
    }

    fn parse_path_primary(&mut self) -> ParseResult<PathAst> {
        if self.check_iri() {
            return Ok(PathAst::Iri(self.parse_iri()?));
        }
        if self.check_keyword_a() {
            self.advance();
            return Ok(PathAst::A);
        }
        if self.eat(&TokenKind::Bang) {
            return self.parse_path_negated_property_set();
        }
        if self.eat(&TokenKind::LParen) {
            let path = self.parse_path()?;
            self.expect(&TokenKind::RParen)?;
            return Ok(path);
        }
        Err(self.unexpected("a property path"))
    }

    fn parse_path_negated_property_set(&mut self) -> ParseResult<PathAst> {
        if !self.eat(&TokenKind::LParen) {
            return Ok(PathAst::NegatedPropertySet(vec![
                self.parse_path_one_in_property_set()?
            ]));
        }

        let mut items = Vec::new();
        if !self.check(&TokenKind::RParen) {
            items.push(self.parse_path_one_in_property_set()?);
            while self.eat(&TokenKind::Pipe) {
                items.push(self.parse_path_one_in_property_set()?);
            }
        }
        self.expect(&TokenKind::RParen)?;
        Ok(PathAst::NegatedPropertySet(items))
    }

    fn parse_path_one_in_property_set(&mut self) -> ParseResult<NegatedPathItem> {
        let inverse = self.eat(&TokenKind::Caret);
        if self.check_keyword_a() {
            self.advance();
            return Ok(NegatedPathItem { inverse, iri: None });
        }
        if self.check_iri() {
            return Ok(NegatedPathItem {
                inverse,
                iri: Some(self.parse_iri()?),
            });
        }
        Err(self.unexpected("an IRI or 'a' in a negated property set"))
    }
}

/// Avoids one-element sequences and alternatives.
fn flatten(mut paths: Vec<PathAst>, combine: fn(Vec<PathAst>) -> PathAst) -> PathAst {
    if paths.len() == 1 {
        if let Some(path) = paths.pop() {
            return path;
        }
    }
    combine(paths)
}
