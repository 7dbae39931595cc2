use crate::ast::{
    IriAst, LiteralAnnotation, LiteralAst, NumericKind, TermAst, VarAst, VarOrIri,
};
use crate::lex::TokenKind;
use crate::parse::{ParseResult, Parser};

impl Parser<'_> {
    pub(super) fn check_iri(&self) -> bool {
        matches!(
            self.peek(),
            TokenKind::IriRef(_) | TokenKind::PrefixedName { .. }
        )
    }

    pub(super) fn parse_iri(&mut self) -> ParseResult<IriAst> {
        let token = self.advance();
        match token.kind {
            TokenKind::IriRef(iri) => Ok(IriAst::IriRef {
                iri,
                span: token.span,
            }),
            TokenKind::PrefixedName { prefix, local } => Ok(IriAst::Prefixed {
                prefix,
                local,
                span: token.span,
            }),
            kind => Err(self.error_at(token.span, format!("expected an IRI, found {kind}"))),
        }
    }

    pub(super) fn check_var(&self) -> bool {
        matches!(self.peek(), TokenKind::Var(_))
    }

    pub(super) fn parse_var(&mut self) -> ParseResult<VarAst> {
        let token = self.advance();
        match token.kind {
            TokenKind::Var(name) => Ok(VarAst {
                name,
                span: token.span,
            }),
            kind => Err(self.error_at(
                token.span,
                format!("expected a variable, found {kind}"),
            )),
        }
    }

    pub(super) fn parse_var_or_iri(&mut self) -> ParseResult<VarOrIri> {
        if self.check_var() {
            Ok(VarOrIri::Var(self.parse_var()?))
        } else if self.check_iri() {
            Ok(VarOrIri::Iri(self.parse_iri()?))
        } else {
            Err(self.unexpected("a variable or an IRI"))
        }
    }

    /// Checks whether the current token starts a literal.
    pub(super) fn check_literal(&self) -> bool {
        match self.peek() {
            TokenKind::String(_)
            | TokenKind::Integer(_)
            | TokenKind::Decimal(_)
            | TokenKind::Double(_) => true,
            TokenKind::Plus | TokenKind::Minus => matches!(
                self.peek_nth(1),
                TokenKind::Integer(_) | TokenKind::Decimal(_) | TokenKind::Double(_)
            ),
            kind => kind.is_keyword("true") || kind.is_keyword("false"),
        }
    }

    /// Parses an RDF literal, a (possibly signed) numeric literal, or a boolean literal.
    pub(super) fn parse_literal(&mut self) -> ParseResult<LiteralAst> {
        let sign = match self.peek() {
            TokenKind::Plus => {
                self.advance();
                "+"
            }
            TokenKind::Minus => {
                self.advance();
                "-"
            }
            _ => "",
        };

        let token = self.advance();
        let literal = match token.kind {
            TokenKind::String(value) if sign.is_empty() => {
                let annotation = match self.peek() {
                    TokenKind::LangTag(_) => match self.advance().kind {
                        TokenKind::LangTag(tag) => LiteralAnnotation::Language(tag),
                        _ => LiteralAnnotation::None,
                    },
                    TokenKind::DoubleCaret => {
                        self.advance();
                        LiteralAnnotation::Datatype(self.parse_iri()?)
                    }
                    _ => LiteralAnnotation::None,
                };
                LiteralAst::String { value, annotation }
            }
            TokenKind::Integer(lexical) => LiteralAst::Numeric {
                kind: NumericKind::Integer,
                lexical: format!("{sign}{lexical}"),
            },
            TokenKind::Decimal(lexical) => LiteralAst::Numeric {
                kind: NumericKind::Decimal,
                lexical: format!("{sign}{lexical}"),
            },
            TokenKind::Double(lexical) => LiteralAst::Numeric {
                kind: NumericKind::Double,
                lexical: format!("{sign}{lexical}"),
            },
            ref kind if sign.is_empty() && kind.is_keyword("true") => LiteralAst::Boolean(true),
            ref kind if sign.is_empty() && kind.is_keyword("false") => {
                LiteralAst::Boolean(false)
            }
            kind => {
                return Err(
                    self.error_at(token.span, format!("expected a literal, found {kind}"))
                )
            }
        };
        Ok(literal)
    }

    /// Parses a variable, an IRI, a literal, a blank node, `[]`, or `()`.
    pub(super) fn parse_var_or_term(&mut self) -> ParseResult<TermAst> {
        match self.peek() {
            TokenKind::Var(_) => Ok(TermAst::Var(self.parse_var()?)),
            TokenKind::IriRef(_) | TokenKind::PrefixedName { .. } => {
                Ok(TermAst::Iri(self.parse_iri()?))
            }
            TokenKind::BlankNodeLabel(_) => match self.advance().kind {
                TokenKind::BlankNodeLabel(label) => Ok(TermAst::BlankNode(label)),
                _ => Err(self.unexpected("a blank node")),
            },
            TokenKind::LBracket if self.peek_nth(1) == &TokenKind::RBracket => {
                self.advance();
                self.advance();
                Ok(TermAst::Anon)
            }
            TokenKind::LParen if self.peek_nth(1) == &TokenKind::RParen => {
                self.advance();
                self.advance();
                Ok(TermAst::Nil)
            }
            _ if self.check_literal() => Ok(TermAst::Literal(self.parse_literal()?)),
            _ => Err(self.unexpected("an RDF term or a variable")),
        }
    }

    /// Parses a term in a `VALUES` block. Returns [None] for `UNDEF`.
    pub(super) fn parse_data_block_value(&mut self) -> ParseResult<Option<TermAst>> {
        if self.eat_keyword("UNDEF") {
            return Ok(None);
        }
        if self.check_iri() {
            return Ok(Some(TermAst::Iri(self.parse_iri()?)));
        }
        if self.check_literal() {
            return Ok(Some(TermAst::Literal(self.parse_literal()?)));
        }
        Err(self.unexpected("an IRI, a literal, or UNDEF"))
    }
}
