use crate::ast::{
    GraphNode, GroupElement, GroupGraphPattern, InlineData, PathAst, PropertyListItem,
    TriplesSameSubject, VerbAst,
};
use crate::lex::TokenKind;
use crate::parse::{ParseResult, Parser};

/// Whether a triple block allows property paths (`WHERE`) or only plain verbs (templates and
/// quad data).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum TripleMode {
    Path,
    Template,
}

impl Parser<'_> {
    /// `GroupGraphPattern ::= '{' ( SubSelect | GroupGraphPatternSub ) '}'`
    pub(super) fn parse_group_graph_pattern(&mut self) -> ParseResult<GroupGraphPattern> {
        self.nested(|parser| {
            parser.expect(&TokenKind::LBrace)?;
            let pattern = if parser.check_keyword("SELECT") {
                GroupGraphPattern::SubSelect(Box::new(parser.parse_sub_select()?))
            } else {
                GroupGraphPattern::Group(parser.parse_group_graph_pattern_sub()?)
            };
            parser.expect(&TokenKind::RBrace)?;
            Ok(pattern)
        })
    }

    fn parse_group_graph_pattern_sub(&mut self) -> ParseResult<Vec<GroupElement>> {
        let mut elements = Vec::new();
        loop {
            if self.check(&TokenKind::RBrace) || self.check(&TokenKind::Eof) {
                return Ok(elements);
            }

            if let Some(element) = self.parse_graph_pattern_not_triples()? {
                elements.push(element);
                self.eat(&TokenKind::Dot);
                continue;
            }

            elements.push(GroupElement::Triples(
                self.parse_triples_block(TripleMode::Path)?,
            ));
        }
    }

    /// Parses a sequence of triples separated by `.`. The block ends at `}` or at the start of a
    /// non-triples element.
    pub(super) fn parse_triples_block(
        &mut self,
        mode: TripleMode,
    ) -> ParseResult<Vec<TriplesSameSubject>> {
        let mut triples = vec![self.parse_triples_same_subject(mode)?];
        while self.eat(&TokenKind::Dot) {
            if !self.check_triples_start() {
                break;
            }
            triples.push(self.parse_triples_same_subject(mode)?);
        }
        if !self.check(&TokenKind::RBrace) && !self.check_graph_pattern_not_triples() {
            return Err(self.unexpected("'.' or '}'"));
        }
        Ok(triples)
    }

    fn check_triples_start(&self) -> bool {
        matches!(
            self.peek(),
            TokenKind::Var(_)
                | TokenKind::IriRef(_)
                | TokenKind::PrefixedName { .. }
                | TokenKind::BlankNodeLabel(_)
                | TokenKind::LBracket
                | TokenKind::LParen
        ) || self.check_literal()
    }

    fn check_graph_pattern_not_triples(&self) -> bool {
        self.check(&TokenKind::LBrace)
            || [
                "OPTIONAL", "MINUS", "GRAPH", "SERVICE", "FILTER", "BIND", "VALUES",
            ]
            .iter()
            .any(|keyword| self.check_keyword(keyword))
    }

    fn parse_graph_pattern_not_triples(&mut self) -> ParseResult<Option<GroupElement>> {
        if self.check(&TokenKind::LBrace) {
            let mut branches = vec![self.parse_group_graph_pattern()?];
            while self.eat_keyword("UNION") {
                branches.push(self.parse_group_graph_pattern()?);
            }
            return Ok(Some(GroupElement::Union(branches)));
        }
        if self.eat_keyword("OPTIONAL") {
            return Ok(Some(GroupElement::Optional(
                self.parse_group_graph_pattern()?,
            )));
        }
        if self.eat_keyword("MINUS") {
            return Ok(Some(GroupElement::Minus(self.parse_group_graph_pattern()?)));
        }
        if self.eat_keyword("GRAPH") {
            let name = self.parse_var_or_iri()?;
            return Ok(Some(GroupElement::Graph(
                name,
                self.parse_group_graph_pattern()?,
            )));
        }
        if self.eat_keyword("SERVICE") {
            let silent = self.eat_keyword("SILENT");
            let name = self.parse_var_or_iri()?;
            let pattern = self.parse_group_graph_pattern()?;
            return Ok(Some(GroupElement::Service {
                silent,
                name,
                pattern,
            }));
        }
        if self.eat_keyword("FILTER") {
            return Ok(Some(GroupElement::Filter(self.parse_constraint()?)));
        }
        if self.check_keyword("BIND") {
            let start = self.advance().span;
            let (expr, var) = self.parse_expression_as_var()?;
            return Ok(Some(GroupElement::Bind {
                expr,
                var,
                span: self.span_from(start),
            }));
        }
        if self.check_keyword("VALUES") {
            return Ok(Some(GroupElement::Values(self.parse_inline_data()?)));
        }
        Ok(None)
    }

    /// `VALUES ( ?a ?b ) { ( 1 2 ) ( UNDEF 3 ) }` or `VALUES ?a { 1 2 }`
    pub(super) fn parse_inline_data(&mut self) -> ParseResult<InlineData> {
        let start = self.expect_keyword("VALUES")?;

        if self.check_var() {
            let variable = self.parse_var()?;
            self.expect(&TokenKind::LBrace)?;
            let mut rows = Vec::new();
            while !self.eat(&TokenKind::RBrace) {
                rows.push(vec![self.parse_data_block_value()?]);
            }
            return Ok(InlineData {
                variables: vec![variable],
                rows,
                span: self.span_from(start),
            });
        }

        self.expect(&TokenKind::LParen)?;
        let mut variables = Vec::new();
        while !self.eat(&TokenKind::RParen) {
            variables.push(self.parse_var()?);
        }

        self.expect(&TokenKind::LBrace)?;
        let mut rows = Vec::new();
        while !self.eat(&TokenKind::RBrace) {
            let row_start = self.expect(&TokenKind::LParen)?;
            let mut row = Vec::with_capacity(variables.len());
            while !self.eat(&TokenKind::RParen) {
                row.push(self.parse_data_block_value()?);
            }
            if row.len() != variables.len() {
                return Err(self.error_at(
                    self.span_from(row_start),
                    format!(
                        "VALUES row has {} values but {} variables are declared",
                        row.len(),
                        variables.len()
                    ),
                ));
            }
            rows.push(row);
        }

        Ok(InlineData {
            variables,
            rows,
            span: self.span_from(start),
        })
    }

    /// Parses a subject followed by its property list. Subjects that are collections or blank
    /// node property lists may have an empty property list.
    pub(super) fn parse_triples_same_subject(
        &mut self,
        mode: TripleMode,
    ) -> ParseResult<TriplesSameSubject> {
        let start = self.current_span();
        let subject = self.parse_graph_node(mode)?;
        let properties = match &subject {
            GraphNode::Term(_) => self.parse_property_list_not_empty(mode)?,
            GraphNode::Collection(_) | GraphNode::BlankNodePropertyList(_) => {
                if self.check_verb_start(mode) {
                    self.parse_property_list_not_empty(mode)?
                } else {
                    Vec::new()
                }
            }
        };
        Ok(TriplesSameSubject {
            subject,
            properties,
            span: self.span_from(start),
        })
    }

    fn check_verb_start(&self, mode: TripleMode) -> bool {
        match mode {
            TripleMode::Path => self.check_var() || self.check_path_start(),
            TripleMode::Template => self.check_var() || self.check_iri() || self.check_keyword_a(),
        }
    }

    fn parse_property_list_not_empty(
        &mut self,
        mode: TripleMode,
    ) -> ParseResult<Vec<PropertyListItem>> {
        let mut items = vec![self.parse_property_list_item(mode)?];
        while self.eat(&TokenKind::Semicolon) {
            if self.check_verb_start(mode) {
                items.push(self.parse_property_list_item(mode)?);
            }
        }
        Ok(items)
    }

    fn parse_property_list_item(&mut self, mode: TripleMode) -> ParseResult<PropertyListItem> {
        let verb = self.parse_verb(mode)?;
        let mut objects = vec![self.parse_graph_node(mode)?];
        while self.eat(&TokenKind::Comma) {
            objects.push(self.parse_graph_node(mode)?);
        }
        Ok(PropertyListItem { verb, objects })
    }

    fn parse_verb(&mut self, mode: TripleMode) -> ParseResult<VerbAst> {
        if self.check_var() {
            return Ok(VerbAst::Var(self.parse_var()?));
        }
        match mode {
            TripleMode::Path => Ok(VerbAst::Path(self.parse_path()?)),
            TripleMode::Template => {
                if self.check_keyword_a() {
                    self.advance();
                    Ok(VerbAst::Path(PathAst::A))
                } else if self.check_iri() {
                    Ok(VerbAst::Path(PathAst::Iri(self.parse_iri()?)))
                } else {
                    Err(self.unexpected("a variable, an IRI, or 'a'"))
                }
            }
        }
    }

    /// Parses a term, a collection, or a blank node property list.
    fn parse_graph_node(&mut self, mode: TripleMode) -> ParseResult<GraphNode> {
        match self.peek() {
            TokenKind::LParen if self.peek_nth(1) != &TokenKind::RParen => {
                self.nested(|parser| {
                    parser.advance();
                    let mut items = Vec::new();
                    while !parser.eat(&TokenKind::RParen) {
                        items.push(parser.parse_graph_node(mode)?);
                    }
                    Ok(GraphNode::Collection(items))
                })
            }
            TokenKind::LBracket if self.peek_nth(1) != &TokenKind::RBracket => {
                self.nested(|parser| {
                    parser.advance();
                    let properties = parser.parse_property_list_not_empty(mode)?;
                    parser.expect(&TokenKind::RBracket)?;
                    Ok(GraphNode::BlankNodePropertyList(properties))
                })
            }
            _ => Ok(GraphNode::Term(self.parse_var_or_term()?)),
        }
    }
}
