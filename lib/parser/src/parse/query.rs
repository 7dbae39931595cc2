use crate::ast::{
    DatasetClause, ExprAst, GroupCondition, GroupElement, GroupGraphPattern, InlineData,
    OrderCondition, PrologueDecl, QueryAst, QueryFormAst, SelectClause, SelectItem,
    SelectModifier, SolutionModifiers, SubSelect, TriplesSameSubject,
};
use crate::lex::TokenKind;
use crate::parse::pattern::TripleMode;
use crate::parse::{ParseResult, Parser};

impl Parser<'_> {
    pub(super) fn parse_query(&mut self) -> ParseResult<QueryAst> {
        let prologue = self.parse_prologue()?;

        if self.check_keyword("SELECT") {
            let select = self.parse_select_clause()?;
            let dataset = self.parse_dataset_clauses()?;
            let where_clause = self.parse_where_clause()?;
            let modifiers = self.parse_solution_modifiers()?;
            let values = self.parse_trailing_values()?;
            return Ok(QueryAst {
                prologue,
                form: QueryFormAst::Select(select),
                dataset,
                where_clause: Some(where_clause),
                modifiers,
                values,
            });
        }

        if self.eat_keyword("CONSTRUCT") {
            return self.parse_construct(prologue);
        }

        if self.eat_keyword("DESCRIBE") {
            let targets = if self.eat(&TokenKind::Star) {
                None
            } else {
                let mut targets = vec![self.parse_var_or_iri()?];
                while self.check_var() || self.check_iri() {
                    targets.push(self.parse_var_or_iri()?);
                }
                Some(targets)
            };
            let dataset = self.parse_dataset_clauses()?;
            let where_clause = if self.check_keyword("WHERE") || self.check(&TokenKind::LBrace) {
                Some(self.parse_where_clause()?)
            } else {
                None
            };
            let modifiers = self.parse_solution_modifiers()?;
            let values = self.parse_trailing_values()?;
            return Ok(QueryAst {
                prologue,
                form: QueryFormAst::Describe(targets),
                dataset,
                where_clause,
                modifiers,
                values,
            });
        }

        if self.eat_keyword("ASK") {
            let dataset = self.parse_dataset_clauses()?;
            let where_clause = self.parse_where_clause()?;
            let modifiers = self.parse_solution_modifiers()?;
            let values = self.parse_trailing_values()?;
            return Ok(QueryAst {
                prologue,
                form: QueryFormAst::Ask,
                dataset,
                where_clause: Some(where_clause),
                modifiers,
                values,
            });
        }

        Err(self.unexpected("SELECT, CONSTRUCT, DESCRIBE, or ASK"))
    }

    /// `Prologue ::= ( BaseDecl | PrefixDecl )*`
    pub(super) fn parse_prologue(&mut self) -> ParseResult<Vec<PrologueDecl>> {
        let mut decls = Vec::new();
        loop {
            if self.check_keyword("BASE") {
                let start = self.advance().span;
                let token = self.advance();
                let TokenKind::IriRef(iri) = token.kind else {
                    return Err(self.error_at(token.span, "expected an IRI after BASE"));
                };
                decls.push(PrologueDecl::Base {
                    iri,
                    span: self.span_from(start),
                });
            } else if self.check_keyword("PREFIX") {
                let start = self.advance().span;
                let token = self.advance();
                let prefix = match token.kind {
                    TokenKind::PrefixedName { prefix, local } if local.is_empty() => prefix,
                    _ => {
                        return Err(
                            self.error_at(token.span, "expected a prefix name such as 'ex:'")
                        )
                    }
                };
                let token = self.advance();
                let TokenKind::IriRef(iri) = token.kind else {
                    return Err(self.error_at(token.span, "expected an IRI after the prefix"));
                };
                decls.push(PrologueDecl::Prefix {
                    prefix,
                    iri,
                    span: self.span_from(start),
                });
            } else {
                return Ok(decls);
            }
        }
    }

    fn parse_select_clause(&mut self) -> ParseResult<SelectClause> {
        let start = self.expect_keyword("SELECT")?;
        let modifier = if self.eat_keyword("DISTINCT") {
            Some(SelectModifier::Distinct)
        } else if self.eat_keyword("REDUCED") {
            Some(SelectModifier::Reduced)
        } else {
            None
        };

        if self.eat(&TokenKind::Star) {
            return Ok(SelectClause {
                modifier,
                projection: None,
                span: self.span_from(start),
            });
        }

        let mut items = Vec::new();
        loop {
            if self.check_var() {
                items.push(SelectItem::Var(self.parse_var()?));
            } else if self.check(&TokenKind::LParen) {
                let (expr, var) = self.parse_expression_as_var()?;
                items.push(SelectItem::Expr(expr, var));
            } else {
                break;
            }
        }
        if items.is_empty() {
            return Err(self.unexpected("'*', a variable, or '(' in the SELECT clause"));
        }
        Ok(SelectClause {
            modifier,
            projection: Some(items),
            span: self.span_from(start),
        })
    }

    pub(super) fn parse_sub_select(&mut self) -> ParseResult<SubSelect> {
        let select = self.parse_select_clause()?;
        let where_clause = self.parse_where_clause()?;
        let modifiers = self.parse_solution_modifiers()?;
        let values = self.parse_trailing_values()?;
        Ok(SubSelect {
            select,
            where_clause,
            modifiers,
            values,
        })
    }

    fn parse_construct(&mut self, prologue: Vec<PrologueDecl>) -> ParseResult<QueryAst> {
        if self.check(&TokenKind::LBrace) {
            let template = self.parse_triples_template()?;
            let dataset = self.parse_dataset_clauses()?;
            let where_clause = self.parse_where_clause()?;
            let modifiers = self.parse_solution_modifiers()?;
            let values = self.parse_trailing_values()?;
            return Ok(QueryAst {
                prologue,
                form: QueryFormAst::Construct(Some(template)),
                dataset,
                where_clause: Some(where_clause),
                modifiers,
                values,
            });
        }

        // CONSTRUCT WHERE { template }
        let dataset = self.parse_dataset_clauses()?;
        self.expect_keyword("WHERE")?;
        let template = self.parse_triples_template()?;
        let modifiers = self.parse_solution_modifiers()?;
        let values = self.parse_trailing_values()?;
        let where_clause = if template.is_empty() {
            GroupGraphPattern::Group(Vec::new())
        } else {
            GroupGraphPattern::Group(vec![GroupElement::Triples(template)])
        };
        Ok(QueryAst {
            prologue,
            form: QueryFormAst::Construct(None),
            dataset,
            where_clause: Some(where_clause),
            modifiers,
            values,
        })
    }

    /// `'{' TriplesTemplate? '}'`
    pub(super) fn parse_triples_template(
        &mut self,
    ) -> ParseResult<Vec<TriplesSameSubject>> {
        self.expect(&TokenKind::LBrace)?;
        let mut triples = Vec::new();
        while !self.eat(&TokenKind::RBrace) {
            triples.push(self.parse_triples_same_subject(TripleMode::Template)?);
            if !self.eat(&TokenKind::Dot) && !self.check(&TokenKind::RBrace) {
                return Err(self.unexpected("'.' or '}'"));
            }
        }
        Ok(triples)
    }

    fn parse_dataset_clauses(&mut self) -> ParseResult<Vec<DatasetClause>> {
        let mut clauses = Vec::new();
        while self.eat_keyword("FROM") {
            if self.eat_keyword("NAMED") {
                clauses.push(DatasetClause::Named(self.parse_iri()?));
            } else {
                clauses.push(DatasetClause::Default(self.parse_iri()?));
            }
        }
        Ok(clauses)
    }

    /// `WhereClause ::= 'WHERE'? GroupGraphPattern`
    fn parse_where_clause(&mut self) -> ParseResult<GroupGraphPattern> {
        self.eat_keyword("WHERE");
        self.parse_group_graph_pattern()
    }

    fn parse_trailing_values(&mut self) -> ParseResult<Option<InlineData>> {
        if self.check_keyword("VALUES") {
            Ok(Some(self.parse_inline_data()?))
        } else {
            Ok(None)
        }
    }

    fn parse_solution_modifiers(&mut self) -> ParseResult<SolutionModifiers> {
        let mut modifiers = SolutionModifiers::default();

        if self.check_keyword("GROUP") && self.peek_nth(1).is_keyword("BY") {
            self.advance();
            self.advance();
            loop {
                modifiers.group_by.push(self.parse_group_condition()?);
                if !self.check_group_condition_start() {
                    break;
                }
            }
        }

        if self.eat_keyword("HAVING") {
            loop {
                modifiers.having.push(self.parse_constraint()?);
                if !(self.check(&TokenKind::LParen)
                    || self.check_builtin_call()
                    || self.check_iri())
                {
                    break;
                }
            }
        }

        if self.check_keyword("ORDER") && self.peek_nth(1).is_keyword("BY") {
            self.advance();
            self.advance();
            loop {
                modifiers.order_by.push(self.parse_order_condition()?);
                if !self.check_order_condition_start() {
                    break;
                }
            }
        }

        // LIMIT and OFFSET may appear in either order.
        for _ in 0..2 {
            if self.check_keyword("LIMIT") && modifiers.limit.is_none() {
                self.advance();
                modifiers.limit = Some(self.parse_unsigned_integer()?);
            } else if self.check_keyword("OFFSET") && modifiers.offset.is_none() {
                self.advance();
                modifiers.offset = Some(self.parse_unsigned_integer()?);
            }
        }

        Ok(modifiers)
    }

    fn check_group_condition_start(&self) -> bool {
        self.check_var()
            || self.check(&TokenKind::LParen)
            || self.check_builtin_call()
            || self.check_iri()
    }

    /// `GroupCondition ::= BuiltInCall | FunctionCall | '(' Expression ( 'AS' Var )? ')' | Var`
    fn parse_group_condition(&mut self) -> ParseResult<GroupCondition> {
        if self.check_var() {
            return Ok(GroupCondition {
                expr: ExprAst::Var(self.parse_var()?),
                var: None,
            });
        }
        if self.eat(&TokenKind::LParen) {
            let expr = self.parse_expression()?;
            let var = if self.eat_keyword("AS") {
                Some(self.parse_var()?)
            } else {
                None
            };
            self.expect(&TokenKind::RParen)?;
            return Ok(GroupCondition { expr, var });
        }
        Ok(GroupCondition {
            expr: self.parse_constraint()?,
            var: None,
        })
    }

    fn check_order_condition_start(&self) -> bool {
        self.check_keyword("ASC") || self.check_keyword("DESC") || self.check_group_condition_start()
    }

    /// `OrderCondition ::= ( ( 'ASC' | 'DESC' ) BrackettedExpression ) | ( Constraint | Var )`
    fn parse_order_condition(&mut self) -> ParseResult<OrderCondition> {
        if self.eat_keyword("ASC") {
            return Ok(OrderCondition {
                expr: self.parse_bracketted_expression()?,
                descending: false,
            });
        }
        if self.eat_keyword("DESC") {
            return Ok(OrderCondition {
                expr: self.parse_bracketted_expression()?,
                descending: true,
            });
        }
        let expr = if self.check_var() {
            ExprAst::Var(self.parse_var()?)
        } else {
            self.parse_constraint()?
        };
        Ok(OrderCondition {
            expr,
            descending: false,
        })
    }

    fn parse_unsigned_integer(&mut self) -> ParseResult<usize> {
        let token = self.advance();
        match token.kind {
            TokenKind::Integer(lexical) => lexical.parse().map_err(|_| {
                self.error_at(token.span, format!("integer {lexical} is too large"))
            }),
            kind => Err(self.error_at(
                token.span,
                format!("expected a non-negative integer, found {kind}"),
            )),
        }
    }
}
