use crate::ast::{
    GraphTarget, IriAst, QuadsItem, TransferKind, UpdateAst, UpdateOperationAst, UsingClause,
};
use crate::lex::TokenKind;
use crate::parse::pattern::TripleMode;
use crate::parse::{ParseResult, Parser};

impl Parser<'_> {
    /// `Update ::= Prologue ( Update1 ( ';' Update )? )?`
    pub(super) fn parse_update(&mut self) -> ParseResult<UpdateAst> {
        let mut operations = Vec::new();
        loop {
            let prologue = self.parse_prologue()?;
            if self.check(&TokenKind::Eof) {
                break;
            }
            operations.push((prologue, self.parse_update_operation()?));
            if !self.eat(&TokenKind::Semicolon) {
                break;
            }
        }
        Ok(UpdateAst { operations })
    }

    fn parse_update_operation(&mut self) -> ParseResult<UpdateOperationAst> {
        if self.check_keyword("INSERT") && self.peek_nth(1).is_keyword("DATA") {
            self.advance();
            self.advance();
            return Ok(UpdateOperationAst::InsertData(self.parse_quads()?));
        }
        if self.check_keyword("DELETE") && self.peek_nth(1).is_keyword("DATA") {
            self.advance();
            self.advance();
            return Ok(UpdateOperationAst::DeleteData(self.parse_quads()?));
        }
        if self.check_keyword("DELETE") && self.peek_nth(1).is_keyword("WHERE") {
            self.advance();
            self.advance();
            return Ok(UpdateOperationAst::DeleteWhere(self.parse_quads()?));
        }
        if self.check_keyword("WITH")
            || self.check_keyword("DELETE")
            || self.check_keyword("INSERT")
        {
            return self.parse_modify();
        }
        if self.eat_keyword("LOAD") {
            let silent = self.eat_keyword("SILENT");
            let source = self.parse_iri()?;
            let destination = if self.eat_keyword("INTO") {
                self.expect_keyword("GRAPH")?;
                Some(self.parse_iri()?)
            } else {
                None
            };
            return Ok(UpdateOperationAst::Load {
                silent,
                source,
                destination,
            });
        }
        if self.eat_keyword("CLEAR") {
            let silent = self.eat_keyword("SILENT");
            let target = self.parse_graph_target()?;
            return Ok(UpdateOperationAst::Clear { silent, target });
        }
        if self.eat_keyword("DROP") {
            let silent = self.eat_keyword("SILENT");
            let target = self.parse_graph_target()?;
            return Ok(UpdateOperationAst::Drop { silent, target });
        }
        if self.eat_keyword("CREATE") {
            let silent = self.eat_keyword("SILENT");
            self.expect_keyword("GRAPH")?;
            let graph = self.parse_iri()?;
            return Ok(UpdateOperationAst::Create { silent, graph });
        }

        let kind = if self.eat_keyword("ADD") {
            TransferKind::Add
        } else if self.eat_keyword("MOVE") {
            TransferKind::Move
        } else if self.eat_keyword("COPY") {
            TransferKind::Copy
        } else {
            return Err(self.unexpected("an update operation"));
        };
        let silent = self.eat_keyword("SILENT");
        let from = self.parse_graph_or_default()?;
        self.expect_keyword("TO")?;
        let to = self.parse_graph_or_default()?;
        Ok(UpdateOperationAst::Transfer {
            kind,
            silent,
            from,
            to,
        })
    }

    fn parse_modify(&mut self) -> ParseResult<UpdateOperationAst> {
        let with = if self.eat_keyword("WITH") {
            Some(self.parse_iri()?)
        } else {
            None
        };

        let delete = if self.eat_keyword("DELETE") {
            Some(self.parse_quads()?)
        } else {
            None
        };
        let insert = if self.eat_keyword("INSERT") {
            Some(self.parse_quads()?)
        } else {
            None
        };
        if delete.is_none() && insert.is_none() {
            return Err(self.unexpected("DELETE or INSERT"));
        }

        let mut using = Vec::new();
        while self.eat_keyword("USING") {
            if self.eat_keyword("NAMED") {
                using.push(UsingClause::Named(self.parse_iri()?));
            } else {
                using.push(UsingClause::Default(self.parse_iri()?));
            }
        }

        self.expect_keyword("WHERE")?;
        let pattern = self.parse_group_graph_pattern()?;
        Ok(UpdateOperationAst::Modify {
            with,
            delete,
            insert,
            using,
            pattern,
        })
    }

    /// `GraphRefAll ::= GraphRef | 'DEFAULT' | 'NAMED' | 'ALL'`
    fn parse_graph_target(&mut self) -> ParseResult<GraphTarget> {
        if self.eat_keyword("GRAPH") {
            return Ok(GraphTarget::Graph(self.parse_iri()?));
        }
        if self.eat_keyword("DEFAULT") {
            return Ok(GraphTarget::Default);
        }
        if self.eat_keyword("NAMED") {
            return Ok(GraphTarget::Named);
        }
        if self.eat_keyword("ALL") {
            return Ok(GraphTarget::All);
        }
        Err(self.unexpected("GRAPH, DEFAULT, NAMED, or ALL"))
    }

    /// `GraphOrDefault ::= 'DEFAULT' | 'GRAPH'? iri`. Returns [None] for the default graph.
    fn parse_graph_or_default(&mut self) -> ParseResult<Option<IriAst>> {
        if self.eat_keyword("DEFAULT") {
            return Ok(None);
        }
        self.eat_keyword("GRAPH");
        Ok(Some(self.parse_iri()?))
    }

    /// `'{' Quads '}'`
    fn parse_quads(&mut self) -> ParseResult<Vec<QuadsItem>> {
        self.expect(&TokenKind::LBrace)?;
        let mut items = Vec::new();
        loop {
            if self.eat(&TokenKind::RBrace) {
                return Ok(items);
            }
            if self.eat_keyword("GRAPH") {
                let name = self.parse_var_or_iri()?;
                let triples = self.parse_triples_template()?;
                items.push(QuadsItem::Graph(name, triples));
                self.eat(&TokenKind::Dot);
                continue;
            }

            let mut triples = Vec::new();
            loop {
                triples.push(self.parse_triples_same_subject(TripleMode::Template)?);
                let has_dot = self.eat(&TokenKind::Dot);
                if self.check(&TokenKind::RBrace) || self.check_keyword("GRAPH") {
                    break;
                }
                if !has_dot {
                    return Err(self.unexpected("'.' or '}'"));
                }
            }
            items.push(QuadsItem::Triples(triples));
        }
    }
}
