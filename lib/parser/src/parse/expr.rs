use crate::ast::{
    AggregateAst, AggregateFunctionAst, ArithmeticOp, CompareOp, ExprAst, VarAst,
};
use crate::lex::TokenKind;
use crate::parse::{ParseResult, Parser};
use crate::span::SourceSpan;

/// The built-in functions with a fixed or bounded number of arguments. `None` as maximum means
/// variadic.
const BUILTINS: &[(&str, usize, Option<usize>)] = &[
    ("STR", 1, Some(1)),
    ("LANG", 1, Some(1)),
    ("LANGMATCHES", 2, Some(2)),
    ("DATATYPE", 1, Some(1)),
    ("BOUND", 1, Some(1)),
    ("IRI", 1, Some(1)),
    ("URI", 1, Some(1)),
    ("BNODE", 0, Some(1)),
    ("RAND", 0, Some(0)),
    ("ABS", 1, Some(1)),
    ("CEIL", 1, Some(1)),
    ("FLOOR", 1, Some(1)),
    ("ROUND", 1, Some(1)),
    ("CONCAT", 0, None),
    ("SUBSTR", 2, Some(3)),
    ("STRLEN", 1, Some(1)),
    ("REPLACE", 3, Some(4)),
    ("UCASE", 1, Some(1)),
    ("LCASE", 1, Some(1)),
    ("ENCODE_FOR_URI", 1, Some(1)),
    ("CONTAINS", 2, Some(2)),
    ("STRSTARTS", 2, Some(2)),
    ("STRENDS", 2, Some(2)),
    ("STRBEFORE", 2, Some(2)),
    ("STRAFTER", 2, Some(2)),
    ("YEAR", 1, Some(1)),
    ("MONTH", 1, Some(1)),
    ("DAY", 1, Some(1)),
    ("HOURS", 1, Some(1)),
    ("MINUTES", 1, Some(1)),
    ("SECONDS", 1, Some(1)),
    ("TIMEZONE", 1, Some(1)),
    ("TZ", 1, Some(1)),
    ("NOW", 0, Some(0)),
    ("UUID", 0, Some(0)),
    ("STRUUID", 0, Some(0)),
    ("MD5", 1, Some(1)),
    ("SHA1", 1, Some(1)),
    ("SHA256", 1, Some(1)),
    ("SHA384", 1, Some(1)),
    ("SHA512", 1, Some(1)),
    ("COALESCE", 0, None),
    ("IF", 3, Some(3)),
    ("STRLANG", 2, Some(2)),
    ("STRDT", 2, Some(2)),
    ("SAMETERM", 2, Some(2)),
    ("ISIRI", 1, Some(1)),
    ("ISURI", 1, Some(1)),
    ("ISBLANK", 1, Some(1)),
    ("ISLITERAL", 1, Some(1)),
    ("ISNUMERIC", 1, Some(1)),
    ("REGEX", 2, Some(3)),
];

const AGGREGATES: &[&str] = &[
    "COUNT",
    "SUM",
    "MIN",
    "MAX",
    "AVG",
    "SAMPLE",
    "GROUP_CONCAT",
];

impl Parser<'_> {
    /// `Expression ::= ConditionalAndExpression ( '||' ConditionalAndExpression )*`
    pub(super) fn parse_expression(&mut self) -> ParseResult<ExprAst> {
        self.nested(|parser| {
            let mut expr = parser.parse_and_expression()?;
            while parser.eat(&TokenKind::OrOr) {
                let right = parser.parse_and_expression()?;
                expr = ExprAst::Or(Box::new(expr), Box::new(right));
            }
            Ok(expr)
        })
    }

    fn parse_and_expression(&mut self) -> ParseResult<ExprAst> {
        let mut expr = self.parse_relational_expression()?;
        while self.eat(&TokenKind::AndAnd) {
            let right = self.parse_relational_expression()?;
            expr = ExprAst::And(Box::new(expr), Box::new(right));
        }
        Ok(expr)
    }

    fn parse_relational_expression(&mut self) -> ParseResult<ExprAst> {
        let left = self.parse_additive_expression()?;
        let op = match self.peek() {
            TokenKind::Eq => CompareOp::Eq,
            TokenKind::NotEq => CompareOp::NotEq,
            TokenKind::Lt => CompareOp::Lt,
            TokenKind::Gt => CompareOp::Gt,
            TokenKind::LtEq => CompareOp::LtEq,
            TokenKind::GtEq => CompareOp::GtEq,
            kind if kind.is_keyword("IN") => {
                self.advance();
                return Ok(ExprAst::In {
                    needle: Box::new(left),
                    haystack: self.parse_expression_list()?,
                    negated: false,
                });
            }
            kind if kind.is_keyword("NOT") && self.peek_nth(1).is_keyword("IN") => {
                self.advance();
                self.advance();
                return Ok(ExprAst::In {
                    needle: Box::new(left),
                    haystack: self.parse_expression_list()?,
                    negated: true,
                });
            }
            _ => return Ok(left),
        };
        self.advance();
        let right = self.parse_additive_expression()?;
        Ok(ExprAst::Compare(op, Box::new(left), Box::new(right)))
    }

    fn parse_additive_expression(&mut self) -> ParseResult<ExprAst> {
        let mut expr = self.parse_multiplicative_expression()?;
        loop {
            let op = match self.peek() {
                TokenKind::Plus => ArithmeticOp::Add,
                TokenKind::Minus => ArithmeticOp::Sub,
                _ => return Ok(expr),
            };
            self.advance();
            let right = self.parse_multiplicative_expression()?;
            expr = ExprAst::Arithmetic(op, Box::new(expr), Box::new(right));
        }
    }

    fn parse_multiplicative_expression(&mut self) -> ParseResult<ExprAst> {
        let mut expr = self.parse_unary_expression()?;
        loop {
            let op = match self.peek() {
                TokenKind::Star => ArithmeticOp::Mul,
                TokenKind::Slash => ArithmeticOp::Div,
                _ => return Ok(expr),
            };
            self.advance();
            let right = self.parse_unary_expression()?;
            expr = ExprAst::Arithmetic(op, Box::new(expr), Box::new(right));
        }
    }

    fn parse_unary_expression(&mut self) -> ParseResult<ExprAst> {
        match self.peek() {
            TokenKind::Bang => {
                self.advance();
                Ok(ExprAst::Not(Box::new(self.parse_primary_expression()?)))
            }
            TokenKind::Plus => {
                self.advance();
                Ok(ExprAst::UnaryPlus(Box::new(self.parse_primary_expression()?)))
            }
            TokenKind::Minus => {
                self.advance();
                Ok(ExprAst::UnaryMinus(Box::new(
                    self.parse_primary_expression()?,
                )))
            }
            _ => self.parse_primary_expression(),
        }
    }

    fn parse_primary_expression(&mut self) -> ParseResult<ExprAst> {
        match self.peek() {
            TokenKind::LParen => self.parse_bracketted_expression(),
            TokenKind::Var(_) => Ok(ExprAst::Var(self.parse_var()?)),
            TokenKind::IriRef(_) | TokenKind::PrefixedName { .. } => {
                self.parse_iri_or_function()
            }
            _ if self.check_literal() => Ok(ExprAst::Literal(self.parse_literal()?)),
            TokenKind::Word(_) => self.parse_builtin_call(),
            _ => Err(self.unexpected("an expression")),
        }
    }

    /// `'(' Expression ')'`
    pub(super) fn parse_bracketted_expression(&mut self) -> ParseResult<ExprAst> {
        self.expect(&TokenKind::LParen)?;
        let expr = self.parse_expression()?;
        self.expect(&TokenKind::RParen)?;
        Ok(expr)
    }

    /// Checks whether the current token starts a built-in call or an aggregate.
    pub(super) fn check_builtin_call(&self) -> bool {
        let TokenKind::Word(word) = self.peek() else {
            return false;
        };
        let upper = word.to_ascii_uppercase();
        upper == "EXISTS"
            || (upper == "NOT" && self.peek_nth(1).is_keyword("EXISTS"))
            || AGGREGATES.contains(&upper.as_str())
            || BUILTINS.iter().any(|(name, _, _)| *name == upper)
    }

    /// Parses a built-in call, an aggregate, or `EXISTS`/`NOT EXISTS`.
    pub(super) fn parse_builtin_call(&mut self) -> ParseResult<ExprAst> {
        let token = self.advance();
        let TokenKind::Word(word) = token.kind else {
            return Err(self.error_at(token.span, "expected a function name"));
        };
        let name = word.to_ascii_uppercase();

        if name == "EXISTS" {
            return Ok(ExprAst::Exists(Box::new(self.parse_group_graph_pattern()?)));
        }
        if name == "NOT" {
            self.expect_keyword("EXISTS")?;
            return Ok(ExprAst::NotExists(Box::new(
                self.parse_group_graph_pattern()?,
            )));
        }
        if AGGREGATES.contains(&name.as_str()) {
            return self.parse_aggregate(&name, token.span);
        }

        let Some((_, min, max)) = BUILTINS.iter().find(|(builtin, _, _)| *builtin == name)
        else {
            return Err(self.error_at(token.span, format!("unknown function '{word}'")));
        };
        let args = if name == "BOUND" {
            self.expect(&TokenKind::LParen)?;
            let var = self.parse_var()?;
            self.expect(&TokenKind::RParen)?;
            vec![ExprAst::Var(var)]
        } else {
            self.parse_expression_list()?
        };

        let span = self.span_from(token.span);
        if args.len() < *min || max.is_some_and(|max| args.len() > max) {
            return Err(self.error_at(
                span,
                format!(
                    "wrong number of arguments for {name}: {} given",
                    args.len()
                ),
            ));
        }
        Ok(ExprAst::Builtin { name, args, span })
    }

    fn parse_aggregate(
        &mut self,
        name: &str,
        start: SourceSpan,
    ) -> ParseResult<ExprAst> {
        self.expect(&TokenKind::LParen)?;
        let distinct = self.eat_keyword("DISTINCT");

        let expr = if name == "COUNT" && self.eat(&TokenKind::Star) {
            None
        } else {
            Some(Box::new(self.parse_expression()?))
        };

        let function = match name {
            "COUNT" => AggregateFunctionAst::Count,
            "SUM" => AggregateFunctionAst::Sum,
            "MIN" => AggregateFunctionAst::Min,
            "MAX" => AggregateFunctionAst::Max,
            "AVG" => AggregateFunctionAst::Avg,
            "SAMPLE" => AggregateFunctionAst::Sample,
            _ => {
                let separator = if self.eat(&TokenKind::Semicolon) {
                    self.expect_keyword("SEPARATOR")?;
                    self.expect(&TokenKind::Eq)?;
                    let token = self.advance();
                    match token.kind {
                        TokenKind::String(value) => Some(value),
                        _ => {
                            return Err(self.error_at(token.span, "expected a separator string"))
                        }
                    }
                } else {
                    None
                };
                AggregateFunctionAst::GroupConcat { separator }
            }
        };
        self.expect(&TokenKind::RParen)?;

        Ok(ExprAst::Aggregate(AggregateAst {
            function,
            distinct,
            expr,
            span: self.span_from(start),
        }))
    }

    /// `iri ArgList?`
    fn parse_iri_or_function(&mut self) -> ParseResult<ExprAst> {
        let iri = self.parse_iri()?;
        if !self.check(&TokenKind::LParen) {
            return Ok(ExprAst::Iri(iri));
        }
        let (distinct, args) = self.parse_arg_list()?;
        Ok(ExprAst::FunctionCall {
            name: iri,
            distinct,
            args,
        })
    }

    /// `ArgList ::= NIL | '(' 'DISTINCT'? Expression ( ',' Expression )* ')'`
    pub(super) fn parse_arg_list(&mut self) -> ParseResult<(bool, Vec<ExprAst>)> {
        self.expect(&TokenKind::LParen)?;
        if self.eat(&TokenKind::RParen) {
            return Ok((false, Vec::new()));
        }
        let distinct = self.eat_keyword("DISTINCT");
        let mut args = vec![self.parse_expression()?];
        while self.eat(&TokenKind::Comma) {
            args.push(self.parse_expression()?);
        }
        self.expect(&TokenKind::RParen)?;
        Ok((distinct, args))
    }

    /// `ExpressionList ::= NIL | '(' Expression ( ',' Expression )* ')'`
    fn parse_expression_list(&mut self) -> ParseResult<Vec<ExprAst>> {
        self.expect(&TokenKind::LParen)?;
        if self.eat(&TokenKind::RParen) {
            return Ok(Vec::new());
        }
        let mut args = vec![self.parse_expression()?];
        while self.eat(&TokenKind::Comma) {
            args.push(self.parse_expression()?);
        }
        self.expect(&TokenKind::RParen)?;
        Ok(args)
    }

    /// `Constraint ::= BrackettedExpression | BuiltInCall | FunctionCall`
    pub(super) fn parse_constraint(&mut self) -> ParseResult<ExprAst> {
        if self.check(&TokenKind::LParen) {
            return self.parse_bracketted_expression();
        }
        if self.check_builtin_call() {
            return self.parse_builtin_call();
        }
        if self.check_iri() {
            let iri = self.parse_iri()?;
            let (distinct, args) = self.parse_arg_list()?;
            return Ok(ExprAst::FunctionCall {
                name: iri,
                distinct,
                args,
            });
        }
        Err(self.unexpected("a constraint"))
    }

    /// Parses `(expr AS ?var)`. The opening parenthesis has not been consumed yet.
    pub(super) fn parse_expression_as_var(&mut self) -> ParseResult<(ExprAst, VarAst)> {
        self.expect(&TokenKind::LParen)?;
        let expr = self.parse_expression()?;
        self.expect_keyword("AS")?;
        let var = self.parse_var()?;
        self.expect(&TokenKind::RParen)?;
        Ok((expr, var))
    }
}
