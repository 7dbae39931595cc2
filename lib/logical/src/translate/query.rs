use crate::algebra::{
    is_generated_variable, AggregateExpression, Expression, GraphPattern, NamedNodePattern,
    OrderExpression, TriplePattern,
};
use crate::error::TranslationError;
use crate::query::{QueryDataset, QueryForm};
use crate::translate::group::join;
use crate::translate::Translator;
use rdf_loom_model::Variable;
use rdf_loom_parser::ast::{
    DatasetClause, ExprAst, GroupElement, GroupGraphPattern, InlineData, QueryAst, QueryFormAst,
    SelectClause, SelectItem, SelectModifier, SolutionModifiers, SubSelect,
};
use rdf_loom_parser::SourceSpan;
use rustc_hash::FxHashSet;
use std::sync::Arc;

/// A projected variable and the expression that computes it, if any.
type Projection = Vec<(Variable, SourceSpan, Option<Expression>)>;

impl Translator {
    pub(super) fn translate_query_ast(
        &mut self,
        ast: &QueryAst,
    ) -> Result<(QueryForm, Arc<GraphPattern>, Option<QueryDataset>), TranslationError> {
        let dataset = self.translate_dataset(&ast.dataset)?;
        let where_clause = ast.where_clause.as_ref();
        let modifiers = &ast.modifiers;
        let values = ast.values.as_ref();
        let (form, pattern) = match &ast.form {
            QueryFormAst::Select(select) => {
                let (pattern, variables) =
                    self.translate_select(Some(select), where_clause, modifiers, values)?;
                (QueryForm::Select { variables }, pattern)
            }
            QueryFormAst::Ask => {
                let (pattern, _) =
                    self.translate_select(None, where_clause, modifiers, values)?;
                (QueryForm::Ask, pattern)
            }
            QueryFormAst::Construct(template) => {
                self.template_blank_nodes.clear();
                let template = match template {
                    Some(template) => self.translate_template(template)?,
                    None => self.construct_where_template(where_clause)?,
                };
                let (pattern, _) =
                    self.translate_select(None, where_clause, modifiers, values)?;
                (QueryForm::Construct { template }, pattern)
            }
            QueryFormAst::Describe(targets) => {
                let (pattern, variables) =
                    self.translate_select(None, where_clause, modifiers, values)?;
                let targets = match targets {
                    Some(targets) => targets
                        .iter()
                        .map(|target| self.named_node_pattern(target))
                        .collect::<Result<Vec<_>, _>>()?,
                    None => variables.into_iter().map(NamedNodePattern::from).collect(),
                };
                (QueryForm::Describe { targets }, pattern)
            }
        };
        Ok((form, Arc::new(pattern), dataset))
    }

    pub(super) fn translate_sub_select(
        &mut self,
        sub_select: &SubSelect,
    ) -> Result<GraphPattern, TranslationError> {
        let (pattern, _) = self.translate_select(
            Some(&sub_select.select),
            Some(&sub_select.where_clause),
            &sub_select.modifiers,
            sub_select.values.as_ref(),
        )?;
        Ok(pattern)
    }

    fn translate_dataset(
        &self,
        clauses: &[DatasetClause],
    ) -> Result<Option<QueryDataset>, TranslationError> {
        if clauses.is_empty() {
            return Ok(None);
        }
        let mut default = Vec::new();
        let mut named = Vec::new();
        for clause in clauses {
            match clause {
                DatasetClause::Default(iri) => default.push(self.named_node(iri)?),
                DatasetClause::Named(iri) => named.push(self.named_node(iri)?),
            }
        }
        Ok(Some(QueryDataset {
            default,
            named: Some(named),
        }))
    }

    /// The template of `CONSTRUCT WHERE { ... }` is the pattern itself, which must be a plain
    /// list of triples.
    fn construct_where_template(
        &mut self,
        where_clause: Option<&GroupGraphPattern>,
    ) -> Result<Vec<TriplePattern>, TranslationError> {
        let Some(GroupGraphPattern::Group(elements)) = where_clause else {
            return Err(TranslationError::InvalidTemplate(
                "CONSTRUCT WHERE requires a group of triples".to_owned(),
            ));
        };
        let mut template = Vec::new();
        for element in elements {
            let GroupElement::Triples(triples) = element else {
                return Err(TranslationError::InvalidTemplate(
                    "CONSTRUCT WHERE only allows triple patterns".to_owned(),
                ));
            };
            template.extend(self.translate_template(triples)?);
        }
        Ok(template)
    }

    /// Translates the pattern and the solution modifiers of a query or sub-select.
    ///
    /// Without a `select` clause (`ASK`, `CONSTRUCT`, `DESCRIBE`), there is no projection and
    /// all in-scope variables are returned. Generated variables are never returned.
    fn translate_select(
        &mut self,
        select: Option<&SelectClause>,
        where_clause: Option<&GroupGraphPattern>,
        modifiers: &SolutionModifiers,
        values: Option<&InlineData>,
    ) -> Result<(GraphPattern, Vec<Variable>), TranslationError> {
        let pattern = match where_clause {
            Some(where_clause) => self.translate_group(where_clause)?,
            None => GraphPattern::empty_singleton(),
        };
        let outer_aggregates = self.aggregates.replace(Vec::new());
        let result = self.translate_solution_modifiers(pattern, select, modifiers, values);
        self.aggregates = outer_aggregates;
        result
    }

    fn translate_solution_modifiers(
        &mut self,
        mut pattern: GraphPattern,
        select: Option<&SelectClause>,
        modifiers: &SolutionModifiers,
        values: Option<&InlineData>,
    ) -> Result<(GraphPattern, Vec<Variable>), TranslationError> {
        let mut group_variables = Vec::new();
        for condition in &modifiers.group_by {
            if let (ExprAst::Var(var), None) = (&condition.expr, &condition.var) {
                group_variables.push(Self::variable(var));
                continue;
            }
            let aggregates = self.aggregates.take();
            let expression = self.translate_expression(&condition.expr);
            self.aggregates = aggregates;
            let variable = match &condition.var {
                Some(var) => Self::variable(var),
                None => self.fresh_variable("group"),
            };
            pattern = GraphPattern::Extend {
                inner: Arc::new(pattern),
                variable: variable.clone(),
                expression: expression?,
            };
            group_variables.push(variable);
        }

        let having = modifiers
            .having
            .iter()
            .map(|expr| self.translate_expression(expr))
            .collect::<Result<Vec<_>, _>>()?;
        let projection = match select.and_then(|select| select.projection.as_ref()) {
            Some(items) => {
                let mut projection = Projection::with_capacity(items.len());
                for item in items {
                    projection.push(match item {
                        SelectItem::Var(var) => (Self::variable(var), var.span, None),
                        SelectItem::Expr(expr, var) => (
                            Self::variable(var),
                            var.span,
                            Some(self.translate_expression(expr)?),
                        ),
                    });
                }
                Some(projection)
            }
            None => None,
        };
        let mut order = Vec::with_capacity(modifiers.order_by.len());
        for condition in &modifiers.order_by {
            let expression = self.translate_expression(&condition.expr)?;
            order.push(if condition.descending {
                OrderExpression::Desc(expression)
            } else {
                OrderExpression::Asc(expression)
            });
        }
        let aggregates = self.aggregates.take().unwrap_or_default();

        if !modifiers.group_by.is_empty() || !aggregates.is_empty() {
            if let Some(select) = select {
                if select.projection.is_none() {
                    return Err(TranslationError::WildcardWithGroupBy { span: select.span });
                }
            }
            if let Some(projection) = &projection {
                check_grouped_projection(projection, &group_variables, &aggregates)?;
            }
            pattern = GraphPattern::Group {
                inner: Arc::new(pattern),
                variables: group_variables,
                aggregates,
            };
        }

        if let Some(expr) = having.into_iter().reduce(Expression::and) {
            pattern = GraphPattern::Filter {
                expr,
                inner: Arc::new(pattern),
            };
        }

        let mut variables = Vec::new();
        if let Some(projection) = projection {
            for (variable, span, expression) in projection {
                if let Some(expression) = expression {
                    if pattern.in_scope_variables().contains(&variable) {
                        return Err(TranslationError::VariableAlreadyBound {
                            variable: variable.into_string(),
                            span,
                        });
                    }
                    pattern = GraphPattern::Extend {
                        inner: Arc::new(pattern),
                        variable: variable.clone(),
                        expression,
                    };
                }
                variables.push(variable);
            }
        }

        if let Some(values) = values {
            pattern = join(pattern, self.translate_inline_data(values)?);
        }

        if select.map_or(true, |select| select.projection.is_none()) {
            variables = pattern
                .in_scope_variables()
                .into_iter()
                .filter(|variable| !is_generated_variable(variable))
                .collect();
        }

        if !order.is_empty() {
            pattern = GraphPattern::OrderBy {
                inner: Arc::new(pattern),
                expression: order,
            };
        }

        if let Some(select) = select {
            pattern = GraphPattern::Project {
                inner: Arc::new(pattern),
                variables: variables.clone(),
            };
            match select.modifier {
                Some(SelectModifier::Distinct) => {
                    pattern = GraphPattern::Distinct {
                        inner: Arc::new(pattern),
                    };
                }
                Some(SelectModifier::Reduced) => {
                    pattern = GraphPattern::Reduced {
                        inner: Arc::new(pattern),
                    };
                }
                None => {}
            }
        }

        if modifiers.offset.is_some() || modifiers.limit.is_some() {
            pattern = GraphPattern::Slice {
                inner: Arc::new(pattern),
                start: modifiers.offset.unwrap_or(0),
                length: modifiers.limit,
            };
        }

        Ok((pattern, variables))
    }
}

/// In an aggregate query, only group variables, aggregates and previously projected
/// expressions may be referenced by the projection.
fn check_grouped_projection(
    projection: &Projection,
    group_variables: &[Variable],
    aggregates: &[(Variable, AggregateExpression)],
) -> Result<(), TranslationError> {
    let mut allowed = group_variables
        .iter()
        .chain(aggregates.iter().map(|(variable, _)| variable))
        .cloned()
        .collect::<FxHashSet<_>>();
    for (variable, span, expression) in projection {
        let ungrouped = match expression {
            None => (!allowed.contains(variable)).then(|| variable.clone()),
            Some(expression) => {
                let mut ungrouped = None;
                expression.on_variable(&mut |used| {
                    if ungrouped.is_none() && !allowed.contains(used) {
                        ungrouped = Some(used.clone());
                    }
                });
                ungrouped
            }
        };
        if let Some(ungrouped) = ungrouped {
            return Err(TranslationError::UngroupedVariable {
                variable: ungrouped.into_string(),
                span: *span,
            });
        }
        allowed.insert(variable.clone());
    }
    Ok(())
}
