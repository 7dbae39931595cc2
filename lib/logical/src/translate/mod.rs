//! Translation of parse trees into the algebra.
//!
//! The translator resolves prefixed names and relative IRIs, replaces blank nodes in graph
//! patterns with fresh variables, desugars property paths, and builds the operator tree of
//! each group following the SPARQL 1.1 algebra translation.
//!
//! Variables introduced by the translation contain a `.` (e.g., `?bnode.0`), which cannot clash
//! with user variables. See [is_generated_variable](crate::algebra::is_generated_variable).

mod expression;
mod group;
mod query;
mod triples;
mod update;

use crate::algebra::AggregateExpression;
use crate::error::TranslationError;
use crate::query::{Namespaces, Query};
use crate::update::Update;
use rdf_loom_model::{BlankNode, Iri, NamedNode, Variable};
use rdf_loom_parser::ast::{IriAst, PrologueDecl, QueryAst, UpdateAst, VarAst};
use rdf_loom_parser::SourceSpan;
use rustc_hash::FxHashMap;

/// Translates a parsed query.
///
/// `namespaces` and `base_iri` are in effect before the prologue of the query is read. `source`
/// is the text the query was parsed from. It is kept in the [Query] for diagnostics.
pub fn translate_query(
    ast: &QueryAst,
    source: &str,
    namespaces: &Namespaces,
    base_iri: Option<&str>,
) -> Result<Query, TranslationError> {
    tracing::debug!("Translating SPARQL query");
    let mut translator = Translator::new(namespaces, base_iri)?;
    translator.apply_prologue(&ast.prologue)?;
    let (form, pattern, dataset) = translator.translate_query_ast(ast)?;
    tracing::trace!(pattern = %pattern, "Translated SPARQL query");
    Ok(Query {
        form,
        pattern,
        dataset,
        base_iri: translator.base_iri,
        source: source.to_owned(),
        namespaces: namespaces.clone(),
    })
}

/// Translates a parsed update request.
pub fn translate_update(
    ast: &UpdateAst,
    source: &str,
    namespaces: &Namespaces,
    base_iri: Option<&str>,
) -> Result<Update, TranslationError> {
    tracing::debug!(
        operations = ast.operations.len(),
        "Translating SPARQL update"
    );
    let mut translator = Translator::new(namespaces, base_iri)?;
    let mut operations = Vec::new();
    for (prologue, operation) in &ast.operations {
        translator.apply_prologue(prologue)?;
        operations.extend(translator.translate_update_operation(operation)?);
    }
    Ok(Update {
        operations,
        base_iri: translator.base_iri,
        source: source.to_owned(),
        namespaces: namespaces.clone(),
    })
}

/// The state of a single translation.
struct Translator {
    namespaces: Namespaces,
    base_iri: Option<Iri<String>>,
    /// Blank node labels of graph patterns and the variables that replace them.
    blank_node_variables: FxHashMap<String, Variable>,
    /// Blank node labels of the template that is currently translated.
    template_blank_nodes: FxHashMap<String, BlankNode>,
    /// The aggregates found in the current `SELECT`. [None] where aggregates are not allowed.
    aggregates: Option<Vec<(Variable, AggregateExpression)>>,
    next_variable: usize,
}

impl Translator {
    fn new(namespaces: &Namespaces, base_iri: Option<&str>) -> Result<Self, TranslationError> {
        let base_iri = base_iri
            .map(|iri| {
                Iri::parse(iri.to_owned()).map_err(|error| TranslationError::InvalidIri {
                    iri: iri.to_owned(),
                    span: None,
                    message: error.to_string(),
                })
            })
            .transpose()?;
        Ok(Self {
            namespaces: namespaces.clone(),
            base_iri,
            blank_node_variables: FxHashMap::default(),
            template_blank_nodes: FxHashMap::default(),
            aggregates: None,
            next_variable: 0,
        })
    }

    /// Declarations are applied in order. A `PREFIX` of the text overrides an initial one.
    fn apply_prologue(&mut self, prologue: &[PrologueDecl]) -> Result<(), TranslationError> {
        for declaration in prologue {
            match declaration {
                PrologueDecl::Base { iri, span } => {
                    self.base_iri = Some(self.resolve_reference(iri, *span)?);
                }
                PrologueDecl::Prefix { prefix, iri, span } => {
                    let namespace = self.resolve_reference(iri, *span)?;
                    self.namespaces.insert(prefix.clone(), namespace.into_inner());
                }
            }
        }
        Ok(())
    }

    fn resolve_reference(
        &self,
        iri: &str,
        span: SourceSpan,
    ) -> Result<Iri<String>, TranslationError> {
        let resolved = match &self.base_iri {
            Some(base_iri) => base_iri.resolve(iri),
            None => Iri::parse(iri.to_owned()),
        };
        resolved.map_err(|error| TranslationError::InvalidIri {
            iri: iri.to_owned(),
            span: Some(span),
            message: error.to_string(),
        })
    }

    fn named_node(&self, iri: &IriAst) -> Result<NamedNode, TranslationError> {
        let iri = match iri {
            IriAst::IriRef { iri, span } => self.resolve_reference(iri, *span)?,
            IriAst::Prefixed {
                prefix,
                local,
                span,
            } => {
                let Some(namespace) = self.namespaces.get(prefix) else {
                    return Err(TranslationError::UndeclaredPrefix {
                        prefix: prefix.clone(),
                        span: *span,
                    });
                };
                let iri = format!("{namespace}{local}");
                Iri::parse(iri.clone()).map_err(|error| TranslationError::InvalidIri {
                    iri,
                    span: Some(*span),
                    message: error.to_string(),
                })?
            }
        };
        Ok(NamedNode::new_unchecked(iri.into_inner()))
    }

    fn variable(var: &VarAst) -> Variable {
        Variable::new_unchecked(var.name.clone())
    }

    /// A variable that cannot clash with the variables of the query.
    fn fresh_variable(&mut self, kind: &str) -> Variable {
        let variable = Variable::new_unchecked(format!("{kind}.{}", self.next_variable));
        self.next_variable += 1;
        variable
    }

    /// The variable that stands for the blank node `label` in a graph pattern.
    fn blank_node_variable(&mut self, label: &str) -> Variable {
        if let Some(variable) = self.blank_node_variables.get(label) {
            return variable.clone();
        }
        let variable = self.fresh_variable("bnode");
        self.blank_node_variables
            .insert(label.to_owned(), variable.clone());
        variable
    }

    /// The blank node that stands for `label` in the current template.
    fn template_blank_node(&mut self, label: &str) -> BlankNode {
        self.template_blank_nodes
            .entry(label.to_owned())
            .or_default()
            .clone()
    }
}
