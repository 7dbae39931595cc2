use crate::algebra::{GraphPattern, PropertyPathExpression, TermPattern, TriplePattern};
use crate::error::TranslationError;
use crate::translate::group::join;
use crate::translate::Translator;
use rdf_loom_model::vocab::{rdf, xsd};
use rdf_loom_model::{BlankNode, Literal, NamedNode, Term};
use rdf_loom_parser::ast::{
    GraphNode, LiteralAnnotation, LiteralAst, NumericKind, PathAst, PropertyListItem, TermAst,
    TriplesSameSubject, VerbAst,
};
use std::sync::Arc;

type PathCombinator =
    fn(Box<PropertyPathExpression>, Box<PropertyPathExpression>) -> PropertyPathExpression;

/// Collects the output of translating triples.
///
/// In template mode, blank nodes are kept and property paths other than a single IRI are
/// rejected. Otherwise, blank nodes become variables and paths may produce additional patterns.
struct TriplesCollector {
    template: bool,
    triples: Vec<TriplePattern>,
    patterns: Vec<GraphPattern>,
}

impl TriplesCollector {
    fn new(template: bool) -> Self {
        Self {
            template,
            triples: Vec::new(),
            patterns: Vec::new(),
        }
    }

    fn into_pattern(self) -> GraphPattern {
        let bgp = if self.triples.is_empty() {
            GraphPattern::empty_singleton()
        } else {
            GraphPattern::Bgp {
                patterns: self.triples,
            }
        };
        self.patterns.into_iter().fold(bgp, join)
    }
}

impl Translator {
    /// Translates a block of triples inside a group graph pattern.
    pub(super) fn translate_triples_block(
        &mut self,
        triples: &[TriplesSameSubject],
    ) -> Result<GraphPattern, TranslationError> {
        let mut collector = TriplesCollector::new(false);
        for triple in triples {
            self.translate_triples_same_subject(triple, &mut collector)?;
        }
        Ok(collector.into_pattern())
    }

    /// Translates the triples of a `CONSTRUCT` or update template.
    ///
    /// Blank node labels are shared with previous calls until `template_blank_nodes` is
    /// cleared.
    pub(super) fn translate_template(
        &mut self,
        triples: &[TriplesSameSubject],
    ) -> Result<Vec<TriplePattern>, TranslationError> {
        let mut collector = TriplesCollector::new(true);
        for triple in triples {
            self.translate_triples_same_subject(triple, &mut collector)?;
        }
        Ok(collector.triples)
    }

    fn translate_triples_same_subject(
        &mut self,
        triple: &TriplesSameSubject,
        collector: &mut TriplesCollector,
    ) -> Result<(), TranslationError> {
        let subject = self.translate_graph_node(&triple.subject, collector)?;
        self.translate_property_list(&subject, &triple.properties, collector)
    }

    fn translate_property_list(
        &mut self,
        subject: &TermPattern,
        properties: &[PropertyListItem],
        collector: &mut TriplesCollector,
    ) -> Result<(), TranslationError> {
        for property in properties {
            for object in &property.objects {
                let object = self.translate_graph_node(object, collector)?;
                match &property.verb {
                    VerbAst::Var(var) => collector.triples.push(TriplePattern::new(
                        subject.clone(),
                        Self::variable(var),
                        object,
                    )),
                    VerbAst::Path(path) => {
                        self.translate_path(subject.clone(), path, object, collector)?;
                    }
                }
            }
        }
        Ok(())
    }

    /// Translates a node and returns the term that identifies it. Collections and blank node
    /// property lists add their triples to `collector`.
    fn translate_graph_node(
        &mut self,
        node: &GraphNode,
        collector: &mut TriplesCollector,
    ) -> Result<TermPattern, TranslationError> {
        match node {
            GraphNode::Term(term) => self.term_pattern(term, collector.template),
            GraphNode::Collection(items) => {
                let mut elements = Vec::with_capacity(items.len());
                for item in items {
                    elements.push(self.translate_graph_node(item, collector)?);
                }
                let mut head = TermPattern::NamedNode(rdf::NIL.into_owned());
                for element in elements.into_iter().rev() {
                    let node = self.fresh_node(collector.template);
                    collector.triples.push(TriplePattern::new(
                        node.clone(),
                        rdf::FIRST.into_owned(),
                        element,
                    ));
                    collector.triples.push(TriplePattern::new(
                        node.clone(),
                        rdf::REST.into_owned(),
                        head,
                    ));
                    head = node;
                }
                Ok(head)
            }
            GraphNode::BlankNodePropertyList(properties) => {
                let node = self.fresh_node(collector.template);
                self.translate_property_list(&node, properties, collector)?;
                Ok(node)
            }
        }
    }

    fn fresh_node(&mut self, template: bool) -> TermPattern {
        if template {
            TermPattern::BlankNode(BlankNode::default())
        } else {
            TermPattern::Variable(self.fresh_variable("bnode"))
        }
    }

    pub(super) fn term_pattern(
        &mut self,
        term: &TermAst,
        template: bool,
    ) -> Result<TermPattern, TranslationError> {
        Ok(match term {
            TermAst::Iri(iri) => self.named_node(iri)?.into(),
            TermAst::Literal(literal) => self.literal(literal)?.into(),
            TermAst::BlankNode(label) => {
                if template {
                    TermPattern::BlankNode(self.template_blank_node(label))
                } else {
                    self.blank_node_variable(label).into()
                }
            }
            TermAst::Anon => self.fresh_node(template),
            TermAst::Nil => rdf::NIL.into_owned().into(),
            TermAst::Var(var) => Self::variable(var).into(),
        })
    }

    /// Translates a constant of a `VALUES` block.
    pub(super) fn constant_term(&self, term: &TermAst) -> Result<Term, TranslationError> {
        Ok(match term {
            TermAst::Iri(iri) => self.named_node(iri)?.into(),
            TermAst::Literal(literal) => self.literal(literal)?.into(),
            TermAst::Nil => rdf::NIL.into_owned().into(),
            TermAst::BlankNode(_) | TermAst::Anon => {
                return Err(TranslationError::BlankNodeNotAllowed("VALUES"))
            }
            TermAst::Var(var) => {
                return Err(TranslationError::UnexpectedVariable {
                    variable: var.name.clone(),
                    span: var.span,
                })
            }
        })
    }

    pub(super) fn literal(&self, literal: &LiteralAst) -> Result<Literal, TranslationError> {
        Ok(match literal {
            LiteralAst::String { value, annotation } => match annotation {
                LiteralAnnotation::None => Literal::new_simple_literal(value),
                LiteralAnnotation::Language(tag) => {
                    Literal::new_language_tagged_literal(value, tag).map_err(|error| {
                        TranslationError::InvalidLanguageTag {
                            tag: tag.clone(),
                            message: error.to_string(),
                        }
                    })?
                }
                LiteralAnnotation::Datatype(datatype) => {
                    Literal::new_typed_literal(value, self.named_node(datatype)?)
                }
            },
            LiteralAst::Numeric { kind, lexical } => {
                let datatype = match kind {
                    NumericKind::Integer => xsd::INTEGER,
                    NumericKind::Decimal => xsd::DECIMAL,
                    NumericKind::Double => xsd::DOUBLE,
                };
                Literal::new_typed_literal(lexical, datatype)
            }
            LiteralAst::Boolean(value) => Literal::from(*value),
        })
    }

    /// Translates `subject path object`.
    ///
    /// Sequences are chained through fresh variables, alternatives become unions, and inverse
    /// paths swap subject and object. The remaining forms become [GraphPattern::Path].
    fn translate_path(
        &mut self,
        subject: TermPattern,
        path: &PathAst,
        object: TermPattern,
        collector: &mut TriplesCollector,
    ) -> Result<(), TranslationError> {
        if collector.template && !matches!(path, PathAst::Iri(_) | PathAst::A) {
            return Err(TranslationError::InvalidTemplate(
                "property paths are not allowed in templates".to_owned(),
            ));
        }
        match path {
            PathAst::Iri(iri) => {
                let predicate = self.named_node(iri)?;
                collector
                    .triples
                    .push(TriplePattern::new(subject, predicate, object));
            }
            PathAst::A => collector.triples.push(TriplePattern::new(
                subject,
                rdf::TYPE.into_owned(),
                object,
            )),
            PathAst::Inverse(inner) => self.translate_path(object, inner, subject, collector)?,
            PathAst::Sequence(items) => {
                let Some((last, init)) = items.split_last() else {
                    return Err(TranslationError::EmptyPropertyPath);
                };
                let mut current = subject;
                for item in init {
                    let next = TermPattern::Variable(self.fresh_variable("path"));
                    self.translate_path(current, item, next.clone(), collector)?;
                    current = next;
                }
                self.translate_path(current, last, object, collector)?;
            }
            PathAst::Alternative(items) => {
                let mut union: Option<GraphPattern> = None;
                for item in items {
                    let mut branch = TriplesCollector::new(false);
                    self.translate_path(subject.clone(), item, object.clone(), &mut branch)?;
                    let branch = branch.into_pattern();
                    union = Some(match union {
                        Some(left) => GraphPattern::Union {
                            left: Arc::new(left),
                            right: Arc::new(branch),
                        },
                        None => branch,
                    });
                }
                collector
                    .patterns
                    .push(union.ok_or(TranslationError::EmptyPropertyPath)?);
            }
            PathAst::ZeroOrMore(_)
            | PathAst::OneOrMore(_)
            | PathAst::ZeroOrOne(_)
            | PathAst::NegatedPropertySet(_) => {
                let path = self.path_expression(path)?;
                collector.patterns.push(GraphPattern::Path {
                    subject,
                    path,
                    object,
                });
            }
        }
        Ok(())
    }

    fn path_expression(
        &self,
        path: &PathAst,
    ) -> Result<PropertyPathExpression, TranslationError> {
        Ok(match path {
            PathAst::Iri(iri) => PropertyPathExpression::NamedNode(self.named_node(iri)?),
            PathAst::A => PropertyPathExpression::NamedNode(rdf::TYPE.into_owned()),
            PathAst::Inverse(inner) => {
                PropertyPathExpression::Reverse(Box::new(self.path_expression(inner)?))
            }
            PathAst::Sequence(items) => {
                self.fold_path_expressions(items, PropertyPathExpression::Sequence)?
            }
            PathAst::Alternative(items) => {
                self.fold_path_expressions(items, PropertyPathExpression::Alternative)?
            }
            PathAst::ZeroOrMore(inner) => {
                PropertyPathExpression::ZeroOrMore(Box::new(self.path_expression(inner)?))
            }
            PathAst::OneOrMore(inner) => {
                PropertyPathExpression::OneOrMore(Box::new(self.path_expression(inner)?))
            }
            PathAst::ZeroOrOne(inner) => {
                PropertyPathExpression::ZeroOrOne(Box::new(self.path_expression(inner)?))
            }
            PathAst::NegatedPropertySet(items) => {
                let mut forward = Vec::new();
                let mut inverse = Vec::new();
                for item in items {
                    let node = match &item.iri {
                        Some(iri) => self.named_node(iri)?,
                        None => rdf::TYPE.into_owned(),
                    };
                    if item.inverse {
                        inverse.push(node);
                    } else {
                        forward.push(node);
                    }
                }
                negated_property_set(forward, inverse)
            }
        })
    }

    fn fold_path_expressions(
        &self,
        items: &[PathAst],
        combine: PathCombinator,
    ) -> Result<PropertyPathExpression, TranslationError> {
        let mut result: Option<PropertyPathExpression> = None;
        for item in items {
            let item = self.path_expression(item)?;
            result = Some(match result {
                Some(lhs) => combine(Box::new(lhs), Box::new(item)),
                None => item,
            });
        }
        result.ok_or(TranslationError::EmptyPropertyPath)
    }
}

/// `!(a | ^b)` matches edges that are not `a` in forward direction or edges that are not `b` in
/// backward direction.
fn negated_property_set(
    forward: Vec<NamedNode>,
    inverse: Vec<NamedNode>,
) -> PropertyPathExpression {
    if inverse.is_empty() {
        PropertyPathExpression::NegatedPropertySet(forward)
    } else if forward.is_empty() {
        PropertyPathExpression::Reverse(Box::new(PropertyPathExpression::NegatedPropertySet(
            inverse,
        )))
    } else {
        PropertyPathExpression::Alternative(
            Box::new(PropertyPathExpression::NegatedPropertySet(forward)),
            Box::new(PropertyPathExpression::Reverse(Box::new(
                PropertyPathExpression::NegatedPropertySet(inverse),
            ))),
        )
    }
}
