use crate::algebra::{
    GraphNamePattern, GraphPattern, NamedNodePattern, QuadPattern, TermPattern, TriplePattern,
};
use crate::error::TranslationError;
use crate::query::QueryDataset;
use crate::translate::group::join;
use crate::translate::Translator;
use crate::update::{GraphTarget, GraphUpdateOperation};
use rdf_loom_model::{GraphName, NamedNode, Quad, Subject, Term, Variable};
use rdf_loom_parser::ast::{self, IriAst, QuadsItem, TransferKind, UpdateOperationAst, UsingClause};
use std::sync::Arc;

impl Translator {
    pub(super) fn translate_update_operation(
        &mut self,
        operation: &UpdateOperationAst,
    ) -> Result<Vec<GraphUpdateOperation>, TranslationError> {
        self.template_blank_nodes.clear();
        Ok(match operation {
            UpdateOperationAst::InsertData(items) => {
                let quads = self.translate_quad_template(items, None)?;
                vec![GraphUpdateOperation::InsertData {
                    data: ground_quads(quads, None)?,
                }]
            }
            UpdateOperationAst::DeleteData(items) => {
                let quads = self.translate_quad_template(items, None)?;
                vec![GraphUpdateOperation::DeleteData {
                    data: ground_quads(quads, Some("DELETE DATA"))?,
                }]
            }
            UpdateOperationAst::DeleteWhere(items) => {
                let delete = self.translate_quad_template(items, None)?;
                reject_blank_nodes(&delete, "DELETE WHERE")?;
                let mut pattern = GraphPattern::empty_singleton();
                for item in items {
                    let next = match item {
                        QuadsItem::Triples(triples) => self.translate_triples_block(triples)?,
                        QuadsItem::Graph(name, triples) => GraphPattern::Graph {
                            name: self.named_node_pattern(name)?,
                            inner: Arc::new(self.translate_triples_block(triples)?),
                        },
                    };
                    pattern = join(pattern, next);
                }
                vec![GraphUpdateOperation::DeleteInsert {
                    delete,
                    insert: Vec::new(),
                    using: None,
                    pattern: Arc::new(pattern),
                }]
            }
            UpdateOperationAst::Modify {
                with,
                delete,
                insert,
                using,
                pattern,
            } => {
                let with = with.as_ref().map(|iri| self.named_node(iri)).transpose()?;
                let delete = match delete {
                    Some(items) => self.translate_quad_template(items, with.as_ref())?,
                    None => Vec::new(),
                };
                reject_blank_nodes(&delete, "DELETE templates")?;
                let insert = match insert {
                    Some(items) => self.translate_quad_template(items, with.as_ref())?,
                    None => Vec::new(),
                };
                let using = if using.is_empty() {
                    with.map(|with| QueryDataset {
                        default: vec![with],
                        named: None,
                    })
                } else {
                    Some(self.translate_using(using)?)
                };
                vec![GraphUpdateOperation::DeleteInsert {
                    delete,
                    insert,
                    using,
                    pattern: Arc::new(self.translate_group(pattern)?),
                }]
            }
            UpdateOperationAst::Load {
                silent,
                source,
                destination,
            } => vec![GraphUpdateOperation::Load {
                silent: *silent,
                source: self.named_node(source)?,
                destination: match destination {
                    Some(destination) => self.named_node(destination)?.into(),
                    None => GraphName::DefaultGraph,
                },
            }],
            UpdateOperationAst::Clear { silent, target } => vec![GraphUpdateOperation::Clear {
                silent: *silent,
                graph: self.graph_target(target)?,
            }],
            UpdateOperationAst::Drop { silent, target } => vec![GraphUpdateOperation::Drop {
                silent: *silent,
                graph: self.graph_target(target)?,
            }],
            UpdateOperationAst::Create { silent, graph } => vec![GraphUpdateOperation::Create {
                silent: *silent,
                graph: self.named_node(graph)?,
            }],
            UpdateOperationAst::Transfer { kind, from, to, .. } => {
                let from = self.optional_graph(from.as_ref())?;
                let to = self.optional_graph(to.as_ref())?;
                transfer(*kind, from, to)
            }
        })
    }

    /// Translates a quad template. Triples outside of `GRAPH` go to `default_graph` if given.
    fn translate_quad_template(
        &mut self,
        items: &[QuadsItem],
        default_graph: Option<&NamedNode>,
    ) -> Result<Vec<QuadPattern>, TranslationError> {
        let mut quads = Vec::new();
        for item in items {
            let (graph_name, triples) = match item {
                QuadsItem::Triples(triples) => (
                    default_graph.map_or(GraphNamePattern::DefaultGraph, |graph| {
                        GraphNamePattern::NamedNode(graph.clone())
                    }),
                    triples,
                ),
                QuadsItem::Graph(name, triples) => {
                    let graph_name = match self.named_node_pattern(name)? {
                        NamedNodePattern::NamedNode(node) => GraphNamePattern::NamedNode(node),
                        NamedNodePattern::Variable(variable) => {
                            GraphNamePattern::Variable(variable)
                        }
                    };
                    (graph_name, triples)
                }
            };
            for triple in self.translate_template(triples)? {
                quads.push(QuadPattern {
                    subject: triple.subject,
                    predicate: triple.predicate,
                    object: triple.object,
                    graph_name: graph_name.clone(),
                });
            }
        }
        Ok(quads)
    }

    fn translate_using(&self, using: &[UsingClause]) -> Result<QueryDataset, TranslationError> {
        let mut default = Vec::new();
        let mut named = Vec::new();
        for clause in using {
            match clause {
                UsingClause::Default(iri) => default.push(self.named_node(iri)?),
                UsingClause::Named(iri) => named.push(self.named_node(iri)?),
            }
        }
        Ok(QueryDataset {
            default,
            named: Some(named),
        })
    }

    fn graph_target(&self, target: &ast::GraphTarget) -> Result<GraphTarget, TranslationError> {
        Ok(match target {
            ast::GraphTarget::Graph(iri) => GraphTarget::NamedNode(self.named_node(iri)?),
            ast::GraphTarget::Default => GraphTarget::DefaultGraph,
            ast::GraphTarget::Named => GraphTarget::NamedGraphs,
            ast::GraphTarget::All => GraphTarget::AllGraphs,
        })
    }

    /// [None] stands for the default graph.
    fn optional_graph(
        &self,
        iri: Option<&IriAst>,
    ) -> Result<Option<NamedNode>, TranslationError> {
        iri.map(|iri| self.named_node(iri)).transpose()
    }
}

/// Desugars `ADD`, `MOVE`, and `COPY` from `from` to `to`. [None] is the default graph.
///
/// Transferring a graph to itself does nothing.
fn transfer(
    kind: TransferKind,
    from: Option<NamedNode>,
    to: Option<NamedNode>,
) -> Vec<GraphUpdateOperation> {
    if from == to {
        return Vec::new();
    }
    let subject = Variable::new_unchecked("s");
    let predicate = Variable::new_unchecked("p");
    let object = Variable::new_unchecked("o");
    let bgp = GraphPattern::Bgp {
        patterns: vec![TriplePattern::new(
            subject.clone(),
            predicate.clone(),
            object.clone(),
        )],
    };
    let pattern = match &from {
        Some(from) => GraphPattern::Graph {
            name: from.clone().into(),
            inner: Arc::new(bgp),
        },
        None => bgp,
    };
    let insert = QuadPattern {
        subject: subject.into(),
        predicate: predicate.into(),
        object: object.into(),
        graph_name: to
            .clone()
            .map_or(GraphNamePattern::DefaultGraph, GraphNamePattern::NamedNode),
    };

    let mut operations = Vec::new();
    if kind != TransferKind::Add {
        operations.push(GraphUpdateOperation::Drop {
            silent: true,
            graph: transfer_target(to),
        });
    }
    operations.push(GraphUpdateOperation::DeleteInsert {
        delete: Vec::new(),
        insert: vec![insert],
        using: None,
        pattern: Arc::new(pattern),
    });
    if kind == TransferKind::Move {
        operations.push(GraphUpdateOperation::Drop {
            silent: true,
            graph: transfer_target(from),
        });
    }
    operations
}

fn transfer_target(graph: Option<NamedNode>) -> GraphTarget {
    graph.map_or(GraphTarget::DefaultGraph, GraphTarget::NamedNode)
}

fn reject_blank_nodes(
    quads: &[QuadPattern],
    context: &'static str,
) -> Result<(), TranslationError> {
    let has_blank_node = quads.iter().any(|quad| {
        matches!(quad.subject, TermPattern::BlankNode(_))
            || matches!(quad.object, TermPattern::BlankNode(_))
    });
    if has_blank_node {
        Err(TranslationError::BlankNodeNotAllowed(context))
    } else {
        Ok(())
    }
}

/// Turns the quads of a data block into ground quads. With a `forbid_blank_nodes` context,
/// blank nodes are rejected.
fn ground_quads(
    quads: Vec<QuadPattern>,
    forbid_blank_nodes: Option<&'static str>,
) -> Result<Vec<Quad>, TranslationError> {
    if let Some(context) = forbid_blank_nodes {
        reject_blank_nodes(&quads, context)?;
    }
    quads.into_iter().map(ground_quad).collect()
}

fn ground_quad(quad: QuadPattern) -> Result<Quad, TranslationError> {
    let subject: Subject = match ground_term(quad.subject)? {
        Term::NamedNode(node) => node.into(),
        Term::BlankNode(node) => node.into(),
        Term::Literal(literal) => {
            return Err(TranslationError::InvalidTemplate(format!(
                "the literal {literal} cannot be a subject"
            )))
        }
    };
    let NamedNodePattern::NamedNode(predicate) = quad.predicate else {
        return Err(variable_in_data());
    };
    let graph_name = match quad.graph_name {
        GraphNamePattern::NamedNode(node) => GraphName::NamedNode(node),
        GraphNamePattern::DefaultGraph => GraphName::DefaultGraph,
        GraphNamePattern::Variable(_) => return Err(variable_in_data()),
    };
    Ok(Quad::new(subject, predicate, ground_term(quad.object)?, graph_name))
}

fn ground_term(pattern: TermPattern) -> Result<Term, TranslationError> {
    match pattern {
        TermPattern::NamedNode(node) => Ok(node.into()),
        TermPattern::BlankNode(node) => Ok(node.into()),
        TermPattern::Literal(literal) => Ok(literal.into()),
        TermPattern::Variable(_) => Err(variable_in_data()),
    }
}

fn variable_in_data() -> TranslationError {
    TranslationError::InvalidTemplate("variables are not allowed in data blocks".to_owned())
}
