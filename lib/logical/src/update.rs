use crate::algebra::{GraphPattern, QuadPattern};
use crate::query::{Namespaces, QueryDataset};
use rdf_loom_model::{GraphName, Iri, NamedNode, Quad};
use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// A translated update request.
///
/// Updates are only translated. The operations are exposed so that a store can apply them.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Update {
    pub operations: Vec<GraphUpdateOperation>,
    /// The base IRI in effect after the last operation.
    pub base_iri: Option<Iri<String>>,
    pub source: String,
    pub namespaces: Namespaces,
}

/// A graph targeted by `CLEAR` or `DROP`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum GraphTarget {
    NamedNode(NamedNode),
    DefaultGraph,
    NamedGraphs,
    AllGraphs,
}

impl Display for GraphTarget {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            GraphTarget::NamedNode(node) => node.fmt(f),
            GraphTarget::DefaultGraph => f.write_str("default"),
            GraphTarget::NamedGraphs => f.write_str("named"),
            GraphTarget::AllGraphs => f.write_str("all"),
        }
    }
}

/// A single operation of an update request. `ADD`, `MOVE`, and `COPY` are desugared into
/// [GraphUpdateOperation::Drop] and [GraphUpdateOperation::DeleteInsert].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum GraphUpdateOperation {
    InsertData {
        data: Vec<Quad>,
    },
    DeleteData {
        data: Vec<Quad>,
    },
    DeleteInsert {
        delete: Vec<QuadPattern>,
        insert: Vec<QuadPattern>,
        using: Option<QueryDataset>,
        pattern: Arc<GraphPattern>,
    },
    Load {
        silent: bool,
        source: NamedNode,
        destination: GraphName,
    },
    Clear {
        silent: bool,
        graph: GraphTarget,
    },
    Create {
        silent: bool,
        graph: NamedNode,
    },
    Drop {
        silent: bool,
        graph: GraphTarget,
    },
}

impl Display for GraphUpdateOperation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            GraphUpdateOperation::InsertData { data } => {
                f.write_str("(insertData (")?;
                write_quads(f, data)?;
                f.write_str("))")
            }
            GraphUpdateOperation::DeleteData { data } => {
                f.write_str("(deleteData (")?;
                write_quads(f, data)?;
                f.write_str("))")
            }
            GraphUpdateOperation::DeleteInsert {
                delete,
                insert,
                using,
                pattern,
            } => {
                f.write_str("(modify")?;
                if !delete.is_empty() {
                    f.write_str(" (delete")?;
                    for quad in delete {
                        write!(f, " {quad}")?;
                    }
                    f.write_str(")")?;
                }
                if !insert.is_empty() {
                    f.write_str(" (insert")?;
                    for quad in insert {
                        write!(f, " {quad}")?;
                    }
                    f.write_str(")")?;
                }
                if let Some(using) = using {
                    write!(f, " (using {using})")?;
                }
                write!(f, " {pattern})")
            }
            GraphUpdateOperation::Load {
                silent,
                source,
                destination,
            } => {
                f.write_str("(load ")?;
                if *silent {
                    f.write_str("silent ")?;
                }
                write!(f, "{source} {destination})")
            }
            GraphUpdateOperation::Clear { silent, graph } => {
                write_graph_management(f, "clear", *silent, graph)
            }
            GraphUpdateOperation::Create { silent, graph } => {
                if *silent {
                    write!(f, "(create silent {graph})")
                } else {
                    write!(f, "(create {graph})")
                }
            }
            GraphUpdateOperation::Drop { silent, graph } => {
                write_graph_management(f, "drop", *silent, graph)
            }
        }
    }
}

impl Display for Update {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("(update")?;
        for operation in &self.operations {
            write!(f, " {operation}")?;
        }
        f.write_str(")")
    }
}

fn write_quads(f: &mut Formatter<'_>, quads: &[Quad]) -> std::fmt::Result {
    for (i, quad) in quads.iter().enumerate() {
        if i > 0 {
            f.write_str(" ")?;
        }
        if quad.graph_name.is_default_graph() {
            write!(
                f,
                "(triple {} {} {})",
                quad.subject, quad.predicate, quad.object
            )?;
        } else {
            write!(
                f,
                "(graph {} (triple {} {} {}))",
                quad.graph_name, quad.subject, quad.predicate, quad.object
            )?;
        }
    }
    Ok(())
}

fn write_graph_management(
    f: &mut Formatter<'_>,
    name: &str,
    silent: bool,
    graph: &GraphTarget,
) -> std::fmt::Result {
    if silent {
        write!(f, "({name} silent {graph})")
    } else {
        write!(f, "({name} {graph})")
    }
}
