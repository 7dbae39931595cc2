use crate::ast::{GroupGraphPattern, IriAst, PrologueDecl, TriplesSameSubject, VarOrIri};

/// A parsed SPARQL update request. Each operation carries the declarations that precede it.
#[derive(Clone, Debug, PartialEq)]
pub struct UpdateAst {
    pub operations: Vec<(Vec<PrologueDecl>, UpdateOperationAst)>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum UpdateOperationAst {
    InsertData(Vec<QuadsItem>),
    DeleteData(Vec<QuadsItem>),
    DeleteWhere(Vec<QuadsItem>),
    Modify {
        with: Option<IriAst>,
        delete: Option<Vec<QuadsItem>>,
        insert: Option<Vec<QuadsItem>>,
        using: Vec<UsingClause>,
        pattern: GroupGraphPattern,
    },
    Load {
        silent: bool,
        source: IriAst,
        destination: Option<IriAst>,
    },
    Clear {
        silent: bool,
        target: GraphTarget,
    },
    Drop {
        silent: bool,
        target: GraphTarget,
    },
    Create {
        silent: bool,
        graph: IriAst,
    },
    /// `ADD`, `MOVE`, or `COPY`.
    Transfer {
        kind: TransferKind,
        silent: bool,
        from: Option<IriAst>,
        to: Option<IriAst>,
    },
}

/// The items of a quad template. Triples outside of `GRAPH` belong to the default graph.
#[derive(Clone, Debug, PartialEq)]
pub enum QuadsItem {
    Triples(Vec<TriplesSameSubject>),
    Graph(VarOrIri, Vec<TriplesSameSubject>),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UsingClause {
    Default(IriAst),
    Named(IriAst),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GraphTarget {
    Graph(IriAst),
    Default,
    Named,
    All,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TransferKind {
    Add,
    Move,
    Copy,
}
