use crate::algebra::{GraphPattern, NamedNodePattern, TriplePattern};
use rdf_loom_model::{Iri, NamedNode, Variable};
use std::collections::btree_map;
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// A prefix map. Maps a prefix (without the colon) to a namespace IRI.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Namespaces(BTreeMap<String, String>);

impl Namespaces {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares `prefix`. Returns the namespace that was previously declared, if any.
    pub fn insert(
        &mut self,
        prefix: impl Into<String>,
        namespace: impl Into<String>,
    ) -> Option<String> {
        self.0.insert(prefix.into(), namespace.into())
    }

    pub fn remove(&mut self, prefix: &str) -> Option<String> {
        self.0.remove(prefix)
    }

    pub fn get(&self, prefix: &str) -> Option<&str> {
        self.0.get(prefix).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> NamespacesIter<'_> {
        NamespacesIter(self.0.iter())
    }
}

impl<P: Into<String>, N: Into<String>> FromIterator<(P, N)> for Namespaces {
    fn from_iter<T: IntoIterator<Item = (P, N)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(prefix, namespace)| (prefix.into(), namespace.into()))
                .collect(),
        )
    }
}

impl<'a> IntoIterator for &'a Namespaces {
    type Item = (&'a str, &'a str);
    type IntoIter = NamespacesIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

pub struct NamespacesIter<'a>(btree_map::Iter<'a, String, String>);

impl<'a> Iterator for NamespacesIter<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        self.0
            .next()
            .map(|(prefix, namespace)| (prefix.as_str(), namespace.as_str()))
    }
}

/// The RDF dataset of a query given by `FROM` and `FROM NAMED`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct QueryDataset {
    /// The graphs merged into the default graph.
    pub default: Vec<NamedNode>,
    /// The graphs visible to `GRAPH`. [None] means all named graphs of the store.
    pub named: Option<Vec<NamedNode>>,
}

impl Display for QueryDataset {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("(dataset")?;
        for graph in &self.default {
            write!(f, " {graph}")?;
        }
        if let Some(named) = &self.named {
            for graph in named {
                write!(f, " (named {graph})")?;
            }
        }
        f.write_str(")")
    }
}

/// The result shape of a query.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum QueryForm {
    /// Solutions over the projected variables, in the order of the query text.
    Select { variables: Vec<Variable> },
    Ask,
    Construct { template: Vec<TriplePattern> },
    /// Every triple that has one of the targets as subject.
    Describe { targets: Vec<NamedNodePattern> },
}

/// A translated query.
///
/// A [Query] is immutable and can be evaluated any number of times, against different stores
/// and with different initial bindings.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Query {
    pub form: QueryForm,
    pub pattern: Arc<GraphPattern>,
    pub dataset: Option<QueryDataset>,
    /// The base IRI in effect at the end of the prologue.
    pub base_iri: Option<Iri<String>>,
    /// The query text.
    pub source: String,
    /// The prefixes that were in effect before the prologue was read.
    pub namespaces: Namespaces,
}

impl Query {
    /// The variables of the solutions. Empty for all forms except `SELECT`.
    pub fn variables(&self) -> &[Variable] {
        match &self.form {
            QueryForm::Select { variables } => variables,
            QueryForm::Ask | QueryForm::Construct { .. } | QueryForm::Describe { .. } => &[],
        }
    }

    /// Replaces the root pattern. Used by rewriters.
    #[must_use]
    pub fn with_pattern(self, pattern: impl Into<Arc<GraphPattern>>) -> Self {
        Self {
            pattern: pattern.into(),
            ..self
        }
    }
}

impl Display for Query {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut closing = 0;
        if let Some(base_iri) = &self.base_iri {
            write!(f, "(base <{base_iri}> ")?;
            closing += 1;
        }
        if let Some(dataset) = &self.dataset {
            write!(f, "(from {dataset} ")?;
            closing += 1;
        }
        match &self.form {
            QueryForm::Select { .. } => write!(f, "{}", self.pattern)?,
            QueryForm::Ask => write!(f, "(ask {})", self.pattern)?,
            QueryForm::Construct { template } => {
                f.write_str("(construct (")?;
                for (i, triple) in template.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{triple}")?;
                }
                write!(f, ") {})", self.pattern)?;
            }
            QueryForm::Describe { targets } => {
                f.write_str("(describe (")?;
                for (i, target) in targets.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{target}")?;
                }
                write!(f, ") {})", self.pattern)?;
            }
        }
        for _ in 0..closing {
            f.write_str(")")?;
        }
        Ok(())
    }
}
