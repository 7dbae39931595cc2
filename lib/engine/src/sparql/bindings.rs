use rdf_loom_model::{Term, Variable};
use rustc_hash::FxHashSet;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

/// A solution mapping from variables to terms.
///
/// Bindings are a chain of immutable layers. [merge](Self::merge) puts a new layer on top of an
/// existing chain without copying it, so extending a solution during a join is cheap and the
/// solution it was created from stays unchanged.
///
/// [forget](Self::forget) hides the bindings of the current scope, except the retained ones. The
/// scope of a chain ends at the first layer created with [with_outer](Self::with_outer). Bindings
/// below that layer stay visible.
#[derive(Clone, Default)]
pub struct Bindings {
    head: Option<Arc<Layer>>,
}

struct Layer {
    kind: LayerKind,
    parent: Option<Arc<Layer>>,
}

enum LayerKind {
    Values(Vec<(Variable, Term)>),
    /// Hides everything down to the next outer boundary, except the retained variables.
    Forget(FxHashSet<Variable>),
    OuterBoundary,
}

impl Layer {
    /// The next outer boundary below this layer.
    fn outer_boundary(&self) -> Option<&Layer> {
        let mut layer = self.parent.as_deref();
        while let Some(current) = layer {
            if matches!(current.kind, LayerKind::OuterBoundary) {
                return Some(current);
            }
            layer = current.parent.as_deref();
        }
        None
    }
}

impl Bindings {
    /// Creates empty bindings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the term bound to `variable`. Inner layers shadow outer ones.
    pub fn lookup(&self, variable: &Variable) -> Option<&Term> {
        let mut layer = self.head.as_deref();
        while let Some(current) = layer {
            match &current.kind {
                LayerKind::Values(values) => {
                    if let Some((_, term)) = values.iter().find(|(v, _)| v == variable) {
                        return Some(term);
                    }
                }
                LayerKind::Forget(retained) => {
                    if !retained.contains(variable) {
                        layer = current.outer_boundary();
                        continue;
                    }
                }
                LayerKind::OuterBoundary => {}
            }
            layer = current.parent.as_deref();
        }
        None
    }

    pub fn contains(&self, variable: &Variable) -> bool {
        self.lookup(variable).is_some()
    }

    /// The number of visible variables. A shadowed variable is counted once.
    pub fn size(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    /// Creates new bindings with `values` on top of `self`.
    #[must_use]
    pub fn merge(&self, values: impl IntoIterator<Item = (Variable, Term)>) -> Self {
        let values = values.into_iter().collect::<Vec<_>>();
        if values.is_empty() {
            return self.clone();
        }
        self.push(LayerKind::Values(values))
    }

    /// Creates new bindings with `variable` bound to `term`.
    #[must_use]
    pub fn with(&self, variable: Variable, term: Term) -> Self {
        self.push(LayerKind::Values(vec![(variable, term)]))
    }

    /// Creates new bindings in which only the `retained` variables of the current scope are
    /// visible. Variables bound outside of the current scope stay visible.
    #[must_use]
    pub fn forget<'a>(&self, retained: impl IntoIterator<Item = &'a Variable>) -> Self {
        if self.head.is_none() {
            return Self::new();
        }
        self.push(LayerKind::Forget(retained.into_iter().cloned().collect()))
    }

    /// Starts a new scope. The current bindings become outer bindings that
    /// [forget](Self::forget) does not hide.
    #[must_use]
    pub fn with_outer(&self) -> Self {
        self.push(LayerKind::OuterBoundary)
    }

    /// Iterates over the visible bindings. Every variable is returned once with its innermost
    /// value.
    pub fn iter(&self) -> impl Iterator<Item = (&Variable, &Term)> {
        let mut seen = FxHashSet::default();
        let mut filters = Vec::new();
        let mut visible = Vec::new();
        let mut layer = self.head.as_deref();
        while let Some(current) = layer {
            match &current.kind {
                LayerKind::Values(values) => {
                    for (variable, term) in values {
                        let hidden = filters
                            .iter()
                            .any(|retained: &&FxHashSet<Variable>| !retained.contains(variable));
                        if !hidden && seen.insert(variable) {
                            visible.push((variable, term));
                        }
                    }
                }
                LayerKind::Forget(retained) => filters.push(retained),
                LayerKind::OuterBoundary => filters.clear(),
            }
            layer = current.parent.as_deref();
        }
        visible.into_iter()
    }

    /// Returns whether the two bindings agree on all the variables they share.
    pub fn is_compatible(&self, other: &Bindings) -> bool {
        other
            .iter()
            .all(|(variable, term)| self.lookup(variable).map_or(true, |own| own == term))
    }

    /// Returns the union of both bindings, or [None] if they are not compatible.
    pub fn combine(&self, other: &Bindings) -> Option<Bindings> {
        let mut values = Vec::new();
        for (variable, term) in other.iter() {
            match self.lookup(variable) {
                Some(own) if own != term => return None,
                Some(_) => {}
                None => values.push((variable.clone(), term.clone())),
            }
        }
        Some(self.merge(values))
    }

    /// Restricts the bindings to `variables`. The result has a single layer.
    #[must_use]
    pub fn project(&self, variables: &[Variable]) -> Self {
        variables
            .iter()
            .filter_map(|variable| {
                self.lookup(variable)
                    .map(|term| (variable.clone(), term.clone()))
            })
            .collect()
    }

    /// The visible bindings, sorted by variable. Two bindings are equal iff their keys are equal.
    pub fn key(&self) -> Vec<(Variable, Term)> {
        let mut key = self
            .iter()
            .map(|(variable, term)| (variable.clone(), term.clone()))
            .collect::<Vec<_>>();
        key.sort_unstable_by(|(a, _), (b, _)| a.as_str().cmp(b.as_str()));
        key
    }

    fn push(&self, kind: LayerKind) -> Self {
        Self {
            head: Some(Arc::new(Layer {
                kind,
                parent: self.head.clone(),
            })),
        }
    }
}

impl FromIterator<(Variable, Term)> for Bindings {
    fn from_iter<T: IntoIterator<Item = (Variable, Term)>>(iter: T) -> Self {
        Self::new().merge(iter)
    }
}

impl PartialEq for Bindings {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Bindings {}

impl Debug for Bindings {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rdf_loom_model::Literal;

    fn var(name: &str) -> Variable {
        Variable::new_unchecked(name)
    }

    fn lit(value: &str) -> Term {
        Literal::new_simple_literal(value).into()
    }

    #[test]
    fn lookup_prefers_inner_layers() {
        let outer = Bindings::new().with(var("a"), lit("1"));
        let inner = outer.merge([(var("a"), lit("2")), (var("b"), lit("3"))]);
        assert_eq!(inner.lookup(&var("a")), Some(&lit("2")));
        assert_eq!(inner.lookup(&var("b")), Some(&lit("3")));
        assert_eq!(outer.lookup(&var("a")), Some(&lit("1")));
        assert!(!outer.contains(&var("b")));
    }

    #[test]
    fn size_counts_shadowed_variables_once() {
        let bindings = Bindings::new()
            .with(var("a"), lit("1"))
            .with(var("a"), lit("2"))
            .with(var("b"), lit("3"));
        assert_eq!(bindings.size(), 2);
        assert_eq!(
            bindings.iter().collect::<Vec<_>>(),
            [(&var("b"), &lit("3")), (&var("a"), &lit("2"))]
        );
    }

    #[test]
    fn forget_hides_the_current_scope() {
        let bindings = Bindings::new()
            .with(var("outer"), lit("o"))
            .with_outer()
            .merge([(var("a"), lit("1")), (var("b"), lit("2"))]);
        let forgotten = bindings.forget([&var("a")]);
        assert!(forgotten.contains(&var("a")));
        assert!(!forgotten.contains(&var("b")));
        assert!(forgotten.contains(&var("outer")));
        assert_eq!(forgotten.size(), 2);
        assert!(bindings.contains(&var("b")));
    }

    #[test]
    fn bindings_after_forget_are_visible() {
        let bindings = Bindings::new()
            .with(var("a"), lit("1"))
            .forget([])
            .with(var("b"), lit("2"));
        assert!(!bindings.contains(&var("a")));
        assert_eq!(bindings.key(), [(var("b"), lit("2"))]);
    }

    #[test]
    fn combine_rejects_conflicts() {
        let left = Bindings::new().with(var("a"), lit("1"));
        let compatible = Bindings::new().merge([(var("a"), lit("1")), (var("b"), lit("2"))]);
        let conflicting = Bindings::new().with(var("a"), lit("2"));
        let combined = left.combine(&compatible).map(|b| b.key());
        assert_eq!(combined, Some(vec![(var("a"), lit("1")), (var("b"), lit("2"))]));
        assert_eq!(left.combine(&conflicting), None);
        assert!(!left.is_compatible(&conflicting));
    }

    #[test]
    fn equality_ignores_layers() {
        let layered = Bindings::new().with(var("a"), lit("1")).with(var("b"), lit("2"));
        let flat = Bindings::new().merge([(var("b"), lit("2")), (var("a"), lit("1"))]);
        assert_eq!(layered, flat);
    }
}
