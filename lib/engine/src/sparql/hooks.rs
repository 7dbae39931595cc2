//! Process-wide evaluation hooks.
//!
//! A hook replaces the built-in evaluation of one kind of algebra node. The evaluator consults
//! the registry before evaluating every node. Hooks can call
//! [SimpleEvaluator::evaluate_builtin_pattern] to wrap the built-in behaviour instead of
//! replacing it.
//!
//! Errors returned by a hook are passed to the consumer of the results unchanged. Wrap them with
//! [QueryEvaluationError::extension](crate::sparql::error::QueryEvaluationError::extension) to
//! keep them downcastable.

use crate::sparql::evaluator::{SimpleEvaluator, SolutionIter};
use crate::sparql::Bindings;
use rdf_loom_logical::algebra::{GraphPattern, GraphPatternKind};
use rustc_hash::FxHashMap;
use std::sync::{Arc, LazyLock, PoisonError, RwLock};

/// Evaluates a node in place of the built-in evaluation.
pub type EvaluationHook =
    Arc<dyn Fn(&SimpleEvaluator, &Arc<GraphPattern>, Bindings) -> SolutionIter + Send + Sync>;

static HOOKS: LazyLock<RwLock<FxHashMap<GraphPatternKind, EvaluationHook>>> =
    LazyLock::new(RwLock::default);

/// Registers `hook` for all nodes of the given kind. Returns the hook that was registered before.
pub fn register_evaluation_hook(
    kind: GraphPatternKind,
    hook: EvaluationHook,
) -> Option<EvaluationHook> {
    tracing::debug!(%kind, "Registering evaluation hook");
    HOOKS
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .insert(kind, hook)
}

/// Removes the hook for the given kind and returns it.
pub fn unregister_evaluation_hook(kind: GraphPatternKind) -> Option<EvaluationHook> {
    tracing::debug!(%kind, "Unregistering evaluation hook");
    HOOKS
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .remove(&kind)
}

pub(crate) fn evaluation_hook(kind: GraphPatternKind) -> Option<EvaluationHook> {
    HOOKS
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .get(&kind)
        .cloned()
}

/// Registers a hook for as long as the guard lives.
///
/// Dropping the guard restores the hook that was registered before, if any.
///
/// ```
/// use rdf_loom_engine::sparql::EvaluationHookGuard;
/// use rdf_loom_logical::algebra::GraphPatternKind;
/// use std::sync::Arc;
///
/// let _guard = EvaluationHookGuard::register(
///     GraphPatternKind::Service,
///     Arc::new(|_, _, seed| Box::new(std::iter::once(Ok(seed)))),
/// );
/// ```
#[must_use]
pub struct EvaluationHookGuard {
    kind: GraphPatternKind,
    previous: Option<EvaluationHook>,
}

impl EvaluationHookGuard {
    pub fn register(kind: GraphPatternKind, hook: EvaluationHook) -> Self {
        let previous = register_evaluation_hook(kind, hook);
        Self { kind, previous }
    }
}

impl Drop for EvaluationHookGuard {
    fn drop(&mut self) {
        match self.previous.take() {
            Some(previous) => {
                register_evaluation_hook(self.kind, previous);
            }
            None => {
                unregister_evaluation_hook(self.kind);
            }
        }
    }
}
