#![allow(clippy::panic_in_result_fn)]

use oxttl::TurtleParser;
use rdf_loom_common::QuadStorage;
use rdf_loom_engine::sparql::error::QueryEvaluationError;
use rdf_loom_engine::sparql::{
    evaluate_query, prepare_query, register_evaluation_hook, unregister_evaluation_hook,
    Bindings, EvaluationHook, EvaluationHookGuard, QueryOptions, SimpleEvaluator, SolutionIter,
};
use rdf_loom_engine::{QueryResults, QuerySolutionStream};
use rdf_loom_logical::algebra::{GraphPattern, GraphPatternKind};
use rdf_loom_logical::Namespaces;
use rdf_loom_model::GraphName;
use rdf_loom_storage::memory::MemQuadStorage;
use std::error::Error;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Hooks are process-wide. The tests of this binary must not run concurrently.
static HOOKS: Mutex<()> = Mutex::new(());

const DATA: &str = r#"
@prefix ex: <http://example.com/> .

ex:s1 ex:value 1 .
ex:s2 ex:value 2 .
ex:s3 ex:value 3 .
ex:s4 ex:value 4 .
ex:s5 ex:value 5 .
"#;

const QUERY: &str = "
PREFIX ex: <http://example.com/>
SELECT ?s ?doubled WHERE { ?s ex:value ?v BIND(?v * 2 AS ?doubled) }";

#[derive(Debug, thiserror::Error)]
#[error("Hook failed at element {position}")]
struct HookFault {
    position: usize,
}

fn lock() -> MutexGuard<'static, ()> {
    HOOKS.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Wraps the built-in evaluation and fails while producing the third element.
fn faulting_hook() -> EvaluationHook {
    Arc::new(
        |eval: &SimpleEvaluator, pattern: &Arc<GraphPattern>, seed: Bindings| -> SolutionIter {
            Box::new(
                eval.evaluate_builtin_pattern(pattern, seed)
                    .enumerate()
                    .map(|(position, solution)| {
                        if position == 2 {
                            Err(QueryEvaluationError::extension(HookFault { position }))
                        } else {
                            solution
                        }
                    }),
            )
        },
    )
}

/// Wraps the built-in evaluation and counts the elements pulled from it.
fn counting_hook(pulled: Arc<AtomicUsize>) -> EvaluationHook {
    Arc::new(
        move |eval: &SimpleEvaluator, pattern: &Arc<GraphPattern>, seed: Bindings| -> SolutionIter {
            let pulled = Arc::clone(&pulled);
            Box::new(
                eval.evaluate_builtin_pattern(pattern, seed)
                    .inspect(move |_| {
                        pulled.fetch_add(1, Ordering::SeqCst);
                    }),
            )
        },
    )
}

fn results(query: &str, options: &QueryOptions) -> Result<QueryResults, Box<dyn Error>> {
    let quads = TurtleParser::new()
        .for_slice(DATA.as_bytes())
        .map(|triple| triple.map(|t| t.in_graph(GraphName::DefaultGraph)))
        .collect::<Result<Vec<_>, _>>()?;
    let storage = MemQuadStorage::new();
    storage.extend(quads)?;

    let query = prepare_query(query, &Namespaces::new(), None)?;
    Ok(evaluate_query(
        &query,
        Arc::new(storage),
        Bindings::new(),
        None,
        options,
    )?)
}

fn solutions(options: &QueryOptions) -> Result<QuerySolutionStream, Box<dyn Error>> {
    match results(QUERY, options)? {
        QueryResults::Solutions(solutions) => Ok(solutions),
        _ => Err("expected solutions".into()),
    }
}

fn hook_fault(error: &QueryEvaluationError) -> Option<&HookFault> {
    match error {
        QueryEvaluationError::Extension(source) => source.downcast_ref::<HookFault>(),
        _ => None,
    }
}

#[test]
fn fault_surfaces_through_iteration() -> Result<(), Box<dyn Error>> {
    let _lock = lock();
    let _hook = EvaluationHookGuard::register(GraphPatternKind::Extend, faulting_hook());

    let mut solutions = solutions(&QueryOptions::default())?;
    assert!(solutions.next().is_some_and(|solution| solution.is_ok()));
    assert!(solutions.next().is_some_and(|solution| solution.is_ok()));
    let Some(Err(error)) = solutions.next() else {
        return Err("the third element should be the fault".into());
    };
    assert_eq!(hook_fault(&error).map(|fault| fault.position), Some(2));
    assert!(solutions.next().is_none());
    Ok(())
}

#[test]
fn fault_surfaces_through_materialization() -> Result<(), Box<dyn Error>> {
    let _lock = lock();
    let _hook = EvaluationHookGuard::register(GraphPatternKind::Extend, faulting_hook());

    let mut solutions = solutions(&QueryOptions::default())?;
    let Err(error) = solutions.bindings() else {
        return Err("materialization should fail".into());
    };
    assert_eq!(hook_fault(&error).map(|fault| fault.position), Some(2));
    // Every later access reports the same fault.
    let Err(error) = solutions.bindings() else {
        return Err("a failed stream should keep failing".into());
    };
    assert_eq!(hook_fault(&error).map(|fault| fault.position), Some(2));
    assert!(solutions.len().is_err());
    Ok(())
}

#[test]
fn fault_surfaces_through_len() -> Result<(), Box<dyn Error>> {
    let _lock = lock();
    let _hook = EvaluationHookGuard::register(GraphPatternKind::Extend, faulting_hook());

    let mut results = QueryResults::Solutions(solutions(&QueryOptions::default())?);
    let Err(error) = results.len() else {
        return Err("len should fail".into());
    };
    assert!(hook_fault(&error).is_some());
    Ok(())
}

#[test]
fn mixed_access_after_a_fault_keeps_the_buffer() -> Result<(), Box<dyn Error>> {
    let _lock = lock();
    let _hook = EvaluationHookGuard::register(GraphPatternKind::Extend, faulting_hook());

    let mut solutions = solutions(&QueryOptions::default())?;
    let first = solutions.next().ok_or("no first solution")??;
    assert!(solutions.bindings().is_err());
    // The solutions produced before the fault are still iterated, then the fault once.
    let second = solutions.next().ok_or("no second solution")??;
    assert_ne!(second, first);
    let Some(Err(error)) = solutions.next() else {
        return Err("the fault should be returned by the iterator".into());
    };
    assert!(hook_fault(&error).is_some());
    assert!(solutions.next().is_none());
    Ok(())
}

#[test]
fn guard_restores_the_builtin_evaluation() -> Result<(), Box<dyn Error>> {
    let _lock = lock();
    {
        let _hook = EvaluationHookGuard::register(GraphPatternKind::Extend, faulting_hook());
        assert!(solutions(&QueryOptions::default())?.bindings().is_err());
    }
    assert_eq!(solutions(&QueryOptions::default())?.len()?, 5);
    Ok(())
}

#[test]
fn register_and_unregister() -> Result<(), Box<dyn Error>> {
    let _lock = lock();
    assert!(register_evaluation_hook(GraphPatternKind::Extend, faulting_hook()).is_none());
    let failed = solutions(&QueryOptions::default())?.bindings().is_err();
    assert!(unregister_evaluation_hook(GraphPatternKind::Extend).is_some());
    assert!(failed);
    assert!(unregister_evaluation_hook(GraphPatternKind::Extend).is_none());
    assert_eq!(solutions(&QueryOptions::default())?.len()?, 5);
    Ok(())
}

#[test]
fn hook_can_replace_a_node() -> Result<(), Box<dyn Error>> {
    let _lock = lock();
    let empty: EvaluationHook = Arc::new(
        |_: &SimpleEvaluator, _: &Arc<GraphPattern>, _: Bindings| -> SolutionIter {
            Box::new(std::iter::empty())
        },
    );
    let _hook = EvaluationHookGuard::register(GraphPatternKind::Bgp, empty);
    assert_eq!(solutions(&QueryOptions::default())?.len()?, 0);
    Ok(())
}

#[test]
fn limit_pulls_only_what_it_returns() -> Result<(), Box<dyn Error>> {
    let _lock = lock();
    let pulled = Arc::new(AtomicUsize::new(0));
    let _hook =
        EvaluationHookGuard::register(GraphPatternKind::Bgp, counting_hook(Arc::clone(&pulled)));

    let query = "PREFIX ex: <http://example.com/> SELECT ?s WHERE { ?s ex:value ?v } LIMIT 1";
    let QueryResults::Solutions(mut solutions) = results(query, &QueryOptions::default())? else {
        return Err("expected solutions".into());
    };
    assert_eq!(pulled.load(Ordering::SeqCst), 0);
    assert_eq!(solutions.len()?, 1);
    assert_eq!(pulled.load(Ordering::SeqCst), 1);
    Ok(())
}

#[test]
fn ask_stops_at_the_first_solution() -> Result<(), Box<dyn Error>> {
    let _lock = lock();
    let pulled = Arc::new(AtomicUsize::new(0));
    let _hook =
        EvaluationHookGuard::register(GraphPatternKind::Bgp, counting_hook(Arc::clone(&pulled)));

    let query = "PREFIX ex: <http://example.com/> ASK { ?s ex:value ?v }";
    let QueryResults::Boolean(found) = results(query, &QueryOptions::default())? else {
        return Err("expected a boolean".into());
    };
    assert!(found);
    assert_eq!(pulled.load(Ordering::SeqCst), 1);
    Ok(())
}

#[test]
fn exists_stops_at_the_first_solution() -> Result<(), Box<dyn Error>> {
    let _lock = lock();
    let pulled = Arc::new(AtomicUsize::new(0));
    let _hook =
        EvaluationHookGuard::register(GraphPatternKind::Bgp, counting_hook(Arc::clone(&pulled)));

    // One element of the outer pattern and one of the pattern inside EXISTS.
    let query = "PREFIX ex: <http://example.com/>
        ASK { ?s ex:value ?v FILTER EXISTS { ?t ex:value ?w } }";
    let QueryResults::Boolean(found) = results(query, &QueryOptions::default())? else {
        return Err("expected a boolean".into());
    };
    assert!(found);
    assert_eq!(pulled.load(Ordering::SeqCst), 2);
    Ok(())
}
