#![no_main]

use libfuzzer_sys::fuzz_target;
use rdf_loom::model::{GraphName, Literal, NamedNode, Quad};
use rdf_loom::sparql::{QueryOptions, QueryResults, ValuesFirstRewriter};
use rdf_loom::store::Store;
use std::sync::OnceLock;

/// A small dataset with the IRIs and literals sparql-smith generates.
fn store() -> &'static Store {
    static STORE: OnceLock<Store> = OnceLock::new();
    STORE.get_or_init(|| {
        let store = Store::new();
        let nodes = (0..3)
            .map(|i| NamedNode::new_unchecked(format!("http://example.org/{i}")))
            .collect::<Vec<_>>();
        for (i, subject) in nodes.iter().enumerate() {
            for predicate in &nodes {
                store
                    .insert(&Quad::new(
                        subject.clone(),
                        predicate.clone(),
                        nodes[(i + 1) % nodes.len()].clone(),
                        GraphName::DefaultGraph,
                    ))
                    .unwrap();
                store
                    .insert(&Quad::new(
                        subject.clone(),
                        predicate.clone(),
                        Literal::from(i64::try_from(i).unwrap()),
                        nodes[0].clone(),
                    ))
                    .unwrap();
            }
        }
        store
    })
}

/// What must not change when a query is rewritten. The order of solutions and the choice of
/// rows under `LIMIT` or `SAMPLE` may change, so only the number of solutions is compared.
fn summary(results: QueryResults) -> Option<String> {
    Some(match results {
        QueryResults::Solutions(mut solutions) => format!("{} solutions", solutions.len().ok()?),
        QueryResults::Boolean(value) => value.to_string(),
        QueryResults::Graph(_) => "graph".to_owned(),
    })
}

fuzz_target!(|data: sparql_smith::Query| {
    let query = data.to_string();
    let Ok(prepared) = store().prepare_query(&query) else {
        return;
    };
    let plain = store()
        .query_with_bindings(&prepared, Default::default(), &QueryOptions::default())
        .ok()
        .and_then(summary);
    let rewritten = store()
        .query_with_bindings(
            &prepared,
            Default::default(),
            &QueryOptions::default().with_rewriter(ValuesFirstRewriter::new()),
        )
        .ok()
        .and_then(summary);
    assert_eq!(plain, rewritten, "Rewriting changed the results of {query}");
});
