use oxttl::TurtleParser;
use rdf_loom_common::{QuadPatternEvaluator, QuadStorage};
use rdf_loom_model::{
    GraphName, GraphNameRef, Literal, NamedNode, NamedNodeRef, NamedOrBlankNode,
    NamedOrBlankNodeRef, Quad, SubjectRef, Term, TermRef,
};
use rdf_loom_storage::memory::MemQuadStorage;

const EX_A: NamedNodeRef<'static> = NamedNodeRef::new_unchecked("http://example.com/a");
const EX_B: NamedNodeRef<'static> = NamedNodeRef::new_unchecked("http://example.com/b");
const EX_P: NamedNodeRef<'static> = NamedNodeRef::new_unchecked("http://example.com/p");
const EX_G: NamedNodeRef<'static> = NamedNodeRef::new_unchecked("http://example.com/g");

fn example_storage() -> MemQuadStorage {
    let storage = MemQuadStorage::new();
    storage
        .extend(vec![
            Quad::new(EX_A, EX_P, EX_B, GraphName::DefaultGraph),
            Quad::new(EX_B, EX_P, Literal::from(1), GraphName::DefaultGraph),
            Quad::new(EX_A, EX_P, EX_B, EX_G),
        ])
        .unwrap();
    storage
}

fn collect(
    storage: &MemQuadStorage,
    subject: Option<SubjectRef<'_>>,
    object: Option<TermRef<'_>>,
    graph_name: Option<GraphNameRef<'_>>,
) -> Vec<Quad> {
    storage
        .quads_for_pattern(subject, Some(EX_P), object, graph_name)
        .collect::<Result<Vec<_>, _>>()
        .unwrap()
}

#[test]
fn extend_counts_only_new_quads() {
    let storage = example_storage();
    let inserted = storage
        .extend(vec![
            Quad::new(EX_A, EX_P, EX_B, GraphName::DefaultGraph),
            Quad::new(EX_B, EX_P, EX_A, GraphName::DefaultGraph),
        ])
        .unwrap();

    assert_eq!(inserted, 1);
    assert_eq!(storage.len().unwrap(), 4);
}

#[test]
fn wildcard_graph_matches_all_graphs() {
    let storage = example_storage();
    let quads = collect(&storage, Some(EX_A.into()), None, None);
    assert_eq!(quads.len(), 2);
}

#[test]
fn default_graph_pattern_excludes_named_graphs() {
    let storage = example_storage();
    let quads = collect(
        &storage,
        None,
        Some(EX_B.into()),
        Some(GraphNameRef::DefaultGraph),
    );
    assert_eq!(
        quads,
        vec![Quad::new(EX_A, EX_P, EX_B, GraphName::DefaultGraph)]
    );
}

#[test]
fn unknown_term_matches_nothing() {
    let storage = example_storage();
    let unknown = NamedNodeRef::new_unchecked("http://example.com/unknown");
    let quads = collect(&storage, Some(unknown.into()), None, None);
    assert!(quads.is_empty());
}

#[test]
fn literal_objects_are_decoded() {
    let storage = example_storage();
    let quads = collect(&storage, Some(EX_B.into()), None, None);
    assert_eq!(quads.len(), 1);
    assert_eq!(quads[0].object, Term::from(Literal::from(1)));
}

#[test]
fn named_graphs_include_declared_and_used_graphs() {
    let storage = example_storage();
    let empty = NamedNode::new_unchecked("http://example.com/empty");
    assert!(storage.insert_named_graph(empty.as_ref().into()).unwrap());

    let mut graphs = storage.named_graphs().unwrap();
    graphs.sort_by_key(ToString::to_string);
    assert_eq!(
        graphs,
        vec![
            NamedOrBlankNode::from(empty),
            NamedOrBlankNode::from(EX_G.into_owned())
        ]
    );

    assert!(storage.contains_named_graph(EX_G.into()).unwrap());
    assert!(!storage.contains_named_graph(EX_A.into()).unwrap());
}

#[test]
fn remove_named_graph_drops_its_quads() {
    let storage = example_storage();
    assert!(storage
        .remove_named_graph(NamedOrBlankNodeRef::from(EX_G))
        .unwrap());
    assert_eq!(storage.len().unwrap(), 2);
    assert!(!storage.contains_named_graph(EX_G.into()).unwrap());
}

#[test]
fn clear_graph_keeps_other_graphs() {
    let storage = example_storage();
    storage.clear_graph(GraphNameRef::DefaultGraph).unwrap();
    assert_eq!(storage.len().unwrap(), 1);

    storage.clear().unwrap();
    assert_eq!(storage.len().unwrap(), 0);
}

#[test]
fn remove_single_quad() {
    let storage = example_storage();
    let quad = Quad::new(EX_A, EX_P, EX_B, EX_G);
    assert!(storage.remove(quad.as_ref()).unwrap());
    assert!(!storage.remove(quad.as_ref()).unwrap());
    assert_eq!(storage.len().unwrap(), 2);
}

#[test]
fn load_turtle_document() {
    let turtle = r#"
        @prefix ex: <http://example.com/> .
        ex:a ex:p ex:b , ex:c ;
             ex:q "hello"@en .
    "#;
    let quads = TurtleParser::new()
        .for_slice(turtle.as_bytes())
        .map(|triple| triple.map(|t| t.in_graph(GraphName::DefaultGraph)))
        .collect::<Result<Vec<_>, _>>()
        .unwrap();

    let storage = MemQuadStorage::new();
    assert_eq!(storage.extend(quads).unwrap(), 3);
    assert_eq!(
        collect(&storage, Some(EX_A.into()), None, None).len(),
        2
    );
}
