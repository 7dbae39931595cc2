use rdf_loom_logical::{translate_query, translate_update, Namespaces, Query, Update};
use rdf_loom_parser::{parse_query, parse_update};
use std::error::Error;

pub fn namespaces() -> Namespaces {
    [("ex", "http://example.com/")].into_iter().collect()
}

pub fn translate(source: &str) -> Result<Query, Box<dyn Error>> {
    let ast = parse_query(source)?;
    Ok(translate_query(&ast, source, &namespaces(), None)?)
}

pub fn translate_update_request(source: &str) -> Result<Update, Box<dyn Error>> {
    let ast = parse_update(source)?;
    Ok(translate_update(&ast, source, &namespaces(), None)?)
}
