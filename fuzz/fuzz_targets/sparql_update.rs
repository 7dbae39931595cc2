#![no_main]

use libfuzzer_sys::fuzz_target;
use rdf_loom::sparql::{prepare_update, Namespaces};

fuzz_target!(|data: sparql_smith::Update| {
    let update = data.to_string();
    let _ = prepare_update(&update, &Namespaces::new(), None);
});
