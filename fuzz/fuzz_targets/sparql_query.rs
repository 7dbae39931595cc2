#![no_main]

use libfuzzer_sys::fuzz_target;
use rdf_loom::sparql::{prepare_query, Namespaces};

fuzz_target!(|data: &[u8]| {
    if let Ok(query) = std::str::from_utf8(data) {
        let _ = prepare_query(query, &Namespaces::new(), None);
    }
});
