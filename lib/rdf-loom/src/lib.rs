#![doc = include_str!("../README.md")]
#![doc(test(attr(deny(warnings))))]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub mod error;
pub mod store;

pub mod model {
    pub use rdf_loom_model::*;
}

pub mod logical {
    pub use rdf_loom_logical::*;
}

pub mod sparql {
    pub use rdf_loom_engine::sparql::*;
    pub use rdf_loom_engine::{QueryResults, QuerySolution, QuerySolutionStream};
    pub use rdf_loom_logical::{Namespaces, Query, QueryRewriter, Update, ValuesFirstRewriter};
}

pub mod storage {
    pub use rdf_loom_common::*;
    pub use rdf_loom_storage::*;
}
