mod case;
mod concat;
mod encode_for_uri;
mod lang_matches;
mod pattern;
mod search;
mod strlen;
mod substr;

pub use case::*;
pub use concat::*;
pub use encode_for_uri::*;
pub use lang_matches::*;
pub use pattern::*;
pub use search::*;
pub use strlen::*;
pub use substr::*;
