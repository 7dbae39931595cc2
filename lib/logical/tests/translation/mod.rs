#![allow(clippy::panic_in_result_fn)]

mod errors;
mod query;
mod test_utils;
mod update;
