mod arithmetic;
mod random;
mod rounding;

pub use arithmetic::*;
pub use random::*;
pub use rounding::*;
