pub mod generators;
mod stream;

pub use generators::{SeaFunction, SeaGenerator};
pub use stream::Stream;
