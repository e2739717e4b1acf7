pub mod builder;
pub mod extract;
pub mod segment;
pub mod states;

pub use builder::{build_records, BuildStrategy};
