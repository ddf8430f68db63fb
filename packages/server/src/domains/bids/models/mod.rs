pub mod bid;

pub use bid::*;
