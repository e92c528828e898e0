pub mod analyzer;
pub mod client;
pub mod comparator;
pub mod error;
