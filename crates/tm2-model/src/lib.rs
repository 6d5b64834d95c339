#![deny(unsafe_code)]

pub mod mapping;
pub mod remote;
pub mod system;

pub use mapping::{MappingEntry, MappingSuggestion};
pub use remote::{MappingExplanation, RemoteSuggestion};
pub use system::SourceSystem;
