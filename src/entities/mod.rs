pub mod generation;

pub use generation::{GenerateQuery, GenerationRequest, NameResponse};
