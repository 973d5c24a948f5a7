pub mod experiments;
pub mod models;
pub mod names;

pub use names::NameGenerator;
