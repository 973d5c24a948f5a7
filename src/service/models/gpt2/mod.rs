pub mod config;
pub mod loader;
pub mod sampler;
pub mod transformer;

pub use self::config::Gpt2Config;
pub use self::loader::ModelLoader;
pub use self::sampler::Gpt2Sampler;
pub use self::transformer::Gpt2Model;
