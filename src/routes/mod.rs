pub mod route;

pub use route::configure;
