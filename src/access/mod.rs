//! Typed access helpers: value coercion, env interpolation and read caches

pub mod cache;
pub mod coerce;
pub mod interpolate;

pub use cache::TypedCaches;
pub use interpolate::{interpolate_env, interpolate_with};
