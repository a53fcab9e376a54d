//! URL normalization: canonical form and redirect targets.

pub mod errors;
pub mod models;
pub mod normalizer;

pub use normalizer::normalize;
