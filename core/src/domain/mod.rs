//! Domain layer containing the directory and verification entities.

pub mod entities;

pub use entities::*;
