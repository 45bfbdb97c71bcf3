//! Basic value types shared across the library

pub mod color;
pub mod vector;

pub use color::Color;
pub use vector::{Vector2, Vector3};
