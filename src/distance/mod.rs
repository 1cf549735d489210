//! Distance matrix and the great-circle provider that fills it.

mod great_circle;
mod matrix;

pub use great_circle::{great_circle_meters, matrix_from_coordinates};
pub use matrix::DistanceMatrix;
