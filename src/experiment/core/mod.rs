//! Core data types for experiment datasets.
pub mod context;
pub mod game;
pub mod labels;
pub mod round;
pub mod treatment;
