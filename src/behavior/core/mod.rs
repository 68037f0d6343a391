//! Building blocks of the behavioral models: strategies, likelihood kernels,
//! switch detection, family layouts, parameters, bounds and constraints.
pub mod bounds;
pub mod constraints;
pub mod family;
pub mod kernel;
pub mod options;
pub mod params;
pub mod strategy;
pub mod switching;
pub mod trace;
