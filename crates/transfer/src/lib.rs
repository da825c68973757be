//! Journey planning façade: intercept geometry plus catalog conversions.

pub mod intercept;

pub use facade::*;
pub use intercept::{InterceptConfig, InterceptError, InterceptPlan, InterceptPlanner};

mod facade;
