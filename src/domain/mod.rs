// Domain layer - Support matrix and verdicts

pub mod errors;
pub mod model;
pub mod rules;
