pub mod evaluator;
pub mod generator;
pub mod sampler;
pub mod schedule;
