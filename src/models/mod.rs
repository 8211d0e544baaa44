pub mod budget;
pub mod geo;
pub mod plan;
