pub mod brief;
pub mod plan;
pub mod supplier;
