pub mod predict;
pub mod scatter;
