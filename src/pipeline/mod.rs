pub mod extraction;
pub mod simplify;
