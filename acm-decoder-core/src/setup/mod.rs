pub mod factory;
pub mod matroska;
