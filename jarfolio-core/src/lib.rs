//! Jarfolio core library exports

pub mod catalog;
pub mod digest;
