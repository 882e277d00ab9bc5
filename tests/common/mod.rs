#![allow(dead_code)]

pub mod recorders;
pub mod strategies;

pub use recorders::*;
