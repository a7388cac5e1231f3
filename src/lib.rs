// src/lib.rs

pub mod cli;
pub mod config;
pub mod convergence;
pub mod error;
pub mod grid;
pub mod plates;
pub mod potential_field;
pub mod relax;
