pub mod aggregate;
pub mod build_info;
pub mod cli;
pub mod config;
pub mod decomposition;
pub mod domain;
pub mod error;
pub mod initial_conditions;
pub mod kernel;
pub mod results;
pub mod solver;
pub mod strategy;
pub mod timing;
pub mod util;
