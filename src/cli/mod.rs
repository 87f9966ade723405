//! Command-line workflow, kept free of argument parsing and process state

pub mod orchestration;
