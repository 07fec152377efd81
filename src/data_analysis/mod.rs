// src/data_analysis/mod.rs

pub mod axis_analysis;
pub mod pipeline;
pub mod recommendation;
pub mod response_analyzer;
pub mod segment_finder;

// src/data_analysis/mod.rs
