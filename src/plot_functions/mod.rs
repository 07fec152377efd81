// src/plot_functions/mod.rs

pub mod plot_segments;

// src/plot_functions/mod.rs
