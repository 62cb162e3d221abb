//! Turns single-variable expressions such as `sin(x)^2 + 3*x` into functions
//! that can be evaluated, integrated and sampled for plotting.

pub mod integration;
pub mod interpreter;
pub mod sampling;
