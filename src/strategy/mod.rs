pub mod cost_model;
pub mod implementations;
pub mod traits;
