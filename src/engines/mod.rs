pub mod numerics;
pub mod metrics;
pub mod cosmology;
pub mod evolution;
pub mod monte_carlo;
