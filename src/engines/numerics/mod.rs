pub mod ode;
pub mod quadrature;

pub use ode::{geomspace, linspace, DormandPrince, OdeSettings, OdeSolution};
pub use quadrature::{integrate, QuadratureResult, QuadratureSettings};
