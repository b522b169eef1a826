//! Ready-made second-order systems.
//!
//! Each system reads its coefficients by name from [`Parameters`] and supplies
//! a sensible default set through
//! [`default_parameters`](SecondOrderSystem::default_parameters).
//!
//! [`Parameters`]: crate::Parameters
//! [`SecondOrderSystem`]: crate::SecondOrderSystem

mod duffing;
mod lotka_volterra;
mod oscillator;

pub use duffing::Duffing;
pub use lotka_volterra::LotkaVolterra;
pub use oscillator::DampedOscillator;
