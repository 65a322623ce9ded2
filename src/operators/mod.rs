// src/operators/mod.rs
//
// Stencil operators on the staggered grid.
//
// `difference` and `average` are the primitives: one axis, one position flip.
// Everything else is composed from them and uses a `ScratchPool` for its
// intermediates.

pub mod advection;
pub mod average;
pub mod difference;
pub mod diffusion;
pub mod divergence;
pub mod poisson;

pub use advection::{Velocities, momentum_advection_u, momentum_advection_v, momentum_advection_w};
pub use average::{avg_x, avg_y, avg_z};
pub use difference::{delta_x, delta_y, delta_z};
pub use diffusion::{
    laplacian, scalar_biharmonic, scalar_diffusion, vector_diffusion_u, vector_diffusion_v,
    vector_diffusion_w,
};
pub use divergence::{DivergenceSite, advective_flux_divergence, divergence, divergence_with_scratch};
pub use poisson::laplacian_ppn;
