//! Deterministic simulation module
//!
//! All physics lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded (or injected) RNG only
//! - Edges always visited in vertex order
//! - No rendering or platform dependencies

pub mod collision;
pub mod enclosure;
pub mod geometry;
pub mod state;
pub mod tick;

pub use collision::{Resolution, centripetal_force, resolve};
pub use enclosure::Enclosure;
pub use geometry::{
    EdgeContact, closest_point_on_segment, nearest_edge, point_in_polygon, reflect,
    within_distance_of_edges,
};
pub use state::{Body, Frame, ResetReason, SimState, SimStats, limit_speed};
pub use tick::{TickReport, tick};
