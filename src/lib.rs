//! A 2D page-curl geometry and interaction kernel.
//!
//! The crate computes the fold geometry of a "page turn" effect — the fold
//! line's intersections with the page, the kept and flipped regions, the
//! back-face mirror transform and the shadow outline — and drives the fold
//! through drag, tap and settle animations. It is host-agnostic: each frame
//! the renderer emits a list of [`render::DrawOp`]s for the embedding
//! rasterizer to execute, and the host feeds pointer events and clock ticks
//! into [`state::PageCurlState`].

pub mod config;
pub mod error;
pub mod fold;
pub mod math;
pub mod render;
pub mod shadow;
pub mod state;

pub use error::{CurlError, Result};
