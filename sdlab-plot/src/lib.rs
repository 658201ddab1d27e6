//! SDLab Plot — the rendering collaborator.
//!
//! Consumes computed series (names, mean ranks, convergence counts) and
//! writes PNG images. Nothing here feeds back into the pipeline; the only
//! shared code is the numeric primitives the density curve borrows from
//! `sdlab-core`.

pub mod cd_diagram;
pub mod convergence_chart;
pub mod density;
pub mod style;

pub use cd_diagram::render_cd_diagram;
pub use convergence_chart::{render_convergence_chart, ConvergenceSeries, FamilyPanel};
pub use density::render_beta_density;
pub use style::SERIES_COLORS;
