//! Board projections consumed by the UI layer.

pub mod column_renderer;
