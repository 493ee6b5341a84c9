// src/analysis/mod.rs
// =============================================================================
// Offline views of a catalog: the mirror subset and the triple/link totals.
// =============================================================================

mod count;
mod mirrors;

pub use count::totals;
pub use mirrors::with_mirrors;
