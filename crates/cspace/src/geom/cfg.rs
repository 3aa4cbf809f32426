//! Tolerance defaults for the 2D kernel (internal).
//!
//! Policy
//! - Fixed constants; no per-call tolerance juggling. Both values are relative to
//!   operand magnitudes so predicates stay translation- and scale-free.

/// Collinearity threshold: `|cross(b-a, c-a)| <= REL_EPS * |b-a| * |c-a|`.
pub const REL_EPS: f64 = 1e-12;
/// Slack on the segment parameter `t ∈ [0,1]` for on-segment tests.
pub const PARAM_EPS: f64 = 1e-12;
