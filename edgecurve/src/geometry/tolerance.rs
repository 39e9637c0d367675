// Centralized tolerances for curve routing and path search

pub const EPS_LEN: f32 = 1e-6;            // zero-length path threshold

pub const DEFAULT_TOLERANCE: f32 = 0.01;  // bisection window on arc length (px)
pub const DEFAULT_SCAN_STEP: f32 = 8.0;   // coarse scan step for closest point (px)
pub const DEFAULT_MIN_STEP: f32 = 0.5;    // refinement stops below this step (px)
pub const DEFAULT_TANGENT_DELTA: f32 = 0.1; // look-ahead for finite-difference tangent (px)
pub const DEFAULT_ARC_SAMPLES: usize = 256; // arc-length table resolution

// Iteration caps for degenerate inputs
pub const MAX_BISECT_ITERS: u32 = 128;
pub const MAX_REFINE_ITERS: u32 = 4096;
pub const MAX_SCAN_SAMPLES: u32 = 1 << 16; // coarse scan widens its step past this
pub const MAX_ARC_DEPTH: u32 = 16;

pub const RAD_TO_DEG: f32 = 180.0 / std::f32::consts::PI;

#[inline] pub fn clamp01(x: f32) -> f32 { x.max(0.0).min(1.0) }

#[inline]
pub fn safe_div(num: f32, den: f32, fallback: f32) -> f32 {
    if den.abs() <= EPS_LEN { fallback } else { num/den }
}
