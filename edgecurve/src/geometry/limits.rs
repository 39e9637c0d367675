// Bounds for coordinates coming from the host (pointer events, SVG `d` strings)

pub const MAX_SVG_TOKENS: usize = 64 * 1024; // a single edge path never needs more

pub const COORD_MIN: f32 = -10_000_000.0;
pub const COORD_MAX: f32 =  10_000_000.0;
pub const WIDTH_MAX: f32 = 10_000.0;

#[inline]
pub fn in_coord_bounds(x: f32) -> bool { x.is_finite() && x >= COORD_MIN && x <= COORD_MAX }

#[inline]
pub fn in_width_bounds(w: f32) -> bool { w.is_finite() && w >= 0.0 && w <= WIDTH_MAX }
