// Runtime defaults
pub const DEFAULT_OUT_FILE: &str = "./out.ppm";
pub const DEFAULT_FIELD_OF_VIEW: f64 = 60.0;

// Floating point comparisons
pub const FEQ_EPSILON: f64 = 0.0001;

// Shapes ignore roots closer than this to the ray origin.
pub const HIT_EPSILON: f64 = 1e-9;

// Offset applied to a shaded point, along the light direction, before a shadow
// ray is cast from it.
pub const SHADOW_BIAS: f64 = 1e-6;

// Color channels are expressed in display units.
pub const COLOR_MAX: f64 = 255.0;

// PPM lines are wrapped before this column.
pub const PPM_LINE_WIDTH: usize = 70;
