use std::ops::{ Add, AddAssign, Mul };

use crate::feq;
use crate::consts::COLOR_MAX;

/// A color with an alpha channel.
///
/// Channels are expressed in display units: red, green and blue are
/// conceptually in `0.0..=255.0`, although intermediate results of shading may
/// exceed that range until they are clamped. The alpha channel is carried
/// through the same arithmetic as the color channels.
///
/// The default color (every channel zero) is what a ray that hits nothing
/// evaluates to.
///
/// # Examples
///
/// Construct the color red:
///
/// ```
/// # use whitted::color::Color;
/// let red = Color::red();
/// assert_eq!(red, Color::rgb(255.0, 0.0, 0.0));
/// ```
///
/// Bring an over-exposed color back into range:
///
/// ```
/// # use whitted::color::Color;
/// let hot = Color::rgb(300.0, 128.0, -4.0);
/// assert_eq!(hot.clamp(), Color::rgb(255.0, 128.0, 0.0));
/// ```
#[derive(Copy, Clone, Debug, Default)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

/// Partial equality on two colors.
///
/// Similar to the `PartialEq` implementation on `Tuple3D`, `Color`s are
/// compared component-wise, accounting for possible floating point error in
/// comparisons.
impl PartialEq for Color {
    fn eq(&self, other: &Color) -> bool {
        feq(self.r, other.r) &&
            feq(self.g, other.g) &&
            feq(self.b, other.b) &&
            feq(self.a, other.a)
    }
}

impl Color {
    /// Creates an opaque color from red, green and blue values.
    pub fn rgb(r: f64, g: f64, b: f64) -> Color {
        Color { r, g, b, a: COLOR_MAX }
    }

    /// Creates a color from all four channels.
    pub fn rgba(r: f64, g: f64, b: f64, a: f64) -> Color {
        Color { r, g, b, a }
    }

    /// The color black.
    pub fn black() -> Color {
        Color::rgb(0.0, 0.0, 0.0)
    }

    /// The color white.
    pub fn white() -> Color {
        Color::rgb(COLOR_MAX, COLOR_MAX, COLOR_MAX)
    }

    /// The color red.
    pub fn red() -> Color {
        Color::rgb(COLOR_MAX, 0.0, 0.0)
    }

    /// The color green.
    pub fn green() -> Color {
        Color::rgb(0.0, COLOR_MAX, 0.0)
    }

    /// The color blue.
    pub fn blue() -> Color {
        Color::rgb(0.0, 0.0, COLOR_MAX)
    }

    /// Computes the Hadamard product of two colors.
    ///
    /// The hadamard product multiplies each component of the two colors,
    /// alpha included, and yields a new color containing those products.
    /// `c1 * c2` is shorthand for this function.
    ///
    /// # Examples
    ///
    /// ```
    /// # use whitted::color::Color;
    /// let ambient = Color::rgba(0.5, 0.5, 0.5, 1.0);
    /// let surface = Color::rgb(200.0, 100.0, 0.0);
    /// let product = Color::hadamard(&ambient, &surface);
    /// assert_eq!(product, Color::rgb(100.0, 50.0, 0.0));
    /// ```
    pub fn hadamard(c1: &Color, c2: &Color) -> Color {
        Color {
            r: c1.r * c2.r,
            g: c1.g * c2.g,
            b: c1.b * c2.b,
            a: c1.a * c2.a,
        }
    }

    /// Bounds every channel to the displayable range `0.0..=255.0`.
    ///
    /// NaN channels are mapped to zero so that a degenerate computation
    /// never reaches an output file as garbage.
    pub fn clamp(&self) -> Color {
        fn channel(c: f64) -> f64 {
            if c.is_nan() {
                0.0
            } else {
                c.clamp(0.0, COLOR_MAX)
            }
        }

        Color {
            r: channel(self.r),
            g: channel(self.g),
            b: channel(self.b),
            a: channel(self.a),
        }
    }
}

/// Adds two colors together.
///
/// Components are added together individually.
impl Add<Color> for Color {
    type Output = Color;

    fn add(self, other: Color) -> Self::Output {
        Color {
            r: self.r + other.r,
            g: self.g + other.g,
            b: self.b + other.b,
            a: self.a + other.a,
        }
    }
}

impl AddAssign<Color> for Color {
    fn add_assign(&mut self, other: Color) {
        *self = *self + other;
    }
}

/// Multiplies a color by a scalar.
///
/// Each component is multiplied by the scalar.
impl Mul<f64> for Color {
    type Output = Color;

    fn mul(self, other: f64) -> Self::Output {
        Color {
            r: self.r * other,
            g: self.g * other,
            b: self.b * other,
            a: self.a * other,
        }
    }
}

/// Multiplies a scalar by a color.
impl Mul<Color> for f64 {
    type Output = Color;

    fn mul(self, other: Color) -> Self::Output {
        other * self
    }
}

/// Multiplies a color by a color. See `Color::hadamard`.
impl Mul<Color> for Color {
    type Output = Color;

    fn mul(self, other: Color) -> Self::Output {
        Color::hadamard(&self, &other)
    }
}

#[test]
fn add_colors() {
    let c1 = Color::rgba(0.9, 0.6, 0.75, 1.0);
    let c2 = Color::rgba(0.7, 0.1, 0.25, 0.5);
    let c3 = Color { r: 1.6, g: 0.7, b: 1.0, a: 1.5 };

    assert_eq!(c1 + c2, c3);

    let mut c4 = c1;
    c4 += c2;
    assert_eq!(c4, c3);
}

#[test]
fn multiply_color_by_scalar() {
    let c1 = Color::rgba(0.2, 0.3, 0.4, 1.0);
    let c2 = Color { r: 0.4, g: 0.6, b: 0.8, a: 2.0 };

    assert_eq!(c1 * 2.0, c2);
    assert_eq!(2.0 * c1, c2);
}

#[test]
fn multiply_colors() {
    let c1 = Color::rgba(1.0, 0.2, 0.4, 1.0);
    let c2 = Color::rgba(0.9, 1.0, 0.1, 0.5);

    assert_eq!(c1 * c2, Color::rgba(0.9, 0.2, 0.04, 0.5));
}

#[test]
fn clamp_over_range_channel() {
    let c = Color::rgba(300.0, 255.0, 12.5, 400.0).clamp();

    assert_eq!(c.r, 255.0);
    assert_eq!(c.g, 255.0);
    assert_eq!(c.b, 12.5);
    assert_eq!(c.a, 255.0);
}

#[test]
fn clamp_negative_and_nan_channels() {
    let c = Color::rgba(-1.0, f64::NAN, 0.0, 1.0).clamp();

    assert_eq!(c, Color::rgba(0.0, 0.0, 0.0, 1.0));
}

#[test]
fn background_is_default() {
    assert_eq!(Color::default(), Color::rgba(0.0, 0.0, 0.0, 0.0));
}
