//! Color representation for terminal rendering.
//!
//! Colors are RGBA floats. Channels are not range-checked; only the display paths
//! ([`Color::to_color32`] and the terminal quantizers) clamp to `[0, 1]`.
//!
//! An alpha of `0` is meaningful to the compositing code: a fully transparent color never
//! contributes to a blend, the other side's color is used instead.

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Sub, SubAssign};

/// An 8-bit-per-channel color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color32 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color32 {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

/// An RGBA color with float channels.
///
/// Both premultiplied and straight (unpremultiplied) values are valid in a `Color`;
/// which one a value holds depends on where it came from. [`Color::over`] takes and
/// returns straight colors.
///
/// # Example
///
/// ```rust
/// use tplot::rendering::color::Color;
///
/// let half_red = Color::new(1.0, 0.0, 0.0, 0.5);
/// let on_blue = half_red.over(Color::rgb(0.0, 0.0, 1.0));
/// assert_eq!(on_blue, Color::new(0.5, 0.0, 0.5, 1.0));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    /// Fully transparent black. This is the color of an empty cell.
    pub const TRANSPARENT: Color = Color::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// An opaque color.
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Converts an 8-bit color where `white` is the maximum color channel value and
    /// `opaque` the maximum alpha value.
    pub fn from_color32(c: Color32, white: u8, opaque: u8) -> Self {
        let white = white as f32;
        let opaque = opaque as f32;
        Self::new(
            c.r as f32 / white,
            c.g as f32 / white,
            c.b as f32 / white,
            c.a as f32 / opaque,
        )
    }

    /// Quantizes to integers in `[0, white]` (color) and `[0, opaque]` (alpha).
    pub fn to_color32(self, white: u8, opaque: u8) -> Color32 {
        let quantize = |v: f32, max: u8| (v.clamp(0.0, 1.0) * max as f32).round() as u8;
        Color32::new(
            quantize(self.r, white),
            quantize(self.g, white),
            quantize(self.b, white),
            quantize(self.a, opaque),
        )
    }

    pub fn premultiplied(self) -> Self {
        Self::new(self.r * self.a, self.g * self.a, self.b * self.a, self.a)
    }

    /// Inverse of [`Color::premultiplied`]. A zero alpha yields [`Color::TRANSPARENT`].
    pub fn unpremultiplied(self) -> Self {
        if self.a == 0.0 {
            return Self::TRANSPARENT;
        }
        Self::new(self.r / self.a, self.g / self.a, self.b / self.a, self.a)
    }

    /// Porter-Duff "source over destination", with `self` as source.
    pub fn over(self, other: Color) -> Self {
        (self.premultiplied() + other.premultiplied() * (1.0 - self.a)).unpremultiplied()
    }

    /// Perceptual distance using the "red mean" weighting of the RGB channels.
    pub fn distance(self, other: Color) -> f32 {
        let rmean = (other.r + self.r) / 2.0;
        let diff = other - self;
        ((2.0 + rmean) * diff.r * diff.r + 4.0 * diff.g * diff.g + (3.0 - rmean) * diff.b * diff.b)
            .sqrt()
    }

    pub fn hue_distance(self, other: Color) -> f32 {
        (other.hue() - self.hue()).abs()
    }

    /// Hue in sextants (`0..6`) as computed from the dominant channel. Grays have hue 0.
    pub fn hue(self) -> f32 {
        let min = self.r.min(self.g.min(self.b));
        let max = self.r.max(self.g.max(self.b));
        if max == min {
            return 0.0;
        }
        let h = if max == self.r {
            (self.g - self.b) / (max - min)
        } else if max == self.g {
            2.0 + (self.b - self.r) / (max - min)
        } else {
            4.0 + (self.r - self.g) / (max - min)
        };
        if h >= 0.0 { h } else { h + 6.0 }
    }

    pub fn with_red(self, r: f32) -> Self {
        Self { r, ..self }
    }

    pub fn with_green(self, g: f32) -> Self {
        Self { g, ..self }
    }

    pub fn with_blue(self, b: f32) -> Self {
        Self { b, ..self }
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }
}

impl From<[u8; 3]> for Color {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Color::from_color32(Color32::new(r, g, b, 255), 255, 255)
    }
}

impl From<Color32> for Color {
    fn from(c: Color32) -> Self {
        Color::from_color32(c, 255, 255)
    }
}

impl Add for Color {
    type Output = Color;

    fn add(self, rhs: Color) -> Color {
        Color::new(self.r + rhs.r, self.g + rhs.g, self.b + rhs.b, self.a + rhs.a)
    }
}

impl Sub for Color {
    type Output = Color;

    fn sub(self, rhs: Color) -> Color {
        Color::new(self.r - rhs.r, self.g - rhs.g, self.b - rhs.b, self.a - rhs.a)
    }
}

impl Mul<f32> for Color {
    type Output = Color;

    fn mul(self, rhs: f32) -> Color {
        Color::new(self.r * rhs, self.g * rhs, self.b * rhs, self.a * rhs)
    }
}

impl Mul<Color> for f32 {
    type Output = Color;

    fn mul(self, rhs: Color) -> Color {
        rhs * self
    }
}

impl Div<f32> for Color {
    type Output = Color;

    fn div(self, rhs: f32) -> Color {
        Color::new(self.r / rhs, self.g / rhs, self.b / rhs, self.a / rhs)
    }
}

impl AddAssign for Color {
    fn add_assign(&mut self, rhs: Color) {
        *self = *self + rhs;
    }
}

impl SubAssign for Color {
    fn sub_assign(&mut self, rhs: Color) {
        *self = *self - rhs;
    }
}

impl MulAssign<f32> for Color {
    fn mul_assign(&mut self, rhs: f32) {
        *self = *self * rhs;
    }
}

impl DivAssign<f32> for Color {
    fn div_assign(&mut self, rhs: f32) {
        *self = *self / rhs;
    }
}

/// Named colors (X11/CSS names), all opaque.
pub mod palette {
    use super::Color;

    pub const ALICEBLUE: Color = Color::rgb(0.941, 0.973, 1.000);
    pub const ANTIQUEWHITE: Color = Color::rgb(0.980, 0.922, 0.843);
    pub const AQUA: Color = Color::rgb(0.000, 1.000, 1.000);
    pub const AQUAMARINE: Color = Color::rgb(0.498, 1.000, 0.831);
    pub const AZURE: Color = Color::rgb(0.941, 1.000, 1.000);
    pub const BEIGE: Color = Color::rgb(0.961, 0.961, 0.863);
    pub const BISQUE: Color = Color::rgb(1.000, 0.894, 0.769);
    pub const BLACK: Color = Color::rgb(0.000, 0.000, 0.000);
    pub const BLANCHEDALMOND: Color = Color::rgb(1.000, 0.922, 0.804);
    pub const BLUE: Color = Color::rgb(0.000, 0.000, 1.000);
    pub const BLUEVIOLET: Color = Color::rgb(0.541, 0.169, 0.886);
    pub const BROWN: Color = Color::rgb(0.647, 0.165, 0.165);
    pub const BURLYWOOD: Color = Color::rgb(0.871, 0.722, 0.529);
    pub const CADETBLUE: Color = Color::rgb(0.373, 0.620, 0.627);
    pub const CHARTREUSE: Color = Color::rgb(0.498, 1.000, 0.000);
    pub const CHOCOLATE: Color = Color::rgb(0.824, 0.412, 0.118);
    pub const CORAL: Color = Color::rgb(1.000, 0.498, 0.314);
    pub const CORNFLOWERBLUE: Color = Color::rgb(0.392, 0.584, 0.929);
    pub const CORNSILK: Color = Color::rgb(1.000, 0.973, 0.863);
    pub const CRIMSON: Color = Color::rgb(0.863, 0.078, 0.235);
    pub const CYAN: Color = Color::rgb(0.000, 1.000, 1.000);
    pub const DARKBLUE: Color = Color::rgb(0.000, 0.000, 0.545);
    pub const DARKCYAN: Color = Color::rgb(0.000, 0.545, 0.545);
    pub const DARKGOLDENROD: Color = Color::rgb(0.722, 0.525, 0.043);
    pub const DARKGRAY: Color = Color::rgb(0.663, 0.663, 0.663);
    pub const DARKGREEN: Color = Color::rgb(0.000, 0.392, 0.000);
    pub const DARKGREY: Color = Color::rgb(0.663, 0.663, 0.663);
    pub const DARKKHAKI: Color = Color::rgb(0.741, 0.718, 0.420);
    pub const DARKMAGENTA: Color = Color::rgb(0.545, 0.000, 0.545);
    pub const DARKOLIVEGREEN: Color = Color::rgb(0.333, 0.420, 0.184);
    pub const DARKORANGE: Color = Color::rgb(1.000, 0.549, 0.000);
    pub const DARKORCHID: Color = Color::rgb(0.600, 0.196, 0.800);
    pub const DARKRED: Color = Color::rgb(0.545, 0.000, 0.000);
    pub const DARKSALMON: Color = Color::rgb(0.914, 0.588, 0.478);
    pub const DARKSEAGREEN: Color = Color::rgb(0.561, 0.737, 0.561);
    pub const DARKSLATEBLUE: Color = Color::rgb(0.282, 0.239, 0.545);
    pub const DARKSLATEGRAY: Color = Color::rgb(0.184, 0.310, 0.310);
    pub const DARKSLATEGREY: Color = Color::rgb(0.184, 0.310, 0.310);
    pub const DARKTURQUOISE: Color = Color::rgb(0.000, 0.808, 0.820);
    pub const DARKVIOLET: Color = Color::rgb(0.580, 0.000, 0.827);
    pub const DEEPPINK: Color = Color::rgb(1.000, 0.078, 0.576);
    pub const DEEPSKYBLUE: Color = Color::rgb(0.000, 0.749, 1.000);
    pub const DIMGRAY: Color = Color::rgb(0.412, 0.412, 0.412);
    pub const DIMGREY: Color = Color::rgb(0.412, 0.412, 0.412);
    pub const DODGERBLUE: Color = Color::rgb(0.118, 0.565, 1.000);
    pub const FIREBRICK: Color = Color::rgb(0.698, 0.133, 0.133);
    pub const FLORALWHITE: Color = Color::rgb(1.000, 0.980, 0.941);
    pub const FORESTGREEN: Color = Color::rgb(0.133, 0.545, 0.133);
    pub const FUCHSIA: Color = Color::rgb(1.000, 0.000, 1.000);
    pub const GAINSBORO: Color = Color::rgb(0.863, 0.863, 0.863);
    pub const GHOSTWHITE: Color = Color::rgb(0.973, 0.973, 1.000);
    pub const GOLD: Color = Color::rgb(1.000, 0.843, 0.000);
    pub const GOLDENROD: Color = Color::rgb(0.855, 0.647, 0.125);
    pub const GRAY: Color = Color::rgb(0.502, 0.502, 0.502);
    pub const GREEN: Color = Color::rgb(0.000, 0.502, 0.000);
    pub const GREENYELLOW: Color = Color::rgb(0.678, 1.000, 0.184);
    pub const GREY: Color = Color::rgb(0.502, 0.502, 0.502);
    pub const HONEYDEW: Color = Color::rgb(0.941, 1.000, 0.941);
    pub const HOTPINK: Color = Color::rgb(1.000, 0.412, 0.706);
    pub const INDIANRED: Color = Color::rgb(0.804, 0.361, 0.361);
    pub const INDIGO: Color = Color::rgb(0.294, 0.000, 0.510);
    pub const IVORY: Color = Color::rgb(1.000, 1.000, 0.941);
    pub const KHAKI: Color = Color::rgb(0.941, 0.902, 0.549);
    pub const LAVENDER: Color = Color::rgb(0.902, 0.902, 0.980);
    pub const LAVENDERBLUSH: Color = Color::rgb(1.000, 0.941, 0.961);
    pub const LAWNGREEN: Color = Color::rgb(0.486, 0.988, 0.000);
    pub const LEMONCHIFFON: Color = Color::rgb(1.000, 0.980, 0.804);
    pub const LIGHTBLUE: Color = Color::rgb(0.678, 0.847, 0.902);
    pub const LIGHTCORAL: Color = Color::rgb(0.941, 0.502, 0.502);
    pub const LIGHTCYAN: Color = Color::rgb(0.878, 1.000, 1.000);
    pub const LIGHTGOLDENRODYELLOW: Color = Color::rgb(0.980, 0.980, 0.824);
    pub const LIGHTGRAY: Color = Color::rgb(0.827, 0.827, 0.827);
    pub const LIGHTGREEN: Color = Color::rgb(0.565, 0.933, 0.565);
    pub const LIGHTGREY: Color = Color::rgb(0.827, 0.827, 0.827);
    pub const LIGHTPINK: Color = Color::rgb(1.000, 0.714, 0.757);
    pub const LIGHTSALMON: Color = Color::rgb(1.000, 0.627, 0.478);
    pub const LIGHTSEAGREEN: Color = Color::rgb(0.125, 0.698, 0.667);
    pub const LIGHTSKYBLUE: Color = Color::rgb(0.529, 0.808, 0.980);
    pub const LIGHTSLATEGRAY: Color = Color::rgb(0.467, 0.533, 0.600);
    pub const LIGHTSLATEGREY: Color = Color::rgb(0.467, 0.533, 0.600);
    pub const LIGHTSTEELBLUE: Color = Color::rgb(0.690, 0.769, 0.871);
    pub const LIGHTYELLOW: Color = Color::rgb(1.000, 1.000, 0.878);
    pub const LIME: Color = Color::rgb(0.000, 1.000, 0.000);
    pub const LIMEGREEN: Color = Color::rgb(0.196, 0.804, 0.196);
    pub const LINEN: Color = Color::rgb(0.980, 0.941, 0.902);
    pub const MAGENTA: Color = Color::rgb(1.000, 0.000, 1.000);
    pub const MAROON: Color = Color::rgb(0.502, 0.000, 0.000);
    pub const MEDIUMAQUAMARINE: Color = Color::rgb(0.400, 0.804, 0.667);
    pub const MEDIUMBLUE: Color = Color::rgb(0.000, 0.000, 0.804);
    pub const MEDIUMORCHID: Color = Color::rgb(0.729, 0.333, 0.827);
    pub const MEDIUMPURPLE: Color = Color::rgb(0.576, 0.439, 0.859);
    pub const MEDIUMSEAGREEN: Color = Color::rgb(0.235, 0.702, 0.443);
    pub const MEDIUMSLATEBLUE: Color = Color::rgb(0.482, 0.408, 0.933);
    pub const MEDIUMSPRINGGREEN: Color = Color::rgb(0.000, 0.980, 0.604);
    pub const MEDIUMTURQUOISE: Color = Color::rgb(0.282, 0.820, 0.800);
    pub const MEDIUMVIOLETRED: Color = Color::rgb(0.780, 0.082, 0.522);
    pub const MIDNIGHTBLUE: Color = Color::rgb(0.098, 0.098, 0.439);
    pub const MINTCREAM: Color = Color::rgb(0.961, 1.000, 0.980);
    pub const MISTYROSE: Color = Color::rgb(1.000, 0.894, 0.882);
    pub const MOCCASIN: Color = Color::rgb(1.000, 0.894, 0.710);
    pub const NAVAJOWHITE: Color = Color::rgb(1.000, 0.871, 0.678);
    pub const NAVY: Color = Color::rgb(0.000, 0.000, 0.502);
    pub const OLDLACE: Color = Color::rgb(0.992, 0.961, 0.902);
    pub const OLIVE: Color = Color::rgb(0.502, 0.502, 0.000);
    pub const OLIVEDRAB: Color = Color::rgb(0.420, 0.557, 0.137);
    pub const ORANGE: Color = Color::rgb(1.000, 0.647, 0.000);
    pub const ORANGERED: Color = Color::rgb(1.000, 0.271, 0.000);
    pub const ORCHID: Color = Color::rgb(0.855, 0.439, 0.839);
    pub const PALEGOLDENROD: Color = Color::rgb(0.933, 0.910, 0.667);
    pub const PALEGREEN: Color = Color::rgb(0.596, 0.984, 0.596);
    pub const PALETURQUOISE: Color = Color::rgb(0.686, 0.933, 0.933);
    pub const PALEVIOLETRED: Color = Color::rgb(0.859, 0.439, 0.576);
    pub const PAPAYAWHIP: Color = Color::rgb(1.000, 0.937, 0.835);
    pub const PEACHPUFF: Color = Color::rgb(1.000, 0.855, 0.725);
    pub const PERU: Color = Color::rgb(0.804, 0.522, 0.247);
    pub const PINK: Color = Color::rgb(1.000, 0.753, 0.796);
    pub const PLUM: Color = Color::rgb(0.867, 0.627, 0.867);
    pub const POWDERBLUE: Color = Color::rgb(0.690, 0.878, 0.902);
    pub const PURPLE: Color = Color::rgb(0.502, 0.000, 0.502);
    pub const RED: Color = Color::rgb(1.000, 0.000, 0.000);
    pub const ROSYBROWN: Color = Color::rgb(0.737, 0.561, 0.561);
    pub const ROYALBLUE: Color = Color::rgb(0.255, 0.412, 0.882);
    pub const SADDLEBROWN: Color = Color::rgb(0.545, 0.271, 0.075);
    pub const SALMON: Color = Color::rgb(0.980, 0.502, 0.447);
    pub const SANDYBROWN: Color = Color::rgb(0.957, 0.643, 0.376);
    pub const SEAGREEN: Color = Color::rgb(0.180, 0.545, 0.341);
    pub const SEASHELL: Color = Color::rgb(1.000, 0.961, 0.933);
    pub const SIENNA: Color = Color::rgb(0.627, 0.322, 0.176);
    pub const SILVER: Color = Color::rgb(0.753, 0.753, 0.753);
    pub const SKYBLUE: Color = Color::rgb(0.529, 0.808, 0.922);
    pub const SLATEBLUE: Color = Color::rgb(0.416, 0.353, 0.804);
    pub const SLATEGRAY: Color = Color::rgb(0.439, 0.502, 0.565);
    pub const SLATEGREY: Color = Color::rgb(0.439, 0.502, 0.565);
    pub const SNOW: Color = Color::rgb(1.000, 0.980, 0.980);
    pub const SPRINGGREEN: Color = Color::rgb(0.000, 1.000, 0.498);
    pub const STEELBLUE: Color = Color::rgb(0.275, 0.510, 0.706);
    pub const TAN: Color = Color::rgb(0.824, 0.706, 0.549);
    pub const TEAL: Color = Color::rgb(0.000, 0.502, 0.502);
    pub const THISTLE: Color = Color::rgb(0.847, 0.749, 0.847);
    pub const TOMATO: Color = Color::rgb(1.000, 0.388, 0.278);
    pub const TURQUOISE: Color = Color::rgb(0.251, 0.878, 0.816);
    pub const VIOLET: Color = Color::rgb(0.933, 0.510, 0.933);
    pub const WHEAT: Color = Color::rgb(0.961, 0.871, 0.702);
    pub const WHITE: Color = Color::rgb(1.000, 1.000, 1.000);
    pub const WHITESMOKE: Color = Color::rgb(0.961, 0.961, 0.961);
    pub const YELLOW: Color = Color::rgb(1.000, 1.000, 0.000);
    pub const YELLOWGREEN: Color = Color::rgb(0.604, 0.804, 0.196);
}
