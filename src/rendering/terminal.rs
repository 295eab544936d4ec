//! Terminal color capabilities.
//!
//! [`TermInfo`] is everything the canvas needs to know about the terminal it draws to: how
//! many colors it understands and its default colors. Probing the terminal is not done
//! here, [`TermInfo::from_env`] only looks at the environment.
//!
//! The quantizers map canvas colors to the 16 color palette and the xterm 256 color
//! palette. Both are pure functions over the constant tables below.

use crate::rendering::color::{Color, Color32, palette};
use crossterm::Command;
use crossterm::style::{self, SetForegroundColor};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::IsTerminal;

/// How much color the terminal understands.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Plain text, no escape sequences at all.
    #[default]
    None,
    /// Text attributes only, no colors.
    Minimal,
    /// The 16 standard colors.
    Ansi,
    /// The xterm 256 color palette.
    Xterm256,
    /// 24-bit RGB.
    Xterm24bit,
}

impl ColorMode {
    /// Whether rows are wrapped in attribute escape sequences.
    pub fn is_styled(self) -> bool {
        self != ColorMode::None
    }
}

/// A foreground color in the form the terminal expects it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TermColor {
    /// One of the 16 colors, written as a basic SGR code (`30..=37`, `90..=97` if bright)
    /// that terminals without palette support still understand.
    Basic { index: u8, bright: bool },
    /// A 256 color palette entry or an RGB value.
    Extended(style::Color),
}

impl TermColor {
    /// Writes the escape sequence that selects this foreground color.
    pub fn write_ansi(self, out: &mut impl fmt::Write) -> fmt::Result {
        match self {
            TermColor::Basic { index, bright } => {
                let base = if bright { 90 } else { 30 };
                write!(out, "\x1b[{}m", base + index)
            }
            TermColor::Extended(color) => SetForegroundColor(color).write_ansi(out),
        }
    }
}

/// Color capabilities and default colors of a terminal.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TermInfo {
    pub mode: ColorMode,
    pub foreground: Color,
    pub background: Color,
}

impl Default for TermInfo {
    fn default() -> Self {
        Self {
            mode: ColorMode::default(),
            foreground: palette::WHITE,
            background: palette::BLACK,
        }
    }
}

impl TermInfo {
    pub fn new(mode: ColorMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    pub fn with_mode(mut self, mode: ColorMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_foreground(mut self, color: Color) -> Self {
        self.foreground = color;
        self
    }

    pub fn with_background(mut self, color: Color) -> Self {
        self.background = color;
        self
    }

    /// Guesses the color mode from `NO_COLOR`, `COLORTERM`, `TERM` and whether stdout is a
    /// terminal. The default colors are left at their defaults.
    pub fn from_env() -> Self {
        let mode = detect_mode(
            std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty()),
            std::env::var("COLORTERM").ok().as_deref(),
            std::env::var("TERM").ok().as_deref(),
            std::io::stdout().is_terminal(),
        );
        debug!("detected color mode {:?}", mode);
        Self::new(mode)
    }

    /// The escape color for a cell of `color`, or `None` if the mode has no colors.
    pub fn term_color(&self, color: Color) -> Option<TermColor> {
        match self.mode {
            ColorMode::None | ColorMode::Minimal => None,
            ColorMode::Ansi => {
                let (index, bright) = to_ansi(color);
                Some(TermColor::Basic { index, bright })
            }
            ColorMode::Xterm256 => Some(TermColor::Extended(style::Color::AnsiValue(
                to_xterm256(color),
            ))),
            ColorMode::Xterm24bit => {
                let Color32 { r, g, b, .. } = color.to_color32(255, 255);
                Some(TermColor::Extended(style::Color::Rgb { r, g, b }))
            }
        }
    }
}

/// The mode selection behind [`TermInfo::from_env`].
pub fn detect_mode(
    no_color: bool,
    colorterm: Option<&str>,
    term: Option<&str>,
    is_terminal: bool,
) -> ColorMode {
    if !is_terminal {
        return ColorMode::None;
    }
    if no_color {
        return ColorMode::Minimal;
    }
    if matches!(colorterm, Some("truecolor" | "24bit")) {
        return ColorMode::Xterm24bit;
    }
    match term {
        Some("dumb") | None => ColorMode::None,
        Some(term) if term.contains("256color") => ColorMode::Xterm256,
        Some(_) => ColorMode::Ansi,
    }
}

/// The 16 color palette as `(rgb, index, bright)`.
const ANSI_PALETTE: [(Color32, u8, bool); 16] = [
    (Color32::new(0, 0, 0, 255), 0, false),
    (Color32::new(170, 0, 0, 255), 1, false),
    (Color32::new(0, 170, 0, 255), 2, false),
    (Color32::new(170, 85, 0, 255), 3, false),
    (Color32::new(0, 0, 170, 255), 4, false),
    (Color32::new(170, 0, 170, 255), 5, false),
    (Color32::new(0, 170, 170, 255), 6, false),
    (Color32::new(170, 170, 170, 255), 7, false),
    (Color32::new(85, 85, 85, 255), 0, true),
    (Color32::new(255, 85, 85, 255), 1, true),
    (Color32::new(85, 255, 85, 255), 2, true),
    (Color32::new(255, 255, 85, 255), 3, true),
    (Color32::new(85, 85, 255, 255), 4, true),
    (Color32::new(255, 85, 255, 255), 5, true),
    (Color32::new(85, 255, 255, 255), 6, true),
    (Color32::new(255, 255, 255, 255), 7, true),
];

/// Finds the nearest palette entry, returning its distance too.
fn nearest_ansi(color: Color) -> (f32, u8, bool) {
    let mut best = (f32::INFINITY, 0, false);
    for (rgb, index, bright) in ANSI_PALETTE {
        let dist = color.distance(Color::from(rgb));
        if dist < best.0 {
            best = (dist, index, bright);
        }
    }
    best
}

/// Nearest of the 16 colors as `(index, bright)`, with `index` in `0..8`.
pub fn to_ansi(color: Color) -> (u8, bool) {
    let (_, index, bright) = nearest_ansi(color);
    (index, bright)
}

/// Nearest xterm 256 color, chosen among the 6x6x6 cube, the 24 step gray ramp and the
/// 16 standard colors.
pub fn to_xterm256(color: Color) -> u8 {
    let cube = color.to_color32(5, 255);
    let cube_dist = color.distance(Color::from_color32(cube, 5, 255));

    let luma = 0.3 * color.r + 0.59 * color.g + 0.11 * color.b;
    let gray = (luma.clamp(0.0, 1.0) * 23.0).round() as u8;
    let gray_dist = color.distance(Color::from_color32(Color32::new(gray, gray, gray, 255), 23, 255));

    let (ansi_dist, index, bright) = nearest_ansi(color);

    if cube_dist <= gray_dist && cube_dist <= ansi_dist {
        16 + 36 * cube.r + 6 * cube.g + cube.b
    } else if gray_dist <= ansi_dist {
        0xe8 + gray
    } else {
        index + if bright { 8 } else { 0 }
    }
}
