// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Procflow-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Procflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::{env, error::Error, fmt};

use ratatui::style::{Color, Modifier, Style};

use crate::build::HaltSeverity;

/// Colors for the TUI, optionally overridden by a palette from the environment.
#[derive(Debug, Clone, Default)]
pub(crate) struct TuiTheme {
    palette: Option<TuiPalette>,
}

impl TuiTheme {
    pub(crate) fn from_env() -> Result<Self, ThemeError> {
        let palette = palette_override_from_env()?;
        Ok(Self { palette })
    }

    pub(crate) fn base_style(&self) -> Style {
        match &self.palette {
            Some(palette) => Style::default().fg(palette.fg).bg(palette.bg),
            None => Style::default(),
        }
    }

    fn ansi_color(&self, color: Ansi16) -> Color {
        match &self.palette {
            Some(palette) => palette.ansi_color(color.idx()),
            None => color.into(),
        }
    }

    pub(crate) fn panel_border_style(&self, focused: bool) -> Style {
        if focused {
            self.base_style().fg(self.ansi_color(Ansi16::BrightGreen))
        } else {
            self.base_style()
        }
    }

    pub(crate) fn field_style(&self, focused: bool) -> Style {
        if focused {
            self.base_style().add_modifier(Modifier::REVERSED | Modifier::BOLD)
        } else {
            self.base_style().fg(self.ansi_color(Ansi16::BrightWhite))
        }
    }

    pub(crate) fn prompt_style(&self) -> Style {
        self.base_style().fg(self.ansi_color(Ansi16::White))
    }

    pub(crate) fn heading_style(&self) -> Style {
        self.base_style().add_modifier(Modifier::BOLD)
    }

    pub(crate) fn halt_style(&self, severity: HaltSeverity) -> Style {
        match severity {
            HaltSeverity::Info => self.base_style().fg(self.ansi_color(Ansi16::Cyan)),
            HaltSeverity::Warning => self.base_style().fg(self.ansi_color(Ansi16::Yellow)),
        }
    }

    pub(crate) fn band_style(&self) -> Style {
        self.base_style().fg(self.ansi_color(Ansi16::Blue))
    }

    pub(crate) fn highlight_style(&self) -> Style {
        self.base_style().fg(self.ansi_color(Ansi16::BrightMagenta)).add_modifier(Modifier::BOLD)
    }

    pub(crate) fn footer_label_style(&self) -> Style {
        self.base_style().fg(self.ansi_color(Ansi16::White))
    }

    pub(crate) fn footer_key_style(&self) -> Style {
        self.base_style().fg(self.ansi_color(Ansi16::Cyan)).add_modifier(Modifier::BOLD)
    }
}

#[derive(Debug, Clone, PartialEq)]
struct TuiPalette {
    fg: Color,
    bg: Color,
    ansi: [Color; 16],
}

impl TuiPalette {
    const CSV_FIELDS: [&'static str; 18] = [
        "fg",
        "bg",
        "black",
        "red",
        "green",
        "yellow",
        "blue",
        "magenta",
        "cyan",
        "white",
        "bright_black",
        "bright_red",
        "bright_green",
        "bright_yellow",
        "bright_blue",
        "bright_magenta",
        "bright_cyan",
        "bright_white",
    ];

    /// Parses `fg,bg,<16 ansi colors>`, each as `#RRGGBB` or `rgb:RR/GG/BB`.
    fn parse_csv(value: &str) -> Result<Self, String> {
        let parts = value.split(',').map(str::trim).collect::<Vec<_>>();
        if parts.len() != Self::CSV_FIELDS.len() {
            return Err(format!(
                "expected {} comma-separated colors ({}), got {}",
                Self::CSV_FIELDS.len(),
                Self::CSV_FIELDS.join(","),
                parts.len()
            ));
        }

        let mut colors = [Color::Reset; 18];
        for ((slot, part), field) in colors.iter_mut().zip(&parts).zip(Self::CSV_FIELDS) {
            *slot = parse_palette_color(part).map_err(|err| format!("{field}: {err}"))?;
        }

        let mut ansi = [Color::Reset; 16];
        ansi.copy_from_slice(&colors[2..]);
        Ok(Self { fg: colors[0], bg: colors[1], ansi })
    }

    fn ansi_color(&self, idx: usize) -> Color {
        self.ansi[idx]
    }
}

const PALETTE_ENV_VARS: [&str; 2] = ["PROCFLOW_TUI_PALETTE", "PROCFLOW_PALETTE"];

fn palette_override_from_env() -> Result<Option<TuiPalette>, ThemeError> {
    for name in PALETTE_ENV_VARS {
        let value = match env::var(name) {
            Ok(value) => value,
            Err(env::VarError::NotPresent) => continue,
            Err(env::VarError::NotUnicode(_)) => {
                return Err(ThemeError::InvalidEnv {
                    name: name.to_owned(),
                    value: "<non-unicode>".to_owned(),
                });
            }
        };

        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        return TuiPalette::parse_csv(trimmed).map(Some).map_err(|error| {
            ThemeError::InvalidEnv { name: name.to_owned(), value: format!("{trimmed} ({error})") }
        });
    }
    Ok(None)
}

fn parse_palette_color(value: &str) -> Result<Color, String> {
    let trimmed = value.trim();
    if let Some(rest) = trimmed.strip_prefix("rgb:").or_else(|| trimmed.strip_prefix("RGB:")) {
        let channels = rest.split('/').map(parse_hex_channel).collect::<Result<Vec<_>, _>>()?;
        let [r, g, b] = channels[..] else {
            return Err(format!("invalid rgb: value: {trimmed}"));
        };
        return Ok(Color::Rgb(r, g, b));
    }

    let hex = trimmed.strip_prefix('#').unwrap_or(trimmed);
    if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(format!("invalid hex color: {trimmed:?} (expected #RRGGBB)"));
    }
    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&hex[range], 16).map_err(|_| format!("invalid hex color: {trimmed}"))
    };
    Ok(Color::Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// Accepts 2-digit (`ff`) or 4-digit X11 (`ffff`) channels; 4-digit values keep the high byte.
fn parse_hex_channel(value: &str) -> Result<u8, String> {
    let value = value.trim();
    let high = match value.len() {
        2 | 4 => &value[..2],
        _ => return Err(format!("invalid rgb: component {value} (expected 2 or 4 hex digits)")),
    };
    if !value.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(format!("invalid rgb: component {value}"));
    }
    u8::from_str_radix(high, 16).map_err(|_| format!("invalid rgb: component {value}"))
}

/// Terminal ANSI colors, in palette order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(dead_code)]
enum Ansi16 {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    BrightBlack,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightMagenta,
    BrightCyan,
    BrightWhite,
}

impl Ansi16 {
    const fn idx(self) -> usize {
        self as usize
    }
}

impl From<Ansi16> for Color {
    fn from(value: Ansi16) -> Self {
        match value {
            Ansi16::Black => Color::Black,
            Ansi16::Red => Color::Red,
            Ansi16::Green => Color::Green,
            Ansi16::Yellow => Color::Yellow,
            Ansi16::Blue => Color::Blue,
            Ansi16::Magenta => Color::Magenta,
            Ansi16::Cyan => Color::Cyan,
            Ansi16::White => Color::Gray,
            Ansi16::BrightBlack => Color::DarkGray,
            Ansi16::BrightRed => Color::LightRed,
            Ansi16::BrightGreen => Color::LightGreen,
            Ansi16::BrightYellow => Color::LightYellow,
            Ansi16::BrightBlue => Color::LightBlue,
            Ansi16::BrightMagenta => Color::LightMagenta,
            Ansi16::BrightCyan => Color::LightCyan,
            Ansi16::BrightWhite => Color::White,
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) enum ThemeError {
    InvalidEnv { name: String, value: String },
}

impl fmt::Display for ThemeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidEnv { name, value } => write!(f, "invalid env {name}={value}"),
        }
    }
}

impl Error for ThemeError {}

#[cfg(test)]
mod tests {
    use ratatui::style::Color;

    use super::{parse_palette_color, TuiPalette};

    #[test]
    fn palette_override_parses_valid_csv() {
        let palette = TuiPalette::parse_csv(
            "#111111,#222222,#000000,#ff0000,#00ff00,#ffff00,#0000ff,#ff00ff,#00ffff,#ffffff,#1a1a1a,#ff1111,#11ff11,#ffff11,#1111ff,#ff11ff,#11ffff,#fefefe",
        )
        .expect("palette");

        assert_eq!(palette.fg, Color::Rgb(0x11, 0x11, 0x11));
        assert_eq!(palette.bg, Color::Rgb(0x22, 0x22, 0x22));
        assert_eq!(palette.ansi_color(1), Color::Rgb(0xff, 0, 0));
        assert_eq!(palette.ansi_color(15), Color::Rgb(0xfe, 0xfe, 0xfe));
    }

    #[test]
    fn palette_override_rejects_wrong_field_count() {
        let err = TuiPalette::parse_csv("#000000,#ffffff").unwrap_err();
        assert!(err.contains("expected 18"));
    }

    #[test]
    fn parses_x11_rgb_colors() {
        assert_eq!(parse_palette_color("rgb:ff/80/00"), Ok(Color::Rgb(0xff, 0x80, 0x00)));
        assert_eq!(parse_palette_color("rgb:ffff/8080/0000"), Ok(Color::Rgb(0xff, 0x80, 0x00)));
        assert!(parse_palette_color("rgb:ff/80").is_err());
        assert!(parse_palette_color("#12345").is_err());
    }
}
