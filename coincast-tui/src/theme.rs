//! Parrot/neon theme tokens for the Coincast TUI
//!
//! # Color Palette
//! - **Accent**: Electric cyan (focus, headings)
//! - **Positive**: Neon green (uptrend, success)
//! - **Negative**: Hot pink (downtrend, errors)
//! - **Warning**: Neon orange (skipped horizons, alerts)
//! - **Muted**: Steel blue (hints, secondary text)

use ratatui::style::{Color, Modifier, Style};

use coincast_core::horizon::Trend;

/// Parrot/neon theme for the Coincast TUI
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    /// Electric cyan accent (focus, highlights)
    pub accent: Color,
    /// Neon green (uptrend)
    pub positive: Color,
    /// Hot pink (downtrend, errors)
    pub negative: Color,
    /// Neon orange (warnings)
    pub warning: Color,
    /// Cool purple (neutral info)
    pub neutral: Color,
    /// Steel blue (muted text)
    pub muted: Color,
    pub text_primary: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::parrot_neon()
    }
}

impl Theme {
    pub const fn parrot_neon() -> Self {
        Self {
            accent: Color::Rgb(0, 255, 255),
            positive: Color::Rgb(0, 255, 128),
            negative: Color::Rgb(255, 20, 147),
            warning: Color::Rgb(255, 140, 0),
            neutral: Color::Rgb(147, 112, 219),
            muted: Color::Rgb(100, 149, 237),
            text_primary: Color::White,
        }
    }

    /// Uptrend green, downtrend pink.
    pub fn trend_color(&self, trend: Trend) -> Color {
        match trend {
            Trend::Uptrend => self.positive,
            Trend::Downtrend => self.negative,
        }
    }
}

const THEME: Theme = Theme::parrot_neon();

pub fn accent() -> Style {
    Style::default().fg(THEME.accent)
}

pub fn accent_bold() -> Style {
    accent().add_modifier(Modifier::BOLD)
}

pub fn muted() -> Style {
    Style::default().fg(THEME.muted)
}

pub fn neutral() -> Style {
    Style::default().fg(THEME.neutral)
}

pub fn warning() -> Style {
    Style::default().fg(THEME.warning)
}

pub fn negative() -> Style {
    Style::default().fg(THEME.negative)
}

pub fn text() -> Style {
    Style::default().fg(THEME.text_primary)
}

pub fn trend(trend: Trend) -> Style {
    Style::default().fg(THEME.trend_color(trend))
}

/// Border style for a block, brighter when it has focus.
pub fn panel_border(focused: bool) -> Style {
    if focused {
        accent()
    } else {
        muted()
    }
}

pub fn panel_title(focused: bool) -> Style {
    if focused {
        accent_bold()
    } else {
        muted()
    }
}
