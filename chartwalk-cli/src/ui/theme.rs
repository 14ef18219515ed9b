//! UI Theme Module - color palette and style helpers
//!
//! Screens ask the theme for semantic styles (selection, key hints, badges)
//! instead of naming colors directly.

use ratatui::style::{Color, Modifier, Style};

use chartwalk_core::config::ThemeName;

/// Color palette tokens for the theme
#[derive(Clone, Debug)]
pub struct Palette {
    /// Panel border color
    pub panel_border: Color,
    /// Primary text color
    pub text: Color,
    /// Dimmed text (secondary info)
    pub text_dim: Color,
    /// Muted text (tertiary info, disabled)
    pub text_muted: Color,
    /// Accent color (titles, chart names)
    pub accent: Color,
    /// Secondary values (URLs, app versions)
    pub secondary: Color,
    /// Success state (download done, latest badge)
    pub success: Color,
    /// Error state
    pub error: Color,
    /// Selection background
    pub selection_bg: Color,
    /// Selection foreground
    pub selection_fg: Color,
    /// Key hint text
    pub key_hint: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self::dark()
    }
}

impl Palette {
    pub fn dark() -> Self {
        Self {
            panel_border: Color::Rgb(60, 60, 60),
            text: Color::Rgb(212, 212, 212),
            text_dim: Color::Rgb(150, 150, 150),
            text_muted: Color::Rgb(100, 100, 100),
            accent: Color::Rgb(79, 193, 255),
            secondary: Color::Rgb(197, 134, 192),
            success: Color::Rgb(78, 201, 176),
            error: Color::Rgb(244, 135, 113),
            selection_bg: Color::Rgb(38, 79, 120),
            selection_fg: Color::White,
            key_hint: Color::Rgb(206, 145, 120),
        }
    }

    pub fn high_contrast() -> Self {
        Self {
            panel_border: Color::White,
            text: Color::White,
            text_dim: Color::Rgb(200, 200, 200),
            text_muted: Color::Rgb(150, 150, 150),
            accent: Color::Cyan,
            secondary: Color::Magenta,
            success: Color::Green,
            error: Color::Red,
            selection_bg: Color::Blue,
            selection_fg: Color::White,
            key_hint: Color::Yellow,
        }
    }
}

/// Theme configuration
#[derive(Clone, Debug, Default)]
pub struct Theme {
    pub palette: Palette,
}

impl Theme {
    pub fn from_name(name: ThemeName) -> Self {
        let palette = match name {
            ThemeName::Dark => Palette::dark(),
            ThemeName::HighContrast => Palette::high_contrast(),
        };
        Self { palette }
    }

    pub fn title_style(&self) -> Style {
        Style::default()
            .fg(self.palette.accent)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for section headings above a list
    pub fn heading_style(&self) -> Style {
        Style::default()
            .fg(self.palette.text)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for the column header row
    pub fn column_header_style(&self) -> Style {
        Style::default()
            .fg(self.palette.text_dim)
            .add_modifier(Modifier::BOLD)
    }

    pub fn selection_style(&self) -> Style {
        Style::default()
            .bg(self.palette.selection_bg)
            .fg(self.palette.selection_fg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn text_style(&self) -> Style {
        Style::default().fg(self.palette.text)
    }

    pub fn text_dim_style(&self) -> Style {
        Style::default().fg(self.palette.text_dim)
    }

    pub fn text_muted_style(&self) -> Style {
        Style::default().fg(self.palette.text_muted)
    }

    /// Primary column (repository, chart, version)
    pub fn primary_style(&self) -> Style {
        Style::default()
            .fg(self.palette.accent)
            .add_modifier(Modifier::BOLD)
    }

    /// Secondary column (URL, app version)
    pub fn secondary_style(&self) -> Style {
        Style::default().fg(self.palette.secondary)
    }

    pub fn badge_style(&self) -> Style {
        Style::default()
            .fg(self.palette.success)
            .add_modifier(Modifier::BOLD)
    }

    pub fn success_style(&self) -> Style {
        Style::default()
            .fg(self.palette.success)
            .add_modifier(Modifier::BOLD)
    }

    pub fn error_style(&self) -> Style {
        Style::default()
            .fg(self.palette.error)
            .add_modifier(Modifier::BOLD)
    }

    pub fn key_hint_style(&self) -> Style {
        Style::default().fg(self.palette.key_hint)
    }

    pub fn border_style(&self) -> Style {
        Style::default().fg(self.palette.panel_border)
    }
}
