// Point and line colors for the active theme

use crate::color::Color;
use crate::config::DARK_THEME_VALUE;
use std::cell::Cell;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    // Anything other than an explicit "dark" falls back to light, same as the toggle
    pub fn from_attribute(value: Option<&str>) -> Theme {
        match value {
            Some(DARK_THEME_VALUE) => Theme::Dark,
            _ => Theme::Light,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Theme::Light
    }
}

#[derive(Debug, Default)]
pub struct Palette {
    theme: Cell<Theme>,
}

impl Palette {
    pub const LIGHT_POINT: Color = Color::rgba(0, 0, 0, 0.5);
    pub const LIGHT_LINE: Color = Color::rgba(0, 0, 0, 0.05);
    pub const DARK_POINT: Color = Color::rgba(255, 255, 255, 0.5);
    pub const DARK_LINE: Color = Color::rgba(255, 255, 255, 0.05);

    pub fn new(theme: Theme) -> Palette {
        Palette {
            theme: Cell::new(theme),
        }
    }

    pub fn set_theme(&self, theme: Theme) {
        if self.theme.replace(theme) != theme {
            log::debug!("constellation palette switched to {:?}", theme);
        }
    }

    pub fn theme(&self) -> Theme {
        self.theme.get()
    }

    pub fn point_color(&self) -> Color {
        match self.theme.get() {
            Theme::Light => Palette::LIGHT_POINT,
            Theme::Dark => Palette::DARK_POINT,
        }
    }

    pub fn line_color(&self) -> Color {
        match self.theme.get() {
            Theme::Light => Palette::LIGHT_LINE,
            Theme::Dark => Palette::DARK_LINE,
        }
    }
}
