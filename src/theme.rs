//! Color themes and the persisted theme preference

use ratatui::style::Color;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, warn};

use crate::preferences::PreferenceStore;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
    Pink,
}

/// Colors used by every widget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub bg: Color,
    pub panel: Color,
    pub text: Color,
    pub muted: Color,
    pub accent: Color,
    pub focus: Color,
    pub highlight: Color,
    pub success: Color,
    pub error: Color,
}

impl Theme {
    pub const ALL: [Theme; 3] = [Theme::Light, Theme::Dark, Theme::Pink];

    pub fn name(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
            Theme::Pink => "pink",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Theme::Light => "Light",
            Theme::Dark => "Dark",
            Theme::Pink => "Pink",
        }
    }

    /// Value written to the preferences file
    pub fn storage_key(self) -> &'static str {
        match self {
            Theme::Light => "light-theme",
            Theme::Dark => "dark-theme",
            Theme::Pink => "pink-theme",
        }
    }

    pub fn palette(self) -> Palette {
        match self {
            Theme::Light => Palette {
                bg: Color::Rgb(244, 245, 247),
                panel: Color::Rgb(255, 255, 255),
                text: Color::Rgb(33, 37, 41),
                muted: Color::Rgb(134, 142, 150),
                accent: Color::Rgb(73, 80, 87),
                focus: Color::Rgb(0, 123, 255),
                highlight: Color::Rgb(222, 226, 230),
                success: Color::Rgb(40, 167, 69),
                error: Color::Rgb(220, 53, 69),
            },
            Theme::Dark => Palette {
                bg: Color::Rgb(9, 8, 12),
                panel: Color::Rgb(9, 8, 12),
                text: Color::White,
                muted: Color::DarkGray,
                accent: Color::Rgb(159, 160, 156),
                focus: Color::Cyan,
                highlight: Color::Rgb(56, 80, 109),
                success: Color::Green,
                error: Color::Red,
            },
            Theme::Pink => Palette {
                bg: Color::Rgb(255, 228, 236),
                panel: Color::Rgb(255, 240, 245),
                text: Color::Rgb(91, 35, 64),
                muted: Color::Rgb(176, 120, 146),
                accent: Color::Rgb(214, 51, 132),
                focus: Color::Rgb(232, 62, 140),
                highlight: Color::Rgb(252, 194, 215),
                success: Color::Rgb(46, 139, 87),
                error: Color::Rgb(200, 30, 60),
            },
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Theme {
    type Err = String;

    /// Accepts both "dark" and the stored form "dark-theme"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        let name = normalized.strip_suffix("-theme").unwrap_or(normalized.as_str());
        match name {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            "pink" => Ok(Theme::Pink),
            _ => Err(format!("Unknown theme: {} (expected light, dark or pink)", s)),
        }
    }
}

/// Active theme plus its persistence
pub struct ThemeManager {
    active: Theme,
    store: Option<PreferenceStore>,
}

impl ThemeManager {
    /// Startup: apply the persisted theme if recognized, otherwise light
    pub fn load(store: Option<PreferenceStore>) -> Self {
        let saved = store.as_ref().and_then(PreferenceStore::theme);
        let active = match saved.as_deref().map(Theme::from_str) {
            Some(Ok(theme)) => theme,
            Some(Err(e)) => {
                warn!("{}; falling back to light", e);
                Theme::default()
            }
            None => Theme::default(),
        };
        debug!(theme = %active, "theme loaded");
        Self { active, store }
    }

    pub fn active(&self) -> Theme {
        self.active
    }

    pub fn palette(&self) -> Palette {
        self.active.palette()
    }

    /// Switch theme and persist the choice. Persistence failures are logged
    /// and do not undo the switch.
    pub fn apply_theme(&mut self, theme: Theme) {
        self.active = theme;
        if let Some(store) = &self.store {
            if let Err(e) = store.set_theme(theme.storage_key()) {
                warn!("Failed to save theme preference: {}", e);
            }
        }
    }
}
