use std::fs;

use ratatui::style::Color;
use rust_embed::Embed;
use serde::{Deserialize, Serialize};

#[derive(Embed)]
#[folder = "assets/themes/"]
struct ThemeAssets;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ThemeColors {
    pub bg: String,
    pub fg: String,
    pub text_dim: String,
    pub accent: String,
    pub border: String,
    pub header_bg: String,
    pub header_fg: String,
    pub dial_rim: String,
    pub dial_numbers: String,
    pub dial_minutes: String,
    pub hour_hand: String,
    pub minute_hand: String,
    pub hand_active: String,
    pub selected_bg: String,
    pub selected_fg: String,
    pub locked: String,
    pub bar_filled: String,
    pub bar_empty: String,
    pub error: String,
    pub warning: String,
    pub success: String,
}

impl Theme {
    pub fn load(name: &str) -> Option<Self> {
        // Try user themes dir
        if let Some(config_dir) = dirs::config_dir() {
            let user_theme_path = config_dir
                .join("nanji-attack")
                .join("themes")
                .join(format!("{name}.toml"));
            if let Ok(content) = fs::read_to_string(&user_theme_path)
                && let Ok(theme) = toml::from_str::<Theme>(&content)
            {
                return Some(theme);
            }
        }

        // Try bundled themes
        let filename = format!("{name}.toml");
        let file = ThemeAssets::get(&filename)?;
        let content = std::str::from_utf8(file.data.as_ref()).ok()?;
        toml::from_str::<Theme>(content).ok()
    }

    pub fn available_themes() -> Vec<String> {
        let mut themes: Vec<String> = ThemeAssets::iter()
            .filter_map(|f| f.strip_suffix(".toml").map(|n| n.to_string()))
            .collect();
        themes.sort();
        themes
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::load("daylight").unwrap_or_else(|| Self {
            name: "default".to_string(),
            colors: ThemeColors::default(),
        })
    }
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            bg: "#fdf6e3".to_string(),
            fg: "#333333".to_string(),
            text_dim: "#93a1a1".to_string(),
            accent: "#268bd2".to_string(),
            border: "#b8b0a0".to_string(),
            header_bg: "#268bd2".to_string(),
            header_fg: "#ffffff".to_string(),
            dial_rim: "#333333".to_string(),
            dial_numbers: "#333333".to_string(),
            dial_minutes: "#999999".to_string(),
            hour_hand: "#333333".to_string(),
            minute_hand: "#555555".to_string(),
            hand_active: "#d33682".to_string(),
            selected_bg: "#268bd2".to_string(),
            selected_fg: "#ffffff".to_string(),
            locked: "#b0b0b0".to_string(),
            bar_filled: "#859900".to_string(),
            bar_empty: "#eee8d5".to_string(),
            error: "#dc322f".to_string(),
            warning: "#b58900".to_string(),
            success: "#859900".to_string(),
        }
    }
}

impl ThemeColors {
    pub fn parse_color(hex: &str) -> Color {
        let hex = hex.trim_start_matches('#');
        if hex.len() == 6
            && let (Ok(r), Ok(g), Ok(b)) = (
                u8::from_str_radix(&hex[0..2], 16),
                u8::from_str_radix(&hex[2..4], 16),
                u8::from_str_radix(&hex[4..6], 16),
            )
        {
            return Color::Rgb(r, g, b);
        }
        Color::White
    }

    pub fn bg(&self) -> Color { Self::parse_color(&self.bg) }
    pub fn fg(&self) -> Color { Self::parse_color(&self.fg) }
    pub fn text_dim(&self) -> Color { Self::parse_color(&self.text_dim) }
    pub fn accent(&self) -> Color { Self::parse_color(&self.accent) }
    pub fn border(&self) -> Color { Self::parse_color(&self.border) }
    pub fn header_bg(&self) -> Color { Self::parse_color(&self.header_bg) }
    pub fn header_fg(&self) -> Color { Self::parse_color(&self.header_fg) }
    pub fn dial_rim(&self) -> Color { Self::parse_color(&self.dial_rim) }
    pub fn dial_numbers(&self) -> Color { Self::parse_color(&self.dial_numbers) }
    pub fn dial_minutes(&self) -> Color { Self::parse_color(&self.dial_minutes) }
    pub fn hour_hand(&self) -> Color { Self::parse_color(&self.hour_hand) }
    pub fn minute_hand(&self) -> Color { Self::parse_color(&self.minute_hand) }
    pub fn hand_active(&self) -> Color { Self::parse_color(&self.hand_active) }
    pub fn selected_bg(&self) -> Color { Self::parse_color(&self.selected_bg) }
    pub fn selected_fg(&self) -> Color { Self::parse_color(&self.selected_fg) }
    pub fn locked(&self) -> Color { Self::parse_color(&self.locked) }
    pub fn bar_filled(&self) -> Color { Self::parse_color(&self.bar_filled) }
    pub fn bar_empty(&self) -> Color { Self::parse_color(&self.bar_empty) }
    pub fn error(&self) -> Color { Self::parse_color(&self.error) }
    pub fn warning(&self) -> Color { Self::parse_color(&self.warning) }
    pub fn success(&self) -> Color { Self::parse_color(&self.success) }
}
