use std::path::PathBuf;

use ratatui::style::{Color, Modifier, Style};
use serde::{Deserialize, Serialize};

/// A named five-color palette applied uniformly across the UI.
///
/// Themes are plain values: the application owns the current one and
/// hands references to the views. Presets (Light, Dark, Sunrise) cover
/// the common cases; a `theme.toml` in the config dir can pick a preset
/// and override individual colors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    #[serde(with = "color_str")]
    pub background: Color,
    #[serde(with = "color_str")]
    pub secondary: Color,
    #[serde(with = "color_str")]
    pub accent: Color,
    #[serde(with = "color_str")]
    pub primary_text: Color,
    #[serde(with = "color_str")]
    pub secondary_text: Color,
}

pub const PRESET_NAMES: [&str; 3] = ["light", "dark", "sunrise"];

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}

impl Theme {
    /// Resolve the startup theme: `theme.toml` if present, else Light.
    pub fn from_config() -> Self {
        Self::load_config().unwrap_or_default()
    }

    fn load_config() -> Option<Self> {
        let path = config_path()?;
        if !path.exists() {
            return None;
        }
        let content = std::fs::read_to_string(&path).ok()?;
        let config: ThemeConfig = toml::from_str(&content).ok()?;
        Some(config.into_theme())
    }

    /// Get a built-in preset by name (case-insensitive); unknown names
    /// fall back to Light.
    pub fn preset(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "dark" => Self::dark(),
            "sunrise" => Self::sunrise(),
            _ => Self::light(),
        }
    }

    /// The preset following this one, for cycling with a keybinding.
    pub fn next_preset(&self) -> Self {
        let idx = PRESET_NAMES
            .iter()
            .position(|n| *n == self.name.to_lowercase())
            .unwrap_or(PRESET_NAMES.len() - 1);
        Self::preset(PRESET_NAMES[(idx + 1) % PRESET_NAMES.len()])
    }

    pub fn light() -> Self {
        Self {
            name: "Light".to_string(),
            background: Color::White,
            secondary: Color::Gray,
            accent: Color::Cyan,
            primary_text: Color::Black,
            secondary_text: Color::Blue,
        }
    }

    pub fn dark() -> Self {
        Self {
            name: "Dark".to_string(),
            background: Color::Black,
            secondary: Color::DarkGray,
            accent: Color::Blue,
            primary_text: Color::White,
            secondary_text: Color::Gray,
        }
    }

    pub fn sunrise() -> Self {
        Self {
            name: "Sunrise".to_string(),
            background: Color::Rgb(0xFF, 0x81, 0x53),
            secondary: Color::Rgb(0xFC, 0xC5, 0xAF),
            accent: Color::Rgb(0xFF, 0xE6, 0x3B),
            primary_text: Color::Rgb(0x00, 0x01, 0x00),
            secondary_text: Color::Rgb(0x68, 0x4A, 0x2E),
        }
    }

    // ── Styles derived from the palette ──

    pub fn base(&self) -> Style {
        Style::default().fg(self.primary_text).bg(self.background)
    }

    pub fn header(&self) -> Style {
        Style::default()
            .fg(self.primary_text)
            .add_modifier(Modifier::BOLD)
    }

    pub fn dim(&self) -> Style {
        Style::default().fg(self.secondary_text)
    }

    pub fn border(&self) -> Style {
        Style::default().fg(self.secondary)
    }

    pub fn status(&self) -> Style {
        Style::default().fg(self.background).bg(self.secondary_text)
    }

    pub fn selected(&self) -> Style {
        Style::default().fg(self.background).bg(self.accent)
    }

    pub fn today(&self) -> Style {
        Style::default()
            .fg(self.background)
            .bg(self.secondary_text)
            .add_modifier(Modifier::BOLD)
    }

    /// Background for fragments of an event continuing from a previous day.
    pub fn continuation(&self) -> Style {
        Style::default().fg(self.primary_text).bg(self.secondary)
    }
}

fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("docket").join("theme.toml"))
}

// ── TOML config types ──

#[derive(Debug, Deserialize, Default)]
struct ThemeConfig {
    preset: Option<String>,
    background: Option<String>,
    secondary: Option<String>,
    accent: Option<String>,
    primary_text: Option<String>,
    secondary_text: Option<String>,
}

impl ThemeConfig {
    fn into_theme(self) -> Theme {
        let mut theme = self
            .preset
            .as_deref()
            .map(Theme::preset)
            .unwrap_or_default();

        if let Some(c) = self.background.as_deref().and_then(parse_color) {
            theme.background = c;
        }
        if let Some(c) = self.secondary.as_deref().and_then(parse_color) {
            theme.secondary = c;
        }
        if let Some(c) = self.accent.as_deref().and_then(parse_color) {
            theme.accent = c;
        }
        if let Some(c) = self.primary_text.as_deref().and_then(parse_color) {
            theme.primary_text = c;
        }
        if let Some(c) = self.secondary_text.as_deref().and_then(parse_color) {
            theme.secondary_text = c;
        }

        theme
    }
}

/// Parse a color string: hex "#rrggbb", or named colors.
pub fn parse_color(s: &str) -> Option<Color> {
    let s = s.trim();
    if s.starts_with('#') && s.len() == 7 {
        let r = u8::from_str_radix(&s[1..3], 16).ok()?;
        let g = u8::from_str_radix(&s[3..5], 16).ok()?;
        let b = u8::from_str_radix(&s[5..7], 16).ok()?;
        return Some(Color::Rgb(r, g, b));
    }
    match s.to_lowercase().as_str() {
        "black" => Some(Color::Black),
        "red" => Some(Color::Red),
        "green" => Some(Color::Green),
        "yellow" => Some(Color::Yellow),
        "blue" => Some(Color::Blue),
        "magenta" => Some(Color::Magenta),
        "cyan" => Some(Color::Cyan),
        "white" => Some(Color::White),
        "gray" | "grey" => Some(Color::Gray),
        "darkgray" | "darkgrey" => Some(Color::DarkGray),
        "lightred" => Some(Color::LightRed),
        "lightgreen" => Some(Color::LightGreen),
        "lightyellow" => Some(Color::LightYellow),
        "lightblue" => Some(Color::LightBlue),
        "lightmagenta" => Some(Color::LightMagenta),
        "lightcyan" => Some(Color::LightCyan),
        _ => None,
    }
}

/// Render a color back into a string `parse_color` accepts.
pub fn color_name(color: Color) -> String {
    match color {
        Color::Rgb(r, g, b) => format!("#{:02x}{:02x}{:02x}", r, g, b),
        Color::Black => "black".to_string(),
        Color::Red => "red".to_string(),
        Color::Green => "green".to_string(),
        Color::Yellow => "yellow".to_string(),
        Color::Blue => "blue".to_string(),
        Color::Magenta => "magenta".to_string(),
        Color::Cyan => "cyan".to_string(),
        Color::White => "white".to_string(),
        Color::Gray => "gray".to_string(),
        Color::DarkGray => "darkgray".to_string(),
        Color::LightRed => "lightred".to_string(),
        Color::LightGreen => "lightgreen".to_string(),
        Color::LightYellow => "lightyellow".to_string(),
        Color::LightBlue => "lightblue".to_string(),
        Color::LightMagenta => "lightmagenta".to_string(),
        Color::LightCyan => "lightcyan".to_string(),
        _ => "white".to_string(),
    }
}

/// Serde adapter storing colors as the strings `parse_color` understands.
pub mod color_str {
    use ratatui::style::Color;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(color: &Color, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::color_name(*color))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Color, D::Error> {
        let s = String::deserialize(deserializer)?;
        super::parse_color(&s)
            .ok_or_else(|| de::Error::custom(format!("unrecognized color: {s}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_and_named_colors() {
        assert_eq!(parse_color("#ff8153"), Some(Color::Rgb(0xFF, 0x81, 0x53)));
        assert_eq!(parse_color("  cyan "), Some(Color::Cyan));
        assert_eq!(parse_color("Grey"), Some(Color::Gray));
        assert_eq!(parse_color("#ff81"), None);
        assert_eq!(parse_color("chartreuse"), None);
    }

    #[test]
    fn color_name_round_trips() {
        for color in [Color::Rgb(1, 2, 3), Color::Blue, Color::DarkGray] {
            assert_eq!(parse_color(&color_name(color)), Some(color));
        }
    }

    #[test]
    fn preset_lookup_falls_back_to_light() {
        assert_eq!(Theme::preset("Dark").name, "Dark");
        assert_eq!(Theme::preset("sunrise").name, "Sunrise");
        assert_eq!(Theme::preset("no-such-theme").name, "Light");
    }

    #[test]
    fn presets_cycle_in_order() {
        let light = Theme::light();
        let dark = light.next_preset();
        assert_eq!(dark.name, "Dark");
        let sunrise = dark.next_preset();
        assert_eq!(sunrise.name, "Sunrise");
        assert_eq!(sunrise.next_preset().name, "Light");
    }

    #[test]
    fn config_overrides_preset_colors() {
        let config: ThemeConfig =
            toml::from_str("preset = \"dark\"\naccent = \"#ffe63b\"\n").unwrap();
        let theme = config.into_theme();
        assert_eq!(theme.name, "Dark");
        assert_eq!(theme.accent, Color::Rgb(0xFF, 0xE6, 0x3B));
        assert_eq!(theme.background, Color::Black);
    }

    #[test]
    fn theme_serde_round_trips() {
        let theme = Theme::sunrise();
        let json = serde_json::to_value(&theme).unwrap();
        assert_eq!(json["name"], "Sunrise");
        assert_eq!(json["background"], "#ff8153");
        let decoded: Theme = serde_json::from_value(json).unwrap();
        assert_eq!(decoded, theme);
    }
}
