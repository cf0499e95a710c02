//! Terminal colors for highlight kinds, configurable through `ThemeSettings`.

use crate::kernel::editor::HighlightKind;
use crate::kernel::services::ports::ThemeSettings;
use crossterm::style::Color;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxTheme {
    colors: [Color; HighlightKind::COUNT],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalColorSupport {
    TrueColor,
    Ansi256,
    Ansi16,
}

pub fn detect_terminal_color_support() -> TerminalColorSupport {
    if let Ok(value) = std::env::var("PYEDIT_COLOR_SUPPORT") {
        let value = value.trim().to_ascii_lowercase();
        match value.as_str() {
            "truecolor" | "24bit" | "rgb" => return TerminalColorSupport::TrueColor,
            "256" | "ansi256" => return TerminalColorSupport::Ansi256,
            "16" | "ansi16" | "basic" => return TerminalColorSupport::Ansi16,
            _ => {}
        }
    }

    let colorterm = std::env::var("COLORTERM")
        .unwrap_or_default()
        .to_ascii_lowercase();
    let term = std::env::var("TERM")
        .unwrap_or_default()
        .to_ascii_lowercase();
    if colorterm.contains("truecolor")
        || colorterm.contains("24bit")
        || term.contains("truecolor")
        || term.contains("24bit")
    {
        return TerminalColorSupport::TrueColor;
    }

    if term.contains("256color") {
        return TerminalColorSupport::Ansi256;
    }

    TerminalColorSupport::Ansi16
}

impl Default for SyntaxTheme {
    fn default() -> Self {
        let mut colors = [Color::Reset; HighlightKind::COUNT];
        colors[HighlightKind::Keyword as usize] = Color::Rgb {
            r: 0x56,
            g: 0x9C,
            b: 0xD6,
        };
        colors[HighlightKind::Comment as usize] = Color::Rgb {
            r: 0x6A,
            g: 0x99,
            b: 0x55,
        };
        colors[HighlightKind::String as usize] = Color::Rgb {
            r: 0xCE,
            g: 0x91,
            b: 0x78,
        };
        colors[HighlightKind::Number as usize] = Color::Rgb {
            r: 0xB5,
            g: 0xCE,
            b: 0xA8,
        };
        colors[HighlightKind::Function as usize] = Color::Rgb {
            r: 0xDC,
            g: 0xDC,
            b: 0xAA,
        };
        colors[HighlightKind::ErrorUnderline as usize] = Color::DarkRed;
        Self { colors }
    }
}

impl SyntaxTheme {
    pub fn from_settings(settings: &ThemeSettings) -> Self {
        let mut theme = Self::default();
        theme.apply_settings(settings);
        theme
    }

    pub fn color(&self, kind: HighlightKind) -> Color {
        self.colors[kind as usize]
    }

    /// Unparseable values keep the current color.
    pub fn apply_settings(&mut self, settings: &ThemeSettings) {
        let kinds = HighlightKind::COLORED
            .into_iter()
            .chain([HighlightKind::ErrorUnderline]);
        for kind in kinds {
            let Some(value) = settings.color_for(kind) else {
                continue;
            };
            match parse_color(value) {
                Some(color) => self.colors[kind as usize] = color,
                None => {
                    tracing::warn!(kind = kind.label(), value, "ignoring unknown theme color");
                }
            }
        }
    }

    pub fn adapt_to_terminal_capabilities(&mut self) {
        self.apply_color_support(detect_terminal_color_support());
    }

    pub fn apply_color_support(&mut self, support: TerminalColorSupport) {
        for color in &mut self.colors {
            *color = map_color_for_support(*color, support);
        }
    }
}

fn map_color_for_support(color: Color, support: TerminalColorSupport) -> Color {
    match (support, color) {
        (TerminalColorSupport::TrueColor, value) => value,
        (TerminalColorSupport::Ansi256, Color::Rgb { r, g, b }) => {
            Color::AnsiValue(rgb_to_ansi256_index(r, g, b))
        }
        (TerminalColorSupport::Ansi16, Color::Rgb { r, g, b }) => {
            Color::AnsiValue(rgb_to_ansi16_index(r, g, b))
        }
        (TerminalColorSupport::Ansi16, Color::AnsiValue(i)) if i > 15 => {
            let (r, g, b) = ansi256_index_to_rgb(i);
            Color::AnsiValue(rgb_to_ansi16_index(r, g, b))
        }
        (_, value) => value,
    }
}

fn rgb_to_ansi256_index(r: u8, g: u8, b: u8) -> u8 {
    let mut best_index = 0u8;
    let mut best_distance = u32::MAX;

    for index in 0u8..=255 {
        let (pr, pg, pb) = ansi256_index_to_rgb(index);
        let distance = color_distance_sq((r, g, b), (pr, pg, pb));
        if distance < best_distance {
            best_distance = distance;
            best_index = index;
        }
    }

    best_index
}

fn rgb_to_ansi16_index(r: u8, g: u8, b: u8) -> u8 {
    let mut best_index = 0u8;
    let mut best_distance = u32::MAX;

    for (index, rgb) in ANSI16_RGB.iter().copied().enumerate() {
        let distance = color_distance_sq((r, g, b), rgb);
        if distance < best_distance {
            best_distance = distance;
            best_index = index as u8;
        }
    }

    best_index
}

fn ansi256_index_to_rgb(index: u8) -> (u8, u8, u8) {
    if index <= 15 {
        return ANSI16_RGB[index as usize];
    }

    if (16..=231).contains(&index) {
        let level = [0u8, 95, 135, 175, 215, 255];
        let offset = index - 16;
        let r = level[(offset / 36) as usize];
        let g = level[((offset / 6) % 6) as usize];
        let b = level[(offset % 6) as usize];
        return (r, g, b);
    }

    let gray = 8u8.saturating_add((index - 232).saturating_mul(10));
    (gray, gray, gray)
}

fn color_distance_sq(a: (u8, u8, u8), b: (u8, u8, u8)) -> u32 {
    let dr = i32::from(a.0) - i32::from(b.0);
    let dg = i32::from(a.1) - i32::from(b.1);
    let db = i32::from(a.2) - i32::from(b.2);
    (dr * dr + dg * dg + db * db) as u32
}

const ANSI16_RGB: [(u8, u8, u8); 16] = [
    (0, 0, 0),
    (205, 0, 0),
    (0, 205, 0),
    (205, 205, 0),
    (0, 0, 238),
    (205, 0, 205),
    (0, 205, 205),
    (229, 229, 229),
    (127, 127, 127),
    (255, 0, 0),
    (0, 255, 0),
    (255, 255, 0),
    (92, 92, 255),
    (255, 0, 255),
    (0, 255, 255),
    (255, 255, 255),
];

pub fn parse_color(value: &str) -> Option<Color> {
    let v = value.trim();
    if v.is_empty() {
        return None;
    }

    if let Some(hex) = v.strip_prefix('#') {
        if hex.len() == 6 && hex.is_ascii() {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            return Some(Color::Rgb { r, g, b });
        }
        return None;
    }

    let v = v.to_ascii_lowercase();
    let c = match v.as_str() {
        "reset" => Color::Reset,
        "black" => Color::Black,
        "red" => Color::DarkRed,
        "green" => Color::DarkGreen,
        "yellow" => Color::DarkYellow,
        "blue" => Color::DarkBlue,
        "magenta" => Color::DarkMagenta,
        "cyan" => Color::DarkCyan,
        "gray" | "grey" => Color::Grey,
        "dark_gray" | "darkgrey" => Color::DarkGrey,
        "white" => Color::White,
        "light_red" => Color::Red,
        "light_green" => Color::Green,
        "light_yellow" => Color::Yellow,
        "light_blue" => Color::Blue,
        "light_magenta" => Color::Magenta,
        "light_cyan" => Color::Cyan,
        _ => return None,
    };

    Some(c)
}
