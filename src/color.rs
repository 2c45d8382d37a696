use crate::types::Color;

/// Gray used for any style key the resolver does not know.
pub const FALLBACK_COLOR: &str = "#999";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommunicationStyle {
    Aggressive,
    Assertive,
    Passive,
}

impl CommunicationStyle {
    pub const ALL: [CommunicationStyle; 3] = [
        CommunicationStyle::Aggressive,
        CommunicationStyle::Assertive,
        CommunicationStyle::Passive,
    ];

    pub fn from_key(raw: &str) -> Option<Self> {
        match raw.trim() {
            "AGRESIVO" => Some(CommunicationStyle::Aggressive),
            "ASERTIVO" => Some(CommunicationStyle::Assertive),
            "PASIVO" => Some(CommunicationStyle::Passive),
            _ => None,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            CommunicationStyle::Aggressive => "AGRESIVO",
            CommunicationStyle::Assertive => "ASERTIVO",
            CommunicationStyle::Passive => "PASIVO",
        }
    }

    pub fn hex(&self) -> &'static str {
        match self {
            CommunicationStyle::Aggressive => "#e53935",
            CommunicationStyle::Assertive => "#43a047",
            CommunicationStyle::Passive => "#1e88e5",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CommunicationStyle::Aggressive => "Agresivo",
            CommunicationStyle::Assertive => "Asertivo",
            CommunicationStyle::Passive => "Pasivo",
        }
    }
}

pub fn color_for(style_key: &str) -> &'static str {
    CommunicationStyle::from_key(style_key)
        .map(|style| style.hex())
        .unwrap_or(FALLBACK_COLOR)
}

pub fn label_for(style_key: &str) -> String {
    CommunicationStyle::from_key(style_key)
        .map(|style| style.label().to_string())
        .unwrap_or_else(|| style_key.to_string())
}

/// Parses `#rgb` / `#rrggbb` (leading `#` optional). Other lengths are not
/// valid input; they resolve to black rather than panicking.
pub fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
    let digits = hex.trim().trim_start_matches('#');
    let full: String = if digits.chars().count() == 3 {
        digits.chars().flat_map(|c| [c, c]).collect()
    } else {
        digits.to_string()
    };
    let Ok(n) = u32::from_str_radix(&full, 16) else {
        return (0, 0, 0);
    };
    (
        ((n >> 16) & 0xff) as u8,
        ((n >> 8) & 0xff) as u8,
        (n & 0xff) as u8,
    )
}

pub fn hex_to_color(hex: &str) -> Color {
    let (r, g, b) = hex_to_rgb(hex);
    Color::from_rgb8(r, g, b)
}
