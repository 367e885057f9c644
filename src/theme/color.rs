//! Hex colour parsing and CSS colour formatting.

use std::sync::LazyLock;

use regex::Regex;

/// Neutral channels used when a colour cannot be parsed (slate-400).
pub const FALLBACK_RGB: Rgb = Rgb {
    r: 148,
    g: 163,
    b: 184,
};

/// Red, green and blue channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

/// Foreground colour marker inside a badge class list, e.g. `text-[#93C5FD]`.
///
/// The word boundary is ASCII-only: `é` in front of `text-` does not count
/// as part of the same word.
static TEXT_COLOR_MARKER: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)(?-u:\b)text-\[#([0-9a-f]{6})\]").ok());

/// Parse `#rgb`, `#rrggbb`, `rgb` or `rrggbb`, case-insensitive.
///
/// Returns `None` for anything else.
#[must_use]
pub fn parse_color(hex: &str) -> Option<Rgb> {
    let digits = hex.trim();
    let digits = digits.strip_prefix('#').unwrap_or(digits);
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }

    let full = match digits.len() {
        3 => digits.chars().flat_map(|c| [c, c]).collect::<String>(),
        6 => digits.to_owned(),
        _ => return None,
    };

    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&full[range], 16).ok();
    Some(Rgb {
        r: channel(0..2)?,
        g: channel(2..4)?,
        b: channel(4..6)?,
    })
}

/// Format `hex` as `rgba(r, g, b, alpha)`, falling back to [`FALLBACK_RGB`].
#[must_use]
pub fn to_rgba(hex: &str, alpha: f64) -> String {
    let Rgb { r, g, b } = parse_color(hex).unwrap_or(FALLBACK_RGB);
    format!("rgba({r}, {g}, {b}, {alpha})")
}

/// Extract the `text-[#RRGGBB]` colour from a badge class list as `#RRGGBB`.
#[must_use]
pub fn derive_line_color(badge_class: &str) -> Option<String> {
    let captures = TEXT_COLOR_MARKER.as_ref()?.captures(badge_class)?;
    Some(format!("#{}", captures.get(1)?.as_str()))
}
