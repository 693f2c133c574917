//! Font metrics, word wrapping and color parsing for the card text.

use std::path::Path;
use std::sync::Arc;

use printpdf::ParsedFont;

use super::error::Result;
use super::CardError;

/// Font faces tried in order inside the fonts directory.
const FONT_CANDIDATES: &[&str] = &[
    "Poppins-Medium.ttf",
    "LiberationSans-Regular.ttf",
    "DejaVuSans.ttf",
];

/// Raw bytes of the card font, shared across request handlers and workers.
/// The parsed face holds `Rc` internals and cannot cross threads, so only
/// the bytes travel; each blocking worker parses its own `CardFont`.
#[derive(Clone)]
pub struct FontSource {
    bytes: Arc<Vec<u8>>,
}

impl FontSource {
    /// Load the first available candidate face from `dir`. The face is
    /// parsed once here so a corrupt file fails at startup, not per request.
    pub fn load(dir: &Path) -> Result<Self> {
        for candidate in FONT_CANDIDATES {
            let path = dir.join(candidate);
            if let Ok(bytes) = std::fs::read(&path) {
                if CardFont::from_bytes(&bytes).is_none() {
                    return Err(CardError::Generation(format!(
                        "failed to parse font {path:?}"
                    )));
                }
                return Ok(Self {
                    bytes: Arc::new(bytes),
                });
            }
        }
        Err(CardError::Generation(format!(
            "no usable font found in {dir:?}; expected one of {FONT_CANDIDATES:?}"
        )))
    }

    /// Parse the face on the calling thread.
    pub fn parse(&self) -> Result<CardFont> {
        CardFont::from_bytes(&self.bytes)
            .ok_or_else(|| CardError::Generation("failed to parse the card font".into()))
    }
}

/// The single face used for all card text, wrapped with width measurement.
/// Not thread-safe; obtained from a [`FontSource`] on the rendering thread.
pub struct CardFont {
    font: ParsedFont,
}

impl CardFont {
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        let mut warnings = Vec::new();
        ParsedFont::from_bytes(bytes, 0, &mut warnings).map(|font| Self { font })
    }

    pub fn parsed(&self) -> &ParsedFont {
        &self.font
    }

    /// Rendered width of `text` at `size_pt`, summed from glyph advances.
    pub fn string_width(&self, text: &str, size_pt: f32) -> f32 {
        let mut width = 0.0;
        for ch in text.chars() {
            if let Some(glyph_id) = self.font.lookup_glyph_index(ch as u32) {
                let advance = self.font.get_horizontal_advance(glyph_id);
                width += (advance as f32 / 1000.0) * size_pt;
            }
        }
        width
    }
}

/// Greedy word wrap: pack words onto a line while the rendered width stays
/// within `max_width`, overflow starts a new line. A single word wider than
/// the budget occupies its own line untruncated; there is no character-level
/// breaking.
pub fn wrap_words<F>(text: &str, max_width: f32, measure: F) -> Vec<String>
where
    F: Fn(&str) -> f32,
{
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        if line.is_empty() {
            line = word.to_string();
            continue;
        }
        let candidate = format!("{line} {word}");
        if measure(&candidate) <= max_width {
            line = candidate;
        } else {
            lines.push(line);
            line = word.to_string();
        }
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

/// Parse a `#RRGGBB` (or bare `RRGGBB`) color into unit-range RGB. Invalid
/// input yields `None`; callers fall back to black rather than failing.
pub fn parse_hex_color(value: &str) -> Option<(f32, f32, f32)> {
    let hex = value.trim();
    let hex = hex.strip_prefix('#').unwrap_or(hex);
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let packed = u32::from_str_radix(hex, 16).ok()?;
    Some((
        ((packed >> 16) & 0xff) as f32 / 255.0,
        ((packed >> 8) & 0xff) as f32 / 255.0,
        (packed & 0xff) as f32 / 255.0,
    ))
}
