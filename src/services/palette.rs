//! Subject color assignment
//!
//! Each assigner owns its palettes and memo table, so several grids with
//! different palettes can coexist.

use std::collections::HashMap;

use crate::types::{ColorPair, EventKind, Rgb};

/// Luminance above which text is drawn black
const LIGHT_BACKGROUND_LUMINANCE: f64 = 0.6;

/// Pastel palette for lectures and other non-lab meetings
pub const SUBJECT_PALETTE: [Rgb; 18] = [
    Rgb::new(0xAE, 0xC6, 0xCF), // pastel blue
    Rgb::new(0xFF, 0xB3, 0xBA), // pastel pink
    Rgb::new(0xFF, 0xDF, 0xBA), // peach
    Rgb::new(0xFF, 0xFF, 0xBA), // pastel yellow
    Rgb::new(0xBF, 0xFC, 0xC6), // pastel green
    Rgb::new(0xCD, 0xE7, 0xFF), // baby blue
    Rgb::new(0xE4, 0xC1, 0xF9), // lavender
    Rgb::new(0xF1, 0xCB, 0xFF), // mauve
    Rgb::new(0xFD, 0xE2, 0xE4), // rose
    Rgb::new(0xE2, 0xF0, 0xCB), // light green
    Rgb::new(0xFB, 0xE7, 0xC6), // apricot
    Rgb::new(0xD7, 0xE3, 0xFC), // periwinkle
    Rgb::new(0xD4, 0xF0, 0xF0), // powder
    Rgb::new(0xF6, 0xEA, 0xC2), // sand
    Rgb::new(0xFF, 0xD6, 0xE0), // light pink
    Rgb::new(0xC1, 0xF9, 0xE4), // mint
    Rgb::new(0xC9, 0xC0, 0xFF), // light purple
    Rgb::new(0xBF, 0xD1, 0xFF), // soft blue
];

/// Stronger palette reserved for laboratory meetings
pub const LAB_PALETTE: [Rgb; 15] = [
    Rgb::new(0xFF, 0x6B, 0x6B), // red
    Rgb::new(0x4E, 0xCD, 0xC4), // teal
    Rgb::new(0x45, 0xB7, 0xD1), // bright blue
    Rgb::new(0x96, 0xCE, 0xB4), // mint green
    Rgb::new(0xFF, 0xEA, 0xA7), // golden yellow
    Rgb::new(0xDD, 0xA0, 0xDD), // orchid
    Rgb::new(0x98, 0xD8, 0xC8), // turquoise
    Rgb::new(0xF7, 0xDC, 0x6F), // bright yellow
    Rgb::new(0xBB, 0x8F, 0xCE), // purple
    Rgb::new(0x85, 0xC1, 0xE9), // light blue
    Rgb::new(0xF8, 0xC4, 0x71), // orange
    Rgb::new(0x82, 0xE0, 0xAA), // light green
    Rgb::new(0xF1, 0x94, 0x8A), // salmon
    Rgb::new(0x85, 0xC1, 0xE9), // sky blue
    Rgb::new(0xD7, 0xBD, 0xE2), // lilac
];

/// Which palette a meeting draws from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaletteKind {
    Lab,
    Subject,
}

impl From<&EventKind> for PaletteKind {
    fn from(kind: &EventKind) -> Self {
        if kind.is_lab() {
            Self::Lab
        } else {
            Self::Subject
        }
    }
}

/// Stable non-negative string hash: 32-bit wrapping `h * 31 + c` over UTF-16
/// code units, taken as an absolute value.
pub fn subject_hash(code: &str) -> u32 {
    let hash = code
        .encode_utf16()
        .fold(0i32, |h, unit| h.wrapping_mul(31).wrapping_add(unit as i32));
    hash.unsigned_abs()
}

/// Black text on light backgrounds, white otherwise
pub fn foreground_for(background: Rgb) -> Rgb {
    if background.luminance() > LIGHT_BACKGROUND_LUMINANCE {
        Rgb::BLACK
    } else {
        Rgb::WHITE
    }
}

/// Deterministic, memoized subject → color mapping
#[derive(Debug, Clone)]
pub struct ColorAssigner {
    subject_palette: Vec<Rgb>,
    lab_palette: Vec<Rgb>,
    cache: HashMap<(String, PaletteKind), ColorPair>,
}

impl ColorAssigner {
    /// Assigner over custom palettes. An empty palette falls back to the
    /// built-in one of the same kind.
    pub fn new(subject_palette: Vec<Rgb>, lab_palette: Vec<Rgb>) -> Self {
        let subject_palette = if subject_palette.is_empty() {
            SUBJECT_PALETTE.to_vec()
        } else {
            subject_palette
        };
        let lab_palette = if lab_palette.is_empty() {
            LAB_PALETTE.to_vec()
        } else {
            lab_palette
        };
        Self {
            subject_palette,
            lab_palette,
            cache: HashMap::new(),
        }
    }

    pub fn color_for(&mut self, subject_code: &str, kind: &EventKind) -> ColorPair {
        let palette_kind = PaletteKind::from(kind);
        if let Some(pair) = self.cache.get(&(subject_code.to_string(), palette_kind)) {
            return *pair;
        }

        let palette = match palette_kind {
            PaletteKind::Lab => &self.lab_palette,
            PaletteKind::Subject => &self.subject_palette,
        };
        let background = palette[subject_hash(subject_code) as usize % palette.len()];
        let pair = ColorPair {
            background,
            foreground: foreground_for(background),
        };
        self.cache
            .insert((subject_code.to_string(), palette_kind), pair);
        pair
    }

    /// Number of memoized pairs
    pub fn cached(&self) -> usize {
        self.cache.len()
    }
}

impl Default for ColorAssigner {
    fn default() -> Self {
        Self::new(SUBJECT_PALETTE.to_vec(), LAB_PALETTE.to_vec())
    }
}
