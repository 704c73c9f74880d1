#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteColor {
    pub name: &'static str,
    /// Upper-case `#RRGGBB`.
    pub hex: &'static str,
    pub positive: &'static [&'static str],
    pub negative: &'static [&'static str],
}

pub const PALETTE: &[PaletteColor] = &[
    PaletteColor {
        name: "Red",
        hex: "#EF4444",
        positive: &["love", "passion", "energy", "excitement", "strength", "warmth"],
        negative: &["anger", "rage", "danger", "aggression", "stress", "tension"],
    },
    PaletteColor {
        name: "Orange",
        hex: "#F97316",
        positive: &["creativity", "enthusiasm", "joy", "determination", "encouragement"],
        negative: &["frustration", "impatience", "superficiality", "pessimism"],
    },
    PaletteColor {
        name: "Yellow",
        hex: "#EAB308",
        positive: &["happiness", "optimism", "confidence", "clarity", "warmth", "sunshine"],
        negative: &["anxiety", "fear", "caution", "cowardice", "criticism"],
    },
    PaletteColor {
        name: "Green",
        hex: "#22C55E",
        positive: &["growth", "harmony", "health", "nature", "peace", "balance", "renewal"],
        negative: &["envy", "jealousy", "materialism", "stagnation", "boredom"],
    },
    PaletteColor {
        name: "Blue",
        hex: "#3B82F6",
        positive: &["trust", "loyalty", "wisdom", "confidence", "faith", "truth", "tranquility"],
        negative: &["sadness", "depression", "coldness", "passivity", "loneliness"],
    },
    PaletteColor {
        name: "Purple",
        hex: "#A855F7",
        positive: &["creativity", "wisdom", "dignity", "independence", "mystery", "magic"],
        negative: &["decadence", "excess", "moodiness", "introspection", "suppression"],
    },
];

pub fn lookup_name(name: &str) -> Option<&'static PaletteColor> {
    let name = name.trim();
    PALETTE.iter().find(|color| color.name.eq_ignore_ascii_case(name))
}

pub fn name_for_hex(hex: &str) -> Option<&'static str> {
    let hex = hex.trim();
    PALETTE
        .iter()
        .find(|color| color.hex.eq_ignore_ascii_case(hex))
        .map(|color| color.name)
}

pub fn is_allowed(hex: &str) -> bool {
    name_for_hex(hex).is_some()
}

/// Returns the upper-cased `#RRGGBB` form, or `None` if `value` is not a
/// six digit hex color.
pub fn canonical_hex(value: &str) -> Option<String> {
    let digits = value.trim().strip_prefix('#')?;
    if digits.len() != 6 || !digits.chars().all(|ch| ch.is_ascii_hexdigit()) {
        return None;
    }
    Some(format!("#{}", digits.to_ascii_uppercase()))
}
