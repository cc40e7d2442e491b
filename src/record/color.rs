//! Color identity types
//!
//! A commander's color identity is a duplicate-free sequence drawn from the
//! five colors. The sequence keeps the order it was parsed in; comparisons
//! between identities go through [`ColorIdentity::canonical`], which reorders
//! into WUBRG order.

use super::error::RecordError;
use std::fmt;

/// One of the five colors of Magic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Color {
    White,
    Blue,
    Black,
    Red,
    Green,
}

impl Color {
    /// All colors in WUBRG order
    pub const ALL: [Self; 5] = [Self::White, Self::Blue, Self::Black, Self::Red, Self::Green];

    /// Parse a single color symbol (case-insensitive)
    ///
    /// # Errors
    ///
    /// Returns `RecordError::UnknownColor` for anything but W, U, B, R or G.
    pub fn from_symbol(symbol: char) -> Result<Self, RecordError> {
        match symbol.to_ascii_uppercase() {
            'W' => Ok(Self::White),
            'U' => Ok(Self::Blue),
            'B' => Ok(Self::Black),
            'R' => Ok(Self::Red),
            'G' => Ok(Self::Green),
            _ => Err(RecordError::UnknownColor(symbol)),
        }
    }

    /// Single-letter symbol
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::White => 'W',
            Self::Blue => 'U',
            Self::Black => 'B',
            Self::Red => 'R',
            Self::Green => 'G',
        }
    }

    /// Human-readable color name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::White => "White",
            Self::Blue => "Blue",
            Self::Black => "Black",
            Self::Red => "Red",
            Self::Green => "Green",
        }
    }
}

/// Ordered, duplicate-free set of colors
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ColorIdentity(Vec<Color>);

impl ColorIdentity {
    /// The empty (colorless) identity
    #[must_use]
    pub const fn colorless() -> Self {
        Self(Vec::new())
    }

    /// Parse a symbol string such as `"WUB"`
    ///
    /// Whitespace is ignored and symbols are case-insensitive.
    ///
    /// # Errors
    ///
    /// Returns `RecordError::UnknownColor` for symbols outside WUBRG and
    /// `RecordError::DuplicateColor` when a color appears twice.
    pub fn parse(symbols: &str) -> Result<Self, RecordError> {
        let mut colors = Vec::with_capacity(5);
        for symbol in symbols.chars().filter(|c| !c.is_whitespace()) {
            let color = Color::from_symbol(symbol)?;
            if colors.contains(&color) {
                return Err(RecordError::DuplicateColor(color.symbol()));
            }
            colors.push(color);
        }
        Ok(Self(colors))
    }

    #[must_use]
    pub fn colors(&self) -> &[Color] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Symbols in stored order, e.g. `"UW"`
    #[must_use]
    pub fn symbols(&self) -> String {
        self.0.iter().map(|c| c.symbol()).collect()
    }

    /// The same identity reordered into WUBRG order
    #[must_use]
    pub fn canonical(&self) -> Self {
        let mut colors = self.0.clone();
        colors.sort_unstable();
        Self(colors)
    }

    /// "Colorless", a single color name, or color names joined with ", "
    #[must_use]
    pub fn description(&self) -> String {
        if self.0.is_empty() {
            return "Colorless".to_string();
        }
        self.0.iter().map(|c| c.name()).collect::<Vec<_>>().join(", ")
    }

    /// Conventional name of this color combination
    ///
    /// Covers all 32 combinations, so this never falls through for a valid
    /// identity.
    #[must_use]
    pub fn combination_name(&self) -> &'static str {
        match self.canonical().symbols().as_str() {
            "" => "Colorless",
            "W" => "White",
            "U" => "Blue",
            "B" => "Black",
            "R" => "Red",
            "G" => "Green",
            "WU" => "Azorius (W/U)",
            "WB" => "Orzhov (W/B)",
            "WR" => "Boros (W/R)",
            "WG" => "Selesnya (W/G)",
            "UB" => "Dimir (U/B)",
            "UR" => "Izzet (U/R)",
            "UG" => "Simic (U/G)",
            "BR" => "Rakdos (B/R)",
            "BG" => "Golgari (B/G)",
            "RG" => "Gruul (R/G)",
            "WUB" => "Esper (W/U/B)",
            "WUR" => "Jeskai (W/U/R)",
            "WUG" => "Bant (W/U/G)",
            "WBR" => "Mardu (W/B/R)",
            "WBG" => "Abzan (W/B/G)",
            "WRG" => "Naya (W/R/G)",
            "UBR" => "Grixis (U/B/R)",
            "UBG" => "Sultai (U/B/G)",
            "URG" => "Temur (U/R/G)",
            "BRG" => "Jund (B/R/G)",
            "WUBR" => "Four-Color (No Green)",
            "WUBG" => "Four-Color (No Red)",
            "WURG" => "Four-Color (No Black)",
            "WBRG" => "Four-Color (No Blue)",
            "UBRG" => "Four-Color (No White)",
            _ => "Five-Color (WUBRG)",
        }
    }
}

impl fmt::Display for ColorIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.symbols())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keeps_order() {
        let identity = ColorIdentity::parse("ub").unwrap();
        assert_eq!(identity.colors(), &[Color::Blue, Color::Black]);
        assert_eq!(identity.symbols(), "UB");
    }

    #[test]
    fn test_parse_rejects_duplicates_and_unknowns() {
        assert_eq!(ColorIdentity::parse("WW"), Err(RecordError::DuplicateColor('W')));
        assert_eq!(ColorIdentity::parse("WX"), Err(RecordError::UnknownColor('X')));
    }

    #[test]
    fn test_empty_is_colorless() {
        let identity = ColorIdentity::parse("").unwrap();
        assert!(identity.is_empty());
        assert_eq!(identity.description(), "Colorless");
        assert_eq!(identity.combination_name(), "Colorless");
    }

    #[test]
    fn test_description() {
        assert_eq!(ColorIdentity::parse("G").unwrap().description(), "Green");
        assert_eq!(
            ColorIdentity::parse("WUBG").unwrap().description(),
            "White, Blue, Black, Green"
        );
    }

    #[test]
    fn test_combination_name_uses_canonical_order() {
        assert_eq!(ColorIdentity::parse("UW").unwrap().combination_name(), "Azorius (W/U)");
        assert_eq!(ColorIdentity::parse("GRB").unwrap().combination_name(), "Jund (B/R/G)");
        assert_eq!(
            ColorIdentity::parse("GWRBU").unwrap().combination_name(),
            "Five-Color (WUBRG)"
        );
    }

    #[test]
    fn test_all_colors_in_wubrg_order() {
        let symbols: String = Color::ALL.iter().map(|c| c.symbol()).collect();
        assert_eq!(symbols, "WUBRG");
    }
}
