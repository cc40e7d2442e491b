//! Card record data model
//!
//! A [`Record`] is one commander-legal card as the search engine sees it:
//! its name (the unique key), color identity, mana value, and partner
//! ability. Records are immutable once built; the only way to construct one
//! is [`Record::new`], which enforces the name invariant.

pub mod color;
pub mod error;
pub mod names;

pub use color::{Color, ColorIdentity};
pub use error::RecordError;
pub use names::{compose_pair, format_commander_name, is_partner_pair, partner_name, primary_name};

/// Partner name that means "has an unspecified partner ability"
pub const OPEN_PARTNER_SENTINEL: &str = "partner";

/// Partner ability of a commander
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum PartnerKind {
    /// No partner ability
    #[default]
    None,
    /// Generic "Partner": may pair with any other partner-eligible commander
    OpenPartner,
    /// "Partner with X": pairs with the named card
    FixedPartner(String),
}

impl PartnerKind {
    /// Build from the raw `has_partner` / `partner_with` fields of a dataset row
    ///
    /// A named partner wins over the flag. The sentinel name and a flagged
    /// row without a name both become [`PartnerKind::OpenPartner`].
    #[must_use]
    pub fn from_raw(has_partner: Option<bool>, partner_with: Option<&str>) -> Self {
        match partner_with.map(str::trim).filter(|p| !p.is_empty()) {
            Some(OPEN_PARTNER_SENTINEL) => Self::OpenPartner,
            Some(name) => Self::FixedPartner(name.to_string()),
            None if has_partner.unwrap_or(false) => Self::OpenPartner,
            None => Self::None,
        }
    }

    /// Whether the card has any partner ability
    #[must_use]
    pub const fn is_eligible(&self) -> bool {
        !matches!(self, Self::None)
    }

    /// The raw `partner_with` value this kind serializes to
    #[must_use]
    pub fn partner_with(&self) -> Option<&str> {
        match self {
            Self::None => None,
            Self::OpenPartner => Some(OPEN_PARTNER_SENTINEL),
            Self::FixedPartner(name) => Some(name),
        }
    }
}

/// A single commander card
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Record {
    name: String,
    colors: ColorIdentity,
    mana_value: u32,
    partner: PartnerKind,
}

impl Record {
    /// Create a record; the name is trimmed
    ///
    /// # Errors
    ///
    /// Returns `RecordError::EmptyName` if the trimmed name is empty.
    pub fn new(
        name: &str,
        colors: ColorIdentity,
        mana_value: u32,
        partner: PartnerKind,
    ) -> Result<Self, RecordError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(RecordError::EmptyName);
        }

        Ok(Self {
            name: name.to_string(),
            colors,
            mana_value,
            partner,
        })
    }

    /// Create a colorless, zero-cost record with no partner
    ///
    /// Used for name-only datasets.
    ///
    /// # Errors
    ///
    /// Returns `RecordError::EmptyName` if the trimmed name is empty.
    pub fn name_only(name: &str) -> Result<Self, RecordError> {
        Self::new(name, ColorIdentity::colorless(), 0, PartnerKind::None)
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn colors(&self) -> &ColorIdentity {
        &self.colors
    }

    #[must_use]
    pub const fn mana_value(&self) -> u32 {
        self.mana_value
    }

    #[must_use]
    pub const fn partner(&self) -> &PartnerKind {
        &self.partner
    }

    /// Uppercased first character of the name, the letter-index key
    #[must_use]
    pub fn index_letter(&self) -> String {
        index_letter(&self.name).unwrap_or_default()
    }
}

/// Uppercased first character of `value`, or `None` when it is empty
///
/// Some characters uppercase to more than one (`ß` → `SS`), so the key is a
/// string rather than a `char`.
#[must_use]
pub fn index_letter(value: &str) -> Option<String> {
    value.chars().next().map(|c| c.to_uppercase().collect())
}
