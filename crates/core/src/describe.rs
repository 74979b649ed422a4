//! Description strings for closed enumerations
//!
//! Each enum that round-trips through configuration or JSON carries an
//! explicit table from variant to its canonical description. Lookups by
//! description compare case-insensitively.

/// An enumeration with a canonical description per variant
pub trait Described: Sized + Copy + PartialEq + 'static {
    /// Every variant paired with its description
    const DESCRIPTIONS: &'static [(Self, &'static str)];

    /// Description of this variant
    fn description(&self) -> &'static str {
        Self::DESCRIPTIONS
            .iter()
            .find(|(variant, _)| variant == self)
            .map(|(_, description)| *description)
            .unwrap_or_default()
    }

    /// Find the variant whose description matches, ignoring case
    fn from_description(value: &str) -> Option<Self> {
        Self::DESCRIPTIONS
            .iter()
            .find(|(_, description)| description.eq_ignore_ascii_case(value))
            .map(|(variant, _)| *variant)
    }

    /// All variants in table order
    fn variants() -> impl Iterator<Item = Self> {
        Self::DESCRIPTIONS.iter().map(|(variant, _)| *variant)
    }
}
