//! Canonical card identifiers.
//!
//! Every card has two spellings: a stable kebab-case identifier used in
//! snapshots and payloads (`"food-factory"`), and the printed display name
//! (`"Food Factory"`). Older snapshots stored display names; the migration in
//! [`crate::snapshot`] maps them back through [`CardName::from_display_name`].

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

macro_rules! card_names {
    ($($variant:ident => ($id:literal, $display:literal),)*) => {
        /// Identifier of a card in the catalog.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum CardName {
            $($variant,)*
        }

        impl CardName {
            pub const ALL: &'static [CardName] = &[$(CardName::$variant,)*];

            /// Canonical identifier, as stored in snapshots and sent by clients.
            pub const fn id(self) -> &'static str {
                match self {
                    $(CardName::$variant => $id,)*
                }
            }

            /// Printed name.
            pub const fn display_name(self) -> &'static str {
                match self {
                    $(CardName::$variant => $display,)*
                }
            }
        }
    };
}

card_names! {
    AquiferTurbines => ("aquifer-turbines", "Aquifer Turbines"),
    ArtificialPhotosynthesis => ("artificial-photosynthesis", "Artificial Photosynthesis"),
    BusinessContacts => ("business-contacts", "Business Contacts"),
    ButterflyEffect => ("butterfly-effect", "Butterfly Effect"),
    DustSeals => ("dust-seals", "Dust Seals"),
    EarthElevator => ("earth-elevator", "Earth Elevator"),
    ExtremeColdFungus => ("extreme-cold-fungus", "Extreme-Cold Fungus"),
    Factorum => ("factorum", "Factorum"),
    Fish => ("fish", "Fish"),
    FloaterLeasing => ("floater-leasing", "Floater Leasing"),
    FoodFactory => ("food-factory", "Food Factory"),
    GeneRepair => ("gene-repair", "Gene Repair"),
    GhgProducingBacteria => ("ghg-producing-bacteria", "GHG Producing Bacteria"),
    Insulation => ("insulation", "Insulation"),
    IoMiningIndustries => ("io-mining-industries", "Io Mining Industries"),
    LagrangeObservatory => ("lagrange-observatory", "Lagrange Observatory"),
    LavaTubeSettlement => ("lava-tube-settlement", "Lava Tube Settlement"),
    LunarBeam => ("lunar-beam", "Lunar Beam"),
    MeatIndustry => ("meat-industry", "Meat Industry"),
    MetalRichAsteroid => ("metal-rich-asteroid", "Metal-Rich Asteroid"),
    MoholeExcavation => ("mohole-excavation", "Mohole Excavation"),
    PowerSupplyConsortium => ("power-supply-consortium", "Power Supply Consortium"),
    Psychrophiles => ("psychrophiles", "Psychrophiles"),
    SaturnSystems => ("saturn-systems", "Saturn Systems"),
    TharsisRepublic => ("tharsis-republic", "Tharsis Republic"),
}

impl CardName {
    /// Look up a canonical identifier.
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|name| name.id() == id)
    }

    /// Look up a printed name.
    pub fn from_display_name(display: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|name| name.display_name() == display)
    }

    /// Accept either spelling.
    pub fn parse(text: &str) -> Option<Self> {
        Self::from_id(text).or_else(|| Self::from_display_name(text))
    }
}

impl fmt::Display for CardName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl Serialize for CardName {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.id())
    }
}

impl<'de> Deserialize<'de> for CardName {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let id = String::deserialize(deserializer)?;
        CardName::from_id(&id)
            .ok_or_else(|| de::Error::custom(format!("unknown card identifier `{id}`")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_ids_and_display_names_are_unique() {
        let ids: HashSet<_> = CardName::ALL.iter().map(|c| c.id()).collect();
        let names: HashSet<_> = CardName::ALL.iter().map(|c| c.display_name()).collect();
        assert_eq!(ids.len(), CardName::ALL.len());
        assert_eq!(names.len(), CardName::ALL.len());
    }

    #[test]
    fn test_serializes_as_canonical_id() {
        let json = serde_json::to_string(&CardName::FoodFactory).unwrap();
        assert_eq!(json, "\"food-factory\"");
        let back: CardName = serde_json::from_str(&json).unwrap();
        assert_eq!(back, CardName::FoodFactory);
    }

    #[test]
    fn test_display_name_is_not_accepted_by_serde() {
        assert!(serde_json::from_str::<CardName>("\"Food Factory\"").is_err());
    }

    #[test]
    fn test_parse_accepts_either_spelling() {
        assert_eq!(
            CardName::parse("GHG Producing Bacteria"),
            Some(CardName::GhgProducingBacteria)
        );
        assert_eq!(
            CardName::parse("ghg-producing-bacteria"),
            Some(CardName::GhgProducingBacteria)
        );
        assert_eq!(CardName::parse("Nonexistent Card"), None);
    }
}
