use serde::{Deserialize, Serialize};

/// Standard resources a participant holds and produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Resource {
    MegaCredits,
    Steel,
    Titanium,
    Plants,
    Energy,
    Heat,
}

impl Resource {
    pub const ALL: [Resource; 6] = [
        Resource::MegaCredits,
        Resource::Steel,
        Resource::Titanium,
        Resource::Plants,
        Resource::Energy,
        Resource::Heat,
    ];

    /// Lowest production level allowed. Megacredit production may go negative.
    pub const fn minimum_production(self) -> i32 {
        match self {
            Resource::MegaCredits => -5,
            _ => 0,
        }
    }
}

/// Card tags counted by requirements and reactive effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Tag {
    Building,
    Space,
    Science,
    Power,
    Earth,
    Jovian,
    Plant,
    Microbe,
    Animal,
    City,
    Event,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CardType {
    Automated,
    Active,
    Event,
    Corporation,
    Prelude,
}

impl CardType {
    /// Whether cards of this type are shuffled into the project deck.
    pub const fn is_project(self) -> bool {
        matches!(self, CardType::Automated | CardType::Active | CardType::Event)
    }
}

/// Resources that live on cards rather than on the participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CardResource {
    Animal,
    Microbe,
    Floater,
    Science,
}
