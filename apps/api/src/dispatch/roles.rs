//! The closed expert-role vocabulary.
//!
//! Roles are a fixed, two-element enumeration defined at compile time; an
//! invalid role is unrepresentable. A bad wire tag is rejected by serde at
//! the HTTP boundary instead.

use serde::{Deserialize, Serialize};

use crate::dispatch::prompts::{MARKETING_STRATEGIST_SYSTEM, SOFTWARE_ARCHITECT_SYSTEM};

/// Which expert answers the consultation. Selects the system instruction
/// sent with the completion request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    MarketingStrategist,
    SoftwareArchitect,
}

impl Role {
    /// Every member of the closed enumeration, in display order.
    pub const ALL: &'static [Role] = &[Role::MarketingStrategist, Role::SoftwareArchitect];

    /// Display label shown in the role picker.
    pub fn label(&self) -> &'static str {
        match self {
            Role::MarketingStrategist => "マーケ戦略家",
            Role::SoftwareArchitect => "ソフトウェア設計者",
        }
    }

    /// The fixed instruction table, keyed by role. Total over the enum.
    pub fn system_prompt(&self) -> &'static str {
        match self {
            Role::MarketingStrategist => MARKETING_STRATEGIST_SYSTEM,
            Role::SoftwareArchitect => SOFTWARE_ARCHITECT_SYSTEM,
        }
    }
}
