//! Static plans served when the provider cannot produce a usable one.

use std::collections::HashMap;

use crate::models::{EmergencyPlan, EmergencyType};

/// Type-specific part of a fallback plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackEntry {
    pub immediate_actions: Vec<String>,
    pub do_not_do: Vec<String>,
    pub evacuation_decision: String,
}

impl FallbackEntry {
    fn new(actions: &[&str], avoid: &[&str], evacuation: &str) -> Self {
        Self {
            immediate_actions: actions.iter().map(|s| s.to_string()).collect(),
            do_not_do: avoid.iter().map(|s| s.to_string()).collect(),
            evacuation_decision: evacuation.to_string(),
        }
    }
}

/// Lookup from emergency type to curated guidance, with generic guidance for
/// any type the table has no entry for.
#[derive(Debug, Clone)]
pub struct FallbackTable {
    entries: HashMap<EmergencyType, FallbackEntry>,
    generic: FallbackEntry,
    escalation_guidance: String,
    safety_disclaimer: String,
}

pub const ESCALATION_GUIDANCE: &str = "If anyone is injured, trapped or in immediate danger, \
call your local emergency number (such as 911 or 112) right away and follow the \
dispatcher's instructions.";

pub const SAFETY_DISCLAIMER: &str = "This is general safety guidance, not professional or \
medical advice. Always follow instructions from emergency services and local authorities.";

impl FallbackTable {
    pub fn new(
        entries: HashMap<EmergencyType, FallbackEntry>,
        generic: FallbackEntry,
        escalation_guidance: impl Into<String>,
        safety_disclaimer: impl Into<String>,
    ) -> Self {
        Self {
            entries,
            generic,
            escalation_guidance: escalation_guidance.into(),
            safety_disclaimer: safety_disclaimer.into(),
        }
    }

    /// The curated table covering every supported emergency type.
    pub fn standard() -> Self {
        let mut entries = HashMap::new();

        entries.insert(
            EmergencyType::Fire,
            FallbackEntry::new(
                &[
                    "Alert everyone nearby and activate the nearest fire alarm",
                    "Exit via the nearest safe route, closing doors behind you",
                    "Stay low to the ground to avoid smoke",
                    "Call emergency services once you are safely outside",
                    "Go to your assembly point and account for everyone",
                ],
                &[
                    "Do not use elevators",
                    "Do not go back inside for belongings or pets",
                    "Do not open doors that feel hot to the touch",
                    "Do not try to fight a large or spreading fire",
                ],
                "Evacuate immediately using the nearest safe exit.",
            ),
        );

        entries.insert(
            EmergencyType::Flood,
            FallbackEntry::new(
                &[
                    "Move to higher ground immediately",
                    "Call emergency services if you or anyone else is trapped",
                    "Switch off electricity and gas at the mains if it is safe to do so",
                    "Follow evacuation orders and updates from local authorities",
                ],
                &[
                    "Do not walk, swim or drive through flood water",
                    "Do not touch electrical equipment while wet or standing in water",
                    "Do not return home until authorities say it is safe",
                ],
                "Evacuate to higher ground if water is rising or authorities order it; \
                 otherwise move to the highest floor.",
            ),
        );

        entries.insert(
            EmergencyType::Earthquake,
            FallbackEntry::new(
                &[
                    "Drop, cover and hold on until the shaking stops",
                    "Stay away from windows, glass and heavy furniture",
                    "Once the shaking stops, check yourself and others for injuries",
                    "Leave the building carefully if it is damaged and call emergency services",
                ],
                &[
                    "Do not run outside while the ground is shaking",
                    "Do not use elevators",
                    "Do not re-enter damaged buildings",
                    "Do not light matches or lighters in case of gas leaks",
                ],
                "Stay in place during shaking; evacuate once it stops if the building is \
                 damaged or you smell gas.",
            ),
        );

        Self::new(
            entries,
            FallbackEntry::new(
                &[
                    "Move away from the immediate hazard",
                    "Call emergency services",
                    "Follow instructions from local authorities",
                ],
                &[
                    "Do not take unnecessary risks",
                    "Do not ignore official warnings",
                ],
                "Evacuate if you are in danger or instructed to by authorities.",
            ),
            ESCALATION_GUIDANCE,
            SAFETY_DISCLAIMER,
        )
    }

    /// Build the complete fallback plan for `emergency_type`.
    pub fn plan_for(&self, emergency_type: EmergencyType) -> EmergencyPlan {
        let entry = self.entries.get(&emergency_type).unwrap_or(&self.generic);

        EmergencyPlan {
            immediate_actions: entry.immediate_actions.clone(),
            do_not_do: entry.do_not_do.clone(),
            evacuation_decision: entry.evacuation_decision.clone(),
            escalation_guidance: self.escalation_guidance.clone(),
            safety_disclaimer: self.safety_disclaimer.clone(),
        }
    }
}

impl Default for FallbackTable {
    fn default() -> Self {
        Self::standard()
    }
}
