use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of emergencies the service gives guidance for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmergencyType {
    Fire,
    Flood,
    Earthquake,
}

impl EmergencyType {
    pub const ALL: [EmergencyType; 3] = [
        EmergencyType::Fire,
        EmergencyType::Flood,
        EmergencyType::Earthquake,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EmergencyType::Fire => "fire",
            EmergencyType::Flood => "flood",
            EmergencyType::Earthquake => "earthquake",
        }
    }
}

impl fmt::Display for EmergencyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A caller's description of the emergency they are facing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmergencyInput {
    pub emergency_type: EmergencyType,
    pub immediate_danger: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_supported_types() {
        for (raw, expected) in [
            ("fire", EmergencyType::Fire),
            ("flood", EmergencyType::Flood),
            ("earthquake", EmergencyType::Earthquake),
        ] {
            let input: EmergencyInput = serde_json::from_value(json!({
                "emergency_type": raw,
                "immediate_danger": true
            }))
            .unwrap();
            assert_eq!(input.emergency_type, expected);
            assert_eq!(expected.to_string(), raw);
        }
    }

    #[test]
    fn rejects_unsupported_type() {
        let result = serde_json::from_value::<EmergencyInput>(json!({
            "emergency_type": "tsunami",
            "immediate_danger": false
        }));
        assert!(result.is_err());
    }

    #[test]
    fn rejects_non_boolean_danger() {
        let result = serde_json::from_value::<EmergencyInput>(json!({
            "emergency_type": "fire",
            "immediate_danger": "yes"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn ignores_unknown_fields() {
        let input: EmergencyInput = serde_json::from_value(json!({
            "emergency_type": "flood",
            "immediate_danger": false,
            "location": "basement"
        }))
        .unwrap();
        assert_eq!(input.emergency_type, EmergencyType::Flood);
        assert!(!input.immediate_danger);
    }
}
