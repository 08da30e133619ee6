//! Game-balance base values. The engine never reads these itself; callers use
//! them to fill `CombatActionInput::base_value`.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::content::builtin_balances;
use crate::{BalanceError, ItemClass};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct BalanceConfig {
    #[serde(default = "default_regular_attack_base")]
    pub regular_attack_base: f64,
    #[serde(default = "default_special_attack_base")]
    pub special_attack_base: f64,
    #[serde(default = "default_boss_attack_base")]
    pub boss_attack_base: f64,
}

impl Default for BalanceConfig {
    fn default() -> Self {
        BalanceConfig {
            regular_attack_base: default_regular_attack_base(),
            special_attack_base: default_special_attack_base(),
            boss_attack_base: default_boss_attack_base(),
        }
    }
}

fn default_regular_attack_base() -> f64 {
    40.0
}
fn default_special_attack_base() -> f64 {
    50.0
}
fn default_boss_attack_base() -> f64 {
    15.0
}

impl BalanceConfig {
    /// Base damage of the player's attack item.
    pub fn attack_base(&self, item_class: ItemClass) -> f64 {
        match item_class {
            ItemClass::Regular => self.regular_attack_base,
            ItemClass::Special => self.special_attack_base,
        }
    }

    /// Base attack of the boss, used on defense turns.
    pub fn defense_base(&self) -> f64 {
        self.boss_attack_base
    }

    pub fn from_json_str(text: &str) -> Result<Self, BalanceError> {
        let cfg: BalanceConfig = serde_json::from_str(text)?;
        cfg.validate()
    }

    pub fn from_yaml_str(text: &str) -> Result<Self, BalanceError> {
        let cfg: BalanceConfig = serde_yaml::from_str(text)?;
        cfg.validate()
    }

    /// Picks the parser from the file extension; anything but `.yaml`/`.yml`
    /// is read as JSON.
    pub fn load(path: &Path) -> Result<Self, BalanceError> {
        let text = fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml" | "yml") => Self::from_yaml_str(&text),
            _ => Self::from_json_str(&text),
        }
    }

    pub fn builtin(name: &str) -> Result<Self, BalanceError> {
        let presets = builtin_balances();
        let text = presets
            .get(name)
            .ok_or_else(|| BalanceError::UnknownPreset(name.to_string()))?;
        if text.trim_start().starts_with('{') {
            Self::from_json_str(text)
        } else {
            Self::from_yaml_str(text)
        }
    }

    fn validate(self) -> Result<Self, BalanceError> {
        for (field, value) in [
            ("regular_attack_base", self.regular_attack_base),
            ("special_attack_base", self.special_attack_base),
            ("boss_attack_base", self.boss_attack_base),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(BalanceError::Invalid(format!(
                    "{} = {} (must be finite and >= 0)",
                    field, value
                )));
            }
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_standard_preset() {
        let standard = BalanceConfig::builtin("standard").unwrap();
        assert_eq!(standard, BalanceConfig::default());
        assert_eq!(standard.attack_base(ItemClass::Regular), 40.0);
        assert_eq!(standard.attack_base(ItemClass::Special), 50.0);
        assert_eq!(standard.defense_base(), 15.0);
    }

    #[test]
    fn hard_preset_is_yaml() {
        let hard = BalanceConfig::builtin("hard").unwrap();
        assert!(hard.defense_base() > BalanceConfig::default().defense_base());
    }

    #[test]
    fn missing_fields_fall_back() {
        let cfg = BalanceConfig::from_json_str(r#"{ "boss_attack_base": 20 }"#).unwrap();
        assert_eq!(cfg.boss_attack_base, 20.0);
        assert_eq!(cfg.regular_attack_base, 40.0);
    }

    #[test]
    fn negative_base_is_rejected() {
        let err = BalanceConfig::from_yaml_str("special_attack_base: -5").unwrap_err();
        assert!(matches!(err, BalanceError::Invalid(_)));
    }

    #[test]
    fn unknown_preset_errors() {
        assert!(matches!(
            BalanceConfig::builtin("nightmare"),
            Err(BalanceError::UnknownPreset(_))
        ));
    }
}
