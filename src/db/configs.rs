//! Host server configuration sections consumed by the mutation engine.
//!
//! The host exposes these as named lookups (`quest`, `repair`, `trader`,
//! `insurance`); here they are typed fields on [`ServerConfigs`] so a missing
//! section is a compile-time impossibility rather than a runtime surprise.
//! Like the database tables, unmodelled keys ride in flatten maps.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::ExtraFields;

/// Position of the daily category in the repeatable quest sequence.
pub const REPEATABLE_DAILY: usize = 0;
/// Position of the weekly category.
pub const REPEATABLE_WEEKLY: usize = 1;
/// Position of the scavenger category.
pub const REPEATABLE_SCAV: usize = 2;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfigs {
    pub quest: QuestSection,
    pub repair: RepairSection,
    pub trader: TraderSection,
    pub insurance: InsuranceSection,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuestSection {
    /// Fixed-order sequence: daily, weekly, scavenger.
    #[serde(rename = "repeatableQuests", default)]
    pub repeatable_quests: Vec<RepeatableQuestSettings>,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RepeatableQuestSettings {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "numQuests", default)]
    pub num_quests: i64,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl RepeatableQuestSettings {
    pub fn new(name: &str, num_quests: i64) -> Self {
        Self {
            name: name.to_string(),
            num_quests,
            extra: ExtraFields::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RepairSection {
    #[serde(rename = "maxIntellectGainPerRepair", default)]
    pub max_intellect_gain_per_repair: IntellectGain,
    #[serde(rename = "armorKitSkillPointGainPerRepairPointMultiplier", default)]
    pub armor_kit_skill_point_gain_per_repair_point_multiplier: f64,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IntellectGain {
    #[serde(default)]
    pub kit: f64,
    #[serde(default)]
    pub trader: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TraderSection {
    #[serde(rename = "purchasesAreFoundInRaid", default)]
    pub purchases_are_found_in_raid: bool,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InsuranceSection {
    /// Premium multiplier keyed by trader id.
    #[serde(rename = "insuranceMultiplier", default)]
    pub insurance_multiplier: HashMap<String, f64>,
    /// Return chance percentage keyed by trader id.
    #[serde(rename = "returnChancePercent", default)]
    pub return_chance_percent: HashMap<String, f64>,
    #[serde(flatten)]
    pub extra: ExtraFields,
}
