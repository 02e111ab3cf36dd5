//! Typed model of the game-balance database tables.
//!
//! The host loads these tables from JSON; field names on the wire follow the
//! game's conventions (`_id`, `_props`, `buy_price_coef`, PascalCase globals)
//! and are mapped onto snake_case Rust fields via serde renames. Every record
//! carries a `#[serde(flatten)]` extras map so the many fields this crate
//! never touches survive a load/patch/store round-trip untouched.
//!
//! Optional fields are modelled as `Option`: an item template without
//! `_props` is an abstract parent row and must be skippable without error.
//! The engine never replaces a top-level table, only mutates fields in place.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub mod configs;

pub use configs::ServerConfigs;

/// Catch-all for JSON fields this crate does not model.
pub type ExtraFields = serde_json::Map<String, serde_json::Value>;

/// Reward entry type for experience grants.
pub const REWARD_EXPERIENCE: &str = "Experience";
/// Reward entry type for trader reputation changes.
pub const REWARD_TRADER_STANDING: &str = "TraderStanding";

/// The loaded database tables, as handed over by the host after its own
/// load phase. `items`, `globals` and `quests` are required by the engine;
/// their absence is a structural precondition failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatabaseTables {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<HashMap<String, ItemTemplate>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub globals: Option<Globals>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quests: Option<HashMap<String, QuestTemplate>>,
    #[serde(default)]
    pub traders: HashMap<String, TraderRecord>,
}

/// Three-axis vector used by several tuning fields. Axes are mutated
/// independently; only x and y carry meaning for most limits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

// ---------------------------------------------------------------------------
// Items
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemTemplate {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(rename = "_name", default)]
    pub name: String,
    /// Absent on abstract parent rows.
    #[serde(rename = "_props", default, skip_serializing_if = "Option::is_none")]
    pub props: Option<ItemProps>,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl ItemTemplate {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            props: Some(ItemProps::default()),
            extra: ExtraFields::new(),
        }
    }

    /// Abstract parent row: no properties, skipped by every item rule.
    pub fn abstract_parent(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            props: None,
            extra: ExtraFields::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemProps {
    #[serde(rename = "Name", default)]
    pub name: String,
    #[serde(rename = "Slots", default, skip_serializing_if = "Option::is_none")]
    pub slots: Option<Vec<ItemSlot>>,
    #[serde(rename = "BlocksEarpiece", default)]
    pub blocks_earpiece: bool,
    #[serde(rename = "BlocksEyewear", default)]
    pub blocks_eyewear: bool,
    #[serde(rename = "BlocksHeadwear", default)]
    pub blocks_headwear: bool,
    #[serde(rename = "BlocksFaceCover", default)]
    pub blocks_face_cover: bool,
    #[serde(rename = "BlocksArmorVest", default)]
    pub blocks_armor_vest: bool,
    #[serde(rename = "mousePenalty", default)]
    pub mouse_penalty: f64,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemSlot {
    #[serde(rename = "_name", default)]
    pub name: String,
    #[serde(rename = "_props", default)]
    pub props: SlotProps,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl ItemSlot {
    pub fn with_filter(filter: SlotFilter) -> Self {
        Self {
            name: String::new(),
            props: SlotProps {
                filters: Some(vec![filter]),
                extra: ExtraFields::new(),
            },
            extra: ExtraFields::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SlotProps {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filters: Option<Vec<SlotFilter>>,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SlotFilter {
    /// Named body-zone strings this armor piece protects. Empty or absent
    /// filters do not participate in zone propagation.
    #[serde(
        rename = "armorColliders",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub armor_colliders: Option<Vec<String>>,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl SlotFilter {
    pub fn with_colliders(zones: &[&str]) -> Self {
        Self {
            armor_colliders: Some(zones.iter().map(|z| z.to_string()).collect()),
            extra: ExtraFields::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Quests
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuestTemplate {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(rename = "QuestName", default)]
    pub quest_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rewards: Option<QuestRewards>,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl QuestTemplate {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            quest_name: name.to_string(),
            rewards: None,
            extra: ExtraFields::new(),
        }
    }

    pub fn with_success_rewards(mut self, rewards: Vec<QuestReward>) -> Self {
        self.rewards = Some(QuestRewards {
            success: Some(rewards),
            extra: ExtraFields::new(),
        });
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuestRewards {
    #[serde(rename = "Success", default, skip_serializing_if = "Option::is_none")]
    pub success: Option<Vec<QuestReward>>,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuestReward {
    #[serde(rename = "type", default)]
    pub reward_type: String,
    #[serde(default)]
    pub value: f64,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl QuestReward {
    pub fn new(reward_type: &str, value: f64) -> Self {
        Self {
            reward_type: reward_type.to_string(),
            value,
            extra: ExtraFields::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Traders
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TraderRecord {
    #[serde(default)]
    pub base: TraderBase,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl TraderRecord {
    pub fn new(nickname: &str, loyalty_coefficients: &[f64]) -> Self {
        Self {
            base: TraderBase {
                nickname: nickname.to_string(),
                loyalty_levels: loyalty_coefficients
                    .iter()
                    .map(|c| LoyaltyLevel {
                        buy_price_coef: *c,
                        extra: ExtraFields::new(),
                    })
                    .collect(),
                insurance: TraderInsurance::default(),
                extra: ExtraFields::new(),
            },
            extra: ExtraFields::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TraderBase {
    #[serde(default)]
    pub nickname: String,
    #[serde(rename = "loyaltyLevels", default)]
    pub loyalty_levels: Vec<LoyaltyLevel>,
    #[serde(default)]
    pub insurance: TraderInsurance,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoyaltyLevel {
    #[serde(default)]
    pub buy_price_coef: f64,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TraderInsurance {
    #[serde(default)]
    pub min_return_hour: i64,
    #[serde(default)]
    pub max_return_hour: i64,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

// ---------------------------------------------------------------------------
// Globals
// ---------------------------------------------------------------------------

/// Global tuning constants. Only the blocks the engine touches are typed;
/// everything else rides in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Globals {
    #[serde(rename = "Health", default)]
    pub health: HealthSettings,
    #[serde(rename = "Inertia", default)]
    pub inertia: InertiaSettings,
    #[serde(rename = "Stamina", default)]
    pub stamina: StaminaSettings,
    #[serde(rename = "RagFair", default)]
    pub rag_fair: RagFairSettings,
    #[serde(rename = "Insurance", default)]
    pub insurance: InsuranceSettings,
    #[serde(rename = "SkillsSettings", default)]
    pub skills_settings: SkillsSettings,
    #[serde(rename = "SkillMinEffectiveness", default)]
    pub skill_min_effectiveness: f64,
    #[serde(rename = "SkillFatiguePerPoint", default)]
    pub skill_fatigue_per_point: f64,
    #[serde(rename = "SkillFreshEffectiveness", default)]
    pub skill_fresh_effectiveness: f64,
    #[serde(rename = "SkillFreshPoints", default)]
    pub skill_fresh_points: f64,
    #[serde(rename = "SkillPointsBeforeFatigue", default)]
    pub skill_points_before_fatigue: f64,
    #[serde(rename = "SkillFatigueReset", default)]
    pub skill_fatigue_reset: f64,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HealthSettings {
    #[serde(rename = "Effects", default)]
    pub effects: HealthEffects,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HealthEffects {
    #[serde(rename = "Stimulator", default)]
    pub stimulator: StimulatorEffects,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StimulatorEffects {
    /// Buff name -> timed effect sequence.
    #[serde(rename = "Buffs", default)]
    pub buffs: HashMap<String, Vec<BuffEffect>>,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

/// One timed stat modifier of a stimulant buff. Positive values are buffs,
/// non-positive values debuffs; duration scaling is sign-dependent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BuffEffect {
    #[serde(rename = "Value", default)]
    pub value: f64,
    #[serde(rename = "Duration", default)]
    pub duration: f64,
    #[serde(rename = "Delay", default)]
    pub delay: f64,
    #[serde(rename = "Chance", default)]
    pub chance: f64,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl BuffEffect {
    pub fn new(value: f64, duration: f64) -> Self {
        Self {
            value,
            duration,
            delay: 0.0,
            chance: 1.0,
            extra: ExtraFields::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct InertiaSettings {
    #[serde(default)]
    pub base_jump_penalty: f64,
    #[serde(default)]
    pub base_jump_penalty_duration: f64,
    #[serde(default)]
    pub min_direction_blend_time: f64,
    #[serde(default)]
    pub crouch_speed_acceleration_range: Vector3,
    #[serde(default)]
    pub exit_movement_state_speed_threshold: Vector3,
    #[serde(default)]
    pub inertia_limits_step: f64,
    #[serde(default)]
    pub max_time_without_input: Vector3,
    #[serde(default)]
    pub penalty_power: f64,
    #[serde(default)]
    pub side_time: Vector3,
    #[serde(default)]
    pub pre_sprint_acceleration_limits: Vector3,
    #[serde(default)]
    pub sprint_acceleration_limits: Vector3,
    #[serde(default)]
    pub sprint_brake_inertia: Vector3,
    #[serde(default)]
    pub sprint_transition_motion_preservation: Vector3,
    #[serde(default)]
    pub walk_inertia: Vector3,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StaminaSettings {
    #[serde(default)]
    pub capacity: f64,
    #[serde(default)]
    pub oxygen_capacity: f64,
    #[serde(default)]
    pub hands_capacity: f64,
    #[serde(default)]
    pub base_overweight_limits: Vector3,
    #[serde(default)]
    pub sprint_overweight_limits: Vector3,
    #[serde(default)]
    pub walk_overweight_limits: Vector3,
    #[serde(default)]
    pub walk_speed_overweight_limits: Vector3,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RagFairSettings {
    #[serde(default)]
    pub min_user_level: i64,
    /// Level-range-to-count table capping concurrent player listings.
    #[serde(default)]
    pub max_active_offer_count: Vec<OfferCountRange>,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct OfferCountRange {
    pub from: i64,
    pub to: i64,
    pub count: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InsuranceSettings {
    #[serde(rename = "MaxStorageTimeInHour", default)]
    pub max_storage_time_in_hour: f64,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SkillsSettings {
    #[serde(default)]
    pub skill_progress_rate: f64,
    #[serde(default)]
    pub weapon_skill_progress_rate: f64,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_template_wire_names() {
        let json = r#"{
            "_id": "item1",
            "_name": "helmet_test",
            "_props": {
                "Name": "Test Helmet",
                "BlocksEarpiece": true,
                "mousePenalty": -3.0,
                "Slots": [
                    {"_name": "top", "_props": {"filters": [{"armorColliders": ["ParietalHead"]}]}}
                ],
                "Weight": 1.2
            },
            "_parent": "armor"
        }"#;
        let item: ItemTemplate = serde_json::from_str(json).unwrap();
        assert_eq!(item.id, "item1");
        let props = item.props.as_ref().unwrap();
        assert!(props.blocks_earpiece);
        assert_eq!(props.mouse_penalty, -3.0);
        let filters = props.slots.as_ref().unwrap()[0].props.filters.as_ref().unwrap();
        assert_eq!(
            filters[0].armor_colliders.as_ref().unwrap(),
            &vec!["ParietalHead".to_string()]
        );
        // Unmodelled fields land in the extras maps
        assert!(item.extra.contains_key("_parent"));
        assert!(props.extra.contains_key("Weight"));
    }

    #[test]
    fn item_without_props_deserializes() {
        let json = r#"{"_id": "parent1", "_name": "Item"}"#;
        let item: ItemTemplate = serde_json::from_str(json).unwrap();
        assert!(item.props.is_none());
    }

    #[test]
    fn globals_roundtrip_preserves_unknown_fields() {
        let json = r#"{
            "Stamina": {"Capacity": 100.0, "SprintDrainRate": 4.1},
            "RagFair": {"minUserLevel": 15, "maxActiveOfferCount": [{"from": 1, "to": 70, "count": 3}]},
            "ArmorMaterials": {"Glass": {}}
        }"#;
        let globals: Globals = serde_json::from_str(json).unwrap();
        assert_eq!(globals.stamina.capacity, 100.0);
        assert_eq!(globals.rag_fair.min_user_level, 15);
        assert_eq!(globals.rag_fair.max_active_offer_count[0].count, 3);
        assert!(globals.extra.contains_key("ArmorMaterials"));
        assert!(globals.stamina.extra.contains_key("SprintDrainRate"));

        let back = serde_json::to_value(&globals).unwrap();
        assert_eq!(back["Stamina"]["SprintDrainRate"], 4.1);
        assert_eq!(back["ArmorMaterials"]["Glass"], serde_json::json!({}));
    }

    #[test]
    fn trader_wire_names() {
        let json = r#"{
            "base": {
                "nickname": "Prapor",
                "loyaltyLevels": [{"buy_price_coef": 100.0}, {"buy_price_coef": 95.0}],
                "insurance": {"min_return_hour": 12, "max_return_hour": 24}
            }
        }"#;
        let trader: TraderRecord = serde_json::from_str(json).unwrap();
        assert_eq!(trader.base.nickname, "Prapor");
        assert_eq!(trader.base.loyalty_levels[1].buy_price_coef, 95.0);
        assert_eq!(trader.base.insurance.max_return_hour, 24);
    }

    #[test]
    fn quest_reward_type_field() {
        let json = r#"{
            "_id": "q1",
            "QuestName": "Debut",
            "rewards": {"Success": [{"type": "Experience", "value": 1700.0}]}
        }"#;
        let quest: QuestTemplate = serde_json::from_str(json).unwrap();
        let success = quest.rewards.unwrap().success.unwrap();
        assert_eq!(success[0].reward_type, REWARD_EXPERIENCE);
        assert_eq!(success[0].value, 1700.0);
    }

    #[test]
    fn missing_tables_default_to_none() {
        let tables: DatabaseTables = serde_json::from_str("{}").unwrap();
        assert!(tables.items.is_none());
        assert!(tables.globals.is_none());
        assert!(tables.quests.is_none());
        assert!(tables.traders.is_empty());
    }
}
