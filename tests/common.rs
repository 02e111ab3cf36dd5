//! Test utilities & fixtures.
//! Builds a miniature database snapshot in the host's JSON wire format so
//! the integration tests exercise the serde mapping the same way a real
//! load does.

#![allow(dead_code)] // Each test binary pulls only the fixtures it needs.

use rebalance::db::configs::ServerConfigs;
use rebalance::db::DatabaseTables;
use serde_json::{json, Value};

/// One of the two insurance traders (wire id).
pub const PRAPOR_ID: &str = "54cb50c76803fa8b248b4571";

/// A small but structurally complete snapshot: armor with colliders, a
/// helmet, an abstract parent row, a stimulant buff pair, a camera-effect
/// debuff, a quest with experience and reputation rewards, one real trader
/// and the flea pseudo-trader. Unmodelled keys are sprinkled in to verify
/// round-trip preservation.
pub fn sample_database_json() -> Value {
    json!({
        "items": {
            "armor-1": {
                "_id": "armor-1",
                "_name": "side_armor",
                "_parent": "5448e54d4bdc2dcc718b4568",
                "_props": {
                    "Name": "Side Armor",
                    "ShortName": "SA",
                    "mousePenalty": -4.0,
                    "Slots": [{
                        "_name": "soft_armor_left",
                        "_props": {
                            "filters": [{
                                "armorColliders": ["LeftSideChestDown", "RightSideChestDown"],
                                "Plate": ""
                            }]
                        }
                    }]
                }
            },
            "helmet-1": {
                "_id": "helmet-1",
                "_name": "helmet",
                "_props": {
                    "Name": "Helmet",
                    "BlocksEarpiece": true,
                    "BlocksEyewear": true
                }
            },
            "node-1": { "_id": "node-1", "_name": "abstract_node" }
        },
        "globals": {
            "Health": { "Effects": { "Stimulator": { "Buffs": {
                "BuffsPropital": [
                    { "Value": 1.0, "Duration": 300.0, "Delay": 1.0, "Chance": 1.0 },
                    { "Value": -0.5, "Duration": 60.0, "Delay": 5.0, "Chance": 0.8 }
                ],
                "QuantumTunnelling": [
                    { "Value": 0.0, "Duration": 120.0, "Delay": 10.0, "Chance": 1.0 }
                ]
            } } } },
            "Stamina": {
                "Capacity": 100.0,
                "OxygenCapacity": 220.0,
                "HandsCapacity": 80.0,
                "BaseOverweightLimits": { "x": 35.0, "y": 70.0, "z": 0.0 },
                "SprintOverweightLimits": { "x": 26.0, "y": 70.0, "z": 0.0 },
                "WalkOverweightLimits": { "x": 40.0, "y": 70.0, "z": 0.0 },
                "WalkSpeedOverweightLimits": { "x": 35.0, "y": 70.0, "z": 0.0 }
            },
            "RagFair": {
                "minUserLevel": 15,
                "maxActiveOfferCount": [
                    { "from": 1, "to": 20, "count": 3 },
                    { "from": 21, "to": 40, "count": 5 }
                ]
            },
            "Insurance": { "MaxStorageTimeInHour": 96.0 }
        },
        "quests": {
            "quest-1": {
                "_id": "quest-1",
                "QuestName": "Debut",
                "traderId": "54cb50c76803fa8b248b4571",
                "rewards": { "Success": [
                    { "type": "Experience", "value": 1700.0 },
                    { "type": "TraderStanding", "value": -0.02 }
                ] }
            }
        },
        "traders": {
            "54cb50c76803fa8b248b4571": {
                "base": {
                    "nickname": "Prapor",
                    "loyaltyLevels": [
                        { "buy_price_coef": 100.0, "minLevel": 1 },
                        { "buy_price_coef": 100.0, "minLevel": 15 },
                        { "buy_price_coef": 100.0, "minLevel": 26 }
                    ],
                    "insurance": { "min_return_hour": 12, "max_return_hour": 24 }
                }
            },
            "ragfair": {
                "base": {
                    "nickname": "Flea",
                    "loyaltyLevels": [
                        { "buy_price_coef": 100.0 },
                        { "buy_price_coef": 100.0 }
                    ]
                }
            }
        }
    })
}

pub fn sample_database() -> DatabaseTables {
    serde_json::from_value(sample_database_json()).expect("fixture deserializes")
}

pub fn sample_server_configs() -> ServerConfigs {
    serde_json::from_value(json!({
        "quest": {
            "repeatableQuests": [
                { "name": "Daily", "numQuests": 6, "minPlayerLevel": 5 },
                { "name": "Weekly", "numQuests": 1 },
                { "name": "Completely random", "numQuests": 1 }
            ]
        },
        "repair": {
            "maxIntellectGainPerRepair": { "kit": 0.85, "trader": 0.75 },
            "armorKitSkillPointGainPerRepairPointMultiplier": 0.04
        },
        "trader": { "purchasesAreFoundInRaid": false },
        "insurance": {
            "insuranceMultiplier": { "54cb50c76803fa8b248b4571": 0.16 },
            "returnChancePercent": { "54cb50c76803fa8b248b4571": 80.0 }
        }
    }))
    .expect("fixture deserializes")
}
