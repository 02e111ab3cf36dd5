//! Rules over the item table: armor zone propagation, helmet compatibility
//! flags, rig/armor stacking, and sensitivity neutralization.
//!
//! Items without properties are abstract parent rows and never participate.

use log::{debug, info};
use std::collections::HashMap;

use crate::config::TweaksConfig;
use crate::db::ItemTemplate;

/// Side chest armor also covers the armpit zones.
const SIDE_ARMOR_ZONES: [(&str, &str); 2] = [
    ("LeftSideChestDown", "LeftSideChestUp"),
    ("RightSideChestDown", "RightSideChestUp"),
];
/// Chest armor also covers the neck zones.
const CHEST_NECK_ZONES: [(&str, &str); 2] = [("RibcageUp", "NeckFront"), ("SpineTop", "NeckBack")];
/// Arm armor also covers the armpit zones.
const ARM_ARMPIT_ZONES: [(&str, &str); 2] = [
    ("LeftUpperArm", "LeftSideChestUp"),
    ("RightUpperArm", "RightSideChestUp"),
];
/// Jaw and parietal armor also covers the neck zones.
const JAW_NECK_ZONES: [(&str, &str); 2] = [("Jaw", "NeckFront"), ("ParietalHead", "NeckBack")];

/// Rules 5-8 in one pass over the item table. Returns the number of items
/// with at least one changed field.
pub fn apply(items: &mut HashMap<String, ItemTemplate>, cfg: &TweaksConfig) -> usize {
    let mut updated_items = 0;

    for item in items.values_mut() {
        let ItemTemplate {
            id, name, props, ..
        } = item;
        let Some(props) = props.as_mut() else {
            continue; // abstract parent row
        };
        let mut updated = false;

        // Armor collider zone propagation, per slot filter with a
        // non-empty collider set. Appends are set-like.
        if let Some(slots) = props.slots.as_mut() {
            for slot in slots.iter_mut() {
                let Some(filters) = slot.props.filters.as_mut() else {
                    continue;
                };
                for filter in filters.iter_mut() {
                    let Some(colliders) = filter.armor_colliders.as_mut() else {
                        continue;
                    };
                    if colliders.is_empty() {
                        continue;
                    }
                    if cfg.side_armors_armpits {
                        updated |= extend_zones(colliders, &SIDE_ARMOR_ZONES);
                    }
                    if cfg.chest_armors_neck {
                        updated |= extend_zones(colliders, &CHEST_NECK_ZONES);
                    }
                    if cfg.arms_armors_armpits {
                        updated |= extend_zones(colliders, &ARM_ARMPIT_ZONES);
                    }
                    if cfg.jaws_armors_neck {
                        updated |= extend_zones(colliders, &JAW_NECK_ZONES);
                    }
                }
            }
        }

        // Helmet compatibility flags, each cleared independently.
        let mut helmet_updated = false;
        if cfg.ear_pro_with_all_helmets && props.blocks_earpiece {
            props.blocks_earpiece = false;
            helmet_updated = true;
        }
        if cfg.eye_wear_with_all_helmets && props.blocks_eyewear {
            props.blocks_eyewear = false;
            helmet_updated = true;
        }
        if cfg.head_wear_with_all_helmets && props.blocks_headwear {
            props.blocks_headwear = false;
            helmet_updated = true;
        }
        if cfg.face_cover_with_all_helmets && props.blocks_face_cover {
            props.blocks_face_cover = false;
            helmet_updated = true;
        }

        // Armor/rig stacking.
        if cfg.allow_rigs_and_armor_stacking && props.blocks_armor_vest {
            props.blocks_armor_vest = false;
            updated = true;
        }

        // Sensitivity neutralization.
        if cfg.remove_sensitivity_changes && props.mouse_penalty != 0.0 {
            props.mouse_penalty = 0.0;
            updated = true;
        }

        if updated || helmet_updated {
            if cfg.debug_print_changes {
                debug!("updated item {} / {} / {}", id, name, props.name);
            }
            updated_items += 1;
        }
    }

    info!("Updated {} items", updated_items);
    updated_items
}

/// Append the paired zone for every covered source zone not already
/// protected. Never duplicates an existing zone.
fn extend_zones(colliders: &mut Vec<String>, pairs: &[(&str, &str)]) -> bool {
    let mut added = false;
    for (have, add) in pairs {
        if colliders.iter().any(|z| z == have) && !colliders.iter().any(|z| z == add) {
            colliders.push((*add).to_string());
            added = true;
        }
    }
    added
}
