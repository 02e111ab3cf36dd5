//! Rules over the quest table and the repeatable quest configuration:
//! experience reward scaling, reputation-loss removal, and slot counts.

use log::{debug, info};
use std::collections::HashMap;

use crate::config::TweaksConfig;
use crate::db::configs::{QuestSection, REPEATABLE_DAILY, REPEATABLE_SCAV, REPEATABLE_WEEKLY};
use crate::db::{QuestTemplate, REWARD_EXPERIENCE, REWARD_TRADER_STANDING};
use crate::engine::multiplier_enabled;

/// Rules 9 and 10 in one pass. Returns the number of reward updates: one
/// per quest whose experience reward was scaled, plus one per zeroed
/// negative reputation reward (a quest can count more than once).
pub fn apply(quests: &mut HashMap<String, QuestTemplate>, cfg: &TweaksConfig) -> usize {
    let exp_enabled = multiplier_enabled(cfg.quest_experience_reward_mult);
    let mut updated = 0;

    for quest in quests.values_mut() {
        let QuestTemplate {
            id,
            quest_name,
            rewards,
            ..
        } = quest;
        let Some(success) = rewards.as_mut().and_then(|r| r.success.as_mut()) else {
            continue; // quest grants no success rewards
        };

        // Scale the first Experience entry, floored. A quest
        // without one is left untouched and uncounted.
        if exp_enabled {
            if let Some(reward) = success
                .iter_mut()
                .find(|r| r.reward_type == REWARD_EXPERIENCE)
            {
                reward.value = (reward.value * cfg.quest_experience_reward_mult).floor();
                if cfg.debug_print_changes {
                    debug!(
                        "updated quest {} / {}: new exp {}",
                        id, quest_name, reward.value
                    );
                }
                updated += 1;
            }
        }

        // Zero every negative TraderStanding entry.
        if cfg.remove_rep_loss_quest_reward {
            for reward in success.iter_mut() {
                if reward.reward_type == REWARD_TRADER_STANDING && reward.value < 0.0 {
                    reward.value = 0.0;
                    if cfg.debug_print_changes {
                        debug!("removed rep loss on quest {} / {}", id, quest_name);
                    }
                    updated += 1;
                }
            }
        }
    }

    info!("Updated {} quest rewards", updated);
    updated
}

/// Overwrite the quest count for the three fixed repeatable
/// categories. Zero or negative counts leave the host defaults in place.
pub fn set_repeatable_counts(quest_cfg: &mut QuestSection, cfg: &TweaksConfig) {
    if cfg.daily_and_weekly_quest_count <= 0 {
        return;
    }
    for idx in [REPEATABLE_DAILY, REPEATABLE_WEEKLY, REPEATABLE_SCAV] {
        if let Some(settings) = quest_cfg.repeatable_quests.get_mut(idx) {
            settings.num_quests = cfg.daily_and_weekly_quest_count;
        }
    }
    info!(
        "Set repeatable quest count to {}",
        cfg.daily_and_weekly_quest_count
    );
}
