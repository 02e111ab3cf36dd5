//! # Configuration Management Module
//!
//! Handles the two configuration surfaces of rebalance:
//!
//! - [`TweaksConfig`] - the flat set of named toggles and multipliers gating
//!   each mutation rule. Every key is optional and defaulted so a partial
//!   config file enables only what it names. Keys use the camelCase names
//!   established by the mod's config format.
//! - [`ChannelCredentials`] - the notification token/channel pair, kept in a
//!   separate file so the main config can be shared freely. Never logged.
//!
//! Both are immutable for the process lifetime once loaded: they are
//! constructed at startup and passed by reference into the engine and the
//! dispatcher. There are no process-wide mutable singletons.
//!
//! ## Configuration File Format
//!
//! ```toml
//! buffTimersMult = 2.0
//! debuffTimersMult = 0.5
//! debuffPotencyMult = 1.0
//! sideArmorsArmpits = true
//! dailyAndWeeklyQuestCount = 10
//! ```
//!
//! A multiplier of `0` or `1` leaves its rule disabled; a count of `0`
//! disables the corresponding overwrite.

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use tokio::fs;

/// Toggles and multipliers for the mutation engine. One field per rule.
///
/// Booleans default to `false`, multipliers to `1.0`, counts to `0` - the
/// default config changes nothing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TweaksConfig {
    /// Duration multiplier for buffs with a positive value (floor, min 1).
    pub buff_timers_mult: f64,
    /// Duration multiplier for buffs with a non-positive value (floor, min 1).
    pub debuff_timers_mult: f64,
    /// Potency multiplier applied to every buff value, positive or not.
    pub debuff_potency_mult: f64,
    /// Force camera-distortion debuffs to a negligible profile.
    pub remove_debuff_camera_effects: bool,
    /// Replace the inertia tuning block with a near-disabled profile.
    pub soft_removed_inertia: bool,
    /// Multiplier for the three stamina capacity fields (floor).
    pub stamina_mult: f64,
    /// Multiplier for the four overweight limit vectors (floor, min 0).
    pub weight_limit_mult: f64,
    /// Side chest armor also covers the armpit zones.
    pub side_armors_armpits: bool,
    /// Chest armor also covers the neck zones.
    pub chest_armors_neck: bool,
    /// Arm armor also covers the armpit zones.
    pub arms_armors_armpits: bool,
    /// Jaw/head armor also covers the neck zones.
    pub jaws_armors_neck: bool,
    /// Clear the earpiece-blocking flag on helmets.
    pub ear_pro_with_all_helmets: bool,
    /// Clear the eyewear-blocking flag on helmets.
    pub eye_wear_with_all_helmets: bool,
    /// Clear the headwear-blocking flag on helmets.
    pub head_wear_with_all_helmets: bool,
    /// Clear the face-cover-blocking flag on helmets.
    pub face_cover_with_all_helmets: bool,
    /// Clear the armor-vest-blocking flag on rigs.
    pub allow_rigs_and_armor_stacking: bool,
    /// Zero every nonzero mouse sensitivity penalty.
    pub remove_sensitivity_changes: bool,
    /// Multiplier for the first Experience entry of each quest's success rewards (floor).
    pub quest_experience_reward_mult: f64,
    /// Zero negative TraderStanding success rewards.
    pub remove_rep_loss_quest_reward: bool,
    /// Overwrite the daily/weekly/scavenger repeatable quest counts (0 disables).
    pub daily_and_weekly_quest_count: i64,
    /// Replace the auction offer-count table with a zero-listings sentinel.
    pub remove_flea_market_player_selling: bool,
    /// Per-loyalty-level buy price coefficient reduction (clamped at 20).
    pub vendor_trade_sell_price_bonus_per_loyalty_level: f64,
    /// Overwrite the auction minimum player level (0 disables).
    pub flea_market_min_level: i64,
    /// Mark vendor purchases as found-in-raid.
    #[serde(rename = "vendorPurchasesFIR")]
    pub vendor_purchases_fir: bool,
    /// Cheap, fast, reliable insurance from the two insurance traders.
    pub improved_insurance: bool,
    /// Higher intellect gain and armor skill gain from repairs.
    pub improved_repair: bool,
    /// Flat skill progression: no fresh-point bonus, no fatigue.
    pub standardize_experience: bool,
    /// Log every touched record at debug level.
    pub debug_print_changes: bool,
}

impl Default for TweaksConfig {
    fn default() -> Self {
        Self {
            buff_timers_mult: 1.0,
            debuff_timers_mult: 1.0,
            debuff_potency_mult: 1.0,
            remove_debuff_camera_effects: false,
            soft_removed_inertia: false,
            stamina_mult: 1.0,
            weight_limit_mult: 1.0,
            side_armors_armpits: false,
            chest_armors_neck: false,
            arms_armors_armpits: false,
            jaws_armors_neck: false,
            ear_pro_with_all_helmets: false,
            eye_wear_with_all_helmets: false,
            head_wear_with_all_helmets: false,
            face_cover_with_all_helmets: false,
            allow_rigs_and_armor_stacking: false,
            remove_sensitivity_changes: false,
            quest_experience_reward_mult: 1.0,
            remove_rep_loss_quest_reward: false,
            daily_and_weekly_quest_count: 0,
            remove_flea_market_player_selling: false,
            vendor_trade_sell_price_bonus_per_loyalty_level: 1.0,
            flea_market_min_level: 0,
            vendor_purchases_fir: false,
            improved_insurance: false,
            improved_repair: false,
            standardize_experience: false,
            debug_print_changes: false,
        }
    }
}

impl TweaksConfig {
    /// Load the tweak configuration from a TOML file.
    pub async fn load(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| anyhow!("Failed to read config file {}: {}", path, e))?;

        let config: TweaksConfig = toml::from_str(&content)
            .map_err(|e| anyhow!("Failed to parse config file {}: {}", path, e))?;

        Ok(config)
    }

    /// Create a default configuration file.
    pub async fn create_default(path: &str) -> Result<()> {
        let config = TweaksConfig::default();
        let content = toml::to_string_pretty(&config)
            .map_err(|e| anyhow!("Failed to serialize default config: {}", e))?;

        fs::write(path, content)
            .await
            .map_err(|e| anyhow!("Failed to write config file {}: {}", path, e))?;

        Ok(())
    }
}

/// Token/channel pair for the outbound notification channel.
///
/// Loaded from its own file so the secret never travels with the main
/// config. If either field is empty the dispatcher registers nothing and
/// the delivery sink is a no-op for the process lifetime.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelCredentials {
    #[serde(rename = "notificationToken")]
    pub token: String,
    #[serde(rename = "notificationChannelId")]
    pub channel_id: String,
}

impl ChannelCredentials {
    /// Load credentials from a TOML file. A missing file yields empty
    /// credentials (notifications disabled) rather than an error.
    pub async fn load(path: &str) -> Result<Self> {
        let content = match fs::read_to_string(path).await {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(e) => return Err(anyhow!("Failed to read credentials file {}: {}", path, e)),
        };

        let creds: ChannelCredentials = toml::from_str(&content)
            .map_err(|e| anyhow!("Failed to parse credentials file {}: {}", path, e))?;

        Ok(creds)
    }

    /// Write an empty credentials skeleton.
    pub async fn create_default(path: &str) -> Result<()> {
        let content = toml::to_string_pretty(&Self::default())
            .map_err(|e| anyhow!("Failed to serialize credentials: {}", e))?;
        fs::write(path, content)
            .await
            .map_err(|e| anyhow!("Failed to write credentials file {}: {}", path, e))?;
        Ok(())
    }

    /// Both fields must be non-empty for the channel to be usable.
    pub fn is_complete(&self) -> bool {
        !self.token.is_empty() && !self.channel_id.is_empty()
    }
}

// The token must never reach the logs, so Debug redacts it.
impl std::fmt::Debug for ChannelCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChannelCredentials")
            .field("token", &"<redacted>")
            .field("channel_id", &self.channel_id)
            .finish()
    }
}
