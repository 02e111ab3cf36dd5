//! Rules over the trader table and its related config sections: loyalty
//! buy-price scaling, found-in-raid vendor purchases, and the insurance
//! overrides.

use log::{debug, info};
use std::collections::HashMap;

use crate::config::TweaksConfig;
use crate::db::configs::{InsuranceSection, TraderSection};
use crate::db::{InsuranceSettings, TraderRecord};
use crate::engine::multiplier_enabled;

/// Table key of the auction-house pseudo-trader, excluded from loyalty
/// scaling.
pub const RAGFAIR_TRADER: &str = "ragfair";

/// The two insurance traders targeted by the improved-insurance overrides.
const PRAPOR_ID: &str = "54cb50c76803fa8b248b4571";
const THERAPIST_ID: &str = "54cb57776803fa99248b456e";

/// Buy price coefficients never drop below this, capping the discount at 80%.
const LOYALTY_COEF_FLOOR: f64 = 20.0;

/// Scale `buy_price_coef` for loyalty levels after the first by
/// `(1 - levelIndex * multiplier)`, clamped to 20, rounded to nearest.
///
/// The level index starts at 1 for the second entry and advances only for
/// entries actually processed; zero coefficients are skipped without
/// advancing it. Returns the number of traders with at least one scaled
/// coefficient.
pub fn scale_loyalty_buy_prices(
    traders: &mut HashMap<String, TraderRecord>,
    cfg: &TweaksConfig,
) -> usize {
    let mult = cfg.vendor_trade_sell_price_bonus_per_loyalty_level;
    if !multiplier_enabled(mult) {
        return 0;
    }

    let mut updated_traders = 0;
    for (trader_id, trader) in traders.iter_mut() {
        if trader_id == RAGFAIR_TRADER {
            continue;
        }
        let nickname = trader.base.nickname.clone();
        let mut level_index: usize = 0;
        let mut touched = false;
        for loyalty in trader.base.loyalty_levels.iter_mut() {
            if level_index == 0 {
                // The first loyalty level is always left at its base price.
                level_index += 1;
                continue;
            }
            let old = loyalty.buy_price_coef;
            if old == 0.0 {
                continue; // does not advance the level index
            }
            let scaled = old * (1.0 - level_index as f64 * mult);
            loyalty.buy_price_coef = scaled.max(LOYALTY_COEF_FLOOR).round();
            if cfg.debug_print_changes {
                debug!(
                    "trader {}: {} -> {} at loyalty level {}",
                    nickname, old, loyalty.buy_price_coef, level_index
                );
            }
            touched = true;
            level_index += 1;
        }
        if touched {
            updated_traders += 1;
        }
    }

    info!(
        "Scaled loyalty buy price coefficients for {} traders",
        updated_traders
    );
    updated_traders
}

/// Vendor purchases count as found-in-raid.
pub fn set_vendor_purchases_fir(trader_cfg: &mut TraderSection, cfg: &TweaksConfig) {
    if !cfg.vendor_purchases_fir {
        return;
    }
    trader_cfg.purchases_are_found_in_raid = true;
    info!("Vendor purchases now count as found-in-raid");
}

/// Insurance overrides: cheap, likely returns from the first insurance
/// trader, pricier guaranteed returns from the second, a 0-1 hour return
/// window for both, and a week of storage time.
pub fn improve_insurance(
    traders: &mut HashMap<String, TraderRecord>,
    insurance_cfg: &mut InsuranceSection,
    globals_insurance: &mut InsuranceSettings,
    cfg: &TweaksConfig,
) {
    if !cfg.improved_insurance {
        return;
    }

    insurance_cfg
        .insurance_multiplier
        .insert(PRAPOR_ID.to_string(), 0.1);
    insurance_cfg
        .return_chance_percent
        .insert(PRAPOR_ID.to_string(), 75.0);
    insurance_cfg
        .insurance_multiplier
        .insert(THERAPIST_ID.to_string(), 0.5);
    insurance_cfg
        .return_chance_percent
        .insert(THERAPIST_ID.to_string(), 100.0);

    for id in [PRAPOR_ID, THERAPIST_ID] {
        if let Some(trader) = traders.get_mut(id) {
            trader.base.insurance.min_return_hour = 0;
            trader.base.insurance.max_return_hour = 1;
        }
    }

    globals_insurance.max_storage_time_in_hour = 168.0;
    info!("Improved insurance pricing and return times");
}
