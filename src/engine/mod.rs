//! The mutation engine: a single deterministic pass over the loaded database.
//!
//! Each transformation rule is independently gated by its config toggle and
//! touches a disjoint slice of the data, so rule order is irrelevant to the
//! outcome. The pass runs exactly once per process, during the host's
//! post-database-load phase; multiplicative rules are NOT safe to re-apply,
//! which is an accepted constraint of the lifecycle, not something the engine
//! defends against.
//!
//! Numeric policy, used consistently by every rule:
//! - "scale" means multiply then floor
//! - limit vectors floor each axis then clamp to a minimum of 0
//! - loyalty coefficients clamp to a minimum of 20 then round to nearest
//!
//! The engine mutates fields in place and appends to existing collections; it
//! never reconstructs or replaces a top-level table.

use log::{debug, info};

use crate::config::TweaksConfig;
use crate::db::configs::{RepairSection, ServerConfigs};
use crate::db::DatabaseTables;

pub mod errors;
pub mod globals;
pub mod items;
pub mod quests;
pub mod traders;

pub use errors::PatchError;

/// Records touched per category during one pass, for observability.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PatchSummary {
    pub buffs_changed: usize,
    pub items_updated: usize,
    pub quests_updated: usize,
    pub traders_updated: usize,
}

/// A multiplier participates only when it is set and not the identity.
pub(crate) fn multiplier_enabled(value: f64) -> bool {
    value != 0.0 && value != 1.0
}

/// Run the full patch pass.
///
/// Fails fatally (without touching anything) if `items`, `globals` or
/// `quests` is absent. Traders are optional: rules that need them simply
/// find no matching records.
pub fn run(
    db: &mut DatabaseTables,
    server: &mut ServerConfigs,
    cfg: &TweaksConfig,
) -> Result<PatchSummary, PatchError> {
    let DatabaseTables {
        items,
        globals,
        quests,
        traders,
    } = db;
    let Some(items) = items.as_mut() else {
        return Err(PatchError::MissingTable("items"));
    };
    let Some(globals) = globals.as_mut() else {
        return Err(PatchError::MissingTable("globals"));
    };
    let Some(quests) = quests.as_mut() else {
        return Err(PatchError::MissingTable("quests"));
    };

    if cfg.debug_print_changes {
        debug!("active tweak config: {:?}", cfg);
    }

    let mut summary = PatchSummary::default();

    summary.buffs_changed = globals::scale_buffs(globals, cfg);
    globals::replace_inertia(globals, cfg);
    globals::scale_stamina(globals, cfg);
    globals::scale_weight_limits(globals, cfg);

    summary.items_updated = items::apply(items, cfg);

    summary.quests_updated = quests::apply(quests, cfg);
    quests::set_repeatable_counts(&mut server.quest, cfg);

    globals::disable_flea_selling(globals, cfg);
    summary.traders_updated = traders::scale_loyalty_buy_prices(traders, cfg);
    globals::set_flea_min_level(globals, cfg);

    traders::set_vendor_purchases_fir(&mut server.trader, cfg);
    traders::improve_insurance(traders, &mut server.insurance, &mut globals.insurance, cfg);
    improve_repair(&mut server.repair, cfg);
    globals::standardize_experience(globals, cfg);

    info!(
        "Patch pass complete: {} buffs, {} items, {} quests, {} traders touched",
        summary.buffs_changed,
        summary.items_updated,
        summary.quests_updated,
        summary.traders_updated
    );

    Ok(summary)
}

/// Fixed overrides for repair skill gain.
fn improve_repair(repair: &mut RepairSection, cfg: &TweaksConfig) {
    if !cfg.improved_repair {
        return;
    }
    repair.max_intellect_gain_per_repair.kit = 10.0;
    repair.max_intellect_gain_per_repair.trader = 10.0;
    repair.armor_kit_skill_point_gain_per_repair_point_multiplier = 0.1;
    info!("Raised repair skill gain caps");
}
