//! Rules over the global tuning constants: stimulant buffs, inertia,
//! stamina, weight limits, auction access, and skill progression.

use log::{debug, info};

use crate::config::TweaksConfig;
use crate::db::{Globals, OfferCountRange, Vector3};
use crate::engine::multiplier_enabled;

/// Buff names whose screen-distortion effects can be neutralized.
const CAMERA_EFFECT_BUFFS: [&str; 2] = ["QuantumTunnelling", "Contusion"];

/// Sign-dependent duration scaling plus potency scaling for every
/// stimulant buff effect. Positive values are buffs and use
/// `buffTimersMult`; non-positive values use `debuffTimersMult`. Both share
/// `debuffPotencyMult` for the value itself. Camera-distortion buffs are
/// additionally forced to a negligible profile when requested.
///
/// Returns the number of buff definitions with at least one changed effect.
pub fn scale_buffs(globals: &mut Globals, cfg: &TweaksConfig) -> usize {
    if !multiplier_enabled(cfg.buff_timers_mult) {
        return 0;
    }

    let mut changed_buffs = 0;
    for (name, effects) in globals.health.effects.stimulator.buffs.iter_mut() {
        let mut changed = false;
        for effect in effects.iter_mut() {
            if effect.value > 0.0 {
                effect.duration = (effect.duration * cfg.buff_timers_mult).floor().max(1.0);
            } else {
                effect.duration = (effect.duration * cfg.debuff_timers_mult).floor().max(1.0);
            }
            effect.value *= cfg.debuff_potency_mult;
            changed = true;

            if cfg.remove_debuff_camera_effects && CAMERA_EFFECT_BUFFS.contains(&name.as_str()) {
                effect.delay = 0.0;
                effect.chance = 0.01;
                effect.duration = 1.0;
            }
        }
        if changed {
            if cfg.debug_print_changes {
                debug!("updated buff {}", name);
            }
            changed_buffs += 1;
        }
    }

    info!("Changed {} stimulant buffs", changed_buffs);
    changed_buffs
}

/// Wholesale replacement of the inertia tuning block with a fixed
/// near-disabled profile. Not a multiplier; the values are absolute.
pub fn replace_inertia(globals: &mut Globals, cfg: &TweaksConfig) {
    if !cfg.soft_removed_inertia {
        return;
    }
    let inertia = &mut globals.inertia;
    inertia.base_jump_penalty = 0.03;
    inertia.base_jump_penalty_duration = 0.4;
    inertia.min_direction_blend_time = 0.01;
    inertia.crouch_speed_acceleration_range = Vector3::new(4.75, 7.5, 0.0);
    inertia.exit_movement_state_speed_threshold = Vector3::new(0.001, 0.001, 0.0);
    inertia.inertia_limits_step = 0.1;
    inertia.max_time_without_input = Vector3::new(0.01, 0.03, 0.0);
    inertia.penalty_power = 1.01;
    inertia.side_time = Vector3::new(1.0, 0.5, 0.0);
    inertia.pre_sprint_acceleration_limits = Vector3::new(8.0, 4.0, 0.0);
    inertia.sprint_acceleration_limits = Vector3::new(15.0, 0.0, 0.0);
    inertia.sprint_brake_inertia = Vector3::new(0.0, 55.0, 0.0);
    inertia.sprint_transition_motion_preservation = Vector3::new(0.006, 0.008, 0.0);
    inertia.walk_inertia = Vector3::new(0.002, 0.025, 0.0);
    info!("Replaced inertia tuning with the soft-removed profile");
}

/// Scale the three stamina capacity fields, floored.
pub fn scale_stamina(globals: &mut Globals, cfg: &TweaksConfig) {
    if !multiplier_enabled(cfg.stamina_mult) {
        return;
    }
    let stamina = &mut globals.stamina;
    stamina.capacity = (stamina.capacity * cfg.stamina_mult).floor();
    stamina.oxygen_capacity = (stamina.oxygen_capacity * cfg.stamina_mult).floor();
    stamina.hands_capacity = (stamina.hands_capacity * cfg.stamina_mult).floor();
    info!(
        "Updated stamina: capacity {}, oxygen {}, hands {}",
        stamina.capacity, stamina.oxygen_capacity, stamina.hands_capacity
    );
}

/// Scale the four overweight limit vectors. Each axis is floored
/// then clamped to a minimum of 0, independently of the others.
pub fn scale_weight_limits(globals: &mut Globals, cfg: &TweaksConfig) {
    if !multiplier_enabled(cfg.weight_limit_mult) {
        return;
    }
    let stamina = &mut globals.stamina;
    stamina.base_overweight_limits = scale_axes(stamina.base_overweight_limits, cfg.weight_limit_mult);
    stamina.sprint_overweight_limits =
        scale_axes(stamina.sprint_overweight_limits, cfg.weight_limit_mult);
    stamina.walk_overweight_limits = scale_axes(stamina.walk_overweight_limits, cfg.weight_limit_mult);
    stamina.walk_speed_overweight_limits =
        scale_axes(stamina.walk_speed_overweight_limits, cfg.weight_limit_mult);
    info!(
        "Updated weight limits: base {:?}, sprint {:?}, walk {:?}, walk speed {:?}",
        stamina.base_overweight_limits,
        stamina.sprint_overweight_limits,
        stamina.walk_overweight_limits,
        stamina.walk_speed_overweight_limits
    );
}

fn scale_axes(v: Vector3, mult: f64) -> Vector3 {
    Vector3 {
        x: (v.x * mult).floor().max(0.0),
        y: (v.y * mult).floor().max(0.0),
        z: (v.z * mult).floor().max(0.0),
    }
}

/// Replace the auction offer-count table with a sentinel range
/// meaning "no level qualifies for nonzero listings".
pub fn disable_flea_selling(globals: &mut Globals, cfg: &TweaksConfig) {
    if !cfg.remove_flea_market_player_selling {
        return;
    }
    globals.rag_fair.max_active_offer_count = vec![OfferCountRange {
        from: -999,
        to: 999,
        count: 0,
    }];
    info!("Removed player selling from the flea market");
}

/// Overwrite the minimum player level for auction
/// access. Zero leaves the host default in place.
pub fn set_flea_min_level(globals: &mut Globals, cfg: &TweaksConfig) {
    if cfg.flea_market_min_level == 0 {
        return;
    }
    globals.rag_fair.min_user_level = cfg.flea_market_min_level;
    info!(
        "Set minimum flea market level to {}",
        cfg.flea_market_min_level
    );
}

/// Flat skill progression: no fresh-point bonus,
/// no fatigue.
pub fn standardize_experience(globals: &mut Globals, cfg: &TweaksConfig) {
    if !cfg.standardize_experience {
        return;
    }
    globals.skills_settings.skill_progress_rate = 2.0;
    globals.skills_settings.weapon_skill_progress_rate = 2.0;
    globals.skill_min_effectiveness = 0.1;
    globals.skill_fatigue_per_point = 1.0;
    globals.skill_fresh_effectiveness = 1.0;
    globals.skill_fresh_points = 1.0;
    globals.skill_points_before_fatigue = 9999.0;
    globals.skill_fatigue_reset = 9999.0;
    info!("Standardized skill experience rates");
}
