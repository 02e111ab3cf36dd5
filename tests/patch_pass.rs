//! End-to-end patch pass over the JSON fixture: one `engine::run` with a
//! broad config, checked rule by rule against hand-computed expectations.

mod common;

use rebalance::config::TweaksConfig;
use rebalance::db::configs::ServerConfigs;
use rebalance::engine::{self, PatchError};

use common::{sample_database, sample_server_configs, PRAPOR_ID};

fn broad_config() -> TweaksConfig {
    let mut cfg = TweaksConfig::default();
    cfg.buff_timers_mult = 2.0;
    cfg.debuff_timers_mult = 0.5;
    cfg.remove_debuff_camera_effects = true;
    cfg.weight_limit_mult = 0.5;
    cfg.side_armors_armpits = true;
    cfg.ear_pro_with_all_helmets = true;
    cfg.remove_sensitivity_changes = true;
    cfg.quest_experience_reward_mult = 1.5;
    cfg.remove_rep_loss_quest_reward = true;
    cfg.daily_and_weekly_quest_count = 10;
    cfg.vendor_trade_sell_price_bonus_per_loyalty_level = 0.1;
    cfg.remove_flea_market_player_selling = true;
    cfg.flea_market_min_level = 1;
    cfg.improved_insurance = true;
    cfg
}

#[test]
fn summary_counts_match_fixture() {
    let mut db = sample_database();
    let mut server = sample_server_configs();

    let summary = engine::run(&mut db, &mut server, &broad_config()).unwrap();

    assert_eq!(summary.buffs_changed, 2);
    // armor-1 and helmet-1; the abstract parent row does not count
    assert_eq!(summary.items_updated, 2);
    // one experience scaling plus one zeroed reputation reward
    assert_eq!(summary.quests_updated, 2);
    // only Prapor; the flea pseudo-trader is excluded
    assert_eq!(summary.traders_updated, 1);
}

#[test]
fn buff_durations_scaled_by_sign_and_camera_debuff_neutralized() {
    let mut db = sample_database();
    let mut server = sample_server_configs();
    engine::run(&mut db, &mut server, &broad_config()).unwrap();

    let buffs = &db.globals.as_ref().unwrap().health.effects.stimulator.buffs;
    let propital = &buffs["BuffsPropital"];
    assert_eq!(propital[0].duration, 600.0); // positive value, buff multiplier
    assert_eq!(propital[1].duration, 30.0); // negative value, debuff multiplier

    let tunnelling = &buffs["QuantumTunnelling"][0];
    assert_eq!(tunnelling.delay, 0.0);
    assert_eq!(tunnelling.chance, 0.01);
    assert_eq!(tunnelling.duration, 1.0);
}

#[test]
fn weight_limits_halved_with_floor() {
    let mut db = sample_database();
    let mut server = sample_server_configs();
    engine::run(&mut db, &mut server, &broad_config()).unwrap();

    let stamina = &db.globals.as_ref().unwrap().stamina;
    assert_eq!(stamina.base_overweight_limits.x, 17.0); // floor(17.5)
    assert_eq!(stamina.base_overweight_limits.y, 35.0);
    assert_eq!(stamina.sprint_overweight_limits.x, 13.0);
    // capacities untouched: staminaMult stays at identity
    assert_eq!(stamina.capacity, 100.0);
}

#[test]
fn item_rules_land_on_the_right_items() {
    let mut db = sample_database();
    let mut server = sample_server_configs();
    engine::run(&mut db, &mut server, &broad_config()).unwrap();

    let items = db.items.as_ref().unwrap();

    let armor_props = items["armor-1"].props.as_ref().unwrap();
    let colliders = armor_props.slots.as_ref().unwrap()[0]
        .props
        .filters
        .as_ref()
        .unwrap()[0]
        .armor_colliders
        .as_ref()
        .unwrap();
    assert!(colliders.contains(&"LeftSideChestUp".to_string()));
    assert!(colliders.contains(&"RightSideChestUp".to_string()));
    assert_eq!(armor_props.mouse_penalty, 0.0);

    let helmet_props = items["helmet-1"].props.as_ref().unwrap();
    assert!(!helmet_props.blocks_earpiece);
    assert!(helmet_props.blocks_eyewear); // toggle not enabled

    assert!(items["node-1"].props.is_none());
}

#[test]
fn quest_rewards_scaled_and_reputation_loss_removed() {
    let mut db = sample_database();
    let mut server = sample_server_configs();
    engine::run(&mut db, &mut server, &broad_config()).unwrap();

    let rewards = db.quests.as_ref().unwrap()["quest-1"]
        .rewards
        .as_ref()
        .unwrap()
        .success
        .as_ref()
        .unwrap();
    assert_eq!(rewards[0].value, 2550.0); // floor(1700 * 1.5)
    assert_eq!(rewards[1].value, 0.0);

    assert!(server
        .quest
        .repeatable_quests
        .iter()
        .all(|r| r.num_quests == 10));
}

#[test]
fn trader_and_flea_rules_applied() {
    let mut db = sample_database();
    let mut server = sample_server_configs();
    engine::run(&mut db, &mut server, &broad_config()).unwrap();

    let coefs: Vec<f64> = db.traders[PRAPOR_ID]
        .base
        .loyalty_levels
        .iter()
        .map(|l| l.buy_price_coef)
        .collect();
    assert_eq!(coefs, vec![100.0, 90.0, 80.0]);
    assert_eq!(
        db.traders["ragfair"].base.loyalty_levels[1].buy_price_coef,
        100.0
    );

    let rag_fair = &db.globals.as_ref().unwrap().rag_fair;
    assert_eq!(rag_fair.min_user_level, 1);
    assert_eq!(rag_fair.max_active_offer_count.len(), 1);
    assert_eq!(rag_fair.max_active_offer_count[0].count, 0);
}

#[test]
fn insurance_overrides_reach_configs_traders_and_globals() {
    let mut db = sample_database();
    let mut server = sample_server_configs();
    engine::run(&mut db, &mut server, &broad_config()).unwrap();

    assert_eq!(server.insurance.insurance_multiplier[PRAPOR_ID], 0.1);
    assert_eq!(server.insurance.return_chance_percent[PRAPOR_ID], 75.0);

    let prapor = &db.traders[PRAPOR_ID].base.insurance;
    assert_eq!(prapor.min_return_hour, 0);
    assert_eq!(prapor.max_return_hour, 1);

    assert_eq!(
        db.globals.as_ref().unwrap().insurance.max_storage_time_in_hour,
        168.0
    );
}

#[test]
fn default_config_leaves_fixture_untouched() {
    let mut db = sample_database();
    let before = db.clone();
    let mut server = sample_server_configs();
    let server_before = server.clone();

    let summary = engine::run(&mut db, &mut server, &TweaksConfig::default()).unwrap();

    assert_eq!(summary.buffs_changed, 0);
    assert_eq!(db, before);
    assert_eq!(server, server_before);
}

#[test]
fn missing_required_table_fails_before_any_mutation() {
    let mut db = sample_database();
    db.globals = None;
    let before = db.clone();
    let mut server = sample_server_configs();

    let err = engine::run(&mut db, &mut server, &broad_config()).unwrap_err();

    assert!(matches!(err, PatchError::MissingTable("globals")));
    assert_eq!(db, before);
    assert_eq!(server, sample_server_configs());
}

#[test]
fn unmodelled_fields_survive_the_patch_and_reserialization() {
    let mut db = sample_database();
    let mut server = ServerConfigs::default();
    engine::run(&mut db, &mut server, &broad_config()).unwrap();

    let rendered = serde_json::to_value(&db).unwrap();
    assert_eq!(
        rendered["items"]["armor-1"]["_parent"],
        "5448e54d4bdc2dcc718b4568"
    );
    assert_eq!(rendered["items"]["armor-1"]["_props"]["ShortName"], "SA");
    assert_eq!(rendered["quests"]["quest-1"]["traderId"], PRAPOR_ID);
    assert_eq!(
        rendered["traders"][PRAPOR_ID]["base"]["loyaltyLevels"][1]["minLevel"],
        15
    );
}
