//! Display names for galactic war effect codes.
//!
//! Both tables are sorted by code so lookups can binary search.

/// Effect type code → name.
const EFFECT_TYPES: &[(i64, &str)] = &[
    (1, "war_LibMultiplier"),
    (20, "game_SEAFSupport"),
    (21, "game_ExtractionTime"),
    (23, "game_EagleRearmTime"),
    (24, "game_VehicleFuel"),
    (25, "game_AmmoStartAmount"),
    (29, "game_DiverMeleeDamage"),
    (32, "game_StratagemPermit"),
    (33, "game_DiverRegen"),
    (36, "game_CooldownTime"),
    (40, "game_EnemyDivision"),
    (45, "UNK_AdditionalPayout"),
    (47, "war_ImpenetrableDefense"),
    (48, "war_CrippledAttackSupply"),
    (49, "war_AttackIncrease"),
    (51, "game_HealthStamina"),
    (52, "game_NoHealing"),
    (54, "game_IntelScanners"),
    (55, "game_IntelHostility"),
    (56, "game_AmmoPickupAmount"),
    (59, "game_MultiplyPayoutBonus"),
    (60, "game_PayoutStandardized"),
    (61, "game_StimsStartAmount"),
    (63, "game_StimsPickupAmount"),
    (67, "UNK_MarketPriceMult"),
    (68, "UNK_ItemCostByProgress"),
    (69, "game_ReinforceAmount"),
    (70, "map_PlanetBody"),
    (71, "map_PlanetToken"),
    (72, "game_EnemySpawnWeight"),
    (73, "map_PlanetCloud"),
    (74, "war_RegenRelativePct"),
    (75, "game_MissionIdOverride"),
    (76, "map_PlanetHide"),
    (77, "war_RegenOverride"),
    (78, "game_GameplayGeneric"),
    (79, "game_ThrowableStartCount"),
    (80, "game_StimsAmountMax"),
    (81, "game_StratagemDisabled"),
    (82, "game_BoosterDisabled"),
    (83, "game_BoosterPermit"),
    (84, "game_HealthAmountMax"),
    (85, "game_WeaponMagCount"),
    (86, "game_WeaponAmmoCount"),
    (87, "game_AttackEffect"),
    (88, "war_PauseDefense"),
    (89, "war_PreventAttacking"),
    (90, "war_MaxPlanetHP"),
    (91, "game_StratGroupCooldown"),
    (92, "war_Demilitarized"),
    (93, "game_OperationModToggle"),
    (94, "game_ModifierEffect"),
];

/// Effect value type code → name.
const VALUE_TYPES: &[(i64, &str)] = &[
    (0, "vt_None"),
    (1, "vt_Count"),
    (2, "vt_Percent"),
    (3, "vt_Faction"),
    (4, "vt_MixID"),
    (5, "vt_UNK5"),
    (6, "vt_DEP_EnemyGroup"),
    (7, "vt_DEP_ItemPackage"),
    (8, "vt_UNK8"),
    (9, "vt_UNK9"),
    (10, "vt_rewardMultiplierId"),
    (11, "vt_UNK11"),
    (12, "vt_itemTag"),
    (13, "vt_hashId"),
    (14, "vt_planetBodyType"),
    (15, "vt_unkBoolean"),
    (16, "vt_resourceHash"),
];

fn lookup(table: &'static [(i64, &'static str)], code: i64) -> Option<&'static str> {
    table
        .binary_search_by_key(&code, |(c, _)| *c)
        .ok()
        .map(|i| table[i].1)
}

/// Name of an effect type, if known.
pub fn effect_type_name(code: i64) -> Option<&'static str> {
    lookup(EFFECT_TYPES, code)
}

/// Name of an effect value type, if known.
pub fn value_type_name(code: i64) -> Option<&'static str> {
    lookup(VALUE_TYPES, code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_are_sorted_for_binary_search() {
        assert!(EFFECT_TYPES.windows(2).all(|w| w[0].0 < w[1].0));
        assert!(VALUE_TYPES.windows(2).all(|w| w[0].0 < w[1].0));
    }

    #[test]
    fn test_known_and_unknown_codes() {
        assert_eq!(effect_type_name(20), Some("game_SEAFSupport"));
        assert_eq!(effect_type_name(43), None);
        assert_eq!(value_type_name(2), Some("vt_Percent"));
        assert_eq!(value_type_name(99), None);
    }
}
