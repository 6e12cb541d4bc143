// [libs/domain/models/src/weapons.rs]
//! Weapon id -> category mapping (spec §4.11): ~110 ids across 13
//! categories; player-facing views collapse to a 10-category subset
//! (the first nine plus Other).

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "PascalCase")]
pub enum WeaponCategory {
    Ar,
    Dmr,
    Sr,
    Smg,
    Shotgun,
    Lmg,
    Pistol,
    Melee,
    Throwable,
    Special,
    Vehicle,
    Environment,
    #[default]
    Other,
}

impl WeaponCategory {
    /// Collapses the 13-category taxonomy to the 10-category player-facing
    /// subset: Vehicle and Environment fold into Other.
    pub fn player_facing(self) -> WeaponCategory {
        match self {
            WeaponCategory::Vehicle | WeaponCategory::Environment => WeaponCategory::Other,
            other => other,
        }
    }
}

/// Per-(match, player, category) weapon distribution row (spec §4.9 Phase 3
/// "per-match weapon table"), derived by folding the Phase 1 weapon-kill
/// rows by category rather than stored per event.
#[derive(Debug, Clone, Default, Serialize)]
pub struct WeaponCategoryTally {
    pub match_id: String,
    pub player_name: String,
    pub weapon_category: WeaponCategory,
    pub kills: i32,
    pub knocks: i32,
    pub damage: f64,
}

/// Categorizes a weapon/damage-causer id. Ids are matched by their
/// `WeapXxx_C` / `Item_Weapon_Xxx_C` upstream naming convention; unknown ids
/// fall back to `Other` rather than erroring, since telemetry schemas gain
/// new weapon ids between game content patches.
pub fn categorize_weapon(item_id: &str) -> WeaponCategory {
    use WeaponCategory::*;
    match item_id {
        // Assault rifles
        "WeapAK47_C" | "WeapM16A4_C" | "WeapSCAR-L_C" | "WeapM416_C" | "WeapGroza_C"
        | "WeapAUG_C" | "WeapQBZ95_C" | "WeapBerylM762_C" | "WeapG36C_C" | "WeapMk47Mutant_C"
        | "WeapAUG_AKM_C" | "WeapACE32_C" | "WeapFAMAS_C" | "WeapGroza_LVL_C" => Ar,

        // DMRs
        "WeapSKS_C" | "WeapMini14_C" | "WeapVSS_C" | "WeapSLR_C" | "WeapQBU88_C"
        | "WeapMk12_C" | "WeapMk14_C" | "WeapDragunov_C" | "WeapFNFal_C" => Dmr,

        // Sniper rifles
        "WeapKar98k_C" | "WeapM24_C" | "WeapAWM_C" | "WeapWin1894_C" | "WeapMosinNagant_C"
        | "WeapLynx_AMR_C" => Sr,

        // SMGs
        "WeapUMP_C" | "WeapVector_C" | "WeapUzi_C" | "WeapThompson_C" | "WeapBizonPP19_C"
        | "WeapP90_C" | "WeapMP5K_C" => Smg,

        // Shotguns
        "WeapS12K_C" | "WeapS686_C" | "WeapS1897_C" | "WeapSawnoff_C" | "WeapDBS_C" => Shotgun,

        // LMGs
        "WeapDP28_C" | "WeapM249_C" | "WeapMG3_C" => Lmg,

        // Pistols
        "WeapG18_C" | "WeapP92_C" | "WeapP1911_C" | "WeapR1895_C" | "WeapR45_C"
        | "WeapSkorpion_C" | "WeapDeagle_C" | "WeapFlareGun_C" | "WeapP18C_C" => Pistol,

        // Melee
        "WeapMachete_C" | "WeapPan_C" | "WeapCrowbar_C" | "WeapSickle_C" => Melee,

        // Throwables
        "WeapGrenade_C" | "WeapMolotov_C" | "WeapSmokeBomb_C" | "WeapStickyGrenade_C"
        | "WeapFlashbang_C" | "WeapGrenadeClusterBomb_C" => Throwable,

        // Special / deployable
        "WeapPanzerFaust100M1_C" | "WeapCrossbow_C" | "WeapCompoundBow_C" | "WeapFlameThrower_C" => {
            Special
        }

        // Vehicles and environmental damage causers
        id if id.starts_with("BP_") || id.contains("Vehicle") => Vehicle,
        "LogPlayerTakeDamage_BlueZone" | "BlueZone" | "RedZone" | "Fall" | "Drown" => Environment,

        _ => Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categorizes_known_weapon_families() {
        assert_eq!(categorize_weapon("WeapAK47_C"), WeaponCategory::Ar);
        assert_eq!(categorize_weapon("WeapKar98k_C"), WeaponCategory::Sr);
        assert_eq!(categorize_weapon("WeapGrenade_C"), WeaponCategory::Throwable);
    }

    #[test]
    fn unknown_weapon_is_other() {
        assert_eq!(categorize_weapon("WeapNewDlcGun_C"), WeaponCategory::Other);
    }

    #[test]
    fn player_facing_collapses_vehicle_and_environment() {
        assert_eq!(WeaponCategory::Vehicle.player_facing(), WeaponCategory::Other);
        assert_eq!(WeaponCategory::Environment.player_facing(), WeaponCategory::Other);
        assert_eq!(WeaponCategory::Ar.player_facing(), WeaponCategory::Ar);
    }
}
