//! `pet_db.txt` → `PET_DB`
//!
//! 20 plain columns followed by the pet script and the equip script:
//! `MobID,Name,JName,LureID,EggID,EquipID,FoodID,Fullness,HungryDelay,
//! R_Hungry,R_Full,Intimate,Die,Capture,Speed,S_Performance,talk_convert_class,
//! attack_rate,defence_attack_rate,change_target_rate,{pet_script},{loyal_script}`

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::Transformer;
use crate::constants::SymbolResolver;
use crate::error::{RecordError, RecordResult};
use crate::process::{RawRecord, RecordLayout};

const DEFAULT_HUNGRY_DELAY: i64 = 60;
const DEFAULT_INTIMACY_START: i64 = 250;
const DEFAULT_INTIMACY_OVERFED: i64 = 100;
const DEFAULT_INTIMACY_OWNER_DIE: i64 = 20;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Pet {
    pub mob: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tame_item: Option<String>,
    pub egg_item: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equip_item: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub food_item: Option<String>,
    pub fullness: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hungry_delay: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intimacy_start: Option<i64>,
    pub intimacy_fed: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intimacy_overfed: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intimacy_owner_die: Option<i64>,
    pub capture_rate: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_performance: Option<bool>,
    pub attack_rate: i64,
    pub retaliate_rate: i64,
    pub change_target_rate: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub script: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub support_script: Option<String>,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct PetDb;

impl Transformer for PetDb {
    type Node = Pet;

    const TYPE: &'static str = "PET_DB";
    const VERSION: u32 = 1;
    const FILE_STEM: &'static str = "pet_db";
    const LAYOUT: RecordLayout = RecordLayout::with_scripts(20, 2);

    fn transform(&self, record: &RawRecord<'_>, resolver: &SymbolResolver) -> RecordResult<Pet> {
        let mob_id = record.id_at(0)?;
        let mob = match resolver.resolve_mob(mob_id, "pet") {
            Ok(name) => name,
            Err(e) => {
                warn!("pet_db reading: Invalid mob-class {}, pet not read.", mob_id);
                return Err(RecordError::Soft(e));
            }
        };

        let egg_item = resolver
            .resolve_item(record.id_at(4)?, "egg")
            .map_err(RecordError::Hard)?;

        Ok(Pet {
            mob,
            tame_item: optional_item(resolver, record.id_at(3)?, "tame")?,
            egg_item,
            equip_item: optional_item(resolver, record.id_at(5)?, "equip")?,
            food_item: optional_item(resolver, record.id_at(6)?, "food")?,
            fullness: record.int(7)?,
            hungry_delay: unless_default(record.int(8)?, DEFAULT_HUNGRY_DELAY),
            intimacy_start: unless_default(record.int(11)?, DEFAULT_INTIMACY_START),
            intimacy_fed: record.int(9)?,
            intimacy_overfed: unless_default(record.int(10)?, DEFAULT_INTIMACY_OVERFED)
                .map(|v| -v),
            intimacy_owner_die: unless_default(record.int(12)?, DEFAULT_INTIMACY_OWNER_DIE)
                .map(|v| -v),
            capture_rate: record.int(13)?,
            special_performance: (record.int(15)? == 0).then_some(false),
            attack_rate: record.int(17)?,
            retaliate_rate: record.int(18)?,
            change_target_rate: record.int(19)?,
            script: script(record.field(21)?),
            support_script: script(record.field(20)?),
        })
    }
}

/// `0` means no item; anything else has to resolve.
fn optional_item(
    resolver: &SymbolResolver,
    id: u32,
    field: &'static str,
) -> RecordResult<Option<String>> {
    if id == 0 {
        return Ok(None);
    }
    resolver
        .resolve_item(id, field)
        .map(Some)
        .map_err(RecordError::Hard)
}

fn unless_default(value: i64, default: i64) -> Option<i64> {
    (value != default).then_some(value)
}

/// Script interior as written; whitespace-only counts as no script.
fn script(raw: &str) -> Option<String> {
    (!raw.trim().is_empty()).then(|| raw.to_string())
}
