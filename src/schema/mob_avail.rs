//! `mob_avail.txt` → `MOB_AVAIL_DB`
//!
//! Three shapes share the file:
//! - `MobID,SpriteID` redraws a mob with another sprite;
//! - `MobID,SpriteID,PetEquip` also dresses a pet;
//! - `MobID,SpriteID,Sex,Hair,HairColor,Weapon,Shield,HeadTop,HeadMid,HeadLow,Option,ClothColor`
//!   draws the mob as a player character.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

use super::options::option_name;
use super::Transformer;
use crate::constants::SymbolResolver;
use crate::error::{RecordError, RecordResult, ResolveError};
use crate::process::{RawRecord, RecordLayout};

const PLAYER_COLUMNS: usize = 12;
const PET_COLUMNS: usize = 3;

/// A sprite is a mob name when the id is a known mob, the bare id otherwise
/// (job sprites, for instance).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Sprite {
    Name(String),
    Id(u32),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MobAvail {
    pub mob: String,
    pub sprite: Sprite,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sex: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hair_style: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hair_color: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cloth_color: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weapon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shield: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub head_top: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub head_mid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub head_low: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<BTreeMap<String, bool>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pet_equip: Option<String>,
}

impl MobAvail {
    fn new(mob: String, sprite: Sprite) -> Self {
        Self {
            mob,
            sprite,
            sex: None,
            hair_style: None,
            hair_color: None,
            cloth_color: None,
            weapon: None,
            shield: None,
            head_top: None,
            head_mid: None,
            head_low: None,
            options: Vec::new(),
            pet_equip: None,
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct MobAvailDb;

impl Transformer for MobAvailDb {
    type Node = MobAvail;

    const TYPE: &'static str = "MOB_AVAIL_DB";
    const VERSION: u32 = 1;
    const FILE_STEM: &'static str = "mob_avail";
    const LAYOUT: RecordLayout = RecordLayout::columns(2, PLAYER_COLUMNS);

    fn transform(&self, record: &RawRecord<'_>, resolver: &SymbolResolver) -> RecordResult<MobAvail> {
        let mob = resolver
            .resolve_mob(record.id_at(0)?, "mob")
            .map_err(RecordError::Hard)?;

        let sprite_id = record.id_at(1)?;
        let sprite = match resolver.mob_name(sprite_id) {
            Some(name) => Sprite::Name(name.to_string()),
            None => {
                debug!(line = record.line, sprite_id, "sprite is not a mob, keeping id");
                Sprite::Id(sprite_id)
            }
        };

        let mut node = MobAvail::new(mob, sprite);
        match record.len() {
            PLAYER_COLUMNS => dress_player(&mut node, record, resolver)?,
            PET_COLUMNS => node.pet_equip = item(resolver, record.id_at(2)?, "pet equip")?,
            _ => {}
        }
        Ok(node)
    }
}

fn dress_player(
    node: &mut MobAvail,
    record: &RawRecord<'_>,
    resolver: &SymbolResolver,
) -> RecordResult<()> {
    let nonzero = |v: i64| (v != 0).then_some(v);

    node.sex = Some(if record.int(2)? != 0 { "SEX_MALE" } else { "SEX_FEMALE" }.to_string());
    node.hair_style = nonzero(record.int(3)?);
    node.hair_color = nonzero(record.int(4)?);
    node.cloth_color = nonzero(record.int(11)?);

    node.weapon = item(resolver, record.id_at(5)?, "weapon")?;
    node.shield = item(resolver, record.id_at(6)?, "shield")?;
    node.head_top = head_gear(resolver, record.id_at(7)?, "head top")?;
    node.head_mid = head_gear(resolver, record.id_at(8)?, "head mid")?;
    node.head_low = head_gear(resolver, record.id_at(9)?, "head low")?;

    let option = record.int(10)?;
    if option != 0 {
        let name = u32::try_from(option)
            .ok()
            .and_then(option_name)
            .ok_or(RecordError::Hard(ResolveError::UnknownOption(option)))?;
        node.options = vec![BTreeMap::from([(name.to_string(), true)])];
    }
    Ok(())
}

fn item(resolver: &SymbolResolver, id: u32, field: &'static str) -> RecordResult<Option<String>> {
    if id == 0 {
        return Ok(None);
    }
    resolver.resolve_item(id, field).map(Some).map_err(RecordError::Hard)
}

fn head_gear(resolver: &SymbolResolver, view: u32, field: &'static str) -> RecordResult<Option<String>> {
    if view == 0 {
        return Ok(None);
    }
    resolver
        .head_gear_name(view, field)
        .map(Some)
        .map_err(RecordError::Hard)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::split_record;
    use crate::test_support::resolver;

    fn convert(line: &str) -> RecordResult<MobAvail> {
        let record = split_record(line, 1, &MobAvailDb::LAYOUT)
            .expect("well-formed line")
            .expect("not a comment");
        MobAvailDb.transform(&record, &resolver())
    }

    #[test]
    fn sprite_falls_back_to_id() {
        let node = convert("1002,1031\n").unwrap();
        assert_eq!(node.sprite, Sprite::Name("POPORING".into()));

        let node = convert("1002,4012\n").unwrap();
        assert_eq!(node.sprite, Sprite::Id(4012));
        let yaml = serde_yaml::to_string(&node).unwrap();
        assert_eq!(yaml, "Mob: PORING\nSprite: 4012\n");
    }

    #[test]
    fn player_sprite_is_dressed() {
        let node = convert("1113,4012,1,5,2,1201,2101,16,0,21,32,3\n").unwrap();
        assert_eq!(node.sex.as_deref(), Some("SEX_MALE"));
        assert_eq!(node.hair_style, Some(5));
        assert_eq!(node.hair_color, Some(2));
        assert_eq!(node.cloth_color, Some(3));
        assert_eq!(node.weapon.as_deref(), Some("Knife"));
        assert_eq!(node.shield.as_deref(), Some("Guard"));
        assert_eq!(node.head_top.as_deref(), Some("Hat"));
        assert_eq!(node.head_mid, None);
        assert_eq!(node.head_low.as_deref(), Some("Beard"));
        assert_eq!(node.options, vec![BTreeMap::from([("OPTION_RIDING".to_string(), true)])]);

        let yaml = serde_yaml::to_string(&node).unwrap();
        assert!(yaml.contains("Options:\n- OPTION_RIDING: true\n"));
    }

    #[test]
    fn zero_option_emits_no_key() {
        let node = convert("1113,4012,0,0,0,0,0,0,0,0,0,0\n").unwrap();
        assert_eq!(node.sex.as_deref(), Some("SEX_FEMALE"));
        assert!(node.options.is_empty());
        let yaml = serde_yaml::to_string(&node).unwrap();
        assert!(!yaml.contains("Options"));
        assert!(!yaml.contains("HairStyle"));
    }

    #[test]
    fn pet_equip_variant() {
        let node = convert("1002,1002,10013\n").unwrap();
        assert_eq!(node.pet_equip.as_deref(), Some("Backpack"));
        assert_eq!(node.sex, None);

        let err = convert("1002,1002,777\n").unwrap_err();
        assert_eq!(
            err,
            RecordError::Hard(ResolveError::UnknownItem {
                id: 777,
                field: "pet equip"
            })
        );
    }

    #[test]
    fn other_widths_emit_mob_and_sprite_only() {
        let node = convert("1002,1031,1,1,1\n").unwrap();
        assert_eq!(node, MobAvail::new("PORING".into(), Sprite::Name("POPORING".into())));
    }

    #[test]
    fn misses_are_fatal() {
        assert_eq!(
            convert("4242,1002\n").unwrap_err(),
            RecordError::Hard(ResolveError::UnknownMob {
                id: 4242,
                field: "mob"
            })
        );
        assert_eq!(
            convert("1113,4012,1,0,0,0,0,99,0,0,0,0\n").unwrap_err(),
            RecordError::Hard(ResolveError::UnknownView {
                view: 99,
                field: "head top"
            })
        );
        assert_eq!(
            convert("1113,4012,1,0,0,0,0,0,0,0,16384,0\n").unwrap_err(),
            RecordError::Hard(ResolveError::UnknownOption(0x4000))
        );
    }

    #[test]
    fn negative_option_is_not_taken_for_none() {
        assert_eq!(
            convert("1113,4012,1,0,0,0,0,0,0,0,-1,0\n").unwrap_err(),
            RecordError::Hard(ResolveError::UnknownOption(-1))
        );
    }
}
