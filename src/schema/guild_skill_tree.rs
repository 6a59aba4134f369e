//! `guild_skill_tree.txt` → `GUILD_SKILL_TREE_DB`
//!
//! `<skill id>,<max lv>,<req id1>,<req lv1>,...,<req id5>,<req lv5>`

use serde::{Deserialize, Serialize};

use super::Transformer;
use crate::constants::SymbolResolver;
use crate::error::{RecordError, RecordResult};
use crate::process::{RawRecord, RecordLayout};

pub const MAX_GUILD_SKILL_REQUIRE: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GuildSkill {
    pub id: String,
    pub max_level: i64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<RequiredSkill>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RequiredSkill {
    pub id: String,
    pub level: i64,
}

/// Guild skills and their prerequisites. Every skill id must resolve; a miss
/// means the skill tables are out of date, so the whole pass stops.
#[derive(Debug, Default, Clone, Copy)]
pub struct GuildSkillTree;

impl Transformer for GuildSkillTree {
    type Node = GuildSkill;

    const TYPE: &'static str = "GUILD_SKILL_TREE_DB";
    const VERSION: u32 = 1;
    const FILE_STEM: &'static str = "guild_skill_tree";
    const LAYOUT: RecordLayout = RecordLayout::columns(
        2 + MAX_GUILD_SKILL_REQUIRE * 2,
        2 + MAX_GUILD_SKILL_REQUIRE * 2,
    );

    fn transform(&self, record: &RawRecord<'_>, resolver: &SymbolResolver) -> RecordResult<GuildSkill> {
        let skill_id = record.id_at(0)?;
        let id = resolver
            .resolve_skill(skill_id, "skill")
            .map_err(RecordError::Hard)?;

        let mut required = Vec::new();
        for i in 0..MAX_GUILD_SKILL_REQUIRE {
            let required_id = record.id_at(i * 2 + 2)?;
            let level = record.int(i * 2 + 3)?;
            if required_id == 0 || level == 0 {
                continue;
            }
            let name = resolver
                .resolve_skill(required_id, "required skill")
                .map_err(RecordError::Hard)?;
            required.push(RequiredSkill { id: name, level });
        }

        Ok(GuildSkill {
            id,
            max_level: record.int(1)?,
            required,
        })
    }
}
