//! `quest_db.txt` → `QUEST_DB`
//!
//! `Id,Time,Mob1,Count1,Mob2,Count2,Mob3,Count3,DropMob1,DropItem1,DropRate1,
//! ...,DropMob3,DropItem3,DropRate3,"Title"`. The title is the last column and
//! may itself contain the delimiter.

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::Transformer;
use crate::constants::SymbolResolver;
use crate::error::{RecordError, RecordResult};
use crate::process::{utils::atoi, RawRecord, RecordLayout};

pub const MAX_QUEST_OBJECTIVES: usize = 3;
pub const MAX_QUEST_DROPS: usize = 3;

const TITLE_COLUMN: usize = 2 + MAX_QUEST_OBJECTIVES * 2 + MAX_QUEST_DROPS * 3;
const DROP_COLUMN: usize = 2 + MAX_QUEST_OBJECTIVES * 2;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Quest {
    pub id: u32,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_limit: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_at_hour: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_at_minute: Option<i64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub target: Vec<QuestTarget>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub drop: Vec<QuestDrop>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct QuestTarget {
    pub mob: String,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct QuestDrop {
    pub mob: String,
    pub item: String,
    pub rate: i64,
}

/// When a quest expires: after a duration, or at a time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct QuestTime {
    limit: Option<i64>,
    hour: Option<i64>,
    minute: Option<i64>,
}

fn parse_time(raw: &str) -> QuestTime {
    let positive = |v: i64| (v > 0).then_some(v);
    match raw.split_once(':') {
        Some((hour, minute)) => QuestTime {
            limit: None,
            hour: positive(atoi(hour)),
            minute: positive(atoi(minute)),
        },
        None => QuestTime {
            limit: Some(atoi(raw)).filter(|v| *v != 0),
            ..QuestTime::default()
        },
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct QuestDb;

impl QuestDb {
    /// Title column plus whatever the split cut off of it, quotes removed.
    fn title(record: &RawRecord<'_>) -> String {
        let fields = record.fields();
        let joined = fields.get(TITLE_COLUMN..).unwrap_or_default().join(",");
        joined.replace('"', "")
    }
}

impl Transformer for QuestDb {
    type Node = Quest;

    const TYPE: &'static str = "QUEST_DB";
    const VERSION: u32 = 1;
    const FILE_STEM: &'static str = "quest_db";
    const LAYOUT: RecordLayout = RecordLayout::columns(TITLE_COLUMN + 1, 100);

    fn transform(&self, record: &RawRecord<'_>, resolver: &SymbolResolver) -> RecordResult<Quest> {
        let raw_id = record.int(0)?;
        let id = match u32::try_from(raw_id) {
            Ok(id) if raw_id < i64::from(i32::MAX) => id,
            _ => {
                return Err(RecordError::Rejected(format!(
                    "invalid quest id '{}' in line {}",
                    raw_id, record.line
                )))
            }
        };

        let time = parse_time(record.field(1)?);

        let mut target = Vec::new();
        for i in 0..MAX_QUEST_OBJECTIVES {
            let mob_id = record.id_at(i * 2 + 2)?;
            let count = record.int(i * 2 + 3)?;
            if mob_id == 0 || count == 0 {
                continue;
            }
            match resolver.mob_name(mob_id) {
                Some(mob) => target.push(QuestTarget {
                    mob: mob.to_string(),
                    count,
                }),
                None => warn!(
                    line = record.line,
                    "quest_db: Invalid mob-class {}, target not read.", mob_id
                ),
            }
        }

        let mut drop = Vec::new();
        for i in 0..MAX_QUEST_DROPS {
            let base = DROP_COLUMN + i * 3;
            let mob_id = record.id_at(base)?;
            let item_id = record.id_at(base + 1)?;
            if mob_id == 0 || item_id == 0 {
                continue;
            }
            let Some(mob) = resolver.mob_name(mob_id) else {
                warn!(
                    line = record.line,
                    "quest_db: Invalid mob-class {}, drop not read.", mob_id
                );
                continue;
            };
            let item = resolver
                .resolve_item(item_id, "quest drop")
                .map_err(RecordError::Hard)?;
            drop.push(QuestDrop {
                mob: mob.to_string(),
                item,
                rate: record.int(base + 2)?,
            });
        }

        Ok(Quest {
            id,
            title: Self::title(record),
            time_limit: time.limit,
            time_at_hour: time.hour,
            time_at_minute: time.minute,
            target,
            drop,
        })
    }
}
