//! Symbol tables resolving numeric item/mob/skill ids to their Aegis names.
//!
//! The tables are filled once, from the base database and then from the
//! import override, before any schema is converted. Loads only ever add or
//! overwrite entries.

pub mod item;

use anyhow::Result;
use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};
use tracing::{info, instrument, warn};

use crate::error::ResolveError;
use crate::process::{self, RawRecord, RecordLayout};

/// `MAX_MVP_DROP` of the server build the tables come from.
pub const MAX_MVP_DROP: usize = 3;
/// `MAX_MOB_DROP` of the server build the tables come from.
pub const MAX_MOB_DROP: usize = 10;

/// Fixed layout of `mob_db.txt`.
pub const MOB_LAYOUT: RecordLayout = RecordLayout::columns(
    31 + 2 * MAX_MVP_DROP + 2 * MAX_MOB_DROP,
    31 + 2 * MAX_MVP_DROP + 2 * MAX_MOB_DROP,
);
/// Fixed layout of `skill_db.txt`.
pub const SKILL_LAYOUT: RecordLayout = RecordLayout::columns(18, 18);

const MOB_NAME_COLUMN: usize = 1;
const SKILL_NAME_COLUMN: usize = 16;

/// The reference tables every transformer resolves names against.
#[derive(Debug, Default, Clone)]
pub struct SymbolResolver {
    items: HashMap<u32, String>,
    /// head gear view id → item id
    item_views: HashMap<u32, u32>,
    mobs: HashMap<u32, String>,
    skills: HashMap<u32, String>,
}

/// Source files for [`SymbolResolver::build`], each list in load order.
#[derive(Debug, Default, Clone)]
pub struct ReferenceSources {
    pub items: Vec<PathBuf>,
    pub mobs: Vec<PathBuf>,
    pub skills: Vec<PathBuf>,
}

impl ReferenceSources {
    /// `item_db.txt`, `mob_db.txt` and `skill_db.txt` in every directory, in order.
    pub fn from_dirs<P: AsRef<Path>>(dirs: &[P]) -> Self {
        let join = |name: &str| -> Vec<PathBuf> {
            dirs.iter().map(|d| d.as_ref().join(name)).collect()
        };
        Self {
            items: join("item_db.txt"),
            mobs: join("mob_db.txt"),
            skills: join("skill_db.txt"),
        }
    }
}

impl SymbolResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Populate every table from `sources`. Missing files are skipped with a
    /// warning; the import directory is usually sparse.
    pub fn build(sources: &ReferenceSources) -> Result<Self> {
        let mut resolver = Self::new();
        for path in &sources.items {
            resolver.load_items(path)?;
        }
        for path in &sources.mobs {
            resolver.load_mobs(path)?;
        }
        for path in &sources.skills {
            resolver.load_skills(path)?;
        }
        info!(
            items = resolver.items.len(),
            views = resolver.item_views.len(),
            mobs = resolver.mobs.len(),
            skills = resolver.skills.len(),
            "reference tables ready"
        );
        Ok(resolver)
    }

    /// Load `item_db.txt`. Returns the number of entries read, 0 if absent.
    #[instrument(level = "info", skip(self, path), fields(path = %path.as_ref().display()))]
    pub fn load_items<P: AsRef<Path>>(&mut self, path: P) -> Result<usize> {
        let Some(text) = read_optional(path.as_ref())? else {
            return Ok(0);
        };
        let count = self.ingest_items(&text);
        info!("Done reading '{}' entries in '{}'", count, path.as_ref().display());
        Ok(count)
    }

    /// Load `mob_db.txt`. Returns the number of entries read, 0 if absent.
    #[instrument(level = "info", skip(self, path), fields(path = %path.as_ref().display()))]
    pub fn load_mobs<P: AsRef<Path>>(&mut self, path: P) -> Result<usize> {
        let Some(text) = read_optional(path.as_ref())? else {
            return Ok(0);
        };
        let count = self.ingest_mobs(&text);
        info!("Done reading '{}' entries in '{}'", count, path.as_ref().display());
        Ok(count)
    }

    /// Load `skill_db.txt`. Returns the number of entries read, 0 if absent.
    #[instrument(level = "info", skip(self, path), fields(path = %path.as_ref().display()))]
    pub fn load_skills<P: AsRef<Path>>(&mut self, path: P) -> Result<usize> {
        let Some(text) = read_optional(path.as_ref())? else {
            return Ok(0);
        };
        let count = self.ingest_skills(&text);
        info!("Done reading '{}' entries in '{}'", count, path.as_ref().display());
        Ok(count)
    }

    /// Register every record of an `item_db.txt` text.
    pub fn ingest_items(&mut self, text: &str) -> usize {
        ingest(text, item::ITEM_LAYOUT, |record| {
            item::ingest_item(self, record);
        })
    }

    /// Register every record of a `mob_db.txt` text.
    pub fn ingest_mobs(&mut self, text: &str) -> usize {
        ingest(text, MOB_LAYOUT, |record| {
            if let Ok(name) = record.field(MOB_NAME_COLUMN) {
                self.insert_mob(process::utils::parse_id(record.id()), name);
            }
        })
    }

    /// Register every record of a `skill_db.txt` text.
    pub fn ingest_skills(&mut self, text: &str) -> usize {
        ingest(text, SKILL_LAYOUT, |record| {
            if let Ok(name) = record.field(SKILL_NAME_COLUMN) {
                self.insert_skill(process::utils::parse_id(record.id()), name);
            }
        })
    }

    pub fn insert_item(&mut self, id: u32, name: &str) {
        self.items.insert(id, name.trim().to_string());
    }

    /// Map a head gear view id to its item. The first registration wins.
    pub fn insert_item_view(&mut self, view: u32, item_id: u32) -> bool {
        if self.item_views.contains_key(&view) {
            return false;
        }
        self.item_views.insert(view, item_id);
        true
    }

    pub fn insert_mob(&mut self, id: u32, name: &str) {
        self.mobs.insert(id, name.trim().to_string());
    }

    pub fn insert_skill(&mut self, id: u32, name: &str) {
        self.skills.insert(id, name.trim().to_string());
    }

    pub fn item_name(&self, id: u32) -> Option<&str> {
        self.items.get(&id).map(String::as_str)
    }

    pub fn mob_name(&self, id: u32) -> Option<&str> {
        self.mobs.get(&id).map(String::as_str)
    }

    pub fn skill_name(&self, id: u32) -> Option<&str> {
        self.skills.get(&id).map(String::as_str)
    }

    pub fn item_for_view(&self, view: u32) -> Option<u32> {
        self.item_views.get(&view).copied()
    }

    /// Item name, or the error naming `field`.
    pub fn resolve_item(&self, id: u32, field: &'static str) -> Result<String, ResolveError> {
        self.item_name(id)
            .map(str::to_string)
            .ok_or(ResolveError::UnknownItem { id, field })
    }

    /// Mob name, or the error naming `field`.
    pub fn resolve_mob(&self, id: u32, field: &'static str) -> Result<String, ResolveError> {
        self.mob_name(id)
            .map(str::to_string)
            .ok_or(ResolveError::UnknownMob { id, field })
    }

    /// Skill name, or the error naming `field`.
    pub fn resolve_skill(&self, id: u32, field: &'static str) -> Result<String, ResolveError> {
        self.skill_name(id)
            .map(str::to_string)
            .ok_or(ResolveError::UnknownSkill { id, field })
    }

    /// Name of the head gear item drawn with sprite `view`.
    ///
    /// Two lookups: view id → item id, then item id → name. A miss in either
    /// step is reported, never skipped.
    pub fn head_gear_name(&self, view: u32, field: &'static str) -> Result<String, ResolveError> {
        let item_id = self
            .item_for_view(view)
            .ok_or(ResolveError::UnknownView { view, field })?;
        self.resolve_item(item_id, field)
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn mob_count(&self) -> usize {
        self.mobs.len()
    }

    pub fn skill_count(&self) -> usize {
        self.skills.len()
    }
}

/// Feed every well-formed record of `text` to `register`, logging rejects.
fn ingest<F>(text: &str, layout: RecordLayout, mut register: F) -> usize
where
    F: FnMut(&RawRecord<'_>),
{
    let mut count = 0;
    for (_, result) in process::read_records(text, layout) {
        match result {
            Ok(record) => {
                register(&record);
                count += 1;
            }
            Err(e) => warn!("{}, skipping", e),
        }
    }
    count
}

fn read_optional(path: &Path) -> Result<Option<String>> {
    if !path.is_file() {
        warn!("File not found \"{}\", skipping.", path.display());
        return Ok(None);
    }
    process::read_source(path).map(Some)
}
