//! Drives the migration of a database tree: loads the reference tables, then
//! converts every legacy `.txt` source that has a transformer into `.yml`.

use anyhow::{Context, Result};
use clap::ValueEnum;
use std::{
    fmt,
    io::{self, BufRead, Write},
    path::PathBuf,
};
use tracing::{debug, error, info, instrument, warn};

use crate::constants::{ReferenceSources, SymbolResolver};
use crate::process::read_source;
use crate::schema::{
    self, write_document, GuildSkillTree, MobAvailDb, PassOutcome, PetDb, QuestDb, Transformer,
};

/// Server flavour; selects the mode subdirectory of the database root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    #[value(name = "pre-re")]
    PreRe,
    Re,
}

impl Mode {
    pub fn dir_name(self) -> &'static str {
        match self {
            Mode::PreRe => "pre-re",
            Mode::Re => "re",
        }
    }
}

/// Where the databases live.
#[derive(Debug, Clone)]
pub struct DbLayout {
    pub db_path: PathBuf,
    pub mode: Mode,
    /// Name of the override subdirectory, relative to `db_path`
    pub import_dir: String,
}

impl DbLayout {
    pub fn new<P: Into<PathBuf>>(db_path: P, mode: Mode, import_dir: impl Into<String>) -> Self {
        Self {
            db_path: db_path.into(),
            mode,
            import_dir: import_dir.into(),
        }
    }

    pub fn mode_dir(&self) -> PathBuf {
        self.db_path.join(self.mode.dir_name())
    }

    pub fn import_path(&self) -> PathBuf {
        self.db_path.join(&self.import_dir)
    }

    /// Directories the item/mob/skill tables are read from, in load order.
    pub fn reference_dirs(&self) -> Vec<PathBuf> {
        vec![self.mode_dir(), self.import_path()]
    }

    /// Candidates for mode-independent databases.
    pub fn main_paths(&self) -> Vec<PathBuf> {
        vec![self.db_path.clone(), self.import_path()]
    }

    /// Candidates for databases that differ between modes.
    pub fn mode_paths(&self) -> Vec<PathBuf> {
        vec![self.mode_dir(), self.import_path()]
    }
}

/// Answers the yes/no questions asked before converting or overwriting.
pub trait Confirm {
    fn confirm(&mut self, question: &str) -> bool;
}

/// Asks on stdout and reads the answer from stdin. Only `y`/`Y` accept.
#[derive(Debug, Default)]
pub struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&mut self, question: &str) -> bool {
        print!("{} (Y/N) ", question);
        if io::stdout().flush().is_err() {
            return false;
        }
        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(_) => matches!(answer.trim_start().chars().next(), Some('y' | 'Y')),
            Err(e) => {
                warn!("could not read answer: {}", e);
                false
            }
        }
    }
}

/// Gives the same answer to every question without prompting.
#[derive(Debug, Clone, Copy)]
pub struct AutoConfirm(pub bool);

impl Confirm for AutoConfirm {
    fn confirm(&mut self, question: &str) -> bool {
        debug!(answer = self.0, "{}", question);
        self.0
    }
}

/// What happened to the candidate sources of one schema.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FileSummary {
    pub converted: usize,
    pub aborted: usize,
    pub declined: usize,
}

/// The databases this tool migrates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum SchemaKind {
    GuildSkillTree,
    Pet,
    Quest,
    MobAvail,
}

impl SchemaKind {
    pub const ALL: [SchemaKind; 4] = [
        SchemaKind::GuildSkillTree,
        SchemaKind::Pet,
        SchemaKind::Quest,
        SchemaKind::MobAvail,
    ];

    /// Directories searched for this database's source, in order.
    pub fn candidate_dirs(self, layout: &DbLayout) -> Vec<PathBuf> {
        match self {
            SchemaKind::GuildSkillTree | SchemaKind::MobAvail => layout.main_paths(),
            SchemaKind::Pet | SchemaKind::Quest => layout.mode_paths(),
        }
    }
}

impl fmt::Display for SchemaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SchemaKind::GuildSkillTree => GuildSkillTree::FILE_STEM,
            SchemaKind::Pet => PetDb::FILE_STEM,
            SchemaKind::Quest => QuestDb::FILE_STEM,
            SchemaKind::MobAvail => MobAvailDb::FILE_STEM,
        };
        f.write_str(name)
    }
}

#[derive(Debug, Default)]
pub struct RunSummary {
    pub schemas: Vec<(SchemaKind, FileSummary)>,
    /// Schemas whose processing stopped on an I/O error
    pub failed: Vec<SchemaKind>,
}

impl RunSummary {
    pub fn get(&self, kind: SchemaKind) -> Option<FileSummary> {
        self.schemas
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, s)| *s)
    }

    /// No aborted pass and no failed schema.
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty() && self.schemas.iter().all(|(_, s)| s.aborted == 0)
    }

    pub fn log(&self) {
        for (kind, s) in &self.schemas {
            info!(
                schema = %kind,
                converted = s.converted,
                aborted = s.aborted,
                declined = s.declined,
                "summary"
            );
        }
        for kind in &self.failed {
            error!(schema = %kind, "failed");
        }
    }
}

/// Convert `<dir>/<stem>.txt` to `<dir>/<stem>.yml` for every candidate dir.
///
/// An aborted pass is logged and its partial body dropped unless
/// `keep_partial` is set. Read and write failures end this schema.
#[instrument(level = "info", skip_all, fields(schema = T::TYPE))]
pub fn process<T: Transformer>(
    transformer: &T,
    dirs: &[PathBuf],
    resolver: &SymbolResolver,
    confirm: &mut dyn Confirm,
    keep_partial: bool,
) -> Result<FileSummary> {
    let mut summary = FileSummary::default();

    for dir in dirs {
        let source = dir.join(format!("{}.txt", T::FILE_STEM));
        let target = dir.join(format!("{}.yml", T::FILE_STEM));
        if !source.is_file() {
            debug!(path = %source.display(), "no source, skipping");
            continue;
        }

        if !confirm.confirm(&format!(
            "Found the file \"{}\", which requires migration to yml.\nDo you want to convert it now?",
            source.display()
        )) {
            summary.declined += 1;
            continue;
        }

        let text = read_source(&source)?;
        let document = match schema::run_pass(transformer, &text, resolver) {
            PassOutcome::Completed { document, .. } => {
                summary.converted += 1;
                document
            }
            PassOutcome::Aborted {
                partial, line, cause, ..
            } => {
                summary.aborted += 1;
                error!(
                    path = %source.display(),
                    line,
                    "conversion aborted: {}", cause
                );
                if !keep_partial {
                    continue;
                }
                warn!(
                    entries = partial.len(),
                    "keeping partial document for {}",
                    target.display()
                );
                partial
            }
        };

        if target.exists()
            && !confirm.confirm(&format!(
                "The file \"{}\" already exists.\nDo you want to replace it?",
                target.display()
            ))
        {
            summary.declined += 1;
            continue;
        }

        write_document(&document, &target).with_context(|| {
            format!(
                "Failed to write the converted yml data to \"{}\"",
                target.display()
            )
        })?;
        info!(
            "Converted '{}' entries of {} to {}",
            document.len(),
            source.display(),
            target.display()
        );
    }

    Ok(summary)
}

/// Load the reference tables, then convert every selected schema.
///
/// An empty `only` means every schema. A schema that fails is recorded and
/// the others still run.
pub fn run_all(
    layout: &DbLayout,
    only: &[SchemaKind],
    confirm: &mut dyn Confirm,
    keep_partial: bool,
) -> Result<RunSummary> {
    let resolver = SymbolResolver::build(&ReferenceSources::from_dirs(&layout.reference_dirs()))
        .context("loading reference tables")?;

    let selected: Vec<SchemaKind> = if only.is_empty() {
        SchemaKind::ALL.to_vec()
    } else {
        SchemaKind::ALL
            .into_iter()
            .filter(|k| only.contains(k))
            .collect()
    };

    let mut summary = RunSummary::default();
    for kind in selected {
        let result = run_one(kind, layout, &resolver, confirm, keep_partial);
        match result {
            Ok(s) => summary.schemas.push((kind, s)),
            Err(e) => {
                error!(schema = %kind, "{:#}", e);
                summary.failed.push(kind);
            }
        }
    }
    Ok(summary)
}

fn run_one(
    kind: SchemaKind,
    layout: &DbLayout,
    resolver: &SymbolResolver,
    confirm: &mut dyn Confirm,
    keep_partial: bool,
) -> Result<FileSummary> {
    let dirs = kind.candidate_dirs(layout);
    match kind {
        SchemaKind::GuildSkillTree => process(&GuildSkillTree, &dirs, resolver, confirm, keep_partial),
        SchemaKind::Pet => process(&PetDb, &dirs, resolver, confirm, keep_partial),
        SchemaKind::Quest => process(&QuestDb, &dirs, resolver, confirm, keep_partial),
        SchemaKind::MobAvail => process(&MobAvailDb, &dirs, resolver, confirm, keep_partial),
    }
}
