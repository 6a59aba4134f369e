//! Per-database transformers and the pass that drives them over a source.

pub mod document;
pub mod guild_skill_tree;
pub mod mob_avail;
pub mod options;
pub mod pet;
pub mod quest;
pub mod types;
pub mod write;

use serde::Serialize;
use tracing::{debug, error, info, instrument, trace, warn};

use crate::constants::SymbolResolver;
use crate::error::{RecordError, RecordResult, ResolveError};
use crate::process::{self, RawRecord, RecordLayout};

pub use document::DocumentBuilder;
pub use guild_skill_tree::GuildSkillTree;
pub use mob_avail::MobAvailDb;
pub use pet::PetDb;
pub use quest::QuestDb;
pub use types::{Header, OutputDocument};
pub use write::write_document;

/// Converts one record layout into one kind of YAML node.
pub trait Transformer {
    type Node: Serialize;

    /// `Header.Type` of the produced document
    const TYPE: &'static str;
    /// `Header.Version` of the produced document
    const VERSION: u32;
    /// Source file name without extension, e.g. `pet_db`
    const FILE_STEM: &'static str;
    const LAYOUT: RecordLayout;

    fn transform(&self, record: &RawRecord<'_>, resolver: &SymbolResolver)
        -> RecordResult<Self::Node>;
}

/// Line counters for one pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PassStats {
    pub emitted: usize,
    /// records dropped by the transformer
    pub skipped: usize,
    /// lines the reader could not split
    pub rejected: usize,
}

/// How a pass over one source file ended.
#[derive(Debug)]
pub enum PassOutcome<T> {
    Completed {
        document: OutputDocument<T>,
        stats: PassStats,
    },
    /// A fatal resolution failure stopped the pass at `line`. `partial` holds
    /// everything produced before it; persisting it is the caller's call.
    Aborted {
        partial: OutputDocument<T>,
        stats: PassStats,
        line: usize,
        cause: ResolveError,
    },
}

impl<T> PassOutcome<T> {
    pub fn is_aborted(&self) -> bool {
        matches!(self, PassOutcome::Aborted { .. })
    }

    pub fn stats(&self) -> PassStats {
        match self {
            PassOutcome::Completed { stats, .. } | PassOutcome::Aborted { stats, .. } => *stats,
        }
    }

    pub fn document(&self) -> &OutputDocument<T> {
        match self {
            PassOutcome::Completed { document, .. } => document,
            PassOutcome::Aborted { partial, .. } => partial,
        }
    }

    pub fn into_document(self) -> OutputDocument<T> {
        match self {
            PassOutcome::Completed { document, .. } => document,
            PassOutcome::Aborted { partial, .. } => partial,
        }
    }
}

/// Run `transformer` over every record of `text`, in line order.
#[instrument(level = "info", skip_all, fields(schema = T::TYPE))]
pub fn run_pass<T: Transformer>(
    transformer: &T,
    text: &str,
    resolver: &SymbolResolver,
) -> PassOutcome<T::Node> {
    let mut builder = DocumentBuilder::new(T::TYPE, T::VERSION);
    let mut stats = PassStats::default();

    for (line, result) in process::read_records(text, T::LAYOUT) {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                warn!("{}, skipping", e);
                stats.rejected += 1;
                continue;
            }
        };

        match transformer.transform(&record, resolver) {
            Ok(node) => {
                let idx = builder.push(node);
                trace!(line, idx, id = record.id(), "converted");
                stats.emitted += 1;
            }
            Err(RecordError::Hard(cause)) => {
                error!(line, id = record.id(), "{}", cause);
                error!("{}: aborting conversion at line {}", T::FILE_STEM, line);
                return PassOutcome::Aborted {
                    partial: builder.finish(),
                    stats,
                    line,
                    cause,
                };
            }
            Err(e) => {
                warn!(line, id = record.id(), "{}", e);
                stats.skipped += 1;
            }
        }
    }

    debug!(?stats, "pass finished");
    info!(
        "Done converting '{}' entries of '{}'",
        stats.emitted,
        T::FILE_STEM
    );
    PassOutcome::Completed {
        document: builder.finish(),
        stats,
    }
}
