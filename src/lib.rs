pub mod constants;
pub mod convert;
pub mod error;
pub mod process;
pub mod schema;

#[cfg(test)]
mod test_support;

pub use constants::{ReferenceSources, SymbolResolver};
pub use convert::{run_all, AutoConfirm, Confirm, DbLayout, Mode, RunSummary, SchemaKind, StdinConfirm};
pub use error::{LineError, RecordError, ResolveError};
pub use schema::{run_pass, PassOutcome, Transformer};
