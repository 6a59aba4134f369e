use anyhow::{bail, Result};
use clap::Parser;
use csv2yaml::{run_all, AutoConfirm, Confirm, DbLayout, Mode, SchemaKind, StdinConfirm};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Convert legacy .txt databases to the .yml format"
)]
struct Args {
    /// Database root
    #[arg(long, default_value = "db", env = "CSV2YAML_DB_PATH")]
    db_path: PathBuf,

    /// Server mode subdirectory
    #[arg(long, value_enum, default_value_t = Mode::Re, env = "CSV2YAML_MODE")]
    mode: Mode,

    /// Override subdirectory of the database root
    #[arg(long, default_value = "import", env = "CSV2YAML_IMPORT_DIR")]
    import_dir: String,

    /// Answer yes to every question
    #[arg(short, long, env = "CSV2YAML_YES")]
    yes: bool,

    /// Write what was converted before a pass aborted
    #[arg(long)]
    keep_partial: bool,

    /// Only convert these databases (repeatable)
    #[arg(long, value_enum)]
    only: Vec<SchemaKind>,
}

fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    let args = Args::parse();
    info!(db = %args.db_path.display(), mode = ?args.mode, "startup");

    let layout = DbLayout::new(args.db_path, args.mode, args.import_dir);
    let mut confirm: Box<dyn Confirm> = if args.yes {
        Box::new(AutoConfirm(true))
    } else {
        Box::new(StdinConfirm)
    };

    let summary = run_all(&layout, &args.only, confirm.as_mut(), args.keep_partial)?;
    summary.log();

    if !summary.is_clean() {
        bail!("conversion finished with errors");
    }
    info!("conversion finished");
    Ok(())
}
