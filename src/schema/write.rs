use anyhow::{Context, Result};
use serde::Serialize;
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};
use tracing::debug;

/// Serialize `doc` as YAML and write it to `path`
///
/// - the document goes to a hidden `.<name>.tmp` sibling first, then is
///   renamed over `path`, so a failed write never leaves a truncated file
/// - output always ends with a newline
pub fn write_document<T: Serialize, P: AsRef<Path>>(doc: &T, path: P) -> Result<()> {
    let path = path.as_ref();
    let mut yaml = serde_yaml::to_string(doc)
        .with_context(|| format!("serializing YAML for {}", path.display()))?;
    if !yaml.ends_with('\n') {
        yaml.push('\n');
    }

    let tmp_path = tmp_sibling(path);
    let mut tmp = fs::File::create(&tmp_path)
        .with_context(|| format!("creating {}", tmp_path.display()))?;
    tmp.write_all(yaml.as_bytes())
        .with_context(|| format!("writing {}", tmp_path.display()))?;
    tmp.sync_all()
        .with_context(|| format!("flushing {}", tmp_path.display()))?;
    drop(tmp);

    fs::rename(&tmp_path, path)
        .with_context(|| format!("renaming {} -> {}", tmp_path.display(), path.display()))?;

    debug!(path = %path.display(), bytes = yaml.len(), "document written");
    Ok(())
}

fn tmp_sibling(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{}.tmp", name))
}
