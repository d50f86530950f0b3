//! Dotfile copying.
//!
//! Copies each declared `(source, destination)` pair from the source tree
//! into the base path. Missing sources are a warn-and-skip condition; any
//! other failure is fatal and halts the remaining copies (already-copied
//! files stay in place — copying is not atomic).

use std::collections::BTreeMap;
use std::path::Path;

use crate::ExecutionMode;
use crate::error::CopyError;
use crate::logging::Logger;

/// Outcome of a copy run.
///
/// In dry-run mode `copied` lists the sources that would have been copied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CopyReport {
    /// Relative source paths that were copied (or would be, in dry-run).
    pub copied: Vec<String>,
    /// Relative source paths skipped because the source does not exist.
    pub skipped: Vec<String>,
}

/// Copy every declared dotfile from `source_root` into `base_dir`.
///
/// In apply mode the base directory (and its parents) is created first;
/// parent directories of individual destinations are not — a missing one is
/// a fatal I/O error. In dry-run mode nothing is created, not even
/// `base_dir`.
///
/// # Errors
///
/// Returns a [`CopyError`] when the base directory cannot be created, a
/// source is not a regular file, or a copy fails. Missing sources are not
/// errors; they are reported in [`CopyReport::skipped`]. A dry run performs
/// no fallible action and always succeeds.
pub fn copy_all(
    mapping: &BTreeMap<String, String>,
    source_root: &Path,
    base_dir: &Path,
    mode: ExecutionMode,
    log: &Logger,
) -> Result<CopyReport, CopyError> {
    if !mode.is_dry_run() {
        std::fs::create_dir_all(base_dir).map_err(|source| CopyError::CreateRoot {
            path: base_dir.display().to_string(),
            source,
        })?;
    }

    let mut report = CopyReport::default();
    for (src_rel, dest_rel) in mapping {
        let src = source_root.join(src_rel);
        let dest = base_dir.join(dest_rel);

        // lstat, so a symlink is seen as itself rather than its target.
        let stat = std::fs::symlink_metadata(&src);
        if matches!(&stat, Err(e) if e.kind() == std::io::ErrorKind::NotFound) {
            log.warn(&format!(
                "source file {} does not exist, skipping",
                src.display()
            ));
            report.skipped.push(src_rel.clone());
            continue;
        }

        if mode.is_dry_run() {
            log.dry_run(&format!("copy {} to {}", src.display(), dest.display()));
            report.copied.push(src_rel.clone());
            continue;
        }

        let metadata = stat.map_err(|source| CopyError::Io {
            from: src.display().to_string(),
            to: dest.display().to_string(),
            source,
        })?;
        if !metadata.file_type().is_file() {
            return Err(CopyError::NotRegular {
                path: src.display().to_string(),
            });
        }

        log.info(&format!("copying {} to {}", src.display(), dest.display()));
        std::fs::copy(&src, &dest).map_err(|source| CopyError::Io {
            from: src.display().to_string(),
            to: dest.display().to_string(),
            source,
        })?;
        report.copied.push(src_rel.clone());
    }

    Ok(report)
}
