//! SQLite URL handling for the `--db` flag.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

/// Default database when neither `--db` nor `DRILL_DB_URL` is given.
pub const DEFAULT_DB_URL: &str = "sqlite://drill.sqlite3";

/// Turn a bare path or `sqlite:` URL into an absolute `sqlite://` URL.
///
/// In-memory URLs and URLs already in `sqlite://` form pass through unchanged.
#[must_use]
pub fn normalize_sqlite_url(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed == "sqlite::memory:" || trimmed.starts_with("sqlite://") {
        return trimmed.to_string();
    }
    if trimmed.starts_with("sqlite:file:") {
        return trimmed.to_string();
    }

    let path_str = trimmed.strip_prefix("sqlite:").unwrap_or(trimmed);
    let path = Path::new(path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

/// Make sure the database file and its parent directory exist.
///
/// # Errors
///
/// Fails on an unusable URL or when the file cannot be created.
pub fn prepare_sqlite_file(db_url: &str) -> Result<()> {
    if db_url == "sqlite::memory:" || db_url.starts_with("sqlite:file:") {
        return Ok(());
    }

    let Some(path) = db_url.strip_prefix("sqlite://") else {
        bail!("invalid --db value: {db_url}");
    };
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        bail!("invalid --db value: {db_url}");
    }

    let path = Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)
            .with_context(|| format!("creating {}", path.display()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passes_through_full_urls() {
        assert_eq!(normalize_sqlite_url("sqlite::memory:"), "sqlite::memory:");
        assert_eq!(
            normalize_sqlite_url("sqlite:///tmp/x.sqlite3"),
            "sqlite:///tmp/x.sqlite3"
        );
    }

    #[test]
    fn makes_bare_paths_absolute() {
        let url = normalize_sqlite_url("data/drill.sqlite3");
        assert!(url.starts_with("sqlite:///"));
        assert!(url.ends_with("data/drill.sqlite3"));
        assert_eq!(normalize_sqlite_url("sqlite:/abs.db"), "sqlite:///abs.db");
    }

    #[test]
    fn creates_missing_file_and_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("drill.sqlite3");
        let url = format!("sqlite://{}?mode=rwc", path.display());
        prepare_sqlite_file(&url).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn rejects_unknown_scheme() {
        assert!(prepare_sqlite_file("postgres://nope").is_err());
    }
}
