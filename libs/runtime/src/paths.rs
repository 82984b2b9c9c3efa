use std::env;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HomeDirError {
    #[error("cannot determine user home directory")]
    NoHome,

    #[error("failed to create home directory '{path}': {source}")]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to resolve current directory: {0}")]
    CurrentDir(#[source] std::io::Error),
}

fn user_home() -> Result<PathBuf, HomeDirError> {
    dirs::home_dir().ok_or(HomeDirError::NoHome)
}

/// Parent of the default service home: `%APPDATA%` on Windows, the user home elsewhere.
fn default_base() -> Result<PathBuf, HomeDirError> {
    #[cfg(target_os = "windows")]
    let base = dirs::data_dir();
    #[cfg(not(target_os = "windows"))]
    let base = dirs::home_dir();
    base.ok_or(HomeDirError::NoHome)
}

/// Resolve the service home directory into an absolute path.
///
/// - `None` falls back to `<user home>/<default_subdir>` (`%APPDATA%` on Windows).
/// - A leading `~` is expanded to the user home.
/// - Relative paths are anchored at the current working directory.
///
/// When `create` is set the directory (and its parents) is created.
pub fn resolve_home_dir(
    configured: Option<String>,
    default_subdir: &str,
    create: bool,
) -> Result<PathBuf, HomeDirError> {
    let path = match configured {
        None => default_base()?.join(default_subdir),
        Some(raw) => expand_tilde(&raw)?,
    };

    let path = if path.is_absolute() {
        path
    } else {
        env::current_dir()
            .map_err(HomeDirError::CurrentDir)?
            .join(path)
    };

    if create {
        std::fs::create_dir_all(&path).map_err(|source| HomeDirError::Create {
            path: path.clone(),
            source,
        })?;
    }

    Ok(path)
}

fn expand_tilde(raw: &str) -> Result<PathBuf, HomeDirError> {
    if raw == "~" {
        return user_home();
    }
    match raw.strip_prefix("~/").or_else(|| raw.strip_prefix("~\\")) {
        Some(rest) => Ok(user_home()?.join(rest)),
        None => Ok(Path::new(raw).to_path_buf()),
    }
}
