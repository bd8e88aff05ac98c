use crate::config;
use std::{
    fs, io,
    path::{Component, Path, PathBuf},
};

/// Public URL prefix under which stored training files are referenced.
pub const UPLOADS_URL_PREFIX: &str = "/uploads/";

/// Create a directory (and all parents) if it doesn't exist, and return the path.
pub fn ensure_dir<P: AsRef<Path>>(path: P) -> io::Result<PathBuf> {
    let p = path.as_ref();
    fs::create_dir_all(p)?;
    Ok(p.to_path_buf())
}

/// Upload root (absolute), from `config::upload_root()`.
/// If relative in env, resolve against current_dir().
pub fn upload_root() -> PathBuf {
    absolutize(config::upload_root())
}

fn absolutize(root: impl Into<PathBuf>) -> PathBuf {
    let p = root.into();
    if p.is_absolute() {
        p
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(p)
    }
}

/// `/uploads/{stored_name}`
pub fn file_url(stored_name: &str) -> String {
    format!("{UPLOADS_URL_PREFIX}{stored_name}")
}

/// Maps a stored `file_url` back onto disk under `root`.
///
/// Returns `None` unless the url is `/uploads/<name>` with `<name>` being a
/// single plain path component.
pub fn resolve_file_url(root: &Path, url: &str) -> Option<PathBuf> {
    let name = url.strip_prefix(UPLOADS_URL_PREFIX)?;
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(part)), None) => Some(root.join(part)),
        _ => None,
    }
}

/// Removes the file behind `url` if it exists.
///
/// Returns `Ok(true)` when a file was removed and `Ok(false)` when there was
/// nothing to remove (or the url does not point into `root`).
pub fn remove_stored_file(root: &Path, url: &str) -> io::Result<bool> {
    let Some(path) = resolve_file_url(root, url) else {
        return Ok(false);
    };
    match fs::remove_file(&path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}
