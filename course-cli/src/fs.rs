//! Capability-based file access for request inputs.

use std::io;

use camino::Utf8Path;
use cap_std::{ambient_authority, fs_utf8};

/// Open a UTF-8 file path using ambient authority.
pub(crate) fn open_utf8_file(path: &Utf8Path) -> io::Result<fs_utf8::File> {
    fs_utf8::File::open_ambient(path, ambient_authority())
}

/// Open the directory holding `path` and return it with the file name.
fn open_parent_dir(path: &Utf8Path) -> io::Result<(fs_utf8::Dir, &str)> {
    let name = path
        .file_name()
        .ok_or_else(|| io::Error::other(format!("{path} does not name a file")))?;
    let parent = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };
    let dir = fs_utf8::Dir::open_ambient_dir(parent, ambient_authority())?;
    Ok((dir, name))
}

/// Whether `path` exists and is a regular file.
///
/// A missing file or parent directory surfaces as
/// [`io::ErrorKind::NotFound`].
pub(crate) fn file_is_file(path: &Utf8Path) -> io::Result<bool> {
    let (dir, name) = open_parent_dir(path)?;
    dir.metadata(name).map(|meta| meta.is_file())
}
