use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::Error;

/// Find the single entry in `dir` whose name ends with `suffix`.
///
/// The returned path is `dir` joined with the entry name. Entries whose names
/// are not valid UTF-8 are never considered a match.
pub fn locate_artifact(dir: &Path, suffix: &str) -> Result<PathBuf, Error> {
    let read_dir_error = |source: io::Error| Error::ReadDir {
        dir: dir.to_path_buf(),
        source,
    };

    let mut names = Vec::new();
    for entry in fs::read_dir(dir).map_err(read_dir_error)? {
        let entry = entry.map_err(read_dir_error)?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };

        if name.ends_with(suffix) {
            names.push(name.to_owned());
        }
    }
    names.sort();

    log::debug!(
        "found {} candidate(s) ending with `{suffix}` in `{}`: {names:?}",
        names.len(),
        dir.display()
    );

    match names.len() {
        0 => Err(Error::NoArtifact {
            dir: dir.to_path_buf(),
            suffix: suffix.to_owned(),
        }),
        1 => Ok(dir.join(&names[0])),
        _ => Err(Error::MultipleArtifacts {
            dir: dir.to_path_buf(),
            suffix: suffix.to_owned(),
            names,
        }),
    }
}
