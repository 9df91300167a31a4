//! Job directory loading
//!
//! Lists the job files of a directory and reads them. Files are returned
//! sorted by file name so that the rendered output does not depend on the
//! order the file system happens to list them in.

use crate::types::{GraphError, Result};
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

/// Raw text of one job file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobSource {
    /// File name without the extension
    pub name: String,
    pub path: PathBuf,
    pub text: String,
}

/// Job name for `path` if it has the given extension. A stem that is not
/// UTF-8 is decoded lossily.
pub fn job_name(path: &Path, extension: &str) -> Option<String> {
    if path.extension()? != OsStr::new(extension) {
        return None;
    }
    path.file_stem().map(|stem| stem.to_string_lossy().into_owned())
}

/// Paths of all job files in `dir`, sorted by file name
pub fn list_job_files(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(GraphError::NotADirectory(dir.to_path_buf()));
    }

    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| GraphError::io(dir, e))? {
        let entry = entry.map_err(|e| GraphError::io(dir, e))?;
        let path = entry.path();
        if path.is_dir() || job_name(&path, extension).is_none() {
            log::trace!("Skipping {:?}", path);
            continue;
        }
        if path.file_name().and_then(OsStr::to_str).is_none() {
            log::warn!("{:?} is not a UTF-8 file name, naming the job lossily", path);
        }
        paths.push(path);
    }
    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    log::debug!("Found {} job files in {:?}", paths.len(), dir);
    Ok(paths)
}

/// Read one job file
pub fn read_job_file(path: &Path, extension: &str) -> Result<JobSource> {
    let bytes = fs::read(path).map_err(|e| GraphError::io(path, e))?;

    // Job files are normally ASCII; anything else is decoded lossily
    let text = match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => {
            log::warn!("{:?} is not valid UTF-8, decoding lossily", path);
            String::from_utf8_lossy(e.as_bytes()).into_owned()
        }
    };

    let name = job_name(path, extension).unwrap_or_else(|| {
        path.file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default()
    });

    Ok(JobSource {
        name,
        path: path.to_path_buf(),
        text,
    })
}

/// List and read all job files in `dir`
pub fn load_dir(dir: &Path, extension: &str) -> Result<Vec<JobSource>> {
    list_job_files(dir, extension)?
        .iter()
        .map(|path| read_job_file(path, extension))
        .collect()
}
