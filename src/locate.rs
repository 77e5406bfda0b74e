use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Mount point used when the tool runs inside a container.
pub const MOUNTED_VOLUME: &str = "/videos";

/// A place to look for the input video.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchLocation {
    /// The path exactly as typed, relative to the current directory.
    AsGiven,
    /// The file name joined onto a fixed directory.
    Dir(PathBuf),
    /// The path joined onto the process working directory.
    WorkingDir,
}

impl SearchLocation {
    fn candidate(&self, input: &Path) -> Option<PathBuf> {
        match self {
            SearchLocation::AsGiven => Some(input.to_path_buf()),
            SearchLocation::Dir(dir) => input.file_name().map(|name| dir.join(name)),
            SearchLocation::WorkingDir => std::env::current_dir().ok().map(|cwd| cwd.join(input)),
        }
    }
}

/// Resolution order:
/// 1. The path as given
/// 2. Each extra directory, in order
/// 3. The process working directory
#[derive(Debug, Clone)]
pub struct PathResolver {
    locations: Vec<SearchLocation>,
}

impl PathResolver {
    pub fn new(locations: Vec<SearchLocation>) -> Self {
        Self { locations }
    }

    /// Standard search list with `extra_dirs` tried between the direct path and the
    /// working directory. The mounted volume is always included.
    pub fn with_dirs(extra_dirs: &[PathBuf]) -> Self {
        let mut locations = vec![SearchLocation::AsGiven];
        locations.extend(extra_dirs.iter().cloned().map(SearchLocation::Dir));
        let mount = PathBuf::from(MOUNTED_VOLUME);
        if !extra_dirs.contains(&mount) {
            locations.push(SearchLocation::Dir(mount));
        }
        locations.push(SearchLocation::WorkingDir);
        Self { locations }
    }

    pub fn locations(&self) -> &[SearchLocation] {
        &self.locations
    }

    /// Returns the first candidate that is an existing file.
    pub fn resolve(&self, input: &Path) -> Result<PathBuf> {
        let mut searched = Vec::new();
        for location in &self.locations {
            let Some(candidate) = location.candidate(input) else {
                continue;
            };
            log::debug!("looking for video at {:?}", candidate);
            if candidate.is_file() {
                return Ok(candidate);
            }
            if !searched.contains(&candidate) {
                searched.push(candidate);
            }
        }

        Err(Error::FileNotFound {
            path: input.to_path_buf(),
            searched,
        })
    }
}

impl Default for PathResolver {
    fn default() -> Self {
        Self::with_dirs(&[])
    }
}
