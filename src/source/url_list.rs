//! Plain text URL list: one `<id> <payload>` pair per line.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::schema::{ItemCatalog, ItemId};

use super::{ItemSource, SourceError};

/// URL list file on disk.
#[derive(Debug, Clone)]
pub struct UrlListFile {
    path: PathBuf,
}

impl UrlListFile {
    /// Point at a list file. Nothing is read until [`ItemSource::load`].
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the list file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ItemSource for UrlListFile {
    fn load(&self, strand_size: usize) -> Result<ItemCatalog, SourceError> {
        let reader = BufReader::new(File::open(&self.path)?);

        let mut pairs = Vec::with_capacity(strand_size);
        for (index, line) in reader.lines().take(strand_size).enumerate() {
            let line = line?;
            pairs.push(parse_line(index + 1, &line)?);
        }
        if pairs.len() < strand_size {
            return Err(SourceError::TooFewLines {
                requested: strand_size,
                available: pairs.len(),
            });
        }

        log::debug!("Read {} items from {}", pairs.len(), self.path.display());
        Ok(ItemCatalog::from_pairs(pairs)?)
    }
}

/// Parse `<id> <payload>`; surrounding whitespace is ignored.
fn parse_line(line: usize, content: &str) -> Result<(ItemId, String), SourceError> {
    let malformed = || SourceError::Malformed {
        line,
        content: content.to_string(),
    };
    let mut fields = content.split_whitespace();
    let (Some(id), Some(payload), None) = (fields.next(), fields.next(), fields.next()) else {
        return Err(malformed());
    };
    let id = id.parse::<ItemId>().map_err(|_| malformed())?;
    Ok((id, payload.to_string()))
}
