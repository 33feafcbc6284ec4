//! Reference data sources: the points grid, provincial programs and draw history.

mod parser;
mod standard;

pub use standard::{
    standard_draws, standard_points_rows, standard_programs, StandardReferenceStore,
};

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use super::calculator::PointsReferenceRow;
use super::draws::DrawRecord;
use super::pathways::ProgramRecord;

pub const POINTS_REFERENCE_FILE: &str = "points_reference.csv";
pub const PROGRAMS_FILE: &str = "programs.csv";
pub const DRAWS_FILE: &str = "draws.csv";

/// Read access to the managed datastore so the core can be exercised in isolation.
pub trait ReferenceStore: Send + Sync {
    fn points_reference(&self) -> Result<Vec<PointsReferenceRow>, StoreError>;
    fn programs(&self) -> Result<Vec<ProgramRecord>, StoreError>;
    fn draws(&self) -> Result<Vec<DrawRecord>, StoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("reference data unavailable: {0}")]
    Unavailable(String),
    #[error(transparent)]
    Import(#[from] ReferenceImportError),
}

#[derive(Debug)]
pub enum ReferenceImportError {
    Io { path: PathBuf, source: std::io::Error },
    Csv { source_name: String, source: csv::Error },
}

impl std::fmt::Display for ReferenceImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReferenceImportError::Io { path, source } => {
                write!(f, "failed to read {}: {}", path.display(), source)
            }
            ReferenceImportError::Csv {
                source_name,
                source,
            } => write!(f, "invalid CSV data in {}: {}", source_name, source),
        }
    }
}

impl std::error::Error for ReferenceImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ReferenceImportError::Io { source, .. } => Some(source),
            ReferenceImportError::Csv { source, .. } => Some(source),
        }
    }
}

/// Import helpers for callers holding CSV exports in memory or on disk.
pub struct ReferenceImporter;

impl ReferenceImporter {
    pub fn points_from_reader<R: Read>(
        reader: R,
        source_name: &str,
    ) -> Result<Vec<PointsReferenceRow>, ReferenceImportError> {
        parser::parse_points_rows(reader).map_err(|source| ReferenceImportError::Csv {
            source_name: source_name.to_string(),
            source,
        })
    }

    pub fn programs_from_reader<R: Read>(
        reader: R,
        source_name: &str,
    ) -> Result<Vec<ProgramRecord>, ReferenceImportError> {
        parser::parse_programs(reader).map_err(|source| ReferenceImportError::Csv {
            source_name: source_name.to_string(),
            source,
        })
    }

    pub fn draws_from_reader<R: Read>(
        reader: R,
        source_name: &str,
    ) -> Result<Vec<DrawRecord>, ReferenceImportError> {
        parser::parse_draws(reader).map_err(|source| ReferenceImportError::Csv {
            source_name: source_name.to_string(),
            source,
        })
    }
}

/// Store backed by CSV exports of the datastore tables in one directory.
#[derive(Debug, Clone)]
pub struct CsvReferenceStore {
    dir: PathBuf,
}

impl CsvReferenceStore {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn open(&self, file_name: &str) -> Result<File, ReferenceImportError> {
        let path = self.dir.join(file_name);
        File::open(&path).map_err(|source| ReferenceImportError::Io { path, source })
    }
}

impl ReferenceStore for CsvReferenceStore {
    fn points_reference(&self) -> Result<Vec<PointsReferenceRow>, StoreError> {
        let file = self.open(POINTS_REFERENCE_FILE)?;
        Ok(ReferenceImporter::points_from_reader(
            file,
            POINTS_REFERENCE_FILE,
        )?)
    }

    fn programs(&self) -> Result<Vec<ProgramRecord>, StoreError> {
        let file = self.open(PROGRAMS_FILE)?;
        Ok(ReferenceImporter::programs_from_reader(file, PROGRAMS_FILE)?)
    }

    fn draws(&self) -> Result<Vec<DrawRecord>, StoreError> {
        let file = self.open(DRAWS_FILE)?;
        Ok(ReferenceImporter::draws_from_reader(file, DRAWS_FILE)?)
    }
}
