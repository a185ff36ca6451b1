//! Loading datafiles into the working record set.
//!
//! Sources are read in order, each record is normalized against the stage
//! its source runs at, and backlinks are resolved once over the merged set:
//!
//! ```ignore
//! use dossier_core::{DatasetLoader, DossierConfig};
//!
//! let loader = DatasetLoader::new(&DossierConfig::default());
//! let dataset = loader.load(&["case.json".into(), "extra.json".into()])?;
//! println!("{} records at stage {}", dataset.len(), dataset.stage());
//! ```

use crate::config::DossierConfig;
use crate::error::LoadError;
use crate::links;
use crate::normalize::normalize;
use crate::record::{Datafile, Record};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Stage the supplemental source runs at when it declares none.
pub const SUPPLEMENTAL_DEFAULT_STAGE: i64 = 1;

/// The linked working set plus the stage it was filtered at.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<Record>,
    stage: i64,
    stage_caption: Option<String>,
}

impl Dataset {
    /// Build a dataset from already parsed sources.
    ///
    /// The first source is the master: its declared stage (or
    /// `default_stage`) applies to every later source that declares none.
    /// The supplemental source runs at its own stage or
    /// [`SUPPLEMENTAL_DEFAULT_STAGE`].
    pub fn from_sources(
        sources: Vec<Datafile>,
        supplemental: Option<Datafile>,
        default_stage: i64,
    ) -> Self {
        let stage = sources
            .first()
            .and_then(|master| master.game_stage)
            .unwrap_or(default_stage);
        let stage_caption = sources
            .first()
            .and_then(|master| master.stage_caption(stage))
            .map(str::to_string);

        let runs = sources
            .into_iter()
            .map(|source| (source.game_stage.unwrap_or(stage), source))
            .chain(supplemental.map(|source| {
                (
                    source.game_stage.unwrap_or(SUPPLEMENTAL_DEFAULT_STAGE),
                    source,
                )
            }));

        let mut records = Vec::new();
        for (position, (source_stage, source)) in runs.enumerate() {
            let total = source.records.len();
            let before = records.len();
            records.extend(
                source
                    .records
                    .into_iter()
                    .filter_map(|raw| normalize(raw, source_stage)),
            );
            debug!(
                source = position,
                stage = source_stage,
                total,
                visible = records.len() - before,
                "normalized source"
            );
        }

        Self {
            records: links::resolve(records),
            stage,
            stage_caption,
        }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn into_records(self) -> Vec<Record> {
        self.records
    }

    /// The master stage the set was filtered at.
    pub fn stage(&self) -> i64 {
        self.stage
    }

    /// The master file's caption for the active stage.
    pub fn stage_caption(&self) -> Option<&str> {
        self.stage_caption.as_deref()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Reads datafiles from disk following the configured conventions.
#[derive(Debug, Clone)]
pub struct DatasetLoader {
    default_source: PathBuf,
    supplemental_source: PathBuf,
    default_stage: i64,
}

impl DatasetLoader {
    pub fn new(config: &DossierConfig) -> Self {
        Self {
            default_source: config.default_source.clone(),
            supplemental_source: config.supplemental_source.clone(),
            default_stage: config.default_stage,
        }
    }

    /// Load the working set.
    ///
    /// With no paths the default source is loaded instead. Any named source
    /// that is missing, unreadable or malformed fails the whole load.
    pub fn load(&self, paths: &[PathBuf]) -> Result<Dataset, LoadError> {
        let named: Vec<PathBuf> = if paths.is_empty() {
            vec![self.default_source.clone()]
        } else {
            paths.to_vec()
        };

        let sources = named
            .iter()
            .map(|path| read_source(path))
            .collect::<Result<Vec<_>, _>>()?;

        let supplemental = if named
            .iter()
            .any(|path| same_source(path, &self.supplemental_source))
        {
            debug!(path = %self.supplemental_source.display(), "supplemental source already named");
            None
        } else if self.supplemental_source.exists() {
            Some(read_source(&self.supplemental_source)?)
        } else {
            debug!(path = %self.supplemental_source.display(), "no supplemental source");
            None
        };

        let dataset = Dataset::from_sources(sources, supplemental, self.default_stage);
        info!(
            records = dataset.len(),
            stage = dataset.stage(),
            "dataset loaded"
        );
        Ok(dataset)
    }
}

/// Read and parse one datafile.
pub fn read_source(path: &Path) -> Result<Datafile, LoadError> {
    if !path.exists() {
        return Err(LoadError::MissingSource {
            path: path.to_path_buf(),
        });
    }

    let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let datafile = Datafile::from_json(&content).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    info!(
        path = %path.display(),
        declared_stage = ?datafile.game_stage,
        records = datafile.records.len(),
        "read source"
    );
    Ok(datafile)
}

/// Whether two paths name the same file.
fn same_source(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}
