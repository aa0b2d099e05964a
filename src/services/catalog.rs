// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

use std::fmt;
use std::path::PathBuf;
use std::sync::{Arc, OnceLock};

use tracing::debug;

use crate::config::Config;
use crate::domain::CommitType;
use crate::error::CatalogError;

static BUILTIN_CATALOG: &[u8] = include_bytes!("../../data/gitmoji.json");

/// Where the catalog document comes from
#[derive(Debug, Clone)]
pub enum CatalogSource {
    /// The gitmoji catalog compiled into the binary
    Builtin,
    File(PathBuf),
    Bytes(Arc<[u8]>),
}

impl fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Builtin => write!(f, "built-in gitmoji.json"),
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Bytes(bytes) => write!(f, "<{} inline bytes>", bytes.len()),
        }
    }
}

/// Loads the commit type catalog once and hands out shared copies.
///
/// Failed loads are not remembered, so a later call retries the read.
#[derive(Debug)]
pub struct CatalogLoader {
    source: CatalogSource,
    cache: OnceLock<Arc<[CommitType]>>,
}

impl CatalogLoader {
    pub fn new(source: CatalogSource) -> Self {
        Self {
            source,
            cache: OnceLock::new(),
        }
    }

    pub fn builtin() -> Self {
        Self::new(CatalogSource::Builtin)
    }

    pub fn from_config(config: &Config) -> Self {
        match config.catalog_path {
            Some(ref path) => Self::new(CatalogSource::File(path.clone())),
            None => Self::builtin(),
        }
    }

    pub fn source(&self) -> &CatalogSource {
        &self.source
    }

    pub fn load(&self) -> Result<Arc<[CommitType]>, CatalogError> {
        if let Some(types) = self.cache.get() {
            return Ok(Arc::clone(types));
        }

        let bytes = self.read()?;
        let types: Arc<[CommitType]> = parse(&bytes, &self.source.to_string())?.into();
        debug!(source = %self.source, entries = types.len(), "commit type catalog loaded");

        Ok(Arc::clone(self.cache.get_or_init(|| types)))
    }

    fn read(&self) -> Result<Arc<[u8]>, CatalogError> {
        match &self.source {
            CatalogSource::Builtin => Ok(Arc::from(BUILTIN_CATALOG)),
            CatalogSource::Bytes(bytes) => Ok(Arc::clone(bytes)),
            CatalogSource::File(path) => match std::fs::read(path) {
                Ok(bytes) => Ok(bytes.into()),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    Err(CatalogError::NotFound(path.display().to_string()))
                }
                Err(e) => Err(CatalogError::Unreadable {
                    path: path.display().to_string(),
                    source: Arc::new(e),
                }),
            },
        }
    }
}

/// Parse a catalog document. Order and duplicates are kept as written.
pub fn parse(bytes: &[u8], name: &str) -> Result<Vec<CommitType>, CatalogError> {
    if bytes.is_empty() {
        return Err(CatalogError::Empty(name.to_string()));
    }

    serde_json::from_slice(bytes).map_err(|e| CatalogError::Malformed(Arc::new(e)))
}
