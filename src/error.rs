// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

// miette's Diagnostic derive generates code that triggers this false positive
#![allow(unused_assignments)]

use std::sync::Arc;

use miette::Diagnostic;
use thiserror::Error;

/// Failures while loading the commit type catalog.
///
/// Cloneable so a failed load can live inside a published form snapshot.
#[derive(Error, Diagnostic, Debug, Clone)]
pub enum CatalogError {
    #[error("Commit type catalog not found: {0}")]
    #[diagnostic(
        code(powercommit::catalog::not_found),
        help("Check `catalog_path` in your config, or remove it to use the built-in catalog")
    )]
    NotFound(String),

    #[error("Commit type catalog is empty: {0}")]
    #[diagnostic(code(powercommit::catalog::empty))]
    Empty(String),

    #[error("Commit type catalog is malformed: {0}")]
    #[diagnostic(
        code(powercommit::catalog::malformed),
        help("Expected a JSON array of {{emoji, entity, code, description, name, semver}} objects")
    )]
    Malformed(#[source] Arc<serde_json::Error>),

    #[error("Cannot read commit type catalog {path}")]
    #[diagnostic(code(powercommit::catalog::unreadable))]
    Unreadable {
        path: String,
        #[source]
        source: Arc<std::io::Error>,
    },
}

#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("No commit type selected")]
    #[diagnostic(
        code(powercommit::form::no_type),
        help("Wait for the commit type catalog to load, or fix the catalog error")
    )]
    NoCommitTypeSelected,

    #[error("Commit type index {index} is out of range (catalog has {len} entries)")]
    #[diagnostic(code(powercommit::form::index_out_of_range))]
    IndexOutOfRange { index: usize, len: usize },
}

#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Form(#[from] FormError),

    #[error("Unknown commit type '{key}'")]
    #[diagnostic(
        code(powercommit::catalog::unknown_type),
        help("List the available types with: powercommit types")
    )]
    UnknownCommitType { key: String },

    #[error("Missing {field}")]
    #[diagnostic(
        code(powercommit::cli::missing_field),
        help("Pass --{field} or run in an interactive terminal")
    )]
    MissingField { field: &'static str },

    #[error("Operation cancelled by user")]
    Cancelled,

    #[error("Settings error: {0}")]
    #[diagnostic(code(powercommit::settings::error))]
    Settings(String),

    #[error("Configuration error: {0}")]
    #[diagnostic(code(powercommit::config::error))]
    Config(String),

    #[error("Not a git repository")]
    #[diagnostic(
        code(powercommit::git::not_repo),
        help("Run this command inside a git repository, or drop --commit")
    )]
    NotAGitRepo,

    #[error("Git error: {0}")]
    #[diagnostic(code(powercommit::git::error))]
    Git(String),

    #[error("Clipboard error: {0}")]
    #[diagnostic(code(powercommit::clipboard::error))]
    Clipboard(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Dialog error: {0}")]
    Dialog(String),
}

impl From<dialoguer::Error> for Error {
    fn from(e: dialoguer::Error) -> Self {
        Error::Dialog(e.to_string())
    }
}

impl From<arboard::Error> for Error {
    fn from(e: arboard::Error) -> Self {
        Error::Clipboard(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
