// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

use std::sync::Arc;

use super::{Commit, CommitType};
use crate::error::{CatalogError, FormError};

/// Preference and transient fields of the form.
///
/// These stay editable and observable whatever the catalog is doing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    pub use_gitmoji: bool,
    pub scope: String,
    pub issue_id: String,
    pub title: String,
    pub body: String,
}

/// Render-ready snapshot of a commit form.
#[derive(Debug, Clone)]
pub enum FormState {
    /// Catalog load still in flight
    Idle(FormFields),
    Loaded {
        commit_types: Arc<[CommitType]>,
        selected_index: usize,
        fields: FormFields,
    },
    /// Catalog failed to load; the fields remain usable
    Failed {
        error: CatalogError,
        fields: FormFields,
    },
}

impl FormState {
    pub fn fields(&self) -> &FormFields {
        match self {
            Self::Idle(fields) => fields,
            Self::Loaded { fields, .. } => fields,
            Self::Failed { fields, .. } => fields,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle(_))
    }

    pub fn selected_commit_type(&self) -> Option<&CommitType> {
        match self {
            Self::Loaded {
                commit_types,
                selected_index,
                ..
            } => commit_types.get(*selected_index),
            _ => None,
        }
    }

    pub fn selected_index(&self) -> Option<usize> {
        match self {
            Self::Loaded { selected_index, .. } => Some(*selected_index),
            _ => None,
        }
    }

    /// Assemble a commit from this snapshot
    pub fn to_commit(&self) -> Result<Commit, FormError> {
        let commit_type = self
            .selected_commit_type()
            .ok_or(FormError::NoCommitTypeSelected)?;
        let fields = self.fields();
        Ok(Commit {
            commit_type: commit_type.clone(),
            scope: fields.scope.clone(),
            title: fields.title.clone(),
            body: fields.body.clone(),
            issue_id: fields.issue_id.clone(),
            use_gitmoji: fields.use_gitmoji,
        })
    }
}

impl Default for FormState {
    fn default() -> Self {
        Self::Idle(FormFields::default())
    }
}
