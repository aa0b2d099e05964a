// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::services::formatter::MessageFormatter;

/// One entry of the commit type catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CommitType {
    pub emoji: String,
    pub entity: String,
    pub code: String,
    pub description: String,
    pub name: String,
    /// Conventional-commit prefix (`feat`, `fix`, ...)
    pub semver: String,
}

impl CommitType {
    /// Header prefix for this type
    pub fn prefix(&self, use_gitmoji: bool) -> &str {
        if use_gitmoji { &self.emoji } else { &self.semver }
    }

    /// Match a user-supplied key against `semver`, `name` or `code`.
    ///
    /// `code` matches with or without the surrounding colons, so `:bug:` and
    /// `bug` both resolve. Comparison is case-insensitive.
    pub fn matches(&self, key: &str) -> bool {
        let key = key.trim();
        let bare = key.trim_matches(':');
        self.semver.eq_ignore_ascii_case(key)
            || self.name.eq_ignore_ascii_case(bare)
            || self.code.eq_ignore_ascii_case(key)
            || self.code.trim_matches(':').eq_ignore_ascii_case(bare)
    }

    /// First catalog entry matching `key`
    pub fn find<'a>(catalog: &'a [CommitType], key: &str) -> Option<(usize, &'a CommitType)> {
        catalog.iter().enumerate().find(|(_, ct)| ct.matches(key))
    }
}

impl fmt::Display for CommitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}: {}", self.emoji, self.semver, self.description)
    }
}

/// A commit assembled from the form at submission time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    pub commit_type: CommitType,
    pub scope: String,
    pub title: String,
    pub body: String,
    pub issue_id: String,
    pub use_gitmoji: bool,
}

impl Commit {
    pub fn prefix(&self) -> &str {
        self.commit_type.prefix(self.use_gitmoji)
    }
}

impl fmt::Display for Commit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&MessageFormatter::default().format(self))
    }
}
