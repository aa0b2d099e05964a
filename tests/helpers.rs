// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

use std::sync::Arc;

use powercommit::config::{CommitFormat, LineEnding};
use powercommit::domain::{Commit, CommitType};
use powercommit::services::catalog::{CatalogLoader, CatalogSource};
use powercommit::services::form::CommitForm;
use powercommit::services::formatter::MessageFormatter;
use powercommit::services::preference::Preference;
use powercommit::services::settings::{MemoryStore, SettingsStore};

#[allow(dead_code)]
pub const SAMPLE_CATALOG: &str = r#"[
  {"emoji": "✨", "entity": "&#x2728;", "code": ":sparkles:", "description": "Introduce new features.", "name": "sparkles", "semver": "feat"},
  {"emoji": "🐛", "entity": "&#x1f41b;", "code": ":bug:", "description": "Fix a bug.", "name": "bug", "semver": "fix"},
  {"emoji": "📝", "entity": "&#x1f4dd;", "code": ":memo:", "description": "Add or update documentation.", "name": "memo", "semver": "docs"}
]"#;

/// Create a CommitType with derived placeholder fields
#[allow(dead_code)]
pub fn make_commit_type(emoji: &str, semver: &str) -> CommitType {
    CommitType {
        emoji: emoji.to_string(),
        entity: String::new(),
        code: format!(":{}:", semver),
        description: format!("{} changes", semver),
        name: semver.to_string(),
        semver: semver.to_string(),
    }
}

#[allow(dead_code)]
pub fn make_commit(
    commit_type: CommitType,
    scope: &str,
    title: &str,
    body: &str,
    issue_id: &str,
    use_gitmoji: bool,
) -> Commit {
    Commit {
        commit_type,
        scope: scope.to_string(),
        title: title.to_string(),
        body: body.to_string(),
        issue_id: issue_id.to_string(),
        use_gitmoji,
    }
}

/// Formatter pinned to `\n` so assertions do not depend on the platform
#[allow(dead_code)]
pub fn lf_formatter() -> MessageFormatter {
    MessageFormatter::new(&CommitFormat {
        line_ending: LineEnding::Lf,
        ..CommitFormat::default()
    })
}

#[allow(dead_code)]
pub fn loader_from(bytes: &[u8]) -> Arc<CatalogLoader> {
    Arc::new(CatalogLoader::new(CatalogSource::Bytes(Arc::from(bytes))))
}

#[allow(dead_code)]
pub fn memory_store() -> Arc<dyn SettingsStore> {
    Arc::new(MemoryStore::new())
}

/// A form over `catalog` and a fresh in-memory store
#[allow(dead_code)]
pub fn make_form(catalog: &[u8]) -> (CommitForm, Arc<dyn SettingsStore>) {
    let store = memory_store();
    let form = CommitForm::new(
        loader_from(catalog),
        Preference::gitmoji(Arc::clone(&store)),
        Preference::scope(Arc::clone(&store)),
    );
    (form, store)
}
