// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

use directories::ProjectDirs;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;

use crate::cli::Cli;
use crate::error::{Error, Result};

/// Line terminator placed between message segments
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    /// `\r\n` on Windows, `\n` elsewhere
    #[default]
    Native,
    Lf,
    Crlf,
}

impl LineEnding {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Native if cfg!(windows) => "\r\n",
            Self::Native | Self::Lf => "\n",
            Self::Crlf => "\r\n",
        }
    }
}

impl fmt::Display for LineEnding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Native => write!(f, "native"),
            Self::Lf => write!(f, "lf"),
            Self::Crlf => write!(f, "crlf"),
        }
    }
}

/// Commit message format configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitFormat {
    /// Body wrap column (default: 75)
    #[serde(default = "default_line_width")]
    pub line_width: usize,

    /// Hard-split words longer than the wrap column (default: false)
    #[serde(default)]
    pub wrap_long_words: bool,

    #[serde(default)]
    pub line_ending: LineEnding,

    /// Text placed before the issue id (default: "Related issue id: ")
    #[serde(default = "default_issue_label")]
    pub issue_label: String,
}

impl Default for CommitFormat {
    fn default() -> Self {
        Self {
            line_width: default_line_width(),
            wrap_long_words: false,
            line_ending: LineEnding::default(),
            issue_label: default_issue_label(),
        }
    }
}

fn default_line_width() -> usize {
    75
}

fn default_issue_label() -> String {
    "Related issue id: ".into()
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// External catalog file; the built-in catalog is used when unset
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,

    /// Preference file (default: <config dir>/settings.toml)
    #[serde(default)]
    pub settings_path: Option<PathBuf>,

    /// Commit message format options
    #[serde(default)]
    pub format: CommitFormat,
}

impl Config {
    /// Load with priority: CLI > ENV > user config > project config > defaults
    pub fn load(cli: &Cli) -> Result<Self> {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

        // Project-level config (.powercommit.toml in the working directory)
        if let Ok(cwd) = std::env::current_dir() {
            let project_config = cwd.join(".powercommit.toml");
            if project_config.exists() {
                figment = figment.merge(Toml::file(&project_config));
            }
        }

        if let Some(path) = Self::config_path() {
            if path.exists() {
                figment = figment.merge(Toml::file(&path));
            }
        }

        // POWERCOMMIT_CATALOG_PATH, POWERCOMMIT_FORMAT__LINE_WIDTH, ...
        figment = figment.merge(Env::prefixed("POWERCOMMIT_").split("__"));

        let mut config: Config = figment
            .extract()
            .map_err(|e| Error::Config(e.to_string()))?;

        config.apply_cli(cli);
        config.validate()?;
        Ok(config)
    }

    pub fn config_dir() -> Option<PathBuf> {
        ProjectDirs::from("", "", "powercommit").map(|dirs| dirs.config_dir().to_path_buf())
    }

    pub fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|d| d.join("config.toml"))
    }

    /// Where preferences are persisted
    pub fn resolved_settings_path(&self) -> Option<PathBuf> {
        self.settings_path
            .clone()
            .or_else(|| Self::config_dir().map(|d| d.join("settings.toml")))
    }

    fn apply_cli(&mut self, cli: &Cli) {
        if let Some(ref path) = cli.catalog {
            self.catalog_path = Some(path.clone());
        }
        if let Some(width) = cli.width {
            self.format.line_width = width;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(20..=200).contains(&self.format.line_width) {
            return Err(Error::Config(format!(
                "format.line_width must be 20–200, got {}",
                self.format.line_width
            )));
        }

        if self.format.issue_label.contains('\n') {
            return Err(Error::Config(
                "format.issue_label must fit on one line".into(),
            ));
        }

        if let Some(ref path) = self.catalog_path {
            if path.as_os_str().is_empty() {
                return Err(Error::Config("catalog_path cannot be empty".into()));
            }
        }

        Ok(())
    }

    /// Create default config file with secure permissions
    pub fn create_default() -> Result<PathBuf> {
        let Some(dir) = Self::config_dir() else {
            return Err(Error::Config("Cannot determine config directory".into()));
        };

        fs::create_dir_all(&dir)?;

        let path = dir.join("config.toml");
        let content = r#"# PowerCommit Configuration

# JSON catalog of commit types (defaults to the built-in gitmoji catalog)
# catalog_path = "/path/to/gitmoji.json"

# Where the gitmoji toggle and last scope are remembered
# settings_path = "/path/to/settings.toml"

# Commit message format options
[format]
# Wrap the body at this column
line_width = 75

# Split words longer than line_width instead of letting them overflow
wrap_long_words = false

# native, lf or crlf
line_ending = "native"

# Prefix for the issue reference line
issue_label = "Related issue id: "
"#;

        fs::write(&path, content)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = fs::metadata(&path)?.permissions();
            perms.set_mode(0o600);
            fs::set_permissions(&path, perms)?;
        }

        Ok(path)
    }
}
