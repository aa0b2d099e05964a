// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug, Default)]
#[command(name = "powercommit")]
#[command(version)]
#[command(about = "Build conventional-commit / gitmoji messages", long_about = None)]
pub struct Cli {
    /// Commit type: semver prefix (feat), gitmoji name (sparkles) or code (:sparkles:)
    #[arg(short = 't', long = "type", value_name = "KEY")]
    pub commit_type: Option<String>,

    /// Scope, remembered for next time
    #[arg(short, long)]
    pub scope: Option<String>,

    /// Related issue / task id
    #[arg(short, long, value_name = "ID")]
    pub issue: Option<String>,

    /// Commit title
    #[arg(short = 'm', long)]
    pub title: Option<String>,

    /// Commit body (wrapped at the configured width)
    #[arg(short, long)]
    pub body: Option<String>,

    /// Prefix with the emoji instead of the text code (remembered)
    #[arg(long, overrides_with = "no_gitmoji")]
    pub gitmoji: bool,

    /// Prefix with the text code (remembered)
    #[arg(long, overrides_with = "gitmoji")]
    pub no_gitmoji: bool,

    /// Skip prompts and confirmation
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// Print the message only
    #[arg(long, conflicts_with_all = ["copy", "commit"])]
    pub dry_run: bool,

    /// Copy the message to the clipboard
    #[arg(long)]
    pub copy: bool,

    /// Run `git commit` with the message
    #[arg(long)]
    pub commit: bool,

    /// Do not read or write remembered preferences
    #[arg(long)]
    pub no_persist: bool,

    /// Commit type catalog (JSON)
    #[arg(long, value_name = "PATH")]
    pub catalog: Option<PathBuf>,

    /// Body wrap column
    #[arg(long, value_name = "COLUMNS")]
    pub width: Option<usize>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Gitmoji choice given on the command line, if any
    pub fn gitmoji_override(&self) -> Option<bool> {
        match (self.gitmoji, self.no_gitmoji) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Initialize config file
    Init,
    /// Show current configuration
    Config,
    /// List available commit types
    Types,
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}
