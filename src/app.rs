// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

use std::io::IsTerminal;
use std::sync::Arc;

use console::style;
use dialoguer::{Confirm, Input, Select};
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::cli::{Cli, Commands};
use crate::config::Config;
use crate::domain::{CommitType, FormState};
use crate::error::{Error, Result};
use crate::services::{
    catalog::CatalogLoader,
    form::CommitForm,
    formatter::MessageFormatter,
    git::GitService,
    preference::Preference,
    settings::{FileStore, MemoryStore, SettingsStore},
};

pub struct App {
    cli: Cli,
    config: Config,
    cancel_token: CancellationToken,
}

impl App {
    pub fn new(cli: Cli) -> Result<Self> {
        let config = Config::load(&cli)?;
        debug!(
            catalog = ?config.catalog_path,
            line_width = config.format.line_width,
            "config loaded"
        );
        Ok(Self {
            cli,
            config,
            cancel_token: CancellationToken::new(),
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        let cancel = self.cancel_token.clone();
        tokio::spawn(async move {
            signal::ctrl_c().await.ok();
            cancel.cancel();
        });

        if let Some(ref cmd) = self.cli.command {
            return self.handle_command(cmd).await;
        }

        self.create_commit().await
    }

    fn is_interactive(&self) -> bool {
        !self.cli.yes && std::io::stdout().is_terminal() && std::io::stdin().is_terminal()
    }

    fn check_cancelled(&self) -> Result<()> {
        if self.cancel_token.is_cancelled() {
            return Err(Error::Cancelled);
        }
        Ok(())
    }

    fn open_store(&self) -> Result<Arc<dyn SettingsStore>> {
        if self.cli.no_persist {
            return Ok(Arc::new(MemoryStore::new()));
        }

        match self.config.resolved_settings_path() {
            Some(path) => Ok(Arc::new(FileStore::open(path)?)),
            None => {
                warn!("cannot determine settings location, preferences will not persist");
                Ok(Arc::new(MemoryStore::new()))
            }
        }
    }

    async fn create_commit(&mut self) -> Result<()> {
        let store = self.open_store()?;
        let loader = Arc::new(CatalogLoader::from_config(&self.config));
        let form = CommitForm::new(
            loader,
            Preference::gitmoji(Arc::clone(&store)),
            Preference::scope(store),
        );
        form.start_loading();

        if let Some(flag) = self.cli.gitmoji_override() {
            form.set_use_gitmoji(flag)?;
        }
        if let Some(ref scope) = self.cli.scope {
            form.set_scope(scope)?;
        }
        if let Some(ref issue) = self.cli.issue {
            form.set_issue_id(issue);
        }
        if let Some(ref title) = self.cli.title {
            form.set_title(title);
        }
        if let Some(ref body) = self.cli.body {
            form.set_body(body);
        }

        let state = tokio::select! {
            _ = self.cancel_token.cancelled() => return Err(Error::Cancelled),
            state = form.ready() => state,
        };

        let commit_types = match state {
            FormState::Loaded { commit_types, .. } => commit_types,
            FormState::Failed { error, .. } => return Err(error.into()),
            FormState::Idle(_) => return Err(Error::Cancelled),
        };

        let interactive = self.is_interactive();

        match self.cli.commit_type {
            Some(ref key) => {
                let (index, _) = CommitType::find(&commit_types, key)
                    .ok_or_else(|| Error::UnknownCommitType { key: key.clone() })?;
                form.select_commit_type(index)?;
            }
            None if interactive => self.prompt_commit_type(&form, &commit_types)?,
            None => return Err(Error::MissingField { field: "type" }),
        }

        if interactive {
            self.prompt_fields(&form)?;
        } else if form.state().fields().title.trim().is_empty() {
            return Err(Error::MissingField { field: "title" });
        }

        self.check_cancelled()?;

        let commit = form.get_commit()?;
        form.dispose();

        let message = MessageFormatter::new(&self.config.format).format(&commit);
        debug!(chars = message.chars().count(), "message formatted");

        self.deliver(&message, interactive)
    }

    // ─── Prompts ───

    fn prompt_commit_type(&self, form: &CommitForm, commit_types: &[CommitType]) -> Result<()> {
        let items: Vec<String> = commit_types.iter().map(ToString::to_string).collect();
        let selection = Select::new()
            .with_prompt("Commit type")
            .items(&items)
            .default(form.state().selected_index().unwrap_or(0))
            .interact()?;

        form.select_commit_type(selection)?;
        Ok(())
    }

    fn prompt_fields(&self, form: &CommitForm) -> Result<()> {
        let current = form.state().fields().clone();

        if self.cli.gitmoji_override().is_none() {
            let flag = Confirm::new()
                .with_prompt("Use gitmoji?")
                .default(current.use_gitmoji)
                .interact()?;
            form.set_use_gitmoji(flag)?;
        }
        self.check_cancelled()?;

        if self.cli.scope.is_none() {
            let scope: String = Input::new()
                .with_prompt("Scope")
                .with_initial_text(current.scope.as_str())
                .allow_empty(true)
                .interact_text()?;
            form.set_scope(scope.trim())?;
        }
        self.check_cancelled()?;

        if self.cli.issue.is_none() {
            let issue: String = Input::new()
                .with_prompt("Task ID")
                .allow_empty(true)
                .interact_text()?;
            form.set_issue_id(issue.trim());
        }
        self.check_cancelled()?;

        if self.cli.title.is_none() {
            let title: String = Input::new()
                .with_prompt("Title")
                .validate_with(|input: &String| -> std::result::Result<(), &str> {
                    if input.trim().is_empty() {
                        Err("title cannot be empty")
                    } else {
                        Ok(())
                    }
                })
                .interact_text()?;
            form.set_title(title.trim());
        }
        self.check_cancelled()?;

        if self.cli.body.is_none() {
            let body: String = Input::new()
                .with_prompt("Body")
                .allow_empty(true)
                .interact_text()?;
            form.set_body(body.trim());
        }
        self.check_cancelled()
    }

    // ─── Output ───

    fn deliver(&self, message: &str, interactive: bool) -> Result<()> {
        if self.cli.dry_run || (!self.cli.copy && !self.cli.commit) {
            println!("{}", message);
            return Ok(());
        }

        if interactive {
            eprintln!("\n{}", style("Commit message:").bold());
            eprintln!("{}", style(message).green());
            eprintln!();

            let confirm = Confirm::new()
                .with_prompt("Use this message?")
                .default(true)
                .interact()?;

            if !confirm {
                return Err(Error::Cancelled);
            }
        }

        if self.cli.copy {
            let mut clipboard = arboard::Clipboard::new()?;
            clipboard.set_text(message.to_string())?;
            eprintln!("{} Copied to clipboard", style("✓").green().bold());
        }

        if self.cli.commit {
            let git = GitService::discover()?;
            if !git.has_staged_changes()? {
                self.print_warning("No staged changes; git may refuse the commit");
            }
            git.commit(message)?;
            eprintln!("{} Committed!", style("✓").green().bold());
        }

        Ok(())
    }

    async fn handle_command(&self, cmd: &Commands) -> Result<()> {
        match cmd {
            Commands::Init => {
                let path = Config::create_default()?;
                println!("Created config: {}", path.display());
                Ok(())
            }
            Commands::Config => {
                let catalog = CatalogLoader::from_config(&self.config);
                println!("Catalog: {}", catalog.source());
                match self.config.resolved_settings_path() {
                    Some(path) => println!("Settings: {}", path.display()),
                    None => println!("Settings: (in memory)"),
                }
                println!();
                println!("[format]");
                println!("  line_width: {}", self.config.format.line_width);
                println!("  wrap_long_words: {}", self.config.format.wrap_long_words);
                println!("  line_ending: {}", self.config.format.line_ending);
                println!("  issue_label: {:?}", self.config.format.issue_label);
                Ok(())
            }
            Commands::Types => {
                let loader = CatalogLoader::from_config(&self.config);
                let commit_types = tokio::task::spawn_blocking(move || loader.load())
                    .await
                    .map_err(|e| Error::Io(std::io::Error::other(e)))??;

                for ct in commit_types.iter() {
                    println!(
                        "{}  {:<9} {:<22} {}",
                        ct.emoji,
                        ct.semver,
                        ct.code,
                        style(&ct.description).dim()
                    );
                }
                Ok(())
            }
            Commands::Completions { shell } => {
                let mut cmd = <Cli as clap::CommandFactory>::command();
                clap_complete::generate(*shell, &mut cmd, "powercommit", &mut std::io::stdout());
                Ok(())
            }
        }
    }

    fn print_warning(&self, msg: &str) {
        eprintln!("{} {}", style("warning:").yellow().bold(), msg);
    }
}
