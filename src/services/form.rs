// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Commercial

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_stream::wrappers::WatchStream;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use super::catalog::CatalogLoader;
use super::preference::{GitmojiPreference, ScopePreference, Subscription};
use crate::domain::{Commit, CommitType, FormFields, FormState};
use crate::error::{CatalogError, FormError, Result};

enum CatalogSlot {
    Pending,
    Ready(Arc<[CommitType]>),
    Failed(CatalogError),
}

struct Inner {
    catalog: CatalogSlot,
    selected_index: usize,
    fields: FormFields,
    publisher: Option<watch::Sender<FormState>>,
    disposed: bool,
}

impl Inner {
    fn snapshot(&self) -> FormState {
        let fields = self.fields.clone();
        match &self.catalog {
            CatalogSlot::Pending => FormState::Idle(fields),
            CatalogSlot::Ready(types) => FormState::Loaded {
                commit_types: Arc::clone(types),
                selected_index: self.selected_index,
                fields,
            },
            CatalogSlot::Failed(error) => FormState::Failed {
                error: error.clone(),
                fields,
            },
        }
    }

    fn publish(&self) {
        if let Some(ref publisher) = self.publisher {
            publisher.send_replace(self.snapshot());
        }
    }

    fn catalog_len(&self) -> usize {
        match &self.catalog {
            CatalogSlot::Ready(types) => types.len(),
            _ => 0,
        }
    }
}

enum LoadTask {
    NotStarted,
    Running(JoinHandle<()>),
    Finished,
}

fn lock(inner: &Mutex<Inner>) -> MutexGuard<'_, Inner> {
    inner.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Apply `edit` and republish when it reports a change. No-op once disposed.
fn update(inner: &Mutex<Inner>, edit: impl FnOnce(&mut Inner) -> bool) {
    let mut inner = lock(inner);
    if inner.disposed {
        return;
    }
    if edit(&mut inner) {
        inner.publish();
    }
}

/// The state behind one "create commit" form.
///
/// Combines the commit type catalog, the persisted gitmoji and scope
/// preferences, and the transient title/body/issue input into one
/// [`FormState`]. Every change is applied under a single lock and the new
/// snapshot is published before the lock is released.
pub struct CommitForm {
    inner: Arc<Mutex<Inner>>,
    loader: Arc<CatalogLoader>,
    gitmoji: GitmojiPreference,
    scope: ScopePreference,
    subscriptions: Mutex<Vec<Subscription>>,
    load_task: Mutex<LoadTask>,
    cancel: CancellationToken,
}

impl CommitForm {
    pub fn new(
        loader: Arc<CatalogLoader>,
        gitmoji: GitmojiPreference,
        scope: ScopePreference,
    ) -> Self {
        let fields = FormFields {
            use_gitmoji: gitmoji.read(),
            scope: scope.read(),
            ..FormFields::default()
        };
        let (publisher, _) = watch::channel(FormState::Idle(fields.clone()));

        let inner = Arc::new(Mutex::new(Inner {
            catalog: CatalogSlot::Pending,
            selected_index: 0,
            fields,
            publisher: Some(publisher),
            disposed: false,
        }));

        let subscriptions = vec![
            gitmoji.subscribe(listen(&inner, |inner, flag: &bool| {
                apply_gitmoji(inner, *flag)
            })),
            scope.subscribe(listen(&inner, |inner, scope: &String| {
                replace(&mut inner.fields.scope, scope)
            })),
        ];

        Self {
            inner,
            loader,
            gitmoji,
            scope,
            subscriptions: Mutex::new(subscriptions),
            load_task: Mutex::new(LoadTask::NotStarted),
            cancel: CancellationToken::new(),
        }
    }

    /// Start loading the catalog. Calling it again does nothing.
    ///
    /// Inside a Tokio runtime the read runs on the blocking pool and lands
    /// as a `Loaded`/`Failed` transition; outside one it runs inline.
    pub fn start_loading(&self) {
        let mut task = self.load_task.lock().unwrap_or_else(PoisonError::into_inner);
        if !matches!(*task, LoadTask::NotStarted) || self.cancel.is_cancelled() {
            return;
        }

        let loader = Arc::clone(&self.loader);
        let weak = Arc::downgrade(&self.inner);

        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            debug!("no runtime, loading catalog inline");
            apply_catalog(&weak, loader.load());
            *task = LoadTask::Finished;
            return;
        };

        let cancel = self.cancel.clone();
        *task = LoadTask::Running(runtime.spawn(async move {
            let load = tokio::task::spawn_blocking(move || loader.load());
            let joined = tokio::select! {
                _ = cancel.cancelled() => {
                    debug!("catalog load cancelled");
                    return;
                }
                joined = load => joined,
            };

            match joined {
                Ok(result) if !cancel.is_cancelled() => apply_catalog(&weak, result),
                Ok(_) => {}
                Err(e) => warn!(error = %e, "catalog load task failed"),
            }
        }));
    }

    /// Start loading if needed and wait until the catalog has settled.
    pub async fn ready(&self) -> FormState {
        self.start_loading();
        let mut rx = self.subscribe();
        let state = match rx.wait_for(|state| !state.is_idle()).await {
            Ok(state) => state.clone(),
            Err(_) => self.state(),
        };
        state
    }

    /// Current snapshot
    pub fn state(&self) -> FormState {
        lock(&self.inner).snapshot()
    }

    /// Receiver of snapshots; it holds the current one from the start.
    ///
    /// The channel closes on [`dispose`](Self::dispose).
    pub fn subscribe(&self) -> watch::Receiver<FormState> {
        let inner = lock(&self.inner);
        match inner.publisher {
            Some(ref publisher) => publisher.subscribe(),
            None => {
                let (_, rx) = watch::channel(inner.snapshot());
                rx
            }
        }
    }

    pub fn states(&self) -> WatchStream<FormState> {
        WatchStream::new(self.subscribe())
    }

    pub fn select_commit_type(&self, index: usize) -> std::result::Result<(), FormError> {
        let mut inner = lock(&self.inner);
        if inner.disposed {
            return Ok(());
        }

        let len = inner.catalog_len();
        if index >= len {
            return Err(FormError::IndexOutOfRange { index, len });
        }

        if inner.selected_index != index {
            inner.selected_index = index;
            inner.publish();
        }
        Ok(())
    }

    /// Persist the gitmoji toggle; the form picks it up via its subscription.
    ///
    /// When the store already holds `flag` (written behind this form's back)
    /// nothing is notified, so the value is applied here directly.
    pub fn set_use_gitmoji(&self, flag: bool) -> Result<()> {
        if self.is_disposed() {
            return Ok(());
        }
        let changed = self.gitmoji.write(flag).inspect_err(|e| {
            warn!(key = self.gitmoji.key(), error = %e, "failed to persist preference");
        })?;
        if !changed {
            update(&self.inner, |inner| apply_gitmoji(inner, flag));
        }
        Ok(())
    }

    pub fn set_scope(&self, scope: &str) -> Result<()> {
        if self.is_disposed() {
            return Ok(());
        }
        let changed = self.scope.write(scope.to_string()).inspect_err(|e| {
            warn!(key = self.scope.key(), error = %e, "failed to persist preference");
        })?;
        if !changed {
            update(&self.inner, |inner| replace(&mut inner.fields.scope, scope));
        }
        Ok(())
    }

    pub fn set_issue_id(&self, issue_id: &str) {
        update(&self.inner, |inner| replace(&mut inner.fields.issue_id, issue_id));
    }

    pub fn set_title(&self, title: &str) {
        update(&self.inner, |inner| replace(&mut inner.fields.title, title));
    }

    pub fn set_body(&self, body: &str) {
        update(&self.inner, |inner| replace(&mut inner.fields.body, body));
    }

    pub fn get_commit(&self) -> std::result::Result<Commit, FormError> {
        lock(&self.inner).snapshot().to_commit()
    }

    /// Cancel the catalog load, drop preference subscriptions and close the
    /// snapshot channel. Later mutator calls are ignored.
    pub fn dispose(&self) {
        {
            let mut inner = lock(&self.inner);
            if inner.disposed {
                return;
            }
            inner.disposed = true;
            inner.publisher = None;
        }

        self.cancel.cancel();
        let task = std::mem::replace(
            &mut *self.load_task.lock().unwrap_or_else(PoisonError::into_inner),
            LoadTask::Finished,
        );
        if let LoadTask::Running(handle) = task {
            handle.abort();
        }

        let subscriptions = std::mem::take(
            &mut *self
                .subscriptions
                .lock()
                .unwrap_or_else(PoisonError::into_inner),
        );
        drop(subscriptions);

        debug!("commit form disposed");
    }

    pub fn is_disposed(&self) -> bool {
        lock(&self.inner).disposed
    }
}

impl Drop for CommitForm {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl std::fmt::Debug for CommitForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommitForm")
            .field("state", &self.state())
            .field("disposed", &self.is_disposed())
            .finish()
    }
}

fn apply_gitmoji(inner: &mut Inner, flag: bool) -> bool {
    let changed = inner.fields.use_gitmoji != flag;
    inner.fields.use_gitmoji = flag;
    changed
}

fn replace(slot: &mut String, value: &str) -> bool {
    if slot == value {
        return false;
    }
    value.clone_into(slot);
    true
}

/// Preference listener that edits the form through a weak handle
fn listen<T: 'static>(
    inner: &Arc<Mutex<Inner>>,
    edit: impl Fn(&mut Inner, &T) -> bool + Send + Sync + 'static,
) -> impl Fn(&T) + Send + Sync + 'static {
    let weak = Arc::downgrade(inner);
    move |value: &T| {
        if let Some(inner) = weak.upgrade() {
            update(&inner, |inner| edit(inner, value));
        }
    }
}

fn apply_catalog(
    weak: &Weak<Mutex<Inner>>,
    result: std::result::Result<Arc<[CommitType]>, CatalogError>,
) {
    let Some(inner) = weak.upgrade() else {
        return;
    };

    update(&inner, |inner| {
        match result {
            Ok(types) => {
                if inner.selected_index >= types.len() {
                    inner.selected_index = 0;
                }
                inner.catalog = CatalogSlot::Ready(types);
            }
            Err(error) => {
                warn!(error = %error, "commit type catalog failed to load");
                inner.catalog = CatalogSlot::Failed(error);
            }
        }
        true
    });
}
