//! The stateful editing facade over one merchant's store.
//!
//! ```text
//! Uninitialized -> Loading -> Ready{dirty} -> Saving -> Ready{dirty}
//!                     |                          |
//!                     +--------> Error <---------+
//! ```
//!
//! While any save is outstanding the status is `Saving`, otherwise while any
//! fetch is outstanding it is `Loading`.
//!
//! Mutations only touch the in-memory copy. Nothing is persisted until
//! [`StoreController::save`] is called.

mod policy;
mod realtime;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::block::{id, Block};
use crate::bus::Subscribable;
use crate::catalog::CatalogSource;
use crate::config::EngineConfig;
use crate::error::{EngineError, Result};
use crate::model::{ModelStore, ModelsExt};
use crate::render::{render_store, RenderContext, RenderedPage};
use crate::session::Session;
use crate::store::{StoreData, StorePatch, StoreRecord};
use crate::template::find_preset;
use crate::theme::{SocialLinks, ThemePatch};

pub use policy::{KeepDirtyEdits, LastWriteWins, RefreshDecision, RefreshPolicy};
pub use realtime::{RealtimeHandle, RealtimeStats};

/// Externally visible controller state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControllerStatus {
    Uninitialized,
    Loading,
    Ready { dirty: bool },
    Saving,
    Error { message: String, retryable: bool },
}

/// Outcome of the last completed fetch, save or mutation. In-flight work is
/// counted separately in [`State`].
#[derive(Debug, Clone, PartialEq, Eq)]
enum Phase {
    Uninitialized,
    Ready,
    Error { message: String, retryable: bool },
}

#[derive(Debug)]
struct State {
    store: Option<StoreData>,
    phase: Phase,
    /// Bumped by every applied mutation and every installed fetch.
    revision: u64,
    /// The revision that matches what was last read or written.
    clean_revision: u64,
    /// Token of the newest fetch started.
    latest_fetch: u64,
    /// Fetches and saves started but not yet finished.
    loading: u32,
    saving: u32,
    remote_change_pending: bool,
}

#[derive(Debug, Clone, Copy)]
enum Work {
    Fetch,
    Save,
}

impl State {
    fn dirty(&self) -> bool {
        self.revision != self.clean_revision
    }

    fn outstanding(&mut self, work: Work) -> &mut u32 {
        match work {
            Work::Fetch => &mut self.loading,
            Work::Save => &mut self.saving,
        }
    }

    /// An outstanding save wins over an outstanding fetch; with neither, the
    /// last outcome shows.
    fn status(&self) -> ControllerStatus {
        if self.saving > 0 {
            return ControllerStatus::Saving;
        }
        if self.loading > 0 {
            return ControllerStatus::Loading;
        }
        match &self.phase {
            Phase::Uninitialized => ControllerStatus::Uninitialized,
            Phase::Ready => ControllerStatus::Ready {
                dirty: self.dirty(),
            },
            Phase::Error { message, retryable } => ControllerStatus::Error {
                message: message.clone(),
                retryable: *retryable,
            },
        }
    }

    fn fail(&mut self, err: &EngineError) {
        self.phase = Phase::Error {
            message: err.to_string(),
            retryable: err.is_retryable(),
        };
    }
}

/// One outstanding fetch or save. Counted until finished, or until dropped
/// if the caller abandons the future.
struct InFlight<'a> {
    state: &'a Mutex<State>,
    work: Work,
    finished: bool,
}

impl<'a> InFlight<'a> {
    fn start(state: &'a Mutex<State>, locked: &mut State, work: Work) -> Self {
        *locked.outstanding(work) += 1;
        Self {
            state,
            work,
            finished: false,
        }
    }

    fn finish(mut self, locked: &mut State) {
        let count = locked.outstanding(self.work);
        *count = count.saturating_sub(1);
        self.finished = true;
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        let mut locked = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let count = locked.outstanding(self.work);
        *count = count.saturating_sub(1);
    }
}

struct Inner<S> {
    models: S,
    session: Session,
    config: EngineConfig,
    policy: Box<dyn RefreshPolicy>,
    state: Mutex<State>,
}

/// Loads, edits and saves the store of the session's merchant.
///
/// Cheap to clone; clones share the same state. Mutations are synchronous
/// and never wait on I/O. `fetch` and `save` may be outstanding at the same
/// time and complete in any order.
pub struct StoreController<S> {
    inner: Arc<Inner<S>>,
}

impl<S> Clone for StoreController<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: ModelStore> StoreController<S> {
    pub fn new(models: S, session: Session) -> Self {
        Self::with_config(models, session, EngineConfig::default())
    }

    /// Controller whose refresh policy is chosen by `config.refresh_policy`.
    pub fn with_config(models: S, session: Session, config: EngineConfig) -> Self {
        let policy = policy::policy_for(config.refresh_policy);
        Self::with_policy(models, session, config, policy)
    }

    pub fn with_policy(
        models: S,
        session: Session,
        config: EngineConfig,
        policy: Box<dyn RefreshPolicy>,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                models,
                session,
                config,
                policy,
                state: Mutex::new(State {
                    store: None,
                    phase: Phase::Uninitialized,
                    revision: 0,
                    clean_revision: 0,
                    latest_fetch: 0,
                    loading: 0,
                    saving: 0,
                    remote_change_pending: false,
                }),
            }),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.inner.config
    }

    pub fn session(&self) -> &Session {
        &self.inner.session
    }

    /// Snapshot of the in-memory store, if one has been fetched.
    pub fn store(&self) -> Option<StoreData> {
        self.read().store.clone()
    }

    pub fn status(&self) -> ControllerStatus {
        self.read().status()
    }

    /// Whether the in-memory store has edits that were never saved.
    pub fn is_dirty(&self) -> bool {
        self.read().dirty()
    }

    /// Whether a change notification was held back by the refresh policy
    /// since the last fetch or save.
    pub fn has_remote_change(&self) -> bool {
        self.read().remote_change_pending
    }

    /// Load the merchant's store, or a starter store from the first preset
    /// if the merchant has none yet.
    ///
    /// If a newer fetch was started while this one was outstanding, this
    /// result is dropped and the current in-memory store is returned.
    pub async fn fetch(&self) -> Result<StoreData> {
        let merchant_id = self.inner.session.require_merchant()?.to_string();

        let (token, in_flight) = {
            let mut state = self.lock("fetch")?;
            state.latest_fetch += 1;
            let in_flight = InFlight::start(&self.inner.state, &mut state, Work::Fetch);
            (state.latest_fetch, in_flight)
        };

        let loaded = self
            .inner
            .models
            .models::<StoreRecord>()
            .get(&merchant_id)
            .await;

        let mut state = self.lock("fetch")?;
        in_flight.finish(&mut state);
        if token != state.latest_fetch {
            debug!(merchant_id = %merchant_id, token, latest = state.latest_fetch, "dropping stale fetch result");
            return match (&state.store, loaded) {
                (Some(current), _) => Ok(current.clone()),
                (None, Ok(record)) => Ok(Self::materialize(&merchant_id, record.map(|v| v.data))),
                (None, Err(e)) => Err(e.into()),
            };
        }

        match loaded {
            Ok(record) => {
                let created = record.is_none();
                let store = Self::materialize(&merchant_id, record.map(|v| v.data));
                state.store = Some(store.clone());
                state.revision += 1;
                state.clean_revision = state.revision;
                state.remote_change_pending = false;
                state.phase = Phase::Ready;
                info!(
                    merchant_id = %merchant_id,
                    template_id = %store.template_id,
                    blocks = store.layout.len(),
                    created,
                    "store fetched"
                );
                Ok(store)
            }
            Err(e) => {
                let err = EngineError::from(e);
                warn!(merchant_id = %merchant_id, error = %err, "store fetch failed");
                state.fail(&err);
                Err(err)
            }
        }
    }

    fn materialize(merchant_id: &str, record: Option<StoreRecord>) -> StoreData {
        match record {
            Some(record) => record.into_store(),
            None => StoreData::starter(merchant_id),
        }
    }

    /// Merge `patch` into the in-memory store and upsert the whole record.
    ///
    /// The first save of a store assigns its id. On failure the in-memory
    /// store is left exactly as it was. Edits made while the save was
    /// outstanding are kept and leave the controller dirty.
    pub async fn save(&self, patch: StorePatch) -> Result<StoreData> {
        let merchant_id = self.inner.session.require_merchant()?.to_string();

        let (candidate, started_at, in_flight) = {
            let mut state = self.lock("save")?;
            let current = state.store.as_ref().ok_or(EngineError::NotLoaded)?;
            let mut candidate = current.clone();
            candidate.apply(patch.clone());
            if candidate.id.is_none() {
                candidate.id = Some(id::store_id());
            }
            let in_flight = InFlight::start(&self.inner.state, &mut state, Work::Save);
            (candidate, state.revision, in_flight)
        };

        let written = match StoreRecord::from_store(&candidate) {
            Ok(record) => self.inner.models.models::<StoreRecord>().save(&record).await,
            Err(e) => Err(e),
        };

        let mut state = self.lock("save")?;
        in_flight.finish(&mut state);
        match written {
            Ok(versioned) => {
                if state.revision == started_at {
                    state.store = Some(candidate.clone());
                    state.clean_revision = state.revision;
                } else if let Some(current) = state.store.as_mut() {
                    if current.id.is_none() {
                        current.id = candidate.id.clone();
                    }
                    current.apply(patch);
                }
                state.remote_change_pending = false;
                state.phase = Phase::Ready;
                info!(
                    merchant_id = %merchant_id,
                    version = versioned.version,
                    dirty = state.dirty(),
                    "store saved"
                );
                Ok(candidate)
            }
            Err(e) => {
                let err = EngineError::from(e);
                warn!(merchant_id = %merchant_id, error = %err, "store save failed");
                state.fail(&err);
                Err(err)
            }
        }
    }

    /// Shallow-merge `patch` into the settings of block `block_id`.
    ///
    /// `Ok(false)` if no such block or the patch changes nothing. A patch
    /// with unknown keys, or one that does not fit the block's settings
    /// shape, is rejected and leaves the block unchanged.
    pub fn update_section(&self, block_id: &str, patch: &Map<String, Value>) -> Result<bool> {
        self.mutate("update_section", |store| match store.layout.get_mut(block_id) {
            Some(block) => block.settings.merge(patch),
            None => Ok(false),
        })
    }

    /// Append `block` to the layout. `Ok(false)` if a block with the same id
    /// is already there.
    pub fn add_section(&self, block: Block) -> Result<bool> {
        self.mutate("add_section", |store| {
            if store.layout.get(&block.id).is_some() {
                return Ok(false);
            }
            store.layout.push(block);
            Ok(true)
        })
    }

    pub fn remove_section(&self, block_id: &str) -> Result<bool> {
        self.mutate("remove_section", |store| {
            Ok(store.layout.remove(block_id).is_some())
        })
    }

    /// Move the block at `from` to `to`, shifting the blocks in between.
    pub fn reorder_sections(&self, from: usize, to: usize) -> Result<bool> {
        self.mutate("reorder_sections", |store| Ok(store.layout.reorder(from, to)))
    }

    pub fn toggle_section(&self, block_id: &str, enabled: bool) -> Result<bool> {
        self.mutate("toggle_section", |store| match store.layout.get_mut(block_id) {
            Some(block) if block.enabled != enabled => {
                block.enabled = enabled;
                Ok(true)
            }
            _ => Ok(false),
        })
    }

    pub fn update_theme(&self, patch: ThemePatch) -> Result<bool> {
        self.mutate("update_theme", |store| {
            store.theme_config.apply(patch);
            Ok(true)
        })
    }

    /// Merge `links` into the store's social links, platform by platform.
    pub fn update_social_links(&self, links: SocialLinks) -> Result<bool> {
        self.mutate("update_social_links", |store| {
            store.social_links.merge(links);
            Ok(true)
        })
    }

    /// Overwrite layout, theme, template and module type from a preset.
    /// `Ok(false)` for an unknown preset id.
    pub fn apply_template(&self, preset_id: &str) -> Result<bool> {
        self.mutate("apply_template", |store| {
            let Some(preset) = find_preset(preset_id) else {
                return Ok(false);
            };
            store.apply_preset(preset);
            info!(merchant_id = %store.merchant_id(), preset_id, "template applied");
            Ok(true)
        })
    }

    /// Render the in-memory store, saved or not.
    pub async fn preview(&self, catalog: &dyn CatalogSource) -> Result<RenderedPage> {
        let store = self.store().ok_or(EngineError::NotLoaded)?;
        let ctx = RenderContext::new(store.merchant_id(), catalog).with_config(&self.inner.config);
        Ok(render_store(&store, &ctx).await)
    }

    fn mutate<F>(&self, op: &'static str, f: F) -> Result<bool>
    where
        F: FnOnce(&mut StoreData) -> Result<bool>,
    {
        let mut state = self.lock(op)?;
        let changed = {
            let store = state.store.as_mut().ok_or(EngineError::NotLoaded)?;
            f(store)?
        };

        if changed {
            state.revision += 1;
            if matches!(state.phase, Phase::Error { .. }) {
                state.phase = Phase::Ready;
            }
        }
        debug!(op, changed, dirty = state.dirty(), "store mutation");
        Ok(changed)
    }

    fn lock(&self, op: &'static str) -> Result<MutexGuard<'_, State>> {
        self.inner
            .state
            .lock()
            .map_err(|_| EngineError::LockPoisoned(op))
    }

    fn read(&self) -> MutexGuard<'_, State> {
        self.inner
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl<S: ModelStore + 'static> StoreController<S> {
    /// Fetch, then start the realtime subscription if the config asks for it.
    pub async fn mount<B>(&self, bus: &B) -> Result<(StoreData, Option<RealtimeHandle>)>
    where
        B: Subscribable + ?Sized,
    {
        let store = self.fetch().await?;
        let handle = if self.inner.config.realtime {
            Some(self.start_realtime(bus)?)
        } else {
            None
        };
        Ok((store, handle))
    }
}
