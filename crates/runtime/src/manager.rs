//! Caller side of the worker boundary.
//!
//! The [`LanguageWorker`] lives on its own OS thread and sees one request at a
//! time through a bounded channel; every request carries a oneshot for its
//! single response. The manager keeps the snapshot a worker needs (options,
//! extra libs, open buffers) so a retired or crashed worker can be replaced
//! transparently.

use crate::cache::{CacheKey, QueryKey, ResultCache};
use crate::defaults::LanguageDefaults;
use crate::error::{Result, RuntimeError};
use async_trait::async_trait;
use indexmap::IndexMap;
use scriptscope_api::{
    ApiResult, CompilerOptions, Diagnostic, LanguageWorkerService, OutlineEntry, ReferenceMap,
    ResponsePayload, ScriptVersion, WorkerRequest, WorkerResponse,
};
use scriptscope_core::LanguageWorker;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};
use tokio::sync::{Mutex, mpsc, oneshot};

const REQUEST_QUEUE: usize = 64;
const IDLE_CHECK_PERIOD: Duration = Duration::from_secs(30);

struct Envelope {
    request: WorkerRequest,
    reply: oneshot::Sender<WorkerResponse>,
}

struct WorkerSlot {
    tx: mpsc::Sender<Envelope>,
    generation: u64,
    /// Defaults revision last pushed to this worker.
    revision: Option<u64>,
}

#[derive(Debug, Clone)]
struct BufferState {
    version: ScriptVersion,
    text: String,
    /// Whether the current worker holds this version.
    synced: bool,
}

struct State {
    worker: Option<WorkerSlot>,
    buffers: IndexMap<String, BufferState>,
    generation: u64,
    cache_revision: u64,
}

struct Shared {
    defaults: LanguageDefaults,
    state: Mutex<State>,
    cache: ResultCache,
    epoch: Instant,
    last_used_ms: AtomicU64,
}

impl Shared {
    fn now_ms(&self) -> u64 {
        self.epoch.elapsed().as_millis() as u64
    }

    fn touch(&self) {
        self.last_used_ms.store(self.now_ms(), Ordering::Release);
    }

    fn idle_for(&self) -> Duration {
        let last = self.last_used_ms.load(Ordering::Acquire);
        Duration::from_millis(self.now_ms().saturating_sub(last))
    }
}

/// Lazily spawned, idle-retired language worker.
///
/// Cloning is cheap; clones share the same worker.
#[derive(Clone)]
pub struct WorkerManager {
    shared: Arc<Shared>,
}

impl WorkerManager {
    /// Manager caching query results by `(file, version)`.
    pub fn new(defaults: LanguageDefaults) -> Self {
        let cache_revision = defaults.revision();
        Self {
            shared: Arc::new(Shared {
                defaults,
                state: Mutex::new(State {
                    worker: None,
                    buffers: IndexMap::new(),
                    generation: 0,
                    cache_revision,
                }),
                cache: ResultCache::new(),
                epoch: Instant::now(),
                last_used_ms: AtomicU64::new(0),
            }),
        }
    }

    pub fn defaults(&self) -> &LanguageDefaults {
        &self.shared.defaults
    }

    pub async fn is_running(&self) -> bool {
        let state = self.shared.state.lock().await;
        state.worker.as_ref().is_some_and(|w| !w.tx.is_closed())
    }

    /// Number of cached query results.
    pub fn cached_results(&self) -> usize {
        self.shared.cache.len()
    }

    /// Change compiler options; the worker picks them up on its next request.
    pub fn update_compiler_options(&self, options: CompilerOptions) {
        self.shared.defaults.set_compiler_options(options);
    }

    /// Record a buffer's text. It reaches the worker right away with eager
    /// model sync, otherwise just before the next request.
    pub async fn sync_buffer(
        &self,
        file_name: &str,
        version: ScriptVersion,
        text: impl Into<String>,
    ) -> Result<()> {
        self.shared.touch();
        let mut state = self.shared.state.lock().await;
        if let Some(existing) = state.buffers.get(file_name).filter(|b| version <= b.version) {
            return Err(RuntimeError::StaleVersion {
                file: file_name.to_string(),
                current: existing.version,
                attempted: version,
            });
        }
        state.buffers.insert(
            file_name.to_string(),
            BufferState {
                version,
                text: text.into(),
                synced: false,
            },
        );
        self.shared.cache.invalidate_file(file_name);

        if self.shared.defaults.eager_model_sync() {
            let result = self.ready(&mut state).await.map(|_| ());
            return settle(&mut state, result);
        }
        Ok(())
    }

    /// Returns whether the buffer was open.
    pub async fn close_buffer(&self, file_name: &str) -> Result<bool> {
        self.shared.touch();
        let mut state = self.shared.state.lock().await;
        let Some(buffer) = state.buffers.shift_remove(file_name) else {
            return Ok(false);
        };
        self.shared.cache.invalidate_file(file_name);

        let tx = state
            .worker
            .as_ref()
            .filter(|_| buffer.synced)
            .map(|w| w.tx.clone());
        if let Some(tx) = tx {
            let request = WorkerRequest::CloseBuffer {
                file_name: file_name.to_string(),
            };
            match exchange(&tx, request).await {
                Ok(response) => expect_ack("closeBuffer", response)?,
                // The buffer is gone from the snapshot, so a respawn will not
                // bring it back.
                Err(RuntimeError::WorkerGone) => state.worker = None,
                Err(err) => return Err(err),
            }
        }
        Ok(true)
    }

    pub async fn list_files(&self) -> Result<Vec<String>> {
        match self.request(WorkerRequest::ListFiles).await? {
            ResponsePayload::Files(files) => Ok(files),
            other => Err(unexpected("listFiles", &other)),
        }
    }

    pub async fn get_script_version(&self, file_name: &str) -> Result<Option<ScriptVersion>> {
        let request = WorkerRequest::GetScriptVersion {
            file_name: file_name.to_string(),
        };
        match self.request(request).await? {
            ResponsePayload::Version(version) => Ok(version),
            other => Err(unexpected("getScriptVersion", &other)),
        }
    }

    pub async fn get_script_text(&self, file_name: &str) -> Result<Option<String>> {
        let request = WorkerRequest::GetScriptText {
            file_name: file_name.to_string(),
        };
        match self.request(request).await? {
            ResponsePayload::Text(text) => Ok(text),
            other => Err(unexpected("getScriptText", &other)),
        }
    }

    pub async fn get_outline(&self, file_name: &str) -> Result<Vec<OutlineEntry>> {
        let request = WorkerRequest::GetOutline {
            file_name: file_name.to_string(),
        };
        match self.query(file_name, QueryKey::Outline, request).await? {
            ResponsePayload::Outline(outline) => Ok(outline),
            other => Err(unexpected("getOutline", &other)),
        }
    }

    pub async fn get_referenced_properties(
        &self,
        file_name: &str,
        roots: &[String],
    ) -> Result<ReferenceMap> {
        let request = WorkerRequest::GetReferencedProperties {
            file_name: file_name.to_string(),
            roots: roots.to_vec(),
        };
        match self
            .query(file_name, QueryKey::references(roots), request)
            .await?
        {
            ResponsePayload::References(references) => Ok(references),
            other => Err(unexpected("getReferencedProperties", &other)),
        }
    }

    pub async fn get_syntactic_diagnostics(&self, file_name: &str) -> Result<Vec<Diagnostic>> {
        if self.shared.defaults.diagnostics_options().no_syntax_validation {
            return Ok(Vec::new());
        }
        let request = WorkerRequest::GetSyntacticDiagnostics {
            file_name: file_name.to_string(),
        };
        match self.query(file_name, QueryKey::Diagnostics, request).await? {
            ResponsePayload::Diagnostics(diagnostics) => Ok(diagnostics),
            other => Err(unexpected("getSyntacticDiagnostics", &other)),
        }
    }

    /// Retire the worker now. The next request spawns a fresh one.
    pub async fn shutdown(&self) {
        let mut state = self.shared.state.lock().await;
        if let Some(worker) = state.worker.take() {
            tracing::info!(generation = worker.generation, "stopped language worker");
        }
    }

    async fn request(&self, request: WorkerRequest) -> Result<ResponsePayload> {
        self.shared.touch();
        let mut state = self.shared.state.lock().await;
        let result = self.send(&mut state, request).await;
        // Idle time counts from the end of a request, not its start.
        self.shared.touch();
        settle(&mut state, result)
    }

    async fn send(&self, state: &mut State, request: WorkerRequest) -> Result<ResponsePayload> {
        let tx = self.ready(state).await?;
        answer(exchange(&tx, request).await?)
    }

    /// Like [`Self::request`], served from the result cache when the file is a
    /// live buffer whose version has already been answered.
    async fn query(
        &self,
        file_name: &str,
        query: QueryKey,
        request: WorkerRequest,
    ) -> Result<ResponsePayload> {
        self.shared.touch();
        let mut state = self.shared.state.lock().await;
        let result = self.send_cached(&mut state, file_name, query, request).await;
        self.shared.touch();
        settle(&mut state, result)
    }

    async fn send_cached(
        &self,
        state: &mut State,
        file_name: &str,
        query: QueryKey,
        request: WorkerRequest,
    ) -> Result<ResponsePayload> {
        let tx = self.ready(state).await?;
        let cache = &self.shared.cache;
        let Some(buffer) = state.buffers.get(file_name) else {
            return answer(exchange(&tx, request).await?);
        };

        let key = CacheKey {
            file_name: file_name.to_string(),
            version: buffer.version,
            query,
        };
        if let Some(hit) = cache.get(&key) {
            tracing::trace!(file = file_name, version = %key.version, "cache hit");
            return Ok(hit);
        }

        let payload = answer(exchange(&tx, request).await?)?;
        cache.insert(key, payload.clone());
        Ok(payload)
    }

    /// Make sure a live worker holds the current defaults and every buffer.
    async fn ready(&self, state: &mut State) -> Result<mpsc::Sender<Envelope>> {
        if state.worker.as_ref().is_some_and(|w| w.tx.is_closed()) {
            tracing::warn!("language worker exited; respawning");
            state.worker = None;
        }
        if state.worker.is_none() {
            self.spawn(state)?;
        }

        let revision = self.shared.defaults.revision();
        if state.cache_revision != revision {
            self.shared.cache.clear();
            state.cache_revision = revision;
        }

        let (tx, stale) = match state.worker.as_ref() {
            Some(worker) => (worker.tx.clone(), worker.revision != Some(revision)),
            None => return Err(RuntimeError::WorkerGone),
        };

        if stale {
            let defaults = &self.shared.defaults;
            let options = WorkerRequest::UpdateCompilerOptions {
                options: defaults.compiler_options(),
            };
            expect_ack("updateCompilerOptions", exchange(&tx, options).await?)?;
            let libs = WorkerRequest::SyncExtraLibs {
                libs: defaults.extra_libs(),
            };
            let synced = exchange(&tx, libs).await?;
            // A rejected set fails this request only; the worker keeps its
            // previous extra libs until the defaults change again.
            if let Some(worker) = state.worker.as_mut() {
                worker.revision = Some(revision);
            }
            if let Err(err) = expect_ack("syncExtraLibs", synced) {
                tracing::warn!(revision, error = %err, "worker rejected extra libs");
                return Err(err);
            }
        }

        let pending: Vec<String> = state
            .buffers
            .iter()
            .filter(|(_, buffer)| !buffer.synced)
            .map(|(name, _)| name.clone())
            .collect();
        for file_name in pending {
            let Some(buffer) = state.buffers.get(&file_name) else {
                continue;
            };
            let request = WorkerRequest::SyncBuffer {
                file_name: file_name.clone(),
                version: buffer.version,
                text: buffer.text.clone(),
            };
            match exchange(&tx, request).await?.into_result() {
                Ok(_) => {
                    if let Some(buffer) = state.buffers.get_mut(&file_name) {
                        buffer.synced = true;
                    }
                }
                Err(message) => {
                    tracing::warn!(file = %file_name, %message, "worker rejected buffer");
                    state.buffers.shift_remove(&file_name);
                    return Err(RuntimeError::Worker(message));
                }
            }
        }

        Ok(tx)
    }

    fn spawn(&self, state: &mut State) -> Result<()> {
        let config = self.shared.defaults.to_config();
        let (tx, mut rx) = mpsc::channel::<Envelope>(REQUEST_QUEUE);
        state.generation += 1;
        let generation = state.generation;

        std::thread::Builder::new()
            .name(format!("scriptscope-worker-{generation}"))
            .spawn(move || {
                let mut worker = LanguageWorker::new(&config);
                while let Some(envelope) = rx.blocking_recv() {
                    let response = worker.handle(envelope.request);
                    let _ = envelope.reply.send(response);
                }
                tracing::debug!(generation, "language worker thread exiting");
            })?;

        state.worker = Some(WorkerSlot {
            tx,
            generation,
            revision: None,
        });
        for buffer in state.buffers.values_mut() {
            buffer.synced = false;
        }
        tracing::info!(generation, buffers = state.buffers.len(), "spawned language worker");

        if let Some(max_idle) = self.shared.defaults.worker_max_idle() {
            self.watch_idle(generation, max_idle);
        }
        Ok(())
    }

    /// Retire worker `generation` once nothing was asked of it for `max_idle`.
    fn watch_idle(&self, generation: u64, max_idle: Duration) {
        let shared = Arc::downgrade(&self.shared);
        let period = max_idle.min(IDLE_CHECK_PERIOD);

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            // The first tick completes immediately.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let Some(shared) = shared.upgrade() else {
                    break;
                };
                if shared.idle_for() < max_idle {
                    continue;
                }

                let mut state = shared.state.lock().await;
                if state.worker.as_ref().map(|w| w.generation) != Some(generation) {
                    break;
                }
                // A request may have finished while we waited for the lock.
                let idle = shared.idle_for();
                if idle < max_idle {
                    continue;
                }
                state.worker = None;
                tracing::info!(generation, idle_ms = idle.as_millis() as u64, "retired idle language worker");
                break;
            }
        });
    }
}

/// Forget a worker that vanished mid-request so the next call respawns it.
fn settle<T>(state: &mut State, result: Result<T>) -> Result<T> {
    if let Err(RuntimeError::WorkerGone) = &result {
        tracing::warn!("language worker went away during a request");
        state.worker = None;
    }
    result
}

async fn exchange(tx: &mpsc::Sender<Envelope>, request: WorkerRequest) -> Result<WorkerResponse> {
    let (reply, response) = oneshot::channel();
    tx.send(Envelope { request, reply })
        .await
        .map_err(|_| RuntimeError::WorkerGone)?;
    response.await.map_err(|_| RuntimeError::WorkerGone)
}

fn answer(response: WorkerResponse) -> Result<ResponsePayload> {
    response.into_result().map_err(RuntimeError::Worker)
}

fn expect_ack(method: &'static str, response: WorkerResponse) -> Result<()> {
    match answer(response)? {
        ResponsePayload::Ack => Ok(()),
        other => Err(unexpected(method, &other)),
    }
}

fn unexpected(method: &'static str, payload: &ResponsePayload) -> RuntimeError {
    RuntimeError::UnexpectedResponse {
        method,
        found: payload.kind(),
    }
}

#[async_trait]
impl LanguageWorkerService for WorkerManager {
    async fn get_outline(&self, file_name: &str) -> ApiResult<Vec<OutlineEntry>> {
        Ok(WorkerManager::get_outline(self, file_name).await?)
    }

    async fn get_referenced_properties(
        &self,
        file_name: &str,
        roots: &[String],
    ) -> ApiResult<ReferenceMap> {
        Ok(WorkerManager::get_referenced_properties(self, file_name, roots).await?)
    }

    async fn get_syntactic_diagnostics(&self, file_name: &str) -> ApiResult<Vec<Diagnostic>> {
        Ok(WorkerManager::get_syntactic_diagnostics(self, file_name).await?)
    }

    async fn list_files(&self) -> ApiResult<Vec<String>> {
        Ok(WorkerManager::list_files(self).await?)
    }

    async fn get_script_version(&self, file_name: &str) -> ApiResult<Option<ScriptVersion>> {
        Ok(WorkerManager::get_script_version(self, file_name).await?)
    }

    async fn get_script_text(&self, file_name: &str) -> ApiResult<Option<String>> {
        Ok(WorkerManager::get_script_text(self, file_name).await?)
    }
}
