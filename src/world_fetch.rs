//! One-shot loading of the world land dataset.
//!
//! Uses channel-based communication to bridge the async fetch with egui's
//! synchronous update loop. The fetch itself is pluggable through
//! [`WorldSource`] so the platform backends and tests share one loader.

use crate::geo::LandLayer;
use crate::state::WorldData;
use eframe::egui;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;

/// Errors that can occur while fetching the world dataset.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchError {
    /// The request could not be made or did not complete.
    Network(String),
    /// The server answered with a non-success status.
    Status(u16),
    /// The asset could not be read from disk.
    Io(String),
    /// The body was not a usable GeoJSON FeatureCollection.
    Parse(String),
    /// The fetch was cancelled before it delivered.
    Cancelled,
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchError::Network(msg) => write!(f, "Network error: {}", msg),
            FetchError::Status(code) => write!(f, "Server returned HTTP {}", code),
            FetchError::Io(msg) => write!(f, "Read failed: {}", msg),
            FetchError::Parse(msg) => write!(f, "{}", msg),
            FetchError::Cancelled => write!(f, "Fetch cancelled"),
        }
    }
}

impl std::error::Error for FetchError {}

pub type FetchResult = Result<LandLayer, FetchError>;

/// Shared flag that stops a fetch from delivering once set.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Return path for a fetch task.
pub struct FetchReply {
    sender: Sender<FetchResult>,
    cancel: CancelToken,
    ctx: Option<egui::Context>,
}

impl FetchReply {
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Delivers the result and wakes the UI, unless the fetch was cancelled.
    pub fn send(self, result: FetchResult) {
        if self.cancel.is_cancelled() {
            log::debug!("Dropping world data result after cancellation");
            return;
        }
        let _ = self.sender.send(result);
        if let Some(ctx) = self.ctx {
            ctx.request_repaint();
        }
    }
}

/// Something that can fetch and parse the world dataset.
pub trait WorldSource {
    /// Starts fetching `path`; the result must be handed to `reply`.
    fn fetch(&self, path: &str, reply: FetchReply);
}

/// Loader that fetches the dataset at most once and caches the result.
pub struct WorldLoader {
    source: Box<dyn WorldSource>,
    path: String,
    data: WorldData,
    sender: Sender<FetchResult>,
    receiver: Receiver<FetchResult>,
    cancel: CancelToken,
    ctx: Option<egui::Context>,
    fetches: usize,
}

impl WorldLoader {
    pub fn new(source: Box<dyn WorldSource>, path: impl Into<String>) -> Self {
        let (sender, receiver) = channel();
        Self {
            source,
            path: path.into(),
            data: WorldData::Idle,
            sender,
            receiver,
            cancel: CancelToken::default(),
            ctx: None,
            fetches: 0,
        }
    }

    /// Context to wake when a fetch completes.
    pub fn set_context(&mut self, ctx: egui::Context) {
        self.ctx = Some(ctx);
    }

    pub fn data(&self) -> &WorldData {
        &self.data
    }

    /// Number of fetches started so far.
    #[allow(dead_code)]
    pub fn fetches(&self) -> usize {
        self.fetches
    }

    /// Starts the fetch if nothing has been requested yet.
    pub fn request(&mut self) {
        if !matches!(self.data, WorldData::Idle) {
            return;
        }

        log::info!("Fetching world data from {}", self.path);
        self.data = WorldData::Loading;
        self.fetches += 1;

        let reply = FetchReply {
            sender: self.sender.clone(),
            cancel: self.cancel.clone(),
            ctx: self.ctx.clone(),
        };
        self.source.fetch(&self.path, reply);
    }

    /// Non-blocking check for a completed fetch.
    ///
    /// Returns true when the load state changed.
    pub fn poll(&mut self) -> bool {
        let Ok(result) = self.receiver.try_recv() else {
            return false;
        };
        if !self.data.is_loading() {
            return false;
        }

        self.data = match result {
            Ok(layer) => {
                log::info!(
                    "Loaded {} land features ({} polygons)",
                    layer.features.len(),
                    layer.polygon_count()
                );
                WorldData::Loaded(Arc::new(layer))
            }
            Err(e) => {
                log::error!("World data unavailable: {}", e);
                WorldData::Failed(e.to_string())
            }
        };
        true
    }

    /// Forgets a failed load so the next request fetches again.
    pub fn reset_failed(&mut self) {
        if self.data.failure().is_some() {
            self.data = WorldData::Idle;
        }
    }

    /// Cancels any in-flight fetch. Later results are discarded.
    pub fn cancel(&mut self) {
        self.cancel.cancel();
        if self.data.is_loading() {
            self.data = WorldData::Failed(FetchError::Cancelled.to_string());
        }
    }
}

impl Drop for WorldLoader {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

/// Parses a fetched body into the land layer.
pub fn parse_world(body: &str) -> FetchResult {
    LandLayer::from_geojson(body).map_err(FetchError::Parse)
}

/// Reads the dataset from disk on a background thread.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Default)]
pub struct FileSource;

#[cfg(not(target_arch = "wasm32"))]
impl WorldSource for FileSource {
    fn fetch(&self, path: &str, reply: FetchReply) {
        let path = path.to_string();

        std::thread::spawn(move || {
            let started = web_time::Instant::now();
            let result = std::fs::read_to_string(&path)
                .map_err(|e| FetchError::Io(format!("{}: {}", path, e)))
                .and_then(|body| {
                    if reply.is_cancelled() {
                        return Err(FetchError::Cancelled);
                    }
                    parse_world(&body)
                });
            log::debug!("World data read in {:?}", started.elapsed());
            reply.send(result);
        });
    }
}

/// Fetches the dataset over HTTP with the browser's `fetch`.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Default)]
pub struct HttpSource;

#[cfg(target_arch = "wasm32")]
impl WorldSource for HttpSource {
    fn fetch(&self, path: &str, reply: FetchReply) {
        let path = path.to_string();

        wasm_bindgen_futures::spawn_local(async move {
            let started = web_time::Instant::now();
            let result = match fetch_text(&path).await {
                Ok(_) if reply.is_cancelled() => Err(FetchError::Cancelled),
                Ok(body) => parse_world(&body),
                Err(e) => Err(e),
            };
            log::debug!("World data fetched in {:?}", started.elapsed());
            reply.send(result);
        });
    }
}

#[cfg(target_arch = "wasm32")]
async fn fetch_text(path: &str) -> Result<String, FetchError> {
    use wasm_bindgen::JsCast;
    use wasm_bindgen_futures::JsFuture;

    let window = web_sys::window().ok_or_else(|| FetchError::Network("No window".into()))?;

    let response = JsFuture::from(window.fetch_with_str(path))
        .await
        .map_err(|e| FetchError::Network(format!("{:?}", e)))?;
    let response: web_sys::Response = response
        .dyn_into()
        .map_err(|_| FetchError::Network("Unexpected fetch result".into()))?;

    if !response.ok() {
        return Err(FetchError::Status(response.status()));
    }

    let text = response
        .text()
        .map_err(|e| FetchError::Network(format!("{:?}", e)))?;
    let text = JsFuture::from(text)
        .await
        .map_err(|e| FetchError::Network(format!("{:?}", e)))?;

    text.as_string()
        .ok_or_else(|| FetchError::Parse("Response body was not text".into()))
}

/// The platform's default source.
#[cfg(not(target_arch = "wasm32"))]
pub fn default_source() -> Box<dyn WorldSource> {
    Box::new(FileSource)
}

/// The platform's default source.
#[cfg(target_arch = "wasm32")]
pub fn default_source() -> Box<dyn WorldSource> {
    Box::new(HttpSource)
}
