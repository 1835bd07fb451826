use std::borrow::Cow;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::JoinHandle;
use std::time::{Duration, SystemTime};

use parking_lot::Mutex;

use crate::texture::{DecodedTexture, TextureSettings, decode_texture};

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// How the content of a watched file is interpreted once loaded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WatchKind {
    /// Fragment shader source, consumed as text.
    Shader,
    /// Image bound to sampler slot 0..=3, decoded into a pixel buffer.
    Texture { slot: u8, settings: TextureSettings },
}

/// One watched entry: a path, its interpretation, and the most recently
/// loaded content.
#[derive(Debug)]
pub struct WatchFile {
    pub path: PathBuf,
    pub kind: WatchKind,
    /// Raw bytes of the last successful load.
    pub data: Vec<u8>,
    /// Decoded pixels of the last successful load, texture entries only.
    pub texture: Option<DecodedTexture>,
    last_modified: Option<SystemTime>,
}

impl WatchFile {
    pub fn shader(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            kind: WatchKind::Shader,
            data: Vec::new(),
            texture: None,
            last_modified: None,
        }
    }

    pub fn texture(path: impl Into<PathBuf>, slot: u8, settings: TextureSettings) -> Self {
        debug_assert!(slot < 4, "texture slots are 0..=3");
        Self {
            path: path.into(),
            kind: WatchKind::Texture { slot, settings },
            data: Vec::new(),
            texture: None,
            last_modified: None,
        }
    }

    /// Loaded bytes as text, for shader entries.
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.data)
    }
}

#[derive(Debug, Default)]
struct WatcherState {
    files: Vec<WatchFile>,
    /// Index of the one unacknowledged change, if any. While set, polling
    /// skips every entry; further changes wait for the consumer.
    changed: Option<usize>,
}

/// Polls a fixed set of files for modification-time changes on a background
/// thread and hands changed content to a consumer, one change at a time.
///
/// Exactly two threads touch the shared state: the poll thread and whatever
/// thread calls the consumer methods. Both only hold the lock for the
/// duration of a state read or write; the buffer of a changed entry is fully
/// written before the pending marker is set under the same lock acquisition,
/// so a consumer that observes the marker sees complete content.
pub struct FileWatcher {
    state: Arc<Mutex<WatcherState>>,
    running: Arc<AtomicBool>,
    poll_interval: Duration,
    handle: Option<JoinHandle<()>>,
}

impl FileWatcher {
    pub fn new(files: Vec<WatchFile>) -> Self {
        Self::with_poll_interval(files, DEFAULT_POLL_INTERVAL)
    }

    pub fn with_poll_interval(files: Vec<WatchFile>, poll_interval: Duration) -> Self {
        Self {
            state: Arc::new(Mutex::new(WatcherState {
                files,
                changed: None,
            })),
            running: Arc::new(AtomicBool::new(false)),
            poll_interval,
            handle: None,
        }
    }

    /// Spawn the background poll thread. No effect if already running.
    ///
    /// Entries start with no recorded modification time, so the first passes
    /// surface every file once, one per poll cycle; initial content arrives
    /// through the same path as live edits.
    pub fn start(&mut self) {
        if self.handle.is_some() {
            return;
        }
        self.running.store(true, Ordering::Relaxed);

        let state = Arc::clone(&self.state);
        let running = Arc::clone(&self.running);
        let interval = self.poll_interval;
        self.handle = Some(std::thread::spawn(move || {
            log::info!("file watcher started, polling every {interval:?}");
            while running.load(Ordering::Relaxed) {
                poll_once(&state);
                std::thread::sleep(interval);
            }
            log::info!("file watcher stopped");
        }));
    }

    /// Ask the poll thread to exit and wait for it. Consumers can release
    /// shared buffers safely once this returns.
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }

    /// Whether a change is waiting to be consumed.
    pub fn has_pending_change(&self) -> bool {
        self.state.lock().changed.is_some()
    }

    /// Run `consume` on the changed entry and acknowledge the change, both
    /// under the state lock. Returns `None` when nothing is pending.
    ///
    /// Keep the closure cheap: recompiling or uploading inside it would stall
    /// the poll thread. Copy what you need out and release.
    pub fn consume_change<R>(&self, consume: impl FnOnce(&WatchFile) -> R) -> Option<R> {
        let mut state = self.state.lock();
        let index = state.changed?;
        let result = consume(&state.files[index]);
        state.changed = None;
        Some(result)
    }
}

impl Drop for FileWatcher {
    fn drop(&mut self) {
        self.stop();
    }
}

/// One scan over all entries. Stops early while a change is pending; entries
/// that changed in the meantime are picked up on a later pass, so changes are
/// serialized but never lost.
fn poll_once(state: &Mutex<WatcherState>) {
    let entry_count = state.lock().files.len();

    for index in 0..entry_count {
        let (path, kind, last_modified) = {
            let guard = state.lock();
            if guard.changed.is_some() {
                return;
            }
            let file = &guard.files[index];
            (file.path.clone(), file.kind, file.last_modified)
        };

        let modified = match fs::metadata(&path).and_then(|meta| meta.modified()) {
            Ok(time) => time,
            Err(err) => {
                log::warn!("cannot stat {}: {}", path.display(), err);
                continue;
            }
        };
        if last_modified == Some(modified) {
            continue;
        }

        // Read and decode outside the lock; only publishing touches shared
        // state. A failed read leaves the entry untouched, including its
        // stored mtime, so the next pass retries.
        let data = match fs::read(&path) {
            Ok(data) => data,
            Err(err) => {
                log::warn!("cannot read {}: {}", path.display(), err);
                continue;
            }
        };
        log::info!("read {} ({} bytes)", path.display(), data.len());

        let texture = match kind {
            WatchKind::Shader => None,
            WatchKind::Texture { slot, .. } => match decode_texture(&data) {
                Ok(texture) => Some(texture),
                Err(err) => {
                    log::error!(
                        "rejecting texture {} for slot {}: {}",
                        path.display(),
                        slot,
                        err
                    );
                    // Keep the previous texture but remember this mtime, so
                    // the broken file is only retried once it changes again.
                    let mut guard = state.lock();
                    guard.files[index].last_modified = Some(modified);
                    continue;
                }
            },
        };

        let mut guard = state.lock();
        let file = &mut guard.files[index];
        file.last_modified = Some(modified);
        file.data = data;
        if texture.is_some() {
            file.texture = texture;
        }
        guard.changed = Some(index);
    }
}
