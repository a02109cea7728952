use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{Receiver, SyncSender, TrySendError, sync_channel};
use std::thread::{self, JoinHandle};

use anyhow::{Context, Result};
use log::{debug, info, warn};

use crate::cue::{CuePlayer, CueSink, SoundCue};

pub const CUE_QUEUE_CAPACITY: usize = 16;

/// Owns the cue queue and the thread draining it into a [`CuePlayer`].
///
/// `fire` uses `try_send`, so a slow or stuck player can never stall the
/// caller. When the queue is full the cue being fired is dropped.
pub struct CueDispatcher {
    sender: Option<SyncSender<SoundCue>>,
    thread: Option<JoinHandle<()>>,
    dropped: AtomicU64,
}

impl CueDispatcher {
    pub fn spawn(player: Box<dyn CuePlayer>) -> Result<Self> {
        Self::with_capacity(player, CUE_QUEUE_CAPACITY)
    }

    pub fn with_capacity(player: Box<dyn CuePlayer>, capacity: usize) -> Result<Self> {
        let (sender, receiver) = sync_channel(capacity);
        let thread = thread::Builder::new()
            .name("cue-dispatch".into())
            .spawn(move || dispatch_loop(receiver, player))
            .context("failed to spawn cue dispatcher thread")?;
        info!("Cue dispatcher started (capacity {capacity})");
        Ok(Self {
            sender: Some(sender),
            thread: Some(thread),
            dropped: AtomicU64::new(0),
        })
    }

    /// Queue a cue. Returns false when it was dropped.
    pub fn try_fire(&self, cue: SoundCue) -> bool {
        let Some(sender) = &self.sender else {
            return false;
        };
        match sender.try_send(cue) {
            Ok(()) => true,
            Err(TrySendError::Full(cue)) => {
                self.dropped.fetch_add(1, Ordering::Relaxed);
                debug!("Cue queue full, dropping {cue}");
                false
            }
            Err(TrySendError::Disconnected(cue)) => {
                debug!("Cue dispatcher gone, dropping {cue}");
                false
            }
        }
    }

    /// Cues dropped because the queue was full.
    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }

    /// Close the queue and wait for queued cues to drain. Idempotent.
    pub fn shutdown(&mut self) {
        // Dropping the sender ends the loop once the queue is empty.
        self.sender.take();
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                warn!("Cue dispatcher thread panicked");
            }
            info!("Cue dispatcher stopped ({} dropped)", self.dropped());
        }
    }
}

impl CueSink for CueDispatcher {
    fn fire(&self, cue: SoundCue) {
        self.try_fire(cue);
    }
}

impl Drop for CueDispatcher {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn dispatch_loop(receiver: Receiver<SoundCue>, mut player: Box<dyn CuePlayer>) {
    while let Ok(cue) = receiver.recv() {
        if let Err(e) = player.play(cue) {
            warn!("Failed to play {cue} cue: {e:#}");
        }
    }
}
