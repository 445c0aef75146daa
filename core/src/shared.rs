use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::chip8::Chip8;
use crate::display::FrameBuffer;
use crate::error::Result;
use crate::snapshot::Snapshot;

/// # Shared Chip-8
/// A cloneable handle for driving one machine from several threads.
///
/// Key events and resets coming from an input thread are serialised with
/// `step` behind a single lock, so none of them ever lands half way through
/// a cycle.
#[derive(Clone)]
pub struct SharedChip8 {
    inner: Arc<Mutex<Chip8>>,
}

impl SharedChip8 {
    pub fn new(chip8: Chip8) -> Self {
        SharedChip8 {
            inner: Arc::new(Mutex::new(chip8)),
        }
    }

    // a poisoned lock still guards a usable machine
    fn lock(&self) -> MutexGuard<'_, Chip8> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn step(&self) -> Result<()> {
        self.lock().step()
    }

    pub fn reset(&self) {
        self.lock().reset()
    }

    pub fn key_press(&self, key: u8) {
        self.lock().key_press(key)
    }

    pub fn key_release(&self, key: u8) {
        self.lock().key_release(key)
    }

    pub fn snapshot(&self) -> Snapshot {
        self.lock().snapshot()
    }

    pub fn take_frame(&self) -> Option<FrameBuffer> {
        self.lock().take_frame()
    }

    /// Runs `f` with exclusive access to the machine
    pub fn with<R>(&self, f: impl FnOnce(&mut Chip8) -> R) -> R {
        f(&mut self.lock())
    }
}
