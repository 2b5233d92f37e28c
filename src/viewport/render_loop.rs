use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

/// Start/stop switch for the per-frame callback.
#[derive(Debug, Default)]
pub struct RenderLoop {
    inner: Arc<LoopState>,
}

#[derive(Debug, Default)]
struct LoopState {
    running: AtomicBool,
    frames: AtomicU64,
}

impl RenderLoop {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&self) {
        self.inner.running.store(true, Ordering::SeqCst);
    }

    pub fn stop(&self) {
        self.inner.running.store(false, Ordering::SeqCst);
    }

    pub fn is_running(&self) -> bool {
        self.inner.running.load(Ordering::SeqCst)
    }

    /// Count a frame if running. Returns whether the frame should be drawn.
    pub fn tick(&self) -> bool {
        if !self.is_running() {
            return false;
        }
        self.inner.frames.fetch_add(1, Ordering::Relaxed);
        true
    }

    pub fn frames(&self) -> u64 {
        self.inner.frames.load(Ordering::Relaxed)
    }

    /// A handle that can stop this loop from elsewhere.
    pub fn handle(&self) -> LoopHandle {
        LoopHandle {
            inner: Arc::clone(&self.inner),
        }
    }
}

/// Stop-only view of a [`RenderLoop`].
#[derive(Debug, Clone)]
pub struct LoopHandle {
    inner: Arc<LoopState>,
}

impl LoopHandle {
    pub fn stop(&self) {
        self.inner.running.store(false, Ordering::SeqCst);
    }

    pub fn is_running(&self) -> bool {
        self.inner.running.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticks_only_while_running() {
        let l = RenderLoop::new();
        assert!(!l.tick());
        l.start();
        assert!(l.tick());
        assert!(l.tick());
        l.stop();
        assert!(!l.tick());
        assert_eq!(l.frames(), 2);
    }

    #[test]
    fn handle_stops_loop() {
        let l = RenderLoop::new();
        let handle = l.handle();
        l.start();
        assert!(handle.is_running());
        let other = handle.clone();
        std::thread::spawn(move || other.stop()).join().unwrap();
        assert!(!l.is_running());
        assert!(!l.tick());
    }
}
