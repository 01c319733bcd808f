//! Fault-injecting sink shared by the integration tests.

#![allow(dead_code)]

use std::io;
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use writer::{OpenMode, Sink, SinkOpener};

/// Failure switches and observed output, shared between an opener, its sinks
/// and the test.
#[derive(Debug, Default)]
pub struct Script {
    pub fail_open: AtomicBool,
    pub fail_write: AtomicBool,
    pub fail_flush: AtomicBool,
    pub fail_close: AtomicBool,
    pub opens: AtomicUsize,
    pub writes: AtomicUsize,
    delivered: Mutex<Vec<u8>>,
    pending: Mutex<Vec<u8>>,
}

impl Script {
    /// Bytes that made it past the sink's own flush.
    pub fn delivered(&self) -> Vec<u8> {
        self.delivered.lock().unwrap().clone()
    }

    /// Bytes the sink accepted but has not delivered yet.
    pub fn pending(&self) -> Vec<u8> {
        self.pending.lock().unwrap().clone()
    }

    fn deliver(&self) {
        let mut pending = self.pending.lock().unwrap();
        self.delivered.lock().unwrap().append(&mut pending);
    }
}

/// Opener whose sinks behave like a buffered adapter: accepted bytes stay
/// pending until a successful flush, and survive a failed one.
#[derive(Clone, Debug, Default)]
pub struct ScriptedOpener {
    pub script: Arc<Script>,
}

impl ScriptedOpener {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SinkOpener for ScriptedOpener {
    fn open(&self, _target: &Path, _mode: OpenMode) -> io::Result<Box<dyn Sink>> {
        if self.script.fail_open.load(Ordering::SeqCst) {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "open refused"));
        }
        self.script.opens.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(ScriptedSink {
            script: Arc::clone(&self.script),
        }))
    }
}

struct ScriptedSink {
    script: Arc<Script>,
}

impl Sink for ScriptedSink {
    fn write_all(&mut self, data: &[u8]) -> io::Result<()> {
        if self.script.fail_write.load(Ordering::SeqCst) {
            return Err(io::Error::new(io::ErrorKind::StorageFull, "no space left"));
        }
        self.script.writes.fetch_add(1, Ordering::SeqCst);
        self.script.pending.lock().unwrap().extend_from_slice(data);
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        if self.script.fail_flush.load(Ordering::SeqCst) {
            return Err(io::Error::other("flush failed"));
        }
        self.script.deliver();
        Ok(())
    }

    fn close(self: Box<Self>) -> io::Result<()> {
        if self.script.fail_close.load(Ordering::SeqCst) {
            return Err(io::Error::other("close failed"));
        }
        self.script.deliver();
        Ok(())
    }
}
