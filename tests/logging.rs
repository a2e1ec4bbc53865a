// ==============================================
// TRACING OUTPUT (integration)
// ==============================================

use std::io;
use std::sync::{Arc, Mutex};

use lfucache::LfuCache;
use tracing::Level;

#[derive(Clone, Default)]
struct CaptureBuffer(Arc<Mutex<Vec<u8>>>);

impl CaptureBuffer {
    fn contents(&self) -> String {
        let bytes = self.0.lock().map(|buf| buf.clone()).unwrap_or_default();
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

impl io::Write for CaptureBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if let Ok(mut inner) = self.0.lock() {
            inner.extend_from_slice(buf);
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn capture<F: FnOnce()>(level: Level, body: F) -> String {
    let buffer = CaptureBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    tracing::subscriber::with_default(subscriber, body);
    buffer.contents()
}

#[test]
fn eviction_is_traced_with_its_frequency() {
    let output = capture(Level::TRACE, || {
        let mut cache = LfuCache::new(1);
        cache.put("a", 1);
        cache.get(&"a");
        cache.get(&"a");
        cache.put("b", 2);
    });

    assert!(output.contains("creating LFU cache"), "{output}");
    assert!(output.contains("evicted least frequently used entry"), "{output}");
    assert!(output.contains("frequency=3"), "{output}");
}

#[test]
fn clear_is_logged_at_debug() {
    let output = capture(Level::DEBUG, || {
        let mut cache = LfuCache::new(4);
        cache.extend([(1, 1), (2, 2)]);
        cache.clear();
    });

    assert!(output.contains("clearing LFU cache"), "{output}");
    assert!(output.contains("dropped=2"), "{output}");
}

#[test]
fn eviction_is_silent_below_trace() {
    let output = capture(Level::DEBUG, || {
        let mut cache = LfuCache::new(1);
        cache.put(1, 1);
        cache.put(2, 2);
    });

    assert!(!output.contains("evicted"), "{output}");
}
