//! Composite event sink: delegates to multiple sinks.
//!
//! Used to fan out execution events to the tracing log and a JSONL file at
//! the same time.

use super::event_sink::{EventSink, WaveEvent, emit_isolated};
use std::sync::Arc;

/// An event sink that delegates to multiple inner sinks.
///
/// Delegates are shared (`Arc`) because events are emitted from spawned
/// executor tasks. Each delegate is isolated, so one panicking sink does not
/// starve the ones after it.
///
/// ```text
/// ExecuteWaveUseCase ──emit──▶ CompositeEventSink
///                                   │
///                  ┌────────────────┴────────────────┐
///                  ▼                                 ▼
///          TracingEventSink                   JsonlEventSink
///          → tracing::info!                   → events.jsonl
/// ```
#[derive(Default)]
pub struct CompositeEventSink {
    delegates: Vec<Arc<dyn EventSink>>,
}

impl CompositeEventSink {
    pub fn new(delegates: Vec<Arc<dyn EventSink>>) -> Self {
        Self { delegates }
    }

    pub fn push(&mut self, sink: Arc<dyn EventSink>) {
        self.delegates.push(sink);
    }

    pub fn len(&self) -> usize {
        self.delegates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.delegates.is_empty()
    }
}

/// Delegate a call to all inner sinks.
macro_rules! delegate {
    ($self:ident, $event:expr) => {
        for d in &$self.delegates {
            emit_isolated(d.as_ref(), $event);
        }
    };
}

impl EventSink for CompositeEventSink {
    fn emit(&self, event: &WaveEvent) {
        delegate!(self, event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder(Mutex<Vec<String>>);

    impl EventSink for Recorder {
        fn emit(&self, event: &WaveEvent) {
            self.0.lock().unwrap().push(event.name().to_string());
        }
    }

    struct Exploding;

    impl EventSink for Exploding {
        fn emit(&self, _event: &WaveEvent) {
            panic!("boom");
        }
    }

    #[test]
    fn test_fans_out_to_every_delegate() {
        let first = Arc::new(Recorder::default());
        let second = Arc::new(Recorder::default());
        let composite = CompositeEventSink::new(vec![
            first.clone() as Arc<dyn EventSink>,
            Arc::new(Exploding),
            second.clone(),
        ]);
        assert_eq!(composite.len(), 3);

        composite.emit(&WaveEvent::WaveStart {
            wave_index: 0,
            size: 3,
        });

        assert_eq!(*first.0.lock().unwrap(), vec!["waveStart"]);
        // Still reached after the panicking delegate
        assert_eq!(*second.0.lock().unwrap(), vec!["waveStart"]);
    }

    #[test]
    fn test_empty_composite_is_noop() {
        let composite = CompositeEventSink::default();
        assert!(composite.is_empty());
        composite.emit(&WaveEvent::WaveComplete {
            wave_index: 0,
            duration_ms: 1,
        });
    }
}
