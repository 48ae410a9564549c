use std::sync::Mutex;

use log::debug;

use crate::engine::{NotificationSink, RoundEvent};

/// Приёмник-пустышка: события никуда не уходят.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl NotificationSink for NullSink {
    fn publish(&self, _event: &RoundEvent) {}
}

/// Приёмник, пишущий события в лог (debug-уровень).
#[derive(Clone, Copy, Debug, Default)]
pub struct LogSink;

impl NotificationSink for LogSink {
    fn publish(&self, event: &RoundEvent) {
        debug!("событие #{}: {:?}", event.index, event.kind);
    }
}

/// Приёмник, складывающий события в буфер — для тестов и отладки.
#[derive(Debug, Default)]
pub struct CollectingSink {
    events: Mutex<Vec<RoundEvent>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Забрать накопленные события.
    pub fn drain(&self) -> Vec<RoundEvent> {
        match self.events.lock() {
            Ok(mut guard) => guard.drain(..).collect(),
            Err(_) => Vec::new(),
        }
    }
}

impl NotificationSink for CollectingSink {
    fn publish(&self, event: &RoundEvent) {
        if let Ok(mut guard) = self.events.lock() {
            guard.push(event.clone());
        }
    }
}
