//! Operational notices raised while rendering.

use parking_lot::Mutex;

/// Log channel notices are reported on.
pub const NOTICE_CHANNEL: &str = "service_status_block";

/// Sink for operational notices (e.g. an invalid detail link).
pub trait NoticeLog: Send + Sync + 'static {
    fn notice(&self, message: &str);
}

/// Forwards notices to `tracing` at info level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNoticeLog;

impl NoticeLog for TracingNoticeLog {
    fn notice(&self, message: &str) {
        tracing::info!(target: "service_status_block", channel = NOTICE_CHANNEL, "{}", message);
    }
}

/// Keeps notices in memory, for hosts that collect them per request.
#[derive(Debug, Default)]
pub struct RecordingNoticeLog {
    entries: Mutex<Vec<String>>,
}

impl RecordingNoticeLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<String> {
        self.entries.lock().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl NoticeLog for RecordingNoticeLog {
    fn notice(&self, message: &str) {
        self.entries.lock().push(message.to_string());
    }
}
