use std::sync::Mutex;

/// Counters for the table-serving surface: tables published to consumers
/// and ingest requests that failed.
pub struct MetricsRecorder {
    inner: Mutex<Metrics>,
}

struct Metrics {
    published: usize,
    errors: usize,
}

impl MetricsRecorder {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Metrics {
                published: 0,
                errors: 0,
            }),
        }
    }

    pub fn record_published(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.published += 1;
        }
    }

    pub fn record_error(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.errors += 1;
        }
    }

    pub fn snapshot(&self) -> (usize, usize) {
        if let Ok(metrics) = self.inner.lock() {
            (metrics.published, metrics.errors)
        } else {
            (0, 0)
        }
    }
}

impl Default for MetricsRecorder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_accumulate_independently() {
        let recorder = MetricsRecorder::new();
        recorder.record_published();
        recorder.record_published();
        recorder.record_error();
        assert_eq!(recorder.snapshot(), (2, 1));
    }
}
