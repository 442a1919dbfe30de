//! Metrics collection and exposition.
//!
//! # Metrics
//! - `relay_requests_total` (counter): proxy invocations by outcome, status
//! - `relay_upstream_duration_seconds` (histogram): time from sending the
//!   outbound request until upstream response headers were received
//!
//! Without an installed recorder every call here is a no-op.

use std::net::SocketAddr;
use std::time::Instant;

use axum::http::StatusCode;
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Start the Prometheus exporter on `addr`. Must run inside a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

/// Record a request whose upstream response is being relayed.
pub fn record_relayed(status: StatusCode, started: Instant) {
    metrics::counter!(
        "relay_requests_total",
        "outcome" => "relayed",
        "status" => status.as_u16().to_string()
    )
    .increment(1);
    metrics::histogram!("relay_upstream_duration_seconds").record(started.elapsed().as_secs_f64());
}

/// Record a request that ended in a local error response.
pub fn record_rejected(kind: &'static str, status: StatusCode) {
    metrics::counter!(
        "relay_requests_total",
        "outcome" => kind,
        "status" => status.as_u16().to_string()
    )
    .increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use metrics::{
        Counter, Gauge, Histogram, HistogramFn, Key, KeyName, Metadata, Recorder, SharedString,
        Unit,
    };

    #[derive(Default)]
    struct Samples(Mutex<Vec<f64>>);

    impl HistogramFn for Samples {
        fn record(&self, value: f64) {
            self.0.lock().unwrap().push(value);
        }
    }

    #[derive(Default)]
    struct Capture {
        samples: Arc<Samples>,
        counters: Mutex<Vec<String>>,
    }

    impl Recorder for Capture {
        fn describe_counter(&self, _: KeyName, _: Option<Unit>, _: SharedString) {}
        fn describe_gauge(&self, _: KeyName, _: Option<Unit>, _: SharedString) {}
        fn describe_histogram(&self, _: KeyName, _: Option<Unit>, _: SharedString) {}

        fn register_counter(&self, key: &Key, _: &Metadata<'_>) -> Counter {
            let labels: Vec<_> = key
                .labels()
                .map(|label| format!("{}={}", label.key(), label.value()))
                .collect();
            self.counters
                .lock()
                .unwrap()
                .push(format!("{}{{{}}}", key.name(), labels.join(",")));
            Counter::noop()
        }

        fn register_gauge(&self, _: &Key, _: &Metadata<'_>) -> Gauge {
            Gauge::noop()
        }

        fn register_histogram(&self, key: &Key, _: &Metadata<'_>) -> Histogram {
            assert_eq!(key.name(), "relay_upstream_duration_seconds");
            Histogram::from_arc(self.samples.clone())
        }
    }

    #[test]
    fn relayed_records_time_since_upstream_start() {
        let recorder = Capture::default();
        let started = Instant::now() - Duration::from_millis(50);

        metrics::with_local_recorder(&recorder, || {
            record_relayed(StatusCode::NOT_FOUND, started);
        });

        let samples = recorder.samples.0.lock().unwrap().clone();
        assert_eq!(samples.len(), 1);
        assert!(samples[0] >= 0.05 && samples[0] < 5.0, "{samples:?}");
        assert_eq!(
            *recorder.counters.lock().unwrap(),
            vec!["relay_requests_total{outcome=relayed,status=404}"]
        );
    }

    #[test]
    fn rejected_records_no_duration() {
        let recorder = Capture::default();

        metrics::with_local_recorder(&recorder, || {
            record_rejected("missing_target", StatusCode::BAD_REQUEST);
        });

        assert!(recorder.samples.0.lock().unwrap().is_empty());
        assert_eq!(
            *recorder.counters.lock().unwrap(),
            vec!["relay_requests_total{outcome=missing_target,status=400}"]
        );
    }
}
