/// CloudWatch metrics for the sync pipelines
use crate::constants::{LOG_TARGET_METRICS, METRICS_NAMESPACE};
use async_trait::async_trait;
use aws_sdk_cloudwatch::types::{Dimension, MetricDatum, StandardUnit};
use std::collections::HashMap;
use tracing::{debug, error};

#[async_trait]
pub trait MetricsService: Send + Sync {
    /// Record a counter metric (count of events)
    async fn record_counter(&self, name: &str, value: f64, dimensions: &[(&str, &str)]);

    /// Record a distribution sample, e.g. a duration
    async fn record_histogram(
        &self,
        name: &str,
        value: f64,
        unit: MetricUnit,
        dimensions: &[(&str, &str)],
    );
}

#[derive(Debug, Clone, Copy)]
pub enum MetricUnit {
    Count,
    Milliseconds,
    Bytes,
}

impl From<MetricUnit> for StandardUnit {
    fn from(unit: MetricUnit) -> Self {
        match unit {
            MetricUnit::Count => StandardUnit::Count,
            MetricUnit::Milliseconds => StandardUnit::Milliseconds,
            MetricUnit::Bytes => StandardUnit::Bytes,
        }
    }
}

/// CloudWatch metrics service implementation.
///
/// Emission failures are logged and swallowed; metrics never fail a request.
pub struct CloudWatchMetricsService {
    client: aws_sdk_cloudwatch::Client,
    namespace: String,
}

impl CloudWatchMetricsService {
    pub fn new(client: aws_sdk_cloudwatch::Client) -> Self {
        Self::with_namespace(client, METRICS_NAMESPACE.to_string())
    }

    pub fn with_namespace(client: aws_sdk_cloudwatch::Client, namespace: String) -> Self {
        Self { client, namespace }
    }

    async fn emit_metric(
        &self,
        name: &str,
        value: f64,
        unit: MetricUnit,
        dimensions: &[(&str, &str)],
    ) {
        let dims: Vec<Dimension> = dimensions
            .iter()
            .map(|(k, v)| Dimension::builder().name(*k).value(*v).build())
            .collect();

        let datum = MetricDatum::builder()
            .metric_name(name)
            .value(value)
            .unit(unit.into())
            .timestamp(aws_smithy_types::DateTime::from(
                std::time::SystemTime::now(),
            ))
            .set_dimensions(if dims.is_empty() { None } else { Some(dims) })
            .build();

        match self
            .client
            .put_metric_data()
            .namespace(&self.namespace)
            .metric_data(datum)
            .send()
            .await
        {
            Ok(_) => {
                debug!(
                    target: LOG_TARGET_METRICS,
                    metric = name,
                    value = value,
                    "Emitted metric to CloudWatch"
                );
            }
            Err(e) => {
                error!(
                    target: LOG_TARGET_METRICS,
                    metric = name,
                    error = %e,
                    "Failed to emit metric to CloudWatch"
                );
            }
        }
    }
}

#[async_trait]
impl MetricsService for CloudWatchMetricsService {
    async fn record_counter(&self, name: &str, value: f64, dimensions: &[(&str, &str)]) {
        self.emit_metric(name, value, MetricUnit::Count, dimensions)
            .await;
    }

    async fn record_histogram(
        &self,
        name: &str,
        value: f64,
        unit: MetricUnit,
        dimensions: &[(&str, &str)],
    ) {
        self.emit_metric(name, value, unit, dimensions).await;
    }
}

/// Named metrics emitted by the handlers
pub struct Metrics;

impl Metrics {
    /// A reconciliation run finished
    pub async fn missions_reconciled(
        service: &dyn MetricsService,
        missions: usize,
        videos: usize,
        processed: usize,
        duration_ms: f64,
    ) {
        service
            .record_counter("MissionsReconciled", missions as f64, &[])
            .await;
        service
            .record_counter("VideosListed", videos as f64, &[])
            .await;
        service
            .record_counter("VideosProcessed", processed as f64, &[])
            .await;
        service
            .record_histogram(
                "ReconcileTime",
                duration_ms,
                MetricUnit::Milliseconds,
                &[],
            )
            .await;
    }

    /// A file was copied from the document library into the bucket
    pub async fn asset_transferred(service: &dyn MetricsService, kind: &str, size_bytes: usize) {
        service
            .record_counter("AssetsTransferred", 1.0, &[("Kind", kind)])
            .await;
        service
            .record_histogram(
                "AssetSize",
                size_bytes as f64,
                MetricUnit::Bytes,
                &[("Kind", kind)],
            )
            .await;
    }

    pub async fn transcript_structured(service: &dyn MetricsService, duration_ms: f64) {
        service
            .record_counter("TranscriptsStructured", 1.0, &[])
            .await;
        service
            .record_histogram(
                "StructuringTime",
                duration_ms,
                MetricUnit::Milliseconds,
                &[],
            )
            .await;
    }

    pub async fn document_indexed(service: &dyn MetricsService) {
        service.record_counter("DocumentsIndexed", 1.0, &[]).await;
    }

    /// Record error
    pub async fn error_occurred(service: &dyn MetricsService, error_type: &str, handler: &str) {
        service
            .record_counter(
                "Errors",
                1.0,
                &[("ErrorType", error_type), ("Handler", handler)],
            )
            .await;
    }
}

/// Mock metrics service for testing
pub struct MockMetricsService {
    metrics: tokio::sync::Mutex<HashMap<String, Vec<f64>>>,
}

impl MockMetricsService {
    pub fn new() -> Self {
        Self {
            metrics: tokio::sync::Mutex::new(HashMap::new()),
        }
    }

    pub async fn get_metric_values(&self, name: &str) -> Vec<f64> {
        self.metrics
            .lock()
            .await
            .get(name)
            .cloned()
            .unwrap_or_default()
    }
}

impl Default for MockMetricsService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MetricsService for MockMetricsService {
    async fn record_counter(&self, name: &str, value: f64, _dimensions: &[(&str, &str)]) {
        let mut metrics = self.metrics.lock().await;
        metrics.entry(name.to_string()).or_default().push(value);
    }

    async fn record_histogram(
        &self,
        name: &str,
        value: f64,
        _unit: MetricUnit,
        _dimensions: &[(&str, &str)],
    ) {
        let mut metrics = self.metrics.lock().await;
        metrics.entry(name.to_string()).or_default().push(value);
    }
}
