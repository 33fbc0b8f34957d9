//! Core data types for trace throughput analysis.

use serde::{Deserialize, Serialize};

/// Trace timestamp in seconds since simulation start
pub type TraceTime = f64;

/// A single probe sample from the trace file: one transmitted data unit
/// observed at `timestamp` for `client_id`, carrying `bytes` of payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceRecord {
    pub timestamp: TraceTime,
    pub client_id: u32,
    pub bytes: u64,
}

/// Aggregation method used to produce a lower-frequency series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AggregationMethod {
    /// Contiguous blocks of a long run, averaged within each block
    BatchMeans,
    /// Repeated measurement windows treated as independent observations
    IndependentReplicates,
}

impl std::fmt::Display for AggregationMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AggregationMethod::BatchMeans => write!(f, "batch means"),
            AggregationMethod::IndependentReplicates => write!(f, "independent replicates"),
        }
    }
}

/// Per-chunk arithmetic means of every numeric column.
///
/// The client column is averaged along with the others; its mean is rarely
/// meaningful on its own but keeps each aggregated row aligned with the raw
/// record schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedRow {
    pub timestamp: f64,
    pub client_id: f64,
    pub bytes: f64,
}

/// A lower-frequency series of chunk means produced by one aggregation method
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregatedSeries {
    pub method: AggregationMethod,
    pub chunk_size: usize,
    pub rows: Vec<AggregatedRow>,
}

impl AggregatedSeries {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The byte-count column as a plain vector, for stats and plotting
    pub fn bytes_column(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.bytes).collect()
    }

    pub fn timestamp_column(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.timestamp).collect()
    }

    pub fn client_column(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.client_id).collect()
    }
}

/// Two-sided interval estimate for a population mean
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceInterval {
    pub lower: f64,
    pub upper: f64,
}

impl ConfidenceInterval {
    /// Interval collapsed onto a single point, used when too few samples
    /// (or zero variance) make a spread estimate impossible.
    pub fn collapsed(mean: f64) -> Self {
        Self { lower: mean, upper: mean }
    }

    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }
}

/// Per-column interval estimates for one aggregated series
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeriesIntervals {
    /// Confidence level the intervals were computed at (e.g. 0.95)
    pub confidence: f64,
    pub timestamp: ConfidenceInterval,
    pub client_id: ConfidenceInterval,
    pub bytes: ConfidenceInterval,
}

/// Steady-state throughput estimate from one aggregation method
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SteadyStateEstimate {
    pub method: AggregationMethod,
    pub chunk_size: usize,
    pub chunks: usize,
    /// Mean of the aggregated byte column (bytes per sample)
    pub mean_bytes: f64,
    pub intervals: SeriesIntervals,
}

/// Steady-state section of the analysis report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SteadyStateReport {
    pub batch_means: SteadyStateEstimate,
    pub independent_replicates: SteadyStateEstimate,
}

/// Per-client throughput statistics over the filtered trace window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientStats {
    pub client_id: u32,
    pub samples: usize,
    pub total_bytes: u64,
    /// Total bytes over the whole filtered window's time span, scaled by 1e6
    pub goodput_mbps: f64,
    /// Mean gap between this client's successive samples; None below two samples
    pub mean_interarrival_sec: Option<f64>,
}

/// Client analysis section of the report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientReport {
    /// Clients present in the filtered window, ascending by ID
    pub clients: Vec<ClientStats>,
    /// Time span shared by all goodput figures (max - min filtered timestamp)
    pub time_span_sec: f64,
    pub filtered_samples: usize,
}

/// Complete analysis report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullAnalysisReport {
    pub metadata: AnalysisMetadata,
    pub steady_state: Option<SteadyStateReport>,
    pub client_analysis: Option<ClientReport>,
}

/// Report metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisMetadata {
    pub analysis_timestamp: String,
    pub trace_file: String,
    pub total_records: usize,
    pub distinct_clients: usize,
}
