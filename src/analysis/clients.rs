//! Per-client goodput and transmission-time analysis.

use std::collections::BTreeMap;

use super::types::{ClientReport, ClientStats, TraceRecord};

/// Default client subset for the per-client figures
pub const DEFAULT_CLIENT_SUBSET: &[u32] = &[3, 4, 5];

/// Scale factor from bytes-per-second to the reported Mbit/s-equivalent unit
const GOODPUT_SCALE: f64 = 1e6;

/// Retain records for the given client subset, preserving file order.
pub fn filter_clients(records: &[TraceRecord], subset: &[u32]) -> Vec<TraceRecord> {
    records
        .iter()
        .filter(|r| subset.contains(&r.client_id))
        .cloned()
        .collect()
}

/// Per-client statistics over the filtered trace window.
///
/// Goodput divides each client's byte total by the time span of the WHOLE
/// filtered subset, not the client's own span, so all clients are compared
/// against one shared wall-clock window. A zero span (all filtered samples
/// share one timestamp) yields zero goodput. Mean inter-arrival time is the
/// mean of successive timestamp gaps within a single client's samples.
pub fn analyze_clients(records: &[TraceRecord], subset: &[u32]) -> ClientReport {
    let filtered = filter_clients(records, subset);

    let mut min_time = f64::MAX;
    let mut max_time = f64::MIN;
    for record in &filtered {
        min_time = min_time.min(record.timestamp);
        max_time = max_time.max(record.timestamp);
    }
    let time_span_sec = if filtered.is_empty() {
        0.0
    } else {
        max_time - min_time
    };

    // Group in ascending client order for reporting and bar charts
    let mut by_client: BTreeMap<u32, Vec<&TraceRecord>> = BTreeMap::new();
    for record in &filtered {
        by_client.entry(record.client_id).or_default().push(record);
    }

    let clients = by_client
        .into_iter()
        .map(|(client_id, samples)| {
            let total_bytes: u64 = samples.iter().map(|r| r.bytes).sum();

            let goodput_mbps = if time_span_sec > 0.0 {
                total_bytes as f64 / time_span_sec / GOODPUT_SCALE
            } else {
                0.0
            };

            let mean_interarrival_sec = mean_interarrival(&samples);

            ClientStats {
                client_id,
                samples: samples.len(),
                total_bytes,
                goodput_mbps,
                mean_interarrival_sec,
            }
        })
        .collect();

    ClientReport {
        clients,
        time_span_sec,
        filtered_samples: filtered.len(),
    }
}

/// Mean gap between successive samples, in file order; None below two samples.
fn mean_interarrival(samples: &[&TraceRecord]) -> Option<f64> {
    if samples.len() < 2 {
        return None;
    }
    let gaps: f64 = samples
        .windows(2)
        .map(|pair| pair[1].timestamp - pair[0].timestamp)
        .sum();
    Some(gaps / (samples.len() - 1) as f64)
}
