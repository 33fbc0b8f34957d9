//! Contiguous-chunk aggregation of trace records.
//!
//! Both aggregation methods group records into fixed-size contiguous chunks
//! by row position (not by time) and average every numeric column within
//! each chunk. They differ only in the window size they are run with, so the
//! choice of method is carried on the resulting series for reporting.

use thiserror::Error;

use super::types::{AggregatedRow, AggregatedSeries, AggregationMethod, TraceRecord};

/// Default chunk size for batch-means aggregation
pub const DEFAULT_BATCH_SIZE: usize = 300;

/// Default window size for independent-replicates aggregation
pub const DEFAULT_REPLICATE_SIZE: usize = 20;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AggregateError {
    #[error("chunk size must be non-zero")]
    ZeroChunkSize,
}

/// Mean of every numeric column over one chunk. The final chunk of a series
/// may be shorter than the nominal size and is averaged over its actual
/// length.
fn chunk_mean(chunk: &[TraceRecord]) -> AggregatedRow {
    let n = chunk.len() as f64;
    let mut timestamp = 0.0;
    let mut client_id = 0.0;
    let mut bytes = 0.0;

    for record in chunk {
        timestamp += record.timestamp;
        client_id += record.client_id as f64;
        bytes += record.bytes as f64;
    }

    AggregatedRow {
        timestamp: timestamp / n,
        client_id: client_id / n,
        bytes: bytes / n,
    }
}

/// Aggregate a long run into contiguous batches of `chunk_size` records.
///
/// Produces `ceil(records.len() / chunk_size)` rows, one per batch.
pub fn batch_means(
    records: &[TraceRecord],
    chunk_size: usize,
) -> Result<AggregatedSeries, AggregateError> {
    if chunk_size == 0 {
        return Err(AggregateError::ZeroChunkSize);
    }

    let rows: Vec<AggregatedRow> = records.chunks(chunk_size).map(chunk_mean).collect();

    Ok(AggregatedSeries {
        method: AggregationMethod::BatchMeans,
        chunk_size,
        rows,
    })
}

/// Aggregate the run into replicate windows of `chunk_size` records.
///
/// Windows are contiguous slices walked explicitly from the front of the
/// record table; each window's mean is treated downstream as one replicate
/// observation.
pub fn independent_replicates(
    records: &[TraceRecord],
    chunk_size: usize,
) -> Result<AggregatedSeries, AggregateError> {
    if chunk_size == 0 {
        return Err(AggregateError::ZeroChunkSize);
    }

    let mut rows = Vec::with_capacity(records.len().div_ceil(chunk_size));
    let mut start = 0;
    while start < records.len() {
        let end = (start + chunk_size).min(records.len());
        rows.push(chunk_mean(&records[start..end]));
        start = end;
    }

    Ok(AggregatedSeries {
        method: AggregationMethod::IndependentReplicates,
        chunk_size,
        rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(timestamp: f64, client_id: u32, bytes: u64) -> TraceRecord {
        TraceRecord {
            timestamp,
            client_id,
            bytes,
        }
    }

    fn sample_records(n: usize) -> Vec<TraceRecord> {
        (0..n)
            .map(|i| record(i as f64, 3, (i as u64 + 1) * 100))
            .collect()
    }

    #[test]
    fn test_batch_means_row_count() {
        // ceil(10 / 4) = 3, ceil(12 / 4) = 3, ceil(1 / 4) = 1
        assert_eq!(batch_means(&sample_records(10), 4).unwrap().len(), 3);
        assert_eq!(batch_means(&sample_records(12), 4).unwrap().len(), 3);
        assert_eq!(batch_means(&sample_records(1), 4).unwrap().len(), 1);
        assert_eq!(batch_means(&[], 4).unwrap().len(), 0);
    }

    #[test]
    fn test_replicates_row_count_matches_batch_means() {
        let records = sample_records(47);
        for chunk_size in [1, 5, 20, 47, 100] {
            let batches = batch_means(&records, chunk_size).unwrap();
            let replicates = independent_replicates(&records, chunk_size).unwrap();
            assert_eq!(batches.len(), records.len().div_ceil(chunk_size));
            assert_eq!(batches.rows, replicates.rows);
        }
    }

    #[test]
    fn test_chunk_mean_is_arithmetic_mean() {
        let records = vec![
            record(0.0, 3, 100),
            record(1.0, 4, 200),
            record(2.0, 5, 600),
        ];
        let series = batch_means(&records, 3).unwrap();

        assert_eq!(series.len(), 1);
        let row = &series.rows[0];
        assert!((row.timestamp - 1.0).abs() < 1e-9);
        assert!((row.client_id - 4.0).abs() < 1e-9);
        assert!((row.bytes - 300.0).abs() < 1e-9);
    }

    #[test]
    fn test_short_final_chunk_uses_actual_length() {
        let records = vec![
            record(0.0, 3, 100),
            record(1.0, 3, 200),
            record(2.0, 3, 900),
        ];
        let series = batch_means(&records, 2).unwrap();

        assert_eq!(series.len(), 2);
        // Full chunk: mean of 100 and 200
        assert!((series.rows[0].bytes - 150.0).abs() < 1e-9);
        // Short chunk of one record: its own value, not a padded mean
        assert!((series.rows[1].bytes - 900.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_chunk_size_rejected() {
        let records = sample_records(5);
        assert_eq!(
            batch_means(&records, 0).unwrap_err(),
            AggregateError::ZeroChunkSize
        );
        assert_eq!(
            independent_replicates(&records, 0).unwrap_err(),
            AggregateError::ZeroChunkSize
        );
    }

    #[test]
    fn test_series_metadata() {
        let records = sample_records(30);
        let series = independent_replicates(&records, 20).unwrap();
        assert_eq!(series.method, AggregationMethod::IndependentReplicates);
        assert_eq!(series.chunk_size, 20);
        assert_eq!(series.len(), 2);
    }
}
