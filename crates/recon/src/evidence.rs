use std::collections::HashMap;

use crate::model::{ComparisonRow, ReconSummary, RowBucket};

/// Compute summary statistics from classified rows.
pub fn compute_summary(rows: &[ComparisonRow]) -> ReconSummary {
    let mut bucket_counts: HashMap<String, usize> = HashMap::new();
    let mut field_mismatch_counts: HashMap<String, usize> = HashMap::new();
    let mut matched = 0;
    let mut field_mismatches = 0;
    let mut left_only = 0;
    let mut right_only = 0;

    for row in rows {
        *bucket_counts.entry(row.bucket.to_string()).or_insert(0) += 1;

        match row.bucket {
            RowBucket::Matched => matched += 1,
            RowBucket::FieldMismatch => {
                field_mismatches += 1;
                for (field, verdict) in &row.verdicts {
                    if !verdict {
                        *field_mismatch_counts.entry(field.name().to_string()).or_insert(0) += 1;
                    }
                }
            }
            RowBucket::LeftOnly => left_only += 1,
            RowBucket::RightOnly => right_only += 1,
        }
    }

    ReconSummary {
        total_rows: rows.len(),
        matched,
        field_mismatches,
        left_only,
        right_only,
        bucket_counts,
        field_mismatch_counts,
    }
}
