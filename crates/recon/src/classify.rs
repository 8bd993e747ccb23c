use std::collections::BTreeMap;

use crate::matcher::JoinedPair;
use crate::model::{ComparisonRow, Field, RowBucket};

/// Attach a bucket to one evaluated pair.
pub fn classify_row(pair: JoinedPair, verdicts: BTreeMap<Field, bool>) -> ComparisonRow {
    let bucket = match (&pair.left, &pair.right) {
        (Some(_), Some(_)) => {
            if verdicts.values().all(|v| *v) {
                RowBucket::Matched
            } else {
                RowBucket::FieldMismatch
            }
        }
        (Some(_), None) => RowBucket::LeftOnly,
        (None, Some(_)) => RowBucket::RightOnly,
        (None, None) => unreachable!("outer join never yields an empty pair"),
    };

    ComparisonRow {
        key: pair.key,
        bucket,
        left: pair.left,
        right: pair.right,
        verdicts,
    }
}
