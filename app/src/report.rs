use std::{fmt, time::Duration};

use serde::Serialize;
use splat_core::pointcloud::{
    decimation::{format_count, DownsampleOptions, Method},
    ColumnBuffer, PointCloud,
};

use crate::synthetic::POINT_ID;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub method: Method,
    pub original_count: usize,
    pub retained_count: usize,
    pub original: String,
    pub retained: String,
    pub ratio: f64,
    /// Share of the summed importance carried by the retained points.
    pub importance_share: Option<f64>,
    pub elapsed_ms: f64,
}

impl Report {
    pub fn new(
        options: &DownsampleOptions,
        scores: Option<&[f64]>,
        original_count: usize,
        result: &PointCloud,
        elapsed: Duration,
    ) -> Self {
        let retained_count = result.point_count();
        let ratio = if original_count == 0 {
            1.0
        } else {
            retained_count as f64 / original_count as f64
        };

        Report {
            method: options.method,
            original_count,
            retained_count,
            original: format_count(original_count),
            retained: format_count(retained_count),
            ratio,
            importance_share: scores.and_then(|scores| importance_share(scores, result)),
            elapsed_ms: elapsed.as_secs_f64() * 1000.0,
        }
    }
}

// Retained rows are identified through the `point_id` column
fn importance_share(scores: &[f64], result: &PointCloud) -> Option<f64> {
    let ids = match result.vertex()?.property(POINT_ID)?.storage() {
        ColumnBuffer::U32(ids) => ids,
        _ => return None,
    };

    let total: f64 = scores.iter().filter(|s| s.is_finite()).sum();
    if total <= 0.0 {
        return None;
    }
    let retained: f64 = ids
        .iter()
        .filter_map(|&id| scores.get(id as usize))
        .filter(|s| s.is_finite())
        .sum();
    Some(retained / total)
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<10} {} -> {} points ({:.1}%)",
            self.method.to_string(),
            self.original,
            self.retained,
            self.ratio * 100.0
        )?;
        if let Some(share) = self.importance_share {
            write!(f, ", importance kept {:.1}%", share * 100.0)?;
        }
        write!(f, ", {:.1} ms", self.elapsed_ms)
    }
}
