use std::cmp::Ordering;

use crate::error::DownsampleError;
use crate::pointcloud::cloud::Element;
use crate::pointcloud::property::{ColumnBuffer, Property};

use super::PointSelector;

pub const OPACITY: &str = "opacity";
pub const SCALES: [&str; 3] = ["scale_0", "scale_1", "scale_2"];

fn sigmoid(value: f64) -> f64 {
    1.0 / (1.0 + (-value).exp())
}

/// Score of one splat from its opacity logit and log-space scales.
pub fn importance(opacity: f64, scales: [f64; 3]) -> f64 {
    let avg_scale = scales.iter().map(|s| s.exp()).sum::<f64>() / 3.0;
    sigmoid(opacity) * avg_scale.sqrt()
}

fn required<'a>(element: &'a Element, name: &str) -> Result<&'a Property, DownsampleError> {
    element
        .property(name)
        .ok_or_else(|| DownsampleError::MissingProperty {
            name: name.to_string(),
        })
}

/// Per-point importance scores of `element`.
///
/// Fails when `opacity` or any of `scale_0..2` is absent.
pub fn importance_scores(element: &Element) -> Result<Vec<f64>, DownsampleError> {
    let opacity = required(element, OPACITY)?.storage();
    let scale_0 = required(element, SCALES[0])?.storage();
    let scale_1 = required(element, SCALES[1])?.storage();
    let scale_2 = required(element, SCALES[2])?.storage();

    let read = |column: &ColumnBuffer, i: usize| column.get_f64(i).unwrap_or(f64::NAN);

    Ok((0..element.count())
        .map(|i| {
            importance(
                read(opacity, i),
                [read(scale_0, i), read(scale_1, i), read(scale_2, i)],
            )
        })
        .collect())
}

// NaN ranks below everything
fn rank_key(score: f64) -> f64 {
    if score.is_nan() {
        f64::NEG_INFINITY
    } else {
        score
    }
}

fn by_score_desc(scores: &[f64], a: usize, b: usize) -> Ordering {
    rank_key(scores[b]).total_cmp(&rank_key(scores[a]))
}

/// Indices of the `target` highest scores, sorted ascending.
pub fn top_by_score(scores: &[f64], target: usize) -> Vec<usize> {
    let target = target.min(scores.len());
    let mut indices: Vec<usize> = (0..scores.len()).collect();

    if target == 0 {
        return Vec::new();
    }
    if target < indices.len() {
        indices.select_nth_unstable_by(target - 1, |&a, &b| by_score_desc(scores, a, b));
        indices.truncate(target);
    }

    indices.sort_unstable();
    indices
}

pub struct ImportanceSelector;

impl PointSelector for ImportanceSelector {
    fn select(&self, element: &Element, target: usize) -> Result<Vec<usize>, DownsampleError> {
        let scores = importance_scores(element)?;
        Ok(top_by_score(&scores, target))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_element(opacity: Vec<f32>, scale: Vec<f32>) -> Element {
        let count = opacity.len();
        Element::new(
            "vertex",
            count,
            vec![
                Property::new(OPACITY, ColumnBuffer::F32(opacity)),
                Property::new(SCALES[0], ColumnBuffer::F32(scale.clone())),
                Property::new(SCALES[1], ColumnBuffer::F32(scale.clone())),
                Property::new(SCALES[2], ColumnBuffer::F32(scale)),
            ],
        )
        .unwrap()
    }

    #[test]
    fn score_decodes_logit_and_log_scale() {
        // sigmoid(0) = 0.5, exp(0) = 1
        assert!((importance(0.0, [0.0; 3]) - 0.5).abs() < 1e-12);

        let scale = 2.0_f64.ln();
        let expected = 0.5 * 2.0_f64.sqrt();
        assert!((importance(0.0, [scale; 3]) - expected).abs() < 1e-12);

        assert!(importance(5.0, [0.0; 3]) > importance(-5.0, [0.0; 3]));
        assert!(importance(0.0, [1.0; 3]) > importance(0.0, [-1.0; 3]));
    }

    #[test]
    fn top_scores_are_selected_in_index_order() {
        let scores = [0.1, 0.9, 0.5, 0.7, 0.2];
        assert_eq!(top_by_score(&scores, 3), vec![1, 2, 3]);
        assert_eq!(top_by_score(&scores, 1), vec![1]);
        assert_eq!(top_by_score(&scores, 0), Vec::<usize>::new());
        assert_eq!(top_by_score(&scores, 9), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn nan_scores_rank_last() {
        let scores = [f64::NAN, 0.1, f64::NAN, 0.2];
        assert_eq!(top_by_score(&scores, 2), vec![1, 3]);
    }

    #[test]
    fn selector_prefers_opaque_large_splats() {
        let element = make_element(
            vec![0.0, 4.0, 0.0, -4.0, 0.0],
            vec![0.0, 0.0, 3.0, 3.0, -3.0],
        );
        let selected = ImportanceSelector.select(&element, 2).unwrap();
        assert_eq!(selected, vec![1, 2]);
    }

    #[test]
    fn integer_columns_are_scored() {
        let element = Element::new(
            "vertex",
            3,
            vec![
                Property::new(OPACITY, ColumnBuffer::U8(vec![0, 9, 1])),
                Property::new(SCALES[0], ColumnBuffer::I8(vec![0, 0, 0])),
                Property::new(SCALES[1], ColumnBuffer::I8(vec![0, 0, 0])),
                Property::new(SCALES[2], ColumnBuffer::I8(vec![0, 0, 0])),
            ],
        )
        .unwrap();
        assert_eq!(ImportanceSelector.select(&element, 1).unwrap(), vec![1]);
    }

    #[test]
    fn missing_scale_is_reported() {
        let element = Element::new(
            "vertex",
            1,
            vec![
                Property::new(OPACITY, ColumnBuffer::F32(vec![0.0])),
                Property::new(SCALES[0], ColumnBuffer::F32(vec![0.0])),
                Property::new(SCALES[2], ColumnBuffer::F32(vec![0.0])),
            ],
        )
        .unwrap();
        assert_eq!(
            importance_scores(&element),
            Err(DownsampleError::MissingProperty {
                name: "scale_1".to_string()
            })
        );
    }
}
