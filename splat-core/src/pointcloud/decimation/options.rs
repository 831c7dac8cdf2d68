use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    Random,
    #[default]
    Importance,
}

impl FromStr for Method {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "random" => Ok(Self::Random),
            "importance" => Ok(Self::Importance),
            _ => Err(format!("Unsupported downsampling method: {}", s)),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Random => f.write_str("random"),
            Self::Importance => f.write_str("importance"),
        }
    }
}

/// Knobs for [`downsample`](super::downsampler::downsample).
///
/// Every field is optional. Out-of-range numbers are clamped, never rejected;
/// a zero or negative `target_count` counts as unset.
/// Leaving `seed` unset with [`Method::Random`] seeds from the wall clock, so
/// such runs are not reproducible.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DownsampleOptions {
    pub target_count: Option<i64>,
    pub ratio: Option<f64>,
    pub method: Method,
    pub seed: Option<i64>,
}

impl DownsampleOptions {
    pub fn with_target_count(target_count: i64) -> Self {
        Self {
            target_count: Some(target_count),
            ..Default::default()
        }
    }

    pub fn with_ratio(ratio: f64) -> Self {
        Self {
            ratio: Some(ratio),
            ..Default::default()
        }
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    pub fn seed(mut self, seed: i64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Number of points to keep out of `original_count`.
    ///
    /// A positive `target_count` wins over `ratio`; the ratio defaults to 1.0
    /// and is clamped into `[0, 1]` (NaN counts as unset).
    pub fn resolve_target(&self, original_count: usize) -> usize {
        if let Some(target_count) = self.target_count.filter(|&n| n > 0) {
            return usize::try_from(target_count)
                .map_or(original_count, |n| n.min(original_count));
        }

        let ratio = self
            .ratio
            .filter(|r| !r.is_nan())
            .unwrap_or(1.0)
            .clamp(0.0, 1.0);
        let target = (original_count as f64 * ratio).floor() as usize;
        target.min(original_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_keep_everything() {
        let options = DownsampleOptions::default();
        assert_eq!(options.method, Method::Importance);
        assert_eq!(options.resolve_target(1234), 1234);
    }

    #[test]
    fn target_count_overrides_ratio() {
        let options = DownsampleOptions {
            target_count: Some(10),
            ratio: Some(0.9),
            ..Default::default()
        };
        assert_eq!(options.resolve_target(100), 10);
        assert_eq!(options.resolve_target(5), 5);

        // Zero is not a valid target count, the ratio applies instead
        let options = DownsampleOptions {
            target_count: Some(0),
            ratio: Some(0.5),
            ..Default::default()
        };
        assert_eq!(options.resolve_target(100), 50);
    }

    #[test]
    fn ratio_is_clamped_and_floored() {
        assert_eq!(DownsampleOptions::with_ratio(-0.5).resolve_target(100), 0);
        assert_eq!(DownsampleOptions::with_ratio(5.0).resolve_target(100), 100);
        assert_eq!(DownsampleOptions::with_ratio(0.333).resolve_target(10), 3);
        assert_eq!(
            DownsampleOptions::with_ratio(f64::NAN).resolve_target(10),
            10
        );
        assert_eq!(
            DownsampleOptions::with_ratio(f64::NEG_INFINITY).resolve_target(10),
            0
        );
    }

    #[test]
    fn method_parsing() {
        assert_eq!("random".parse::<Method>().unwrap(), Method::Random);
        assert_eq!("Importance".parse::<Method>().unwrap(), Method::Importance);
        assert!("voxel".parse::<Method>().is_err());
        assert_eq!(Method::Random.to_string(), "random");
    }

    #[test]
    fn deserialize_camel_case() {
        let options: DownsampleOptions =
            serde_json::from_str(r#"{"targetCount": 3, "method": "random", "seed": 42}"#)
                .unwrap();
        assert_eq!(options.target_count, Some(3));
        assert_eq!(options.method, Method::Random);
        assert_eq!(options.seed, Some(42));
        assert_eq!(options.ratio, None);

        let empty: DownsampleOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, DownsampleOptions::default());
    }

    #[test]
    fn non_positive_target_count_falls_back_to_ratio() {
        let options: DownsampleOptions =
            serde_json::from_str(r#"{"targetCount": -5, "ratio": 0.5}"#).unwrap();
        assert_eq!(options.target_count, Some(-5));
        assert_eq!(options.resolve_target(100), 50);

        let options = DownsampleOptions {
            target_count: Some(i64::MIN),
            ..Default::default()
        };
        assert_eq!(options.resolve_target(100), 100);
        assert_eq!(
            DownsampleOptions::with_target_count(i64::MAX).resolve_target(7),
            7
        );
    }
}
