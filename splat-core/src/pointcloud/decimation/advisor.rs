// (exclusive upper bound on point count, suggested ratio)
const RATIO_BRACKETS: [(usize, f64); 4] = [
    (500_000, 1.0),
    (1_000_000, 0.8),
    (2_000_000, 0.5),
    (5_000_000, 0.3),
];
const LARGEST_CLOUD_RATIO: f64 = 0.2;

/// Retention ratio recommended for a cloud of `count` points.
pub fn suggest_ratio(count: usize) -> f64 {
    RATIO_BRACKETS
        .iter()
        .find(|(upper, _)| count < *upper)
        .map_or(LARGEST_CLOUD_RATIO, |&(_, ratio)| ratio)
}

/// Human readable point count: `1.23M`, `456K`, or the plain number below 1000.
///
/// Halves round away from zero (`2_500` is `3K`, `1_235_000` is `1.24M`).
/// Counts from 999,500 up are shown in millions, since they would round to
/// `1000K`.
pub fn format_count(count: usize) -> String {
    if count >= 999_500 {
        let hundredths = (count as f64 / 10_000.0).round();
        format!("{:.2}M", hundredths / 100.0)
    } else if count >= 1_000 {
        format!("{}K", (count as f64 / 1_000.0).round())
    } else {
        count.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratio_brackets() {
        assert_eq!(suggest_ratio(0), 1.0);
        assert_eq!(suggest_ratio(499_999), 1.0);
        assert_eq!(suggest_ratio(500_000), 0.8);
        assert_eq!(suggest_ratio(999_999), 0.8);
        assert_eq!(suggest_ratio(1_000_000), 0.5);
        assert_eq!(suggest_ratio(2_000_000), 0.3);
        assert_eq!(suggest_ratio(4_999_999), 0.3);
        assert_eq!(suggest_ratio(5_000_000), 0.2);
        assert_eq!(suggest_ratio(usize::MAX), 0.2);
    }

    #[test]
    fn counts_are_abbreviated() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1_000), "1K");
        assert_eq!(format_count(456_123), "456K");
        assert_eq!(format_count(1_234_567), "1.23M");
        assert_eq!(format_count(12_000_000), "12.00M");
        assert_eq!(format_count(999_700), "1.00M");
    }

    #[test]
    fn halves_round_away_from_zero() {
        assert_eq!(format_count(1_500), "2K");
        assert_eq!(format_count(2_500), "3K");
        assert_eq!(format_count(2_499), "2K");
        assert_eq!(format_count(999_499), "999K");
        assert_eq!(format_count(999_500), "1.00M");
        assert_eq!(format_count(1_235_000), "1.24M");
        assert_eq!(format_count(1_225_000), "1.23M");
    }
}
