//! Values computed from other fields rather than read from the probe output.

/// Evaluate a rational string such as `"30000/1001"` or a bare number like `"25"`.
///
/// Empty, malformed or undefined input (a zero denominator, non-numeric parts)
/// yields `0.0`; this never fails.
pub fn parse_rational(text: &str) -> f64 {
    let text = text.trim();
    if text.is_empty() {
        return 0.0;
    }

    let value = match text.split_once('/') {
        Some((numerator, denominator)) => {
            let numerator = numerator.trim().parse::<f64>().ok();
            let denominator = denominator.trim().parse::<f64>().ok();
            match (numerator, denominator) {
                (Some(_), Some(den)) if den == 0.0 => None,
                (Some(num), Some(den)) => Some(num / den),
                _ => None,
            }
        }
        None => text.parse::<f64>().ok(),
    };

    value.filter(|v| v.is_finite()).unwrap_or(0.0)
}

/// Name the display aspect ratio of a frame.
///
/// 16:9 is tested before 4:3; anything else is reported as `"<ratio>:1"` with
/// two decimals. A zero height has no ratio and yields an empty string.
pub fn aspect_ratio(width: u32, height: u32) -> String {
    if height == 0 {
        return String::new();
    }

    let ratio = f64::from(width) / f64::from(height);
    if (ratio - 16.0 / 9.0).abs() < 0.1 {
        "16:9".to_string()
    } else if (ratio - 4.0 / 3.0).abs() < 0.1 {
        "4:3".to_string()
    } else {
        format!("{:.2}:1", ratio)
    }
}

/// Bucket a frame height into a resolution category.
pub fn resolution_category(height: u32) -> &'static str {
    const BUCKETS: [(u32, &str); 5] = [
        (2160, "4K"),
        (1440, "2K"),
        (1080, "1080p"),
        (720, "720p"),
        (480, "480p"),
    ];

    BUCKETS
        .iter()
        .find(|(min_height, _)| height >= *min_height)
        .map(|(_, name)| *name)
        .unwrap_or("SD")
}
