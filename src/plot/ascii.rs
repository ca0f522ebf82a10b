//! ASCII bar chart for terminal output.
//!
//! This is intentionally "dumb" (fixed 0..100 axis), optimized for:
//! - quick visual comparison of the two scenario scores
//! - deterministic output (helpful for golden tests)

/// Upper end of the score axis.
const AXIS_MAX: f64 = 100.0;

/// Render horizontal bars for `(label, score)` pairs on a 0..100 axis.
///
/// `width` is the number of columns available to the bar itself.
pub fn render_score_bars(bars: &[(&str, f64)], width: usize) -> String {
    let width = width.max(10);
    let label_width = bars.iter().map(|(l, _)| l.chars().count()).max().unwrap_or(0);

    let mut out = String::new();
    out.push_str("Impact score (lower is better)\n");

    for &(label, value) in bars {
        let filled = bar_len(value, width);
        out.push_str(&format!(
            "{label:<label_width$} |{}{}| {value:.1}\n",
            "#".repeat(filled),
            " ".repeat(width - filled),
        ));
    }

    out.push_str(&format!(
        "{:<label_width$} 0{}{}\n",
        "",
        " ".repeat(width.saturating_sub(2)),
        AXIS_MAX as u32
    ));
    out
}

fn bar_len(value: f64, width: usize) -> usize {
    if !value.is_finite() {
        return 0;
    }
    let u = (value / AXIS_MAX).clamp(0.0, 1.0);
    (u * width as f64).round() as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bars_golden_snapshot_small() {
        let txt = render_score_bars(&[("Develop", 75.0), ("Park", 46.5)], 10);
        let expected = concat!(
            "Impact score (lower is better)\n",
            "Develop |########  | 75.0\n",
            "Park    |#####     | 46.5\n",
            "        0        100\n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn out_of_range_values_are_clipped() {
        assert_eq!(bar_len(-5.0, 20), 0);
        assert_eq!(bar_len(250.0, 20), 20);
        assert_eq!(bar_len(f64::NAN, 20), 0);
    }
}
