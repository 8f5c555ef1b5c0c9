use crate::config::defaults;
use crate::domain::model::GameSummary;

/// Render the per-round counts as horizontal bars, scaled so the best round
/// spans `width` columns, followed by a marker row at the mean.
pub fn render_chart(summary: &GameSummary, width: usize, glyph: &str, key_label: &str) -> String {
    let mut out = String::new();
    let max = summary.best().unwrap_or(0);

    out.push_str(&format!(
        "Results: {} presses per round ({} s window)\n",
        key_label,
        defaults::ACTIVE_WINDOW.as_secs()
    ));

    for (idx, &count) in summary.results.iter().enumerate() {
        let bar = glyph.repeat(scaled(f64::from(count), max, width));
        out.push_str(&format!("Round {:>2} | {:<width$} {}\n", idx + 1, bar, count, width = width));
    }

    let marker_at = scaled(summary.mean, max, width);
    out.push_str(&format!(
        "         | {}^ Average: {:.1}\n",
        " ".repeat(marker_at.saturating_sub(1)),
        summary.mean
    ));
    out
}

fn scaled(value: f64, max: u32, width: usize) -> usize {
    if max == 0 {
        return 0;
    }
    ((value / f64::from(max)) * width as f64).round() as usize
}
