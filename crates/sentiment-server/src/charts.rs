//! Inline SVG charts for the statistics sidebar.

use sentiment_analytics::DistributionSlice;
use std::f64::consts::PI;
use std::fmt::Write;

const DONUT_SIZE: f64 = 200.0;
/// Inner radius as a fraction of the outer radius.
const DONUT_HOLE: f64 = 0.4;
const DONUT_OUTER: f64 = 90.0;

const TREND_WIDTH: f64 = 300.0;
const TREND_HEIGHT: f64 = 160.0;
const TREND_PAD: f64 = 16.0;
const TREND_COLOR: &str = "#667eea";

/// Donut chart of the sentiment distribution with a legend underneath.
///
/// Each non-empty category is one stroked ring segment; segments start at
/// twelve o'clock and run clockwise in distribution order.
pub fn donut_svg(distribution: &[DistributionSlice]) -> String {
    let center = DONUT_SIZE / 2.0;
    let inner = DONUT_OUTER * DONUT_HOLE;
    let stroke = DONUT_OUTER - inner;
    let radius = inner + stroke / 2.0;
    let circumference = 2.0 * PI * radius;

    let mut svg = String::new();
    let _ = write!(
        svg,
        r#"<svg class="chart donut" viewBox="0 0 {size} {h}" role="img" aria-label="Sentiment distribution">"#,
        size = DONUT_SIZE,
        h = DONUT_SIZE + 24.0 * distribution.len() as f64,
    );
    let _ = write!(
        svg,
        r##"<circle cx="{c}" cy="{c}" r="{r:.2}" fill="none" stroke="#e5e7eb" stroke-width="{w:.2}"/>"##,
        c = center,
        r = radius,
        w = stroke,
    );

    let mut offset = 0.0;
    for slice in distribution.iter().filter(|s| s.count > 0) {
        let dash = slice.share * circumference;
        let _ = write!(
            svg,
            r#"<circle class="segment" cx="{c}" cy="{c}" r="{r:.2}" fill="none" stroke="{color}" stroke-width="{w:.2}" stroke-dasharray="{dash:.2} {gap:.2}" stroke-dashoffset="{off:.2}" transform="rotate(-90 {c} {c})"><title>{label}: {count}</title></circle>"#,
            c = center,
            r = radius,
            color = slice.category.color(),
            w = stroke,
            dash = dash,
            gap = circumference - dash,
            off = 0.0 - offset,
            label = slice.category.as_str(),
            count = slice.count,
        );
        offset += dash;
    }

    for (i, slice) in distribution.iter().enumerate() {
        let y = DONUT_SIZE + 16.0 + 24.0 * i as f64;
        let _ = write!(
            svg,
            r#"<rect x="40" y="{ry}" width="12" height="12" rx="2" fill="{color}"/><text x="60" y="{ty}" class="legend">{label} {count} ({pct:.1}%)</text>"#,
            ry = y - 10.0,
            ty = y,
            color = slice.category.color(),
            label = slice.category.as_str(),
            count = slice.count,
            pct = slice.share * 100.0,
        );
    }

    svg.push_str("</svg>");
    svg
}

/// Map a polarity in [-1, 1] to a y coordinate (top is +1).
fn trend_y(polarity: f64) -> f64 {
    let usable = TREND_HEIGHT - 2.0 * TREND_PAD;
    TREND_PAD + (1.0 - (polarity.clamp(-1.0, 1.0) + 1.0) / 2.0) * usable
}

fn trend_x(index: usize, len: usize) -> f64 {
    let usable = TREND_WIDTH - 2.0 * TREND_PAD;
    if len < 2 {
        TREND_WIDTH / 2.0
    } else {
        TREND_PAD + index as f64 * usable / (len - 1) as f64
    }
}

/// Line chart of polarity over the session, fixed to the [-1, 1] range.
/// Returns an empty string for fewer than two points.
pub fn trend_svg(polarities: &[f64]) -> String {
    if polarities.len() < 2 {
        return String::new();
    }

    let mut svg = String::new();
    let _ = write!(
        svg,
        r#"<svg class="chart trend" viewBox="0 0 {w} {h}" role="img" aria-label="Polarity trend">"#,
        w = TREND_WIDTH,
        h = TREND_HEIGHT,
    );

    for level in [1.0, 0.0, -1.0] {
        let y = trend_y(level);
        let _ = write!(
            svg,
            r##"<line class="{class}" x1="{x1}" y1="{y:.2}" x2="{x2}" y2="{y:.2}" stroke="#d1d5db" stroke-width="1"/>"##,
            class = if level == 0.0 { "baseline" } else { "grid" },
            x1 = TREND_PAD,
            x2 = TREND_WIDTH - TREND_PAD,
            y = y,
        );
    }

    let points: Vec<String> = polarities
        .iter()
        .enumerate()
        .map(|(i, p)| format!("{:.2},{:.2}", trend_x(i, polarities.len()), trend_y(*p)))
        .collect();
    let _ = write!(
        svg,
        r#"<polyline fill="none" stroke="{color}" stroke-width="3" points="{points}"/>"#,
        color = TREND_COLOR,
        points = points.join(" "),
    );

    for (i, p) in polarities.iter().enumerate() {
        let _ = write!(
            svg,
            r#"<circle class="marker" cx="{x:.2}" cy="{y:.2}" r="4" fill="{color}"><title>{p:.3}</title></circle>"#,
            x = trend_x(i, polarities.len()),
            y = trend_y(*p),
            color = TREND_COLOR,
            p = p,
        );
    }

    svg.push_str("</svg>");
    svg
}
