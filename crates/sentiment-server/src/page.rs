//! Server-rendered HTML for the single-page UI.
//!
//! The page is rebuilt from session state on every request: header and input
//! form, optional result card, statistics sidebar with charts, recent history,
//! and footer.

use crate::charts::{donut_svg, trend_svg};
use sentiment_analytics::{has_trend, recent_entries, trend, HistorySummary};
use sentiment_core::config::DisplayConfig;
use sentiment_core::{AnalysisRecord, Interpretation};
use std::fmt::Write;

const STYLE: &str = r#"
* { font-family: 'Inter', system-ui, sans-serif; box-sizing: border-box; }
body { margin: 0; min-height: 100vh; background: linear-gradient(135deg, #667eea 0%, #764ba2 100%); color: #1f2937; }
.layout { display: flex; gap: 24px; padding: 24px; }
.sidebar { width: 320px; flex-shrink: 0; background: rgba(255,255,255,0.95); border-radius: 20px; padding: 20px; }
.main { flex: 1; min-width: 0; }
.header-container { background: rgba(255,255,255,0.1); border-radius: 25px; padding: 30px; margin-bottom: 30px; border: 1px solid rgba(255,255,255,0.2); }
.main-title { font-size: 48px; font-weight: 700; text-align: center; color: #fff; margin-bottom: 10px; }
.subtitle { text-align: center; color: rgba(255,255,255,0.9); font-size: 18px; font-weight: 300; }
.input-form { display: flex; gap: 12px; max-width: 720px; margin: 0 auto 20px; }
.input-form input[type=text] { flex: 1; border-radius: 15px; border: 2px solid rgba(255,255,255,0.3); padding: 15px 20px; font-size: 16px; }
.input-form button, .sidebar button { border: 0; border-radius: 12px; padding: 10px 18px; background: #4c51bf; color: #fff; font-weight: 600; cursor: pointer; }
.result-card { background: rgba(255,255,255,0.95); border-radius: 20px; padding: 30px; margin: 20px 0; box-shadow: 0 10px 40px rgba(0,0,0,0.2); display: flex; gap: 24px; align-items: center; }
.sentiment-emoji { font-size: 80px; text-align: center; }
.gauge { height: 10px; border-radius: 5px; background: #e5e7eb; overflow: hidden; }
.gauge > div { height: 100%; }
.metric-row { display: flex; gap: 12px; }
.metric-card { flex: 1; background: linear-gradient(135deg, #667eea 0%, #764ba2 100%); border-radius: 15px; padding: 20px; color: #fff; text-align: center; }
.metric-value { font-size: 32px; font-weight: 700; margin: 10px 0; }
.metric-label { font-size: 14px; opacity: 0.9; text-transform: uppercase; letter-spacing: 1px; }
.interpretation { background: #eff6ff; border-radius: 12px; padding: 16px; margin-top: 16px; }
.history-item { background: #fff; border-radius: 12px; padding: 15px; margin: 10px 0; border-left: 4px solid #667eea; box-shadow: 0 2px 10px rgba(0,0,0,0.1); }
.history-meta { display: flex; justify-content: space-between; font-size: 12px; color: #6b7280; }
.stat-badge { display: inline-block; padding: 5px 15px; border-radius: 20px; font-size: 12px; font-weight: 600; }
.positive-badge { background: #d4edda; color: #155724; }
.negative-badge { background: #f8d7da; color: #721c24; }
.neutral-badge { background: #fff3cd; color: #856404; }
.stat { display: flex; justify-content: space-between; margin: 6px 0; }
.stat-value { font-weight: 700; }
.chart { width: 100%; }
.legend { font-size: 12px; fill: #374151; }
.info { background: #eff6ff; border-radius: 12px; padding: 12px; }
.footer { text-align: center; color: rgba(255,255,255,0.7); padding: 20px; }
"#;

/// Escape text for HTML element content and attribute values.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Everything the page needs from one session.
pub struct PageView<'a> {
    pub records: &'a [AnalysisRecord],
    /// Record produced by the current request, if any.
    pub result: Option<&'a AnalysisRecord>,
    pub show_details: bool,
    pub display: &'a DisplayConfig,
}

pub fn render_page(view: &PageView<'_>) -> String {
    let summary = HistorySummary::from_records(view.records);

    let mut html = String::new();
    html.push_str("<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\">");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">");
    html.push_str("<title>Sentiment Analyzer Pro</title><style>");
    html.push_str(STYLE);
    html.push_str("</style></head><body><div class=\"layout\">");

    html.push_str("<aside class=\"sidebar\">");
    render_sidebar(&mut html, view.records, &summary);
    html.push_str("</aside><main class=\"main\">");

    render_header(&mut html);
    if let Some(record) = view.result {
        render_result(&mut html, record, view.show_details);
    }
    render_details_toggle(&mut html, view.show_details);
    render_history(&mut html, view.records, view.display);
    render_footer(&mut html);

    html.push_str("</main></div></body></html>");
    html
}

fn render_header(html: &mut String) {
    html.push_str(
        r#"<div class="header-container"><div class="main-title">🎭 Sentiment Analyzer Pro</div><div class="subtitle">Analyze emotions and sentiments in your text with AI-powered insights</div></div>"#,
    );
    html.push_str(
        r#"<form class="input-form" method="post" action="/analyze"><input type="text" name="text" placeholder="Type or paste any text to analyze its sentiment..." aria-label="Enter your text here" autofocus><button type="submit">Analyze</button></form>"#,
    );
}

fn render_result(html: &mut String, record: &AnalysisRecord, show_details: bool) {
    let interp = Interpretation::of(record);
    let _ = write!(
        html,
        r#"<div class="result-card"><div class="sentiment-emoji">{emoji}</div><div style="flex:2"><h3>Sentiment: <strong>{sentiment}</strong></h3><p><em>{tone}</em></p><div class="gauge" title="Polarity"><div style="width:{gauge:.1}%;background:{color}"></div></div></div><div><div class="stat"><span>Confidence</span>&nbsp;<span class="stat-value">{confidence:.2}</span></div><div class="stat"><span>Subjectivity</span>&nbsp;<span class="stat-value">{subjectivity:.2}</span></div></div></div>"#,
        emoji = record.emoji,
        sentiment = record.sentiment,
        tone = escape_html(&interp.tone),
        gauge = interp.polarity_gauge * 100.0,
        color = record.sentiment.color(),
        confidence = interp.confidence,
        subjectivity = record.subjectivity,
    );

    if show_details {
        let metrics = record.metrics();
        html.push_str(r#"<section class="details"><div class="metric-row">"#);
        for (label, value) in [
            ("Polarity Score", format!("{:.3}", record.polarity)),
            ("Subjectivity", format!("{:.3}", record.subjectivity)),
            ("Word Count", metrics.word_count.to_string()),
            ("Characters", metrics.char_count.to_string()),
        ] {
            let _ = write!(
                html,
                r#"<div class="metric-card"><div class="metric-label">{}</div><div class="metric-value">{}</div></div>"#,
                label, value
            );
        }
        html.push_str("</div>");

        let sentiment = record.sentiment.as_str().to_lowercase();
        let _ = write!(
            html,
            r#"<div class="interpretation"><h4>📊 Interpretation</h4><p><strong>Polarity</strong> ranges from -1 (very negative) to +1 (very positive). Your text scored <strong>{p:.3}</strong>, indicating a <strong>{s}</strong> sentiment.</p><p><strong>Subjectivity</strong> ranges from 0 (very objective) to 1 (very subjective). Your text scored <strong>{subj:.3}</strong>, meaning it is {reading}.</p></div></section>"#,
            p = record.polarity,
            s = sentiment,
            subj = record.subjectivity,
            reading = interp.subjectivity_reading,
        );
    }
}

fn render_details_toggle(html: &mut String, show_details: bool) {
    let _ = write!(
        html,
        r#"<form class="details-toggle" method="post" action="/details"><label><input type="checkbox" name="show" onchange="this.form.submit()"{checked}> Show Detailed Analysis</label><noscript><button type="submit">Apply</button></noscript></form>"#,
        checked = if show_details { " checked" } else { "" },
    );
}

fn render_sidebar(html: &mut String, records: &[AnalysisRecord], summary: &HistorySummary) {
    html.push_str("<h3>📊 Statistics</h3>");

    if summary.is_empty() {
        html.push_str(r#"<div class="info">No analyses yet. Start by entering some text above!</div>"#);
        return;
    }

    let _ = write!(
        html,
        r#"<div class="stat"><span>Total Analyses</span><span class="stat-value" id="total">{}</span></div>"#,
        summary.total
    );
    html.push_str(r#"<div class="metric-row">"#);
    for slice in summary.distribution() {
        let _ = write!(
            html,
            r#"<div class="stat"><span>{}</span>&nbsp;<span class="stat-value">{}</span></div>"#,
            slice.category.emoji(),
            slice.count
        );
    }
    html.push_str("</div>");

    if let Some(p) = summary.avg_polarity {
        let _ = write!(
            html,
            r#"<div class="stat"><span>Avg Polarity</span><span class="stat-value">{:.3}</span></div>"#,
            p
        );
    }
    if let Some(s) = summary.avg_subjectivity {
        let _ = write!(
            html,
            r#"<div class="stat"><span>Avg Subjectivity</span><span class="stat-value">{:.3}</span></div>"#,
            s
        );
    }

    html.push_str("<h4>Sentiment Distribution</h4>");
    html.push_str(&donut_svg(&summary.distribution()));

    if has_trend(records) {
        html.push_str("<h4>Polarity Trend</h4>");
        html.push_str(&trend_svg(&trend(records)));
    }

    html.push_str(
        r#"<form method="post" action="/clear"><button type="submit" style="width:100%">🗑️ Clear History</button></form>"#,
    );
}

fn render_history(html: &mut String, records: &[AnalysisRecord], display: &DisplayConfig) {
    if records.is_empty() {
        return;
    }

    html.push_str("<hr><h3>📝 Recent Analysis History</h3><section class=\"history\">");
    for entry in recent_entries(records, display.recent_limit, display.preview_chars) {
        let _ = write!(
            html,
            r#"<div class="history-item"><div style="display:flex;justify-content:space-between;align-items:center"><span style="font-size:24px">{emoji}</span><span class="stat-badge {badge}">{sentiment}</span></div><p><strong>{preview}</strong></p><div class="history-meta"><span>Polarity: {p:.3}</span><span>Subjectivity: {s:.3}</span><span>{ts}</span></div></div>"#,
            emoji = entry.emoji,
            badge = entry.sentiment.badge_class(),
            sentiment = entry.sentiment,
            preview = escape_html(&entry.preview),
            p = entry.polarity,
            s = entry.subjectivity,
            ts = entry.timestamp,
        );
    }
    html.push_str("</section>");
    html.push_str(r#"<p><a class="export" href="/export.csv" download>📥 Export History as CSV</a></p>"#);
}

fn render_footer(html: &mut String) {
    html.push_str(
        r#"<hr><div class="footer"><p>Powered by sentiment-pro | Built with ❤️</p></div>"#,
    );
}
