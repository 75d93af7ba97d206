//! Patient-facing views of the symptom log: the history table (newest first)
//! and the risk trend chart (oldest first).

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::{RiskLevel, SymptomLogEntry};

pub const TREND_CHART_TITLE: &str = "Symptom Risk Level Progression";
const X_AXIS_TITLE: &str = "Date and Time";
const Y_AXIS_TITLE: &str = "Risk Level";
const TOOLTIP_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

const CHART_WIDTH: f64 = 720.0;
const CHART_HEIGHT: f64 = 360.0;
const MARGIN_LEFT: f64 = 90.0;
const MARGIN_RIGHT: f64 = 30.0;
const MARGIN_TOP: f64 = 50.0;
const MARGIN_BOTTOM: f64 = 70.0;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryRow {
    pub timestamp: DateTime<Utc>,
    pub symptom: String,
    pub risk_level: RiskLevel,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrendPoint {
    pub timestamp: DateTime<Utc>,
    pub symptom: String,
    pub risk_level: RiskLevel,
    /// `Low = 0`, `Medium = 1`, `High = 2`.
    pub ordinal: u8,
}

/// Table rows, newest entry first.
pub fn history_rows(entries: &[SymptomLogEntry]) -> Vec<HistoryRow> {
    let mut rows: Vec<HistoryRow> = entries
        .iter()
        .map(|e| HistoryRow {
            timestamp: e.logged_at,
            symptom: e.symptom_text.clone(),
            risk_level: e.risk_level,
        })
        .collect();
    // Stable sort keeps insertion order for equal timestamps, then reverse.
    rows.sort_by_key(|r| r.timestamp);
    rows.reverse();
    rows
}

/// Chart points, oldest entry first.
pub fn trend_points(entries: &[SymptomLogEntry]) -> Vec<TrendPoint> {
    let mut points: Vec<TrendPoint> = entries
        .iter()
        .map(|e| TrendPoint {
            timestamp: e.logged_at,
            symptom: e.symptom_text.clone(),
            risk_level: e.risk_level,
            ordinal: e.risk_level.ordinal(),
        })
        .collect();
    points.sort_by_key(|p| p.timestamp);
    points
}

/// Render a line-and-point chart of risk over time as a standalone SVG document.
///
/// The x axis is linear in time between the first and last point; a single
/// point (or identical timestamps) is centred. Each point carries a `<title>`
/// tooltip with time, symptom and risk.
pub fn render_trend_svg(points: &[TrendPoint]) -> String {
    let plot_w = CHART_WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
    let plot_h = CHART_HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
    let bottom = MARGIN_TOP + plot_h;
    let max_ordinal = f64::from(RiskLevel::High.ordinal());

    let y_for = |ordinal: u8| bottom - f64::from(ordinal) / max_ordinal * plot_h;

    let first = points.first().map(|p| p.timestamp.timestamp_millis());
    let last = points.last().map(|p| p.timestamp.timestamp_millis());
    let x_for = |ts: &DateTime<Utc>| match (first, last) {
        (Some(a), Some(b)) if b > a => {
            let t = (ts.timestamp_millis() - a) as f64 / (b - a) as f64;
            MARGIN_LEFT + t * plot_w
        }
        _ => MARGIN_LEFT + plot_w / 2.0,
    };

    let mut svg = String::new();
    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{CHART_WIDTH}\" height=\"{CHART_HEIGHT}\" \
         viewBox=\"0 0 {CHART_WIDTH} {CHART_HEIGHT}\" font-family=\"sans-serif\" font-size=\"12\">\n"
    ));
    svg.push_str(&format!(
        "<title>{}</title>\n",
        escape_xml(TREND_CHART_TITLE)
    ));
    svg.push_str(&format!(
        "<text x=\"{:.1}\" y=\"28\" text-anchor=\"middle\" font-size=\"16\" font-weight=\"bold\">{}</text>\n",
        CHART_WIDTH / 2.0,
        escape_xml(TREND_CHART_TITLE)
    ));

    // Horizontal gridline and label per level, Low at the bottom.
    for level in RiskLevel::ALL {
        let y = y_for(level.ordinal());
        svg.push_str(&format!(
            "<line x1=\"{MARGIN_LEFT:.1}\" y1=\"{y:.1}\" x2=\"{:.1}\" y2=\"{y:.1}\" stroke=\"#e0e0e0\"/>\n",
            MARGIN_LEFT + plot_w
        ));
        svg.push_str(&format!(
            "<text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"end\">{}</text>\n",
            MARGIN_LEFT - 8.0,
            y + 4.0,
            escape_xml(level.label())
        ));
    }

    svg.push_str(&format!(
        "<line x1=\"{MARGIN_LEFT:.1}\" y1=\"{MARGIN_TOP:.1}\" x2=\"{MARGIN_LEFT:.1}\" y2=\"{bottom:.1}\" stroke=\"#333\"/>\n"
    ));
    svg.push_str(&format!(
        "<line x1=\"{MARGIN_LEFT:.1}\" y1=\"{bottom:.1}\" x2=\"{:.1}\" y2=\"{bottom:.1}\" stroke=\"#333\"/>\n",
        MARGIN_LEFT + plot_w
    ));
    svg.push_str(&format!(
        "<text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"middle\">{}</text>\n",
        MARGIN_LEFT + plot_w / 2.0,
        CHART_HEIGHT - 18.0,
        escape_xml(X_AXIS_TITLE)
    ));
    svg.push_str(&format!(
        "<text x=\"20\" y=\"{:.1}\" text-anchor=\"middle\" transform=\"rotate(-90 20 {:.1})\">{}</text>\n",
        MARGIN_TOP + plot_h / 2.0,
        MARGIN_TOP + plot_h / 2.0,
        escape_xml(Y_AXIS_TITLE)
    ));

    // Time labels at both ends of the x axis.
    if let (Some(a), Some(b)) = (points.first(), points.last()) {
        let mut ticks = vec![a];
        if b.timestamp != a.timestamp {
            ticks.push(b);
        }
        for p in ticks {
            svg.push_str(&format!(
                "<text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"middle\">{}</text>\n",
                x_for(&p.timestamp),
                bottom + 20.0,
                escape_xml(&p.timestamp.format(TOOLTIP_TIME_FORMAT).to_string())
            ));
        }
    }

    if points.len() > 1 {
        let coords: Vec<String> = points
            .iter()
            .map(|p| format!("{:.1},{:.1}", x_for(&p.timestamp), y_for(p.ordinal)))
            .collect();
        svg.push_str(&format!(
            "<polyline fill=\"none\" stroke=\"#007bff\" stroke-width=\"3\" points=\"{}\"/>\n",
            coords.join(" ")
        ));
    }

    for p in points {
        let tooltip = format!(
            "Time: {}\nSymptom: {}\nRisk: {}",
            p.timestamp.format(TOOLTIP_TIME_FORMAT),
            p.symptom,
            p.risk_level.label()
        );
        svg.push_str(&format!(
            "<circle cx=\"{:.1}\" cy=\"{:.1}\" r=\"5\" fill=\"#007bff\"><title>{}</title></circle>\n",
            x_for(&p.timestamp),
            y_for(p.ordinal),
            escape_xml(&tooltip)
        ));
    }

    svg.push_str("</svg>\n");
    svg
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

// ═══════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════
