use crate::domain::analysis::ProfileMetrics;
use std::f64::consts::PI;
use std::fmt::{self, Write as _};

pub const METRIC_KEYS: [&str; 6] = [
    "information_sensitivity",
    "analysis_depth",
    "risk_management",
    "decisiveness",
    "emotional_control",
    "learning_adaptability",
];

pub const CENTER: f64 = 120.0;
pub const MAX_RADIUS: f64 = 80.0;
const LABEL_OFFSET: f64 = 25.0;
const DEFAULT_SCORE: f64 = 50.0;
const WEAK_SCORE: f64 = 40.0;
const GRID_SCALES: [f64; 5] = [0.2, 0.4, 0.6, 0.8, 1.0];

const ROSE: &str = "#f43f5e";
const AMBER: &str = "#f59e0b";
const EMERALD: &str = "#10b981";
const MUTED: &str = "#94a3b8";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Start,
    Middle,
    End,
}

impl Anchor {
    fn as_str(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Middle => "middle",
            Self::End => "end",
        }
    }
}

/// Hexagon vertex `index`, starting at 12 o'clock. Screen y grows downward.
pub fn hexagon_point(cx: f64, cy: f64, radius: f64, index: usize) -> Point {
    let angle = PI / 2.0 + 2.0 * PI * index as f64 / 6.0;
    Point {
        x: cx + radius * angle.cos(),
        y: cy - radius * angle.sin(),
    }
}

pub fn score_color(score: f64) -> &'static str {
    if score <= 40.0 {
        ROSE
    } else if score <= 60.0 {
        AMBER
    } else {
        EMERALD
    }
}

pub fn label_position(index: usize) -> (Point, Anchor) {
    let point = hexagon_point(CENTER, CENTER, MAX_RADIUS + LABEL_OFFSET, index);
    let anchor = match index {
        1 | 2 => Anchor::Start,
        4 | 5 => Anchor::End,
        _ => Anchor::Middle,
    };
    (point, anchor)
}

fn hexagon_points(radius: f64) -> String {
    points_attr((0..METRIC_KEYS.len()).map(|i| hexagon_point(CENTER, CENTER, radius, i)))
}

fn points_attr(points: impl Iterator<Item = Point>) -> String {
    points
        .map(|p| format!("{},{}", fmt_num(p.x), fmt_num(p.y)))
        .collect::<Vec<_>>()
        .join(" ")
}

fn fmt_num(v: f64) -> String {
    let rounded = (v * 100.0).round() / 100.0;
    // Avoid "-0".
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    let s = format!("{rounded:.2}");
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

#[derive(Debug, Clone)]
pub struct AxisScore {
    pub key: &'static str,
    pub label: String,
    pub score: f64,
}

impl AxisScore {
    pub fn is_weak(&self) -> bool {
        self.score <= WEAK_SCORE
    }

    fn score_text(&self) -> String {
        let n = fmt_num(self.score);
        if self.is_weak() {
            format!("⚠️ {n}")
        } else {
            n
        }
    }
}

pub struct RadarChart<'a>(pub &'a ProfileMetrics);

impl RadarChart<'_> {
    pub fn axes(&self) -> Vec<AxisScore> {
        METRIC_KEYS
            .iter()
            .map(|&key| {
                let metric = self.0.get(key);
                AxisScore {
                    key,
                    label: metric
                        .and_then(|m| m.label.clone())
                        .filter(|l| !l.is_empty())
                        .unwrap_or_else(|| key.to_string()),
                    score: metric.and_then(|m| m.score).unwrap_or(DEFAULT_SCORE),
                }
            })
            .collect()
    }

    pub fn data_points(&self) -> Vec<Point> {
        self.axes()
            .iter()
            .enumerate()
            .map(|(i, a)| hexagon_point(CENTER, CENTER, a.score / 100.0 * MAX_RADIUS, i))
            .collect()
    }

    pub fn svg(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.write_svg(&mut out);
        out
    }

    fn write_svg(&self, out: &mut String) -> fmt::Result {
        let axes = self.axes();

        writeln!(out, r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 240 240">"#)?;
        for scale in GRID_SCALES {
            writeln!(
                out,
                r##"  <polygon points="{}" fill="none" stroke="#334155" stroke-width="0.5"/>"##,
                hexagon_points(MAX_RADIUS * scale)
            )?;
        }
        for i in 0..METRIC_KEYS.len() {
            let p = hexagon_point(CENTER, CENTER, MAX_RADIUS, i);
            writeln!(
                out,
                r##"  <line x1="{c}" y1="{c}" x2="{}" y2="{}" stroke="#334155" stroke-width="0.5"/>"##,
                fmt_num(p.x),
                fmt_num(p.y),
                c = fmt_num(CENTER)
            )?;
        }
        writeln!(
            out,
            r#"  <polygon points="{}" fill="{ROSE}" fill-opacity="0.05" stroke="none"/>"#,
            hexagon_points(MAX_RADIUS * WEAK_SCORE / 100.0)
        )?;
        writeln!(
            out,
            r#"  <polygon points="{}" fill="{EMERALD}" fill-opacity="0.2" stroke="{EMERALD}" stroke-width="2"/>"#,
            points_attr(self.data_points().into_iter())
        )?;

        for (i, (axis, p)) in axes.iter().zip(self.data_points()).enumerate() {
            writeln!(
                out,
                r#"  <circle cx="{}" cy="{}" r="{}" fill="{}"/>"#,
                fmt_num(p.x),
                fmt_num(p.y),
                if axis.is_weak() { 5 } else { 4 },
                score_color(axis.score)
            )?;

            let (pos, anchor) = label_position(i);
            writeln!(
                out,
                r#"  <text x="{x}" y="{}" text-anchor="{a}" font-size="9" fill="{}">{}</text>"#,
                fmt_num(pos.y - 6.0),
                if axis.is_weak() { ROSE } else { MUTED },
                xml_escape(&axis.label),
                x = fmt_num(pos.x),
                a = anchor.as_str()
            )?;
            writeln!(
                out,
                r#"  <text x="{x}" y="{}" text-anchor="{a}" font-size="11" font-weight="bold" fill="{}">{}</text>"#,
                fmt_num(pos.y + 6.0),
                score_color(axis.score),
                axis.score_text(),
                x = fmt_num(pos.x),
                a = anchor.as_str()
            )?;
        }
        writeln!(out, "</svg>")
    }
}

fn xml_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

impl fmt::Display for RadarChart<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for axis in self.axes() {
            let bars = (axis.score.clamp(0.0, 100.0) / 10.0).round() as usize;
            writeln!(
                f,
                "{:<8} {}{} {}",
                axis.label,
                "▇".repeat(bars),
                " ".repeat(10 - bars),
                axis.score_text()
            )?;
        }
        writeln!(f, "● 취약 (≤40)  ● 주의 (≤60)  ● 양호")
    }
}
