//! Plain-text rendering of the dashboard

use spikewx_core::{map_to_display, MatrixFrame, DEGRADED_ADVISORY};

use crate::state::ViewState;

pub const TITLE: &str = "LEGO Spike Weather Station";

fn push_line(out: &mut String, line: &str) {
    out.push_str(line);
    out.push('\n');
}

/// Measurement cards for the current state; empty while loading
pub fn render_cards(state: &ViewState) -> String {
    let mut out = String::new();
    let Some(display) = state.display() else {
        return out;
    };

    let mapped = map_to_display(&display.snapshot);
    let refreshing = if display.loading { " (refreshing)" } else { "" };
    push_line(
        &mut out,
        &format!("{} | updated {}{}", mapped.location, mapped.updated_at, refreshing),
    );
    if display.degraded {
        let advisory = display.error.as_deref().unwrap_or(DEGRADED_ADVISORY);
        push_line(&mut out, &format!("! {advisory} - showing fallback data"));
    }
    for m in &mapped.measurements {
        push_line(
            &mut out,
            &format!(
                "{:<11} {:<14} {} [{} {}]",
                m.icon,
                m.kind.title(),
                m.value_text,
                m.trend_icon,
                m.trend_label
            ),
        );
    }
    out
}

/// Matrix rows: lit pixels show their band glyph, dark ones a dot
pub fn render_matrix(frame: &MatrixFrame) -> String {
    let mut out = String::new();
    for row in frame.rows() {
        let line: Vec<String> = row
            .iter()
            .map(|p| {
                let glyph = if p.lit { p.zone.glyph() } else { '.' };
                glyph.to_string()
            })
            .collect();
        push_line(&mut out, &line.join(" "));
    }
    out
}

/// Full dashboard frame
pub fn render(state: &ViewState, frame: &MatrixFrame) -> String {
    let mut out = String::new();
    push_line(&mut out, TITLE);
    push_line(&mut out, "");
    if state.display().is_none() {
        push_line(&mut out, "Loading weather data...");
    } else {
        out.push_str(&render_cards(state));
    }
    push_line(&mut out, "");
    out.push_str(&render_matrix(frame));
    out
}
