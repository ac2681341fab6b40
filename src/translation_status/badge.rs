//! SVG badge rendering.

use std::fmt::Write;

use crate::format::format_percentage;
use crate::render::escape_markup;
use crate::translation_status::LocaleStatus;

const ROW_HEIGHT: u32 = 20;
const ROW_GAP: u32 = 4;
const LABEL_WIDTH: u32 = 120;
const VALUE_WIDTH: u32 = 50;

/// Colour for a completeness percentage.
fn color(percentage: u32) -> &'static str {
    match percentage {
        90.. => "#4c1",
        60..=89 => "#dfb317",
        _ => "#e05d44",
    }
}

/// One badge per row, stacked vertically: language on the left, completeness
/// on the right.
pub fn render_badges(rows: &[(&str, &LocaleStatus)]) -> String {
    let width = LABEL_WIDTH + VALUE_WIDTH;
    let height = (rows.len() as u32 * (ROW_HEIGHT + ROW_GAP)).saturating_sub(ROW_GAP);

    let mut svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" font-family="DejaVu Sans,Verdana,Geneva,sans-serif" font-size="11">"#
    );

    for (i, (label, status)) in rows.iter().enumerate() {
        let y = i as u32 * (ROW_HEIGHT + ROW_GAP);
        let text_y = y + 14;
        let value = format_percentage(status.ratio(), 0);
        let _ = write!(
            svg,
            r##"<g><rect x="0" y="{y}" width="{LABEL_WIDTH}" height="{ROW_HEIGHT}" fill="#555"/><rect x="{LABEL_WIDTH}" y="{y}" width="{VALUE_WIDTH}" height="{ROW_HEIGHT}" fill="{fill}"/><text x="{label_x}" y="{text_y}" fill="#fff" text-anchor="middle">{label}</text><text x="{value_x}" y="{text_y}" fill="#fff" text-anchor="middle">{value}</text></g>"##,
            fill = color(status.percentage),
            label_x = LABEL_WIDTH / 2,
            value_x = LABEL_WIDTH + VALUE_WIDTH / 2,
            label = escape_markup(label),
            value = escape_markup(&value),
        );
    }

    svg.push_str("</svg>");
    svg
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(translated: usize, total: usize) -> LocaleStatus {
        LocaleStatus {
            translated,
            total,
            percentage: (translated * 100 / total) as u32,
            missing: Vec::new(),
        }
    }

    #[test]
    fn test_colors_by_completeness() {
        let svg = render_badges(&[("Full", &status(10, 10)), ("Half", &status(5, 10))]);
        assert!(svg.contains("#4c1"));
        assert!(svg.contains("#e05d44"));
        assert!(svg.contains("100 %"));
        assert!(svg.contains("50 %"));
        assert!(svg.contains(r#"height="44""#));
    }

    #[test]
    fn test_escapes_labels() {
        let svg = render_badges(&[("<Tom & Jerry>", &status(1, 1))]);
        assert!(svg.contains("&lt;Tom &amp; Jerry&gt;"));
    }

    #[test]
    fn test_empty() {
        assert_eq!(
            render_badges(&[]),
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="170" height="0" font-family="DejaVu Sans,Verdana,Geneva,sans-serif" font-size="11"></svg>"#
        );
    }
}
