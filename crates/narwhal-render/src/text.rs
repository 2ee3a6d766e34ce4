use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use unicode_width::UnicodeWidthStr;

pub const ELLIPSIS: char = '\u{2026}';

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextStyle {
    pub font_family: Option<String>,
    pub font_size: f64,
    pub font_weight: Option<String>,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_family: None,
            font_size: 16.0,
            font_weight: None,
        }
    }
}

impl TextStyle {
    pub fn sized(font_size: f64) -> Self {
        Self {
            font_size,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TextMetrics {
    pub width: f64,
    pub height: f64,
    pub line_count: usize,
}

pub trait TextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics;
}

/// Font-free text measurement: every terminal column is `font_size * char_width_factor` wide.
///
/// East Asian wide characters count as two columns (via `unicode-width`), which keeps CJK
/// labels from overflowing their cells.
#[derive(Debug, Clone, Default)]
pub struct DeterministicTextMeasurer {
    pub char_width_factor: f64,
    pub line_height_factor: f64,
}

impl DeterministicTextMeasurer {
    pub fn normalized_text_lines(text: &str) -> Vec<&str> {
        text.split('\n').collect()
    }
}

impl TextMeasurer for DeterministicTextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics {
        let char_width_factor = if self.char_width_factor == 0.0 {
            0.6
        } else {
            self.char_width_factor
        };
        let line_height_factor = if self.line_height_factor == 0.0 {
            1.2
        } else {
            self.line_height_factor
        };

        let lines = Self::normalized_text_lines(text);
        let font_size = style.font_size.max(1.0);
        let max_cols = lines.iter().map(|l| l.width()).max().unwrap_or(0);

        TextMetrics {
            width: max_cols as f64 * font_size * char_width_factor,
            height: lines.len() as f64 * font_size * line_height_factor,
            line_count: lines.len(),
        }
    }
}

/// Collapses line breaks and tabs to spaces, matching how a single `<text>` element renders them.
pub fn single_line(text: &str) -> Cow<'_, str> {
    if text.contains(['\n', '\r', '\t']) {
        Cow::Owned(text.replace("\r\n", " ").replace(['\n', '\r', '\t'], " "))
    } else {
        Cow::Borrowed(text)
    }
}

/// Shortens `text` so it fits in `max_width`, marking the cut with a trailing ellipsis.
///
/// Text that already fits is returned unchanged. The result is never empty for non-empty input:
/// when not even one character fits, the bare ellipsis is returned. The kept prefix is found by
/// binary search, so long inputs cost `O(n log n)` measurement work.
pub fn truncate_to_width(
    measurer: &dyn TextMeasurer,
    text: &str,
    style: &TextStyle,
    max_width: f64,
) -> String {
    if measurer.measure(text, style).width <= max_width {
        return text.to_string();
    }

    let starts: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
    let candidate = |keep: usize| {
        let mut out = text[..starts[keep]].trim_end().to_string();
        out.push(ELLIPSIS);
        out
    };

    // Candidate width never shrinks as `keep` grows; `lo` is the longest fitting prefix so far.
    let (mut lo, mut hi) = (0, starts.len().saturating_sub(1));
    while lo < hi {
        let mid = lo + (hi - lo + 1) / 2;
        if measurer.measure(&candidate(mid), style).width <= max_width {
            lo = mid;
        } else {
            hi = mid - 1;
        }
    }
    if lo == 0 {
        ELLIPSIS.to_string()
    } else {
        candidate(lo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic_width_scales_with_font_size() {
        let m = DeterministicTextMeasurer::default();
        let w16 = m.measure("abcd", &TextStyle::sized(16.0)).width;
        let w32 = m.measure("abcd", &TextStyle::sized(32.0)).width;
        assert_eq!(w16, 4.0 * 16.0 * 0.6);
        assert_eq!(w32, 2.0 * w16);
    }

    #[test]
    fn wide_characters_count_double() {
        let m = DeterministicTextMeasurer::default();
        let style = TextStyle::sized(10.0);
        assert_eq!(m.measure("日本", &style).width, m.measure("abcd", &style).width);
    }

    #[test]
    fn multi_line_text_uses_widest_line() {
        let m = DeterministicTextMeasurer::default();
        let metrics = m.measure("ab\nabcdef", &TextStyle::sized(10.0));
        assert_eq!(metrics.line_count, 2);
        assert_eq!(metrics.width, 36.0);
        assert_eq!(metrics.height, 24.0);
    }

    #[test]
    fn truncation_keeps_fitting_text() {
        let m = DeterministicTextMeasurer::default();
        let style = TextStyle::sized(10.0);
        assert_eq!(truncate_to_width(&m, "short", &style, 100.0), "short");
    }

    #[test]
    fn truncation_appends_ellipsis_within_budget() {
        let m = DeterministicTextMeasurer::default();
        let style = TextStyle::sized(10.0);
        // 6px per column: 60px fits 10 columns, so 9 characters + the ellipsis.
        let out = truncate_to_width(&m, "A very long label indeed", &style, 60.0);
        assert_eq!(out, "A very lo\u{2026}");
        assert!(m.measure(&out, &style).width <= 60.0);
    }

    #[test]
    fn truncation_drops_trailing_space_before_ellipsis() {
        let m = DeterministicTextMeasurer::default();
        let style = TextStyle::sized(10.0);
        let out = truncate_to_width(&m, "ab cdefgh", &style, 24.0);
        assert_eq!(out, "ab\u{2026}");
    }

    #[test]
    fn single_line_collapses_breaks_and_tabs() {
        assert_eq!(single_line("a\r\nb\tc\nd"), "a b c d");
        assert!(matches!(single_line("plain"), Cow::Borrowed("plain")));
    }

    #[test]
    fn truncation_handles_very_long_text() {
        let m = DeterministicTextMeasurer::default();
        let style = TextStyle::sized(10.0);
        let long = "x".repeat(60_000);
        let out = truncate_to_width(&m, &long, &style, 60.0);
        assert_eq!(out, format!("{}\u{2026}", "x".repeat(9)));
    }

    #[test]
    fn truncation_never_returns_empty() {
        let m = DeterministicTextMeasurer::default();
        let style = TextStyle::sized(10.0);
        assert_eq!(truncate_to_width(&m, "abc", &style, 1.0), "\u{2026}");
    }
}
