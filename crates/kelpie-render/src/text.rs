//! Deterministic text measurement and label stacking.
//!
//! There is no font machinery in a headless engine; measurement approximates
//! glyph extents from display columns so output is stable across platforms.

use serde::{Deserialize, Serialize};
use unicode_width::UnicodeWidthStr;

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
            font_size: 14.0,
            font_weight: None,
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
    fn measure(&self, lines: &[String], style: &TextStyle) -> TextMetrics;
}

#[derive(Debug, Clone, Default)]
pub struct DeterministicTextMeasurer {
    pub char_width_factor: f64,
    pub line_height_factor: f64,
}

impl TextMeasurer for DeterministicTextMeasurer {
    fn measure(&self, lines: &[String], style: &TextStyle) -> TextMetrics {
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

        let font_size = style.font_size.max(1.0);
        let mut max_cols = 0usize;
        for line in lines {
            max_cols = max_cols.max(UnicodeWidthStr::width(line.as_str()));
        }

        TextMetrics {
            width: max_cols as f64 * font_size * char_width_factor,
            height: lines.len().max(1) as f64 * font_size * line_height_factor,
            line_count: lines.len().max(1),
        }
    }
}

/// Stacks a multi-word label one word per line. Single-word labels come back
/// as a single line; callers decide which nodes stack (mind-map roots never
/// do).
pub fn stack_label(label: &str) -> Vec<String> {
    let words: Vec<String> = label.split_whitespace().map(|w| w.to_string()).collect();
    if words.is_empty() {
        return vec![String::new()];
    }
    words
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_word_stays_single_line() {
        assert_eq!(stack_label("Topic"), vec!["Topic".to_string()]);
    }

    #[test]
    fn multi_word_stacks_per_word() {
        assert_eq!(
            stack_label("Plan  the launch"),
            vec!["Plan".to_string(), "the".to_string(), "launch".to_string()]
        );
    }

    #[test]
    fn empty_label_yields_one_empty_line() {
        assert_eq!(stack_label("   "), vec![String::new()]);
    }

    #[test]
    fn measurement_tracks_widest_line_and_line_count() {
        let measurer = DeterministicTextMeasurer::default();
        let style = TextStyle {
            font_size: 10.0,
            ..TextStyle::default()
        };
        let m = measurer.measure(&["abc".to_string(), "a".to_string()], &style);
        assert_eq!(m.width, 3.0 * 10.0 * 0.6);
        assert_eq!(m.height, 2.0 * 10.0 * 1.2);
        assert_eq!(m.line_count, 2);
    }
}
