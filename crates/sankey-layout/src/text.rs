use serde::{Deserialize, Serialize};
use unicode_width::UnicodeWidthStr;

pub const ELLIPSIS: &str = "...";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextStyle {
    pub font_family: Option<String>,
    /// Pixels.
    pub font_size: f64,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_family: None,
            font_size: 16.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextMetrics {
    pub width: f64,
    pub height: f64,
}

pub trait TextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics;
}

/// Fixed advance per `char`; stable across platforms.
#[derive(Debug, Clone, Default)]
pub struct DeterministicTextMeasurer {
    pub char_width_factor: f64,
    pub line_height_factor: f64,
}

impl DeterministicTextMeasurer {
    fn factors(&self) -> (f64, f64) {
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
        (char_width_factor, line_height_factor)
    }
}

impl TextMeasurer for DeterministicTextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics {
        let (char_width_factor, line_height_factor) = self.factors();
        let font_size = style.font_size.max(1.0);
        TextMetrics {
            width: text.chars().count() as f64 * font_size * char_width_factor,
            height: font_size * line_height_factor,
        }
    }
}

/// Like [`DeterministicTextMeasurer`] but counts terminal display columns, so wide (CJK)
/// characters take two advances and combining marks none.
#[derive(Debug, Clone, Default)]
pub struct UnicodeWidthTextMeasurer {
    pub inner: DeterministicTextMeasurer,
}

impl TextMeasurer for UnicodeWidthTextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics {
        let (char_width_factor, line_height_factor) = self.inner.factors();
        let font_size = style.font_size.max(1.0);
        TextMetrics {
            width: UnicodeWidthStr::width(text) as f64 * font_size * char_width_factor,
            height: font_size * line_height_factor,
        }
    }
}

/// Returns `text` unchanged when it fits `max_width`, otherwise the longest prefix followed by
/// [`ELLIPSIS`] that fits. Nothing fits → empty string.
pub fn tailored_text_or_default(
    measurer: &dyn TextMeasurer,
    text: &str,
    style: &TextStyle,
    max_width: f64,
) -> String {
    if measurer.measure(text, style).width <= max_width {
        return text.to_string();
    }

    let boundaries: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
    // Binary search on the number of kept chars; width grows monotonically with the prefix.
    let (mut lo, mut hi) = (0usize, boundaries.len());
    let mut best: Option<String> = None;
    while lo <= hi {
        let mid = (lo + hi) / 2;
        let end = boundaries.get(mid).copied().unwrap_or(text.len());
        let candidate = format!("{}{ELLIPSIS}", &text[..end]);
        if measurer.measure(&candidate, style).width <= max_width {
            best = Some(candidate);
            lo = mid + 1;
        } else if mid == 0 {
            break;
        } else {
            hi = mid - 1;
        }
    }
    best.unwrap_or_default()
}
