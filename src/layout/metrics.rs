//! Text measurement.
//!
//! The engine never measures text itself; the host supplies a
//! [`TextMetrics`] implementation backed by its font system.

use std::cell::RefCell;
use std::collections::HashMap;

use serde::Serialize;

use crate::error::LayoutError;
use crate::model::{Font, FontStyle, FontWeight};

/// Rendered extent of a single line of text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct TextSize {
    pub width: f32,
    pub height: f32,
}

pub trait TextMetrics {
    /// Measures `text` rendered on one line in `font`.
    fn measure(&self, text: &str, font: &Font) -> Result<TextSize, LayoutError>;
}

impl<T: TextMetrics + ?Sized> TextMetrics for &T {
    fn measure(&self, text: &str, font: &Font) -> Result<TextSize, LayoutError> {
        (**self).measure(text, font)
    }
}

/// Width estimate from a fixed per-character advance.
///
/// `width = chars * size * advance`, `height = size * ascent`. Useful where no
/// font system is available and in tests, where exact numbers matter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AverageCharMetrics {
    /// Advance of one character as a fraction of the font size.
    pub advance: f32,
    /// Line height as a fraction of the font size.
    pub ascent: f32,
}

impl Default for AverageCharMetrics {
    fn default() -> Self {
        Self {
            advance: 0.5,
            ascent: 1.0,
        }
    }
}

impl TextMetrics for AverageCharMetrics {
    fn measure(&self, text: &str, font: &Font) -> Result<TextSize, LayoutError> {
        if !font.size.is_finite() || font.size <= 0.0 {
            return Err(LayoutError::Metrics {
                text: text.to_string(),
                reason: format!("unusable font size {}", font.size),
            });
        }
        let bold = match font.weight {
            FontWeight::Bold => 1.1,
            FontWeight::Normal => 1.0,
        };
        Ok(TextSize {
            width: text.chars().count() as f32 * font.size * self.advance * bold,
            height: font.size * self.ascent,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct MeasureKey {
    text: String,
    family: String,
    size_bits: u32,
    weight: FontWeight,
    style: FontStyle,
}

impl MeasureKey {
    fn new(text: &str, font: &Font) -> Self {
        Self {
            text: text.to_string(),
            family: font.family.clone(),
            size_bits: font.size.to_bits(),
            weight: font.weight,
            style: font.style,
        }
    }
}

/// Memoises another provider by `(text, font)`. Colour and alignment do not
/// affect the key. Failed measurements are not cached.
#[derive(Debug)]
pub struct MeasureCache<M> {
    inner: M,
    entries: RefCell<HashMap<MeasureKey, TextSize>>,
}

impl<M: TextMetrics> MeasureCache<M> {
    pub fn new(inner: M) -> Self {
        Self {
            inner,
            entries: RefCell::new(HashMap::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
    }
}

impl<M: TextMetrics> TextMetrics for MeasureCache<M> {
    fn measure(&self, text: &str, font: &Font) -> Result<TextSize, LayoutError> {
        let key = MeasureKey::new(text, font);
        if let Some(size) = self.entries.borrow().get(&key) {
            return Ok(*size);
        }
        let size = self.inner.measure(text, font)?;
        self.entries.borrow_mut().insert(key, size);
        Ok(size)
    }
}
