//! Conversion options: a per-request value object with documented defaults
//! and field-wise override merging.
//!
//! This layer only propagates values. Invalid numbers are tolerated here
//! and surface later as a conversion error or degraded output; the
//! quality/color accessors clamp to their valid ranges at point of use.

/// All tunable conversion parameters, fully populated.
///
/// Constructed fresh per request from [`ConvertOptions::default`], mutated
/// only by [`ConvertOptions::apply`], and discarded at request end. Never
/// shared across requests.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertOptions {
    /// Maximum image width on a PDF page, in millimeters.
    pub max_image_width: f64,
    /// Left page margin in millimeters.
    pub margin_left: f64,
    /// Top page margin in millimeters.
    pub margin_top: f64,
    /// Font size in points for text rendered into PDFs.
    pub font_size: f64,
    /// Font family for text rendered into PDFs: "helvetica", "times", or
    /// "courier". Unknown names fall back to Helvetica.
    pub font_name: String,
    /// Line height in millimeters for text rendered into PDFs.
    pub line_height: f64,
    /// Inline image width in a DOCX, in inches.
    pub docx_image_width: f64,
    /// Inline image height cap in a DOCX, in inches.
    pub docx_image_max_height: f64,
    /// JPEG encode quality, 0-100.
    pub jpeg_quality: u32,
    /// GIF palette size, 2-256.
    pub gif_colors: u32,
    /// Preserve the alpha channel when the target format supports it.
    pub preserve_alpha: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            max_image_width: 190.0,
            margin_left: 10.0,
            margin_top: 10.0,
            font_size: 12.0,
            font_name: "helvetica".to_string(),
            line_height: 10.0,
            docx_image_width: 6.0,
            docx_image_max_height: 8.0,
            jpeg_quality: 95,
            gif_colors: 256,
            preserve_alpha: true,
        }
    }
}

impl ConvertOptions {
    /// Merge an override into this value. Set fields win; later calls win
    /// over earlier ones on field conflicts.
    pub fn apply(&mut self, overrides: &OptionsOverride) {
        if let Some(v) = overrides.max_image_width {
            self.max_image_width = v;
        }
        if let Some(v) = overrides.margin_left {
            self.margin_left = v;
        }
        if let Some(v) = overrides.margin_top {
            self.margin_top = v;
        }
        if let Some(v) = overrides.font_size {
            self.font_size = v;
        }
        if let Some(v) = &overrides.font_name {
            self.font_name = v.clone();
        }
        if let Some(v) = overrides.line_height {
            self.line_height = v;
        }
        if let Some(v) = overrides.docx_image_width {
            self.docx_image_width = v;
        }
        if let Some(v) = overrides.docx_image_max_height {
            self.docx_image_max_height = v;
        }
        if let Some(v) = overrides.jpeg_quality {
            self.jpeg_quality = v;
        }
        if let Some(v) = overrides.gif_colors {
            self.gif_colors = v;
        }
        if let Some(v) = overrides.preserve_alpha {
            self.preserve_alpha = v;
        }
    }

    /// JPEG quality clamped to the encoder's 1-100 range.
    pub fn clamped_jpeg_quality(&self) -> u8 {
        self.jpeg_quality.clamp(1, 100) as u8
    }

    /// GIF palette size clamped to 2-256.
    pub fn clamped_gif_colors(&self) -> usize {
        self.gif_colors.clamp(2, 256) as usize
    }
}

/// All-optional mirror of [`ConvertOptions`] used to carry per-request
/// overrides (e.g. from query parameters).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OptionsOverride {
    pub max_image_width: Option<f64>,
    pub margin_left: Option<f64>,
    pub margin_top: Option<f64>,
    pub font_size: Option<f64>,
    pub font_name: Option<String>,
    pub line_height: Option<f64>,
    pub docx_image_width: Option<f64>,
    pub docx_image_max_height: Option<f64>,
    pub jpeg_quality: Option<u32>,
    pub gif_colors: Option<u32>,
    pub preserve_alpha: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_fully_populated() {
        let opts = ConvertOptions::default();
        assert_eq!(opts.max_image_width, 190.0);
        assert_eq!(opts.margin_left, 10.0);
        assert_eq!(opts.margin_top, 10.0);
        assert_eq!(opts.font_size, 12.0);
        assert_eq!(opts.font_name, "helvetica");
        assert_eq!(opts.docx_image_width, 6.0);
        assert_eq!(opts.docx_image_max_height, 8.0);
        assert_eq!(opts.jpeg_quality, 95);
        assert_eq!(opts.gif_colors, 256);
    }

    #[test]
    fn test_apply_set_fields_win() {
        let mut opts = ConvertOptions::default();
        opts.apply(&OptionsOverride {
            jpeg_quality: Some(80),
            font_name: Some("times".to_string()),
            ..Default::default()
        });
        assert_eq!(opts.jpeg_quality, 80);
        assert_eq!(opts.font_name, "times");
        assert_eq!(opts.gif_colors, 256);
    }

    #[test]
    fn test_later_overrides_win() {
        let mut opts = ConvertOptions::default();
        opts.apply(&OptionsOverride {
            max_image_width: Some(100.0),
            ..Default::default()
        });
        opts.apply(&OptionsOverride {
            max_image_width: Some(120.0),
            ..Default::default()
        });
        assert_eq!(opts.max_image_width, 120.0);
    }

    #[test]
    fn test_invalid_values_tolerated_then_clamped() {
        let mut opts = ConvertOptions::default();
        opts.apply(&OptionsOverride {
            jpeg_quality: Some(500),
            gif_colors: Some(1),
            ..Default::default()
        });
        // Propagation accepts anything...
        assert_eq!(opts.jpeg_quality, 500);
        assert_eq!(opts.gif_colors, 1);
        // ...clamping happens at point of use.
        assert_eq!(opts.clamped_jpeg_quality(), 100);
        assert_eq!(opts.clamped_gif_colors(), 2);
    }
}
