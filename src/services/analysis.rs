//! Simulated Template Analysis
//!
//! Styling extraction is simulated: uploads get a fixed palette, font, and
//! layout fixture plus randomized slide and color counts. Real PPTX
//! introspection is out of scope.

use rand::Rng;

use crate::models::template::{FontFamily, PaletteColor, TemplateAnalysis};

/// Produce the simulated analysis attached to a newly uploaded template.
pub fn simulated_analysis() -> TemplateAnalysis {
    let mut rng = rand::thread_rng();

    TemplateAnalysis {
        color_palette: vec![
            palette("#1E40AF", "Primary"),
            palette("#FFFFFF", "White"),
            palette("#F3F4F6", "Light Gray"),
            palette("#374151", "Dark Gray"),
        ],
        font_families: vec![font("Inter", "Headings"), font("Open Sans", "Body Text")],
        layout_patterns: vec![
            "Title Slide".to_string(),
            "Content".to_string(),
            "Image".to_string(),
            "Text".to_string(),
        ],
        slide_count: rng.gen_range(10..=29),
        color_count: rng.gen_range(3..=10),
    }
}

pub(crate) fn palette(hex: &str, name: &str) -> PaletteColor {
    PaletteColor {
        hex: hex.to_string(),
        name: name.to_string(),
    }
}

pub(crate) fn font(name: &str, usage: &str) -> FontFamily {
    FontFamily {
        name: name.to_string(),
        usage: usage.to_string(),
    }
}
