use crate::common::*;

use crate::model::chart::color::*;

#[doc = "Base hues assigned to series by index, cycling."]
pub const CHART_COLORS: [RgbaColor; 9] = [
    RgbaColor::rgb(0x4d, 0xc9, 0xf6),
    RgbaColor::rgb(0xf6, 0x70, 0x19),
    RgbaColor::rgb(0xf5, 0x37, 0x94),
    RgbaColor::rgb(0x53, 0x7b, 0xc4),
    RgbaColor::rgb(0xac, 0xc2, 0x36),
    RgbaColor::rgb(0x16, 0x6a, 0x8f),
    RgbaColor::rgb(0x00, 0xa9, 0x50),
    RgbaColor::rgb(0x58, 0x59, 0x5b),
    RgbaColor::rgb(0x85, 0x49, 0xba),
];

#[doc = "Fill/border color pair for one series or segment."]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeriesColor {
    pub fill: RgbaColor,
    pub line: RgbaColor,
}

#[doc = r#"
    Immutable drawing policy shared by the synthesizer, the renderer and the caption engine.

    Loaded once from the `[chart]` section of the server config (every field has a default)
    and handed around by reference; nothing in the rendering path reads the environment.
"#]
#[derive(Debug, Clone, Deserialize, Serialize, Getters)]
#[getset(get = "pub")]
#[serde(default)]
pub struct ChartStyle {
    pub font_family: String,
    pub font_color: RgbaColor,
    pub fill_alpha: u8,
    pub line_alpha: u8,
    pub clean_fill: RgbaColor,
    pub clean_line: RgbaColor,
    pub title_font_size: f64,
    pub tick_font_size: f64,
    pub caption_max_font_size: f32,
    pub caption_padding_fraction: f32,
    pub caption_font_step: f32,
    pub border_width: u32,
    pub chart_padding: u32,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            font_family: String::from("IPAEXG"),
            font_color: RgbaColor::rgba(0x33, 0x33, 0x33, 0xaa),
            fill_alpha: 0x88,
            line_alpha: 0xee,
            clean_fill: RgbaColor::rgba(0, 0, 0, 0),
            clean_line: RgbaColor::rgba(0, 0, 0, 0x22),
            title_font_size: 24.0,
            tick_font_size: 12.0,
            caption_max_font_size: 72.0,
            caption_padding_fraction: 0.2,
            caption_font_step: 2.0,
            border_width: 2,
            chart_padding: 5,
        }
    }
}

impl ChartStyle {
    #[doc = "Color pair for series `index`: `palette[index mod len]` with the fill and line alphas."]
    pub fn color_for(&self, index: usize) -> SeriesColor {
        let base: RgbaColor = CHART_COLORS[index % CHART_COLORS.len()];
        SeriesColor {
            fill: base.with_alpha(self.fill_alpha),
            line: base.with_alpha(self.line_alpha),
        }
    }

    #[doc = "Pair used for segments that must stay invisible (the remainder of a doughnut)."]
    pub fn clean_color(&self) -> SeriesColor {
        SeriesColor {
            fill: self.clean_fill,
            line: self.clean_line,
        }
    }

    pub fn palette_size(&self) -> usize {
        CHART_COLORS.len()
    }
}
