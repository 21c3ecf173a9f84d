use super::{FontSpec, TextMeasure, wrap};
use crate::color::Rgba8;
use crate::surface::SizePx;

// All ratios are fractions of the surface width unless noted.
const TITLE_FONT: f32 = 0.05;
const TITLE_MAX_WIDTH: f32 = 0.8;
const TITLE_LINE_STEP: f32 = 0.06;
/// Fraction of the surface height.
const TITLE_TOP: f32 = 0.4;
/// Fraction of the surface height, used when a logo is present.
const TITLE_TOP_WITH_LOGO: f32 = 0.5;

const SUBTITLE_FONT: f32 = 0.025;
const SUBTITLE_MAX_WIDTH: f32 = 0.7;
const SUBTITLE_GAP: f32 = 0.04;
const SUBTITLE_LINE_STEP: f32 = 0.035;

const SUBTITLE_COLOR: Rgba8 = Rgba8::new(255, 255, 255, 204);

/// A wrapped, positioned block of lines.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBlock {
    pub lines: Vec<String>,
    pub font: FontSpec,
    pub color: Rgba8,
    /// Horizontal center of every line.
    pub center_x: f32,
    /// Vertical middle of the first line.
    pub first_line_y: f32,
    /// Distance between consecutive line middles.
    pub line_step: f32,
}

impl TextBlock {
    /// `(y, line)` for every line, top to bottom.
    pub fn positioned_lines(&self) -> impl Iterator<Item = (f32, &str)> + '_ {
        self.lines
            .iter()
            .enumerate()
            .map(|(i, line)| (self.first_line_y + i as f32 * self.line_step, line.as_str()))
    }
}

/// Title and subtitle placement for one surface.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLayout {
    pub title: TextBlock,
    pub subtitle: TextBlock,
}

/// Wraps and positions the title and subtitle.
///
/// Positions depend only on whether a logo is present, never on its size.
pub fn layout_text<M>(
    size: SizePx,
    title: &str,
    subtitle: &str,
    has_logo: bool,
    family: &str,
    measure: &M,
) -> TextLayout
where
    M: TextMeasure + ?Sized,
{
    let (w, h) = (size.w(), size.h());
    let center_x = w / 2.0;

    let title_font = FontSpec::new(family, w * TITLE_FONT).bold();
    let title_lines = wrap(title, w * TITLE_MAX_WIDTH, &title_font, measure);
    let title_y = h * if has_logo { TITLE_TOP_WITH_LOGO } else { TITLE_TOP };
    let title_step = w * TITLE_LINE_STEP;

    let subtitle_font = FontSpec::new(family, w * SUBTITLE_FONT);
    let subtitle_lines = wrap(subtitle, w * SUBTITLE_MAX_WIDTH, &subtitle_font, measure);
    let subtitle_y = title_y + title_lines.len() as f32 * title_step + w * SUBTITLE_GAP;

    TextLayout {
        title: TextBlock {
            lines: title_lines,
            font: title_font,
            color: Rgba8::WHITE,
            center_x,
            first_line_y: title_y,
            line_step: title_step,
        },
        subtitle: TextBlock {
            lines: subtitle_lines,
            font: subtitle_font,
            color: SUBTITLE_COLOR,
            center_x,
            first_line_y: subtitle_y,
            line_step: w * SUBTITLE_LINE_STEP,
        },
    }
}
