//! Rasterization of draw instructions onto any `Rgb888` draw target

use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Alignment, Baseline, Text, TextStyle, TextStyleBuilder};

use crate::instruction::{Anchor, DrawInstruction};
use crate::metrics::FontSet;

/// Offsets of the outline copies drawn beneath outlined text
const OUTLINE_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1), // top row
    (-1, 0),
    (1, 0), // middle row (skip center)
    (-1, 1),
    (0, 1),
    (1, 1), // bottom row
];

fn text_style(anchor: Anchor) -> TextStyle {
    let (alignment, baseline) = match anchor {
        Anchor::LeftTop => (Alignment::Left, Baseline::Top),
        Anchor::CenterTop => (Alignment::Center, Baseline::Top),
        Anchor::RightBottom => (Alignment::Right, Baseline::Bottom),
    };
    TextStyleBuilder::new()
        .alignment(alignment)
        .baseline(baseline)
        .build()
}

fn draw_text<D>(
    display: &mut D,
    text: &str,
    position: Point,
    font: &MonoFont<'_>,
    color: Rgb888,
    outline: Option<Rgb888>,
    style: TextStyle,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb888>,
{
    if let Some(outline_color) = outline {
        let outline_style = MonoTextStyle::new(font, outline_color);
        for (dx, dy) in OUTLINE_OFFSETS {
            Text::with_text_style(text, position + Point::new(dx, dy), outline_style, style)
                .draw(display)?;
        }
    }

    Text::with_text_style(text, position, MonoTextStyle::new(font, color), style).draw(display)?;
    Ok(())
}

/// Paint one instruction.
pub fn paint<D>(
    display: &mut D,
    instruction: &DrawInstruction,
    fonts: &FontSet,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb888>,
{
    match instruction {
        DrawInstruction::FilledRect {
            x0,
            y0,
            x1,
            y1,
            color,
        } => Rectangle::with_corners(Point::new(*x0, *y0), Point::new(*x1, *y1))
            .into_styled(PrimitiveStyle::with_fill(*color))
            .draw(display),
        DrawInstruction::Line {
            x0,
            y0,
            x1,
            y1,
            color,
            width,
        } => Line::new(Point::new(*x0, *y0), Point::new(*x1, *y1))
            .into_styled(PrimitiveStyle::with_stroke(*color, *width))
            .draw(display),
        DrawInstruction::TextAt {
            x,
            y,
            text,
            color,
            font,
            anchor,
            outline,
        } => draw_text(
            display,
            text,
            Point::new(*x, *y),
            fonts.font(*font),
            *color,
            *outline,
            text_style(*anchor),
        ),
    }
}

/// Paint instructions in order; later instructions cover earlier ones.
pub fn paint_all<D>(
    display: &mut D,
    instructions: &[DrawInstruction],
    fonts: &FontSet,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb888>,
{
    for instruction in instructions {
        paint(display, instruction, fonts)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::BACKGROUND;
    use crate::config::CanvasConfig;
    use crate::framebuffer::FrameBuffer;
    use crate::instruction::FontRole;

    fn fonts() -> FontSet {
        FontSet::from_config(&CanvasConfig::default())
    }

    #[test]
    fn test_filled_rect_corners_are_inclusive() {
        let mut fb = FrameBuffer::new(20, 20);
        let rect = DrawInstruction::FilledRect {
            x0: 2,
            y0: 3,
            x1: 5,
            y1: 4,
            color: Rgb888::GREEN,
        };
        paint(&mut fb, &rect, &fonts()).unwrap();

        assert_eq!(fb.pixel(2, 3), Some(Rgb888::GREEN));
        assert_eq!(fb.pixel(5, 4), Some(Rgb888::GREEN));
        assert_eq!(fb.pixel(6, 4), Some(BACKGROUND));
        assert_eq!(fb.pixel(5, 5), Some(BACKGROUND));
    }

    #[test]
    fn test_zero_width_rect_paints_one_column() {
        let mut fb = FrameBuffer::new(20, 20);
        let rect = DrawInstruction::FilledRect {
            x0: 7,
            y0: 0,
            x1: 7,
            y1: 9,
            color: Rgb888::BLUE,
        };
        paint(&mut fb, &rect, &fonts()).unwrap();

        let region = fb.painted_region().unwrap();
        assert_eq!((region.min_x, region.max_x), (7, 7));
    }

    #[test]
    fn test_later_instructions_cover_earlier() {
        let mut fb = FrameBuffer::new(20, 20);
        let instructions = [
            DrawInstruction::FilledRect {
                x0: 0,
                y0: 0,
                x1: 19,
                y1: 19,
                color: Rgb888::RED,
            },
            DrawInstruction::Line {
                x0: 10,
                y0: 0,
                x1: 10,
                y1: 19,
                color: Rgb888::WHITE,
                width: 1,
            },
        ];
        paint_all(&mut fb, &instructions, &fonts()).unwrap();

        assert_eq!(fb.pixel(10, 10), Some(Rgb888::WHITE));
        assert_eq!(fb.pixel(9, 10), Some(Rgb888::RED));
    }

    #[test]
    fn test_text_anchor_right_bottom_stays_left_of_anchor() {
        let mut fb = FrameBuffer::new(200, 50);
        let text = DrawInstruction::text(
            195,
            45,
            "Generated at: now",
            Rgb888::WHITE,
            FontRole::Footer,
            Anchor::RightBottom,
        );
        paint(&mut fb, &text, &fonts()).unwrap();

        let region = fb.painted_region().expect("text paints pixels");
        assert!(region.max_x <= 195);
        assert!(region.max_y <= 45);
        assert!(region.min_y > 30);
    }

    #[test]
    fn test_outline_paints_both_colors() {
        let mut fb = FrameBuffer::new(60, 30);
        let text = DrawInstruction::TextAt {
            x: 30,
            y: 5,
            text: "42".into(),
            color: Rgb888::WHITE,
            font: FontRole::Section,
            anchor: Anchor::CenterTop,
            outline: Some(Rgb888::new(0x80, 0x80, 0x80)),
        };
        paint(&mut fb, &text, &fonts()).unwrap();

        let mut seen_white = false;
        let mut seen_gray = false;
        for y in 0..30 {
            for x in 0..60 {
                match fb.pixel(x, y) {
                    Some(c) if c == Rgb888::WHITE => seen_white = true,
                    Some(c) if c == Rgb888::new(0x80, 0x80, 0x80) => seen_gray = true,
                    _ => {}
                }
            }
        }
        assert!(seen_white && seen_gray);
    }
}
