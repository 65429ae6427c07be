//! Heap-backed RGB framebuffer and image encoding.
//!
//! All rasterization targets this buffer through `embedded-graphics`. Pixels
//! outside the canvas are dropped, which is the only clipping the renderer
//! does. The finished buffer is converted to an `image::RgbImage` for
//! encoding.

use std::convert::Infallible;
use std::io::Cursor;

use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use image::codecs::jpeg::JpegEncoder;
use image::{ExtendedColorType, ImageFormat, Rgb, RgbImage};
use log::debug;

use crate::color::BACKGROUND;
use crate::error::RenderResult;

/// JPEG quality used for dashboard images
pub const JPEG_QUALITY: u8 = 85;

/// Inclusive bounding box of every pixel a draw call has recolored since
/// the buffer was allocated.
///
/// Writes that leave a pixel at its current color are not counted, so
/// painting background onto untouched canvas leaves the region empty. Tests
/// use it to check that rendered content stays inside the canvas insets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaintedRegion {
    pub min_x: usize,
    pub min_y: usize,
    pub max_x: usize,
    pub max_y: usize,
}

impl PaintedRegion {
    /// Grow `region` (or start one) so it covers `(x, y)`.
    fn including(region: Option<Self>, x: usize, y: usize) -> Self {
        match region {
            None => Self {
                min_x: x,
                min_y: y,
                max_x: x,
                max_y: y,
            },
            Some(r) => Self {
                min_x: r.min_x.min(x),
                min_y: r.min_y.min(y),
                max_x: r.max_x.max(x),
                max_y: r.max_y.max(y),
            },
        }
    }

    pub fn width(&self) -> usize {
        self.max_x - self.min_x + 1
    }

    pub fn height(&self) -> usize {
        self.max_y - self.min_y + 1
    }
}

/// Framebuffer implementing `DrawTarget<Color = Rgb888>`.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameBuffer {
    width: usize,
    height: usize,
    pixels: Vec<Rgb888>,
    painted: Option<PaintedRegion>,
}

impl FrameBuffer {
    /// Allocate a framebuffer filled with the background color.
    pub fn new(width: u32, height: u32) -> Self {
        let (width, height) = (width as usize, height as usize);
        Self {
            width,
            height,
            pixels: vec![BACKGROUND; width * height],
            painted: None,
        }
    }

    pub fn width(&self) -> u32 {
        self.width as u32
    }

    pub fn height(&self) -> u32 {
        self.height as u32
    }

    /// Color at a pixel, or `None` outside the canvas.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb888> {
        let (x, y) = (x as usize, y as usize);
        (x < self.width && y < self.height).then(|| self.pixels[y * self.width + x])
    }

    /// Extent of the content drawn onto the canvas, `None` while it is blank.
    pub fn painted_region(&self) -> Option<PaintedRegion> {
        self.painted
    }

    /// Write one in-bounds pixel and record it when its color changes.
    #[inline]
    fn put(&mut self, x: usize, y: usize, color: Rgb888) {
        let slot = &mut self.pixels[y * self.width + x];
        if *slot == color {
            return;
        }
        *slot = color;
        self.painted = Some(PaintedRegion::including(self.painted, x, y));
    }

    /// Copy the buffer into an `image` crate RGB image.
    pub fn to_rgb_image(&self) -> RgbImage {
        RgbImage::from_fn(self.width(), self.height(), |x, y| {
            let c = self.pixels[y as usize * self.width + x as usize];
            Rgb([c.r(), c.g(), c.b()])
        })
    }

    /// Encode as JPEG at the given quality (1-100).
    pub fn encode_jpeg(&self, quality: u8) -> RenderResult<Vec<u8>> {
        let image = self.to_rgb_image();
        let mut bytes = Vec::new();
        let mut encoder = JpegEncoder::new_with_quality(&mut bytes, quality);
        encoder.encode(
            image.as_raw(),
            image.width(),
            image.height(),
            ExtendedColorType::Rgb8,
        )?;
        debug!(
            "Encoded {}x{} JPEG ({} bytes)",
            self.width,
            self.height,
            bytes.len()
        );
        Ok(bytes)
    }

    /// Encode as lossless PNG.
    pub fn encode_png(&self) -> RenderResult<Vec<u8>> {
        let mut cursor = Cursor::new(Vec::new());
        self.to_rgb_image().write_to(&mut cursor, ImageFormat::Png)?;
        Ok(cursor.into_inner())
    }
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size {
        Size::new(self.width as u32, self.height as u32)
    }
}

impl DrawTarget for FrameBuffer {
    type Color = Rgb888;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(coord, color) in pixels {
            let Point { x, y } = coord;
            if x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height {
                self.put(x as usize, y as usize, color);
            }
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let x_start = (area.top_left.x.max(0) as usize).min(self.width);
        let y_start = (area.top_left.y.max(0) as usize).min(self.height);
        let x_end = (i64::from(area.top_left.x) + i64::from(area.size.width))
            .clamp(0, self.width as i64) as usize;
        let y_end = (i64::from(area.top_left.y) + i64::from(area.size.height))
            .clamp(0, self.height as i64) as usize;

        for y in y_start..y_end {
            for x in x_start..x_end {
                self.put(x, y, color);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::primitives::PrimitiveStyle;

    #[test]
    fn test_new_buffer_is_background() {
        let fb = FrameBuffer::new(8, 4);
        assert_eq!(fb.size(), Size::new(8, 4));
        assert_eq!(fb.pixel(7, 3), Some(BACKGROUND));
        assert_eq!(fb.pixel(8, 0), None);
        assert_eq!(fb.painted_region(), None);
    }

    #[test]
    fn test_fill_clips_to_canvas() {
        let mut fb = FrameBuffer::new(10, 10);
        Rectangle::new(Point::new(-5, 8), Size::new(30, 30))
            .into_styled(PrimitiveStyle::with_fill(Rgb888::RED))
            .draw(&mut fb)
            .unwrap();

        assert_eq!(fb.pixel(0, 8), Some(Rgb888::RED));
        assert_eq!(fb.pixel(9, 9), Some(Rgb888::RED));
        assert_eq!(fb.pixel(0, 7), Some(BACKGROUND));
        assert_eq!(
            fb.painted_region(),
            Some(PaintedRegion {
                min_x: 0,
                min_y: 8,
                max_x: 9,
                max_y: 9
            })
        );
    }

    #[test]
    fn test_painting_background_leaves_region_empty() {
        let mut fb = FrameBuffer::new(10, 10);
        Rectangle::new(Point::zero(), Size::new(10, 10))
            .into_styled(PrimitiveStyle::with_fill(BACKGROUND))
            .draw(&mut fb)
            .unwrap();
        assert_eq!(fb.painted_region(), None);

        Pixel(Point::new(2, 7), Rgb888::RED).draw(&mut fb).unwrap();
        Pixel(Point::new(6, 3), Rgb888::RED).draw(&mut fb).unwrap();
        let region = fb.painted_region().unwrap();
        assert_eq!((region.min_x, region.min_y, region.max_x, region.max_y), (2, 3, 6, 7));
        assert_eq!((region.width(), region.height()), (5, 5));
    }

    #[test]
    fn test_fully_offscreen_fill_is_ignored() {
        let mut fb = FrameBuffer::new(10, 10);
        Rectangle::new(Point::new(20, 20), Size::new(5, 5))
            .into_styled(PrimitiveStyle::with_fill(Rgb888::RED))
            .draw(&mut fb)
            .unwrap();
        assert_eq!(fb.painted_region(), None);
    }

    #[test]
    fn test_png_round_trip_preserves_pixels() {
        let mut fb = FrameBuffer::new(4, 2);
        Pixel(Point::new(1, 1), Rgb888::new(0x12, 0x34, 0x56))
            .draw(&mut fb)
            .unwrap();

        let bytes = fb.encode_png().unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap().to_rgb8();

        assert_eq!(decoded.dimensions(), (4, 2));
        assert_eq!(decoded.get_pixel(1, 1), &Rgb([0x12, 0x34, 0x56]));
        assert_eq!(decoded.get_pixel(0, 0), &Rgb([0, 0, 0]));
    }

    #[test]
    fn test_jpeg_encodes_decodable_image() {
        let fb = FrameBuffer::new(32, 16);
        let bytes = fb.encode_jpeg(JPEG_QUALITY).unwrap();
        assert_eq!(&bytes[..2], &[0xFF, 0xD8], "JPEG SOI marker");
        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (32, 16));
    }
}
