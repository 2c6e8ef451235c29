/// tiny-skia backed canvas that executes draw lists and emits PNG bytes

use super::paint::{PolygonStyle, Primitive};
use crate::{Error, Result};
use log::debug;
use std::fs;
use std::path::Path;
use tiny_skia::{
    Color, FillRule, LineCap, LineJoin, Paint, Path as SkPath, PathBuilder, Pixmap, Rect, Stroke,
    Transform,
};

/// RGBA canvas of a fixed size
pub struct Canvas {
    pixmap: Pixmap,
}

impl Canvas {
    /// Fully transparent square canvas
    pub fn new(size: u32) -> Result<Self> {
        let pixmap = Pixmap::new(size, size).ok_or(Error::InvalidSize(size))?;
        Ok(Self { pixmap })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Straight (non-premultiplied) RGBA of one pixel
    pub fn pixel(&self, x: u32, y: u32) -> Option<(u8, u8, u8, u8)> {
        let c = self.pixmap.pixel(x, y)?.demultiply();
        Some((c.red(), c.green(), c.blue(), c.alpha()))
    }

    pub fn draw_all(&mut self, primitives: &[Primitive]) {
        for p in primitives {
            self.draw(p);
        }
    }

    pub fn draw(&mut self, primitive: &Primitive) {
        match primitive {
            Primitive::Background { rgba } => {
                self.pixmap.fill(Color::from_rgba8(rgba.0, rgba.1, rgba.2, rgba.3));
            }
            Primitive::Line {
                from,
                to,
                width,
                rgba,
            } => {
                let mut pb = PathBuilder::new();
                pb.move_to(from.x, from.y);
                pb.line_to(to.x, to.y);
                let stroke = Stroke {
                    width: *width,
                    line_cap: LineCap::Round,
                    ..Stroke::default()
                };
                self.stroke(pb.finish(), &stroke, *rgba);
            }
            Primitive::Polygon {
                points,
                style,
                rgba,
            } => {
                let mut pb = PathBuilder::new();
                if let Some((first, rest)) = points.split_first() {
                    pb.move_to(first.x, first.y);
                    for p in rest {
                        pb.line_to(p.x, p.y);
                    }
                    pb.close();
                }
                match style {
                    PolygonStyle::Fill => self.fill(pb.finish(), *rgba),
                    PolygonStyle::Stroke { width } => {
                        let stroke = Stroke {
                            width: *width,
                            line_join: LineJoin::Round,
                            ..Stroke::default()
                        };
                        self.stroke(pb.finish(), &stroke, *rgba);
                    }
                }
            }
            Primitive::Ellipse { bounds, rgba } => {
                let path = Rect::from_ltrb(bounds.left, bounds.top, bounds.right, bounds.bottom)
                    .and_then(PathBuilder::from_oval);
                self.fill(path, *rgba);
            }
        }
    }

    fn fill(&mut self, path: Option<SkPath>, rgba: (u8, u8, u8, u8)) {
        let Some(path) = path else {
            debug!("skipping degenerate filled shape");
            return;
        };
        let paint = paint(rgba);
        self.pixmap
            .fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
    }

    fn stroke(&mut self, path: Option<SkPath>, stroke: &Stroke, rgba: (u8, u8, u8, u8)) {
        let Some(path) = path else {
            debug!("skipping degenerate stroke");
            return;
        };
        let paint = paint(rgba);
        self.pixmap
            .stroke_path(&path, &paint, stroke, Transform::identity(), None);
    }

    pub fn encode_png(&self) -> Result<Vec<u8>> {
        self.pixmap
            .encode_png()
            .map_err(|e| Error::Encode(e.to_string()))
    }

    /// Encode and write to `path`, replacing any existing file.
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<Vec<u8>> {
        let path = path.as_ref();
        let png_data = self.encode_png()?;
        fs::write(path, &png_data).map_err(|e| Error::io(path, e))?;
        Ok(png_data)
    }
}

fn paint(rgba: (u8, u8, u8, u8)) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(rgba.0, rgba.1, rgba.2, rgba.3);
    paint.anti_alias = true;
    paint
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::icons::paint::{Bounds, Point, BACKGROUND, WHITE};

    #[test]
    fn zero_size_is_rejected() {
        assert!(matches!(Canvas::new(0), Err(Error::InvalidSize(0))));
    }

    #[test]
    fn background_then_ellipse() {
        let mut c = Canvas::new(64).unwrap();
        assert_eq!(c.pixel(0, 0), Some((0, 0, 0, 0)));
        c.draw_all(&[
            Primitive::Background { rgba: BACKGROUND },
            Primitive::Ellipse {
                bounds: Bounds::around(Point::new(32.0, 32.0), 10.0, 10.0),
                rgba: WHITE,
            },
        ]);
        assert_eq!(c.pixel(0, 0), Some(BACKGROUND));
        assert_eq!(c.pixel(32, 32), Some(WHITE));
        assert_eq!((c.width(), c.height()), (64, 64));
    }

    #[test]
    fn encodes_png_signature() {
        let c = Canvas::new(8).unwrap();
        let png = c.encode_png().unwrap();
        assert_eq!(&png[0..8], b"\x89PNG\r\n\x1a\n");
    }
}
