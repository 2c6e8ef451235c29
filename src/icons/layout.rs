/// Logo geometry. Coordinates are authored against a 512px reference canvas
/// and scaled linearly to the requested size.

use super::paint::{Bounds, Point, PolygonStyle, Primitive, BACKGROUND, GOLD, WHITE};
use super::{Design, REFERENCE_SIZE};

/// Maps reference coordinates onto a canvas of `size` pixels
#[derive(Debug, Clone, Copy)]
pub struct Scaler {
    pub size: u32,
    pub factor: f32,
}

impl Scaler {
    pub fn new(size: u32) -> Self {
        Self {
            size,
            factor: size as f32 / REFERENCE_SIZE as f32,
        }
    }

    pub fn pt(&self, x: f32, y: f32) -> Point {
        Point::new(x * self.factor, y * self.factor)
    }

    /// Scaled length, never thinner than `min` pixels
    pub fn length(&self, reference: f32, min: f32) -> f32 {
        (reference * self.factor).max(min)
    }
}

/// Ordered draw list: background, then outlines, then filled accents.
pub fn layout_icon(design: Design, size: u32) -> Vec<Primitive> {
    let s = Scaler::new(size);
    let mut out = vec![Primitive::Background { rgba: BACKGROUND }];
    match design {
        Design::Pyramid => pyramid(&s, &mut out),
        Design::Scale => balance_scale(&s, &mut out),
    }
    out
}

fn pyramid(s: &Scaler, out: &mut Vec<Primitive>) {
    let size = s.size as f32;
    let margin = size * 0.1;
    let line_width = (s.size / 30).max(2) as f32;

    out.push(Primitive::Polygon {
        points: vec![
            Point::new(size / 2.0, margin),
            Point::new(margin, size - margin),
            Point::new(size - margin, size - margin),
        ],
        style: PolygonStyle::Stroke { width: line_width },
        rgba: GOLD,
    });

    let dot_radius = (s.size / 25).max(3) as f32;
    out.push(Primitive::Ellipse {
        bounds: Bounds::around(Point::new(size / 2.0, size * 0.52), dot_radius, dot_radius),
        rgba: GOLD,
    });
}

fn balance_scale(s: &Scaler, out: &mut Vec<Primitive>) {
    let post = s.length(18.0, 2.0);
    let beam = s.length(14.0, 2.0);
    let string = s.length(4.0, 1.0);

    out.push(Primitive::Line {
        from: s.pt(256.0, 110.0),
        to: s.pt(256.0, 400.0),
        width: post,
        rgba: GOLD,
    });
    out.push(Primitive::Line {
        from: s.pt(116.0, 150.0),
        to: s.pt(396.0, 150.0),
        width: beam,
        rgba: GOLD,
    });
    for (hook, left, right) in [(130.0, 90.0, 170.0), (382.0, 342.0, 422.0)] {
        for end in [left, right] {
            out.push(Primitive::Line {
                from: s.pt(hook, 150.0),
                to: s.pt(end, 292.0),
                width: string,
                rgba: GOLD,
            });
        }
    }

    // plinth
    out.push(Primitive::Polygon {
        points: vec![
            s.pt(196.0, 396.0),
            s.pt(316.0, 396.0),
            s.pt(346.0, 432.0),
            s.pt(166.0, 432.0),
        ],
        style: PolygonStyle::Fill,
        rgba: GOLD,
    });
    out.push(Primitive::Ellipse {
        bounds: Bounds::around(s.pt(256.0, 104.0), s.length(18.0, 2.0), s.length(18.0, 2.0)),
        rgba: GOLD,
    });
    for cx in [130.0, 382.0] {
        out.push(Primitive::Ellipse {
            bounds: Bounds::around(s.pt(cx, 295.0), s.length(50.0, 3.0), s.length(15.0, 1.0)),
            rgba: WHITE,
        });
    }
}
