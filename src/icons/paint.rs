/// Draw commands and palette for the icon rasterizer

use serde::{Deserialize, Serialize};

/// slate-900
pub const BACKGROUND: (u8, u8, u8, u8) = (15, 23, 42, 255);
/// #E7D3A3
pub const GOLD: (u8, u8, u8, u8) = (231, 211, 163, 255);
pub const WHITE: (u8, u8, u8, u8) = (255, 255, 255, 255);

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned box, used for ellipse bounds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Bounds {
    pub fn around(center: Point, rx: f32, ry: f32) -> Self {
        Self {
            left: center.x - rx,
            top: center.y - ry,
            right: center.x + rx,
            bottom: center.y + ry,
        }
    }

    pub fn center(&self) -> Point {
        Point::new((self.left + self.right) / 2.0, (self.top + self.bottom) / 2.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PolygonStyle {
    /// Closed outline with round joins
    Stroke { width: f32 },
    Fill,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Primitive {
    /// Flood the whole canvas
    Background { rgba: (u8, u8, u8, u8) },
    Line {
        from: Point,
        to: Point,
        width: f32,
        rgba: (u8, u8, u8, u8),
    },
    Polygon {
        points: Vec<Point>,
        style: PolygonStyle,
        rgba: (u8, u8, u8, u8),
    },
    /// Filled ellipse inscribed in `bounds`
    Ellipse {
        bounds: Bounds,
        rgba: (u8, u8, u8, u8),
    },
}

impl Primitive {
    /// Area covered by a filled shape; `None` for outlines and the background.
    pub fn filled_area(&self) -> Option<f32> {
        match self {
            Primitive::Polygon {
                points,
                style: PolygonStyle::Fill,
                ..
            } => Some(shoelace(points).abs() / 2.0),
            Primitive::Ellipse { bounds, .. } => {
                let rx = (bounds.right - bounds.left) / 2.0;
                let ry = (bounds.bottom - bounds.top) / 2.0;
                Some(std::f32::consts::PI * rx * ry)
            }
            _ => None,
        }
    }

    /// Area centroid of a filled shape
    pub fn centroid(&self) -> Option<Point> {
        match self {
            Primitive::Polygon {
                points,
                style: PolygonStyle::Fill,
                ..
            } => polygon_centroid(points),
            Primitive::Ellipse { bounds, .. } => Some(bounds.center()),
            _ => None,
        }
    }
}

/// The filled primitive with the biggest area, if any
pub fn largest_filled(primitives: &[Primitive]) -> Option<&Primitive> {
    primitives
        .iter()
        .filter_map(|p| p.filled_area().map(|a| (p, a)))
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(p, _)| p)
}

// twice the signed area
fn shoelace(points: &[Point]) -> f32 {
    let n = points.len();
    (0..n)
        .map(|i| {
            let (a, b) = (points[i], points[(i + 1) % n]);
            a.x * b.y - b.x * a.y
        })
        .sum()
}

fn polygon_centroid(points: &[Point]) -> Option<Point> {
    let a2 = shoelace(points);
    if a2.abs() < f32::EPSILON {
        return None;
    }
    let n = points.len();
    let (mut cx, mut cy) = (0.0, 0.0);
    for i in 0..n {
        let (a, b) = (points[i], points[(i + 1) % n]);
        let cross = a.x * b.y - b.x * a.y;
        cx += (a.x + b.x) * cross;
        cy += (a.y + b.y) * cross;
    }
    Some(Point::new(cx / (3.0 * a2), cy / (3.0 * a2)))
}
