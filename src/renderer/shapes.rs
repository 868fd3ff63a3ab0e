//! Shape generation for 2D primitives
//!
//! Everything comes out as a plain triangle list.

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;
use crate::sim::{Rect, Triangle};

/// Two triangles covering an axis-aligned rect
pub fn rect(r: &Rect, color: [f32; 4]) -> Vec<Vertex> {
    let (x0, y0, x1, y1) = (r.x, r.y, r.right(), r.bottom());
    vec![
        Vertex::new(x0, y0, color),
        Vertex::new(x1, y0, color),
        Vertex::new(x0, y1, color),
        Vertex::new(x0, y1, color),
        Vertex::new(x1, y0, color),
        Vertex::new(x1, y1, color),
    ]
}

pub fn triangle(t: &Triangle, color: [f32; 4]) -> Vec<Vertex> {
    vec![
        Vertex::new(t.a.x, t.a.y, color),
        Vertex::new(t.b.x, t.b.y, color),
        Vertex::new(t.c.x, t.c.y, color),
    ]
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}
