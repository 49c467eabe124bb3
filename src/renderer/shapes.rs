//! Shape generation for 2D primitives
//!
//! Everything is emitted as triangle lists in screen space (y down).

use glam::Vec2;

use super::vertex::Vertex;

/// Seven-segment layout: top, top-right, bottom-right, bottom, bottom-left, top-left, middle
const SEGMENTS_A: u8 = 1 << 0;
const SEGMENTS_B: u8 = 1 << 1;
const SEGMENTS_C: u8 = 1 << 2;
const SEGMENTS_D: u8 = 1 << 3;
const SEGMENTS_E: u8 = 1 << 4;
const SEGMENTS_F: u8 = 1 << 5;
const SEGMENTS_G: u8 = 1 << 6;

/// Glyph width as a fraction of its height
const GLYPH_ASPECT: f32 = 0.5;
/// Stroke thickness as a fraction of glyph height
const GLYPH_STROKE: f32 = 0.12;
/// Gap between glyphs as a fraction of glyph height
const GLYPH_GAP: f32 = 0.2;

/// Lit segments for a digit, None for anything else
pub fn digit_segments(ch: char) -> Option<u8> {
    let mask = match ch {
        '0' => SEGMENTS_A | SEGMENTS_B | SEGMENTS_C | SEGMENTS_D | SEGMENTS_E | SEGMENTS_F,
        '1' => SEGMENTS_B | SEGMENTS_C,
        '2' => SEGMENTS_A | SEGMENTS_B | SEGMENTS_D | SEGMENTS_E | SEGMENTS_G,
        '3' => SEGMENTS_A | SEGMENTS_B | SEGMENTS_C | SEGMENTS_D | SEGMENTS_G,
        '4' => SEGMENTS_B | SEGMENTS_C | SEGMENTS_F | SEGMENTS_G,
        '5' => SEGMENTS_A | SEGMENTS_C | SEGMENTS_D | SEGMENTS_F | SEGMENTS_G,
        '6' => SEGMENTS_A | SEGMENTS_C | SEGMENTS_D | SEGMENTS_E | SEGMENTS_F | SEGMENTS_G,
        '7' => SEGMENTS_A | SEGMENTS_B | SEGMENTS_C,
        '8' => 0x7f,
        '9' => SEGMENTS_A | SEGMENTS_B | SEGMENTS_C | SEGMENTS_D | SEGMENTS_F | SEGMENTS_G,
        _ => return None,
    };
    Some(mask)
}

/// Generate vertices for an axis-aligned filled rectangle
pub fn rect(min: Vec2, max: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    vec![
        Vertex::new(min.x, min.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(max.x, max.y, color),
    ]
}

/// Generate vertices for a rectangle centered on `center`
pub fn centered_rect(center: Vec2, size: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    let half = size * 0.5;
    rect(center - half, center + half, color)
}

/// Generate vertices for a thick line segment
pub fn line(from: Vec2, to: Vec2, width: f32, color: [f32; 4]) -> Vec<Vertex> {
    let dir = (to - from).normalize_or_zero();
    if dir == Vec2::ZERO {
        return Vec::new();
    }
    // Perpendicular for width
    let perp = Vec2::new(-dir.y, dir.x) * (width * 0.5);

    let a1 = from + perp;
    let a2 = from - perp;
    let b1 = to + perp;
    let b2 = to - perp;

    vec![
        Vertex::new(a1.x, a1.y, color),
        Vertex::new(a2.x, a2.y, color),
        Vertex::new(b1.x, b1.y, color),
        Vertex::new(b1.x, b1.y, color),
        Vertex::new(a2.x, a2.y, color),
        Vertex::new(b2.x, b2.y, color),
    ]
}

/// Width of `content` rendered at glyph height `size`
pub fn text_width(content: &str, size: f32) -> f32 {
    let count = content.chars().count();
    if count == 0 {
        return 0.0;
    }
    let glyph = size * GLYPH_ASPECT;
    count as f32 * glyph + (count - 1) as f32 * size * GLYPH_GAP
}

/// Generate vertices for one seven-segment glyph with its top-left at `origin`
fn glyph(mask: u8, origin: Vec2, size: f32, color: [f32; 4]) -> Vec<Vertex> {
    let w = size * GLYPH_ASPECT;
    let h = size;
    let t = size * GLYPH_STROKE;
    let mid = h * 0.5;

    let bars = [
        (SEGMENTS_A, Vec2::new(0.0, 0.0), Vec2::new(w, t)),
        (SEGMENTS_B, Vec2::new(w - t, 0.0), Vec2::new(w, mid + t * 0.5)),
        (SEGMENTS_C, Vec2::new(w - t, mid - t * 0.5), Vec2::new(w, h)),
        (SEGMENTS_D, Vec2::new(0.0, h - t), Vec2::new(w, h)),
        (SEGMENTS_E, Vec2::new(0.0, mid - t * 0.5), Vec2::new(t, h)),
        (SEGMENTS_F, Vec2::new(0.0, 0.0), Vec2::new(t, mid + t * 0.5)),
        (SEGMENTS_G, Vec2::new(0.0, mid - t * 0.5), Vec2::new(w, mid + t * 0.5)),
    ];

    let mut vertices = Vec::new();
    for (bit, min, max) in bars {
        if mask & bit != 0 {
            vertices.extend(rect(origin + min, origin + max, color));
        }
    }
    vertices
}

/// Generate vertices for digit text hanging below `top_center`.
/// Characters without a glyph still take up space.
pub fn text(content: &str, top_center: Vec2, size: f32, color: [f32; 4]) -> Vec<Vertex> {
    let advance = size * GLYPH_ASPECT + size * GLYPH_GAP;
    let left = top_center.x - text_width(content, size) * 0.5;

    let mut vertices = Vec::new();
    for (i, ch) in content.chars().enumerate() {
        if let Some(mask) = digit_segments(ch) {
            let origin = Vec2::new(left + i as f32 * advance, top_center.y);
            vertices.extend(glyph(mask, origin, size, color));
        }
    }
    vertices
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: [f32; 4] = [1.0; 4];

    #[test]
    fn test_rect_covers_bounds() {
        let verts = centered_rect(Vec2::new(10.0, 20.0), Vec2::new(4.0, 8.0), WHITE);
        assert_eq!(verts.len(), 6);
        let xs: Vec<f32> = verts.iter().map(|v| v.position[0]).collect();
        let ys: Vec<f32> = verts.iter().map(|v| v.position[1]).collect();
        assert_eq!(xs.iter().cloned().fold(f32::MAX, f32::min), 8.0);
        assert_eq!(xs.iter().cloned().fold(f32::MIN, f32::max), 12.0);
        assert_eq!(ys.iter().cloned().fold(f32::MAX, f32::min), 16.0);
        assert_eq!(ys.iter().cloned().fold(f32::MIN, f32::max), 24.0);
    }

    #[test]
    fn test_line_width() {
        let verts = line(Vec2::new(0.0, 0.0), Vec2::new(0.0, 5.0), 2.0, WHITE);
        assert_eq!(verts.len(), 6);
        assert!(verts.iter().all(|v| (v.position[0].abs() - 1.0).abs() < 0.001));
        assert!(line(Vec2::ONE, Vec2::ONE, 2.0, WHITE).is_empty());
    }

    #[test]
    fn test_digit_segment_counts() {
        let lit = |c| digit_segments(c).unwrap().count_ones();
        assert_eq!(lit('1'), 2);
        assert_eq!(lit('7'), 3);
        assert_eq!(lit('4'), 4);
        assert_eq!(lit('0'), 6);
        assert_eq!(lit('8'), 7);
        assert_eq!(digit_segments('x'), None);
    }

    #[test]
    fn test_text_is_centered() {
        let verts = text("11", Vec2::new(100.0, 50.0), 80.0, WHITE);
        // Two glyphs, two bars each
        assert_eq!(verts.len(), 2 * 2 * 6);
        let min_x = verts.iter().map(|v| v.position[0]).fold(f32::MAX, f32::min);
        let max_x = verts.iter().map(|v| v.position[0]).fold(f32::MIN, f32::max);
        // Text box is 96 wide around x = 100
        assert!(min_x >= 52.0 - 0.001);
        assert!((max_x - 148.0).abs() < 0.001);
        let min_y = verts.iter().map(|v| v.position[1]).fold(f32::MAX, f32::min);
        assert!(min_y >= 50.0);
        assert!((text_width("11", 80.0) - 96.0).abs() < 0.001);
    }
}
