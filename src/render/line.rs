//! Bresenham integer line drawing.
use crate::render::framebuffer::{Color, Framebuffer};

/// Draw the segment `(x0, y0)-(x1, y1)` inclusive of both endpoints.
pub fn line(fb: &mut Framebuffer, x0: i32, y0: i32, x1: i32, y1: i32, color: Color) {
    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    let (mut x, mut y) = (x0, y0);
    loop {
        fb.set_pixel_color(x, y, color);
        if x == x1 && y == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INK: Color = Color::rgb(255, 100, 100);

    fn painted(fb: &Framebuffer) -> usize {
        fb.color_buffer.iter().filter(|c| **c == INK).count()
    }

    #[test]
    fn horizontal_and_vertical() {
        let mut fb = Framebuffer::new(10, 10);
        line(&mut fb, 1, 1, 6, 1, INK);
        assert_eq!(painted(&fb), 6);
        line(&mut fb, 8, 9, 8, 2, INK);
        assert_eq!(painted(&fb), 14);
    }

    #[test]
    fn diagonal_hits_both_ends() {
        let mut fb = Framebuffer::new(10, 10);
        line(&mut fb, 7, 7, 2, 2, INK);
        assert_eq!(painted(&fb), 6);
        for i in 2..=7 {
            assert_eq!(fb.get_pixel(i, i), INK);
        }
    }

    #[test]
    fn shallow_line_has_one_pixel_per_column() {
        let mut fb = Framebuffer::new(12, 4);
        line(&mut fb, 0, 0, 10, 3, INK);
        for x in 0..=10 {
            let n = (0..4).filter(|&y| fb.get_pixel(x, y) == INK).count();
            assert_eq!(n, 1, "column {x}");
        }
    }

    #[test]
    fn off_buffer_segments_are_clipped() {
        let mut fb = Framebuffer::new(4, 4);
        line(&mut fb, -5, 1, 8, 1, INK);
        assert_eq!(painted(&fb), 4);
    }
}
