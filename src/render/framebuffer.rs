//! CPU pixel buffer and the drawing primitives the renderers composite with.
//!
//! Every write is bounds-checked: anything falling outside the buffer is
//! silently dropped, so callers can draw partially off-screen shapes.

/// 8-bit RGBA color, laid out as four consecutive bytes.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Each color channel shifted right by one; alpha untouched.
    #[inline]
    pub const fn halved(self) -> Self {
        Self::new(self.r >> 1, self.g >> 1, self.b >> 1, self.a)
    }

    /// Opaque color from HSV (`h` in degrees, `s`/`v` in `0..=1`).
    pub fn from_hsv(h: f32, s: f32, v: f32) -> Self {
        let h = h.rem_euclid(360.0);
        let s = s.clamp(0.0, 1.0);
        let v = v.clamp(0.0, 1.0);
        let c = v * s;
        let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
        let m = v - c;
        let (r, g, b) = match h {
            h if h < 60.0 => (c, x, 0.0),
            h if h < 120.0 => (x, c, 0.0),
            h if h < 180.0 => (0.0, c, x),
            h if h < 240.0 => (0.0, x, c),
            h if h < 300.0 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        let to8 = |f: f32| ((f + m) * 255.0) as u8;
        Color::rgb(to8(r), to8(g), to8(b))
    }
}

pub struct Framebuffer {
    pub color_buffer: Vec<Color>,
    pub width: u32,
    pub height: u32,
}

impl Framebuffer {
    pub fn new(width: u32, height: u32) -> Self {
        let size = (width as usize) * (height as usize);
        Self {
            color_buffer: vec![Color::BLACK; size],
            width,
            height,
        }
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    #[inline]
    pub fn fill(&mut self, color: Color) {
        self.color_buffer.fill(color);
    }

    #[inline]
    pub fn set_pixel_color(&mut self, x: i32, y: i32, color: Color) {
        if let Some(i) = self.index(x, y) {
            self.color_buffer[i] = color;
        }
    }

    /// Pixel at `(x, y)`, black outside the buffer.
    #[inline]
    pub fn get_pixel(&self, x: i32, y: i32) -> Color {
        match self.index(x, y) {
            Some(i) => self.color_buffer[i],
            None => Color::BLACK,
        }
    }

    /// Solid rectangle, clipped to the buffer.
    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Color) {
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = x.saturating_add(w).min(self.width as i32);
        let y1 = y.saturating_add(h).min(self.height as i32);
        if x0 >= x1 || y0 >= y1 {
            return;
        }
        let stride = self.width as usize;
        for yy in y0 as usize..y1 as usize {
            let row = yy * stride;
            self.color_buffer[row + x0 as usize..row + x1 as usize].fill(color);
        }
    }

    /// Inclusive vertical run `y0..=y1` in column `x`, clipped to the buffer.
    pub fn draw_vertical(&mut self, x: i32, y0: i32, y1: i32, color: Color) {
        if x < 0 || x as u32 >= self.width {
            return;
        }
        let y0 = y0.max(0);
        let y1 = y1.min(self.height as i32 - 1);
        for y in y0..=y1 {
            self.color_buffer[y as usize * self.width as usize + x as usize] = color;
        }
    }

    /// Copy all of `src` with its top-left corner at `(dx, dy)`, no blending.
    pub fn blit(&mut self, src: &Framebuffer, dx: i32, dy: i32) {
        for y in 0..src.height as i32 {
            let ty = y + dy;
            if ty < 0 || ty as u32 >= self.height {
                continue;
            }
            for x in 0..src.width as i32 {
                let tx = x + dx;
                if tx < 0 || tx as u32 >= self.width {
                    continue;
                }
                self.color_buffer[ty as usize * self.width as usize + tx as usize] =
                    src.color_buffer[y as usize * src.width as usize + x as usize];
            }
        }
    }

    /// 1px square outline with its top-left corner at `(x, y)`.
    pub fn draw_square(&mut self, x: i32, y: i32, side: i32, color: Color) {
        if side <= 0 {
            return;
        }
        let last = side - 1;
        for i in 0..side {
            self.set_pixel_color(x + i, y, color);
            self.set_pixel_color(x + i, y + last, color);
            self.set_pixel_color(x, y + i, color);
            self.set_pixel_color(x + last, y + i, color);
        }
    }

    /// 1px circle outline (midpoint algorithm).
    pub fn draw_circle(&mut self, cx: i32, cy: i32, r: i32, color: Color) {
        if r < 0 {
            return;
        }
        let mut x = r;
        let mut y = 0;
        let mut err = 1 - r;
        while x >= y {
            for (px, py) in [
                (x, y), (y, x), (-y, x), (-x, y),
                (-x, -y), (-y, -x), (y, -x), (x, -y),
            ] {
                self.set_pixel_color(cx + px, cy + py, color);
            }
            y += 1;
            if err < 0 {
                err += 2 * y + 1;
            } else {
                x -= 1;
                err += 2 * (y - x) + 1;
            }
        }
    }

    /// Append the pixels as tightly packed RGBA8 bytes, replacing `out`.
    pub fn write_rgba(&self, out: &mut Vec<u8>) {
        out.clear();
        out.reserve(self.color_buffer.len() * 4);
        for c in &self.color_buffer {
            out.extend_from_slice(&[c.r, c.g, c.b, c.a]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Color = Color::rgb(255, 0, 0);
    const BLUE: Color = Color::rgb(0, 0, 255);

    #[test]
    fn out_of_range_writes_are_dropped() {
        let mut fb = Framebuffer::new(4, 3);
        fb.set_pixel_color(-1, 0, RED);
        fb.set_pixel_color(0, -1, RED);
        fb.set_pixel_color(4, 0, RED);
        fb.set_pixel_color(0, 3, RED);
        assert!(fb.color_buffer.iter().all(|c| *c == Color::BLACK));
        fb.set_pixel_color(3, 2, RED);
        assert_eq!(fb.get_pixel(3, 2), RED);
    }

    #[test]
    fn fill_rect_clips() {
        let mut fb = Framebuffer::new(4, 4);
        fb.fill_rect(-2, -2, 4, 4, RED);
        let painted = fb.color_buffer.iter().filter(|c| **c == RED).count();
        assert_eq!(painted, 4);
        assert_eq!(fb.get_pixel(1, 1), RED);
        assert_eq!(fb.get_pixel(2, 2), Color::BLACK);

        fb.fill_rect(10, 10, 3, 3, BLUE);
        fb.fill_rect(1, 1, 0, 5, BLUE);
        assert!(!fb.color_buffer.contains(&BLUE));
    }

    #[test]
    fn vertical_run_is_inclusive_and_clipped() {
        let mut fb = Framebuffer::new(2, 5);
        fb.draw_vertical(1, -3, 1, RED);
        assert_eq!(fb.get_pixel(1, 0), RED);
        assert_eq!(fb.get_pixel(1, 1), RED);
        assert_eq!(fb.get_pixel(1, 2), Color::BLACK);
        fb.draw_vertical(0, 3, 99, RED);
        assert_eq!(fb.get_pixel(0, 4), RED);
        assert_eq!(fb.get_pixel(0, 2), Color::BLACK);
    }

    #[test]
    fn blit_offsets_and_clips() {
        let mut src = Framebuffer::new(2, 2);
        src.fill(RED);
        let mut dst = Framebuffer::new(3, 3);
        dst.blit(&src, 2, -1);
        assert_eq!(dst.get_pixel(2, 0), RED);
        assert_eq!(dst.get_pixel(1, 0), Color::BLACK);
        assert_eq!(dst.get_pixel(2, 1), Color::BLACK);
    }

    #[test]
    fn halving_keeps_alpha() {
        let c = Color::new(200, 201, 3, 77);
        assert_eq!(c.halved(), Color::new(100, 100, 1, 77));
    }

    #[test]
    fn out_of_range_reads_are_black() {
        let mut fb = Framebuffer::new(2, 2);
        fb.fill(RED);
        assert_eq!(fb.get_pixel(-1, 0), Color::BLACK);
        assert_eq!(fb.get_pixel(0, 2), Color::BLACK);
        assert_eq!(fb.get_pixel(1, 1), RED);
    }

    #[test]
    fn hsv_primaries() {
        assert_eq!(Color::from_hsv(0.0, 1.0, 1.0), Color::rgb(255, 0, 0));
        assert_eq!(Color::from_hsv(120.0, 1.0, 1.0), Color::rgb(0, 255, 0));
        assert_eq!(Color::from_hsv(240.0, 1.0, 1.0), Color::rgb(0, 0, 255));
        assert_eq!(Color::from_hsv(-120.0, 1.0, 1.0), Color::rgb(0, 0, 255));
        assert_eq!(Color::from_hsv(77.0, 0.0, 0.0), Color::rgb(0, 0, 0));
    }

    #[test]
    fn circle_touches_cardinal_points() {
        let mut fb = Framebuffer::new(11, 11);
        fb.draw_circle(5, 5, 4, RED);
        for (x, y) in [(9, 5), (1, 5), (5, 9), (5, 1)] {
            assert_eq!(fb.get_pixel(x, y), RED);
        }
        assert_eq!(fb.get_pixel(5, 5), Color::BLACK);
    }

    #[test]
    fn rgba_bytes_follow_row_major_order() {
        let mut fb = Framebuffer::new(2, 1);
        fb.set_pixel_color(1, 0, Color::new(1, 2, 3, 4));
        let mut out = vec![9; 3];
        fb.write_rgba(&mut out);
        assert_eq!(out, vec![0, 0, 0, 255, 1, 2, 3, 4]);
    }
}
