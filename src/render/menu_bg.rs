//! Animated menu backdrop: hue bands, a grid of pulsing squares and
//! expanding ripple rings.
use std::f32::consts::TAU;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::render::framebuffer::{Color, Framebuffer};

pub const MAX_RIPPLES: usize = 48;
pub const DEFAULT_SEED: u64 = 0xC0FFEE;

const SPAWN_ATTEMPTS: usize = 2;
const SPAWN_CHANCE: f32 = 0.045;
const BANDS: i32 = 8;
const PULSE_RATE: f32 = 1.3;
const SLIDE_SPEED: f32 = 12.0;

#[derive(Debug, Clone, Copy, Default)]
struct Ripple {
    active: bool,
    x: f32,
    y: f32,
    r: f32,
    dr: f32,
    color: Color,
}

pub struct MenuBg {
    w: i32,
    h: i32,
    t: f64,
    rng: StdRng,
    seed: u64,
    grid_cols: i32,
    grid_rows: i32,
    cell_w: i32,
    cell_h: i32,
    cell_phase: Vec<f32>,
    ripples: [Ripple; MAX_RIPPLES],
}

impl MenuBg {
    pub fn new(w: u32, h: u32, seed: u64) -> Self {
        let mut bg = Self {
            w: w as i32,
            h: h as i32,
            t: 0.0,
            rng: StdRng::seed_from_u64(seed),
            seed,
            grid_cols: 0,
            grid_rows: 0,
            cell_w: 1,
            cell_h: 1,
            cell_phase: Vec::new(),
            ripples: [Ripple::default(); MAX_RIPPLES],
        };
        bg.layout_grid();
        bg
    }

    /// Roughly 20x12 cells at 800x600, never fewer than 10x6.
    fn layout_grid(&mut self) {
        self.grid_cols = (self.w / 40).max(10);
        self.grid_rows = (self.h / 50).max(6);
        self.cell_w = (self.w / self.grid_cols).max(1);
        self.cell_h = (self.h / self.grid_rows).max(1);

        let n = (self.grid_cols * self.grid_rows) as usize;
        let mut phases = StdRng::seed_from_u64(self.seed ^ 0x9E37_79B9);
        self.cell_phase = (0..n).map(|_| phases.gen_range(0.0..TAU)).collect();
    }

    /// Follow a canvas resize. Live ripples are cleared.
    pub fn resize(&mut self, w: u32, h: u32) {
        self.w = w as i32;
        self.h = h as i32;
        self.layout_grid();
        for r in &mut self.ripples {
            r.active = false;
        }
    }

    pub fn active_ripples(&self) -> usize {
        self.ripples.iter().filter(|r| r.active).count()
    }

    pub fn grid(&self) -> (i32, i32) {
        (self.grid_cols, self.grid_rows)
    }

    pub fn update(&mut self, now: f64, dt: f32) {
        self.t = now;

        for _ in 0..SPAWN_ATTEMPTS {
            if self.rng.gen_range(0.0..1.0f32) >= SPAWN_CHANCE {
                continue;
            }
            let Some(slot) = self.ripples.iter().position(|r| !r.active) else {
                break;
            };
            let x = self.rng.gen_range(0.0..1.0f32) * self.w as f32;
            let y = self.rng.gen_range(0.0..1.0f32) * self.h as f32;
            let dr = 60.0 + 160.0 * self.rng.gen_range(0.0..1.0f32);
            let hue = 360.0 * self.rng.gen_range(0.0..1.0f32);
            self.ripples[slot] = Ripple {
                active: true,
                x,
                y,
                r: 8.0,
                dr,
                color: Color::from_hsv(hue, 0.65, 0.95),
            };
        }

        let max_r = (self.w as f32).hypot(self.h as f32) * 1.1;
        for r in self.ripples.iter_mut().filter(|r| r.active) {
            r.r += r.dr * dt;
            if r.r > max_r {
                r.active = false;
            }
        }
    }

    pub fn render(&self, dst: &mut Framebuffer) {
        self.draw_band_gradient(dst);
        self.draw_flowing_squares(dst);
        self.draw_ripples(dst);
    }

    fn draw_band_gradient(&self, dst: &mut Framebuffer) {
        let bw = (self.w + BANDS - 1) / BANDS;
        let base_h = (self.t as f32 * 12.0) % 360.0;
        for i in 0..BANDS {
            let hue = base_h + i as f32 * (360.0 / BANDS as f32);
            let v = if i % 2 == 0 { 0.15 } else { 0.10 };
            let x = i * bw;
            let w = bw.min(self.w - x);
            if w > 0 {
                dst.fill_rect(x, 0, w, self.h, Color::from_hsv(hue, 0.25, v));
            }
        }
    }

    fn draw_flowing_squares(&self, dst: &mut Framebuffer) {
        let t = self.t as f32;
        let (cw, ch) = (self.cell_w, self.cell_h);
        let short = cw.min(ch);
        let slide = (t * SLIDE_SPEED) % cw.max(ch) as f32;
        let base_h = (t * 10.0) % 360.0;

        for gy in 0..self.grid_rows {
            for gx in 0..self.grid_cols {
                let idx = (gy * self.grid_cols + gx) as usize;
                let x = gx * cw;
                let y = gy * ch;

                let bgp = 0.5 + 0.5 * (t * 0.6 + gx as f32 * 0.3 + gy as f32 * 0.25).sin();
                let cell = Color::from_hsv(base_h + 80.0 * bgp, 0.15, 0.08 + 0.06 * bgp);
                dst.fill_rect(x, y, cw, ch, cell);

                let p = 0.5 + 0.5 * (t * PULSE_RATE + self.cell_phase[idx]).sin();
                let side = ((0.35 + 0.25 * p) * short as f32) as i32;
                let off = (short - side) / 2;
                let outline = Color::from_hsv(base_h + 180.0 * p, 0.65, 0.9);
                dst.draw_square(x + off + slide as i32 % 2, y + off, side, outline);

                let wobble = (slide + gx as f32 * 3.0) % (cw / 3).max(2) as f32;
                let ax = x + cw / 2 + wobble as i32 - cw / 6;
                let ah = (ch / 6).max(1);
                let accent = Color::from_hsv(base_h + 60.0, 0.25, 0.25);
                dst.fill_rect(ax, y + (ch - ah) / 2, 1, ah, accent);
            }
        }
    }

    fn draw_ripples(&self, dst: &mut Framebuffer) {
        for r in self.ripples.iter().filter(|r| r.active) {
            let (cx, cy, radius) = (r.x as i32, r.y as i32, r.r as i32);
            dst.draw_circle(cx, cy, radius, r.color);
            if radius > 6 {
                dst.draw_circle(cx, cy, radius - 6, r.color);
            }
            if radius > 12 {
                dst.draw_circle(cx, cy, radius - 12, r.color);
            }
        }
    }
}
