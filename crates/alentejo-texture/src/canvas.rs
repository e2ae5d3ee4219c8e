//! Minimal raster drawing surface used by the synthesizer

use alentejo_core::{Color, RasterImage, Result};

/// An RGBA8 drawing surface. Shapes are clipped at the edges; nothing wraps.
pub struct Canvas {
    image: RasterImage,
}

impl Canvas {
    /// Create a canvas filled with `background`
    pub fn new(width: u32, height: u32, background: Color) -> Result<Self> {
        Ok(Self {
            image: RasterImage::new(width, height, background.to_rgba8())?,
        })
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Fill every row with a color interpolated from `top` (row 0) to `bottom`
    pub fn vertical_gradient(&mut self, top: Color, bottom: Color) {
        let h = self.height();
        let span = (h.max(2) - 1) as f32;
        for y in 0..h {
            let rgba = top.lerp(&bottom, y as f32 / span).to_rgba8();
            for x in 0..self.width() {
                self.image.set_pixel(x, y, rgba);
            }
        }
    }

    /// Paint every pixel whose center lies within `radius` of `(cx, cy)`
    pub fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Color) {
        let rgba = color.to_rgba8();
        let r2 = radius * radius;
        self.for_each_in_disc(cx, cy, radius, |image, x, y, d2| {
            if d2 <= r2 {
                image.set_pixel(x, y, rgba);
            }
        });
    }

    /// Blend a soft halo around `(cx, cy)`: opacity `peak` at the center,
    /// falling off quadratically to zero at `radius`
    pub fn glow(&mut self, cx: f32, cy: f32, radius: f32, color: Color, peak: f32) {
        if radius <= 0.0 {
            return;
        }
        self.for_each_in_disc(cx, cy, radius, |image, x, y, d2| {
            let t = 1.0 - d2.sqrt() / radius;
            if t > 0.0 {
                let alpha = (peak * t * t).clamp(0.0, 1.0);
                let under = image.pixel(x, y);
                image.set_pixel(x, y, blend(under, color, alpha));
            }
        });
    }

    pub fn into_image(self) -> RasterImage {
        self.image
    }

    fn for_each_in_disc<F>(&mut self, cx: f32, cy: f32, radius: f32, mut f: F)
    where
        F: FnMut(&mut RasterImage, u32, u32, f32),
    {
        if !(cx.is_finite() && cy.is_finite() && radius.is_finite()) || radius < 0.0 {
            return;
        }
        let x0 = (cx - radius).floor().max(0.0) as i64;
        let y0 = (cy - radius).floor().max(0.0) as i64;
        let x1 = ((cx + radius).ceil() as i64).min(self.width() as i64 - 1);
        let y1 = ((cy + radius).ceil() as i64).min(self.height() as i64 - 1);

        for y in y0..=y1 {
            for x in x0..=x1 {
                let dx = x as f32 + 0.5 - cx;
                let dy = y as f32 + 0.5 - cy;
                f(&mut self.image, x as u32, y as u32, dx * dx + dy * dy);
            }
        }
    }
}

fn blend(under: [u8; 4], over: Color, alpha: f32) -> [u8; 4] {
    let over = over.to_rgba8();
    let mix = |a: u8, b: u8| (a as f32 * (1.0 - alpha) + b as f32 * alpha).round() as u8;
    [
        mix(under[0], over[0]),
        mix(under[1], over[1]),
        mix(under[2], over[2]),
        under[3].max(over[3]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_circle_covers_only_the_disc() {
        let mut canvas = Canvas::new(16, 16, Color::BLACK).unwrap();
        canvas.fill_circle(8.0, 8.0, 2.0, Color::WHITE);
        let img = canvas.into_image();

        assert_eq!(img.pixel(8, 8), [255, 255, 255, 255]);
        assert_eq!(img.pixel(7, 7), [255, 255, 255, 255]);
        assert_eq!(img.pixel(0, 0), [0, 0, 0, 255]);
        assert_eq!(img.pixel(11, 8), [0, 0, 0, 255]);
    }

    #[test]
    fn circles_are_clipped_at_the_edges() {
        let mut canvas = Canvas::new(8, 8, Color::BLACK).unwrap();
        canvas.fill_circle(-0.5, -0.5, 2.0, Color::WHITE);
        canvas.fill_circle(100.0, 100.0, 3.0, Color::WHITE);
        let img = canvas.into_image();

        assert_eq!(img.pixel(0, 0), [255, 255, 255, 255]);
        assert_eq!(img.pixel(7, 7), [0, 0, 0, 255]);
        // No wrap-around to the opposite edge
        assert_eq!(img.pixel(7, 0), [0, 0, 0, 255]);
        assert_eq!(img.pixel(0, 7), [0, 0, 0, 255]);
    }

    #[test]
    fn gradient_runs_top_to_bottom() {
        let mut canvas = Canvas::new(4, 5, Color::WHITE).unwrap();
        canvas.vertical_gradient(Color::BLACK, Color::WHITE);
        let img = canvas.into_image();

        assert_eq!(img.pixel(0, 0), [0, 0, 0, 255]);
        assert_eq!(img.pixel(3, 4), [255, 255, 255, 255]);
        let mid = img.pixel(2, 2)[0];
        assert!(mid > 120 && mid < 135, "mid row was {}", mid);
        // Rows are uniform
        assert_eq!(img.pixel(0, 2), img.pixel(3, 2));
    }

    #[test]
    fn glow_fades_with_distance() {
        let mut canvas = Canvas::new(32, 32, Color::BLACK).unwrap();
        canvas.glow(16.0, 16.0, 8.0, Color::WHITE, 1.0);
        let img = canvas.into_image();

        let near = img.pixel(16, 16)[0];
        let mid = img.pixel(19, 16)[0];
        let far = img.pixel(30, 16)[0];
        assert!(near > mid, "{} <= {}", near, mid);
        assert!(mid > far, "{} <= {}", mid, far);
        assert_eq!(far, 0);
    }
}
