use super::Camera;
use nalgebra::{Point3, Vector3};

/// Background of the scene.
pub(crate) const BACKGROUND: [u8; 4] = [10, 12, 24, 255];
const GRID: [u8; 4] = [128, 128, 128, 255];
const X_AXIS: [u8; 4] = [210, 60, 60, 255];
const Y_AXIS: [u8; 4] = [60, 200, 80, 255];
const Z_AXIS: [u8; 4] = [70, 90, 220, 255];
const AGENT: [u8; 4] = [235, 235, 245, 255];
const TARGET: [u8; 4] = [230, 60, 60, 255];

const AGENT_RADIUS: i32 = 6;
const TARGET_RADIUS: i32 = 8;

/// One RGBA frame buffer being drawn.
pub(crate) struct Frame<'a> {
    pub buf: &'a mut [u8],
    pub width: u32,
    pub height: u32,
}

impl<'a> Frame<'a> {
    fn put(&mut self, x: i32, y: i32, color: [u8; 4]) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        let i = 4 * (y as usize * self.width as usize + x as usize);
        self.buf[i..i + 4].copy_from_slice(&color);
    }
}

/// Fills the whole frame with one color.
pub(crate) fn clear(frame: &mut Frame, color: [u8; 4]) {
    for pixel in frame.buf.chunks_exact_mut(4) {
        pixel.copy_from_slice(&color);
    }
}

fn line(frame: &mut Frame, a: (i32, i32), b: (i32, i32), color: [u8; 4]) {
    let (mut x, mut y) = a;
    let (x1, y1) = b;
    let dx = (x1 - x).abs();
    let dy = -(y1 - y).abs();
    let sx = if x < x1 { 1 } else { -1 };
    let sy = if y < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    loop {
        frame.put(x, y, color);
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

fn disc(frame: &mut Frame, center: (i32, i32), radius: i32, color: [u8; 4]) {
    let (cx, cy) = center;
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if dx * dx + dy * dy <= radius * radius {
                frame.put(cx + dx, cy + dy, color);
            }
        }
    }
}

fn segment(frame: &mut Frame, camera: &Camera, a: Point3<f32>, b: Point3<f32>, color: [u8; 4]) {
    if let (Some(pa), Some(pb)) = (camera.project(&a), camera.project(&b)) {
        line(frame, pa, pb, color);
    }
}

/// Draws the coordinate axes at the origin.
pub(crate) fn axes(frame: &mut Frame, camera: &Camera, len: f32) {
    let origin = Point3::origin();
    segment(frame, camera, origin, Point3::new(len, 0.0, 0.0), X_AXIS);
    segment(frame, camera, origin, Point3::new(0.0, len, 0.0), Y_AXIS);
    segment(frame, camera, origin, Point3::new(0.0, 0.0, len), Z_AXIS);
}

/// Draws the bounding field grid on the ground plane.
pub(crate) fn field(frame: &mut Frame, camera: &Camera, size: i32) {
    let s = size as f32;
    for i in -size..=size {
        let t = i as f32;
        segment(
            frame,
            camera,
            Point3::new(-s, t, 0.0),
            Point3::new(s, t, 0.0),
            GRID,
        );
        segment(
            frame,
            camera,
            Point3::new(t, -s, 0.0),
            Point3::new(t, s, 0.0),
            GRID,
        );
    }
}

/// Draws a drone marker at a position.
pub(crate) fn point(frame: &mut Frame, camera: &Camera, position: &Vector3<f32>) {
    if let Some(center) = camera.project(&Point3::from(*position)) {
        disc(frame, center, AGENT_RADIUS, AGENT);
    }
}

/// Draws a target marker at a position.
pub(crate) fn target_point(frame: &mut Frame, camera: &Camera, position: &Vector3<f32>) {
    if let Some(center) = camera.project(&Point3::from(*position)) {
        disc(frame, center, TARGET_RADIUS, TARGET);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer(width: u32, height: u32) -> Vec<u8> {
        vec![0; 4 * width as usize * height as usize]
    }

    fn pixel(buf: &[u8], width: u32, x: i32, y: i32) -> [u8; 4] {
        let i = 4 * (y as usize * width as usize + x as usize);
        [buf[i], buf[i + 1], buf[i + 2], buf[i + 3]]
    }

    #[test]
    fn clear_fills_every_pixel() {
        let mut buf = buffer(8, 8);
        let mut frame = Frame {
            buf: &mut buf,
            width: 8,
            height: 8,
        };
        clear(&mut frame, BACKGROUND);
        assert_eq!(pixel(&buf, 8, 0, 0), BACKGROUND);
        assert_eq!(pixel(&buf, 8, 7, 7), BACKGROUND);
    }

    #[test]
    fn lines_color_both_endpoints() {
        let mut buf = buffer(16, 16);
        let mut frame = Frame {
            buf: &mut buf,
            width: 16,
            height: 16,
        };
        line(&mut frame, (2, 3), (12, 9), GRID);
        assert_eq!(pixel(&buf, 16, 2, 3), GRID);
        assert_eq!(pixel(&buf, 16, 12, 9), GRID);
    }

    #[test]
    fn drawing_off_screen_is_clipped_not_fatal() {
        let mut buf = buffer(8, 8);
        let mut frame = Frame {
            buf: &mut buf,
            width: 8,
            height: 8,
        };
        line(&mut frame, (-5, -5), (20, 4), GRID);
        disc(&mut frame, (-3, 10), 4, AGENT);
    }

    #[test]
    fn discs_stay_within_their_radius() {
        let mut buf = buffer(32, 32);
        let mut frame = Frame {
            buf: &mut buf,
            width: 32,
            height: 32,
        };
        disc(&mut frame, (16, 16), 3, AGENT);
        assert_eq!(pixel(&buf, 32, 16, 16), AGENT);
        assert_eq!(pixel(&buf, 32, 16, 13), AGENT);
        assert_eq!(pixel(&buf, 32, 16, 12), [0, 0, 0, 0]);
        assert_eq!(pixel(&buf, 32, 20, 20), [0, 0, 0, 0]);
    }
}
