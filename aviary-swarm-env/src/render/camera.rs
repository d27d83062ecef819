use nalgebra::{Matrix4, Perspective3, Point3, Vector3};

/// Fixed perspective camera over the flying area.
///
/// The eye sits at (3, -11, 3) and looks at the origin with +z up, with a
/// 75 degree vertical field of view, near plane at 0.1 and far plane at 50.
/// The combined view-projection matrix is computed once at construction;
/// the camera never moves between frames.
pub(crate) struct Camera {
    view_proj: Matrix4<f32>,
    width: u32,
    height: u32,
}

impl Camera {
    pub fn new(width: u32, height: u32) -> Self {
        let eye = Point3::new(3.0, -11.0, 3.0);
        let view = Matrix4::look_at_rh(&eye, &Point3::origin(), &Vector3::z());
        let proj = Perspective3::new(
            width as f32 / height as f32,
            75.0_f32.to_radians(),
            0.1,
            50.0,
        );
        Self {
            view_proj: proj.to_homogeneous() * view,
            width,
            height,
        }
    }

    /// Projects a world position to pixel coordinates. Returns `None` for
    /// positions behind the camera or outside the depth range.
    pub fn project(&self, p: &Point3<f32>) -> Option<(i32, i32)> {
        let clip = self.view_proj * p.to_homogeneous();
        if clip.w <= 0.0 {
            return None;
        }
        let ndc = clip.xyz() / clip.w;
        if ndc.z < -1.0 || ndc.z > 1.0 {
            return None;
        }
        let x = (ndc.x + 1.0) * 0.5 * self.width as f32;
        let y = (1.0 - ndc.y) * 0.5 * self.height as f32;
        Some((x as i32, y as i32))
    }
}
