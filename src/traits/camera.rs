use glam::{Mat4, Vec3};

/// Read-only camera pose handed to the host renderer
pub trait CameraView {
    /// Camera position in world space
    fn eye(&self) -> Vec3;

    /// Point the camera looks at
    fn target(&self) -> Vec3;

    /// Unit view direction; zero when eye and target coincide
    fn forward(&self) -> Vec3 {
        (self.target() - self.eye()).normalize_or_zero()
    }

    /// Right-handed view matrix
    fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye(), self.target(), Vec3::Y)
    }
}
