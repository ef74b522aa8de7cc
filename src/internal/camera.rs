use std::f32::consts::FRAC_PI_2;

use cgmath::{perspective, Deg, Matrix4, Point3, Rad, Vector3};

const SAFE_FRAC_PI_2: f32 = FRAC_PI_2 - 0.0001;

/// Orbit camera: yaw/pitch/distance around a target point.
pub struct Camera {
    pub target: Point3<f32>,
    yaw: Rad<f32>,
    pitch: Rad<f32>,
    distance: f32,
    pub fov: Deg<f32>,
    znear: f32,
    zfar: f32,
}

impl Camera {
    pub fn new(target: Point3<f32>, distance: f32) -> Self {
        Self {
            target,
            yaw: Rad(-FRAC_PI_2),
            pitch: Rad(0.4),
            distance,
            fov: Deg(45.0),
            znear: 0.1,
            zfar: 400.0,
        }
    }

    pub fn position(&self) -> Point3<f32> {
        let (pitch_sin, pitch_cos) = self.pitch.0.sin_cos();
        let (yaw_sin, yaw_cos) = self.yaw.0.sin_cos();
        let offset = Vector3::new(pitch_cos * yaw_cos, pitch_sin, pitch_cos * yaw_sin);
        self.target + offset * self.distance
    }

    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(self.position(), self.target, Vector3::unit_y())
    }

    pub fn projection_matrix(&self, aspect_ratio: f32) -> Matrix4<f32> {
        perspective(self.fov, aspect_ratio, self.znear, self.zfar)
    }

    pub fn orbit(&mut self, delta_x: f32, delta_y: f32) {
        self.yaw += Rad(delta_x);
        self.pitch += Rad(delta_y);
        if self.pitch.0 > SAFE_FRAC_PI_2 {
            self.pitch.0 = SAFE_FRAC_PI_2;
        } else if self.pitch.0 < -SAFE_FRAC_PI_2 {
            self.pitch.0 = -SAFE_FRAC_PI_2;
        }
    }

    pub fn zoom(&mut self, delta: f32) {
        self.distance = (self.distance - delta).clamp(0.5, 100.0);
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }
}
