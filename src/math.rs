// -- Column vector convention: a point is transformed as M * p, and a world-view-projection is
// -- P * V * W. Matrices go to constant buffers in nalgebra's column-major order, shaders
// -- are compiled with -Zpr so HLSL reads them back transposed and multiplies row vectors.

use glm::{Mat4, Vec3};

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct STransform {
    pub scale: Vec3,
    pub rotate: Vec3,
    pub translate: Vec3,
}

impl Default for STransform {
    fn default() -> Self {
        Self {
            scale: Vec3::new(1.0, 1.0, 1.0),
            rotate: Vec3::new(0.0, 0.0, 0.0),
            translate: Vec3::new(0.0, 0.0, 0.0),
        }
    }
}

impl STransform {
    pub fn new(scale: Vec3, rotate: Vec3, translate: Vec3) -> Self {
        Self {
            scale: scale,
            rotate: rotate,
            translate: translate,
        }
    }

    // -- scale, then rotate about x, y, z in that order, then translate
    pub fn as_mat4(&self) -> Mat4 {
        let mut result = glm::translation(&self.translate);
        result = glm::rotate_z(&result, self.rotate.z);
        result = glm::rotate_y(&result, self.rotate.y);
        result = glm::rotate_x(&result, self.rotate.x);
        glm::scale(&result, &self.scale)
    }
}

#[derive(Copy, Clone, Debug)]
pub struct SCamera {
    pub transform: STransform,
    pub fovy: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Default for SCamera {
    fn default() -> Self {
        Self {
            transform: STransform {
                translate: Vec3::new(0.0, 0.0, -5.0),
                ..STransform::default()
            },
            fovy: 0.45,
            znear: 0.1,
            zfar: 100.0,
        }
    }
}

impl SCamera {
    pub fn view_matrix(&self) -> Mat4 {
        glm::inverse(&self.transform.as_mat4())
    }

    // -- left handed, depth mapped to [0, 1]
    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        glm::perspective_lh_zo(aspect, self.fovy, self.znear, self.zfar)
    }
}

pub fn world_view_projection(world: &STransform, camera: &SCamera, aspect: f32) -> Mat4 {
    camera.projection_matrix(aspect) * camera.view_matrix() * world.as_mat4()
}

pub fn constant_data(m: &Mat4) -> [f32; 16] {
    let mut result = [0.0; 16];
    result.copy_from_slice(m.as_slice());
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_transform() {
        let m = STransform::default().as_mat4();
        assert_eq!(m, Mat4::identity());
    }

    #[test]
    fn test_transform_order() {
        let transform = STransform::new(
            Vec3::new(2.0, 2.0, 2.0),
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
        );
        let p = transform.as_mat4() * glm::vec4(1.0, 0.0, 0.0, 1.0);
        // -- scaled before translated
        assert_eq!(p, glm::vec4(3.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn test_wvp_bit_reproducible() {
        let world = STransform::new(
            Vec3::new(1.0, 1.0, 1.0),
            Vec3::new(0.1, 0.7, -0.3),
            Vec3::new(0.25, -0.5, 1.0),
        );
        let camera = SCamera::default();

        let a = constant_data(&world_view_projection(&world, &camera, 1280.0 / 720.0));
        let b = constant_data(&world_view_projection(&world, &camera, 1280.0 / 720.0));

        let abits: Vec<u32> = a.iter().map(|f| f.to_bits()).collect();
        let bbits: Vec<u32> = b.iter().map(|f| f.to_bits()).collect();
        assert_eq!(abits, bbits);
    }

    #[test]
    fn test_origin_lands_in_front_of_camera() {
        let camera = SCamera::default();
        let wvp = world_view_projection(&STransform::default(), &camera, 16.0 / 9.0);

        let clip = wvp * glm::vec4(0.0, 0.0, 0.0, 1.0);
        assert!((clip.w - 5.0).abs() < 1e-5);
        assert!(clip.x.abs() < 1e-5);
        assert!(clip.y.abs() < 1e-5);

        let depth = clip.z / clip.w;
        assert!(depth > 0.0 && depth < 1.0);
    }

    #[test]
    fn test_constant_data_is_column_major() {
        let m = glm::translation(&Vec3::new(1.0, 2.0, 3.0));
        let data = constant_data(&m);
        assert_eq!(&data[12..15], &[1.0, 2.0, 3.0]);
    }
}
