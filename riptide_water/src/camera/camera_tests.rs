use glam::{Vec3, Vec4};
use super::*;

const EPS: f32 = 1e-4;

fn assert_vec3_near(a: Vec3, b: Vec3) {
    assert!((a - b).length() < EPS, "{:?} != {:?}", a, b);
}

// ============================================================================
// Construction
// ============================================================================

#[test]
fn test_camera_new_default_lens() {
    let camera = Camera::new(Vec3::new(1.0, 2.0, 3.0), 0.5, -0.25);
    assert_eq!(camera.position, Vec3::new(1.0, 2.0, 3.0));
    assert_eq!(camera.yaw, 0.5);
    assert_eq!(camera.pitch, -0.25);
    assert_eq!(camera.fov_y, std::f32::consts::FRAC_PI_4);
    assert!(camera.near < camera.far);
}

#[test]
fn test_looking_at_origin_from_above() {
    let camera = Camera::looking_at(Vec3::new(0.0, 5.0, 10.0), Vec3::ZERO);
    let expected_dir = Vec3::new(0.0, -5.0, -10.0).normalize();

    assert_vec3_near(camera.front(), expected_dir);
    assert!(camera.pitch < 0.0);
}

#[test]
fn test_view_matrix_maps_eye_to_origin() {
    let camera = Camera::looking_at(Vec3::new(0.0, 5.0, 10.0), Vec3::ZERO);
    let eye = camera.view_matrix() * Vec4::new(0.0, 5.0, 10.0, 1.0);
    assert_vec3_near(eye.truncate(), Vec3::ZERO);
}

#[test]
fn test_view_matrix_looks_down_negative_z() {
    let camera = Camera::looking_at(Vec3::new(0.0, 5.0, 10.0), Vec3::ZERO);
    let target = camera.view_matrix() * Vec4::new(0.0, 0.0, 0.0, 1.0);
    // In a right-handed view space the target lies on -Z
    assert!(target.z < 0.0);
    assert!(target.x.abs() < EPS);
    assert!(target.y.abs() < EPS);
}

// ============================================================================
// Mirroring
// ============================================================================

#[test]
fn test_mirrored_across_zero_height() {
    let camera = Camera::looking_at(Vec3::new(0.0, 5.0, 10.0), Vec3::ZERO);
    let mirrored = camera.mirrored(0.0);

    assert_vec3_near(mirrored.position, Vec3::new(0.0, -5.0, 10.0));
    assert!((mirrored.pitch + camera.pitch).abs() < EPS);
    assert_eq!(mirrored.yaw, camera.yaw);
}

#[test]
fn test_mirrored_across_raised_plane() {
    let camera = Camera::new(Vec3::new(3.0, 7.0, -2.0), 1.0, 0.3);
    let mirrored = camera.mirrored(2.0);

    assert_vec3_near(mirrored.position, Vec3::new(3.0, -3.0, -2.0));
    assert_eq!(mirrored.pitch, -0.3);
}

#[test]
fn test_mirroring_is_an_involution() {
    let heights = [-12.5_f32, -1.0, 0.0, 0.75, 4.0, 100.0];
    let cameras = [
        Camera::new(Vec3::new(0.0, 5.0, 10.0), -1.2, -0.46),
        Camera::new(Vec3::new(-40.0, 0.01, 3.0), 2.9, 0.8),
        Camera::new(Vec3::new(8.0, -6.0, 1.5), 0.0, 1.2),
        Camera::new(Vec3::new(1e3, 250.0, -1e3), -3.0, -1.4),
    ];

    for camera in cameras {
        for height in heights {
            if camera.position.y == height {
                continue;
            }
            let twice = camera.mirrored(height).mirrored(height);
            assert!((twice.position - camera.position).length() < 1e-3,
                "position drifted for height {}", height);
            assert!((twice.pitch - camera.pitch).abs() < EPS);
            assert_eq!(twice.yaw, camera.yaw);
        }
    }
}

#[test]
fn test_mirrored_front_is_reflected_direction() {
    let camera = Camera::new(Vec3::new(0.0, 4.0, 0.0), 0.7, -0.5);
    let front = camera.front();
    let mirrored_front = camera.mirrored(1.0).front();

    assert_vec3_near(mirrored_front, Vec3::new(front.x, -front.y, front.z));
}

#[test]
fn test_height_above() {
    let camera = Camera::new(Vec3::new(0.0, 5.0, 0.0), 0.0, 0.0);
    assert_eq!(camera.height_above(2.0), 3.0);
    assert_eq!(camera.height_above(8.0), -3.0);
}

// ============================================================================
// RenderView
// ============================================================================

#[test]
fn test_render_view_snapshot() {
    let camera = Camera::looking_at(Vec3::new(0.0, 5.0, 10.0), Vec3::ZERO);
    let view = camera.render_view(16.0 / 9.0);

    assert_eq!(view.eye(), camera.position);
    assert_eq!(*view.view_matrix(), camera.view_matrix());
    assert_eq!(*view.projection_matrix(), camera.projection_matrix(16.0 / 9.0));
    assert_eq!(view.view_projection_matrix(),
        camera.projection_matrix(16.0 / 9.0) * camera.view_matrix());
}
