use glam::DVec3;

use super::AxisOrder;

/// Plane of constant `phi` through a spherical coordinate.
///
/// The plane contains both the point and the z-axis. It is stored as
/// `[nx, ny, nz, d]` with normal `n = p × ẑ` and `d = n · p` for the cartesian
/// point `p`. Points on the z-axis give a zero normal.
pub fn phi_normal_plane(native: [f64; 3], order: AxisOrder) -> [f64; 4] {
    let p = order.to_spherical(native).to_cartesian();
    let normal = p.cross(DVec3::Z);
    let d = normal.dot(p);
    [normal.x, normal.y, normal.z, d]
}

/// [`phi_normal_plane`] for a batch of native-ordered coordinates.
pub fn phi_normal_planes(native: &[[f64; 3]], order: AxisOrder) -> Vec<[f64; 4]> {
    native.iter().map(|&c| phi_normal_plane(c, order)).collect()
}

/// Single-precision [`phi_normal_planes`], ready for upload as a vertex attribute.
pub fn phi_normal_planes_f32(native: &[[f64; 3]], order: AxisOrder) -> Vec<[f32; 4]> {
    native
        .iter()
        .map(|&c| phi_normal_plane(c, order).map(|v| v as f32))
        .collect()
}
