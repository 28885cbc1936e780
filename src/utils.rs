/// a x b
pub fn cross(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [a[1] * b[2] - a[2] * b[1],
     a[2] * b[0] - a[0] * b[2],
     a[0] * b[1] - a[1] * b[0]]
}

/// Row vector times matrix, v . M
pub fn dot(v: [f64; 3], m: [[f64; 3]; 3]) -> [f64; 3] {
    [0, 1, 2].map(|i| v[0] * m[0][i] + v[1] * m[1][i] + v[2] * m[2][i])
}

/// a . b
pub fn vdot(a: [f64; 3], b: [f64; 3]) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

/// a - b
pub fn subtract(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

/// Signed determinant of a 3x3 matrix, a . (b x c)
pub fn determinant(m: &[[f64; 3]; 3]) -> f64 {
    vdot(m[0], cross(m[1], m[2]))
}

/// Relative tolerance used when comparing lattices read from different files.
pub const RTOL: f64 = 1e-5;
/// Absolute tolerance used when comparing lattices read from different files.
pub const ATOL: f64 = 1e-8;

/// element-wise comparison of two matrices, |a - b| <= ATOL + RTOL * |b|
pub fn all_close(a: &[[f64; 3]; 3], b: &[[f64; 3]; 3]) -> bool {
    a.iter()
     .flatten()
     .zip(b.iter().flatten())
     .all(|(a, b)| (a - b).abs() <= ATOL + RTOL * b.abs())
}
