//! 几何数学工具模块
//!
//! 平面着色（flat shading）所需的面法线计算。

use super::Vector3;

/// 计算三角形的面法线
///
/// `normalize(cross(p1 - p0, p2 - p0))`，结果的方向由顶点顺序（绕序）决定：
/// 交换 `p1` 与 `p2` 会得到相反的法线。
///
/// 面积为零的三角形叉积为零向量，归一化后得到 NaN 分量。
/// 这里不做修正，调用方可用 [`is_degenerate`] 检查。
///
/// # 示例
///
/// ```rust
/// use dist_model::math::geometry::face_normal;
///
/// let n = face_normal([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
/// assert_eq!(n, [0.0, 0.0, 1.0]);
/// ```
pub fn face_normal(p0: [f32; 3], p1: [f32; 3], p2: [f32; 3]) -> [f32; 3] {
    let a = Vector3::from(p0);
    let edge1 = Vector3::from(p1) - a;
    let edge2 = Vector3::from(p2) - a;

    let cross = edge1.cross(&edge2);
    let n = cross / cross.norm();
    [n.x, n.y, n.z]
}

/// 法线是否来自面积为零的三角形
pub fn is_degenerate(normal: &[f32; 3]) -> bool {
    normal.iter().any(|c| !c.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: [f32; 3], b: [f32; 3]) {
        for i in 0..3 {
            assert!((a[i] - b[i]).abs() < 1e-5, "{:?} != {:?}", a, b);
        }
    }

    #[test]
    fn test_face_normal_ccw() {
        let n = face_normal([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
        assert_close(n, [0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_face_normal_winding_flips_sign() {
        let a = [0.3, -1.0, 2.0];
        let b = [4.0, 0.5, -1.0];
        let c = [-2.0, 3.0, 0.25];

        let abc = face_normal(a, b, c);
        let acb = face_normal(a, c, b);
        assert_close(abc, [-acb[0], -acb[1], -acb[2]]);
    }

    #[test]
    fn test_face_normal_is_unit_length() {
        let n = face_normal([0.0, 0.0, 0.0], [10.0, 0.0, 0.0], [0.0, 0.0, -5.0]);
        let len = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
        assert!((len - 1.0).abs() < 1e-5);
        assert_close(n, [0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_degenerate_triangle_yields_nan() {
        let n = face_normal([1.0, 1.0, 1.0], [2.0, 2.0, 2.0], [3.0, 3.0, 3.0]);
        assert!(is_degenerate(&n));
        assert!(n.iter().all(|c| c.is_nan()));
    }
}
