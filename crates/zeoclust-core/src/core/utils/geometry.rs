use nalgebra::{Point3, Vector3};

/// Displacement that carries `from` onto `to`.
pub fn anchor_vector(from: &Point3<f64>, to: &Point3<f64>) -> Vector3<f64> {
    to - from
}

/// Rigidly translates every point by `offset`.
pub fn translate_all<'a>(
    points: impl IntoIterator<Item = &'a Point3<f64>>,
    offset: &Vector3<f64>,
) -> Vec<Point3<f64>> {
    points.into_iter().map(|p| p + offset).collect()
}
