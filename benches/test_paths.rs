use polybool64::clip::Path64;
use polybool64::core::math::Point64;

/// Star shaped polygon with `vertex_count` vertices alternating between two
/// radii, producing a heavily zig-zagged boundary.
pub fn star(vertex_count: usize, cx: i64, cy: i64) -> Path64 {
    let mut result = Path64::with_capacity(vertex_count);
    for i in 0..vertex_count {
        let angle = i as f64 * std::f64::consts::TAU / vertex_count as f64;
        let radius = if i % 2 == 0 { 1000.0 } else { 400.0 };
        result.push(Point64::new(
            cx + (radius * angle.cos()) as i64,
            cy + (radius * angle.sin()) as i64,
        ));
    }
    result
}
