/// Quadratic ease-in/ease-out: slow start, fast middle, slow end.
/// Input is clamped to [0, 1]; the curve passes exactly through 0, 0.5 and 1.
pub fn ease_in_out_quad(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        2.0 * t * t
    } else {
        let inv = -2.0 * t + 2.0;
        1.0 - inv * inv / 2.0
    }
}
