use std::f64::consts::PI;

/// Linear map from `domain` onto `range`; a zero-width domain maps to the
/// middle of the range.
pub fn scale(value: f64, domain: (f64, f64), range: (f64, f64)) -> f64 {
    let span = domain.1 - domain.0;
    if span == 0.0 {
        return (range.0 + range.1) / 2.0;
    }
    range.0 + (value - domain.0) / span * (range.1 - range.0)
}

/// Point on a circle; angle 0 points up and grows clockwise.
pub fn polar(cx: f64, cy: f64, radius: f64, angle: f64) -> (f64, f64) {
    (cx + radius * angle.sin(), cy - radius * angle.cos())
}

/// Path of a ring segment between two angles. An `inner` of zero gives a
/// pie wedge. Full turns are shortened slightly so the arc still draws.
pub fn arc_path(cx: f64, cy: f64, outer: f64, inner: f64, start: f64, end: f64) -> String {
    let end = if end - start >= 2.0 * PI { start + 2.0 * PI - 1e-4 } else { end };
    let large = if end - start > PI { 1 } else { 0 };
    let (ox1, oy1) = polar(cx, cy, outer, start);
    let (ox2, oy2) = polar(cx, cy, outer, end);
    if inner <= 0.0 {
        return format!(
            "M {cx:.2} {cy:.2} L {ox1:.2} {oy1:.2} A {outer:.2} {outer:.2} 0 {large} 1 {ox2:.2} {oy2:.2} Z"
        );
    }
    let (ix1, iy1) = polar(cx, cy, inner, end);
    let (ix2, iy2) = polar(cx, cy, inner, start);
    format!(
        "M {ox1:.2} {oy1:.2} A {outer:.2} {outer:.2} 0 {large} 1 {ox2:.2} {oy2:.2} \
         L {ix1:.2} {iy1:.2} A {inner:.2} {inner:.2} 0 {large} 0 {ix2:.2} {iy2:.2} Z"
    )
}

/// About `count` evenly spaced tick values across `min..=max`.
pub fn ticks(min: f64, max: f64, count: usize) -> Vec<f64> {
    if count < 2 || max <= min {
        return vec![min];
    }
    let step = (max - min) / (count - 1) as f64;
    (0..count).map(|i| min + step * i as f64).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_maps_and_handles_flat_domains() {
        assert_eq!(scale(5.0, (0.0, 10.0), (0.0, 100.0)), 50.0);
        assert_eq!(scale(0.0, (0.0, 10.0), (200.0, 0.0)), 200.0);
        assert_eq!(scale(3.0, (3.0, 3.0), (0.0, 100.0)), 50.0);
    }

    #[test]
    fn wedges_start_at_the_center() {
        let path = arc_path(100.0, 100.0, 50.0, 0.0, 0.0, PI / 2.0);
        assert!(path.starts_with("M 100.00 100.00 L 100.00 50.00"));
        assert!(path.ends_with("150.00 100.00 Z"));
    }

    #[test]
    fn ticks_cover_the_range() {
        assert_eq!(ticks(0.0, 100.0, 5), vec![0.0, 25.0, 50.0, 75.0, 100.0]);
        assert_eq!(ticks(2.0, 2.0, 5), vec![2.0]);
    }
}
