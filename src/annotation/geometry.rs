use eframe::egui::Pos2;

/// Shortest pixel distance from `p` to the segment `a`-`b`.
pub(crate) fn distance_to_segment(p: Pos2, a: Pos2, b: Pos2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_sq();
    if len_sq <= f32::EPSILON {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use eframe::egui::pos2;

    #[test]
    fn perpendicular_distance_inside_the_segment() {
        let d = distance_to_segment(pos2(5.0, 3.0), pos2(0.0, 0.0), pos2(10.0, 0.0));
        assert_eq!(d, 3.0);
    }

    #[test]
    fn distance_past_an_end_is_to_the_endpoint() {
        let d = distance_to_segment(pos2(13.0, 4.0), pos2(0.0, 0.0), pos2(10.0, 0.0));
        assert_eq!(d, 5.0);
    }

    #[test]
    fn zero_length_segment_is_a_point() {
        let d = distance_to_segment(pos2(3.0, 4.0), pos2(0.0, 0.0), pos2(0.0, 0.0));
        assert_eq!(d, 5.0);
    }
}
