// SPDX-FileCopyrightText: 2026 Redline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Geometric predicates for coordinate-based frame matching.

use redline_core::{BoundingBox, Point};

/// True iff `point` lies inside `bounds`, edges included.
pub fn contains(bounds: &BoundingBox, point: Point) -> bool {
    bounds.x <= point.x
        && point.x <= bounds.x + bounds.width
        && bounds.y <= point.y
        && point.y <= bounds.y + bounds.height
}

pub fn area(bounds: &BoundingBox) -> f64 {
    bounds.width * bounds.height
}

/// A box can only win a coordinate match if it encloses a positive area.
///
/// Zero, negative, and non-finite extents are rejected so they can never be
/// picked as the "smallest" enclosing container.
pub fn is_matchable(bounds: &BoundingBox) -> bool {
    let a = area(bounds);
    a.is_finite() && a > 0.0 && bounds.width > 0.0 && bounds.height > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn corners_are_inside() {
        let b = BoundingBox::new(10.0, 20.0, 100.0, 50.0);
        assert!(contains(&b, Point::new(10.0, 20.0)));
        assert!(contains(&b, Point::new(110.0, 70.0)));
        assert!(contains(&b, Point::new(110.0, 20.0)));
        assert!(contains(&b, Point::new(10.0, 70.0)));
    }

    #[test]
    fn just_outside_is_outside() {
        let b = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
        assert!(!contains(&b, Point::new(-0.01, 5.0)));
        assert!(!contains(&b, Point::new(5.0, 10.01)));
    }

    #[test]
    fn degenerate_boxes_are_not_matchable() {
        assert!(!is_matchable(&BoundingBox::new(0.0, 0.0, 0.0, 10.0)));
        assert!(!is_matchable(&BoundingBox::new(0.0, 0.0, -5.0, -5.0)));
        assert!(!is_matchable(&BoundingBox::new(0.0, 0.0, f64::NAN, 1.0)));
        assert!(!is_matchable(&BoundingBox::new(0.0, 0.0, f64::INFINITY, 1.0)));
        assert!(is_matchable(&BoundingBox::new(0.0, 0.0, 1.0, 1.0)));
    }

    proptest! {
        #[test]
        fn every_point_of_the_closed_box_is_inside(
            x in -1.0e4f64..1.0e4,
            y in -1.0e4f64..1.0e4,
            w in 0.0f64..1.0e3,
            h in 0.0f64..1.0e3,
            fx in 0.0f64..=1.0,
            fy in 0.0f64..=1.0,
        ) {
            let b = BoundingBox::new(x, y, w, h);
            // Edges use the exact sums the predicate compares against.
            let px = if fx == 1.0 { x + w } else { x + w * fx };
            let py = if fy == 1.0 { y + h } else { y + h * fy };
            prop_assume!(px <= x + w && py <= y + h);
            prop_assert!(contains(&b, Point::new(px, py)));
        }

        #[test]
        fn area_is_width_times_height(w in 0.0f64..1.0e3, h in 0.0f64..1.0e3) {
            let b = BoundingBox::new(3.0, 4.0, w, h);
            prop_assert_eq!(area(&b), w * h);
        }
    }
}
