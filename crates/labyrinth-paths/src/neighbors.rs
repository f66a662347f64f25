use labyrinth_core::Point;

/// Cardinal expansion order: down, up, right, left.
pub const CARDINAL: [Point; 4] = [
    Point::new(0, 1),
    Point::new(0, -1),
    Point::new(1, 0),
    Point::new(-1, 0),
];

/// Append the 4-directional neighbours of `p` for which `keep` returns
/// `true` to `buf`, in [`CARDINAL`] order.
///
/// This is the building block for [`Pather`](crate::Pather) impls on
/// 4-connected grids.
#[inline]
pub fn push_cardinal(p: Point, buf: &mut Vec<Point>, keep: impl Fn(Point) -> bool) {
    for d in CARDINAL {
        let n = p + d;
        if keep(n) {
            buf.push(n);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cardinal_order_is_down_up_right_left() {
        let mut buf = Vec::new();
        push_cardinal(Point::new(5, 5), &mut buf, |_| true);
        assert_eq!(
            buf,
            vec![
                Point::new(5, 6),
                Point::new(5, 4),
                Point::new(6, 5),
                Point::new(4, 5),
            ]
        );
    }

    #[test]
    fn cardinal_filters_and_appends() {
        let mut buf = vec![Point::new(9, 9)];
        push_cardinal(Point::new(0, 0), &mut buf, |p| p.x >= 0 && p.y >= 0);
        assert_eq!(buf, vec![Point::new(9, 9), Point::new(0, 1), Point::new(1, 0)]);
    }
}
