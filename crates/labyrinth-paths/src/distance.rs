use labyrinth_core::Point;

/// Manhattan (taxicab) distance between two points: the length of the
/// shortest 4-connected path when nothing is in the way.
#[inline]
pub fn manhattan(a: Point, b: Point) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manhattan_is_symmetric() {
        let a = Point::new(0, 0);
        let b = Point::new(2, -3);
        assert_eq!(manhattan(a, b), 5);
        assert_eq!(manhattan(b, a), 5);
        assert_eq!(manhattan(a, a), 0);
    }
}
