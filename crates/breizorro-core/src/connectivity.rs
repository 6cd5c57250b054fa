//! Pixel connectivity

/// Adjacency between pixels of a 2-D grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectivityType {
    /// Horizontal and vertical neighbors only (the cross)
    #[default]
    FourWay,
    /// Horizontal, vertical and diagonal neighbors (the 3x3 square)
    EightWay,
}

const FOUR_WAY: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

const EIGHT_WAY: [(i32, i32); 8] = [
    (-1, 0),
    (1, 0),
    (0, -1),
    (0, 1),
    (-1, -1),
    (1, -1),
    (-1, 1),
    (1, 1),
];

impl ConnectivityType {
    /// Neighbor offsets `(dx, dy)`, origin excluded
    pub fn offsets(self) -> &'static [(i32, i32)] {
        match self {
            ConnectivityType::FourWay => &FOUR_WAY,
            ConnectivityType::EightWay => &EIGHT_WAY,
        }
    }

    /// Number of neighbors (4 or 8)
    pub fn neighbor_count(self) -> usize {
        self.offsets().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offsets() {
        assert_eq!(ConnectivityType::FourWay.neighbor_count(), 4);
        assert_eq!(ConnectivityType::EightWay.neighbor_count(), 8);
        assert!(
            ConnectivityType::FourWay
                .offsets()
                .iter()
                .all(|&(dx, dy)| dx.abs() + dy.abs() == 1)
        );
    }

    #[test]
    fn test_default_is_four_way() {
        assert_eq!(ConnectivityType::default(), ConnectivityType::FourWay);
    }
}
