//! Book sides.

use serde::{Deserialize, Serialize};

/// Which side of a book an order sits on. A Bid buys outcome shares for
/// Points; an Ask sells outcome shares for Points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Side {
    Bid,
    Ask,
}

impl Side {
    /// The side an incoming order matches against.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Bid => Self::Ask,
            Self::Ask => Self::Bid,
        }
    }

    /// Whether orders on this side pay Points (true) or deliver shares.
    #[must_use]
    pub fn is_bid(self) -> bool {
        self == Self::Bid
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bid => write!(f, "BID"),
            Self::Ask => write!(f, "ASK"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_flips() {
        assert_eq!(Side::Bid.opposite(), Side::Ask);
        assert_eq!(Side::Ask.opposite(), Side::Bid);
    }

    #[test]
    fn side_display() {
        assert_eq!(format!("{}", Side::Bid), "BID");
        assert_eq!(format!("{}", Side::Ask), "ASK");
    }
}
