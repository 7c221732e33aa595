/// Direction of a swipe on another member's profile. Edges are recorded
/// append-only; the first action for a pair wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeAction {
    Like,
    Pass,
}

impl SwipeAction {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Like => "like",
            Self::Pass => "pass",
        }
    }

    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "like" => Some(Self::Like),
            "pass" => Some(Self::Pass),
            _ => None,
        }
    }
}
