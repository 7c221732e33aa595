use crate::domain::message::Message;
use crate::domain::user::Profile;
use crate::error::{AppError, Result};
use time::OffsetDateTime;
use uuid::Uuid;

/// An unordered pair of user ids stored canonically, smaller id first, so
/// `(A, B)` and `(B, A)` always address the same match row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchPair {
    user_a: Uuid,
    user_b: Uuid,
}

impl MatchPair {
    /// Builds the canonical pair. Rejects a pair of one user with itself.
    pub fn new(one: Uuid, other: Uuid) -> Result<Self> {
        if one == other {
            return Err(AppError::BadRequest("Cannot pair a user with themselves".to_string()));
        }
        if one < other {
            Ok(Self { user_a: one, user_b: other })
        } else {
            Ok(Self { user_a: other, user_b: one })
        }
    }

    #[must_use]
    pub const fn user_a(self) -> Uuid {
        self.user_a
    }

    #[must_use]
    pub const fn user_b(self) -> Uuid {
        self.user_b
    }
}

/// How a match came to exist: mutual swipes, or a unilateral expression of
/// interest in a date idea.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    Swipe,
    Date,
}

impl MatchKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Swipe => "swipe",
            Self::Date => "date",
        }
    }

    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "swipe" => Some(Self::Swipe),
            "date" => Some(Self::Date),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Match {
    pub id: Uuid,
    pub user_a: Uuid,
    pub user_b: Uuid,
    pub kind: MatchKind,
    pub date_idea_id: Option<Uuid>,
    pub date_author_id: Option<Uuid>,
    pub interest_expires_at: Option<OffsetDateTime>,
    pub created_at: Option<OffsetDateTime>,
}

impl Match {
    #[must_use]
    pub fn involves(&self, user_id: Uuid) -> bool {
        self.user_a == user_id || self.user_b == user_id
    }

    /// The participant that is not `user_id`, or `None` if `user_id` is not
    /// part of this match.
    #[must_use]
    pub fn other_participant(&self, user_id: Uuid) -> Option<Uuid> {
        if self.user_a == user_id {
            Some(self.user_b)
        } else if self.user_b == user_id {
            Some(self.user_a)
        } else {
            None
        }
    }

    /// Whether the reply window of a date-type match has passed. Swipe matches
    /// never expire, and a cleared window never comes back.
    #[must_use]
    pub fn is_expired_at(&self, now: OffsetDateTime) -> bool {
        self.interest_expires_at.is_some_and(|expires_at| expires_at < now)
    }
}

/// A match joined with everything a participant needs to render it: the other
/// member's profile and the message thread.
#[derive(Debug, Clone)]
pub struct MatchDetails {
    pub id: Uuid,
    pub kind: MatchKind,
    pub other: Profile,
    pub messages: Vec<Message>,
    pub date_idea_id: Option<Uuid>,
    pub date_author_id: Option<Uuid>,
    pub interest_expires_at: Option<OffsetDateTime>,
    pub created_at: Option<OffsetDateTime>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::Duration;

    fn fixed_pair() -> (Uuid, Uuid) {
        let low = Uuid::parse_str("00000000-0000-0000-0000-000000000001").unwrap();
        let high = Uuid::parse_str("ffffffff-ffff-ffff-ffff-fffffffffffe").unwrap();
        (low, high)
    }

    fn match_with_expiry(expires_at: Option<OffsetDateTime>) -> Match {
        let (a, b) = fixed_pair();
        Match {
            id: Uuid::new_v4(),
            user_a: a,
            user_b: b,
            kind: MatchKind::Date,
            date_idea_id: Some(Uuid::new_v4()),
            date_author_id: Some(a),
            interest_expires_at: expires_at,
            created_at: None,
        }
    }

    #[test]
    fn test_pair_is_canonical_regardless_of_order() {
        let (low, high) = fixed_pair();
        let forward = MatchPair::new(low, high).unwrap();
        let reverse = MatchPair::new(high, low).unwrap();

        assert_eq!(forward, reverse);
        assert_eq!(forward.user_a(), low);
        assert_eq!(forward.user_b(), high);
    }

    #[test]
    fn test_pair_rejects_self() {
        let id = Uuid::new_v4();
        assert!(matches!(MatchPair::new(id, id), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_other_participant() {
        let (a, b) = fixed_pair();
        let m = match_with_expiry(None);

        assert_eq!(m.other_participant(a), Some(b));
        assert_eq!(m.other_participant(b), Some(a));
        assert_eq!(m.other_participant(Uuid::new_v4()), None);
        assert!(m.involves(a) && m.involves(b));
    }

    #[test]
    fn test_expiry_window() {
        let now = OffsetDateTime::now_utc();

        let open = match_with_expiry(Some(now + Duration::days(1)));
        assert!(!open.is_expired_at(now));

        let lapsed = match_with_expiry(Some(now - Duration::minutes(1)));
        assert!(lapsed.is_expired_at(now));

        let cleared = match_with_expiry(None);
        assert!(!cleared.is_expired_at(now));
    }

    #[test]
    fn test_kind_parse() {
        assert_eq!(MatchKind::parse("swipe"), Some(MatchKind::Swipe));
        assert_eq!(MatchKind::parse("date"), Some(MatchKind::Date));
        assert_eq!(MatchKind::parse("friend"), None);
        assert_eq!(MatchKind::Swipe.as_str(), "swipe");
    }
}
