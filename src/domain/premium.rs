use time::OffsetDateTime;
use uuid::Uuid;

/// A premium entitlement row. The stored flag can lag reality between sweeper
/// runs, so reads must go through `is_effective_at`.
#[derive(Debug, Clone)]
pub struct PremiumGrant {
    pub user_id: Uuid,
    pub is_premium: bool,
    pub expires_at: Option<OffsetDateTime>,
    pub updated_at: Option<OffsetDateTime>,
}

impl PremiumGrant {
    /// Whether the entitlement is live at `now`. A grant without an expiry
    /// never lapses.
    #[must_use]
    pub fn is_effective_at(&self, now: OffsetDateTime) -> bool {
        self.is_premium && self.expires_at.is_none_or(|expires_at| expires_at > now)
    }
}

/// What the status endpoint reports. Computed from the grant at read time, so
/// it never shows a lapsed entitlement as premium.
#[derive(Debug, Clone, Copy)]
pub struct PremiumStatus {
    pub is_premium: bool,
    pub expires_at: Option<OffsetDateTime>,
}

impl PremiumStatus {
    #[must_use]
    pub fn from_grant(grant: Option<&PremiumGrant>, now: OffsetDateTime) -> Self {
        match grant {
            Some(grant) if grant.is_effective_at(now) => {
                Self { is_premium: true, expires_at: grant.expires_at }
            }
            _ => Self { is_premium: false, expires_at: None },
        }
    }
}
