use std::fmt;

/// Collection holding one profile document per user, keyed by uid.
pub const PROFILE_COLLECTION: &str = "users";

/// Field through which auxiliary records reference their owner.
pub const USER_ID_FIELD: &str = "userId";

/// Collections swept for records that reference a deleted user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuxiliaryCollection {
    Favorites,
    Reviews,
    Wishlists,
    RecentlyViewed,
    Notifications,
}

impl AuxiliaryCollection {
    /// Sweep order. Later collections are untouched when an earlier one fails.
    pub const ALL: [AuxiliaryCollection; 5] = [
        AuxiliaryCollection::Favorites,
        AuxiliaryCollection::Reviews,
        AuxiliaryCollection::Wishlists,
        AuxiliaryCollection::RecentlyViewed,
        AuxiliaryCollection::Notifications,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            AuxiliaryCollection::Favorites => "favorites",
            AuxiliaryCollection::Reviews => "reviews",
            AuxiliaryCollection::Wishlists => "wishlists",
            AuxiliaryCollection::RecentlyViewed => "recently_viewed",
            AuxiliaryCollection::Notifications => "notifications",
        }
    }
}

impl fmt::Display for AuxiliaryCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sweep_order_is_fixed() {
        let names: Vec<&str> = AuxiliaryCollection::ALL
            .iter()
            .map(|c| c.as_str())
            .collect();
        assert_eq!(
            names,
            [
                "favorites",
                "reviews",
                "wishlists",
                "recently_viewed",
                "notifications"
            ]
        );
    }
}
