//! Who may see which training material.
//!
//! Kept free of HTTP types so the rules can be exercised directly.

pub const ADMIN_ROLE: &str = "admin";

pub fn is_admin(role: &str) -> bool {
    role == ADMIN_ROLE
}

/// What the caller is asking to see.
#[derive(Debug, Clone, Copy)]
pub enum Resource<'a> {
    /// The full list of trainings.
    Collection,
    /// A single training, given the roles it is shared with.
    Training(&'a [String]),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny,
    /// Only trainings shared with this exact role.
    Filtered(String),
}

/// Admins see everything. Any other role sees a training only when that role
/// is listed on it; membership is exact, there is no role hierarchy.
pub fn authorize(role: &str, resource: Resource<'_>) -> Decision {
    if is_admin(role) {
        return Decision::Allow;
    }

    match resource {
        Resource::Collection => Decision::Filtered(role.to_string()),
        Resource::Training(roles) if roles.iter().any(|r| r == role) => Decision::Allow,
        Resource::Training(_) => Decision::Deny,
    }
}
