//! Well-known role name constants.
//!
//! These must match the `ck_users_role` check constraint in the initial
//! migration and the realm roles configured in the identity provider.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_LANDLORD: &str = "landlord";
pub const ROLE_TENANT: &str = "tenant";

/// All roles a user row may carry.
pub const VALID_ROLES: &[&str] = &[ROLE_ADMIN, ROLE_LANDLORD, ROLE_TENANT];

/// Check whether a role name is one of [`VALID_ROLES`].
pub fn is_valid_role(role: &str) -> bool {
    VALID_ROLES.contains(&role)
}

/// Pick the most privileged known role out of a token's role list.
///
/// Unknown roles are ignored. Falls back to [`ROLE_TENANT`].
pub fn highest_role<S: AsRef<str>>(roles: &[S]) -> &'static str {
    let has = |name: &str| roles.iter().any(|r| r.as_ref() == name);
    if has(ROLE_ADMIN) {
        ROLE_ADMIN
    } else if has(ROLE_LANDLORD) {
        ROLE_LANDLORD
    } else {
        ROLE_TENANT
    }
}

/// Privilege rank of a role: tenant 0, landlord 1, admin 2. Unknown roles
/// rank with tenants.
pub fn role_rank(role: &str) -> u8 {
    match role {
        ROLE_ADMIN => 2,
        ROLE_LANDLORD => 1,
        _ => 0,
    }
}

/// True when `role` carries at least the privileges of `minimum`.
pub fn has_at_least(role: &str, minimum: &str) -> bool {
    role_rank(role) >= role_rank(minimum)
}
