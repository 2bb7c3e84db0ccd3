//! Role-based route guard.

use std::collections::HashSet;

use crate::models::auth::{Role, Session};

/// What a host should do with a navigation attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    /// Render the protected content.
    Allow,
    /// No usable session - present the login screen.
    RedirectLogin,
    /// Authenticated, but the role is not allowed here.
    RedirectUnauthorized,
}

/// Decide whether the current session may view content restricted to
/// `allowed_roles`. `None` means any authenticated role may view.
///
/// Pure and synchronous; called once per navigation.
pub fn can_access(
    session: Option<&Session>,
    allowed_roles: Option<&HashSet<Role>>,
) -> AccessDecision {
    let Some(session) = session.filter(|s| s.has_access_token()) else {
        return AccessDecision::RedirectLogin;
    };

    match allowed_roles {
        None => AccessDecision::Allow,
        Some(roles) if roles.contains(&session.user.role) => AccessDecision::Allow,
        Some(_) => AccessDecision::RedirectUnauthorized,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::auth::UserProfile;

    fn session(role: Role) -> Session {
        Session::new(
            "acc".into(),
            "ref".into(),
            UserProfile {
                id: "u-1".into(),
                first_name: "Dana".into(),
                last_name: "Reyes".into(),
                role,
                email: None,
                phone: None,
                company: None,
            },
        )
    }

    fn roles(list: &[Role]) -> HashSet<Role> {
        list.iter().copied().collect()
    }

    #[test]
    fn test_no_session_redirects_to_login() {
        assert_eq!(can_access(None, None), AccessDecision::RedirectLogin);
        assert_eq!(
            can_access(None, Some(&roles(&[Role::SuperAdmin]))),
            AccessDecision::RedirectLogin
        );
    }

    #[test]
    fn test_session_without_access_token_redirects_to_login() {
        let mut s = session(Role::Exhibitor);
        s.access_token.clear();
        assert_eq!(can_access(Some(&s), None), AccessDecision::RedirectLogin);
    }

    #[test]
    fn test_role_not_allowed_redirects_to_unauthorized() {
        let s = session(Role::EndUser);
        assert_eq!(
            can_access(Some(&s), Some(&roles(&[Role::SuperAdmin]))),
            AccessDecision::RedirectUnauthorized
        );
    }

    #[test]
    fn test_matching_role_allowed() {
        let s = session(Role::Exhibitor);
        assert_eq!(
            can_access(Some(&s), Some(&roles(&[Role::Exhibitor]))),
            AccessDecision::Allow
        );
    }

    #[test]
    fn test_unrestricted_route_allows_any_authenticated_role() {
        let s = session(Role::TeamManager);
        assert_eq!(can_access(Some(&s), None), AccessDecision::Allow);
    }

    #[test]
    fn test_multiple_allowed_roles() {
        let s = session(Role::TeamManager);
        assert_eq!(
            can_access(Some(&s), Some(&roles(&[Role::Exhibitor, Role::TeamManager]))),
            AccessDecision::Allow
        );
    }

    #[test]
    fn test_empty_allowed_set_rejects_everyone() {
        let s = session(Role::SuperAdmin);
        assert_eq!(
            can_access(Some(&s), Some(&roles(&[]))),
            AccessDecision::RedirectUnauthorized
        );
    }
}
