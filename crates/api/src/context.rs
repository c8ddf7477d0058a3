use bazaar_auth::Principal;

/// Principal context for a request (authenticated identity + role).
///
/// Inserted by the auth middleware; immutable and present for all
/// protected routes.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PrincipalContext {
    principal: Principal,
}

impl PrincipalContext {
    pub fn new(principal: Principal) -> Self {
        Self { principal }
    }

    pub fn principal(&self) -> &Principal {
        &self.principal
    }
}
