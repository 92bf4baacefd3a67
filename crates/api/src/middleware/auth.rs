//! JWT-based authentication extractor.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use yam_core::error::CoreError;
use yam_core::roles::{is_staff, ROLE_ADMIN};
use yam_core::types::DbId;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated caller extracted from `Authorization: Bearer <token>`.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: DbId,
    pub role: String,
    /// Set for buyer portal accounts.
    pub acquereur_id: Option<DbId>,
    /// Set for partner portal accounts.
    pub partenaire_id: Option<DbId>,
}

impl AuthUser {
    pub fn is_staff(&self) -> bool {
        is_staff(&self.role)
    }

    pub fn is_admin(&self) -> bool {
        self.role == ROLE_ADMIN
    }

    /// Staff, or the buyer themself, or the partner who brought the buyer.
    pub fn ensure_acquereur_access(
        &self,
        acquereur_id: DbId,
        buyer_partenaire_id: Option<DbId>,
    ) -> Result<(), AppError> {
        if self.is_staff() || self.acquereur_id == Some(acquereur_id) {
            return Ok(());
        }
        if self.partenaire_id.is_some() && self.partenaire_id == buyer_partenaire_id {
            return Ok(());
        }
        Err(AppError::forbidden("Access to this acquéreur is not allowed"))
    }

    /// Staff, or the partner themself.
    pub fn ensure_partenaire_access(&self, partenaire_id: DbId) -> Result<(), AppError> {
        if self.is_staff() || self.partenaire_id == Some(partenaire_id) {
            Ok(())
        } else {
            Err(AppError::forbidden("Access to this partenaire is not allowed"))
        }
    }
}

/// Parse and validate the bearer token of a request.
pub(crate) fn authenticate(parts: &Parts, state: &AppState) -> Result<AuthUser, AppError> {
    let auth_header = parts
        .headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Missing Authorization header".into(),
            ))
        })?;

    let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        AppError::Core(CoreError::Unauthorized(
            "Invalid Authorization format. Expected: Bearer <token>".into(),
        ))
    })?;

    user_from_token(token, state)
}

/// Validate a raw token (also used by the WebSocket upgrade, which passes
/// it as a query parameter).
pub(crate) fn user_from_token(token: &str, state: &AppState) -> Result<AuthUser, AppError> {
    let claims = validate_token(token, &state.config.jwt).map_err(|_| {
        AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
    })?;

    Ok(AuthUser {
        user_id: claims.sub,
        role: claims.role,
        acquereur_id: claims.acquereur_id,
        partenaire_id: claims.partenaire_id,
    })
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        authenticate(parts, state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: &str, acquereur_id: Option<DbId>, partenaire_id: Option<DbId>) -> AuthUser {
        AuthUser {
            user_id: 1,
            role: role.to_string(),
            acquereur_id,
            partenaire_id,
        }
    }

    #[test]
    fn staff_reach_every_record() {
        let staff = user("commercial", None, None);
        assert!(staff.ensure_acquereur_access(5, None).is_ok());
        assert!(staff.ensure_partenaire_access(9).is_ok());
    }

    #[test]
    fn buyers_reach_only_themselves() {
        let buyer = user("acquereur", Some(5), None);
        assert!(buyer.ensure_acquereur_access(5, None).is_ok());
        assert!(buyer.ensure_acquereur_access(6, None).is_err());
        assert!(buyer.ensure_partenaire_access(9).is_err());
    }

    #[test]
    fn partners_reach_their_buyers() {
        let partner = user("partenaire", None, Some(9));
        assert!(partner.ensure_partenaire_access(9).is_ok());
        assert!(partner.ensure_acquereur_access(5, Some(9)).is_ok());
        assert!(partner.ensure_acquereur_access(5, Some(10)).is_err());
        assert!(partner.ensure_acquereur_access(5, None).is_err());
    }
}
