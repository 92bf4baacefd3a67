//! Handler for the sales dashboard.

use axum::extract::State;
use axum::Json;
use yam_core::dashboard::{summarize, LotFigures, PartnerRate, SalesSummary};
use yam_core::lot::LotStatus;
use yam_db::models::lot::LotFilter;
use yam_db::repositories::{LotRepo, PartenaireRepo};

use crate::error::AppResult;
use crate::middleware::rbac::RequireStaff;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/dashboard/sales
pub async fn sales(
    RequireStaff(_): RequireStaff,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<SalesSummary>>> {
    let lots = LotRepo::list_filtered(&state.pool, &LotFilter::default()).await?;
    let partners = PartenaireRepo::list(&state.pool).await?;

    let figures: Vec<LotFigures> = lots
        .iter()
        .filter_map(|lot| match LotStatus::from_str_value(&lot.statut) {
            Ok(status) => Some(LotFigures {
                status,
                price_cents: lot.prix_cents,
                partenaire_id: lot.partenaire_id,
            }),
            Err(e) => {
                tracing::warn!(lot_id = lot.id, error = %e, "Skipping lot with unknown status");
                None
            }
        })
        .collect();

    let rates: Vec<PartnerRate> = partners
        .into_iter()
        .map(|p| PartnerRate {
            id: p.id,
            name: p.nom,
            commission_bps: p.commission_bps,
        })
        .collect();

    Ok(Json(DataResponse {
        data: summarize(&figures, &rates)?,
    }))
}
