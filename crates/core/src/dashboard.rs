//! Sales dashboard aggregation.
//!
//! Pure functions over lots already loaded by the caller. Amounts are
//! integer cents; commission rates are basis points (1/100 of a percent).

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::CoreError;
use crate::lot::LotStatus;
use crate::types::DbId;

/// Minimal view of a lot needed for aggregation.
#[derive(Debug, Clone)]
pub struct LotFigures {
    pub status: LotStatus,
    pub price_cents: i64,
    pub partenaire_id: Option<DbId>,
}

/// Minimal view of a partner needed for commission computation.
#[derive(Debug, Clone)]
pub struct PartnerRate {
    pub id: DbId,
    pub name: String,
    pub commission_bps: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub disponible: usize,
    pub option: usize,
    pub reserve: usize,
    pub vendu: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PartnerCommission {
    pub partenaire_id: DbId,
    pub name: String,
    pub lots_committed: usize,
    pub revenue_cents: i64,
    pub commission_cents: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SalesSummary {
    pub total_lots: usize,
    pub by_status: StatusCounts,
    /// Sum of prices of reserved and sold lots.
    pub revenue_cents: i64,
    /// Sorted by commission, highest first.
    pub partners: Vec<PartnerCommission>,
}

/// Commission owed on `price_cents` at `bps` basis points, rounded down.
///
/// The product is taken in `i128`; a result outside `i64` saturates.
pub fn commission_cents(price_cents: i64, bps: i32) -> i64 {
    let owed = i128::from(price_cents) * i128::from(bps) / 10_000;
    i64::try_from(owed).unwrap_or(if owed < 0 { i64::MIN } else { i64::MAX })
}

fn overflow() -> CoreError {
    CoreError::Internal("Sales totals exceed the representable range".into())
}

/// Aggregate lot figures into a [`SalesSummary`].
///
/// Only committed lots (reserved or sold) earn commission. Lots referencing
/// a partner absent from `partners` are counted in the totals only. Fails
/// instead of wrapping when a revenue sum leaves the `i64` range.
pub fn summarize(
    lots: &[LotFigures],
    partners: &[PartnerRate],
) -> Result<SalesSummary, CoreError> {
    let mut by_status = StatusCounts::default();
    let mut revenue_cents = 0i64;
    let mut per_partner: BTreeMap<DbId, (usize, i64)> = BTreeMap::new();

    for lot in lots {
        match lot.status {
            LotStatus::Disponible => by_status.disponible += 1,
            LotStatus::Option => by_status.option += 1,
            LotStatus::Reserve => by_status.reserve += 1,
            LotStatus::Vendu => by_status.vendu += 1,
        }

        if !lot.status.is_committed() {
            continue;
        }
        revenue_cents = revenue_cents
            .checked_add(lot.price_cents)
            .ok_or_else(overflow)?;

        if let Some(pid) = lot.partenaire_id {
            let entry = per_partner.entry(pid).or_default();
            entry.0 += 1;
            entry.1 = entry.1.checked_add(lot.price_cents).ok_or_else(overflow)?;
        }
    }

    let mut partners: Vec<PartnerCommission> = partners
        .iter()
        .filter_map(|p| {
            per_partner.get(&p.id).map(|(count, revenue)| PartnerCommission {
                partenaire_id: p.id,
                name: p.name.clone(),
                lots_committed: *count,
                revenue_cents: *revenue,
                commission_cents: commission_cents(*revenue, p.commission_bps),
            })
        })
        .collect();

    partners.sort_by(|a, b| {
        b.commission_cents
            .cmp(&a.commission_cents)
            .then(a.partenaire_id.cmp(&b.partenaire_id))
    });

    Ok(SalesSummary {
        total_lots: lots.len(),
        by_status,
        revenue_cents,
        partners,
    })
}
