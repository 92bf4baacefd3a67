//! Transactional email triggers.
//!
//! Each endpoint renders one template per recipient and hands the batch to
//! [`send_all`], which attempts every address. Partial failure still
//! answers 200 with the tallies.

use axum::extract::State;
use axum::Json;
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use yam_core::birthday::{birthday_keys, is_birthday};
use yam_core::milestone::MilestoneStatus;
use yam_core::templates::{BIRTHDAY, OPTION_EXPIRING, OPTION_PLACED, WORKFLOW_UPDATE};
use yam_core::types::{DbId, Timestamp};
use yam_db::repositories::{AcquereurRepo, LotOptionRepo, LotRepo, MilestoneRepo, UserRepo};
use yam_events::{send_all, FanoutReport, OutgoingEmail};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::cron::CronCaller;
use crate::middleware::rbac::RequireStaff;
use crate::response::SuccessResponse;
use crate::state::AppState;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionNotificationKind {
    /// Tell staff and the holding partner that a lot was put on hold.
    #[default]
    Placed,
    /// Remind the holding partner before the option lapses.
    Expiring,
}

#[derive(Debug, Deserialize)]
pub struct OptionNotificationRequest {
    pub option_id: DbId,
    #[serde(default)]
    pub kind: OptionNotificationKind,
}

#[derive(Debug, Deserialize)]
pub struct WorkflowNotificationRequest {
    pub milestone_id: DbId,
}

#[derive(Debug, Serialize)]
pub struct BirthdayReport {
    pub date: NaiveDate,
    #[serde(flatten)]
    pub report: FanoutReport,
}

fn format_date(ts: Timestamp) -> String {
    ts.format("%d/%m/%Y %H:%M").to_string()
}

fn status_label(status: MilestoneStatus) -> &'static str {
    match status {
        MilestoneStatus::Pending => "en attente",
        MilestoneStatus::Validated => "validée",
        MilestoneStatus::Completed => "terminée",
    }
}

/// Drop blank and repeated addresses, keeping first-seen order.
fn dedup_recipients(addresses: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for address in addresses {
        let address = address.trim().to_lowercase();
        if !address.is_empty() && !out.contains(&address) {
            out.push(address);
        }
    }
    out
}

/// POST /functions/send-option-notification
pub async fn send_option_notification(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<OptionNotificationRequest>,
) -> AppResult<Json<SuccessResponse<FanoutReport>>> {
    let details = LotOptionRepo::find_details(&state.pool, input.option_id)
        .await?
        .ok_or_else(|| AppError::not_found("LotOption", input.option_id))?;
    let own_option = auth.partenaire_id.is_some() && details.partenaire_id == auth.partenaire_id;
    if !auth.is_staff() && !own_option {
        return Err(AppError::forbidden("This option belongs to another partner"));
    }

    let vars = json!({
        "lot_reference": details.lot_reference,
        "residence": details.residence_nom,
        "partenaire": details.partenaire_nom.as_deref().unwrap_or("un partenaire"),
        "expires_at": format_date(details.expires_at),
    });

    let (template, recipients) = match input.kind {
        OptionNotificationKind::Placed => {
            let staff = UserRepo::list_staff_emails(&state.pool).await?;
            (
                OPTION_PLACED,
                dedup_recipients(staff.into_iter().chain(details.partenaire_email.clone())),
            )
        }
        OptionNotificationKind::Expiring => (
            OPTION_EXPIRING,
            dedup_recipients(details.partenaire_email.clone()),
        ),
    };

    let rendered = template.render(&vars);
    let emails: Vec<OutgoingEmail> = recipients
        .into_iter()
        .map(|to| OutgoingEmail::new(to, rendered.clone()))
        .collect();

    let report = send_all(state.mailer.as_ref(), &emails).await;
    tracing::info!(
        option_id = details.id,
        kind = ?input.kind,
        sent = report.sent,
        failed = report.failed,
        "Option notification sent"
    );
    Ok(Json(SuccessResponse::new(report)))
}

/// POST /functions/send-workflow-notification
///
/// Tells the buyer about the current state of one milestone step. A buyer
/// without an email address yields an empty report.
pub async fn send_workflow_notification(
    RequireStaff(_): RequireStaff,
    State(state): State<AppState>,
    Json(input): Json<WorkflowNotificationRequest>,
) -> AppResult<Json<SuccessResponse<FanoutReport>>> {
    let step = MilestoneRepo::find_by_id(&state.pool, input.milestone_id)
        .await?
        .ok_or_else(|| AppError::not_found("MilestoneStep", input.milestone_id))?;
    let acquereur = AcquereurRepo::find_by_id(&state.pool, step.acquereur_id)
        .await?
        .ok_or_else(|| AppError::not_found("Acquereur", step.acquereur_id))?;
    let lot = LotRepo::find_by_id(&state.pool, step.lot_id)
        .await?
        .ok_or_else(|| AppError::not_found("Lot", step.lot_id))?;

    let note = step
        .notes
        .as_deref()
        .filter(|n| !n.trim().is_empty())
        .map(|n| format!("Note : {n}"))
        .unwrap_or_default();
    let rendered = WORKFLOW_UPDATE.render(&json!({
        "prenom": acquereur.prenom,
        "step": step.label,
        "lot_reference": lot.reference,
        "status": status_label(step.parsed_status()),
        "note": note,
    }));

    let emails: Vec<OutgoingEmail> = dedup_recipients(acquereur.email.clone())
        .into_iter()
        .map(|to| OutgoingEmail::new(to, rendered.clone()))
        .collect();
    if emails.is_empty() {
        tracing::info!(acquereur_id = acquereur.id, "Workflow notification skipped, no email");
    }

    let report = send_all(state.mailer.as_ref(), &emails).await;
    tracing::info!(
        milestone_id = step.id,
        sent = report.sent,
        failed = report.failed,
        "Workflow notification sent"
    );
    Ok(Json(SuccessResponse::new(report)))
}

/// POST /functions/send-birthday-emails
///
/// Greets every buyer whose birthday is today (UTC).
pub async fn send_birthday_emails(
    caller: CronCaller,
    State(state): State<AppState>,
) -> AppResult<Json<SuccessResponse<BirthdayReport>>> {
    let today = Utc::now().date_naive();
    let candidates = AcquereurRepo::list_birthdays(&state.pool, &birthday_keys(today)).await?;

    let emails: Vec<OutgoingEmail> = candidates
        .iter()
        .filter(|a| a.date_naissance.is_some_and(|dob| is_birthday(dob, today)))
        .filter_map(|a| {
            let to = a.email.clone()?;
            Some(OutgoingEmail::new(to, BIRTHDAY.render(&json!({ "prenom": a.prenom }))))
        })
        .collect();

    let report = send_all(state.mailer.as_ref(), &emails).await;
    tracing::info!(
        ?caller,
        %today,
        sent = report.sent,
        failed = report.failed,
        "Birthday emails sent"
    );
    Ok(Json(SuccessResponse::new(BirthdayReport {
        date: today,
        report,
    })))
}
