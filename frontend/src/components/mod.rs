pub mod auth;
pub mod manual;
pub mod results;
pub mod upload;

use crate::api::{self, ApiError};
use crate::helpers::show_toast;
use common::config::{BackendConfig, Limits};
use common::model::analysis::AnalysisResult;
use common::model::record::AnalysisSource;
pub use common::quota::Reservation;
use common::requests::UpdateRequestsResponse;
use yew::{Callback, Properties};

/// Properties shared by the two input panels (file upload and manual entry).
#[derive(Properties, PartialEq, Clone)]
pub struct InputPanelProps {
    pub backend: BackendConfig,
    pub limits: Limits,
    /// Signed-in users reserve a request before each analysis.
    pub signed_in: bool,
    pub on_analyzed: Callback<AnalysisOutcome>,
    pub on_quota: Callback<UpdateRequestsResponse>,
}

/// A finished analysis and what it was computed from.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisOutcome {
    pub result: AnalysisResult,
    pub source: AnalysisSource,
}

/// Reserves one request for a signed-in user. On `Refused` the user has
/// already been told why.
pub async fn reserve_request(signed_in: bool) -> Reservation {
    if !signed_in {
        return Reservation::Anonymous;
    }
    match api::reserve_request().await {
        Ok(counted) => Reservation::Counted(counted),
        Err(e) if e.status() == Some(429) => {
            show_toast(
                "Request limit reached",
                "You have used all free analyses. Upgrade to premium to continue.",
            );
            Reservation::Refused
        }
        Err(e) => {
            report_failure("Error", &e);
            Reservation::Refused
        }
    }
}

/// Gives a counted request back when its analysis failed, so the failure
/// does not cost the user an analysis.
pub async fn settle_reservation(
    reservation: &Reservation,
    analysis_succeeded: bool,
    on_quota: &Callback<UpdateRequestsResponse>,
) {
    if !reservation.must_release(analysis_succeeded) {
        return;
    }
    match api::release_request().await {
        Ok(released) => on_quota.emit(released),
        Err(e) => gloo_console::error!(format!("Could not release the request: {:?}", e)),
    }
}

pub fn report_failure(title: &str, error: &ApiError) {
    gloo_console::error!(format!("{}: {:?}", title, error));
    show_toast(title, &error.to_string());
}
