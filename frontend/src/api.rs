//! HTTP calls made by the workbench.
//!
//! Two targets: the analysis backend (its base URL comes from the resolved
//! config and is passed in explicitly) and the same-origin routes served by
//! our own server (accounts, quota, saved analyses). Every call returns an
//! `ApiError` on failure; callers turn it into a toast and restore the UI.

use common::config::BackendConfig;
use common::error::{describe_failure, ANALYSIS_FAILED, UPLOAD_FAILED};
use common::model::analysis::AnalysisResult;
use common::model::file_info::{FileInfo, UploadResponse};
use common::model::record::{AnalysisRecord, AnalysisRecordInput};
use common::model::report::ReportJob;
use common::model::user::SessionUser;
use common::requests::{
    LoginRequest, RegisterRequest, SaveAnalysisResponse, UpdateRequestsResponse,
};
use common::workflow::manual::ManualAnalysisRequest;
use common::workflow::predict::{PredictRequest, PredictResponse};
use common::workflow::report::{PollOutcome, ReportPoller, ReportRequest};
use common::workflow::upload::AnalyzeDataForm;
use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use thiserror::Error;
use wasm_bindgen::JsValue;
use web_sys::{File, FormData};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("Could not reach the server: {0}")]
    Network(String),

    #[error("{message}")]
    Status { status: u16, message: String },

    #[error("Unexpected response: {0}")]
    Decode(String),

    /// The backend answered but refused the input, e.g. an upload with
    /// `success: false`.
    #[error("{0}")]
    Rejected(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<gloo_net::Error> for ApiError {
    fn from(e: gloo_net::Error) -> Self {
        ApiError::Network(e.to_string())
    }
}

fn js_error(e: JsValue) -> ApiError {
    ApiError::Network(format!("{:?}", e))
}

async fn failure(resp: Response, fallback: &str) -> ApiError {
    let body = resp.text().await.unwrap_or_default();
    ApiError::Status {
        status: resp.status(),
        message: describe_failure(&body, fallback),
    }
}

async fn read_json<T: DeserializeOwned>(resp: Response, fallback: &str) -> Result<T, ApiError> {
    if !resp.ok() {
        return Err(failure(resp, fallback).await);
    }
    resp.json::<T>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

fn form_with_file(file: &File) -> Result<FormData, ApiError> {
    let form = FormData::new().map_err(js_error)?;
    form.append_with_blob_and_filename("file", file, &file.name())
        .map_err(js_error)?;
    Ok(form)
}

// ---- analysis backend ----

pub async fn upload_file(backend: &BackendConfig, file: &File) -> Result<FileInfo, ApiError> {
    let form = form_with_file(file)?;
    let resp = Request::post(&backend.endpoint("upload-file"))
        .body(form)?
        .send()
        .await?;
    let upload: UploadResponse = read_json(resp, UPLOAD_FAILED).await?;
    upload.into_file_info().map_err(ApiError::Rejected)
}

pub async fn analyze_data(
    backend: &BackendConfig,
    file: &File,
    form: &AnalyzeDataForm,
) -> Result<AnalysisResult, ApiError> {
    let data = form_with_file(file)?;
    for (name, value) in form.form_fields() {
        data.append_with_str(name, &value).map_err(js_error)?;
    }
    let resp = Request::post(&backend.endpoint("analyze-data"))
        .body(data)?
        .send()
        .await?;
    read_json(resp, ANALYSIS_FAILED).await
}

pub async fn analyze_manual(
    backend: &BackendConfig,
    request: &ManualAnalysisRequest,
) -> Result<AnalysisResult, ApiError> {
    let resp = Request::post(&backend.endpoint("analyze-manual"))
        .json(request)?
        .send()
        .await?;
    read_json(resp, ANALYSIS_FAILED).await
}

pub async fn predict(
    backend: &BackendConfig,
    request: &PredictRequest,
) -> Result<PredictResponse, ApiError> {
    let resp = Request::post(&backend.endpoint("predict"))
        .json(request)?
        .send()
        .await?;
    let response: PredictResponse = read_json(resp, "Failed to make prediction").await?;
    if !response.success {
        return Err(ApiError::Rejected("Failed to make prediction".into()));
    }
    Ok(response)
}

pub async fn generate_report(
    backend: &BackendConfig,
    request: &ReportRequest,
) -> Result<ReportJob, ApiError> {
    let form = FormData::new().map_err(js_error)?;
    let fields = request
        .form_fields()
        .map_err(|e| ApiError::Decode(e.to_string()))?;
    for (name, value) in fields {
        form.append_with_str(name, &value).map_err(js_error)?;
    }
    let resp = Request::post(&backend.endpoint("generate-pdf"))
        .body(form)?
        .send()
        .await?;
    read_json(resp, "Failed to generate PDF report").await
}

/// Polls the download URL of a report job until the PDF is ready, then
/// returns its bytes. Gives up after the poller's attempt budget.
pub async fn download_report(backend: &BackendConfig, job: &ReportJob) -> Result<Vec<u8>, ApiError> {
    let url = backend.endpoint(&job.download_path());
    let mut poller = ReportPoller::default();
    loop {
        let resp = Request::get(&url).send().await?;
        let status = resp.status();
        let outcome = if resp.ok() && status != 202 {
            PollOutcome::Ready
        } else {
            let body = resp.text().await.unwrap_or_default();
            poller.observe(status, &describe_failure(&body, "Failed to download report"))
        };

        match outcome {
            PollOutcome::Ready => {
                return resp
                    .binary()
                    .await
                    .map_err(|e| ApiError::Decode(e.to_string()));
            }
            PollOutcome::Retry { after_ms } => {
                gloo_timers::future::TimeoutFuture::new(after_ms).await;
            }
            PollOutcome::TimedOut => {
                return Err(ApiError::Rejected(format!(
                    "The report was not ready after {} attempts",
                    poller.attempts()
                )));
            }
            PollOutcome::Failed(message) => {
                return Err(ApiError::Status { status, message });
            }
        }
    }
}

// ---- same-origin routes ----

pub async fn register(request: &RegisterRequest) -> Result<(), ApiError> {
    let resp = Request::post("/api/auth/register")
        .json(request)?
        .send()
        .await?;
    if resp.ok() {
        Ok(())
    } else {
        Err(failure(resp, "Something went wrong while registering!").await)
    }
}

pub async fn login(request: &LoginRequest) -> Result<SessionUser, ApiError> {
    let resp = Request::post("/api/auth/login").json(request)?.send().await?;
    read_json(resp, "Sign in failed").await
}

pub async fn logout() -> Result<(), ApiError> {
    let resp = Request::post("/api/auth/logout").send().await?;
    if resp.ok() {
        Ok(())
    } else {
        Err(failure(resp, "Sign out failed").await)
    }
}

/// `None` when nobody is signed in.
pub async fn fetch_session() -> Result<Option<SessionUser>, ApiError> {
    let resp = Request::get("/api/auth/session").send().await?;
    if resp.status() == 401 {
        return Ok(None);
    }
    read_json(resp, "Could not load the session").await.map(Some)
}

/// Counts one analysis against the signed-in account. A 429 means the
/// allowance is used up and the analysis must not be sent.
pub async fn reserve_request() -> Result<UpdateRequestsResponse, ApiError> {
    let resp = Request::post("/api/user/update-requests").send().await?;
    read_json(resp, "Could not update the request count").await
}

/// Hands back a request reserved for an analysis that then failed.
pub async fn release_request() -> Result<UpdateRequestsResponse, ApiError> {
    let resp = Request::post("/api/user/release-request").send().await?;
    read_json(resp, "Could not release the request").await
}

pub async fn save_analysis(record: &AnalysisRecordInput) -> Result<SaveAnalysisResponse, ApiError> {
    let resp = Request::post("/api/analysis/save")
        .json(record)?
        .send()
        .await?;
    read_json(resp, "Could not save the analysis").await
}

pub async fn fetch_history() -> Result<Vec<AnalysisRecord>, ApiError> {
    let resp = Request::get("/api/analysis/history").send().await?;
    read_json(resp, "Could not load the analysis history").await
}
