//! Card generation endpoints.
//!
//! Routes:
//! - `POST /generate_pdf`: render a single card and return the PDF.
//! - `POST /generate_bulk_pdfs`: start a background batch from CSV + photo
//!   ZIP; responds immediately with the job ID.
//! - `GET /check_bulk_pdfs_status`: poll the batch status.
//! - `POST /cancel`: request cooperative cancellation of a batch.
//! - `GET /download_zip`: fetch the batch output archive.
//!
//! The batch endpoints accept an optional `job_id` query parameter and
//! default to the most recent submission.

use actix_web::web::{get, post, scope};
use actix_web::Scope;
use serde::Deserialize;

mod bulk;
mod cancel;
mod download;
mod single;
mod status;
pub mod upload;

/// Optional job targeting for the batch endpoints.
#[derive(Debug, Deserialize)]
pub struct JobQuery {
    pub job_id: Option<String>,
}

/// Configures and returns the Actix `Scope` for all card routes.
pub fn configure_routes() -> Scope {
    scope("")
        .route("/generate_pdf", post().to(single::process))
        .route("/generate_bulk_pdfs", post().to(bulk::process))
        .route("/check_bulk_pdfs_status", get().to(status::process))
        .route("/cancel", post().to(cancel::process))
        .route("/download_zip", get().to(download::process))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::job_controller::state::{BatchJob, JobsState};
    use actix_web::{test, web, App};
    use common::jobs::BatchStatus;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    macro_rules! app_with {
        ($state:expr) => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new($state))
                    .service(configure_routes()),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn status_is_not_started_before_any_job() {
        let (state, _rx) = JobsState::new();
        let app = app_with!(state);

        let req = test::TestRequest::get()
            .uri("/check_bulk_pdfs_status")
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body, serde_json::json!({"status": "not_started"}));
    }

    #[actix_web::test]
    async fn status_reports_a_registered_job() {
        let (state, _rx) = JobsState::new();
        state.jobs.write().await.insert(
            "job-1".into(),
            BatchJob {
                status: BatchStatus::Running { progress: 50 },
                cancel: Arc::new(AtomicBool::new(false)),
                archive: None,
            },
        );
        *state.latest.write().await = Some("job-1".into());
        let app = app_with!(state);

        let req = test::TestRequest::get()
            .uri("/check_bulk_pdfs_status")
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body, serde_json::json!({"status": "running", "progress": 50}));

        let req = test::TestRequest::get()
            .uri("/check_bulk_pdfs_status?job_id=unknown")
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body, serde_json::json!({"status": "not_started"}));
    }

    #[actix_web::test]
    async fn cancel_is_idempotent_and_safe_without_a_job() {
        let (state, _rx) = JobsState::new();
        let app = app_with!(state.clone());

        let req = test::TestRequest::post().uri("/cancel").to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());

        let cancel = Arc::new(AtomicBool::new(false));
        state.jobs.write().await.insert(
            "job-1".into(),
            BatchJob {
                status: BatchStatus::Running { progress: 0 },
                cancel: cancel.clone(),
                archive: None,
            },
        );
        *state.latest.write().await = Some("job-1".into());

        for _ in 0..2 {
            let req = test::TestRequest::post().uri("/cancel").to_request();
            let resp = test::call_service(&app, req).await;
            assert!(resp.status().is_success());
        }
        assert!(cancel.load(Ordering::SeqCst));
    }

    #[actix_web::test]
    async fn download_is_404_until_an_archive_exists() {
        let (state, _rx) = JobsState::new();
        let app = app_with!(state.clone());

        let req = test::TestRequest::get().uri("/download_zip").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::NOT_FOUND);

        state.jobs.write().await.insert(
            "job-1".into(),
            BatchJob {
                status: BatchStatus::Completed,
                cancel: Arc::new(AtomicBool::new(false)),
                archive: Some(b"PK\x05\x06zip".to_vec()),
            },
        );
        *state.latest.write().await = Some("job-1".into());

        let req = test::TestRequest::get().uri("/download_zip").to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());
        let body = test::read_body(resp).await;
        assert!(body.starts_with(b"PK"));
    }
}
