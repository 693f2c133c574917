//! `POST /cancel`: ask the targeted bulk job to stop after its current row.
//! Idempotent; a no-op when nothing is running.

use actix_web::{web, HttpResponse, Responder};
use log::info;
use std::sync::atomic::Ordering;

use crate::job_controller::state::JobsState;

use super::JobQuery;

pub(crate) async fn process(
    state: web::Data<JobsState>,
    query: web::Query<JobQuery>,
) -> impl Responder {
    if let Some(job_id) = state.resolve_job_id(query.into_inner().job_id).await {
        let jobs = state.jobs.read().await;
        if let Some(job) = jobs.get(&job_id) {
            job.cancel.store(true, Ordering::SeqCst);
            info!("cancellation requested for bulk job {job_id}");
        }
    }
    HttpResponse::Ok().json(serde_json::json!({ "message": "Cancellation requested." }))
}
