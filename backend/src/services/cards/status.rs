//! `GET /check_bulk_pdfs_status`: poll a bulk job. Without a `job_id` query
//! parameter the most recent submission is reported.

use actix_web::{web, HttpResponse, Responder};
use common::jobs::BatchStatus;

use crate::job_controller::state::JobsState;

use super::JobQuery;

pub(crate) async fn process(
    state: web::Data<JobsState>,
    query: web::Query<JobQuery>,
) -> impl Responder {
    let Some(job_id) = state.resolve_job_id(query.into_inner().job_id).await else {
        return HttpResponse::Ok().json(BatchStatus::NotStarted);
    };

    let jobs = state.jobs.read().await;
    match jobs.get(&job_id) {
        Some(job) => HttpResponse::Ok().json(&job.status),
        None => HttpResponse::Ok().json(BatchStatus::NotStarted),
    }
}
