//! `GET /download_zip`: the accumulated output archive of a bulk job,
//! including partial archives left behind by a cancelled run.

use actix_web::{web, HttpResponse, Responder};

use crate::job_controller::state::JobsState;

use super::JobQuery;

pub(crate) async fn process(
    state: web::Data<JobsState>,
    query: web::Query<JobQuery>,
) -> impl Responder {
    let not_found =
        || HttpResponse::NotFound().json(serde_json::json!({ "error": "ZIP file not found" }));

    let Some(job_id) = state.resolve_job_id(query.into_inner().job_id).await else {
        return not_found();
    };

    let jobs = state.jobs.read().await;
    match jobs.get(&job_id).and_then(|job| job.archive.as_ref()) {
        Some(archive) => HttpResponse::Ok()
            .content_type("application/zip")
            .insert_header((
                "Content-Disposition",
                "attachment; filename=\"generated_pdfs.zip\"",
            ))
            .body(archive.clone()),
        None => not_found(),
    }
}
