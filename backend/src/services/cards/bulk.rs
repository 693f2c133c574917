//! `POST /generate_bulk_pdfs`: validate the uploads, register a job and run
//! the per-row card loop on a blocking worker.
//!
//! The worker owns its inputs exclusively; the serving layer only reads
//! status and flips the cancellation flag. Per-row failures are logged and
//! skipped, never abort the batch. The worker reports its terminal status
//! explicitly, so a cancelled batch is never confused with a crashed one.

use actix_multipart::Multipart;
use actix_web::{web, HttpResponse, Responder};
use common::jobs::BatchStatus;
use common::model::CardRow;
use log::{error, info, warn};
use std::io::{Cursor, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;
use uuid::Uuid;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::card::lookup::{find_photo_in_zip, normalize_name};
use crate::card::text::FontSource;
use crate::card::{generate_card, CardError, CardRequest};
use crate::job_controller::state::{BatchJob, JobUpdate, JobsState};

use super::upload::read_bulk_form;

/// Progress report from the blocking worker: rows handled so far.
#[derive(Debug)]
struct BatchProgress {
    done: usize,
    total: usize,
}

/// What the worker produced: the finished output archive (partial when
/// cancelled) and whether cancellation was observed.
struct BatchOutcome {
    archive: Vec<u8>,
    cancelled: bool,
    generated: usize,
}

/// Inputs the worker owns for the whole batch.
struct BatchInput {
    rows: Vec<CardRow>,
    logo: Vec<u8>,
    photos_zip: Vec<u8>,
    name_color: String,
    quote_color: String,
}

pub(crate) async fn process(
    state: web::Data<JobsState>,
    font: web::Data<FontSource>,
    payload: Multipart,
) -> impl Responder {
    match schedule_bulk_job(state, font.into_inner(), payload).await {
        Ok(job_id) => HttpResponse::Ok().json(serde_json::json!({
            "message": "PDF generation started.",
            "job_id": job_id,
        })),
        Err(err @ CardError::Validation(_)) => {
            HttpResponse::BadRequest().json(serde_json::json!({ "error": err.to_string() }))
        }
        Err(err) => HttpResponse::InternalServerError()
            .json(serde_json::json!({ "error": err.to_string() })),
    }
}

/// Validate the form, register the job as running and spawn the worker. The
/// job ID is returned to the client immediately for status polling.
async fn schedule_bulk_job(
    state: web::Data<JobsState>,
    font: Arc<FontSource>,
    payload: Multipart,
) -> Result<String, CardError> {
    let form = read_bulk_form(payload).await?;
    let logo = form
        .logo
        .ok_or_else(|| CardError::Validation("No logo file provided".into()))?;
    let csv_bytes = form
        .csv
        .ok_or_else(|| CardError::Validation("No CSV file provided".into()))?;
    let photos_zip = form
        .photos_zip
        .ok_or_else(|| CardError::Validation("No ZIP file provided".into()))?;

    let rows = parse_rows(&csv_bytes)?;
    let input = BatchInput {
        rows,
        logo,
        photos_zip,
        name_color: form.name_color,
        quote_color: form.quote_color,
    };

    let job_id = Uuid::new_v4().to_string();
    let cancel = Arc::new(AtomicBool::new(false));
    state.jobs.write().await.insert(
        job_id.clone(),
        BatchJob {
            status: BatchStatus::Running { progress: 0 },
            cancel: cancel.clone(),
            archive: None,
        },
    );
    *state.latest.write().await = Some(job_id.clone());
    info!("bulk job {job_id} started with {} rows", input.rows.len());

    tokio::spawn(drive_batch(
        state.into_inner(),
        job_id.clone(),
        input,
        cancel,
        font,
    ));

    Ok(job_id)
}

/// Runs one batch to completion: spawns the blocking worker, forwards its
/// progress into the registry, stores the archive and reports the terminal
/// status. The terminal status is sent only after the progress forwarder has
/// drained, so a buffered `Running` update can never land on top of it.
async fn drive_batch(
    state: Arc<JobsState>,
    job_id: String,
    input: BatchInput,
    cancel: Arc<AtomicBool>,
    font: Arc<FontSource>,
) {
    let tx = state.tx.clone();
    let (progress_tx, mut progress_rx) = mpsc::channel::<BatchProgress>(100);

    // Translate worker progress into percentage updates for the registry.
    let progress_updater_tx = tx.clone();
    let job_id_for_progress = job_id.clone();
    let forwarder = tokio::spawn(async move {
        while let Some(progress) = progress_rx.recv().await {
            let percent = if progress.total > 0 {
                (progress.done as f32 / progress.total as f32 * 100.0) as u32
            } else {
                0
            };
            let _ = progress_updater_tx
                .send(JobUpdate::new(
                    job_id_for_progress.clone(),
                    BatchStatus::Running { progress: percent },
                ))
                .await;
        }
    });

    let worker_cancel = cancel.clone();
    let handle =
        tokio::task::spawn_blocking(move || run_batch(progress_tx, input, worker_cancel, font));

    let status = match handle.await {
        Ok(Ok(outcome)) => {
            info!(
                "bulk job {job_id} finished: {} cards, cancelled={}",
                outcome.generated, outcome.cancelled
            );
            let mut jobs = state.jobs.write().await;
            if let Some(job) = jobs.get_mut(&job_id) {
                job.archive = Some(outcome.archive);
            }
            if outcome.cancelled {
                BatchStatus::Cancelled
            } else {
                BatchStatus::Completed
            }
        }
        Ok(Err(e)) => {
            error!("bulk job {job_id} failed: {e}");
            BatchStatus::Error {
                message: e.to_string(),
            }
        }
        Err(e) => {
            error!("bulk job {job_id} worker panicked: {e}");
            BatchStatus::Error {
                message: format!("task join error: {e}"),
            }
        }
    };

    // The worker has dropped its sender by now; wait for the forwarder to
    // drain the channel before the terminal status goes out.
    let _ = forwarder.await;
    let _ = tx.send(JobUpdate::new(job_id, status)).await;
}

/// Parse CSV rows: `name` required, `quote` optional (missing values become
/// empty strings), rows with a blank name are skipped.
fn parse_rows(bytes: &[u8]) -> Result<Vec<CardRow>, CardError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(bytes);

    let mut rows = Vec::new();
    for result in reader.deserialize::<CardRow>() {
        let row = result?;
        if row.name.trim().is_empty() {
            continue;
        }
        rows.push(row);
    }
    Ok(rows)
}

/// The synchronous per-row loop, run via `spawn_blocking`. Checks the
/// cancellation flag between rows; rows already written stay in the archive.
fn run_batch(
    tx: mpsc::Sender<BatchProgress>,
    input: BatchInput,
    cancel: Arc<AtomicBool>,
    font: Arc<FontSource>,
) -> Result<BatchOutcome, CardError> {
    // Parsed here because the parsed face cannot leave this thread.
    let font = font.parse()?;
    let mut photos = ZipArchive::new(Cursor::new(input.photos_zip))?;
    let mut out = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    let total = input.rows.len();
    let mut cancelled = false;
    let mut generated = 0usize;

    for (i, row) in input.rows.iter().enumerate() {
        if cancel.load(Ordering::SeqCst) {
            cancelled = true;
            break;
        }

        let photo = find_photo_in_zip(&row.name, &mut photos);
        if photo.is_none() {
            warn!("no photo found for {:?} in the uploaded archive", row.name);
        }

        let req = CardRequest {
            name: &row.name,
            quote: &row.quote,
            logo: &input.logo,
            photo: photo.as_deref(),
            name_color: &input.name_color,
            quote_color: &input.quote_color,
        };
        match generate_card(&req, &font) {
            Ok(bytes) => {
                out.start_file(format!("{}.pdf", normalize_name(&row.name)), options)?;
                out.write_all(&bytes)?;
                generated += 1;
            }
            Err(e) => error!("failed to generate card for {:?}: {e}", row.name),
        }

        let _ = tx.blocking_send(BatchProgress {
            done: i + 1,
            total,
        });
    }

    let cursor = out.finish()?;
    Ok(BatchOutcome {
        archive: cursor.into_inner(),
        cancelled,
        generated,
    })
}
