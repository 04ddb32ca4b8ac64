//! Generic admission dispatch.
//!
//! One code path decodes the review, runs the handler's defaulting and the
//! operation-appropriate validation, and renders the outcome. Defaulting
//! happens before validation so handlers always validate the fully-defaulted
//! object, and mutations travel back as a JSON patch computed against the
//! submitted object.

use axum::http::StatusCode;
use kube::core::admission::{AdmissionRequest, AdmissionResponse, AdmissionReview, Operation};
use kube::core::DynamicObject;
use tracing::{debug, info, warn};

use crate::store::ObjectStore;
use crate::webhooks::error::{AdmissionError, Warnings};
use crate::webhooks::handlers::AdmissionHandler;

/// Process one admission review through a handler.
///
/// An undecodable review is the only HTTP-level failure; every decided
/// request returns 200 with the verdict inside the review body.
pub async fn dispatch<H: AdmissionHandler>(
    handler: &H,
    store: &dyn ObjectStore,
    review: AdmissionReview<H::Object>,
) -> (StatusCode, AdmissionReview<DynamicObject>) {
    let request: AdmissionRequest<H::Object> = match review.try_into() {
        Ok(request) => request,
        Err(err) => {
            warn!(kind = H::KIND, error = %err, "undecodable admission review");
            return (
                StatusCode::BAD_REQUEST,
                AdmissionResponse::invalid(format!("invalid admission review: {err}")).into_review(),
            );
        }
    };

    debug!(
        kind = H::KIND,
        uid = %request.uid,
        operation = ?request.operation,
        namespace = ?request.namespace,
        name = %request.name,
        "processing admission request"
    );

    let response = AdmissionResponse::from(&request);
    match admit(handler, store, &request).await {
        Ok(outcome) => {
            info!(kind = H::KIND, uid = %request.uid, "admission request allowed");
            (StatusCode::OK, allow(response, outcome))
        }
        Err(err) => {
            warn!(
                kind = H::KIND,
                uid = %request.uid,
                code = err.code(),
                error = %err,
                "admission request denied"
            );
            (StatusCode::OK, deny(response, &err))
        }
    }
}

/// Outcome of an allowed request: warnings, plus a patch when defaulting
/// changed the object.
struct Admitted {
    warnings: Warnings,
    patch: Option<json_patch::Patch>,
}

async fn admit<H: AdmissionHandler>(
    handler: &H,
    store: &dyn ObjectStore,
    request: &AdmissionRequest<H::Object>,
) -> Result<Admitted, AdmissionError> {
    match request.operation {
        Operation::Create => {
            let submitted = required(request.object.as_ref(), "object")?;
            let (defaulted, patch) = run_default(handler, store, submitted).await?;
            let warnings = handler.validate_create(store, &defaulted).await?;
            Ok(Admitted { warnings, patch })
        }
        Operation::Update => {
            let submitted = required(request.object.as_ref(), "object")?;
            let old = required(request.old_object.as_ref(), "oldObject")?;
            let (defaulted, patch) = run_default(handler, store, submitted).await?;
            let warnings = handler.validate_update(store, old, &defaulted).await?;
            Ok(Admitted { warnings, patch })
        }
        Operation::Delete => {
            // The API server sends the object under deletion as oldObject.
            let old = required(request.old_object.as_ref().or(request.object.as_ref()), "oldObject")?;
            let warnings = handler.validate_delete(store, old).await?;
            Ok(Admitted {
                warnings,
                patch: None,
            })
        }
        Operation::Connect => Ok(Admitted {
            warnings: Vec::new(),
            patch: None,
        }),
    }
}

fn required<'a, T>(value: Option<&'a T>, field: &str) -> Result<&'a T, AdmissionError> {
    value.ok_or_else(|| AdmissionError::Structural(format!("request has no {field}")))
}

async fn run_default<H: AdmissionHandler>(
    handler: &H,
    store: &dyn ObjectStore,
    submitted: &H::Object,
) -> Result<(H::Object, Option<json_patch::Patch>), AdmissionError> {
    let mut defaulted = submitted.clone();
    handler.apply_defaults(store, &mut defaulted).await?;

    let before = serde_json::to_value(submitted).map_err(AdmissionError::internal)?;
    let after = serde_json::to_value(&defaulted).map_err(AdmissionError::internal)?;
    let patch = json_patch::diff(&before, &after);
    let patch = (!patch.0.is_empty()).then_some(patch);
    Ok((defaulted, patch))
}

fn allow(response: AdmissionResponse, outcome: Admitted) -> AdmissionReview<DynamicObject> {
    let mut response = match outcome.patch {
        Some(patch) => match response.clone().with_patch(patch) {
            Ok(patched) => patched,
            // A defaulted object that serialized once will serialize again;
            // dropping the patch keeps the request admissible regardless.
            Err(err) => {
                warn!(error = %err, "failed to attach defaulting patch");
                response
            }
        },
        None => response,
    };
    if !outcome.warnings.is_empty() {
        response.warnings = Some(outcome.warnings);
    }
    response.into_review()
}

fn deny(mut response: AdmissionResponse, err: &AdmissionError) -> AdmissionReview<DynamicObject> {
    response.allowed = false;
    response.result = err.to_status();
    response.into_review()
}
