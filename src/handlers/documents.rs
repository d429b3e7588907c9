use actix_web::http::header::{self, ContentDisposition, DispositionParam, DispositionType};
use actix_web::{web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::domain::document::{format_file_size, Document, UploadedFile};
use crate::errors::AppError;
use crate::AppState;

const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Serialize, ToSchema)]
pub struct DocumentResponse {
    pub id: Uuid,
    pub master_order_id: String,
    pub file_name: String,
    pub file_path: String,
    pub file_type: String,
    pub file_size: i64,
    /// Human readable size, e.g. "1.5 KB".
    pub display_size: String,
    pub created_at: String,
}

impl From<Document> for DocumentResponse {
    fn from(doc: Document) -> Self {
        DocumentResponse {
            display_size: format_file_size(doc.file_size),
            created_at: doc.created_at.to_rfc3339(),
            id: doc.id,
            master_order_id: doc.master_order_id,
            file_name: doc.file_name,
            file_path: doc.file_path,
            file_type: doc.file_type,
            file_size: doc.file_size,
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UploadParams {
    /// Original name of the uploaded file.
    pub file_name: String,
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// GET /master-orders/{order_id}/documents
///
/// Lists the documents attached to a master order, newest first.
#[utoipa::path(
    get,
    path = "/master-orders/{order_id}/documents",
    params(
        ("order_id" = String, Path, description = "Master order id"),
    ),
    responses(
        (status = 200, description = "Documents of the order", body = [DocumentResponse]),
        (status = 400, description = "Invalid order id"),
    ),
    tag = "documents"
)]
pub async fn list_documents(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let order_id = path.into_inner();
    let documents = state.documents.clone();

    let docs = web::block(move || documents.list(&order_id)).await??;

    let items: Vec<DocumentResponse> = docs.into_iter().map(DocumentResponse::from).collect();
    Ok(HttpResponse::Ok().json(items))
}

/// POST /master-orders/{order_id}/documents?file_name=...
///
/// The request body is the raw file. Its `Content-Type` header is recorded as
/// the document's type.
#[utoipa::path(
    post,
    path = "/master-orders/{order_id}/documents",
    params(
        ("order_id" = String, Path, description = "Master order id"),
        UploadParams,
    ),
    request_body(content = Vec<u8>, content_type = "application/octet-stream"),
    responses(
        (status = 201, description = "Document uploaded", body = DocumentResponse),
        (status = 400, description = "Invalid order id or file name"),
        (status = 502, description = "Object storage failure"),
    ),
    tag = "documents"
)]
pub async fn upload_document(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
    query: web::Query<UploadParams>,
    body: web::Bytes,
) -> Result<HttpResponse, AppError> {
    let order_id = path.into_inner();
    let content_type = req
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.trim().is_empty())
        .unwrap_or(DEFAULT_CONTENT_TYPE)
        .to_string();
    let file = UploadedFile {
        file_name: query.into_inner().file_name,
        content_type,
        bytes: body.to_vec(),
    };
    let documents = state.documents.clone();

    let doc = web::block(move || documents.upload(&order_id, file)).await??;

    Ok(HttpResponse::Created().json(DocumentResponse::from(doc)))
}

/// GET /documents/{id}/content
#[utoipa::path(
    get,
    path = "/documents/{id}/content",
    params(
        ("id" = Uuid, Path, description = "Document UUID"),
    ),
    responses(
        (status = 200, description = "File content", body = Vec<u8>, content_type = "application/octet-stream"),
        (status = 404, description = "Document not found"),
        (status = 502, description = "Object storage failure"),
    ),
    tag = "documents"
)]
pub async fn download_document(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let documents = state.documents.clone();

    let (doc, bytes) = web::block(move || documents.download(id)).await??;

    Ok(HttpResponse::Ok()
        .content_type(doc.file_type)
        .insert_header(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters: vec![DispositionParam::Filename(doc.file_name)],
        })
        .body(bytes))
}

/// DELETE /documents/{id}
///
/// Removes the stored file and then its record.
#[utoipa::path(
    delete,
    path = "/documents/{id}",
    params(
        ("id" = Uuid, Path, description = "Document UUID"),
    ),
    responses(
        (status = 204, description = "Document deleted"),
        (status = 404, description = "Document not found"),
        (status = 502, description = "File or record could not be removed"),
    ),
    tag = "documents"
)]
pub async fn delete_document(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let documents = state.documents.clone();

    web::block(move || documents.delete(id)).await??;

    Ok(HttpResponse::NoContent().finish())
}
