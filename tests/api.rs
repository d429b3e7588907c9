//! HTTP-level tests of every route, run against in-memory adapters.

use actix_web::http::{header, StatusCode};
use actix_web::{test, web, App};
use order_desk::domain::preferences::Theme;
use order_desk::{configure, AppState};
use serde_json::{json, Value};

const MAX_UPLOAD_BYTES: usize = 1024;

macro_rules! app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($state.clone()))
                .app_data(web::PayloadConfig::new($state.max_upload_bytes))
                .configure(configure),
        )
        .await
    };
}

fn state() -> AppState {
    AppState::in_memory(Theme::Default, MAX_UPLOAD_BYTES)
}

// ── Worksheets ───────────────────────────────────────────────────────────────

#[actix_web::test]
async fn master_order_worksheet_replays_edits() {
    let state = state();
    let app = app!(state);

    let req = test::TestRequest::post()
        .uri("/master-orders/worksheet")
        .set_json(json!({
            "header": { "order_number": "MO/2025/0040", "client": "Hammed" },
            "lines": [
                { "id": "1", "product_name": "hh", "vendor": "3,Administrator" }
            ],
            "edits": [
                { "op": "update_field", "line_id": "1", "field": "qty", "value": 3 },
                { "op": "update_field", "line_id": "1", "field": "unitPrice", "value": "12.5" },
                { "op": "add_custom_column", "name": "Color" },
                { "op": "add_line" }
            ]
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["header"]["order_number"], "MO/2025/0040");
    assert_eq!(body["custom_columns"], json!(["Color"]));
    assert_eq!(body["total"], 37.5);

    let rows = body["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["subtotal"], 37.5);
    assert_eq!(rows[0]["cells"][0]["display"], "Color");
    assert_eq!(rows[0]["cells"][0]["value"], Value::Null);
    assert_ne!(rows[1]["line"]["id"], "1");
}

#[actix_web::test]
async fn worksheet_edit_on_unknown_line_is_not_found() {
    let state = state();
    let app = app!(state);

    let req = test::TestRequest::post()
        .uri("/master-orders/worksheet")
        .set_json(json!({
            "edits": [
                { "op": "update_field", "line_id": "missing", "field": "qty", "value": 1 }
            ]
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn unreadable_cells_survive_a_resubmit() {
    let state = state();
    let app = app!(state);

    let req = test::TestRequest::post()
        .uri("/master-orders/worksheet")
        .set_json(json!({
            "lines": [ { "id": "1", "qty": 2, "unit_price": 5 } ],
            "edits": [
                { "op": "update_field", "line_id": "1", "field": "qty", "value": "abc" },
                { "op": "update_field", "line_id": "1", "field": "unitPrice", "value": "1e309" }
            ]
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    let line = body["rows"][0]["line"].clone();
    assert_eq!(line["qty"], Value::Null);
    assert_eq!(line["unit_price"], Value::Null);
    assert_eq!(body["total"], 0.0);

    let req = test::TestRequest::post()
        .uri("/master-orders/worksheet")
        .set_json(json!({
            "lines": [ line ],
            "edits": [ { "op": "update_field", "line_id": "1", "field": "unitPrice", "value": 4 } ]
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["rows"][0]["line"]["qty"], Value::Null);
    assert_eq!(body["total"], 0.0);

    let req = test::TestRequest::post()
        .uri("/invoices/worksheet")
        .set_json(json!({
            "lines": [
                { "id": "1", "quantity": null, "unit_price": 100, "discount": null, "taxes": "15%" }
            ]
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["totals"]["total"], 0.0);
}

#[actix_web::test]
async fn blank_custom_column_is_rejected() {
    let state = state();
    let app = app!(state);

    let req = test::TestRequest::post()
        .uri("/invoices/worksheet")
        .set_json(json!({ "edits": [ { "op": "add_custom_column", "name": "  " } ] }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"].is_string());
}

#[actix_web::test]
async fn invoice_worksheet_reports_totals() {
    let state = state();
    let app = app!(state);

    let req = test::TestRequest::post()
        .uri("/invoices/worksheet")
        .set_json(json!({
            "header": { "invoice_number": "INV/2025/00001", "customer": "Hammed" },
            "lines": [
                { "id": "1", "product": "Product A", "quantity": 1, "unit_price": 1000, "taxes": "15%" }
            ],
            "edits": [
                { "op": "update_field", "line_id": "1", "field": "discount", "value": 50 },
                { "op": "add_custom_column", "name": "Batch" },
                { "op": "update_field", "line_id": "1", "field": "Batch", "value": "B-7" }
            ]
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["header"]["status"], "draft");
    assert_eq!(body["totals"]["untaxed"], 500.0);
    assert_eq!(body["totals"]["tax"], 75.0);
    assert_eq!(body["totals"]["total"], 575.0);
    assert_eq!(body["rows"][0]["cells"][0]["value"], "B-7");
    assert_eq!(body["rows"][0]["line"]["extra"]["Batch"], "B-7");
}

#[actix_web::test]
async fn only_drafts_can_be_posted() {
    let state = state();
    let app = app!(state);

    let draft = json!({
        "header": { "invoice_number": "INV/2025/00001", "status": "draft" },
        "lines": [ { "id": "1", "quantity": 2, "unit_price": 100, "taxes": "15%" } ]
    });
    let req = test::TestRequest::post()
        .uri("/invoices/post")
        .set_json(&draft)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["header"]["status"], "posted");
    assert_eq!(body["totals"]["total"], 230.0);

    let req = test::TestRequest::post()
        .uri("/invoices/post")
        .set_json(json!({ "header": { "invoice_number": "INV/2025/00001", "status": "posted" } }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
}

#[actix_web::test]
async fn invoice_search_matches_number_or_customer() {
    let state = state();
    let app = app!(state);

    let invoices = json!([
        { "id": "1", "invoice_number": "INV/2025/00001", "customer": "Hammed", "total": 1150.0 },
        { "id": "2", "invoice_number": "INV/2025/00002", "customer": "Sara", "total": 80.0 },
        { "id": "3", "invoice_number": "INV/2025/00003", "customer": "hamid", "status": "paid" }
    ]);

    let req = test::TestRequest::post()
        .uri("/invoices/search")
        .set_json(json!({ "query": "HAM", "invoices": invoices }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["total"], 2);
    assert_eq!(body["items"][0]["id"], "1");
    assert_eq!(body["items"][1]["status"], "paid");

    let req = test::TestRequest::post()
        .uri("/invoices/search")
        .set_json(json!({ "query": "", "invoices": invoices }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["total"], 3);
}

// ── Bills ────────────────────────────────────────────────────────────────────

#[actix_web::test]
async fn bill_payments_update_the_board() {
    let state = state();
    let app = app!(state);

    let req = test::TestRequest::post()
        .uri("/bills")
        .set_json(json!({
            "customer_name": "Hussein",
            "total_amount": 101000.0,
            "total_ctn": 10,
            "shipped_ctn": 4,
            "cbm": 2.5
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let bill: Value = test::read_body_json(resp).await;
    assert_eq!(bill["status"], "not_paid");
    assert_eq!(bill["shipped_percentage"], 40);
    let id = bill["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::post()
        .uri("/bills")
        .set_json(json!({ "customer_name": "Sara", "total_amount": 75000.0, "paid_amount": 75000.0 }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

    let req = test::TestRequest::post()
        .uri(&format!("/bills/{id}/payments"))
        .set_json(json!({ "amount": 50500.0 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let bill: Value = test::read_body_json(resp).await;
    assert_eq!(bill["status"], "partial");
    assert_eq!(bill["payment_percentage"], 50);
    assert_eq!(bill["outstanding"], 50500.0);

    let req = test::TestRequest::get().uri("/bills").to_request();
    let board: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(board["bills"].as_array().unwrap().len(), 2);
    assert_eq!(board["summary"]["total_bills"], 176000.0);
    assert_eq!(board["summary"]["unique_customers"], 2);

    let req = test::TestRequest::get()
        .uri("/bills?hide_fully_paid=true")
        .to_request();
    let board: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(board["bills"].as_array().unwrap().len(), 1);
    assert_eq!(board["summary"]["total_paid"], 50500.0);
}

#[actix_web::test]
async fn rejected_payments_report_why() {
    let state = state();
    let app = app!(state);

    let req = test::TestRequest::post()
        .uri("/bills")
        .set_json(json!({ "customer_name": "Ahmed", "total_amount": 100.0 }))
        .to_request();
    let bill: Value = test::call_and_read_body_json(&app, req).await;
    let id = bill["id"].as_str().unwrap().to_string();

    for amount in [0.0, -5.0, 100.01] {
        let req = test::TestRequest::post()
            .uri(&format!("/bills/{id}/payments"))
            .set_json(json!({ "amount": amount }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY, "amount {amount}");
    }

    let req = test::TestRequest::post()
        .uri("/bills/00000000-0000-0000-0000-000000000000/payments")
        .set_json(json!({ "amount": 1.0 }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::post()
        .uri("/bills")
        .set_json(json!({ "customer_name": " ", "total_amount": 100.0 }))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::UNPROCESSABLE_ENTITY
    );
}

// ── Documents ────────────────────────────────────────────────────────────────

#[actix_web::test]
async fn document_lifecycle() {
    let state = state();
    let app = app!(state);

    let req = test::TestRequest::post()
        .uri("/master-orders/40/documents?file_name=supplier-pi.pdf")
        .insert_header((header::CONTENT_TYPE, "application/pdf"))
        .set_payload("%PDF-1.7")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let doc: Value = test::read_body_json(resp).await;
    assert_eq!(doc["file_name"], "supplier-pi.pdf");
    assert_eq!(doc["file_type"], "application/pdf");
    assert_eq!(doc["file_size"], 8);
    assert_eq!(doc["display_size"], "8 Bytes");
    let id = doc["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::get()
        .uri("/master-orders/40/documents")
        .to_request();
    let docs: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(docs.as_array().unwrap().len(), 1);

    let req = test::TestRequest::get()
        .uri(&format!("/documents/{id}/content"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/pdf"
    );
    let disposition = resp
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.starts_with("attachment"));
    assert!(disposition.contains("supplier-pi.pdf"));
    assert_eq!(test::read_body(resp).await, "%PDF-1.7".as_bytes());

    let req = test::TestRequest::delete()
        .uri(&format!("/documents/{id}"))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NO_CONTENT);

    let req = test::TestRequest::get()
        .uri("/master-orders/40/documents")
        .to_request();
    let docs: Value = test::call_and_read_body_json(&app, req).await;
    assert!(docs.as_array().unwrap().is_empty());

    let req = test::TestRequest::delete()
        .uri(&format!("/documents/{id}"))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn upload_without_content_type_is_octet_stream() {
    let state = state();
    let app = app!(state);

    let req = test::TestRequest::post()
        .uri("/master-orders/41/documents?file_name=notes")
        .set_payload("plain words")
        .to_request();
    let doc: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(doc["file_type"], "application/octet-stream");
    assert!(doc["file_path"].as_str().unwrap().starts_with("41/"));
}

#[actix_web::test]
async fn upload_rejects_bad_requests() {
    let state = state();
    let app = app!(state);

    let req = test::TestRequest::post()
        .uri("/master-orders/4..0/documents?file_name=a.pdf")
        .set_payload("x")
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::post()
        .uri("/master-orders/40/documents?file_name=big.bin")
        .set_payload(vec![0u8; MAX_UPLOAD_BYTES + 1])
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::PAYLOAD_TOO_LARGE
    );
}

// ── Preferences ──────────────────────────────────────────────────────────────

#[actix_web::test]
async fn theme_round_trip() {
    let state = state();
    let app = app!(state);

    let req = test::TestRequest::get().uri("/preferences/theme").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["theme"], "default");

    let req = test::TestRequest::put()
        .uri("/preferences/theme")
        .set_json(json!({ "theme": "steel" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["theme"], "steel");

    let req = test::TestRequest::get().uri("/preferences/theme").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["theme"], "steel");

    let req = test::TestRequest::put()
        .uri("/preferences/theme")
        .set_json(json!({ "theme": "Neon" }))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::UNPROCESSABLE_ENTITY
    );
}
