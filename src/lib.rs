pub mod application;
pub mod config;
pub mod db;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod infrastructure;
pub mod schema;

use std::sync::Arc;

use actix_web::{middleware::Logger, web, App, HttpServer};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use application::{BillService, DocumentService, PreferenceService};
use domain::preferences::Theme;
use infrastructure::memory::{
    InMemoryBillRepository, InMemoryDocumentRepository, InMemoryObjectStorage,
    InMemoryPreferenceStore,
};

pub use db::{create_pool, DbPool};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Run any pending Diesel migrations against the pool's database.
pub fn run_migrations(pool: &DbPool) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let mut conn = pool.get()?;
    let applied = conn.run_pending_migrations(MIGRATIONS)?;
    log::info!("Applied {} pending migration(s)", applied.len());
    Ok(())
}

/// Services shared by every worker.
#[derive(Clone)]
pub struct AppState {
    pub documents: Arc<DocumentService>,
    pub bills: Arc<BillService>,
    pub preferences: Arc<PreferenceService>,
    pub max_upload_bytes: usize,
}

impl AppState {
    /// State backed entirely by in-memory adapters.
    pub fn in_memory(default_theme: Theme, max_upload_bytes: usize) -> Self {
        Self {
            documents: Arc::new(DocumentService::new(
                Arc::new(InMemoryDocumentRepository::default()),
                Arc::new(InMemoryObjectStorage::default()),
            )),
            bills: Arc::new(BillService::new(Arc::new(InMemoryBillRepository::default()))),
            preferences: Arc::new(PreferenceService::new(
                Arc::new(InMemoryPreferenceStore::default()),
                default_theme,
            )),
            max_upload_bytes,
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::documents::list_documents,
        handlers::documents::upload_document,
        handlers::documents::download_document,
        handlers::documents::delete_document,
        handlers::master_orders::revise_worksheet,
        handlers::invoices::revise_worksheet,
        handlers::invoices::post_invoice,
        handlers::invoices::search,
        handlers::bills::bill_board,
        handlers::bills::create_bill,
        handlers::bills::record_payment,
        handlers::preferences::get_theme,
        handlers::preferences::set_theme,
    ),
    tags(
        (name = "documents", description = "Files attached to master orders"),
        (name = "master-orders", description = "Master order worksheet"),
        (name = "invoices", description = "Invoice worksheet and posting"),
        (name = "bills", description = "Customer bill tracking"),
        (name = "preferences", description = "User preferences"),
    )
)]
pub struct ApiDoc;

/// Registers every route of the service.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/master-orders")
            .route("/worksheet", web::post().to(handlers::master_orders::revise_worksheet))
            .route(
                "/{order_id}/documents",
                web::get().to(handlers::documents::list_documents),
            )
            .route(
                "/{order_id}/documents",
                web::post().to(handlers::documents::upload_document),
            ),
    )
    .service(
        web::scope("/documents")
            .route(
                "/{id}/content",
                web::get().to(handlers::documents::download_document),
            )
            .route("/{id}", web::delete().to(handlers::documents::delete_document)),
    )
    .service(
        web::scope("/invoices")
            .route("/worksheet", web::post().to(handlers::invoices::revise_worksheet))
            .route("/post", web::post().to(handlers::invoices::post_invoice))
            .route("/search", web::post().to(handlers::invoices::search)),
    )
    .service(
        web::scope("/bills")
            .route("", web::get().to(handlers::bills::bill_board))
            .route("", web::post().to(handlers::bills::create_bill))
            .route("/{id}/payments", web::post().to(handlers::bills::record_payment)),
    )
    .service(
        web::scope("/preferences")
            .route("/theme", web::get().to(handlers::preferences::get_theme))
            .route("/theme", web::put().to(handlers::preferences::set_theme)),
    );
}

/// Build and return an actix-web `Server` bound to `host:port`.
///
/// The caller is responsible for `.await`-ing (or `tokio::spawn`-ing) the
/// returned server.
pub fn build_server(
    state: AppState,
    host: &str,
    port: u16,
) -> std::io::Result<actix_web::dev::Server> {
    let openapi = ApiDoc::openapi();

    Ok(HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .app_data(web::PayloadConfig::new(state.max_upload_bytes))
            .wrap(Logger::default())
            .configure(configure)
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", openapi.clone()),
            )
    })
    .bind((host.to_string(), port))?
    .run())
}
