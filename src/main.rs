use std::sync::Arc;

use dotenvy::dotenv;
use order_desk::application::{BillService, DocumentService, PreferenceService};
use order_desk::config::Config;
use order_desk::infrastructure::{
    DieselBillRepository, DieselDocumentRepository, JsonPreferenceStore, LocalObjectStorage,
};
use order_desk::{build_server, create_pool, run_migrations, AppState};

const DOCUMENT_BUCKET: &str = "order-documents";

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env().map_err(std::io::Error::other)?;

    let pool =
        create_pool(&config.database_url, config.db_pool_size).map_err(std::io::Error::other)?;
    run_migrations(&pool).map_err(std::io::Error::other)?;

    let storage = LocalObjectStorage::open(&config.storage_root, DOCUMENT_BUCKET)
        .map_err(std::io::Error::other)?;
    let state = AppState {
        documents: Arc::new(DocumentService::new(
            Arc::new(DieselDocumentRepository::new(pool.clone())),
            Arc::new(storage),
        )),
        bills: Arc::new(BillService::new(Arc::new(DieselBillRepository::new(pool)))),
        preferences: Arc::new(PreferenceService::new(
            Arc::new(JsonPreferenceStore::new(config.preferences_path.clone())),
            config.default_theme,
        )),
        max_upload_bytes: config.max_upload_bytes,
    };

    log::info!("Starting server at http://{}:{}", config.host, config.port);

    build_server(state, &config.host, config.port)?.await
}
