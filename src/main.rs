use std::sync::Arc;

use course_reco_api::{
    config::Config,
    db::FlatFileStore,
    routes::{create_router, AppState},
    validation::Schema,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "course_reco_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let store = FlatFileStore::new(&config.student_data_path, &config.courses_data_path);
    let state = AppState::new(Arc::new(store), Schema::default());
    let app = create_router(state);

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!(
        address = %address,
        students = %config.student_data_path,
        courses = %config.courses_data_path,
        "Server listening"
    );
    axum::serve(listener, app).await?;

    Ok(())
}
