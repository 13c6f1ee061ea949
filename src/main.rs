use bloglist::{
    app,
    state::AppState,
    telemetry::{self, LogFormat},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    telemetry::init(LogFormat::parse(std::env::var("LOG_FORMAT").ok().as_deref()));

    let app_state = AppState::init().await?;
    app::serve(app::build_app(app_state)).await
}
