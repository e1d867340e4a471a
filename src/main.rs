use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

use callscreen::application::ports::AudioSpool;
use callscreen::application::services::{
    AnalysisService, ClassificationService, TranscriptionService,
};
use callscreen::infrastructure::audio::AssemblyAiEngine;
use callscreen::infrastructure::llm::OllamaClient;
use callscreen::infrastructure::observability::{TracingConfig, init_tracing};
use callscreen::infrastructure::storage::TempAudioSpool;
use callscreen::presentation::{AppState, Environment, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let settings = Settings::load(environment).context("Failed to load settings")?;

    init_tracing(
        &TracingConfig::from_settings(environment, &settings.logging),
        settings.server.port,
    );

    let problems = settings.problems();
    if !problems.is_empty() {
        if environment.is_strict() {
            anyhow::bail!("Invalid configuration: {}", problems.join("; "));
        }
        for problem in &problems {
            tracing::warn!(problem = %problem, "Configuration problem");
        }
    }

    let speech = &settings.speech_to_text;
    let engine = Arc::new(AssemblyAiEngine::new(
        &speech.base_url,
        &speech.api_key,
        &speech.language_code,
        speech.timeout(),
    )?);

    let classifier = &settings.classifier;
    let llm_client = Arc::new(OllamaClient::new(
        &classifier.base_url,
        &classifier.model,
        classifier.max_tokens,
        classifier.timeout(),
    )?);

    let spool = match &settings.uploads.spool_dir {
        Some(dir) => TempAudioSpool::new(dir.clone())?,
        None => TempAudioSpool::in_system_temp(),
    };
    tracing::info!(spool_dir = %spool.dir().display(), "Upload spool ready");
    let audio_spool: Arc<dyn AudioSpool> = Arc::new(spool);

    let analysis_service = Arc::new(AnalysisService::new(
        audio_spool,
        TranscriptionService::new(engine, speech.poll_policy()),
        ClassificationService::new(llm_client),
    ));

    tracing::info!(
        speech_to_text = %speech.base_url,
        classifier = %classifier.base_url,
        model = %classifier.model,
        allowed_origin = %settings.cors.allowed_origin,
        "Analysis pipeline configured"
    );

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port)
        .parse()
        .context("Invalid server address")?;

    let router = create_router(AppState {
        analysis_service,
        settings,
    });

    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
