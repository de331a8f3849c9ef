use crate::demo::synthetic_questions;
use metrics_exporter_prometheus::PrometheusHandle;
use persony::config::QuestionnaireConfig;
use persony::engine::{create_engine, EngineName, QuestionnaireEngine};
use persony::error::AppError;
use persony::questions::{filter_language, Question, QuestionImporter};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) type SharedEngine = Arc<dyn QuestionnaireEngine>;

/// Reads the configured CSV catalog, or generates the synthetic one when no path is set.
pub(crate) fn load_questions(config: &QuestionnaireConfig) -> Result<Vec<Question>, AppError> {
    let questions = match &config.catalog_path {
        Some(path) => {
            let questions = QuestionImporter::from_path(path)?;
            info!(path = %path.display(), rows = questions.len(), "question catalog imported");
            questions
        }
        None => {
            info!("no catalog configured; using the synthetic catalog");
            synthetic_questions(&config.engine.questions_count)
        }
    };

    Ok(match &config.language {
        Some(language) => filter_language(questions, language),
        None => questions,
    })
}

pub(crate) fn build_engine(
    name: EngineName,
    config: &QuestionnaireConfig,
) -> Result<SharedEngine, AppError> {
    let questions = load_questions(config)?;
    let engine = create_engine(name, questions, config.engine.clone())?;
    info!(engine = %name, questions = engine.catalog().len(), "questionnaire engine ready");
    Ok(Arc::from(engine))
}
