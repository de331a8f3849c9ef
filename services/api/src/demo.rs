use crate::infra::build_engine;
use clap::Args;
use persony::config::AppConfig;
use persony::engine::{
    AnalyticsSnapshot, AnswerMap, EngineError, EngineName, Family, Phase,
    PhaseTargets, QuestionnaireEngine,
};
use persony::error::AppError;
use persony::questions::{Question, QuestionBody, ScaleQuestion};
use persony::telemetry;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Args, Debug)]
pub(crate) struct SimulateArgs {
    /// Question catalog CSV (defaults to the synthetic catalog)
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
    /// Keep only catalog rows in this language
    #[arg(long)]
    pub(crate) language: Option<String>,
    /// Seed for shuffling and for the generated answers
    #[arg(long, default_value_t = 42)]
    pub(crate) seed: u64,
    /// Questions requested per batch (defaults to PERSONY_MAX_QUESTIONS)
    #[arg(long)]
    pub(crate) batch: Option<usize>,
    /// Registered engine to simulate against
    #[arg(long, default_value_t = EngineName::PersonyV1)]
    pub(crate) engine: EngineName,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct SimulationReport {
    pub(crate) engine: String,
    pub(crate) seed: u64,
    pub(crate) batches: usize,
    pub(crate) completed: bool,
    pub(crate) label: String,
    pub(crate) answers: AnswerMap,
    pub(crate) analytics: Vec<AnalyticsSnapshot>,
}

pub(crate) fn run_simulation(args: SimulateArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    if let Some(catalog) = args.catalog {
        config.questionnaire.catalog_path = Some(catalog);
    }
    if let Some(language) = args.language {
        config.questionnaire.language = Some(language);
    }

    let engine = build_engine(args.engine, &config.questionnaire)?;
    let report = simulate(engine.as_ref(), args.seed, args.batch)?;

    info!(
        label = %report.label,
        answered = report.answers.len(),
        batches = report.batches,
        "simulation finished"
    );

    let rendered =
        serde_json::to_string_pretty(&report).map_err(|err| AppError::Io(err.into()))?;
    println!("{rendered}");
    Ok(())
}

/// Answers every served batch with seeded values drawn from each question's scale.
pub(crate) fn simulate(
    engine: &dyn QuestionnaireEngine,
    seed: u64,
    batch: Option<usize>,
) -> Result<SimulationReport, EngineError> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut answers = AnswerMap::new();
    let mut batches = 0;

    while !engine.is_completed(&answers) {
        let next = engine.infer_next_questions_with(&answers, batch, Some(&mut rng))?;
        if next.is_empty() {
            warn!(
                phase = %engine.current_phase(&answers),
                answered = answers.len(),
                "catalog exhausted before completion"
            );
            break;
        }

        batches += 1;
        for entry in next {
            let (min, max) = entry
                .question
                .scale()
                .map(|scale| (scale.min, scale.max))
                .unwrap_or((-entry.max, entry.max));
            let value = if min < max { rng.gen_range(min..=max) } else { min };
            answers.insert(entry.key.clone(), value);
        }
    }

    Ok(SimulationReport {
        engine: engine.name().to_string(),
        seed,
        batches,
        completed: engine.is_completed(&answers),
        label: engine.result_label(&answers),
        analytics: engine.build_analytics(&answers),
        answers,
    })
}

/// Generates a seven-point catalog just large enough to satisfy `targets` on every branch.
pub(crate) fn synthetic_questions(targets: &PhaseTargets) -> Vec<Question> {
    let mut questions = Vec::new();
    for family in Family::ALL {
        let per_dimension = per_dimension_count(Phase::from(family), targets);
        for dimension in family.dimensions() {
            for n in 1..=per_dimension {
                questions.push(synthetic_question(&dimension.to_string(), n));
            }
        }
    }
    questions
}

/// Questions needed per dimension so the categories served in `phase` can reach its target.
///
/// Preferences draw from all four dimensions, every later phase from a two-dimension branch.
fn per_dimension_count(phase: Phase, targets: &PhaseTargets) -> usize {
    let branch_width = match phase {
        Phase::Preferences => Family::Preference.dimensions().len(),
        _ => 2,
    };
    targets.target(phase).div_ceil(branch_width)
}

fn synthetic_question(tag: &str, n: usize) -> Question {
    Question {
        id: format!("{tag}-{n:02}"),
        category: tag.to_string(),
        language: "en".to_string(),
        required: true,
        question: QuestionBody::Scale(ScaleQuestion {
            text: format!("Synthetic statement {n} for {tag}"),
            min: -3,
            max: 3,
            interval: 1.0,
            low_label: "disagree".to_string(),
            high_label: "agree".to_string(),
            shuffle: true,
            reversed: n % 4 == 0,
        }),
    }
}
