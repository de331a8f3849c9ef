use crate::engine::{AnswerMap, Dimension, EngineConfig, PersonyEngine};
use crate::questions::{CatalogEntry, Question, QuestionBody, ScaleQuestion};

/// Questions generated for each of the twenty dimensions.
pub(super) const PER_DIMENSION: usize = 16;

pub(super) fn key(dimension: Dimension, n: usize) -> String {
    format!("{}-{n:02}", dimension.tag())
}

pub(super) fn scale_question(id: String, category: &str, reversed: bool) -> Question {
    Question {
        id,
        category: category.to_string(),
        language: "en".to_string(),
        required: true,
        question: QuestionBody::Scale(ScaleQuestion {
            text: format!("statement for {category}"),
            min: -3,
            max: 3,
            interval: 1.0,
            low_label: "Strongly disagree".to_string(),
            high_label: "Strongly agree".to_string(),
            shuffle: true,
            reversed,
        }),
    }
}

pub(super) fn questions() -> Vec<Question> {
    Dimension::ALL
        .into_iter()
        .flat_map(|dimension| {
            (0..PER_DIMENSION).map(move |n| scale_question(key(dimension, n), dimension.tag(), false))
        })
        .collect()
}

pub(super) fn engine() -> PersonyEngine {
    engine_with(EngineConfig::default())
}

pub(super) fn engine_with(config: EngineConfig) -> PersonyEngine {
    PersonyEngine::new(questions(), config).expect("fixture catalog is valid")
}

/// Answers `count` questions of `dimension` with `value`, starting at question `offset`.
pub(super) fn answer_range(
    answers: &mut AnswerMap,
    dimension: Dimension,
    offset: usize,
    count: usize,
    value: i32,
) {
    for n in offset..offset + count {
        answers.insert(key(dimension, n), value);
    }
}

/// Drives the questionnaire to completion one answer at a time, unshuffled.
///
/// Returns the final answer map together with the remaining count observed before every answer.
pub(super) fn complete_with(
    engine: &PersonyEngine,
    value: impl Fn(&CatalogEntry) -> i32,
) -> (AnswerMap, Vec<usize>) {
    let mut answers = AnswerMap::new();
    let mut observed = Vec::new();

    for _ in 0..engine.catalog().len() {
        if engine.is_completed(&answers) {
            break;
        }
        let batch = engine
            .infer_next_questions(&answers, None, false)
            .expect("every branch is covered by the fixture");
        let entry = batch.first().expect("an incomplete questionnaire serves questions");

        observed.push(engine.calculate_remaining_questions_count(&answers));
        answers.insert(entry.key.clone(), value(entry));
    }

    (answers, observed)
}
