use super::common::*;
use crate::engine::{
    AnalysisWarning, AnalyticsKind, AnswerMap, Complexity, Dimension, EngineConfig, Phase,
};
use crate::theory::{CognitiveFunction, MbtiType, Trait};

#[test]
fn preference_answers_feed_basic_exactly_once() {
    let engine = engine();
    let mut answers = AnswerMap::new();
    answers.insert(key(Dimension::PreferenceIE, 0), -2);
    answers.insert(key(Dimension::PreferenceIE, 1), 0);
    answers.insert(key(Dimension::LifestyleNiNe, 0), -3);
    answers.insert(key(Dimension::AttitudeINJ, 0), 3);

    let accumulation = engine.accumulate(&answers);

    assert_eq!(accumulation.basic.total(Trait::I), 2 + 1);
    assert_eq!(accumulation.basic.total(Trait::E), 1);
    assert_eq!(accumulation.basic.total(Trait::J), 0);
    assert_eq!(accumulation.basic.grand_total(), 4);

    assert_eq!(accumulation.advanced.total(Trait::I), 2 + 1 + 3);
    assert_eq!(accumulation.advanced.total(Trait::J), 3);
    assert_eq!(accumulation.functions.value(CognitiveFunction::Ni), 3 + 3);
}

#[test]
fn zero_answers_use_the_configured_neutral_addition() {
    let engine = engine_with(EngineConfig {
        neutral_addition: 4,
        ..EngineConfig::default()
    });
    let mut answers = AnswerMap::new();
    answers.insert(key(Dimension::PreferenceTF, 0), 0);
    answers.insert(key(Dimension::TemperamentTeFe, 0), 0);

    let accumulation = engine.accumulate(&answers);
    assert_eq!(accumulation.basic.total(Trait::T), 4);
    assert_eq!(accumulation.basic.total(Trait::F), 4);
    assert_eq!(accumulation.advanced.total(Trait::T), 8);
    assert_eq!(accumulation.functions.value(CognitiveFunction::Te), 4);
    assert_eq!(accumulation.functions.value(CognitiveFunction::Fe), 4);
}

#[test]
fn reversed_questions_flip_polarity() {
    let mut questions = questions();
    questions.push(scale_question(
        "reversed-1".to_string(),
        Dimension::PreferenceJP.tag(),
        true,
    ));
    let engine = crate::engine::PersonyEngine::new(questions, EngineConfig::default())
        .expect("valid catalog");

    let answers: AnswerMap = [("reversed-1", 3)].into_iter().collect();
    let accumulation = engine.accumulate(&answers);

    assert_eq!(accumulation.basic.total(Trait::J), 3);
    assert_eq!(accumulation.basic.total(Trait::P), 0);
}

#[test]
fn ties_resolve_to_the_low_side_of_every_axis() {
    let engine = engine();
    let mut answers = AnswerMap::new();
    for dimension in Dimension::preferences() {
        answer_range(&mut answers, *dimension, 0, 4, -1);
        answer_range(&mut answers, *dimension, 4, 4, 1);
    }

    assert_eq!(engine.calculate_result_label(&answers), "INTJ");
    assert_eq!(engine.calculate_result_label(&AnswerMap::new()), "INTJ");
}

#[test]
fn unknown_keys_are_reported_and_ignored() {
    let engine = engine();
    let mut answers = AnswerMap::new();
    answer_range(&mut answers, Dimension::PreferenceIE, 0, 3, 2);
    answer_range(&mut answers, Dimension::PreferenceNS, 0, 2, -1);
    let clean = engine.accumulate(&answers);

    answers.insert("bogus#1", 3);
    let noisy = engine.accumulate(&answers);

    assert_eq!(noisy.basic, clean.basic);
    assert_eq!(noisy.advanced, clean.advanced);
    assert_eq!(noisy.functions, clean.functions);
    assert_eq!(
        noisy.warnings,
        vec![AnalysisWarning::UnknownAnswerKey {
            key: "bogus#1".to_string()
        }]
    );
    assert_eq!(engine.phase_counts(&answers).preferences, 5);

    let report = engine.analyze(&answers);
    assert_eq!(report.warnings, noisy.warnings);
    assert_eq!(report.analytics, engine.get_analytics(&answers));
}

#[test]
fn analytics_are_deterministic_and_labelled() {
    let engine = engine();
    let mut answers = AnswerMap::new();
    answer_range(&mut answers, Dimension::PreferenceIE, 0, 6, 2);
    answer_range(&mut answers, Dimension::PreferenceNS, 0, 6, 1);
    answer_range(&mut answers, Dimension::PreferenceTF, 0, 6, -3);
    answer_range(&mut answers, Dimension::PreferenceJP, 0, 6, 2);

    let first = engine.get_analytics(&answers);
    let second = engine.get_analytics(&answers);
    assert_eq!(first, second);

    let names: Vec<_> = first.iter().map(|snapshot| snapshot.name).collect();
    assert_eq!(
        names,
        vec![
            AnalyticsKind::BaseMbtiTraits,
            AnalyticsKind::AdvancedMbtiTraits,
            AnalyticsKind::JungFunctions
        ]
    );

    let advanced = &first[1];
    assert_eq!(advanced.extra.complexity_level, Some(Complexity::Advanced));
    assert_eq!(advanced.extra.dominant_combo.as_deref(), Some("ESTP"));
    assert_eq!(engine.calculate_result_label(&answers), "ESTP");

    let probabilities = advanced.extra.probabilities.as_ref().expect("probabilities");
    assert_eq!(probabilities[&MbtiType::ESTP], 1.0);
    assert_eq!(probabilities[&MbtiType::INTJ], 0.0);
}

#[test]
fn secondary_analytics_follow_configuration() {
    let engine = engine_with(EngineConfig {
        include_secondary: true,
        ..EngineConfig::default()
    });
    let snapshots = engine.get_analytics(&AnswerMap::new());

    assert_eq!(snapshots.len(), 4);
    assert_eq!(snapshots[3].name, AnalyticsKind::SecondaryTraits);
    assert!(snapshots[3].items.iter().all(|item| item.percentage == 0.0));
}

#[test]
fn completed_run_yields_a_consistent_label_and_function_stack() {
    let engine = engine();
    let (answers, _) = complete_with(&engine, |_| -2);

    assert_eq!(engine.current_phase(&answers), Phase::Completed);
    assert_eq!(engine.calculate_result_label(&answers), "INTJ");

    let analytics = engine.get_analytics(&answers);
    assert_eq!(analytics[1].extra.dominant_combo.as_deref(), Some("INTJ"));
    assert_eq!(
        analytics[1].extra.function_stack,
        Some(vec![
            CognitiveFunction::Ni,
            CognitiveFunction::Te,
            CognitiveFunction::Fi,
            CognitiveFunction::Se,
        ])
    );
    assert!(analytics[2]
        .item("Ni")
        .is_some_and(|item| item.value > 0 && item.percentage > 100.0));
}
