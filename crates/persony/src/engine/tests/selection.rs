use rand::rngs::StdRng;
use rand::SeedableRng;

use super::common::*;
use crate::engine::{
    create_engine, select_next, AnswerMap, Dimension, EngineConfig, EngineError, EngineName,
    Family, Phase, PhaseTargets,
};
use crate::theory::{Dominants, MbtiType, Trait};

fn keys(batch: &[&crate::questions::CatalogEntry]) -> Vec<String> {
    batch.iter().map(|entry| entry.key.clone()).collect()
}

#[test]
fn empty_answers_start_in_preferences() {
    let engine = engine();
    let answers = AnswerMap::new();

    assert!(!engine.is_completed(&answers));
    assert_eq!(engine.current_phase(&answers), Phase::Preferences);
    assert_eq!(engine.calculate_remaining_questions_count(&answers), 72);

    let batch = engine
        .infer_next_questions(&answers, None, true)
        .expect("preferences never branch");
    assert_eq!(batch.len(), 8);
    assert!(batch
        .iter()
        .all(|entry| entry.dimension.family() == Family::Preference));
}

#[test]
fn unshuffled_selection_is_deterministic() {
    let engine = engine();
    let mut answers = AnswerMap::new();
    answer_range(&mut answers, Dimension::PreferenceIE, 0, 3, 1);

    let first = keys(&engine.infer_next_questions(&answers, None, false).unwrap());
    let second = keys(&engine.infer_next_questions(&answers, None, false).unwrap());
    assert_eq!(first, second);
    assert_eq!(first[0], key(Dimension::PreferenceIE, 3));
}

#[test]
fn seeded_shuffles_are_reproducible() {
    let engine = engine();
    let answers = AnswerMap::new();

    let mut rng = StdRng::seed_from_u64(42);
    let first = keys(
        &engine
            .infer_next_questions_with(&answers, Some(12), Some(&mut rng))
            .unwrap(),
    );
    let mut rng = StdRng::seed_from_u64(42);
    let second = keys(
        &engine
            .infer_next_questions_with(&answers, Some(12), Some(&mut rng))
            .unwrap(),
    );

    assert_eq!(first, second);
    assert_eq!(first.len(), 12);
}

#[test]
fn max_questions_caps_the_batch() {
    let engine = engine_with(EngineConfig {
        max_questions: 3,
        ..EngineConfig::default()
    });
    let answers = AnswerMap::new();

    assert_eq!(engine.infer_next_questions(&answers, None, false).unwrap().len(), 3);
    assert_eq!(
        engine
            .infer_next_questions(&answers, Some(100), false)
            .unwrap()
            .len(),
        32
    );
}

#[test]
fn lifestyle_branch_follows_preference_majorities() {
    let engine = engine();
    let mut answers = AnswerMap::new();
    answer_range(&mut answers, Dimension::PreferenceIE, 0, 9, -1);
    answer_range(&mut answers, Dimension::PreferenceIE, 9, 7, 1);
    answer_range(&mut answers, Dimension::PreferenceNS, 0, 6, -1);
    answer_range(&mut answers, Dimension::PreferenceNS, 6, 10, 1);

    assert_eq!(engine.phase_counts(&answers).preferences, 32);
    assert_eq!(engine.current_phase(&answers), Phase::Lifestyle);
    assert_eq!(engine.dominants(&answers).to_string(), "ISTJ");

    let batch = engine
        .infer_next_questions(&answers, Some(16), false)
        .unwrap();
    assert_eq!(batch.len(), 16);
    assert!(batch.iter().all(|entry| matches!(
        entry.dimension,
        Dimension::LifestyleSiSe | Dimension::LifestyleTeTi
    )));
}

#[test]
fn every_branch_serves_questions_from_a_full_catalog() {
    let engine = engine();
    let targets = PhaseTargets::default();
    let answers = AnswerMap::new();

    for kind in MbtiType::ALL {
        for phase in Phase::ORDERED {
            let batch = select_next(
                engine.catalog(),
                &answers,
                phase,
                kind.into(),
                &targets,
                usize::MAX,
                None,
            )
            .unwrap_or_else(|err| panic!("{kind} in {phase}: {err}"));
            assert!(!batch.is_empty(), "{kind} in {phase}");
        }
    }
}

#[test]
fn malformed_dominants_fail_the_request() {
    let engine = engine();
    let scrambled = Dominants::new([Trait::E, Trait::E, Trait::T, Trait::J]);

    let result = select_next(
        engine.catalog(),
        &AnswerMap::new(),
        Phase::Lifestyle,
        scrambled,
        &PhaseTargets::default(),
        8,
        None,
    );
    assert!(matches!(
        result,
        Err(EngineError::InvalidDominants {
            phase: Phase::Lifestyle,
            ..
        })
    ));
}

#[test]
fn remaining_count_drops_by_one_until_completion() {
    let engine = engine();
    let (answers, observed) = complete_with(&engine, |entry| {
        if entry.key.ends_with('3') {
            0
        } else {
            1
        }
    });

    assert_eq!(observed.len(), 72);
    assert!(observed
        .iter()
        .zip(observed.iter().skip(1))
        .all(|(before, after)| before - after == 1));
    assert_eq!(observed[0], 72);
    assert_eq!(engine.calculate_remaining_questions_count(&answers), 0);
    assert!(engine.is_completed(&answers));
    assert!(engine
        .infer_next_questions(&answers, None, true)
        .unwrap()
        .is_empty());
}

#[test]
fn completion_survives_additional_answers() {
    let engine = engine();
    let (mut answers, _) = complete_with(&engine, |_| -1);
    assert!(engine.is_completed(&answers));

    for entry in engine.catalog().entries() {
        if !answers.contains_key(&entry.key) {
            answers.insert(entry.key.clone(), 2);
            assert!(engine.is_completed(&answers));
        }
    }
    assert_eq!(engine.calculate_remaining_questions_count(&answers), 0);
}

#[test]
fn earlier_phases_gate_later_ones_regardless_of_insertion_order() {
    let engine = engine();
    let mut forward = AnswerMap::new();
    answer_range(&mut forward, Dimension::LifestyleNiNe, 0, 16, 1);
    answer_range(&mut forward, Dimension::TemperamentNiSi, 0, 16, 1);
    answer_range(&mut forward, Dimension::AttitudeINJ, 0, 8, 1);
    answer_range(&mut forward, Dimension::PreferenceIE, 0, 16, 1);
    answer_range(&mut forward, Dimension::PreferenceNS, 0, 15, 1);

    let mut backward = AnswerMap::new();
    answer_range(&mut backward, Dimension::PreferenceNS, 0, 15, 1);
    answer_range(&mut backward, Dimension::PreferenceIE, 0, 16, 1);
    answer_range(&mut backward, Dimension::AttitudeINJ, 0, 8, 1);
    answer_range(&mut backward, Dimension::TemperamentNiSi, 0, 16, 1);
    answer_range(&mut backward, Dimension::LifestyleNiNe, 0, 16, 1);

    assert_eq!(engine.current_phase(&forward), Phase::Preferences);
    assert_eq!(engine.current_phase(&backward), Phase::Preferences);
    assert_eq!(engine.calculate_remaining_questions_count(&forward), 1);

    forward.insert(key(Dimension::PreferenceTF, 0), 0);
    assert_eq!(engine.current_phase(&forward), Phase::Completed);
}

#[test]
fn category_keys_keep_identical_ids_apart() {
    let questions = vec![
        scale_question("1".to_string(), "P-IE", false),
        scale_question("1".to_string(), "P-NS", false),
    ];
    assert!(matches!(
        crate::engine::PersonyEngine::new(questions.clone(), EngineConfig::default()),
        Err(EngineError::DuplicateQuestionKey { .. })
    ));

    let engine = crate::engine::PersonyEngine::new(
        questions,
        EngineConfig {
            question_key: crate::questions::KeyStrategy::CategoryAndId,
            ..EngineConfig::default()
        },
    )
    .expect("category-qualified keys are unique");
    let batch = engine
        .infer_next_questions(&AnswerMap::new(), None, false)
        .unwrap();
    assert_eq!(keys(&batch), vec!["P-IE#1", "P-NS#1"]);
}

#[test]
fn registry_builds_the_adaptive_engine() {
    let name: EngineName = "persony-v1".parse().expect("registered");
    assert_eq!(name, EngineName::PersonyV1);
    assert!(matches!(
        "legacy".parse::<EngineName>(),
        Err(EngineError::UnknownEngine { .. })
    ));

    let engine = create_engine(name, questions(), EngineConfig::default()).expect("valid catalog");
    let answers = AnswerMap::new();
    assert_eq!(engine.name(), EngineName::PersonyV1);
    assert_eq!(engine.remaining(&answers), 72);
    assert!(!engine.is_completed(&answers));
    assert_eq!(engine.build_analytics(&answers).len(), 3);
    assert_eq!(engine.result_label(&answers), "INTJ");
    assert_eq!(
        engine
            .infer_next_questions_with(&answers, Some(5), None)
            .unwrap()
            .len(),
        5
    );
}
