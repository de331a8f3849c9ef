use rand::seq::SliceRandom;
use rand::RngCore;
use tracing::debug;

use super::answers::AnswerMap;
use super::config::PhaseTargets;
use super::dimensions::Dimension;
use super::phase::Phase;
use super::EngineError;
use crate::questions::{CatalogEntry, QuestionCatalog};
use crate::theory::{Dominants, Trait, TraitAxis};

use Dimension::*;

const LIFESTYLE_NT: [Dimension; 2] = [LifestyleNiNe, LifestyleTeTi];
const LIFESTYLE_NF: [Dimension; 2] = [LifestyleNiNe, LifestyleFeFi];
const LIFESTYLE_ST: [Dimension; 2] = [LifestyleSiSe, LifestyleTeTi];
const LIFESTYLE_SF: [Dimension; 2] = [LifestyleSiSe, LifestyleFeFi];

const TEMPERAMENT_J: [Dimension; 2] = [TemperamentNiSi, TemperamentTeFe];
const TEMPERAMENT_P: [Dimension; 2] = [TemperamentNeSe, TemperamentTiFi];

const ATTITUDE_NTJ: [Dimension; 2] = [AttitudeINJ, AttitudeETJ];
const ATTITUDE_NFJ: [Dimension; 2] = [AttitudeINJ, AttitudeEFJ];
const ATTITUDE_STJ: [Dimension; 2] = [AttitudeISJ, AttitudeETJ];
const ATTITUDE_SFJ: [Dimension; 2] = [AttitudeISJ, AttitudeEFJ];
const ATTITUDE_NTP: [Dimension; 2] = [AttitudeITP, AttitudeENP];
const ATTITUDE_NFP: [Dimension; 2] = [AttitudeIFP, AttitudeENP];
const ATTITUDE_STP: [Dimension; 2] = [AttitudeITP, AttitudeESP];
const ATTITUDE_SFP: [Dimension; 2] = [AttitudeIFP, AttitudeESP];

/// Categories to draw from in `phase`, given the current dominant combination.
///
/// Preferences ignore the dominants, lifestyle keys on N/S + T/F, temperament on J/P alone and
/// attitude on N/S + T/F + J/P. A combination with no branch is an error, never a fallback.
pub fn branch_for(phase: Phase, dominants: Dominants) -> Result<&'static [Dimension], EngineError> {
    let perception = dominants.on(TraitAxis::NS);
    let judgement = dominants.on(TraitAxis::TF);
    let lifestyle = dominants.on(TraitAxis::JP);

    let branch: Option<&'static [Dimension]> = match phase {
        Phase::Preferences => Some(Dimension::preferences()),
        Phase::Lifestyle => match (perception, judgement) {
            (Trait::N, Trait::T) => Some(&LIFESTYLE_NT),
            (Trait::N, Trait::F) => Some(&LIFESTYLE_NF),
            (Trait::S, Trait::T) => Some(&LIFESTYLE_ST),
            (Trait::S, Trait::F) => Some(&LIFESTYLE_SF),
            _ => None,
        },
        Phase::Temperament => match lifestyle {
            Trait::J => Some(&TEMPERAMENT_J),
            Trait::P => Some(&TEMPERAMENT_P),
            _ => None,
        },
        Phase::Attitude => match (perception, judgement, lifestyle) {
            (Trait::N, Trait::T, Trait::J) => Some(&ATTITUDE_NTJ),
            (Trait::N, Trait::F, Trait::J) => Some(&ATTITUDE_NFJ),
            (Trait::S, Trait::T, Trait::J) => Some(&ATTITUDE_STJ),
            (Trait::S, Trait::F, Trait::J) => Some(&ATTITUDE_SFJ),
            (Trait::N, Trait::T, Trait::P) => Some(&ATTITUDE_NTP),
            (Trait::N, Trait::F, Trait::P) => Some(&ATTITUDE_NFP),
            (Trait::S, Trait::T, Trait::P) => Some(&ATTITUDE_STP),
            (Trait::S, Trait::F, Trait::P) => Some(&ATTITUDE_SFP),
            _ => None,
        },
        Phase::Completed => Some(&[]),
    };

    branch.ok_or_else(|| EngineError::InvalidDominants {
        phase,
        dominants: dominants.to_string(),
    })
}

/// Per-category cap: a quarter of the target for preferences, half for the branched phases.
pub fn per_category_limit(phase: Phase, targets: &PhaseTargets) -> usize {
    match phase {
        Phase::Preferences => targets.target(phase) / 4,
        _ => targets.target(phase) / 2,
    }
}

/// Picks the next batch of unanswered questions for `phase`.
///
/// Candidates are gathered category by category in catalog order. When `rng` is supplied the
/// whole pool is shuffled once before truncation so every selected category stays represented
/// in proportion.
pub fn select_next<'a>(
    catalog: &'a QuestionCatalog,
    answers: &AnswerMap,
    phase: Phase,
    dominants: Dominants,
    targets: &PhaseTargets,
    max_questions: usize,
    rng: Option<&mut dyn RngCore>,
) -> Result<Vec<&'a CatalogEntry>, EngineError> {
    let categories = branch_for(phase, dominants)?;
    let limit = per_category_limit(phase, targets);

    debug!(%phase, %dominants, ?categories, limit, "selecting next questions");

    let mut pool: Vec<&CatalogEntry> = categories
        .iter()
        .flat_map(|dimension| catalog.remaining(*dimension, answers).take(limit))
        .collect();

    if let Some(rng) = rng {
        pool.shuffle(rng);
    }
    pool.truncate(max_questions);

    Ok(pool)
}
