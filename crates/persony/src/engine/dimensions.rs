use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::EngineError;
use crate::theory::{CognitiveFunction, SecondaryTrait, Trait};

/// Question-family grouping of the dimension tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Family {
    Preference,
    Lifestyle,
    Temperament,
    Attitude,
}

impl Family {
    pub const ALL: [Family; 4] = [
        Family::Preference,
        Family::Lifestyle,
        Family::Temperament,
        Family::Attitude,
    ];

    pub fn dimensions(self) -> &'static [Dimension] {
        match self {
            Family::Preference => &PREFERENCES,
            Family::Lifestyle => &LIFESTYLES,
            Family::Temperament => &TEMPERAMENTS,
            Family::Attitude => &ATTITUDES,
        }
    }
}

/// The twenty question-category tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Dimension {
    #[serde(rename = "P-IE")]
    PreferenceIE,
    #[serde(rename = "P-NS")]
    PreferenceNS,
    #[serde(rename = "P-TF")]
    PreferenceTF,
    #[serde(rename = "P-JP")]
    PreferenceJP,
    #[serde(rename = "L-NINE")]
    LifestyleNiNe,
    #[serde(rename = "L-SISE")]
    LifestyleSiSe,
    #[serde(rename = "L-TETI")]
    LifestyleTeTi,
    #[serde(rename = "L-FEFI")]
    LifestyleFeFi,
    #[serde(rename = "T-NISI")]
    TemperamentNiSi,
    #[serde(rename = "T-NESE")]
    TemperamentNeSe,
    #[serde(rename = "T-TEFE")]
    TemperamentTeFe,
    #[serde(rename = "T-TIFI")]
    TemperamentTiFi,
    #[serde(rename = "A-INJ")]
    AttitudeINJ,
    #[serde(rename = "A-ISJ")]
    AttitudeISJ,
    #[serde(rename = "A-ITP")]
    AttitudeITP,
    #[serde(rename = "A-IFP")]
    AttitudeIFP,
    #[serde(rename = "A-ETJ")]
    AttitudeETJ,
    #[serde(rename = "A-EFJ")]
    AttitudeEFJ,
    #[serde(rename = "A-ENP")]
    AttitudeENP,
    #[serde(rename = "A-ESP")]
    AttitudeESP,
}

const PREFERENCES: [Dimension; 4] = [
    Dimension::PreferenceIE,
    Dimension::PreferenceNS,
    Dimension::PreferenceTF,
    Dimension::PreferenceJP,
];

const LIFESTYLES: [Dimension; 4] = [
    Dimension::LifestyleNiNe,
    Dimension::LifestyleSiSe,
    Dimension::LifestyleTeTi,
    Dimension::LifestyleFeFi,
];

const TEMPERAMENTS: [Dimension; 4] = [
    Dimension::TemperamentNiSi,
    Dimension::TemperamentNeSe,
    Dimension::TemperamentTeFe,
    Dimension::TemperamentTiFi,
];

const ATTITUDES: [Dimension; 8] = [
    Dimension::AttitudeINJ,
    Dimension::AttitudeISJ,
    Dimension::AttitudeITP,
    Dimension::AttitudeIFP,
    Dimension::AttitudeETJ,
    Dimension::AttitudeEFJ,
    Dimension::AttitudeENP,
    Dimension::AttitudeESP,
];

/// Low/high polarity record for one dimension.
///
/// A negative answer credits the `low` side of every pair, a positive answer the `high` side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DimensionSpec {
    pub low_trait: Trait,
    pub high_trait: Trait,
    pub functions: Option<(CognitiveFunction, CognitiveFunction)>,
    pub secondary: Option<(SecondaryTrait, SecondaryTrait)>,
}

impl DimensionSpec {
    const fn traits(low_trait: Trait, high_trait: Trait) -> Self {
        Self {
            low_trait,
            high_trait,
            functions: None,
            secondary: None,
        }
    }

    const fn with_functions(
        low_trait: Trait,
        high_trait: Trait,
        low_function: CognitiveFunction,
        high_function: CognitiveFunction,
    ) -> Self {
        Self {
            low_trait,
            high_trait,
            functions: Some((low_function, high_function)),
            secondary: None,
        }
    }

    pub fn has_function(&self) -> bool {
        self.functions.is_some()
    }
}

impl Dimension {
    pub const ALL: [Dimension; 20] = [
        Dimension::PreferenceIE,
        Dimension::PreferenceNS,
        Dimension::PreferenceTF,
        Dimension::PreferenceJP,
        Dimension::LifestyleNiNe,
        Dimension::LifestyleSiSe,
        Dimension::LifestyleTeTi,
        Dimension::LifestyleFeFi,
        Dimension::TemperamentNiSi,
        Dimension::TemperamentNeSe,
        Dimension::TemperamentTeFe,
        Dimension::TemperamentTiFi,
        Dimension::AttitudeINJ,
        Dimension::AttitudeISJ,
        Dimension::AttitudeITP,
        Dimension::AttitudeIFP,
        Dimension::AttitudeETJ,
        Dimension::AttitudeEFJ,
        Dimension::AttitudeENP,
        Dimension::AttitudeESP,
    ];

    /// Resolves a raw category tag such as `P-IE`.
    pub fn lookup(category: &str) -> Result<Dimension, EngineError> {
        category.parse()
    }

    pub fn preferences() -> &'static [Dimension] {
        &PREFERENCES
    }

    pub fn lifestyles() -> &'static [Dimension] {
        &LIFESTYLES
    }

    pub fn temperaments() -> &'static [Dimension] {
        &TEMPERAMENTS
    }

    pub fn attitudes() -> &'static [Dimension] {
        &ATTITUDES
    }

    pub fn tag(self) -> &'static str {
        match self {
            Dimension::PreferenceIE => "P-IE",
            Dimension::PreferenceNS => "P-NS",
            Dimension::PreferenceTF => "P-TF",
            Dimension::PreferenceJP => "P-JP",
            Dimension::LifestyleNiNe => "L-NINE",
            Dimension::LifestyleSiSe => "L-SISE",
            Dimension::LifestyleTeTi => "L-TETI",
            Dimension::LifestyleFeFi => "L-FEFI",
            Dimension::TemperamentNiSi => "T-NISI",
            Dimension::TemperamentNeSe => "T-NESE",
            Dimension::TemperamentTeFe => "T-TEFE",
            Dimension::TemperamentTiFi => "T-TIFI",
            Dimension::AttitudeINJ => "A-INJ",
            Dimension::AttitudeISJ => "A-ISJ",
            Dimension::AttitudeITP => "A-ITP",
            Dimension::AttitudeIFP => "A-IFP",
            Dimension::AttitudeETJ => "A-ETJ",
            Dimension::AttitudeEFJ => "A-EFJ",
            Dimension::AttitudeENP => "A-ENP",
            Dimension::AttitudeESP => "A-ESP",
        }
    }

    pub fn family(self) -> Family {
        match self {
            Dimension::PreferenceIE
            | Dimension::PreferenceNS
            | Dimension::PreferenceTF
            | Dimension::PreferenceJP => Family::Preference,
            Dimension::LifestyleNiNe
            | Dimension::LifestyleSiSe
            | Dimension::LifestyleTeTi
            | Dimension::LifestyleFeFi => Family::Lifestyle,
            Dimension::TemperamentNiSi
            | Dimension::TemperamentNeSe
            | Dimension::TemperamentTeFe
            | Dimension::TemperamentTiFi => Family::Temperament,
            _ => Family::Attitude,
        }
    }

    pub fn spec(self) -> DimensionSpec {
        use CognitiveFunction::*;
        use Trait::*;

        match self {
            Dimension::PreferenceIE => DimensionSpec::traits(I, E),
            Dimension::PreferenceNS => DimensionSpec::traits(N, S),
            Dimension::PreferenceTF => DimensionSpec::traits(T, F),
            Dimension::PreferenceJP => DimensionSpec::traits(J, P),
            Dimension::LifestyleNiNe => DimensionSpec::with_functions(J, P, Ni, Ne),
            Dimension::LifestyleSiSe => DimensionSpec::with_functions(J, P, Si, Se),
            Dimension::LifestyleTeTi => DimensionSpec::with_functions(J, P, Te, Ti),
            Dimension::LifestyleFeFi => DimensionSpec::with_functions(J, P, Fe, Fi),
            Dimension::TemperamentNiSi => DimensionSpec::with_functions(N, S, Ni, Si),
            Dimension::TemperamentNeSe => DimensionSpec::with_functions(N, S, Ne, Se),
            Dimension::TemperamentTeFe => DimensionSpec::with_functions(T, F, Te, Fe),
            Dimension::TemperamentTiFi => DimensionSpec::with_functions(T, F, Ti, Fi),
            Dimension::AttitudeINJ => DimensionSpec::with_functions(E, I, Se, Ni),
            Dimension::AttitudeISJ => DimensionSpec::with_functions(E, I, Ne, Si),
            Dimension::AttitudeITP => DimensionSpec::with_functions(E, I, Fe, Ti),
            Dimension::AttitudeIFP => DimensionSpec::with_functions(E, I, Te, Fi),
            Dimension::AttitudeETJ => DimensionSpec::with_functions(I, E, Fi, Te),
            Dimension::AttitudeEFJ => DimensionSpec::with_functions(I, E, Ti, Fe),
            Dimension::AttitudeENP => DimensionSpec::with_functions(I, E, Si, Ne),
            Dimension::AttitudeESP => DimensionSpec::with_functions(I, E, Ni, Se),
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Dimension {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Dimension::ALL
            .into_iter()
            .find(|dimension| dimension.tag() == trimmed)
            .ok_or_else(|| EngineError::InvalidCategory {
                category: s.to_string(),
            })
    }
}
