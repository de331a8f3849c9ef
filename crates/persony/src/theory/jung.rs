use std::fmt;

use serde::{Deserialize, Serialize};

use super::mbti::MbtiType;

/// Cognitive functions, the finer-grained layer beneath the four trait axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CognitiveFunction {
    Ni,
    Ne,
    Si,
    Se,
    Ti,
    Te,
    Fi,
    Fe,
}

impl CognitiveFunction {
    pub const ALL: [CognitiveFunction; 8] = [
        CognitiveFunction::Ni,
        CognitiveFunction::Ne,
        CognitiveFunction::Si,
        CognitiveFunction::Se,
        CognitiveFunction::Ti,
        CognitiveFunction::Te,
        CognitiveFunction::Fi,
        CognitiveFunction::Fe,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CognitiveFunction::Ni => "Ni",
            CognitiveFunction::Ne => "Ne",
            CognitiveFunction::Si => "Si",
            CognitiveFunction::Se => "Se",
            CognitiveFunction::Ti => "Ti",
            CognitiveFunction::Te => "Te",
            CognitiveFunction::Fi => "Fi",
            CognitiveFunction::Fe => "Fe",
        }
    }

    /// Perception/judgement family, attitude, and rationality tags.
    pub fn tags(self) -> [&'static str; 3] {
        match self {
            CognitiveFunction::Ni => ["intuition", "introverted", "irrational"],
            CognitiveFunction::Ne => ["intuition", "extroverted", "irrational"],
            CognitiveFunction::Si => ["sensing", "introverted", "irrational"],
            CognitiveFunction::Se => ["sensing", "extroverted", "irrational"],
            CognitiveFunction::Ti => ["thinking", "introverted", "rational"],
            CognitiveFunction::Te => ["thinking", "extroverted", "rational"],
            CognitiveFunction::Fi => ["feeling", "introverted", "rational"],
            CognitiveFunction::Fe => ["feeling", "extroverted", "rational"],
        }
    }
}

impl fmt::Display for CognitiveFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered function stack (dominant, auxiliary, tertiary, inferior) for a type.
pub fn function_stack(kind: MbtiType) -> [CognitiveFunction; 4] {
    use CognitiveFunction::*;

    match kind {
        MbtiType::INTJ => [Ni, Te, Fi, Se],
        MbtiType::INTP => [Ti, Ne, Si, Fe],
        MbtiType::ENTJ => [Te, Ni, Se, Fi],
        MbtiType::ENTP => [Ne, Ti, Fe, Si],
        MbtiType::INFJ => [Ni, Fe, Ti, Se],
        MbtiType::INFP => [Fi, Ne, Si, Te],
        MbtiType::ENFJ => [Fe, Ni, Se, Ti],
        MbtiType::ENFP => [Ne, Fi, Te, Si],
        MbtiType::ISTJ => [Si, Te, Fi, Ne],
        MbtiType::ISFJ => [Si, Fe, Ti, Ne],
        MbtiType::ESTJ => [Te, Si, Ne, Fi],
        MbtiType::ESFJ => [Fe, Si, Ne, Ti],
        MbtiType::ISTP => [Ti, Se, Ni, Fe],
        MbtiType::ISFP => [Fi, Se, Ni, Te],
        MbtiType::ESTP => [Se, Ti, Fe, Ni],
        MbtiType::ESFP => [Se, Fi, Te, Ni],
    }
}

/// Inverse of [`function_stack`]; `None` when the stack belongs to no type.
pub fn type_for_stack(stack: [CognitiveFunction; 4]) -> Option<MbtiType> {
    MbtiType::ALL
        .into_iter()
        .find(|kind| function_stack(*kind) == stack)
}

/// Compact stack label such as `NiTeFiSe`.
pub fn stack_label(kind: MbtiType) -> String {
    function_stack(kind)
        .iter()
        .map(|function| function.as_str())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stacks_are_unique_and_reversible() {
        for kind in MbtiType::ALL {
            assert_eq!(type_for_stack(function_stack(kind)), Some(kind));
        }
        assert_eq!(stack_label(MbtiType::INTJ), "NiTeFiSe");
        assert_eq!(stack_label(MbtiType::ESFP), "SeFiTeNi");
    }

    #[test]
    fn unknown_stack_has_no_type() {
        use CognitiveFunction::*;
        assert_eq!(type_for_stack([Ni, Ne, Si, Se]), None);
    }
}
