use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One side of a personality axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Trait {
    I,
    E,
    N,
    S,
    T,
    F,
    J,
    P,
}

impl Trait {
    pub const ALL: [Trait; 8] = [
        Trait::I,
        Trait::E,
        Trait::N,
        Trait::S,
        Trait::T,
        Trait::F,
        Trait::J,
        Trait::P,
    ];

    pub fn axis(self) -> TraitAxis {
        match self {
            Trait::I | Trait::E => TraitAxis::IE,
            Trait::N | Trait::S => TraitAxis::NS,
            Trait::T | Trait::F => TraitAxis::TF,
            Trait::J | Trait::P => TraitAxis::JP,
        }
    }

    pub fn opposite(self) -> Trait {
        match self {
            Trait::I => Trait::E,
            Trait::E => Trait::I,
            Trait::N => Trait::S,
            Trait::S => Trait::N,
            Trait::T => Trait::F,
            Trait::F => Trait::T,
            Trait::J => Trait::P,
            Trait::P => Trait::J,
        }
    }

    pub fn letter(self) -> char {
        match self {
            Trait::I => 'I',
            Trait::E => 'E',
            Trait::N => 'N',
            Trait::S => 'S',
            Trait::T => 'T',
            Trait::F => 'F',
            Trait::J => 'J',
            Trait::P => 'P',
        }
    }

    pub fn from_letter(letter: char) -> Option<Trait> {
        match letter.to_ascii_uppercase() {
            'I' => Some(Trait::I),
            'E' => Some(Trait::E),
            'N' => Some(Trait::N),
            'S' => Some(Trait::S),
            'T' => Some(Trait::T),
            'F' => Some(Trait::F),
            'J' => Some(Trait::J),
            'P' => Some(Trait::P),
            _ => None,
        }
    }

    /// Long-form name used as the analytics tag.
    pub fn category_name(self) -> &'static str {
        match self {
            Trait::I => "introversion",
            Trait::E => "extraversion",
            Trait::N => "intuition",
            Trait::S => "sensing",
            Trait::T => "thinking",
            Trait::F => "feeling",
            Trait::J => "judging",
            Trait::P => "perceiving",
        }
    }
}

impl fmt::Display for Trait {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// The four axes in type-letter order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TraitAxis {
    IE,
    NS,
    TF,
    JP,
}

impl TraitAxis {
    pub const ALL: [TraitAxis; 4] = [TraitAxis::IE, TraitAxis::NS, TraitAxis::TF, TraitAxis::JP];

    pub fn low(self) -> Trait {
        match self {
            TraitAxis::IE => Trait::I,
            TraitAxis::NS => Trait::N,
            TraitAxis::TF => Trait::T,
            TraitAxis::JP => Trait::J,
        }
    }

    pub fn high(self) -> Trait {
        self.low().opposite()
    }

    pub fn index(self) -> usize {
        match self {
            TraitAxis::IE => 0,
            TraitAxis::NS => 1,
            TraitAxis::TF => 2,
            TraitAxis::JP => 3,
        }
    }
}

/// A raw four-letter combination, one letter per axis position.
///
/// Combinations derived from trait scores are always well formed. Combinations built by hand
/// through [`Dominants::new`] are not checked, which is why branch selection treats unknown
/// letter pairs as an error rather than assuming a default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dominants([Trait; 4]);

impl Dominants {
    pub fn new(letters: [Trait; 4]) -> Self {
        Self(letters)
    }

    pub fn letters(&self) -> [Trait; 4] {
        self.0
    }

    pub fn on(&self, axis: TraitAxis) -> Trait {
        self.0[axis.index()]
    }

    /// Resolves the combination to one of the sixteen types when every letter sits on its axis.
    pub fn to_type(&self) -> Option<MbtiType> {
        MbtiType::ALL
            .into_iter()
            .find(|candidate| candidate.traits() == self.0)
    }
}

impl fmt::Display for Dominants {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for letter in self.0 {
            write!(f, "{letter}")?;
        }
        Ok(())
    }
}

impl From<MbtiType> for Dominants {
    fn from(value: MbtiType) -> Self {
        Self(value.traits())
    }
}

/// The sixteen four-letter personality types.
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MbtiType {
    INTJ,
    INTP,
    ENTJ,
    ENTP,
    INFJ,
    INFP,
    ENFJ,
    ENFP,
    ISTJ,
    ISFJ,
    ESTJ,
    ESFJ,
    ISTP,
    ISFP,
    ESTP,
    ESFP,
}

impl MbtiType {
    pub const ALL: [MbtiType; 16] = [
        MbtiType::INTJ,
        MbtiType::INTP,
        MbtiType::ENTJ,
        MbtiType::ENTP,
        MbtiType::INFJ,
        MbtiType::INFP,
        MbtiType::ENFJ,
        MbtiType::ENFP,
        MbtiType::ISTJ,
        MbtiType::ISFJ,
        MbtiType::ESTJ,
        MbtiType::ESFJ,
        MbtiType::ISTP,
        MbtiType::ISFP,
        MbtiType::ESTP,
        MbtiType::ESFP,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            MbtiType::INTJ => "INTJ",
            MbtiType::INTP => "INTP",
            MbtiType::ENTJ => "ENTJ",
            MbtiType::ENTP => "ENTP",
            MbtiType::INFJ => "INFJ",
            MbtiType::INFP => "INFP",
            MbtiType::ENFJ => "ENFJ",
            MbtiType::ENFP => "ENFP",
            MbtiType::ISTJ => "ISTJ",
            MbtiType::ISFJ => "ISFJ",
            MbtiType::ESTJ => "ESTJ",
            MbtiType::ESFJ => "ESFJ",
            MbtiType::ISTP => "ISTP",
            MbtiType::ISFP => "ISFP",
            MbtiType::ESTP => "ESTP",
            MbtiType::ESFP => "ESFP",
        }
    }

    pub fn traits(self) -> [Trait; 4] {
        let mut letters = self.as_str().chars().filter_map(Trait::from_letter);
        let mut traits = [Trait::I; 4];
        for slot in traits.iter_mut() {
            if let Some(letter) = letters.next() {
                *slot = letter;
            }
        }
        traits
    }
}

impl fmt::Display for MbtiType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{0}' is not a four-letter personality type")]
pub struct ParseTypeError(pub String);

impl FromStr for MbtiType {
    type Err = ParseTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase();
        MbtiType::ALL
            .into_iter()
            .find(|candidate| candidate.as_str() == normalized)
            .ok_or_else(|| ParseTypeError(s.to_string()))
    }
}
