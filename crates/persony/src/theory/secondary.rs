use std::fmt;

use serde::{Deserialize, Serialize};

/// Two-sided stability axis (neuroticism vs. emotional stability).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SecondaryTrait {
    N1,
    S1,
}

impl SecondaryTrait {
    pub const ALL: [SecondaryTrait; 2] = [SecondaryTrait::N1, SecondaryTrait::S1];

    pub fn as_str(self) -> &'static str {
        match self {
            SecondaryTrait::N1 => "N1",
            SecondaryTrait::S1 => "S1",
        }
    }

    pub fn opposite(self) -> SecondaryTrait {
        match self {
            SecondaryTrait::N1 => SecondaryTrait::S1,
            SecondaryTrait::S1 => SecondaryTrait::N1,
        }
    }

    pub fn category_name(self) -> &'static str {
        match self {
            SecondaryTrait::N1 => "neuroticism",
            SecondaryTrait::S1 => "stability",
        }
    }
}

impl fmt::Display for SecondaryTrait {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
