//! Personality theory vocabularies shared by the scoring layers.

pub mod jung;
pub mod mbti;
pub mod secondary;

pub use jung::{function_stack, stack_label, type_for_stack, CognitiveFunction};
pub use mbti::{Dominants, MbtiType, ParseTypeError, Trait, TraitAxis};
pub use secondary::SecondaryTrait;
