// prelude.rs - Convenient re-exports for building and running expressions.
//
//! # Prelude
//!
//! ```
//! use rexcraft::prelude::*;
//!
//! let re = Expression::new().digit(Quantifier::one_or_more());
//! assert_eq!(re.find_first("answer: 42").unwrap().as_deref(), Some("42"));
//! ```

pub use crate::char_set::{CharacterSet, LetterCase, Scope};
pub use crate::error::Error;
pub use crate::escape::escape;
pub use crate::expression::{Expression, Flags};
pub use crate::extract::CaptureMap;
pub use crate::group::GroupKind;
pub use crate::matcher::{Captures, Match, Matcher, MatcherBuilder};
pub use crate::quantifier::{Mode, Quantifier, Repetition};
