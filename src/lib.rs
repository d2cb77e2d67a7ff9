//! # Rexcraft
//!
//! Build regular expressions from small named operations instead of
//! writing pattern strings by hand, and read captured groups back as a
//! structured map.
//!
//! Matching is delegated to [`fancy_regex`](https://crates.io/crates/fancy-regex),
//! which supports every construct the builder can emit: named groups,
//! look-ahead and look-behind, and possessive quantifiers.
//!
//! ## Quick Start
//!
//! ```rust
//! use rexcraft::prelude::*;
//!
//! let word = CharacterSet::include().letters(LetterCase::Both).digits().literals("._-");
//! let re = Expression::new()
//!     .start_of_line(true)
//!     .character_set(&word, Quantifier::one_or_more())
//!     .literal("@", Quantifier::ONCE)
//!     .character_set(&word, Quantifier::one_or_more())
//!     .literal(".", Quantifier::ONCE)
//!     .letter(LetterCase::Both, Quantifier::between(2, 4))
//!     .end_of_line(true);
//!
//! assert!(re.has_match("user.name@example.com").unwrap());
//! assert!(!re.has_match("user.name@example").unwrap());
//! ```
//!
//! ## Captures
//!
//! ```rust
//! use rexcraft::prelude::*;
//!
//! let re = Expression::new()
//!     .group(
//!         Expression::new().digit(Quantifier::exactly(4)),
//!         GroupKind::named("year"),
//!         Quantifier::ONCE,
//!     )
//!     .literal("-", Quantifier::ONCE)
//!     .group(
//!         Expression::new().digit(Quantifier::exactly(2)),
//!         GroupKind::named("month"),
//!         Quantifier::ONCE,
//!     );
//!
//! let caps = re.captures("from 2025-11 to 2026-02").unwrap();
//! assert_eq!(caps.get("year"), Some("2026"));
//! assert_eq!(caps.get("month"), Some("02"));
//! ```
//!
//! ## Module Structure
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`escape`] | Metacharacter escaping |
//! | [`quantifier`] | Repetition counts and greediness |
//! | [`char_set`] | Character class builder |
//! | [`group`] | Group kinds |
//! | [`expression`] | The pattern builder |
//! | [`matcher`] | Engine adapter |
//! | [`extract`] | Capture extraction |
//! | [`patterns`] | Ready-made expressions |

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod char_set;
pub mod error;
pub mod escape;
pub mod expression;
pub mod extract;
pub mod group;
pub mod matcher;
pub mod patterns;
pub mod prelude;
pub mod quantifier;
