//! Locale routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (path, headers)
//!     → matcher.rs (exclusion check: internal prefixes, dotted paths)
//!     → policy.rs (locale detection + decision)
//!     → Return: Pass, Redirect, or Rewrite
//!
//! Compilation (at startup and on config reload):
//!     MatcherConfig → ExclusionMatcher (prefix list + dot heuristic)
//!     LocaleConfig  → LocalePolicy (supported set, default, prefix mode)
//! ```
//!
//! # Design Decisions
//! - The exclusion matcher is evaluated first and is authoritative: the
//!   policy is never consulted for an excluded path
//! - Compiled at startup, immutable at runtime; reloads swap the whole
//!   snapshot
//! - No regex in the hot path (prefix matching only)
//! - Deterministic: same input always yields the same decision

pub mod matcher;
pub mod policy;

pub use matcher::ExclusionMatcher;
pub use policy::{LocalePolicy, RouteDecision, LOCALE_COOKIE};
