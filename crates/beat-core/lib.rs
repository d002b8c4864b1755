//! # Beat Core
//!
//! Compiler for beat-structured episode scripts. Turns loosely structured,
//! human-authored screenplay text into a strictly typed Scene Plan consumed by
//! scene-composition tooling.
//!
//! ## Pipeline
//!
//! - **Segmenter**: splits the text into raw beat blocks and collects
//!   episode-scoped directive tags
//! - **Beat content parser**: classifies every line (dialogue, stage direction,
//!   UI action, FX, scene directive, mail, stats, narration)
//! - **Duration synthesizer**: estimates screen time per beat
//! - **Diagnostics**: advisory warnings with mechanically applicable autofixes
//! - **Output assembler**: aggregates totals and projects legacy scene records
//!
//! ## Quick Start
//!
//! ```rust
//! use beat_core::{parse_script, ParseOptions, Speaker};
//!
//! let script = "## BEAT: OPENING RITUAL\nPrime: \"Hello.\"";
//! let result = parse_script(script, &ParseOptions::default());
//!
//! let plan = result.plan().expect("script has one beat");
//! assert_eq!(plan.beats.len(), 1);
//! assert_eq!(plan.beats[0].speakers, vec![Speaker::Prime]);
//! ```
//!
//! The parser is pure and synchronous. All mutable state is scoped to a single
//! call, so concurrent calls with different inputs are safe.

#![deny(unsafe_code)]

pub mod analysis;
pub mod output;
pub mod parser;
pub mod skeleton;
pub mod taxonomy;
pub mod tokenizer;
pub mod utils;

pub use analysis::{DiagnosticChecks, DiagnosticConfig, Warning, WarningSeverity};
pub use output::{ParseResult, ScenePlan};
pub use parser::{parse_script, ParseError, ParseOptions, SceneParser};
pub use skeleton::{generate_script_skeleton, EventSpec, SkeletonOptions};
pub use taxonomy::{BeatType, Speaker};
pub use utils::{CoreError, Result};

/// Crate version for runtime compatibility checks
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
