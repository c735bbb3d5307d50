//! Pattern compilation and bounded application for the regex engine.
//!
//! `compiler` turns a rule's pattern source into a `Matcher` after the
//! structural checks in `validators` pass. `replacer` applies a `Matcher`
//! repeatedly until a fixed point, under the iteration, time and output
//! guards in `SafetyLimits`.

pub mod compiler;
pub mod replacer;
