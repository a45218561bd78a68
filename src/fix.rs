//! Applying automatic fixes to source text.

use tracing::debug;

use crate::config::Options;
use crate::registry::RegistrySet;
use crate::source::SourceText;
use crate::verify::{check_source, Diagnostic, Fix};

/// Most analysis passes [`fix_until_stable`] will run.
pub const MAX_FIX_PASSES: usize = 10;

/// Result of applying a batch of fixes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixOutcome {
    /// The rewritten text.
    pub text: String,
    /// How many fixes were applied.
    pub applied: usize,
}

/// Applies `fixes` to `text` in range order. A fix overlapping one already
/// applied is skipped; it is expected to reappear on the next pass.
#[must_use]
pub fn apply_edits<'a>(text: &str, fixes: impl IntoIterator<Item = &'a Fix>) -> FixOutcome {
    let mut fixes: Vec<&Fix> = fixes.into_iter().collect();
    fixes.sort_by_key(|fix| (fix.range.start, fix.range.end));

    let mut out = String::with_capacity(text.len());
    let mut copied = 0;
    let mut applied = 0;
    for fix in fixes {
        if fix.range.start < copied || fix.range.end > text.len() {
            continue;
        }
        out.push_str(&text[copied..fix.range.start]);
        out.push_str(&fix.text);
        copied = fix.range.end;
        applied += 1;
    }
    out.push_str(&text[copied..]);
    FixOutcome { text: out, applied }
}

/// Applies the automatic fix of every diagnostic that has one. Suggestions
/// are never applied.
#[must_use]
pub fn apply_fixes(text: &str, diagnostics: &[Diagnostic]) -> FixOutcome {
    apply_edits(text, diagnostics.iter().filter_map(|d| d.fix.as_ref()))
}

/// Re-analyzes and fixes `text` until no fix applies or
/// [`MAX_FIX_PASSES`] is reached.
pub async fn fix_until_stable(text: &str, registries: &RegistrySet, options: &Options) -> FixOutcome {
    let mut current = FixOutcome { text: text.to_string(), applied: 0 };
    for pass in 1..=MAX_FIX_PASSES {
        let diagnostics = check_source(&SourceText::new(current.text.as_str()), registries, options).await;
        let next = apply_fixes(&current.text, &diagnostics);
        if next.applied == 0 {
            break;
        }
        debug!(pass, applied = next.applied, "applied fixes");
        current = FixOutcome { text: next.text, applied: current.applied + next.applied };
    }
    current
}
