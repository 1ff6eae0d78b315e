//! The full compile pipeline: parse → expand → normalize.

use cqql_core::{AttributeNaming, Formula};
use tracing::debug;

use crate::error::Result;
use crate::normalize::{NormalizeOptions, normalize};
use crate::parser::parse;
use crate::weights::expand;

/// Every intermediate form of a compiled formula.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compiled {
    pub parsed: Formula,
    pub expanded: Formula,
    pub normalized: Formula,
}

/// Run all stages on `text`.
pub fn compile<N>(text: &str, opts: &NormalizeOptions, naming: &N) -> Result<Compiled>
where
    N: AttributeNaming + ?Sized,
{
    let parsed = parse(text)?;
    debug!(formula = %parsed, "parsed");

    let expanded = expand(&parsed);
    debug!(formula = %expanded, "expanded weights");

    let normalized = normalize(&expanded, opts, naming)?;
    debug!(formula = %normalized, "normalized");

    Ok(Compiled {
        parsed,
        expanded,
        normalized,
    })
}
