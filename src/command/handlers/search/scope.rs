use crate::engine::tools::ToolName;

/// Which tools an aggregating query merges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolScope {
    /// Every known tool, whatever the caller asked for.
    All,
    /// A single tool.
    Only(ToolName),
    /// The caller's tools minus one.
    AllExcept(ToolName),
}

impl ToolScope {
    pub fn resolve(&self, requested: &[ToolName]) -> Vec<ToolName> {
        match self {
            ToolScope::All => ToolName::ALL.to_vec(),
            ToolScope::Only(tool) => vec![*tool],
            ToolScope::AllExcept(excluded) => requested
                .iter()
                .copied()
                .filter(|tool| tool != excluded)
                .collect(),
        }
    }
}
