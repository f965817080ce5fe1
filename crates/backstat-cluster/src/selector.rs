//! Resource kinds and label selector expressions.

use std::fmt;

/// The two resource kinds the dashboard inventories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    DeploymentConfig,
    VolumeClaim,
}

impl ResourceKind {
    /// Short resource name understood by the platform CLI.
    pub fn cli_name(&self) -> &'static str {
        match self {
            ResourceKind::DeploymentConfig => "dc",
            ResourceKind::VolumeClaim => "pvc",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.cli_name())
    }
}

/// A single equality or inequality expression over resource labels,
/// e.g. `backup=mysql` or `backup!=nfs`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LabelSelector {
    key: String,
    op: SelectorOp,
    value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum SelectorOp {
    Eq,
    Ne,
}

impl LabelSelector {
    /// `key=value`
    pub fn eq(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            op: SelectorOp::Eq,
            value: value.into(),
        }
    }

    /// `key!=value`
    pub fn ne(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            op: SelectorOp::Ne,
            value: value.into(),
        }
    }
}

impl fmt::Display for LabelSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = match self.op {
            SelectorOp::Eq => "=",
            SelectorOp::Ne => "!=",
        };
        write!(f, "{}{}{}", self.key, op, self.value)
    }
}
