//! Derivation-time errors for breadcrumb trails.

use thiserror::Error;

/// Errors raised while deriving breadcrumb trails. Fatal to the derivation.
#[derive(Debug, Error)]
pub enum BreadcrumbError {
    #[error("Breadcrumb '{node}' names parent '{parent}', which has no breadcrumb")]
    BrokenParentReference { node: String, parent: String },

    #[error("Breadcrumb parents of '{node}' form a cycle: {}", .path.join(" -> "))]
    CyclicGraph { node: String, path: Vec<String> },

    #[error("Invalid breadcrumb table: {0}")]
    Parse(#[from] serde_json::Error),
}
