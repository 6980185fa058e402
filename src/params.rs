//! Request parameter assembly
//!
//! Every operation routes through [`ParamBuilder`]: it is the single
//! chokepoint that translates read/write intent into alias selection, so no
//! component ever names a physical index directly.

use crate::names::IndexNames;

/// Which alias an operation targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    /// Route through the stable `base_read` alias
    Read,
    /// Route through the `base_write` alias (moves during a rebuild)
    Write,
}

impl OperationKind {
    fn suffix(self) -> &'static str {
        match self {
            OperationKind::Read => "read",
            OperationKind::Write => "write",
        }
    }
}

/// Parameters common to most engine calls
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestParams {
    /// Alias the call targets: `base_read` or `base_write`
    pub index: String,

    /// Category (type) within the index
    pub category: String,

    /// Comma-joined stored-field selector (`_source`, `_timestamp`), when any
    pub fields: Option<String>,

    /// Result page size, when bounded
    pub size: Option<usize>,

    /// Result page offset, when bounded
    pub from: Option<usize>,
}

/// Assembles [`RequestParams`] for one record type's logical index
#[derive(Debug, Clone)]
pub struct ParamBuilder {
    names: IndexNames,
}

impl ParamBuilder {
    pub fn new(names: IndexNames) -> Self {
        Self { names }
    }

    /// Name derivations backing this builder
    pub fn names(&self) -> &IndexNames {
        &self.names
    }

    /// Build basic request parameters
    ///
    /// `want_source` and `want_timestamp` request the `_source` and
    /// `_timestamp` stored fields; when neither is set the selector is
    /// omitted entirely.
    pub fn basic(
        &self,
        kind: OperationKind,
        want_source: bool,
        want_timestamp: bool,
        limit: Option<usize>,
        offset: Option<usize>,
    ) -> RequestParams {
        let mut field_names = Vec::new();
        if want_source {
            field_names.push("_source");
        }
        if want_timestamp {
            field_names.push("_timestamp");
        }

        RequestParams {
            index: format!("{}_{}", self.names.logical(), kind.suffix()),
            category: self.names.category().to_string(),
            fields: if field_names.is_empty() {
                None
            } else {
                Some(field_names.join(","))
            },
            size: limit,
            from: offset,
        }
    }

    /// Read-alias parameters with no stored-field selector or paging
    pub fn read(&self) -> RequestParams {
        self.basic(OperationKind::Read, false, false, None, None)
    }

    /// Write-alias parameters with no stored-field selector or paging
    pub fn write(&self) -> RequestParams {
        self.basic(OperationKind::Write, false, false, None, None)
    }
}
