use std::ops::Range;

/// Index of a source file within its package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileId(pub(crate) u32);

impl FileId {
    pub fn new(index: usize) -> Self {
        Self(index as u32)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Diagnostic kinds ordered by priority (highest priority first).
///
/// Syntax problems come first: a broken declaration usually produces
/// follow-up name errors inside its span, which get suppressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticKind {
    SyntaxError,
    MissingToken,

    PackageNameMismatch,
    DuplicateDeclaration,
    UnresolvedImport,
    UnknownQualifier,
    UndeclaredName,

    DotImport,
}

impl DiagnosticKind {
    pub fn default_severity(&self) -> Severity {
        match self {
            Self::DotImport => Severity::Warning,
            _ => Severity::Error,
        }
    }

    /// Whether this kind suppresses `other` when spans overlap.
    pub fn suppresses(&self, other: &DiagnosticKind) -> bool {
        self.is_syntax_error() && !other.is_syntax_error()
    }

    pub fn is_syntax_error(&self) -> bool {
        matches!(self, Self::SyntaxError | Self::MissingToken)
    }

    pub fn default_hint(&self) -> Option<&'static str> {
        match self {
            Self::DotImport => Some("names from dot imports are not checked"),
            Self::UnresolvedImport => {
                Some("in-module imports must resolve to a directory with Go files")
            }
            _ => None,
        }
    }

    /// Base message for this diagnostic kind, used when no custom message is provided.
    pub fn fallback_message(&self) -> &'static str {
        match self {
            Self::SyntaxError => "syntax error",
            Self::MissingToken => "missing token",
            Self::PackageNameMismatch => "mismatched package names",
            Self::DuplicateDeclaration => "duplicate declaration",
            Self::UnresolvedImport => "cannot resolve import",
            Self::UnknownQualifier => "unknown package qualifier",
            Self::UndeclaredName => "undefined name",
            Self::DotImport => "dot import",
        }
    }

    /// Template for custom messages. Contains `{}` placeholder for caller-provided detail.
    pub fn custom_message(&self) -> String {
        match self {
            Self::SyntaxError => "syntax error: unexpected {}".to_string(),
            Self::MissingToken => "syntax error: missing {}".to_string(),
            Self::DuplicateDeclaration => "{} redeclared in this package".to_string(),
            Self::UnresolvedImport => "could not import {}".to_string(),
            Self::UnknownQualifier => "undefined: {} (not an imported package)".to_string(),
            Self::UndeclaredName => "undefined: {}".to_string(),
            _ => format!("{}: {{}}", self.fallback_message()),
        }
    }

    /// Render the final message.
    ///
    /// - `None` → returns `fallback_message()`
    /// - `Some(detail)` → returns `custom_message()` with `{}` replaced by detail
    pub fn message(&self, msg: Option<&str>) -> String {
        match msg {
            None => self.fallback_message().to_string(),
            Some(detail) => self.custom_message().replace("{}", detail),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    #[default]
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelatedInfo {
    pub(crate) file: FileId,
    pub(crate) range: Range<usize>,
    pub(crate) message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticMessage {
    pub(crate) kind: DiagnosticKind,
    pub(crate) file: FileId,
    /// Byte range underlined in output.
    pub(crate) range: Range<usize>,
    pub(crate) message: String,
    pub(crate) related: Vec<RelatedInfo>,
    pub(crate) hints: Vec<String>,
}

impl DiagnosticMessage {
    pub(crate) fn new(
        kind: DiagnosticKind,
        file: FileId,
        range: Range<usize>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            file,
            range,
            message: message.into(),
            related: Vec::new(),
            hints: kind.default_hint().map(str::to_owned).into_iter().collect(),
        }
    }

    pub fn kind(&self) -> DiagnosticKind {
        self.kind
    }

    pub fn file(&self) -> FileId {
        self.file
    }

    pub fn range(&self) -> Range<usize> {
        self.range.clone()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn severity(&self) -> Severity {
        self.kind.default_severity()
    }

    pub fn is_error(&self) -> bool {
        self.severity() == Severity::Error
    }
}

impl std::fmt::Display for DiagnosticMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} at {}..{}: {}",
            self.severity(),
            self.range.start,
            self.range.end,
            self.message
        )?;
        for related in &self.related {
            write!(
                f,
                " (related: {} at {}..{})",
                related.message, related.range.start, related.range.end
            )?;
        }
        for hint in &self.hints {
            write!(f, " (hint: {})", hint)?;
        }
        Ok(())
    }
}
