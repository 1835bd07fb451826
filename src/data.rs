#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    /// Borrowed slice of the buffer this line was split from.
    pub text: &'a str,
    /// 1-based line number. For error lines this is the shader line the
    /// message refers to, which may fall outside the source once the
    /// template prefix has been stripped.
    pub number: usize,
}

/// How a line should be rendered in an annotated report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Compiler message attached to a source line.
    Error,
    /// Source line with at least one attached error.
    SourceWithError,
    /// Regular source line.
    Source,
}

/// Result of normalizing one compile attempt. Line numbers are in the
/// coordinates of the user's original file, template boilerplate removed.
///
/// A fresh report fully replaces any previous one; reports are never merged.
#[derive(Debug, Default)]
pub struct ShaderCompileReport<'a> {
    pub shader_lines: Vec<Line<'a>>,
    pub error_lines: Vec<Line<'a>>,
    /// Set by whoever drove the compilation. An empty `error_lines` does not
    /// imply success: callers pass no error log at all on the success path.
    pub compile_success: bool,
}
