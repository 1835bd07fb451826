use crate::data::ShaderCompileReport;
use crate::report::{build_report, newline_count};

/// Boilerplate injected before the user's fragment source: version pragma,
/// output declaration and the shadertoy-style uniform set.
pub const DEFAULT_TEMPLATE_PREFIX: &str = r"
#version 330

out vec4 frag_colour;

uniform vec4 iMouse;
uniform vec3 iResolution;
uniform float iTime;
uniform float iTimeDelta;
uniform int iFrame;
uniform float iFrameRate;

";

/// Boilerplate appended after the user's fragment source: the `main` wrapper
/// that forwards to `mainImage`.
pub const DEFAULT_TEMPLATE_SUFFIX: &str = r"
void main() {

  vec4 color;
  mainImage(color, gl_FragCoord.xy);
  frag_colour = color;
}

";

/// The text wrapped around a user fragment shader before it is handed to the
/// compiler. Both halves end up invisible in reports: [`Self::report`] strips
/// them and shifts every line number back into the user's file.
///
/// Both halves are expected to start and end on line boundaries (the defaults
/// do); the strip arithmetic counts newlines, so a prefix that ends mid-line
/// would bleed its last fragment into the user's first line.
#[derive(Debug, Clone)]
pub struct ShaderTemplate {
    pub prefix: String,
    pub suffix: String,
}

impl Default for ShaderTemplate {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_TEMPLATE_PREFIX.to_owned(),
            suffix: DEFAULT_TEMPLATE_SUFFIX.to_owned(),
        }
    }
}

impl ShaderTemplate {
    pub fn new(prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            suffix: suffix.into(),
        }
    }

    /// Full source to send to the compiler.
    pub fn wrap(&self, body: &str) -> String {
        format!("{}{}{}", self.prefix, body, self.suffix)
    }

    pub fn prefix_line_count(&self) -> usize {
        newline_count(&self.prefix)
    }

    pub fn suffix_line_count(&self) -> usize {
        newline_count(&self.suffix)
    }

    /// Build a report for a compile of `full_source` (as produced by
    /// [`Self::wrap`]) against the raw compiler log, mapped back to the
    /// user's file. `compile_success` is left for the caller to set.
    pub fn report<'a>(
        &self,
        full_source: &'a str,
        error_log: Option<&'a str>,
    ) -> ShaderCompileReport<'a> {
        build_report(full_source, error_log, &self.prefix, &self.suffix)
    }
}
