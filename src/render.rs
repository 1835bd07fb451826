use std::io::{self, Write};

use crate::data::{Line, LineKind, ShaderCompileReport};

/// Column of the first non-space character of a source line, used to align
/// error messages under the code they point at. Empty and all-space lines
/// align at column 0.
pub fn line_indentation(line: &Line<'_>) -> usize {
    line.text.bytes().position(|b| b != b' ').unwrap_or(0)
}

/// Walk the report and emit every shader line through `print_line`,
/// interleaving the errors attached to it.
///
/// For each shader line, all matching errors are emitted first (as
/// [`LineKind::Error`], indented under the line's first non-space character),
/// then the line itself, tagged [`LineKind::SourceWithError`] if anything
/// matched. Error lines are assumed sorted ascending by line number, as the
/// parser produces them; the error cursor only moves forward, so an unsorted
/// log silently loses annotations. Errors numbered below the current line
/// (for instance renumbered into the stripped template prefix) are skipped
/// without blocking later matches.
///
/// Returns the total number of bytes the sink reported written.
pub fn render_report<'a, W, F>(
    report: &ShaderCompileReport<'a>,
    out: &mut W,
    mut print_line: F,
) -> io::Result<usize>
where
    W: Write,
    F: FnMut(&Line<'a>, LineKind, usize, &mut W) -> io::Result<usize>,
{
    let errors = &report.error_lines;
    let mut cursor = 0;
    let mut written = 0;

    for shader_line in &report.shader_lines {
        while cursor < errors.len() && errors[cursor].number < shader_line.number {
            cursor += 1;
        }

        let mut has_error = false;
        let mut indentation = 0;
        while cursor < errors.len() && errors[cursor].number == shader_line.number {
            if !has_error {
                indentation = line_indentation(shader_line);
                has_error = true;
            }
            written += print_line(&errors[cursor], LineKind::Error, indentation, out)?;
            cursor += 1;
        }

        let kind = if has_error {
            LineKind::SourceWithError
        } else {
            LineKind::Source
        };
        written += print_line(shader_line, kind, 0, out)?;
    }
    Ok(written)
}

/// Console sink: ANSI-colored, yellow italic for error messages, red bold
/// for the offending source line, a 3-wide number gutter for source lines.
pub fn print_console<W: Write>(
    line: &Line<'_>,
    kind: LineKind,
    indentation: usize,
    out: &mut W,
) -> io::Result<usize> {
    let rendered = match kind {
        LineKind::Error => format!(
            "\x1b[33;3m {:width$}{}\x1b[0m\n",
            "",
            line.text,
            width = indentation + 5
        ),
        LineKind::SourceWithError => {
            format!("\x1b[31;1m {:3} :{}\x1b[0m\n", line.number, line.text)
        }
        LineKind::Source => format!(" {:3} :{}\n", line.number, line.text),
    };
    out.write_all(rendered.as_bytes())?;
    Ok(rendered.len())
}

/// Same layout as [`print_console`] without escape codes, for UI widgets
/// that do their own styling and for tests.
pub fn print_plain<W: Write>(
    line: &Line<'_>,
    kind: LineKind,
    indentation: usize,
    out: &mut W,
) -> io::Result<usize> {
    let rendered = match kind {
        LineKind::Error => format!(" {:width$}{}\n", "", line.text, width = indentation + 5),
        LineKind::SourceWithError | LineKind::Source => {
            format!(" {:3} :{}\n", line.number, line.text)
        }
    };
    out.write_all(rendered.as_bytes())?;
    Ok(rendered.len())
}

/// Flat numbered list of just the error lines, without the source text.
pub fn render_error_list<W: Write>(
    report: &ShaderCompileReport<'_>,
    out: &mut W,
) -> io::Result<usize> {
    let mut written = 0;
    for line in &report.error_lines {
        let rendered = format!(" {:3} :{}\n", line.number, line.text);
        out.write_all(rendered.as_bytes())?;
        written += rendered.len();
    }
    Ok(written)
}

/// Render the whole annotated report to a string with [`print_plain`].
pub fn render_to_string(report: &ShaderCompileReport<'_>) -> String {
    let mut buffer = Vec::new();
    // Vec<u8> as an io::Write sink cannot fail.
    let _ = render_report(report, &mut buffer, print_plain);
    String::from_utf8_lossy(&buffer).into_owned()
}
