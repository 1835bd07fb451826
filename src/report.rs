use crate::data::{Line, ShaderCompileReport};

use regex::Regex;

/// Split text into numbered lines. Splits on `\n` only, so a trailing `\r`
/// stays part of its line. A final unterminated line is included, and empty
/// input yields a single empty line numbered 1.
pub fn split_lines(text: &str) -> Vec<Line<'_>> {
    text.split('\n')
        .enumerate()
        .map(|(index, text)| Line {
            text,
            number: index + 1,
        })
        .collect()
}

/// Number of `\n` bytes in `text`. Template prefix/suffix sizes are measured
/// this way: a prefix that ends with a newline contributes exactly the lines
/// it pushes the user's source down by.
pub fn newline_count(text: &str) -> usize {
    text.bytes().filter(|&b| b == b'\n').count()
}

/// Extract `(line number, message)` pairs from a raw compiler info log.
///
/// Two formats are recognized, tried in this order per physical line:
///
/// ```text
/// ERROR: 0:18: Use of undeclared identifier 'color0'
/// 0(23) : error C1503: undefined variable "offset"
/// ```
///
/// Anything else (warnings, continuation lines, vendor formats we do not
/// know) is dropped. Line numbers are reported as-is, in the coordinates of
/// the full compiled source; they are not validated against any line count,
/// so out-of-range numbers stay visible to the caller.
pub fn parse_error_log(log_text: &str) -> Vec<Line<'_>> {
    let khronos = Regex::new(r"^ERROR: 0:(\d+): (.*)").expect("invalid error pattern");
    let vendor = Regex::new(r"^0\((\d+)\)[^:]*: (.*)").expect("invalid error pattern");

    let mut errors = Vec::new();
    for line in split_lines(log_text) {
        let Some(caps) = khronos
            .captures(line.text)
            .or_else(|| vendor.captures(line.text))
        else {
            continue;
        };
        let Ok(number) = caps[1].parse::<usize>() else {
            continue;
        };
        let message = caps.get(2).map_or("", |m| m.as_str());
        errors.push(Line {
            text: message,
            number,
        });
    }
    errors
}

/// Build a [`ShaderCompileReport`] from the full text that was sent to the
/// compiler and its raw error log, mapping everything back to the user's
/// original file.
///
/// `shader_text` includes the injected template prefix and suffix; both are
/// stripped from the line list and every remaining line number (shader and
/// error alike) is shifted up by the prefix size. An error that pointed into
/// the stripped prefix renumbers to 0, which no renderer will anchor to a
/// source line. If prefix plus suffix cover the whole text the shader line
/// list comes back empty rather than underflowing.
///
/// `compile_success` is left `false`; the caller that ran the compilation is
/// the only party that knows the outcome.
pub fn build_report<'a>(
    shader_text: &'a str,
    error_log: Option<&'a str>,
    template_prefix: &str,
    template_suffix: &str,
) -> ShaderCompileReport<'a> {
    let mut error_lines = error_log.map(parse_error_log).unwrap_or_default();
    let mut shader_lines = split_lines(shader_text);

    let prefix_lines = newline_count(template_prefix);
    let suffix_lines = newline_count(template_suffix);

    let total = shader_lines.len();
    if prefix_lines + suffix_lines >= total {
        shader_lines.clear();
    } else {
        shader_lines.truncate(total - suffix_lines);
        shader_lines.drain(..prefix_lines);
    }

    // The first surviving line was numbered prefix_lines + 1, so this cannot
    // underflow for shader lines. Error lines can point anywhere, including
    // into the stripped prefix.
    for line in &mut shader_lines {
        line.number -= prefix_lines;
    }
    for line in &mut error_lines {
        line.number = line.number.saturating_sub(prefix_lines);
    }

    ShaderCompileReport {
        shader_lines,
        error_lines,
        compile_success: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_numbers_lines_sequentially() {
        let lines = split_lines("a\nb\nc");
        assert_eq!(lines.len(), 3);
        for (i, line) in lines.iter().enumerate() {
            assert_eq!(line.number, i + 1);
        }
        assert_eq!(lines[0].text, "a");
        assert_eq!(lines[2].text, "c");
    }

    #[test]
    fn split_keeps_trailing_unterminated_line() {
        let lines = split_lines("a\nb\n");
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[2].text, "");
        assert_eq!(lines[2].number, 3);
    }

    #[test]
    fn split_empty_input_is_one_empty_line() {
        let lines = split_lines("");
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text, "");
        assert_eq!(lines[0].number, 1);
    }

    #[test]
    fn split_is_not_crlf_aware() {
        let lines = split_lines("a\r\nb");
        assert_eq!(lines[0].text, "a\r");
        assert_eq!(lines[1].text, "b");
    }

    #[test]
    fn parse_khronos_format() {
        let errors = parse_error_log("ERROR: 0:18: Use of undeclared identifier 'color0'\n");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].number, 18);
        assert_eq!(errors[0].text, "Use of undeclared identifier 'color0'");
    }

    #[test]
    fn parse_vendor_format() {
        let errors = parse_error_log("0(23) : error C1503: undefined variable \"offset\"\n");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].number, 23);
        assert_eq!(errors[0].text, "error C1503: undefined variable \"offset\"");
    }

    #[test]
    fn parse_drops_unrecognized_lines() {
        let log = "Fragment shader failed to compile with the following errors:\n\
                   ERROR: 0:4: 'foo' : undeclared identifier\n\
                   WARNING: 0:7: extension not supported\n\
                   ERROR: error(#273) 1 compilation errors.  No code generated\n";
        let errors = parse_error_log(log);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].number, 4);
        assert_eq!(errors[0].text, "'foo' : undeclared identifier");
    }

    #[test]
    fn parse_preserves_out_of_range_numbers() {
        let errors = parse_error_log("ERROR: 0:999: end of file unexpected\n");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].number, 999);
    }

    #[test]
    fn parse_mixed_formats_in_one_log() {
        let log = "ERROR: 0:3: bad\n0(5) : error C0000: syntax error\n";
        let errors = parse_error_log(log);
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].number, 3);
        assert_eq!(errors[1].number, 5);
        assert_eq!(errors[1].text, "error C0000: syntax error");
    }

    const PREFIX: &str = "#version 330\nuniform float iTime;\n";
    const SUFFIX: &str = "\nvoid main() {\n}\n";

    fn compiled(body: &str) -> String {
        format!("{PREFIX}{body}{SUFFIX}")
    }

    #[test]
    fn build_strips_template_and_keeps_user_line_count() {
        let full = compiled("vec3 a;\nvec3 b;\n");
        let report = build_report(&full, None, PREFIX, SUFFIX);

        let total = split_lines(&full).len();
        let expected = total - newline_count(PREFIX) - newline_count(SUFFIX);
        assert_eq!(report.shader_lines.len(), expected);
        assert_eq!(report.shader_lines[0].text, "vec3 a;");
        assert_eq!(report.shader_lines[0].number, 1);
        assert_eq!(report.shader_lines[1].number, 2);
    }

    #[test]
    fn build_renumbers_errors_into_user_coordinates() {
        let full = compiled("vec3 a;\nbroken;\n");
        // Prefix is 2 newline-lines, so full-source line 4 is user line 2.
        let log = "ERROR: 0:4: syntax error\n";
        let report = build_report(&full, Some(log), PREFIX, SUFFIX);

        assert_eq!(report.error_lines.len(), 1);
        let error = report.error_lines[0];
        assert_eq!(error.number, 2);
        assert!(error.number > 0 && error.number <= report.shader_lines.len());
    }

    #[test]
    fn build_renumbers_prefix_errors_out_of_range() {
        let full = compiled("vec3 a;\n");
        // Line 1 sits inside the template prefix.
        let report = build_report(&full, Some("ERROR: 0:1: bad uniform\n"), PREFIX, SUFFIX);
        assert_eq!(report.error_lines.len(), 1);
        assert_eq!(report.error_lines[0].number, 0);
    }

    #[test]
    fn build_clamps_strip_underflow_to_empty() {
        // Prefix + suffix newline counts meet the total line count.
        let report = build_report("a\nb\nc", None, "x\ny\n", "z\n");
        assert!(report.shader_lines.is_empty());
    }

    #[test]
    fn build_without_log_has_no_errors_and_no_success_claim() {
        let full = compiled("vec3 a;\n");
        let report = build_report(&full, None, PREFIX, SUFFIX);
        assert!(report.error_lines.is_empty());
        assert!(!report.compile_success);
    }
}
