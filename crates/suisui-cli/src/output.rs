//! Plain-text renderings of patterns, definitions, matches, and validation
//! results.

use std::io::Write;

use eyre::{Context, Result};
use serde::Serialize;
use suisui_patterns::{Segment, StepArg, StepDefinition, StepMatch};
use suisui_scenario::{Severity, ValidationResult};

fn arg_line(arg: &StepArg) -> String {
    let mut line = format!("{}:{} = {}", arg.name, arg.arg_type, arg.value);
    if !arg.enum_values.is_empty() {
        line.push_str(" [");
        line.push_str(&arg.enum_values.join("|"));
        line.push(']');
    }
    line
}

pub(crate) fn write_segments(writer: &mut dyn Write, segments: &[Segment]) -> Result<()> {
    for segment in segments {
        let written = match segment {
            Segment::Text { content } => writeln!(writer, "text {content:?}"),
            Segment::Arg { arg, .. } => writeln!(writer, "arg {}", arg_line(arg)),
        };
        written.wrap_err("failed to write segment")?;
    }
    Ok(())
}

pub(crate) fn write_definition(writer: &mut dyn Write, definition: &StepDefinition) -> Result<()> {
    let mut line = format!("{} '{}'", definition.keyword, definition.pattern);
    if !definition.location.is_empty() {
        line.push_str(&format!(" ({})", definition.location));
    }
    if definition.is_generic {
        line.push_str(" [generic]");
    }
    writeln!(writer, "{line}").wrap_err_with(|| {
        format!(
            "failed to write step {} '{}'",
            definition.keyword, definition.pattern
        )
    })
}

pub(crate) fn write_match(writer: &mut dyn Write, found: &StepMatch<'_>) -> Result<()> {
    let heading = match found.definition {
        Some(definition) => {
            writeln!(writer, "matched {} '{}'", definition.keyword, definition.pattern)
        }
        None => writeln!(writer, "unresolved"),
    };
    heading.wrap_err("failed to write match result")?;
    for arg in &found.args {
        writeln!(writer, "  {}", arg_line(arg))
            .wrap_err_with(|| format!("failed to write argument {}", arg.name))?;
    }
    Ok(())
}

pub(crate) fn write_validation(
    writer: &mut dyn Write,
    scenario: &str,
    result: &ValidationResult,
) -> Result<()> {
    let status = if result.is_valid { "valid" } else { "invalid" };
    writeln!(writer, "{scenario}: {status}")
        .wrap_err_with(|| format!("failed to write result for scenario {scenario}"))?;
    for issue in &result.issues {
        let severity = match issue.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        writeln!(writer, "  {severity}: {}", issue.message)
            .wrap_err_with(|| format!("failed to write issue for scenario {scenario}"))?;
    }
    Ok(())
}

pub(crate) fn write_json<T: Serialize + ?Sized>(writer: &mut dyn Write, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, value)
        .wrap_err("failed to serialize JSON output")?;
    writer
        .write_all(b"\n")
        .wrap_err("failed to terminate JSON output with newline")
}
