//! Output formatting for CLI commands.

use std::io::{self, Write};

use serde::{Deserialize, Serialize};

use crate::analysis::analyzer::StageReport;
use crate::analysis::token::Token;
use crate::cli::args::{OutputFormat, TermgateArgs};
use crate::error::Result;

/// Result structure for text analysis.
#[derive(Debug, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub analyzer: String,
    pub consumer_gate: bool,
    pub lines: Vec<LineAnalysis>,
}

/// Tokens produced for one input line.
#[derive(Debug, Serialize, Deserialize)]
pub struct LineAnalysis {
    pub line: usize,
    pub input: String,
    pub tokens: Vec<Token>,
}

/// Result structure for stage descriptions.
#[derive(Debug, Serialize, Deserialize)]
pub struct StagesResult {
    pub analyzer: String,
    pub consumer_gate: bool,
    pub stages: Vec<StageReport>,
}

/// Results that can be rendered for a terminal.
pub trait HumanReadable {
    fn write_human(&self, out: &mut dyn Write) -> io::Result<()>;
}

impl HumanReadable for AnalysisResult {
    fn write_human(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(
            out,
            "Analyzer: {} (consumer gate: {})",
            self.analyzer,
            on_off(self.consumer_gate)
        )?;
        for line in &self.lines {
            writeln!(out)?;
            writeln!(out, "Line {}: {}", line.line, line.input)?;
            writeln!(out, "─────────────")?;
            if line.tokens.is_empty() {
                writeln!(out, "  (no tokens)")?;
            }
            for token in &line.tokens {
                write_token(out, token)?;
            }
        }
        Ok(())
    }
}

impl HumanReadable for StagesResult {
    fn write_human(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(
            out,
            "Analyzer: {} (consumer gate: {})",
            self.analyzer,
            on_off(self.consumer_gate)
        )?;
        writeln!(out, "Stages:")?;
        writeln!(out, "═══════")?;
        for stage in &self.stages {
            let role = if stage.consumer { "consumer" } else { "-" };
            writeln!(out, "{:>3}  {:<20} {role}", stage.position, stage.name)?;
        }
        Ok(())
    }
}

fn on_off(enabled: bool) -> &'static str {
    if enabled { "on" } else { "off" }
}

fn write_token(out: &mut dyn Write, token: &Token) -> io::Result<()> {
    let part_of_speech = match token.morpheme() {
        Some(morpheme) if !morpheme.part_of_speech.is_empty() => morpheme.part_of_speech.join(","),
        _ => "-".to_string(),
    };
    let mut flags = Vec::new();
    if token.is_keyword() {
        flags.push("keyword");
    }
    if token.is_stopped() {
        flags.push("stopped");
    }

    write!(
        out,
        "  {:>3}  {:<16} {}..{}  {part_of_speech}",
        token.position, token.text, token.start_offset, token.end_offset
    )?;
    if !flags.is_empty() {
        write!(out, "  [{}]", flags.join(", "))?;
    }
    writeln!(out)
}

/// Output a result in the specified format.
pub fn output_result<T>(message: &str, result: &T, args: &TermgateArgs) -> Result<()>
where
    T: Serialize + HumanReadable,
{
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_result(&mut out, message, result, args)
}

/// Write a result in the specified format to `out`.
pub fn write_result<T>(
    out: &mut dyn Write,
    message: &str,
    result: &T,
    args: &TermgateArgs,
) -> Result<()>
where
    T: Serialize + HumanReadable,
{
    match args.output_format {
        OutputFormat::Human => {
            if args.verbosity() > 1 {
                writeln!(out, "{message}")?;
                writeln!(out)?;
            }
            result.write_human(out)?;
        }
        OutputFormat::Json => {
            let json = if args.pretty {
                serde_json::to_string_pretty(result)?
            } else {
                serde_json::to_string(result)?
            };
            writeln!(out, "{json}")?;
        }
    }
    Ok(())
}
