//! Command implementations for the termgate CLI.

use std::io::{self, BufRead};
use std::path::Path;

use log::info;

use crate::analysis::analyzer::{AnalyzerConfig, MorphemeAnalyzer};
use crate::cli::args::*;
use crate::cli::output::*;
use crate::error::{Result, TermgateError};

/// Execute a CLI command.
pub fn execute_command(args: TermgateArgs) -> Result<()> {
    match &args.command {
        Command::Analyze(analyze_args) => analyze_text(analyze_args.clone(), &args),
        Command::Stages(stages_args) => show_stages(stages_args.clone(), &args),
    }
}

/// Analyze the given text, or each line of stdin.
fn analyze_text(args: AnalyzeArgs, cli_args: &TermgateArgs) -> Result<()> {
    let mut config = load_config(args.config.as_deref())?;
    if args.no_consumer_gate {
        config.consumer_gate = false;
    }
    let analyzer = config.build()?;

    let inputs = match args.text {
        Some(text) => vec![text],
        None => read_lines(io::stdin().lock())?,
    };
    if inputs.is_empty() {
        return Err(TermgateError::invalid_argument("no text given and stdin is empty"));
    }

    let result = analyze_lines(&analyzer, &inputs)?;
    info!(
        "analyzed {} lines into {} tokens",
        result.lines.len(),
        result.lines.iter().map(|l| l.tokens.len()).sum::<usize>()
    );
    output_result("Analysis completed", &result, cli_args)
}

/// Describe the stages of the configured analyzer.
fn show_stages(args: StagesArgs, cli_args: &TermgateArgs) -> Result<()> {
    let analyzer = load_config(args.config.as_deref())?.build()?;
    let result = StagesResult {
        analyzer: analyzer.analyzer_name().to_string(),
        consumer_gate: analyzer.consumer_gate(),
        stages: analyzer.describe_stages()?,
    };
    output_result("Analyzer stages", &result, cli_args)
}

/// Load an analyzer configuration, falling back to the default one.
pub fn load_config(path: Option<&Path>) -> Result<AnalyzerConfig> {
    match path {
        Some(path) => {
            info!("loading analyzer config from {}", path.display());
            AnalyzerConfig::from_file(path)
        }
        None => Ok(AnalyzerConfig::default()),
    }
}

/// Run one analysis pass per input, each in a fresh session.
pub fn analyze_lines<S: AsRef<str>>(
    analyzer: &MorphemeAnalyzer,
    inputs: &[S],
) -> Result<AnalysisResult> {
    let mut lines = Vec::with_capacity(inputs.len());
    let mut session = analyzer.new_session();
    for (i, input) in inputs.iter().enumerate() {
        let input = input.as_ref();
        session.reset();
        let tokens = analyzer.analyze_in(input, &session)?.collect();
        lines.push(LineAnalysis {
            line: i + 1,
            input: input.to_string(),
            tokens,
        });
    }

    Ok(AnalysisResult {
        analyzer: analyzer.analyzer_name().to_string(),
        consumer_gate: analyzer.consumer_gate(),
        lines,
    })
}

fn read_lines<R: BufRead>(reader: R) -> Result<Vec<String>> {
    let mut lines = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if !line.trim().is_empty() {
            lines.push(line);
        }
    }
    Ok(lines)
}
