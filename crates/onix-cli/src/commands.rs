use anyhow::{Context, Result};
use comfy_table::Table;
use tracing::info_span;

use onix_cli::config::{ConfigOverrides, PipelineConfig};
use onix_core::{ExtractionOptions, JsonStateRepository, run_extraction};
use onix_standards::{load_classification_table, load_subject_phrases};

use crate::cli::{ExtractArgs, LookupArgs, MatchArgs};
use crate::summary::apply_table_style;
use crate::types::ExtractResult;

pub fn run_extract(config: PipelineConfig, args: &ExtractArgs) -> Result<ExtractResult> {
    let config = config.with_overrides(ConfigOverrides {
        source_dir: args.source_dir.clone(),
        classification_csv: args.classification.clone(),
        subject_headings_csv: args.subject_headings.clone(),
        output: args.output.clone(),
        state: args.state.clone(),
    });
    let options = ExtractionOptions {
        source_dir: config.source_dir,
        classification_csv: config.classification_csv,
        subject_headings_csv: config.subject_headings_csv,
        output: config.output,
        dry_run: args.dry_run,
    };
    let repository = JsonStateRepository::new(&config.state);
    let report = run_extraction(&options, &repository)?;
    Ok(ExtractResult {
        report,
        output: options.output,
        state: config.state,
        dry_run: args.dry_run,
    })
}

pub fn run_lookup(config: PipelineConfig, args: &LookupArgs) -> Result<()> {
    let span = info_span!("lookup", codes = args.codes.len());
    let _guard = span.enter();
    let path = args
        .classification
        .clone()
        .unwrap_or(config.classification_csv);
    let table = load_classification_table(&path)
        .with_context(|| format!("load classification sheet {}", path.display()))?;

    let mut output = Table::new();
    output.set_header(vec!["Code", "Primary", "Secondary", "Custom"]);
    apply_table_style(&mut output);
    for code in &args.codes {
        let found = table.lookup(code);
        if found.is_empty() {
            output.add_row(vec![code.as_str(), "-", "-", "-"]);
        } else {
            output.add_row(vec![
                code.clone(),
                found.primary,
                found.secondary,
                found.custom_tag,
            ]);
        }
    }
    println!("{output}");
    Ok(())
}

pub fn run_match(config: PipelineConfig, args: &MatchArgs) -> Result<()> {
    let path = args
        .subject_headings
        .clone()
        .unwrap_or(config.subject_headings_csv);
    let matcher = load_subject_phrases(&path)
        .with_context(|| format!("load subject headings {}", path.display()))?;
    let tags = matcher.matching_tags(&args.text);
    if tags.is_empty() {
        println!("No subject phrases matched.");
    } else {
        println!("{}", tags.join(", "));
    }
    Ok(())
}
