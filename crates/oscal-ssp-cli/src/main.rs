//! oscal-ssp CLI - Inspect OSCAL System Security Plans
//!
//! Validates SSP XML documents, classifies them into a FedRAMP baseline,
//! extracts their controls, and locates nodes by fingerprint.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::debug;

mod error;
mod output;

use error::{CliError, Result};
use oscal_ssp::compliance::vocabulary::{CONTROL_ORIGINATIONS, IMPLEMENTATION_STATUSES};
use oscal_ssp::compliance::{detect_baseline, DocumentValidator, ValidationResult};
use oscal_ssp::fingerprint::resolve_xpath;
use oscal_ssp::observability::{self, LogFormat, ObservabilityConfig};
use oscal_ssp::render::{DocumentRenderer, JsonRenderer};
use oscal_ssp::tree::{NodeKind, TreeNavigator, XmlTree};
use oscal_ssp::{ExtractionConfig, Extractor, Fingerprint, SspError};

/// oscal-ssp - OSCAL System Security Plan inspection tool
#[derive(Parser)]
#[command(name = "oscal-ssp")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log output format (overrides LOG_FORMAT)
    #[arg(long, value_enum, global = true)]
    log_format: Option<LogFormatArg>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum LogFormatArg {
    Pretty,
    Json,
    Compact,
}

impl From<LogFormatArg> for LogFormat {
    fn from(arg: LogFormatArg) -> Self {
        match arg {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Json => LogFormat::Json,
            LogFormatArg::Compact => LogFormat::Compact,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Extract metadata, system characteristics, and controls
    Extract {
        /// SSP XML file
        file: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Extract requirements in parallel regardless of SSP_PARALLEL
        #[arg(long)]
        parallel: bool,
    },

    /// Check namespace and required sections
    Validate {
        /// SSP XML file
        file: PathBuf,

        /// Treat warnings as errors
        #[arg(short, long)]
        strict: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Expected root namespace (overrides OSCAL_NAMESPACE)
        #[arg(long, value_name = "URI")]
        namespace: Option<String>,
    },

    /// Print the FedRAMP baseline the document declares
    Baseline {
        /// SSP XML file
        file: PathBuf,
    },

    /// Print the fingerprint of every element with a given name
    Locate {
        /// SSP XML file
        file: PathBuf,

        /// Element local name, e.g. implemented-requirement
        tag: String,

        /// Also print the index-free shape
        #[arg(long)]
        shape: bool,
    },

    /// Find the node at an indexed path
    Resolve {
        /// SSP XML file
        file: PathBuf,

        /// Indexed path, e.g. /system-security-plan[1]/metadata[1]
        xpath: String,
    },

    /// List the implementation-status and control-origination vocabularies
    Vocabulary {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_logging(&cli) {
        output::error(&e.to_string());
        return ExitCode::FAILURE;
    }

    let result = match cli.command {
        Commands::Extract {
            file,
            json,
            parallel,
        } => cmd_extract(&file, json, parallel),

        Commands::Validate {
            file,
            strict,
            json,
            namespace,
        } => cmd_validate(&file, strict, json, namespace),

        Commands::Baseline { file } => cmd_baseline(&file),

        Commands::Locate { file, tag, shape } => cmd_locate(&file, &tag, shape),

        Commands::Resolve { file, xpath } => cmd_resolve(&file, &xpath),

        Commands::Vocabulary { json } => cmd_vocabulary(json),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}

fn init_logging(cli: &Cli) -> Result<()> {
    let mut config = ObservabilityConfig::from_env();
    if cli.verbose {
        config.log_filter = "oscal_ssp=debug".to_string();
    }
    if let Some(format) = cli.log_format {
        config.log_format = format.into();
    }
    observability::init(&config)?;
    Ok(())
}

// =============================================================================
// Command Implementations
// =============================================================================

fn cmd_extract(file: &Path, json: bool, parallel: bool) -> Result<()> {
    debug!(file = %file.display(), json, parallel, "Running extract");
    let mut config = ExtractionConfig::from_env();
    if parallel {
        config.parallel = true;
    }

    let tree = XmlTree::from_file(file)?;
    let baseline = detect_baseline(&tree);
    let document = Extractor::new(config).extract(&tree)?;

    if json {
        println!("{}", JsonRenderer::pretty().render(document, baseline)?);
    } else {
        output::print_document(&document, baseline);
    }

    Ok(())
}

fn cmd_validate(file: &Path, strict: bool, json: bool, namespace: Option<String>) -> Result<()> {
    debug!(file = %file.display(), strict, json, "Running validate");
    let expected = namespace.unwrap_or_else(|| ExtractionConfig::from_env().expected_namespace);
    let xml = read_source(file)?;
    let result = DocumentValidator::new(expected).validate_str(&xml);

    if json {
        println!("{}", result.to_json()?);
    } else {
        output::print_validation_result(&result);
    }

    validation_outcome(&result, strict)
}

fn cmd_baseline(file: &Path) -> Result<()> {
    debug!(file = %file.display(), "Running baseline");
    let tree = XmlTree::from_file(file)?;
    let baseline = detect_baseline(&tree);
    println!("{}", baseline.name());
    Ok(())
}

fn cmd_locate(file: &Path, tag: &str, shape: bool) -> Result<()> {
    debug!(file = %file.display(), tag, shape, "Running locate");
    let tree = XmlTree::from_file(file)?;
    let fingerprints = locate(&tree, tag);

    if fingerprints.is_empty() {
        output::warning(&format!("No <{}> elements found", tag));
    } else {
        output::print_fingerprints(&fingerprints, shape);
        output::info(&format!("{} <{}> element(s)", fingerprints.len(), tag));
    }
    Ok(())
}

fn cmd_resolve(file: &Path, xpath: &str) -> Result<()> {
    debug!(file = %file.display(), xpath, "Running resolve");
    let tree = XmlTree::from_file(file)?;
    let node = resolve_xpath(&tree, xpath).ok_or_else(|| CliError::no_match(xpath))?;

    let fp = Fingerprint::of(&tree, node);
    println!("{}", fp.xpath);
    println!("  shape: {}", fp.shape);
    match tree.kind(node) {
        Some(NodeKind::Element) => {
            println!("  element: {}", tree.local_name(node).unwrap_or_default());
            if let Some(ns) = tree.namespace_uri(node) {
                println!("  namespace: {}", ns);
            }
            for (name, value) in tree.attributes(node) {
                println!("  @{}: {}", name, value);
            }
            let text = tree.descendant_text(node);
            if !text.trim().is_empty() {
                println!("  text: {}", output::preview(&text, 80));
            }
        }
        Some(kind) => {
            println!("  kind: {:?}", kind);
            println!("  text: {}", output::preview(tree.text(node).unwrap_or_default(), 80));
        }
        None => {}
    }
    Ok(())
}

fn cmd_vocabulary(json: bool) -> Result<()> {
    if json {
        let table = |entries: &[(&str, u8)]| {
            entries
                .iter()
                .map(|(value, ordinal)| serde_json::json!({ "value": value, "ordinal": ordinal }))
                .collect::<Vec<_>>()
        };
        output::print_json(&serde_json::json!({
            "implementation-status": table(IMPLEMENTATION_STATUSES),
            "control-origination": table(CONTROL_ORIGINATIONS),
        }))?;
    } else {
        output::print_vocabulary();
    }
    Ok(())
}

// =============================================================================
// Helpers
// =============================================================================

/// Fingerprints of every element with local name `tag`, in document order
fn locate(tree: &XmlTree, tag: &str) -> Vec<Fingerprint> {
    tree.descendants(tree.document())
        .into_iter()
        .filter(|&node| tree.is_element(node) && tree.local_name(node) == Some(tag))
        .map(|node| Fingerprint::of(tree, node))
        .collect()
}

fn read_source(file: &Path) -> Result<String> {
    std::fs::read_to_string(file).map_err(|source| {
        CliError::Ssp(SspError::Io {
            path: file.to_path_buf(),
            source,
        })
    })
}

/// Map a validation result to the command's exit status
fn validation_outcome(result: &ValidationResult, strict: bool) -> Result<()> {
    if !result.is_valid {
        return Err(CliError::ValidationFailed {
            count: result.errors.len(),
        });
    }
    if strict && !result.warnings.is_empty() {
        return Err(CliError::StrictWarnings {
            count: result.warnings.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use oscal_ssp::testing::SspFixture;

    #[test]
    fn test_parse_extract() {
        let cli = Cli::try_parse_from(["oscal-ssp", "extract", "ssp.xml", "--json"]).unwrap();
        match cli.command {
            Commands::Extract {
                file,
                json,
                parallel,
            } => {
                assert_eq!(file, PathBuf::from("ssp.xml"));
                assert!(json);
                assert!(!parallel);
            }
            _ => panic!("expected extract"),
        }
    }

    #[test]
    fn test_parse_validate_with_namespace() {
        let cli = Cli::try_parse_from([
            "oscal-ssp",
            "validate",
            "ssp.xml",
            "--strict",
            "--namespace",
            "urn:custom",
        ])
        .unwrap();
        match cli.command {
            Commands::Validate {
                strict, namespace, ..
            } => {
                assert!(strict);
                assert_eq!(namespace.as_deref(), Some("urn:custom"));
            }
            _ => panic!("expected validate"),
        }
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["oscal-ssp", "vocabulary", "-v", "--log-format", "json"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(cli.log_format, Some(LogFormatArg::Json)));
    }

    #[test]
    fn test_locate_requires_tag() {
        assert!(Cli::try_parse_from(["oscal-ssp", "locate", "ssp.xml"]).is_err());
    }

    #[test]
    fn test_validation_outcome() {
        let valid = DocumentValidator::default().validate_str(&SspFixture::new().build());
        assert!(validation_outcome(&valid, true).is_ok());

        let missing = DocumentValidator::default()
            .validate_str(&SspFixture::new().without_control_implementation().build());
        assert!(validation_outcome(&missing, false).is_ok());
        assert!(matches!(
            validation_outcome(&missing, true),
            Err(CliError::StrictWarnings { count: 1 })
        ));

        let malformed = DocumentValidator::default().validate_str("<open>");
        assert!(matches!(
            validation_outcome(&malformed, false),
            Err(CliError::ValidationFailed { count: 1 })
        ));
    }

    #[test]
    fn test_locate_in_document_order() {
        let xml = SspFixture::new()
            .control("ac-1", &[])
            .control("ac-2", &[])
            .build();
        let tree = XmlTree::parse(&xml).unwrap();
        let found: Vec<String> = locate(&tree, "implemented-requirement")
            .into_iter()
            .map(|fp| fp.xpath)
            .collect();
        assert_eq!(
            found,
            vec![
                "/system-security-plan[1]/control-implementation[1]/implemented-requirement[1]",
                "/system-security-plan[1]/control-implementation[1]/implemented-requirement[2]",
            ]
        );
        assert!(locate(&tree, "nothing-here").is_empty());
    }

    #[test]
    fn test_read_source_missing_file() {
        let err = read_source(Path::new("/nonexistent/ssp.xml")).unwrap_err();
        assert!(matches!(err, CliError::Ssp(SspError::Io { .. })));
    }
}
