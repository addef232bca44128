use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use flowsketch::config::Config;
use flowsketch::lint::Linter;
use flowsketch::sketch::{SketchBuilder, SourceLanguage};
use std::io::Read;
use std::path::{Path, PathBuf};

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("GIT_COMMIT_HASH"),
    ", built ",
    env!("BUILD_TIMESTAMP"),
    ")"
);

#[derive(Parser)]
#[command(
    name = "flowsketch",
    version,
    long_version = LONG_VERSION,
    about = "Control-flow sketch diagrams and tree-walk lint checks for code snippets"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build a control-flow sketch diagram from a source file
    Sketch {
        /// Source file to read, or `-` for stdin
        path: PathBuf,

        /// Source language (defaults to detection from the file extension)
        #[arg(long)]
        lang: Option<SourceLanguage>,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: SketchFormat,
    },
    /// Run tree-walk lint checks over a source file
    Lint {
        /// Source file to read, or `-` for stdin
        path: PathBuf,

        /// Source language (defaults to detection from the file extension)
        #[arg(long)]
        lang: Option<SourceLanguage>,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: LintFormat,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SketchFormat {
    Text,
    Json,
    Dot,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LintFormat {
    Text,
    Json,
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = Config::new()?;

    match cli.command {
        Command::Sketch { path, lang, format } => run_sketch(&path, lang, format, &config),
        Command::Lint { path, lang, format } => run_lint(&path, lang, format, &config),
    }
}

fn run_sketch(
    path: &Path,
    lang: Option<SourceLanguage>,
    format: SketchFormat,
    config: &Config,
) -> Result<()> {
    let language = resolve_language(path, lang, config)?;
    let source = read_source(path)?;

    let mut builder = SketchBuilder::new(language)?;
    let diagram = builder.build(&source);

    match format {
        SketchFormat::Text => {
            for node in diagram.nodes() {
                println!("{}\t{}", node.id, node.label);
            }
        }
        SketchFormat::Json => println!("{}", serde_json::to_string_pretty(&diagram)?),
        SketchFormat::Dot => print!("{}", diagram.to_dot()),
    }

    Ok(())
}

fn run_lint(
    path: &Path,
    lang: Option<SourceLanguage>,
    format: LintFormat,
    config: &Config,
) -> Result<()> {
    let language = resolve_language(path, lang, config)?;
    let source = read_source(path)?;

    let mut linter = Linter::new(language, config.lint.clone())?;
    let issues = linter.check(&source);

    match format {
        LintFormat::Text => {
            if issues.is_empty() {
                println!("No issues found.");
            } else {
                for issue in &issues {
                    println!("{}", issue);
                }
            }
        }
        LintFormat::Json => println!("{}", serde_json::to_string_pretty(&issues)?),
    }

    Ok(())
}

/// Pick the language: explicit flag, then file extension, then the
/// configured fallback
fn resolve_language(
    path: &Path,
    lang: Option<SourceLanguage>,
    config: &Config,
) -> Result<SourceLanguage> {
    if let Some(lang) = lang {
        return Ok(lang);
    }

    if let Some(ext) = path.extension().and_then(|e| e.to_str())
        && let Some(lang) = SourceLanguage::from_extension(ext)
    {
        return Ok(lang);
    }

    config
        .sketch
        .language
        .parse()
        .context("Config fallback language is not usable")
}

fn read_source(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut source = String::new();
        std::io::stdin()
            .read_to_string(&mut source)
            .context("Failed to read source from stdin")?;
        Ok(source)
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_language_prefers_flag() {
        let config = Config::default();
        let lang = resolve_language(
            Path::new("snippet.py"),
            Some(SourceLanguage::Rust),
            &config,
        )
        .unwrap();
        assert_eq!(lang, SourceLanguage::Rust);
    }

    #[test]
    fn test_resolve_language_from_extension() {
        let config = Config::default();
        let lang = resolve_language(Path::new("lib.rs"), None, &config).unwrap();
        assert_eq!(lang, SourceLanguage::Rust);
    }

    #[test]
    fn test_resolve_language_falls_back_to_config() {
        let config = Config::default();
        let lang = resolve_language(Path::new("-"), None, &config).unwrap();
        assert_eq!(lang, SourceLanguage::Python);
    }
}
