use miette::{IntoDiagnostic, Result, WrapErr, miette};
use serde_json::Value;
use std::path::{Path, PathBuf};

use clap::Parser;

#[derive(Parser)]
#[command(version, about = "Stamp a version into the extension manifest", long_about = None)]
struct Cli {
    /// Static manifest to read
    #[arg(long, default_value = "extension/manifest.json")]
    manifest: PathBuf,

    /// Where to write the stamped manifest
    #[arg(long, default_value = "dist/manifest.json")]
    out: PathBuf,

    /// Version to stamp (defaults to the workspace version)
    #[arg(long, env = "COMMENTFOLD_VERSION", default_value = env!("CARGO_PKG_VERSION"))]
    set_version: String,
}

fn main() -> Result<()> {
    init_miette();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    build_manifest(&cli.manifest, &cli.out, &cli.set_version)
}

fn build_manifest(manifest: &Path, out: &Path, version: &str) -> Result<()> {
    let source = std::fs::read_to_string(manifest)
        .into_diagnostic()
        .wrap_err_with(|| format!("reading {}", manifest.display()))?;

    let stamped = stamp_version(&source, version)?;

    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .into_diagnostic()
            .wrap_err_with(|| format!("creating {}", parent.display()))?;
    }
    std::fs::write(out, stamped)
        .into_diagnostic()
        .wrap_err_with(|| format!("writing {}", out.display()))?;

    tracing::info!(
        version,
        from = %manifest.display(),
        to = %out.display(),
        "wrote manifest"
    );
    Ok(())
}

/// Parse a manifest, set its `version` field and serialize it compactly.
///
/// Key order is kept; every other field passes through untouched.
fn stamp_version(source: &str, version: &str) -> Result<String> {
    let mut manifest: Value = serde_json::from_str(source).into_diagnostic()?;
    let Some(fields) = manifest.as_object_mut() else {
        return Err(miette!("manifest must be a JSON object"));
    };
    fields.insert("version".to_string(), Value::String(version.to_string()));
    serde_json::to_string(&manifest).into_diagnostic()
}

fn init_miette() {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .with_cause_chain()
                .color(true)
                .context_lines(5)
                .tab_width(2)
                .break_words(true)
                .build(),
        )
    }))
    .expect("couldn't set the miette hook");
    miette::set_panic_hook();
}
