// SPDX-License-Identifier: MIT
//
// tone — print a dynamic color scheme.
//
// Wires the two library crates together behind a small CLI:
//
//   tone-hct     → color space, contrast math, tonal palettes
//   tone-dynamic → roles, spec versions, scheme resolution, config
//
// Parameters come from an optional TOML file, then flags override it:
//
//   scheme.toml ─┐
//                ├─→ SchemeConfig → DynamicScheme → resolve → stdout
//   --flags ─────┘
//
// Each output row is `name  #rrggbb  tone`. Logs go to stderr.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tone_dynamic::{DynamicScheme, ResolvedColor, Role, SchemeConfig, SpecVersion};
use tracing::info;

/// Resolve a seed color into contrast-checked UI color roles.
#[derive(Parser, Debug)]
#[command(name = "tone", version, about)]
struct Cli {
    /// Seed color, `#RRGGBB` or `#RGB`
    #[arg(short, long)]
    source: Option<String>,

    /// Dark mode
    #[arg(short, long)]
    dark: bool,

    /// Contrast level in [-1, 1]: -1 reduced, 0 standard, 1 high
    #[arg(short, long, allow_negative_numbers = true)]
    contrast: Option<f64>,

    /// Rule version: 2021 or 2025
    #[arg(long)]
    spec: Option<SpecVersion>,

    /// TOML file with `source`, `dark`, `contrast` and `spec` keys
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print only this role (snake_case or camelCase)
    #[arg(short, long)]
    role: Option<Role>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    /// File values first, flags on top.
    fn scheme_config(&self) -> Result<SchemeConfig> {
        let mut config = match &self.config {
            Some(path) => SchemeConfig::load(path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => SchemeConfig::default(),
        };
        if let Some(source) = &self.source {
            config.source.clone_from(source);
        }
        config.dark |= self.dark;
        if let Some(contrast) = self.contrast {
            config.contrast = contrast;
        }
        if let Some(spec) = self.spec {
            config.spec = spec;
        }
        Ok(config)
    }
}

fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .init();
}

fn print_row(color: &ResolvedColor) {
    println!("{:<34}{}  {:.1}", color.name, color.argb().to_hex(), color.tone);
}

fn run(cli: &Cli) -> Result<()> {
    let config = cli.scheme_config()?;
    let scheme: DynamicScheme = config.build().context("building scheme")?;
    info!(
        source = %scheme.source().to_argb(),
        version = %scheme.spec_version(),
        dark = scheme.is_dark(),
        contrast = scheme.contrast_level(),
        "resolving scheme"
    );

    match cli.role {
        Some(role) => print_row(&scheme.resolve(role)?),
        None => {
            for color in scheme.resolve_all()? {
                print_row(&color);
            }
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);
    run(&cli)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_parse() {
        let cli = Cli::try_parse_from([
            "tone",
            "--source",
            "#0066ff",
            "--dark",
            "--contrast",
            "-0.5",
            "--spec",
            "2025",
            "--role",
            "primaryContainer",
        ])
        .unwrap();
        assert_eq!(cli.source.as_deref(), Some("#0066ff"));
        assert!(cli.dark);
        assert_eq!(cli.contrast, Some(-0.5));
        assert_eq!(cli.spec, Some(SpecVersion::V2025));
        assert_eq!(cli.role, Some(Role::PrimaryContainer));
    }

    #[test]
    fn flags_override_defaults() {
        let cli = Cli::try_parse_from(["tone", "--contrast", "1", "--spec", "2025"]).unwrap();
        let config = cli.scheme_config().unwrap();
        assert_eq!(config.source, "#6750a4");
        assert!(!config.dark);
        assert_eq!(config.contrast, 1.0);
        assert_eq!(config.spec, SpecVersion::V2025);
    }

    #[test]
    fn unknown_role_is_rejected() {
        assert!(Cli::try_parse_from(["tone", "--role", "nope"]).is_err());
    }
}
