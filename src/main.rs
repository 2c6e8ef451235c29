use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use legalkit::patcher::{PatchPlan, Patcher, SpliceOutcome};
use legalkit::{AnchorPolicy, PatcherConfig};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "legalkit", version, about = "Source patcher and PWA icon generator")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Splice the search feature (or a custom plan) into a source file
    Patch {
        /// File to patch in place
        #[arg(long)]
        target: PathBuf,
        /// JSON patch plan; defaults to the built-in search plan
        #[arg(long)]
        plan: Option<PathBuf>,
        /// Skip missing anchors instead of failing
        #[arg(long)]
        lenient: bool,
        /// Report what would change without writing
        #[arg(long)]
        dry_run: bool,
    },
    /// Render the app logo into PNG icons
    Icons {
        /// Output directory
        #[arg(long, default_value = "public")]
        out_dir: PathBuf,
        /// pyramid or scale
        #[arg(long, default_value = "pyramid")]
        design: String,
        /// Icon edge length in pixels; repeatable
        #[arg(long = "size")]
        sizes: Vec<u32>,
    },
}

fn patch(target: PathBuf, plan: Option<PathBuf>, lenient: bool, dry_run: bool) -> Result<()> {
    let config = PatcherConfig {
        target_path: target,
        policy: if lenient {
            AnchorPolicy::Lenient
        } else {
            AnchorPolicy::Strict
        },
        dry_run,
    };
    let patcher = match plan {
        Some(path) => {
            let plan = PatchPlan::from_json_file(&path)
                .with_context(|| format!("loading patch plan {}", path.display()))?;
            Patcher::with_plan(config, plan)
        }
        None => Patcher::new(config),
    };

    let report = patcher
        .run()
        .with_context(|| format!("patching {}", patcher.config().target_path.display()))?;

    for (name, outcome) in &report.outcomes {
        log::debug!("{}: {:?}", name, outcome);
    }
    if !report.changed {
        let all_applied = report
            .outcomes
            .iter()
            .all(|(_, o)| *o == SpliceOutcome::AlreadyApplied);
        if all_applied {
            println!("Search functionality already present, nothing to do");
        } else {
            println!("No changes made to {}", report.target.display());
        }
    } else if dry_run {
        println!("Dry run: {} would be modified", report.target.display());
    } else {
        println!("Search functionality added!");
    }
    Ok(())
}

#[cfg(feature = "icons")]
fn icons(out_dir: PathBuf, design: String, sizes: Vec<u32>) -> Result<()> {
    let design: legalkit::icons::Design = design.parse()?;
    let mut config = legalkit::IconConfig {
        out_dir,
        design,
        ..Default::default()
    };
    if !sizes.is_empty() {
        config.sizes = sizes;
    }
    let written = legalkit::icons::generate(&config).context("generating icons")?;
    for icon in &written {
        println!("Created {}", icon.path.display());
    }
    println!("PWA icons generated!");
    Ok(())
}

#[cfg(not(feature = "icons"))]
fn icons(_out_dir: PathBuf, _design: String, _sizes: Vec<u32>) -> Result<()> {
    anyhow::bail!("legalkit was built without the `icons` feature")
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match cli.command {
        Command::Patch {
            target,
            plan,
            lenient,
            dry_run,
        } => patch(target, plan, lenient, dry_run),
        Command::Icons {
            out_dir,
            design,
            sizes,
        } => icons(out_dir, design, sizes),
    }
}
