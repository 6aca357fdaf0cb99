use anyhow::{Context, Result};
use clap::Parser;
use perfhunt::cli::Cli;
use perfhunt::config::FileConfig;
use perfhunt::git::{self, CheckoutGuard};
use perfhunt::hunt::{Bisector, HuntObserver};
use perfhunt::report::{self, ProgressPrinter};
use perfhunt::sampler::CommandSampler;
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::DEBUG.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

fn main() -> Result<()> {
    let args = Cli::parse();

    init_tracing(args.debug);

    let file = FileConfig::discover(args.config.as_deref(), &args.repo)?;
    let Some(command) = args.command.clone().or_else(|| file.command.clone()) else {
        anyhow::bail!(
            "No benchmark command. Usage: perfhunt --from <commit> --cmd <benchmark> \
             (or set `command` in perfhunt.toml)"
        );
    };

    let config = file.resolve(args.iterations, args.alpha);
    let bisector = Bisector::new(config)?;

    let revisions = git::revisions_between(&args.repo, &args.from, &args.to)
        .context("Failed to enumerate revisions")?;
    tracing::info!(
        revisions = revisions.len(),
        iterations = bisector.config().iterations,
        alpha = bisector.config().significance_level,
        "starting hunt"
    );

    let mut sampler = CommandSampler::new(&args.repo, command);
    let mut observer: Box<dyn HuntObserver> = if args.quiet {
        Box::new(())
    } else {
        Box::new(ProgressPrinter::stderr())
    };

    let result = {
        let _guard = CheckoutGuard::new(&args.repo).context("Failed to record current checkout")?;
        bisector.hunt(&revisions, &mut sampler, observer.as_mut())?
    };

    print!("{}", report::render(&result, args.format)?);
    if args.format == report::OutputFormat::Json {
        println!();
    }

    Ok(())
}
