use clap::Parser;
use miette::Result;
use prepflow::cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Reset SIGPIPE to default behavior (terminate silently) so piping to
    // `head` and friends does not panic on a broken pipe.
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    let global = cli.global;
    init_logging(global.verbose);

    match cli.command {
        Commands::Recommend(args) => prepflow::cli::commands::recommend::run(args, &global),
        Commands::Wizard(args) => prepflow::cli::commands::wizard::run(args, &global),
        Commands::Material(cmd) => prepflow::cli::commands::material::run(cmd, &global),
        Commands::Validate(args) => prepflow::cli::commands::validate::run(args),
        Commands::Options(args) => prepflow::cli::commands::options::run(args, &global),
        Commands::Config(cmd) => prepflow::cli::commands::config::run(cmd),
        Commands::Completions(args) => prepflow::cli::commands::completions::run(args),
    }
}

/// Logs go to stderr; `PREPFLOW_LOG` takes precedence over `--verbose`
fn init_logging(verbose: bool) {
    let default = if verbose { "prepflow=debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("PREPFLOW_LOG").unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}
