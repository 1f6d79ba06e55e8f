use eyre::Result;
use structopt::StructOpt;
use vectopng::cli::{self, Options};
use vectopng::Error;

fn main() {
    let opts = match Options::try_parse_from(std::env::args_os()) {
        Ok(opts) => opts,
        Err(e) if cli::is_informational(&e) => e.exit(),
        Err(e) => usage_error(&cli::argument_error(&e)),
    };

    if opts.version {
        println!("{}", vectopng::VERSION);
        return;
    }

    env_logger::Builder::new()
        .filter_level(opts.log_level())
        .parse_default_env()
        .init();

    if let Err(e) = run(opts) {
        println!("ERROR: {:#}", e);
        std::process::exit(1);
    }
}

fn usage_error(e: &Error) -> ! {
    println!("ERROR: {}", e);
    // Nothing more to report if stdout itself is gone.
    let _ = Options::clap().print_help();
    println!();
    std::process::exit(1);
}

fn run(opts: Options) -> Result<()> {
    let config = match opts.into_config() {
        Ok(config) => config,
        Err(e @ Error::InvalidArgument(_)) => usage_error(&e),
        Err(e) => return Err(e.into()),
    };

    vectopng::convert(&config)?;

    Ok(())
}
