mod commands;
mod terminal;

use commands::{CommandLine, Commands, discover, probe, ranges};
use frontr_common::config::Config;
use terminal::print;

use crate::terminal::spinner;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    spinner::init_logging();

    let cfg = Config {
        no_banner: commands.no_banner,
        quiet: commands.quiet,
    };
    print::banner(cfg.no_banner, cfg.quiet);

    match commands.command {
        Commands::Discover { count, max_latency, budget, location, ranges, seed } => {
            print::header("endpoint discovery", cfg.quiet);
            let args = discover::DiscoverArgs { count, max_latency, budget, location, ranges, seed };
            discover::discover(args, &cfg).await
        }
        Commands::Probe { addrs, port } => {
            print::header("direct probe", cfg.quiet);
            probe::probe(addrs, port, &cfg).await
        }
        Commands::Ranges { ranges: path } => {
            print::header("active ranges", cfg.quiet);
            ranges::ranges(path, &cfg)
        }
    }
}
