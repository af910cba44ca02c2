use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "guacagui", version, about = "Tabbed remote desktop gateway shell")]
struct Args {
    /// Verbose diagnostics
    #[arg(long)]
    debug: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    guacagui_lib::run(args.debug)
}
