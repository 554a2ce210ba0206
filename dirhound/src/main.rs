use colored::Colorize;
use tracing_subscriber::EnvFilter;

mod commands;
mod handlers;

fn print_banner() {
    println!(
        "{}",
        r#"
     _ _      _                           _
  __| (_)_ __| |__   ___  _   _ _ __   __| |
 / _` | | '__| '_ \ / _ \| | | | '_ \ / _` |
| (_| | | |  | | | | (_) | |_| | | | | (_| |
 \__,_|_|_|  |_| |_|\___/ \__,_|_| |_|\__,_|
"#
        .bright_cyan()
    );
    println!(
        "{}\n",
        format!("dirhound v{} - hidden path discovery", env!("CARGO_PKG_VERSION")).bright_white()
    );
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cmd = commands::command_argument_builder();
    let chosen_command = cmd.get_matches();
    let quiet = chosen_command.get_flag("quiet");

    if !quiet {
        print_banner();
    }

    match chosen_command.subcommand() {
        Some(("scan", sub_matches)) => handlers::handle_scan(sub_matches, quiet).await,
        None => {}
        _ => unreachable!("clap should ensure we don't get here"),
    }
}
