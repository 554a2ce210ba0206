use clap::{arg, command};
use url::Url;

pub(crate) fn command_argument_builder() -> clap::Command {
    clap::Command::new("dirhound")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("dirhound")
        .arg(arg!(-q --"quiet" "Suppress banner and non-essential output").required(false))
        .subcommand_required(false)
        .subcommand(
            command!("scan")
                .about("Probe a target for hidden paths using a wordlist")
                .arg(
                    arg!(-u --"url" <URL>)
                        .required(true)
                        .help("Base target URL (http or https)")
                        .value_parser(clap::value_parser!(Url)),
                )
                .arg(
                    arg!(-w --"wordlist" <PATH>)
                        .required(true)
                        .help("Path to a newline-delimited wordlist of candidate paths")
                        .value_parser(clap::value_parser!(std::path::PathBuf)),
                )
                .arg(
                    arg!(-t --"threads" <NUM_WORKERS>)
                        .required(false)
                        .help("The number of async worker 'threads' in the worker pool.")
                        .value_parser(clap::value_parser!(usize))
                        .default_value("20"),
                )
                .arg(
                    arg!(--"timeout" <SECONDS>)
                        .required(false)
                        .help("Per-request timeout in seconds")
                        .value_parser(clap::value_parser!(u64))
                        .default_value("5"),
                )
                .arg(
                    arg!(-r --"retries" <NUM>)
                        .required(false)
                        .help("Extra attempts per path after a failed request")
                        .value_parser(clap::value_parser!(usize))
                        .default_value("3"),
                )
                .arg(
                    arg!(--"throttle-min" <MILLIS>)
                        .required(false)
                        .help("Lower bound of the randomized post-response delay")
                        .value_parser(clap::value_parser!(u64))
                        .default_value("25"),
                )
                .arg(
                    arg!(--"throttle-max" <MILLIS>)
                        .required(false)
                        .help("Upper bound of the randomized post-response delay (0 disables)")
                        .value_parser(clap::value_parser!(u64))
                        .default_value("150"),
                )
                .arg(
                    arg!(-x --"exclude" <CODES>)
                        .required(false)
                        .help("Comma-separated status codes treated as 'not found'")
                        .default_value("400,404"),
                )
                .arg(
                    arg!(-o --"output" <DIR>)
                        .required(false)
                        .help("Directory to write the text/JSON/HTML reports into")
                        .value_parser(clap::value_parser!(std::path::PathBuf))
                        .default_value("."),
                )
                .arg(
                    arg!(--"no-progress")
                        .required(false)
                        .help("Disable the live progress bar")
                        .action(clap::ArgAction::SetTrue),
                ),
        )
}
