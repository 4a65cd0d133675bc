use anyhow::Result;
use clap::{arg, crate_authors, crate_name, crate_version, ArgAction, ArgMatches, Command};
use netscan::{
    config::{self, ScanConfig},
    error::ScanError,
    limits, logger,
    report::Report,
    scan::Scanner,
};

fn parse_args(matches: ArgMatches) -> Result<ScanConfig, ScanError> {
    let ports = config::parse_ports(
        matches
            .get_many::<String>("ports")
            .unwrap()
            .map(String::as_str),
    )?;

    let threads =
        config::parse_threads(matches.get_one::<String>("threads").map(String::as_str))?;

    let subnet = matches.get_one::<String>("net").unwrap().to_owned();

    Ok(ScanConfig::new(subnet, ports, threads))
}

fn main() -> Result<()> {
    let arg_matches = Command::new(crate_name!())
        .about(
            "Fast class network port scanner.\n\
            Enter a partial IP, e.g. 192.168.0 to scan 192.168.0.[1-254], \
            or 10.0 to scan 10.0.[0-254].[1-254].",
        )
        .version(crate_version!())
        .arg_required_else_help(true)
        .author(crate_authors!())
        .args([
            arg!(-n --net <NET> "Partial or full IPv4, e.g. 192.168.0").required(true),
            arg!(-p --ports <PORT> "One or more ports separated by spaces or commas")
                .required(true)
                .num_args(1..)
                .value_delimiter(','),
            arg!(-t --threads <THREADS> "Number of simultaneous probes [default: 255]")
                .allow_negative_numbers(true),
            arg!(-d --debug "Turns on debugging information").action(ArgAction::SetTrue),
        ])
        .get_matches();

    // Before parsing, so argument warnings are shown.
    logger::init(arg_matches.get_flag("debug"));

    // Extract arguments.
    let config = parse_args(arg_matches)?;
    log::debug!("{:?}", config);

    limits::check_threads(config.threads);

    // The scanner owns the pool; dropping it joins the workers.
    let scanner = Scanner::from_config(&config)?;

    scanner.run(&config.subnet, &mut Report::stdout())?;

    Ok(())
}
