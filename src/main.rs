use std::io::{self, Read};
use std::process::ExitCode;

use clap::{Arg, ArgAction, ArgMatches, Command};
use curlreq::{CurlConfig, RequestDescriptor, Warning};

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Part {
    Method,
    Url,
    Header,
    Cookie,
    Body,
}

fn cli() -> Command {
    Command::new("curlreq")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Turn a pasted curl command into a normalized HTTP request")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("parse")
                .about("Parses a curl command and prints the request as JSON")
                .arg(
                    Arg::new("command")
                        .help("The input curl command string, or - to read it from stdin")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("part")
                        .short('p')
                        .long("part")
                        .value_name("PART")
                        .help("Only print one part of the request (method, url, header, cookie, body)")
                        .required(false)
                        .value_parser(clap::value_parser!(Part)),
                )
                .arg(
                    Arg::new("strict")
                        .long("strict")
                        .help("Fail on curl options outside the supported set instead of ignoring them")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("compact")
                        .long("compact")
                        .help("Print JSON on a single line")
                        .action(ArgAction::SetTrue),
                ),
        )
}

fn read_command(raw: &str) -> io::Result<String> {
    if raw != "-" {
        return Ok(raw.to_owned());
    }
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

fn select_part(
    request: &RequestDescriptor,
    part: Option<Part>,
) -> serde_json::Result<serde_json::Value> {
    match part {
        None => serde_json::to_value(request),
        Some(Part::Method) => serde_json::to_value(&request.method),
        Some(Part::Url) => serde_json::to_value(&request.url),
        Some(Part::Header) => serde_json::to_value(&request.headers),
        Some(Part::Cookie) => serde_json::to_value(&request.cookies),
        Some(Part::Body) => serde_json::to_value(&request.body),
    }
}

fn warning_lines(warnings: &[Warning]) -> Vec<String> {
    warnings.iter().map(|w| format!("warning: {w}")).collect()
}

fn run_parse(matches: &ArgMatches) -> Result<(), String> {
    let Some(raw) = matches.get_one::<String>("command") else {
        return Err("missing curl command".to_owned());
    };
    let command = read_command(raw).map_err(|e| format!("cannot read stdin: {e}"))?;
    let config = CurlConfig::new().ignore_unknown_options(!matches.get_flag("strict"));

    let translation = config
        .translate(&command)
        .map_err(|e| format!("the curl command could not be parsed: {e}"))?;
    for line in warning_lines(&translation.warnings) {
        eprintln!("{line}");
    }

    let value = select_part(&translation.request, matches.get_one::<Part>("part").copied())
        .map_err(|e| e.to_string())?;
    let rendered = if matches.get_flag("compact") {
        serde_json::to_string(&value)
    } else {
        serde_json::to_string_pretty(&value)
    }
    .map_err(|e| e.to_string())?;
    println!("{rendered}");
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("error")).init();

    let matches = cli().get_matches();
    let outcome = match matches.subcommand() {
        Some(("parse", sub_matches)) => run_parse(sub_matches),
        _ => cli().print_help().map_err(|e| e.to_string()),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_is_well_formed() {
        cli().debug_assert();
    }

    #[test]
    fn test_parse_args() {
        let matches = cli()
            .try_get_matches_from(["curlreq", "parse", "curl x", "--part", "url", "--strict"])
            .unwrap();
        let (name, sub) = matches.subcommand().unwrap();
        assert_eq!(name, "parse");
        assert_eq!(sub.get_one::<Part>("part"), Some(&Part::Url));
        assert!(sub.get_flag("strict"));
        assert!(!sub.get_flag("compact"));
    }

    #[test]
    fn test_warning_lines() {
        let translation = CurlConfig::default()
            .translate("curl example.org --bar -H ':v'")
            .unwrap();
        assert_eq!(
            warning_lines(&translation.warnings),
            vec![
                "warning: Unrecognized options are ignored: --bar".to_string(),
                "warning: header without a name or colon dropped: :v".to_string(),
            ]
        );
        assert!(warning_lines(&[]).is_empty());
    }

    #[test]
    fn test_select_part() {
        let request = CurlConfig::default()
            .translate("curl example.org -b a=1")
            .unwrap()
            .request;
        let part = |p| select_part(&request, Some(p)).unwrap();
        assert_eq!(part(Part::Url), serde_json::json!("http://example.org"));
        assert_eq!(part(Part::Cookie), serde_json::json!({"a": "1"}));
        assert_eq!(part(Part::Body), serde_json::Value::Null);
        assert_eq!(
            select_part(&request, None).unwrap(),
            serde_json::json!({"method": "GET", "url": "http://example.org", "cookies": {"a": "1"}})
        );
    }
}
