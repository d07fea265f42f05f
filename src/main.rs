use std::path::Path;

use anyhow::{self, format_err};
use clap::Parser;
use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::append::file::FileAppender;
use log4rs::config::{Appender, Config, Logger, Root};
use log4rs::encode::pattern::PatternEncoder;

use gtogrid::interfaces::cli::{log_heading, Cli};
use gtogrid::interfaces::input::Input;
use gtogrid::interfaces::InputHandle;
use gtogrid::io::read_gtogrid_yaml;

/// Builds the logging configuration.
///
/// Main output goes to the `gtogrid-output` logger, which writes to the standard output and,
/// if `output` is given, also to `<output>.out`. All other messages go to the standard error at
/// the `warn` level, or at the `debug` level if `debug` is set.
fn logging_config(output: Option<&Path>, debug: bool) -> Result<Config, anyhow::Error> {
    let stdout = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new("{m}{n}")))
        .build();
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new("[{d(%Y-%m-%d %H:%M:%S)} {h({l})} {t}] {m}{n}")))
        .build();

    let mut builder = Config::builder()
        .appender(Appender::builder().build("stdout", Box::new(stdout)))
        .appender(Appender::builder().build("stderr", Box::new(stderr)));
    let mut output_appenders = vec!["stdout"];
    if let Some(output) = output {
        let mut path = output.to_path_buf();
        path.set_extension("out");
        let output_file = FileAppender::builder()
            .encoder(Box::new(PatternEncoder::new("{m}{n}")))
            .append(false)
            .build(&path)
            .map_err(|err| format_err!("Unable to create output file {}: {err}", path.display()))?;
        builder = builder.appender(Appender::builder().build("output_file", Box::new(output_file)));
        output_appenders.push("output_file");
    }

    let root_level = if debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    builder
        .logger(
            Logger::builder()
                .appenders(output_appenders)
                .additive(false)
                .build("gtogrid-output", LevelFilter::Info),
        )
        .build(Root::builder().appender("stderr").build(root_level))
        .map_err(|err| format_err!(err))
}

fn main() -> Result<(), anyhow::Error> {
    let cli = Cli::parse();
    let config = logging_config(cli.output.as_deref(), cli.debug)?;
    log4rs::init_config(config)?;

    log_heading();
    let config_path = cli
        .config
        .ok_or_else(|| format_err!("No configuration file specified."))?;
    let input = read_gtogrid_yaml::<Input, _>(&config_path)?;
    input.handle()
}
