// src/utils/log_utils.rs
use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::append::file::FileAppender;
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use std::path::Path;

const LOG_PATTERN: &str = "{d(%Y-%m-%dT%H:%M:%S%.3fZ)(utc)} {h({l:<5})} {t} - {m}{n}";

/// Builds the log4rs config: always stderr, plus an append-only file when
/// `file` is given. Stdout is left for command output.
pub fn build_log_config(level: LevelFilter, file: Option<&Path>) -> anyhow::Result<Config> {
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
        .build();

    let mut builder = Config::builder().appender(Appender::builder().build("stderr", Box::new(stderr)));
    let mut root = Root::builder().appender("stderr");

    if let Some(path) = file {
        let file_appender = FileAppender::builder()
            .append(true)
            .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
            .build(path)?;
        builder = builder.appender(Appender::builder().build("file", Box::new(file_appender)));
        root = root.appender("file");
    }

    Ok(builder.build(root.build(level))?)
}

pub fn init_logging(level: LevelFilter, file: Option<&Path>) -> anyhow::Result<()> {
    let config = build_log_config(level, file)?;
    log4rs::init_config(config)?;
    Ok(())
}
