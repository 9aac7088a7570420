use env_logger::WriteStyle;
use log::LevelFilter;
use std::io::Write;

/// Installs an `env_logger` backend for the `log` records emitted by this crate.
///
/// `RUST_LOG` still overrides the default `Info` filter.
pub fn try_init() -> Result<(), log::SetLoggerError> {
    env_logger::builder()
        .format(|buf, record| writeln!(buf, "[TDCAR | {}] {}", record.level(), record.args()))
        .write_style(WriteStyle::Auto)
        .filter(None, LevelFilter::Info)
        .parse_default_env()
        .try_init()
}
