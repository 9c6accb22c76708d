use crate::{command::ParseCommandError, config::ConfigError};
use snafu::Snafu;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("Configuration error"), context(false))]
    Config { source: ConfigError },

    #[snafu(transparent)]
    Command { source: ParseCommandError },
}
