// riwayat/src/error.rs

use derive_more::Display;

use crate::helpers::fixture_helper::FixtureError;

#[derive(Debug, Display)]
pub enum RiwayatError {
    #[display(fmt = "Unknown resource: {}", _0)]
    UnknownResource(String),
    #[display(fmt = "Invalid configuration: {}", _0)]
    Config(String),
    #[display(fmt = "Fixture error: {}", _0)]
    Fixture(FixtureError),
}

impl std::error::Error for RiwayatError {}

impl From<FixtureError> for RiwayatError {
    fn from(err: FixtureError) -> Self {
        RiwayatError::Fixture(err)
    }
}
