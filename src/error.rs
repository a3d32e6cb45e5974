use std::io;

/// A alias for [`std::result::Result`] where the default error is [`Error`]
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Busypal's Error type
///
/// Everything except [`Error::Io`] is raised while resolving [`crate::Options`],
/// before anything is written to the terminal.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An option could not be turned into a usable configuration,
    /// e.g. a zero delay or an unknown colour name.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// A frame set id outside of the registry was requested.
    /// See: [`crate::Registry::lookup`]
    #[error("invalid frame set id {id}, the registry holds {len} frame sets")]
    InvalidFrameSetId {
        /// The requested id.
        id: usize,
        /// Number of frame sets in the registry.
        len: usize,
    },
    /// Represents a generic IO error, see: [`std::io::Error`]
    #[error("IO Error: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    /// Returns `true` for the construction-time errors, i.e. everything but [`Error::Io`].
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            Error::InvalidArgument(_) | Error::InvalidFrameSetId { .. }
        )
    }

    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Error::InvalidArgument(msg.into())
    }
}
