use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for scene construction, configuration and diagnostics.
///
/// Ticking a simulation never fails; every variant here is raised either
/// before the first tick or by an explicit diagnostic call.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid configuration or API parameter.
    #[error("invalid parameter: {0}")]
    InvalidParam(String),

    /// The scene cannot be built as configured (e.g. no room left to place a molecule).
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A body's bounding box was found outside the enclosure.
    #[error("out of bounds: {0}")]
    OutOfBounds(String),

    /// Malformed TOML configuration.
    #[error(transparent)]
    Config(#[from] toml::de::Error),

    /// Propagated I/O errors (config files, event log).
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_bounds_names_the_body() {
        let e = Error::OutOfBounds("piston at [90.0, 200.0] after tick 12".into());
        let msg = e.to_string();
        assert!(msg.starts_with("out of bounds"));
        assert!(msg.contains("piston"));
        assert!(msg.contains("tick 12"));
    }

    #[test]
    fn configuration_error_mentions_cause() {
        let e = Error::Configuration("failed to place molecule 3".into());
        assert!(e.to_string().starts_with("configuration error"));
        assert!(e.to_string().contains("molecule 3"));
    }

    #[test]
    fn toml_errors_convert_transparently() {
        let parsed: std::result::Result<toml::Value, toml::de::Error> =
            toml::from_str("molecule_count = = 3");
        let Err(source) = parsed else {
            panic!("malformed TOML should not parse");
        };
        let expected = source.to_string();
        let e: Error = source.into();
        assert!(matches!(e, Error::Config(_)));
        assert_eq!(e.to_string(), expected);
    }

    #[test]
    fn io_errors_propagate_with_question_mark() {
        fn open_missing() -> Result<String> {
            Ok(std::fs::read_to_string("/nonexistent-dir/pistonsim.toml")?)
        }
        assert!(matches!(open_missing(), Err(Error::Io(_))));
    }
}
