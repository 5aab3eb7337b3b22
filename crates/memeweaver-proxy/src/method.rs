//! The closed set of backend operations

use thiserror::Error;

/// Errors raised while dispatching an envelope
#[derive(Error, Debug)]
pub enum ProxyError {
    #[error("Method {name} is not available")]
    UnknownMethod { name: String },

    #[error("Method {method} is missing argument `{field}`")]
    MissingArgument {
        method: ProxyMethod,
        field: &'static str,
    },

    #[error("Backend call failed: {message}")]
    Backend { message: String },

    #[error("Dispatcher is disconnected")]
    Disconnected,
}

/// Every operation the backend proxy can perform.
///
/// Unknown method names are rejected with a typed error instead of being
/// looked up dynamically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProxyMethod {
    CreateAgent,
    ReadAgent,
    CreateTwitterAccount,
    GetTwitterAccount,
    CreateTweet,
    ReadTweet,
    CreateInteraction,
}

impl ProxyMethod {
    pub fn parse(name: &str) -> crate::Result<Self> {
        match name {
            "create_agent" => Ok(Self::CreateAgent),
            "read_agent" => Ok(Self::ReadAgent),
            "create_twitter_account" => Ok(Self::CreateTwitterAccount),
            "get_twitter_account" => Ok(Self::GetTwitterAccount),
            "create_tweet" => Ok(Self::CreateTweet),
            "read_tweet" => Ok(Self::ReadTweet),
            "create_interaction" => Ok(Self::CreateInteraction),
            _ => Err(ProxyError::UnknownMethod {
                name: name.to_string(),
            }),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CreateAgent => "create_agent",
            Self::ReadAgent => "read_agent",
            Self::CreateTwitterAccount => "create_twitter_account",
            Self::GetTwitterAccount => "get_twitter_account",
            Self::CreateTweet => "create_tweet",
            Self::ReadTweet => "read_tweet",
            Self::CreateInteraction => "create_interaction",
        }
    }
}

impl std::fmt::Display for ProxyMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_methods_round_trip() {
        for name in [
            "create_agent",
            "read_agent",
            "create_twitter_account",
            "get_twitter_account",
            "create_tweet",
            "read_tweet",
            "create_interaction",
        ] {
            assert_eq!(ProxyMethod::parse(name).unwrap().as_str(), name);
        }
    }

    #[test]
    fn test_unknown_method_is_typed_error() {
        let err = ProxyMethod::parse("drop_database").unwrap_err();
        assert!(matches!(err, ProxyError::UnknownMethod { .. }));
    }
}
