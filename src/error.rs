use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("malformed change record payload: {source}")]
    Decode {
        #[source]
        source: serde_json::Error,
    },

    #[error("document batch upload failed: {0}")]
    Upload(String),

    #[error("missing environment variable: {0}")]
    Config(&'static str),

    #[error("invalid search endpoint '{endpoint}': {source}")]
    Endpoint {
        endpoint: String,
        #[source]
        source: url::ParseError,
    },
}

pub type Result<T> = std::result::Result<T, FeedError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_display() {
        let source = serde_json::from_slice::<serde_json::Value>(b"not json").unwrap_err();
        let err = FeedError::Decode { source };
        assert!(
            err.to_string()
                .starts_with("malformed change record payload:"),
            "unexpected display: {}",
            err
        );
    }

    #[test]
    fn upload_display() {
        let err = FeedError::Upload("connection reset".to_string());
        assert_eq!(
            err.to_string(),
            "document batch upload failed: connection reset"
        );
    }

    #[test]
    fn config_display() {
        let err = FeedError::Config("SEARCH_REGION");
        assert_eq!(
            err.to_string(),
            "missing environment variable: SEARCH_REGION"
        );
    }

    #[test]
    fn endpoint_display() {
        let source = url::Url::parse("::not-a-url::").unwrap_err();
        let err = FeedError::Endpoint {
            endpoint: "::not-a-url::".to_string(),
            source,
        };
        assert!(
            err.to_string()
                .starts_with("invalid search endpoint '::not-a-url::':"),
            "unexpected display: {}",
            err
        );
    }
}
