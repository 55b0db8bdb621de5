/// An error occurring while loading the network configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The network name is not supported.
    #[error("unknown network {0}, supported values: [mainnet, testnet, custom]")]
    UnknownNetwork(String),
    /// A custom network was selected without its configuration.
    #[error("missing configuration for the custom network")]
    MissingCustomNetwork,
    /// The custom network configuration could not be read.
    #[error("failed to read custom network configuration: {0}")]
    Io(#[from] std::io::Error),
    /// The custom network configuration is malformed.
    #[error("malformed custom network configuration: {0}")]
    Json(#[from] serde_json::Error),
}
