use clap::Parser;

/// Holds all configuration parsed from the command line at startup.
///
/// Every field is required; the process refuses to start without a complete
/// set. Flag names keep the service's camelCase spelling (`--apiKey`,
/// `--callbackUrl`) so invocations are copy-pasteable from its documentation.
#[derive(Parser, Debug, Clone)]
#[command(name = "realtime-relay")]
#[command(about = "Relay realtime conversation items to a webhook", long_about = None)]
pub struct Config {
    /// Base service URL, e.g. https://<resource>.cognitiveservices.azure.com
    #[arg(long, value_name = "URL")]
    pub endpoint: String,

    /// API credential, sent as the `api-key` header on every request
    #[arg(long = "apiKey", value_name = "KEY")]
    pub api_key: String,

    /// Model/deployment identifier, e.g. gpt-4o-mini-realtime-preview
    #[arg(long, value_name = "NAME")]
    pub deployment: String,

    /// Destination URL that receives one POST per conversation item
    #[arg(long = "callbackUrl", value_name = "URL")]
    pub callback_url: String,
}

impl Config {
    /// Parses the command line, exiting the process on failure.
    ///
    /// A usage error prints to stderr and exits with status 1 (clap's default
    /// is 2); `--help` and `--version` print to stdout and exit with 0.
    pub fn parse_args() -> Self {
        <Self as Parser>::try_parse().unwrap_or_else(|err| {
            let _ = err.print();
            std::process::exit(if err.use_stderr() { 1 } else { 0 });
        })
    }
}
