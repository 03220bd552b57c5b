//! Command-line and environment configuration.

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(name = "tutorlink-server")]
#[command(about = "Chat and call-signaling relay for TutorLink help requests", long_about = None)]
pub struct ServerConfig {
    /// Host address to bind the server to
    #[arg(short = 'H', long, env = "HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, env = "PORT", default_value = "5000")]
    pub port: u16,

    /// Shared secret the session tokens are signed with (HS256)
    #[arg(long, env = "JWT_SECRET", hide_env_values = true)]
    pub jwt_secret: String,

    /// JSON file of users and help requests to seed the in-memory stores
    #[arg(long, env = "TUTORLINK_FIXTURES")]
    pub fixtures: Option<PathBuf>,

    /// Default log level when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        // テスト項目: secret 以外は既定値で起動できる
        // given (前提条件):
        let args = ["tutorlink-server", "--jwt-secret", "s3cret"];

        // when (操作):
        let config = ServerConfig::try_parse_from(args).unwrap();

        // then (期待する結果):
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 5000);
        assert_eq!(config.jwt_secret, "s3cret");
        assert_eq!(config.fixtures, None);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_flags_override_defaults() {
        // テスト項目: フラグで host / port / fixtures を指定できる
        // given (前提条件):
        let args = [
            "tutorlink-server",
            "-H",
            "0.0.0.0",
            "-p",
            "8080",
            "--jwt-secret",
            "s3cret",
            "--fixtures",
            "fixtures/demo.json",
        ];

        // when (操作):
        let config = ServerConfig::try_parse_from(args).unwrap();

        // then (期待する結果):
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.fixtures, Some(PathBuf::from("fixtures/demo.json")));
    }
}
