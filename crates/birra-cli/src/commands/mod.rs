//! Subcommand implementations.

pub mod call;
pub mod login;
pub mod logout;
pub mod quotas;
pub mod records;
pub mod refresh;
pub mod register;
pub mod report;
pub mod reset_pass;
pub mod set_new_pass;
pub mod whoami;

use std::io::{self, Read};

use anyhow::{Context, Result, bail};
use serde_json::Value;

use crate::cli::Commands;
use crate::config::Config;

pub async fn handle(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Login(args) => login::run(args, config).await,
        Commands::Logout(args) => logout::run(args, config).await,
        Commands::Whoami(args) => whoami::run(args, config).await,
        Commands::Refresh(args) => refresh::run(args, config).await,
        Commands::Call(args) => call::run(args, config).await,
        Commands::Records(args) => records::run(args, config).await,
        Commands::Quotas(args) => quotas::run(args, config).await,
        Commands::Report(args) => report::run(args, config).await,
        Commands::Register(args) => register::run(args, config).await,
        Commands::ResetPass(args) => reset_pass::run(args, config).await,
        Commands::SetNewPass(args) => set_new_pass::run(args, config).await,
    }
}

/// Read a JSON body from an inline argument or a file (`-` for stdin).
pub(crate) fn read_json(data: Option<&str>, file: Option<&str>) -> Result<Option<Value>> {
    let text = match (data, file) {
        (Some(_), Some(_)) => bail!("Use either --data or --json, not both"),
        (Some(data), None) => data.to_string(),
        (None, Some("-")) => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            buf
        }
        (None, Some(path)) => std::fs::read_to_string(path).context("Failed to read JSON file")?,
        (None, None) => return Ok(None),
    };

    let value = serde_json::from_str(&text).context("Invalid JSON")?;
    Ok(Some(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn inline_json_is_parsed() {
        let value = read_json(Some(r#"{"liters": "30"}"#), None).unwrap();
        assert_eq!(value, Some(json!({"liters": "30"})));
    }

    #[test]
    fn json_file_is_parsed() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("body.json");
        std::fs::write(&path, r#"{"name": "IPA"}"#).unwrap();

        let value = read_json(None, path.to_str()).unwrap();
        assert_eq!(value, Some(json!({"name": "IPA"})));
    }

    #[test]
    fn no_body_is_none() {
        assert!(read_json(None, None).unwrap().is_none());
    }

    #[test]
    fn both_sources_is_an_error() {
        assert!(read_json(Some("{}"), Some("body.json")).is_err());
    }

    #[test]
    fn invalid_json_is_an_error() {
        assert!(read_json(Some("{not json"), None).is_err());
    }
}
