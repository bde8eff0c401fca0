//! CLI command definitions
//!
//! Clap-based definitions for listing, fetching and creating production runs.

use clap::{Parser, Subcommand};
use production_runs_client::{ClientConfig, IdEncoding, ProductionRunsClient};
use std::io::Write;
use std::path::{Path, PathBuf};

use super::output::{self, OutputFormat, Shape};
use super::{CliError, ExitCode};

/// Production runs CLI
///
/// List, fetch and create records on a production runs API.
#[derive(Parser, Debug)]
#[command(name = "production-runs")]
#[command(about = "Production runs client - list, fetch and create production runs", long_about = None)]
#[command(version)]
pub struct RunsCli {
    /// Output verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Base URL of the production runs API
    #[arg(long, env = "PRODUCTION_RUNS_BASE_URL", global = true)]
    pub base_url: Option<String>,

    /// Client config file (JSON, YAML or TOML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Put ids into the request path without encoding
    #[arg(long, global = true)]
    pub verbatim_ids: bool,

    /// Output format
    #[arg(long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: RunsCommands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum RunsCommands {
    /// List every production run
    List,

    /// Show a single production run
    Get {
        /// Identifier of the run
        id: String,
    },

    /// Create a production run
    ///
    /// The payload is sent as-is; the server decides which fields it needs.
    Create {
        /// Payload file (JSON, or YAML by extension)
        #[arg(short, long, conflicts_with = "json", required_unless_present = "json")]
        file: Option<PathBuf>,

        /// Inline JSON payload
        #[arg(long)]
        json: Option<String>,
    },
}

/// Resolve configuration and build the client
///
/// `--config` replaces the environment as the base layer; it is not merged
/// with `PRODUCTION_RUNS_*` variables. `--base-url` and `--verbatim-ids`
/// override whichever base layer was used.
pub fn build_client(cli: &RunsCli) -> Result<ProductionRunsClient, CliError> {
    let mut config = match &cli.config {
        Some(path) => ClientConfig::from_file(path)?,
        None => ClientConfig::from_env()?,
    };

    if let Some(base_url) = &cli.base_url {
        config.base_url = base_url.clone();
    }
    if cli.verbatim_ids {
        config.id_encoding = IdEncoding::Verbatim;
    }

    tracing::debug!(
        base_url = %config.base_url,
        id_encoding = %config.id_encoding,
        "Resolved client configuration"
    );

    Ok(ProductionRunsClient::new(config)?)
}

/// Execute the list command
pub async fn execute_list(
    client: &ProductionRunsClient,
    format: OutputFormat,
    out: &mut impl Write,
) -> Result<ExitCode, CliError> {
    let response = client.list().await?;
    output::write_response(out, &response, format, Shape::Collection)?;
    Ok(ExitCode::Success)
}

/// Execute the get command
pub async fn execute_get(
    client: &ProductionRunsClient,
    id: &str,
    format: OutputFormat,
    out: &mut impl Write,
) -> Result<ExitCode, CliError> {
    let response = client.get(id).await?;
    output::write_response(out, &response, format, Shape::Record)?;
    Ok(ExitCode::Success)
}

/// Execute the create command
pub async fn execute_create(
    client: &ProductionRunsClient,
    file: Option<PathBuf>,
    json: Option<String>,
    format: OutputFormat,
    out: &mut impl Write,
) -> Result<ExitCode, CliError> {
    let payload = load_payload(file.as_deref(), json.as_deref())?;
    let response = client.post(&payload).await?;
    output::write_response(out, &response, format, Shape::Record)?;
    Ok(ExitCode::Success)
}

/// Read the create payload from a file or inline JSON
pub fn load_payload(
    file: Option<&Path>,
    json: Option<&str>,
) -> Result<serde_json::Value, CliError> {
    match (file, json) {
        (_, Some(inline)) => serde_json::from_str(inline)
            .map_err(|e| CliError::InvalidInput(format!("Invalid JSON payload: {}", e))),
        (Some(path), None) => {
            let content = std::fs::read_to_string(path).map_err(|e| {
                CliError::InvalidInput(format!(
                    "Failed to read payload file '{}': {}",
                    path.display(),
                    e
                ))
            })?;
            parse_payload(path, &content)
        }
        (None, None) => Err(CliError::InvalidInput(
            "Either --file or --json is required".to_string(),
        )),
    }
}

fn parse_payload(path: &Path, content: &str) -> Result<serde_json::Value, CliError> {
    let is_yaml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| matches!(ext.to_lowercase().as_str(), "yaml" | "yml"))
        .unwrap_or(false);

    if is_yaml {
        serde_yaml::from_str(content)
            .map_err(|e| CliError::InvalidInput(format!("YAML error: {}", e)))
    } else {
        serde_json::from_str(content)
            .map_err(|e| CliError::InvalidInput(format!("JSON error: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> ProductionRunsClient {
        ProductionRunsClient::new(ClientConfig::new(server.uri())).unwrap()
    }

    fn plain() {
        colored::control::set_override(false);
    }

    #[test]
    fn test_cli_definition() {
        RunsCli::command().debug_assert();
    }

    #[test]
    fn test_parse_get_with_global_flags() {
        let cli = RunsCli::try_parse_from([
            "production-runs",
            "--base-url",
            "http://runs:9000/",
            "get",
            "42",
            "--format",
            "json",
            "--verbatim-ids",
        ])
        .unwrap();

        assert_eq!(cli.base_url.as_deref(), Some("http://runs:9000/"));
        assert_eq!(cli.format, OutputFormat::Json);
        assert!(cli.verbatim_ids);
        assert!(matches!(cli.command, RunsCommands::Get { ref id } if id == "42"));
    }

    #[test]
    fn test_create_requires_payload() {
        let result = RunsCli::try_parse_from(["production-runs", "create"]);
        assert!(result.is_err());

        let result = RunsCli::try_parse_from([
            "production-runs",
            "create",
            "--file",
            "run.json",
            "--json",
            "{}",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_build_client_applies_overrides() {
        let cli = RunsCli::try_parse_from([
            "production-runs",
            "--base-url",
            "http://runs:8000/api/",
            "--verbatim-ids",
            "list",
        ])
        .unwrap();

        let client = build_client(&cli).unwrap();
        assert_eq!(
            client.collection_url().as_str(),
            "http://runs:8000/api/production-runs"
        );
        assert_eq!(client.config().id_encoding, IdEncoding::Verbatim);
    }

    #[test]
    fn test_load_inline_payload() {
        let payload = load_payload(None, Some(r#"{"name":"batch-1"}"#)).unwrap();
        assert_eq!(payload["name"], "batch-1");

        let result = load_payload(None, Some("{not json"));
        assert!(matches!(result, Err(CliError::InvalidInput(_))));
    }

    #[test]
    fn test_load_yaml_payload_file() {
        let mut file = tempfile::Builder::new().suffix(".yml").tempfile().unwrap();
        writeln!(file, "runCode: RUN-9").unwrap();
        writeln!(file, "volume: 12").unwrap();

        let payload = load_payload(Some(file.path()), None).unwrap();
        assert_eq!(payload["runCode"], "RUN-9");
        assert_eq!(payload["volume"], 12);
    }

    #[test]
    fn test_load_missing_payload_file() {
        let result = load_payload(Some(Path::new("/nonexistent/run.json")), None);
        assert!(matches!(result, Err(CliError::InvalidInput(_))));
    }

    #[test]
    fn test_build_client_from_config_file_with_flag_override() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "base_url = \"http://runs.file:9000/\"").unwrap();
        writeln!(file, "id_encoding = \"verbatim\"").unwrap();
        let config_path = file.path().to_str().unwrap().to_string();

        let cli = RunsCli::try_parse_from(["production-runs", "--config", &config_path, "list"])
            .unwrap();
        let client = build_client(&cli).unwrap();
        assert_eq!(
            client.collection_url().as_str(),
            "http://runs.file:9000/production-runs"
        );
        assert_eq!(client.config().id_encoding, IdEncoding::Verbatim);

        let cli = RunsCli::try_parse_from([
            "production-runs",
            "--config",
            &config_path,
            "--base-url",
            "http://runs.flag:9100/",
            "list",
        ])
        .unwrap();
        let client = build_client(&cli).unwrap();
        assert_eq!(
            client.collection_url().as_str(),
            "http://runs.flag:9100/production-runs"
        );
        assert_eq!(client.config().id_encoding, IdEncoding::Verbatim);
    }

    #[tokio::test]
    async fn test_list_server_error_maps_to_request_failed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/production-runs"))
            .respond_with(ResponseTemplate::new(500).set_body_string("database unavailable"))
            .mount(&server)
            .await;

        let mut out = Vec::new();
        let err = execute_list(&client_for(&server), OutputFormat::Table, &mut out)
            .await
            .unwrap_err();

        assert_eq!(err.exit_code(), ExitCode::RequestFailed);
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn test_get_missing_run_maps_to_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/production-runs/404"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let mut out = Vec::new();
        let err = execute_get(&client_for(&server), "404", OutputFormat::Json, &mut out)
            .await
            .unwrap_err();

        assert_eq!(err.exit_code(), ExitCode::NotFound);
    }

    #[tokio::test]
    async fn test_get_renders_fetched_run_as_table() {
        plain();
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/production-runs/7"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 7,
                "runCode": "RUN-7",
                "productCode": "WIDGET",
                "volume": 40,
                "status": "In Progress"
            })))
            .mount(&server)
            .await;

        let mut out = Vec::new();
        let code = execute_get(&client_for(&server), "7", OutputFormat::Table, &mut out)
            .await
            .unwrap();
        let printed = String::from_utf8(out).unwrap();

        assert_eq!(code, ExitCode::Success);
        assert!(printed.starts_with("ID"));
        assert!(printed.contains("RUN-7"));
        assert!(printed.contains("In Progress"));
        assert!(printed.contains("1 run(s)"));
    }

    #[tokio::test]
    async fn test_get_untyped_record_passes_through() {
        plain();
        let server = MockServer::start().await;
        let body = r#"{"id":1,"runCode":1001,"volume":-5}"#;
        Mock::given(method("GET"))
            .and(path("/production-runs/1"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(body, "application/json"))
            .mount(&server)
            .await;

        let client = client_for(&server);

        let mut out = Vec::new();
        let code = execute_get(&client, "1", OutputFormat::Json, &mut out)
            .await
            .unwrap();
        assert_eq!(code, ExitCode::Success);
        assert_eq!(String::from_utf8(out).unwrap(), format!("{}\n", body));

        let mut out = Vec::new();
        let code = execute_get(&client, "1", OutputFormat::Table, &mut out)
            .await
            .unwrap();
        assert_eq!(code, ExitCode::Success);
        assert_eq!(String::from_utf8(out).unwrap(), format!("{}\n", body));
    }

    #[tokio::test]
    async fn test_list_untyped_collection_passes_through() {
        let server = MockServer::start().await;
        let body = r#"[{"id":1,"volume":-5},{"id":2,"runCode":2002}]"#;
        Mock::given(method("GET"))
            .and(path("/production-runs"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(body, "application/json"))
            .mount(&server)
            .await;

        let mut out = Vec::new();
        let code = execute_list(&client_for(&server), OutputFormat::Table, &mut out)
            .await
            .unwrap();

        assert_eq!(code, ExitCode::Success);
        assert_eq!(String::from_utf8(out).unwrap(), format!("{}\n", body));
    }

    #[tokio::test]
    async fn test_create_prints_non_record_response_raw() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/production-runs"))
            .and(body_json(json!({"runCode": "RUN-5", "volume": 3})))
            .respond_with(ResponseTemplate::new(201).set_body_raw("true", "application/json"))
            .expect(1)
            .mount(&server)
            .await;

        let mut out = Vec::new();
        let code = execute_create(
            &client_for(&server),
            None,
            Some(r#"{"runCode":"RUN-5","volume":3}"#.to_string()),
            OutputFormat::Table,
            &mut out,
        )
        .await
        .unwrap();

        assert_eq!(code, ExitCode::Success);
        assert_eq!(String::from_utf8(out).unwrap(), "true\n");
    }
}
