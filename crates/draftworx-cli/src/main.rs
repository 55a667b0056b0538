// crates/draftworx-cli/src/main.rs
// ============================================================================
// Module: Draftworx CLI Entry Point
// Description: Command dispatcher for the Draftworx MCP server and gateway.
// Purpose: Launch servers, validate configuration, and call tools locally.
// Dependencies: clap, draftworx-config, draftworx-mcp, serde_json, thiserror, tokio.
// ============================================================================

//! ## Overview
//! The `draftworx` binary starts the single-service MCP server or the
//! aggregating gateway, validates configuration files, and lists or calls
//! tools in-process through the same router the transports use.

// ============================================================================
// SECTION: Modules
// ============================================================================


// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::File;
use std::io::Read;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::ArgAction;
use clap::Args;
use clap::CommandFactory;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use draftworx_config as config;
use draftworx_mcp::Gateway;
use draftworx_mcp::McpServer;
use draftworx_mcp::ToolRouter;
use serde_json::Value;
use thiserror::Error;

use crate::config::DraftworxConfig;
use crate::config::ServerTransport;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Maximum size of a tool arguments file.
const MAX_ARGS_BYTES: usize = 1024 * 1024;

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "draftworx", disable_help_subcommand = true, disable_version_flag = true)]
struct Cli {
    /// Print version information and exit.
    #[arg(long = "version", action = ArgAction::SetTrue, global = true)]
    show_version: bool,
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the Draftworx MCP server.
    Serve(ServeCommand),
    /// Start the gateway serving every configured mount.
    Gateway(GatewayCommand),
    /// Configuration utilities.
    Config {
        /// Selected config subcommand.
        #[command(subcommand)]
        command: ConfigCommand,
    },
    /// Local tool utilities.
    Tools {
        /// Selected tools subcommand.
        #[command(subcommand)]
        command: ToolsCommand,
    },
}

/// Arguments for `serve`.
#[derive(Args, Debug)]
struct ServeCommand {
    /// Optional config file path (defaults to draftworx.toml or env override).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Transport override.
    #[arg(long, value_enum, value_name = "TRANSPORT")]
    transport: Option<TransportArg>,
    /// Bind address override for HTTP/SSE.
    #[arg(long, value_name = "ADDR")]
    bind: Option<String>,
}

/// Arguments for `gateway`.
#[derive(Args, Debug)]
struct GatewayCommand {
    /// Optional config file path (defaults to draftworx.toml or env override).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Bind address override.
    #[arg(long, value_name = "ADDR")]
    bind: Option<String>,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Validate a Draftworx configuration file.
    Validate(ConfigPathArgs),
    /// Print the effective configuration as TOML.
    Show(ConfigPathArgs),
}

/// Config file selection shared by config subcommands.
#[derive(Args, Debug)]
struct ConfigPathArgs {
    /// Optional config file path (defaults to draftworx.toml or env override).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

/// Tools subcommands.
#[derive(Subcommand, Debug)]
enum ToolsCommand {
    /// List the tool catalog.
    List(ToolsListCommand),
    /// Call a tool in-process and print the MCP result.
    Call(ToolsCallCommand),
}

/// Arguments for `tools list`.
#[derive(Args, Debug)]
struct ToolsListCommand {
    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

/// Arguments for `tools call`.
#[derive(Args, Debug)]
struct ToolsCallCommand {
    /// Tool name (for example `draftworx.map_accounts`).
    #[arg(long, value_name = "TOOL")]
    name: String,
    /// Inline JSON arguments.
    #[arg(long, value_name = "JSON", conflicts_with = "args_file")]
    args: Option<String>,
    /// Path to a JSON arguments file.
    #[arg(long = "args-file", value_name = "PATH")]
    args_file: Option<PathBuf>,
}

/// Transport selector for `serve`.
#[derive(ValueEnum, Clone, Copy, Debug)]
enum TransportArg {
    /// Newline-delimited JSON over stdin/stdout.
    Stdio,
    /// JSON-RPC over HTTP POST.
    Http,
    /// JSON-RPC over HTTP with SSE responses.
    Sse,
}

impl From<TransportArg> for ServerTransport {
    fn from(value: TransportArg) -> Self {
        match value {
            TransportArg::Stdio => Self::Stdio,
            TransportArg::Http => Self::Http,
            TransportArg::Sse => Self::Sse,
        }
    }
}

/// Output formats for listing commands.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// One line per tool.
    Text,
    /// Tool definitions as JSON.
    Json,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper for user-facing messages.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`].
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
#[tokio::main(flavor = "multi_thread")]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the CLI command dispatcher.
async fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();

    if cli.show_version {
        let version = env!("CARGO_PKG_VERSION");
        write_stdout_line(&format!("draftworx {version}"))
            .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        return Ok(ExitCode::SUCCESS);
    }

    let Some(command) = cli.command else {
        show_help()?;
        return Ok(ExitCode::SUCCESS);
    };

    match command {
        Commands::Serve(command) => command_serve(command).await,
        Commands::Gateway(command) => command_gateway(command).await,
        Commands::Config {
            command,
        } => command_config(command),
        Commands::Tools {
            command,
        } => command_tools(command),
    }
}

/// Prints top-level help.
fn show_help() -> CliResult<()> {
    let help = Cli::command().render_help().to_string();
    write_stdout_line(help.trim_end()).map_err(|err| CliError::new(output_error("stdout", &err)))
}

// ============================================================================
// SECTION: Server Commands
// ============================================================================

/// Executes the `serve` command.
async fn command_serve(command: ServeCommand) -> CliResult<ExitCode> {
    let mut config = load_config(command.config.as_deref())?;
    if let Some(transport) = command.transport {
        config.server.transport = transport.into();
    }
    if let Some(bind) = command.bind {
        config.server.bind = Some(bind);
    }
    let server = McpServer::from_config(config)
        .map_err(|err| CliError::new(format!("server init failed: {err}")))?;
    server.serve().await.map_err(|err| CliError::new(format!("server failed: {err}")))?;
    Ok(ExitCode::SUCCESS)
}

/// Executes the `gateway` command.
async fn command_gateway(command: GatewayCommand) -> CliResult<ExitCode> {
    let mut config = load_config(command.config.as_deref())?;
    if let Some(bind) = command.bind {
        config.gateway.bind = bind;
    }
    let gateway = Gateway::from_config(config)
        .map_err(|err| CliError::new(format!("gateway init failed: {err}")))?;
    gateway.serve().await.map_err(|err| CliError::new(format!("gateway failed: {err}")))?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Config Commands
// ============================================================================

/// Dispatches config subcommands.
fn command_config(command: ConfigCommand) -> CliResult<ExitCode> {
    match command {
        ConfigCommand::Validate(args) => {
            let _config = load_config(args.config.as_deref())?;
            write_stdout_line("config valid")
                .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        }
        ConfigCommand::Show(args) => {
            let config = load_config(args.config.as_deref())?;
            let rendered = config
                .to_toml_string()
                .map_err(|err| CliError::new(format!("config render failed: {err}")))?;
            write_stdout_line(rendered.trim_end())
                .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        }
    }
    Ok(ExitCode::SUCCESS)
}

/// Loads and validates configuration.
fn load_config(path: Option<&Path>) -> CliResult<DraftworxConfig> {
    DraftworxConfig::load(path).map_err(|err| CliError::new(format!("config load failed: {err}")))
}

// ============================================================================
// SECTION: Tool Commands
// ============================================================================

/// Dispatches tools subcommands.
fn command_tools(command: ToolsCommand) -> CliResult<ExitCode> {
    let router = ToolRouter::new();
    match command {
        ToolsCommand::List(command) => command_tools_list(&router, command.format),
        ToolsCommand::Call(command) => command_tools_call(&router, &command),
    }
}

/// Executes `tools list`.
fn command_tools_list(router: &ToolRouter, format: OutputFormat) -> CliResult<ExitCode> {
    let output = match format {
        OutputFormat::Json => serde_json::to_string_pretty(router.list_tools())
            .map_err(|err| CliError::new(format!("json render failed: {err}")))?,
        OutputFormat::Text => router
            .list_tools()
            .iter()
            .map(|tool| format!("{}\t{}", tool.name, tool.title))
            .collect::<Vec<_>>()
            .join("\n"),
    };
    write_stdout_line(&output).map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

/// Executes `tools call`; exits with failure when the tool reports an error.
fn command_tools_call(router: &ToolRouter, command: &ToolsCallCommand) -> CliResult<ExitCode> {
    let arguments = read_arguments(command)?;
    let result = router.handle_tool_call(&command.name, arguments);
    let rendered = serde_json::to_string_pretty(&result)
        .map_err(|err| CliError::new(format!("json render failed: {err}")))?;
    write_stdout_line(&rendered).map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(if result.is_error { ExitCode::FAILURE } else { ExitCode::SUCCESS })
}

/// Resolves tool arguments from `--args` or `--args-file`.
fn read_arguments(command: &ToolsCallCommand) -> CliResult<Option<Value>> {
    let bytes = match (&command.args, &command.args_file) {
        (Some(inline), _) => inline.clone().into_bytes(),
        (None, Some(path)) => read_bytes_with_limit(path, MAX_ARGS_BYTES).map_err(|err| {
            CliError::new(match err {
                ReadLimitError::Io(err) => {
                    format!("failed to read {}: {err}", path.display())
                }
                ReadLimitError::TooLarge {
                    size,
                    limit,
                } => format!("{} is {size} bytes; limit is {limit}", path.display()),
            })
        })?,
        (None, None) => return Ok(None),
    };
    serde_json::from_slice(&bytes)
        .map(Some)
        .map_err(|err| CliError::new(format!("invalid JSON arguments: {err}")))
}

// ============================================================================
// SECTION: Input Helpers
// ============================================================================

/// Errors returned by bounded file reads.
#[derive(Debug)]
enum ReadLimitError {
    /// File I/O failure.
    Io(std::io::Error),
    /// File size exceeds the configured limit.
    TooLarge {
        /// Actual size in bytes.
        size: u64,
        /// Allowed limit in bytes.
        limit: usize,
    },
}

/// Reads a file from disk while enforcing a hard size limit.
fn read_bytes_with_limit(path: &Path, max_bytes: usize) -> Result<Vec<u8>, ReadLimitError> {
    let file = File::open(path).map_err(ReadLimitError::Io)?;
    let size = file.metadata().map_err(ReadLimitError::Io)?.len();
    let limit = u64::try_from(max_bytes).unwrap_or(u64::MAX);
    if size > limit {
        return Err(ReadLimitError::TooLarge {
            size,
            limit: max_bytes,
        });
    }

    let mut limited = file.take(limit.saturating_add(1));
    let mut bytes = Vec::new();
    limited.read_to_end(&mut bytes).map_err(ReadLimitError::Io)?;
    if bytes.len() > max_bytes {
        return Err(ReadLimitError::TooLarge {
            size: u64::try_from(bytes.len()).unwrap_or(u64::MAX),
            limit: max_bytes,
        });
    }
    Ok(bytes)
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Writes a single line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes a single line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Formats an output error message.
fn output_error(stream: &str, error: &std::io::Error) -> String {
    format!("failed to write to {stream}: {error}")
}

/// Emits an error message to stderr and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
