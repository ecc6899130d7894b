// Standalone MCP server binary

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use strands_mcp_server::config::ServerConfig;
use strands_mcp_server::server::McpServer;
use strands_mcp_server::tools::documentation_registry;

const DEFAULT_CONFIG_FILE: &str = "strands-mcp.toml";

#[derive(Parser, Debug)]
#[command(name = "strands-mcp-server")]
#[command(about = "Serves Strands Agents documentation as MCP tools over stdio", long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, env = "STRANDS_MCP_CONFIG")]
    config: Option<PathBuf>,

    /// Directory of markdown documentation files
    #[arg(long, env = "STRANDS_MCP_CONTENT_DIR")]
    content_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing; stdout carries the protocol
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "strands_mcp_server=info,strands_docs_core=info".into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => ServerConfig::load(path, true)?,
        None => ServerConfig::load(&PathBuf::from(DEFAULT_CONFIG_FILE), false)?,
    }
    .with_content_dir(args.content_dir);

    tracing::info!("Content directory: {}", config.content.dir.display());

    let server = McpServer::new(documentation_registry(&config.content.dir))
        .with_name(config.server.name)
        .with_instructions(config.server.instructions);

    tracing::info!("Registered {} documentation tools", server.registry().len());
    server.start().await?;

    Ok(())
}
