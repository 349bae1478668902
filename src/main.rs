// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Procflow-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Procflow and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Procflow CLI entrypoint.
//!
//! By default this runs the interactive TUI and serves MCP over streamable HTTP at
//! `http://127.0.0.1:<port>/mcp`.
//!
//! Use `--mcp` to run the MCP server over stdio instead (intended for tool integrations), or
//! `--print` to build once from the command line and write the result without a terminal UI.

use std::error::Error;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::Router;
use procflow::build::{build, form_from_inputs, BuildOutcome};
use procflow::format::{export_graph, ExportFormat};
use procflow::model::{FlowValue, FormState};
use rmcp::transport::{
    streamable_http_server::session::local::LocalSessionManager, StreamableHttpServerConfig,
    StreamableHttpService,
};
use tokio::sync::Mutex;

const DEFAULT_MCP_HTTP_PORT: u16 = 27436;

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} [--steps <csv>] [--value <n>]... [--output <path>] [--mcp-http-port <port>]\n  {program} --mcp [--steps <csv>] [--value <n>]...\n  {program} --print [--format text|json|html] [--output <path>] --steps <csv> [--value <n>]...\n\nTUI mode (default) serves MCP over streamable HTTP at `http://127.0.0.1:<port>/mcp`.\n--mcp-http-port selects the port (0 = ephemeral; default {DEFAULT_MCP_HTTP_PORT}).\n\n--steps pre-fills the comma-separated steps; each --value fills the next step pair in order.\n--output sets the export path (TUI Ctrl-S, default {}) or the --print target (default stdout).\n--format defaults to the --output extension, else text.",
        procflow::tui::DEFAULT_EXPORT_PATH
    );
}

#[derive(Debug, Default, Clone, PartialEq)]
struct CliOptions {
    mcp: bool,
    print: bool,
    steps: Option<String>,
    values: Vec<f64>,
    mcp_http_port: Option<u16>,
    format: Option<ExportFormat>,
    output: Option<String>,
}

impl CliOptions {
    fn form(&self) -> FormState {
        form_from_inputs(self.steps.as_deref().unwrap_or(""), self.values.iter().copied())
    }

    fn print_format(&self) -> ExportFormat {
        match (self.format, self.output.as_deref()) {
            (Some(format), _) => format,
            (None, Some(output)) => ExportFormat::from_path(Path::new(output)),
            (None, None) => ExportFormat::Text,
        }
    }
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--mcp" => {
                if options.mcp {
                    return Err(());
                }
                options.mcp = true;
            }
            "--print" => {
                if options.print {
                    return Err(());
                }
                options.print = true;
            }
            "--steps" => {
                if options.steps.is_some() {
                    return Err(());
                }
                options.steps = Some(args.next().ok_or(())?);
            }
            "--value" => {
                let raw = args.next().ok_or(())?;
                let value: FlowValue = raw.parse().map_err(|_| ())?;
                options.values.push(value.get());
            }
            "--mcp-http-port" => {
                if options.mcp_http_port.is_some() {
                    return Err(());
                }
                let raw = args.next().ok_or(())?;
                let port: u16 = raw.parse().map_err(|_| ())?;
                options.mcp_http_port = Some(port);
            }
            "--format" => {
                if options.format.is_some() {
                    return Err(());
                }
                let raw = args.next().ok_or(())?;
                options.format = Some(raw.parse().map_err(|_| ())?);
            }
            "--output" => {
                if options.output.is_some() {
                    return Err(());
                }
                options.output = Some(args.next().ok_or(())?);
            }
            _ => return Err(()),
        }
    }

    if options.mcp && (options.print || options.mcp_http_port.is_some()) {
        return Err(());
    }

    if options.mcp && options.output.is_some() {
        return Err(());
    }

    if options.print && options.mcp_http_port.is_some() {
        return Err(());
    }

    if options.format.is_some() && !options.print {
        return Err(());
    }

    Ok(options)
}

/// Builds once and writes the diagram. A halt is reported on stderr and is not an error.
fn print_diagram(
    form: &FormState,
    format: ExportFormat,
    output: Option<&str>,
) -> Result<(), Box<dyn Error>> {
    let graph = match build(form) {
        BuildOutcome::Graph(graph) => graph,
        BuildOutcome::Halt(reason) => {
            eprintln!("procflow: {}: {}", reason.severity().as_str(), reason.message());
            return Ok(());
        }
    };

    let content = export_graph(&graph, format)?;
    match output {
        Some(path) => std::fs::write(path, content)?,
        None => println!("{content}"),
    }
    Ok(())
}

fn main() {
    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "procflow".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };

        let form = options.form();

        if options.print {
            return print_diagram(&form, options.print_format(), options.output.as_deref());
        }

        if options.mcp {
            let mcp = procflow::mcp::ProcflowMcp::new(form);
            let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;

            runtime.block_on(mcp.serve_stdio())?;
            return Ok(());
        }

        let ui_state = Arc::new(Mutex::new(procflow::ui::UiState::new(form.clone())));
        let mcp = procflow::mcp::ProcflowMcp::new_with_ui_state(ui_state.clone());
        let mcp_http_port = options.mcp_http_port.unwrap_or(DEFAULT_MCP_HTTP_PORT);
        let tui_options = procflow::tui::TuiOptions {
            export_path: options
                .output
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(procflow::tui::DEFAULT_EXPORT_PATH)),
        };

        let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;

        runtime.block_on(async move {
            let listener = tokio::net::TcpListener::bind(("127.0.0.1", mcp_http_port)).await?;

            let config = StreamableHttpServerConfig {
                stateful_mode: true,
                ..StreamableHttpServerConfig::default()
            };
            let shutdown_token = config.cancellation_token.clone();
            let server_shutdown = shutdown_token.clone();

            let session_manager = Arc::new(LocalSessionManager::default());
            let mcp_service = {
                let mcp = mcp.clone();
                StreamableHttpService::new(move || Ok(mcp.clone()), session_manager, config)
            };

            let router = Router::new().nest_service("/mcp", mcp_service);
            let server_handle = tokio::spawn(async move {
                let serve = axum::serve(listener, router).with_graceful_shutdown(async move {
                    server_shutdown.cancelled().await;
                });
                if let Err(err) = serve.await {
                    eprintln!("procflow: MCP HTTP server error: {err}");
                }
            });

            let tui_ui_state = ui_state.clone();
            let tui_join = tokio::task::spawn_blocking(move || {
                procflow::tui::run(form, Some(tui_ui_state), tui_options)
                    .map_err(|err| err.to_string())
            })
            .await;

            shutdown_token.cancel();
            let _ = server_handle.await;

            let tui_result = tui_join.map_err(|err| -> Box<dyn Error> { Box::new(err) })?;
            tui_result.map_err(|err| {
                Box::new(std::io::Error::new(std::io::ErrorKind::Other, err)) as Box<dyn Error>
            })?;
            Ok::<(), Box<dyn Error>>(())
        })?;

        Ok(())
    })();

    if let Err(err) = result {
        eprintln!("procflow: {err}");
        std::process::exit(1);
    }
}
