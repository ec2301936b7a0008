use crate::cli::{Cli, Command};
use crate::config::AppConfig;
use crate::domain::FilterSelection;
use crate::router::handle;
use crate::state::AppState;
use astra::Server;
use clap::Parser;
use log::{error, info, Level};
use std::net::SocketAddr;
use std::sync::Arc;

mod cli;
mod config;
mod domain;
mod errors;
mod map;
mod projection;
mod responses;
mod router;
mod spreadsheets;
mod state;
mod stores;
mod templates;
mod transit;

#[cfg(test)]
mod tests;

fn main() {
    let cli = Cli::parse();

    simple_logger::init_with_level(if cli.verbose {
        Level::Debug
    } else {
        Level::Info
    })
    .unwrap_or_else(|e| eprintln!("Logger initialization failed: {e}"));

    let mut cfg = AppConfig::from_env();
    if let Command::Serve { addr: Some(addr) } = &cli.command {
        cfg.bind_addr = addr.clone();
    }

    let state = match AppState::load(&cfg) {
        Ok(state) => state,
        Err(e) => {
            error!("Startup failed: {e}");
            std::process::exit(1);
        }
    };

    match cli.command {
        Command::Serve { .. } => serve(&cfg.bind_addr, Arc::new(state)),
        Command::Render { locations, rooms } => {
            let selection = FilterSelection::new(locations, rooms);
            if let Err(e) = state.render_selection(&selection) {
                error!("Render failed: {e}");
                std::process::exit(1);
            }
        }
    }
}

fn serve(bind_addr: &str, state: Arc<AppState>) {
    let addr: SocketAddr = match bind_addr.parse() {
        Ok(addr) => addr,
        Err(e) => {
            error!("Invalid bind address {bind_addr}: {e}");
            std::process::exit(1);
        }
    };
    info!("Starting server at http://{addr}");

    let server = Server::bind(&addr).max_workers(8);

    let result = server.serve(move |req, _info| match handle(req, &state) {
        Ok(resp) => resp,
        Err(err) => {
            error!("{err}");
            templates::html_error_response(err)
        }
    });

    if let Err(e) = result {
        error!("Server ended with error: {e}");
    }

    info!("Server shut down cleanly.");
}
