//! Server binary: CLI flags, logging setup, warp serve loop.

use std::net::IpAddr;

use clap::{value_parser, Arg, Command};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn cli() -> Command {
    Command::new("fleet-router")
        .about("Vehicle routing optimization server")
        .arg(
            Arg::new("host")
                .long("host")
                .help("Bind address")
                .default_value("0.0.0.0")
                .value_parser(value_parser!(IpAddr)),
        )
        .arg(
            Arg::new("port")
                .long("port")
                .help("Bind port")
                .default_value("8000")
                .value_parser(value_parser!(u16)),
        )
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let matches = cli().get_matches();
    let host = *matches.get_one::<IpAddr>("host").expect("has default");
    let port = *matches.get_one::<u16>("port").expect("has default");

    info!(%host, port, "starting server");
    warp::serve(fleet_router::api::routes()).run((host, port)).await;
}
