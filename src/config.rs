use std::{env, net::SocketAddr, path::PathBuf};

pub const DEFAULT_DATA_PATH: &str = "data/sleep_well.csv";
pub const DEFAULT_PORT: u16 = 8050;

pub fn resolve_data_path() -> PathBuf {
    match env::var("APP_DATA_PATH") {
        Ok(path) if !path.trim().is_empty() => PathBuf::from(path),
        _ => PathBuf::from(DEFAULT_DATA_PATH),
    }
}

pub fn resolve_addr() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], parse_port(env::var("PORT").ok().as_deref())))
}

fn parse_port(value: Option<&str>) -> u16 {
    value
        .and_then(|value| value.trim().parse::<u16>().ok())
        .unwrap_or(DEFAULT_PORT)
}
