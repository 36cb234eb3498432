use std::{
    net::{Ipv4Addr, SocketAddr},
    path::PathBuf,
};

#[derive(serde::Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_address: SocketAddr,
    pub template_path: PathBuf,
    pub static_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: SocketAddr::from((Ipv4Addr::UNSPECIFIED, 8080)),
            template_path: PathBuf::from("index.html"),
            static_dir: PathBuf::from("static"),
        }
    }
}
