use serde::{Deserialize, Serialize};

/// One DoH endpoint. List order is failover priority.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct UpstreamServer {
    pub name: String,

    pub url: String,
}

impl UpstreamServer {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DohConfig {
    #[serde(default = "default_servers")]
    pub servers: Vec<UpstreamServer>,

    /// Per-attempt timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    #[serde(default = "default_use_http2")]
    pub use_http2: bool,
}

impl Default for DohConfig {
    fn default() -> Self {
        Self {
            servers: default_servers(),
            timeout: default_timeout(),
            use_http2: default_use_http2(),
        }
    }
}

fn default_servers() -> Vec<UpstreamServer> {
    vec![
        UpstreamServer::new("Cloudflare", "https://cloudflare-dns.com/dns-query"),
        UpstreamServer::new("Google", "https://dns.google/dns-query"),
    ]
}

fn default_timeout() -> u64 {
    5
}

fn default_use_http2() -> bool {
    true
}
