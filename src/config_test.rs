use std::collections::HashMap;

use super::*;

fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = vars.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
    move |key| vars.get(key).cloned()
}

#[test]
fn defaults_when_unset() {
    let cfg = ServerConfig::from_lookup(lookup(&[])).unwrap();
    assert_eq!(cfg.port, DEFAULT_PORT);
    assert_eq!(cfg.bind_addr(), "0.0.0.0:3000");
}

#[test]
fn reads_port_and_host() {
    let cfg = ServerConfig::from_lookup(lookup(&[("PORT", " 8080 "), ("BIND_HOST", "127.0.0.1")])).unwrap();
    assert_eq!(cfg.bind_addr(), "127.0.0.1:8080");
}

#[test]
fn brackets_ipv6_hosts() {
    let cfg = ServerConfig::from_lookup(lookup(&[("BIND_HOST", "::1")])).unwrap();
    assert_eq!(cfg.bind_addr(), "[::1]:3000");
}

#[test]
fn rejects_bad_port() {
    assert_eq!(
        ServerConfig::from_lookup(lookup(&[("PORT", "http")])),
        Err(ConfigError::InvalidPort("http".to_owned()))
    );
}

#[test]
fn rejects_bad_host() {
    assert_eq!(
        ServerConfig::from_lookup(lookup(&[("BIND_HOST", "localhost")])),
        Err(ConfigError::InvalidHost("localhost".to_owned()))
    );
}
