use anyhow::Context;
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

pub(crate) const ADDR_VAR: &str = "TRACKER_HOST_ADDR";
pub(crate) const SITE_DIR_VAR: &str = "TRACKER_SITE_DIR";

const DEFAULT_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_SITE_DIR: &str = "./site";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct HostConfig {
    pub(crate) addr: SocketAddr,
    /// Built frontend plus `data/*.json`.
    pub(crate) site_dir: PathBuf,
}

impl HostConfig {
    pub(crate) fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let addr_raw = non_empty(lookup(ADDR_VAR)).unwrap_or_else(|| DEFAULT_ADDR.to_owned());
        let addr = addr_raw
            .parse::<SocketAddr>()
            .with_context(|| format!("invalid {ADDR_VAR}: {addr_raw}"))?;

        let site_dir = non_empty(lookup(SITE_DIR_VAR))
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SITE_DIR));

        Ok(Self { addr, site_dir })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_unset_or_blank() {
        let config = HostConfig::from_lookup(lookup(&[(SITE_DIR_VAR, "  ")])).unwrap();
        assert_eq!(config.addr, "0.0.0.0:8080".parse::<SocketAddr>().unwrap());
        assert_eq!(config.site_dir, PathBuf::from("./site"));
    }

    #[test]
    fn overrides_are_read() {
        let config = HostConfig::from_lookup(lookup(&[
            (ADDR_VAR, "127.0.0.1:9000"),
            (SITE_DIR_VAR, "/srv/tracker"),
        ]))
        .unwrap();
        assert_eq!(config.addr.port(), 9000);
        assert_eq!(config.site_dir, PathBuf::from("/srv/tracker"));
    }

    #[test]
    fn bad_address_is_rejected_with_context() {
        let err = HostConfig::from_lookup(lookup(&[(ADDR_VAR, "not-an-addr")])).unwrap_err();
        assert!(err.to_string().contains(ADDR_VAR));
    }
}
