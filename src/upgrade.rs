//! `autopush upgrade` and `autopush uninstall`.
//!
//! Both delegate to `cargo`: the latest published version is looked up on
//! the crates.io API and installed with `cargo install`, and uninstalling runs
//! `cargo uninstall` before optionally removing the config directory.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use reqwest::Client;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT};
use semver::Version;
use serde::Deserialize;
use tracing::debug;

use crate::config::Paths;
use crate::error::UpgradeError;
use crate::workflow::Prompter;

/// Name the tool is published and installed under.
pub const CRATE_NAME: &str = "autopush";

/// Default registry API host.
pub const REGISTRY_URL: &str = "https://crates.io";

const UPGRADER_AGENT: &str = concat!("autopush-upgrader/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Deserialize)]
struct CrateResponse {
    #[serde(rename = "crate")]
    krate: CrateInfo,
}

#[derive(Debug, Deserialize)]
struct CrateInfo {
    max_version: String,
    #[serde(default)]
    max_stable_version: Option<String>,
}

/// What an upgrade run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpgradeOutcome {
    UpToDate(Version),
    Upgraded { from: Version, to: Version },
}

/// HTTP client for the registry API, which rejects requests without a
/// user agent.
pub fn registry_client() -> Result<Client, UpgradeError> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(USER_AGENT, HeaderValue::from_static(UPGRADER_AGENT));

    Client::builder()
        .default_headers(headers)
        .build()
        .map_err(UpgradeError::VersionLookup)
}

/// The newest published version, preferring the latest stable release.
pub async fn latest_version(client: &Client, base_url: &str) -> Result<Version, UpgradeError> {
    let url = format!("{}/api/v1/crates/{}", base_url.trim_end_matches('/'), CRATE_NAME);
    debug!("Looking up latest version at {}", url);

    let response: CrateResponse = client
        .get(&url)
        .send()
        .await
        .and_then(|r| r.error_for_status())
        .map_err(UpgradeError::VersionLookup)?
        .json()
        .await
        .map_err(UpgradeError::VersionLookup)?;

    let raw = response
        .krate
        .max_stable_version
        .filter(|v| !v.is_empty())
        .unwrap_or(response.krate.max_version);

    Version::parse(&raw).map_err(|e| UpgradeError::InvalidVersion(raw, e))
}

/// The version of the running binary.
pub fn current_version() -> Result<Version, UpgradeError> {
    let raw = env!("CARGO_PKG_VERSION");
    Version::parse(raw).map_err(|e| UpgradeError::InvalidVersion(raw.to_string(), e))
}

pub fn is_newer(latest: &Version, current: &Version) -> bool {
    latest > current
}

/// A located `cargo` executable.
#[derive(Debug, Clone)]
pub struct Cargo {
    program: PathBuf,
}

impl Cargo {
    /// Find `cargo` on PATH.
    pub fn locate() -> Result<Self, UpgradeError> {
        which::which("cargo")
            .map(Self::at)
            .map_err(|_| UpgradeError::CargoNotInstalled)
    }

    pub fn at(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Run cargo with inherited stdio so its progress output is visible.
    pub fn run(&self, args: &[&str]) -> Result<(), UpgradeError> {
        debug!("{} {}", self.program.display(), args.join(" "));

        let status = Command::new(&self.program)
            .args(args)
            .status()
            .map_err(UpgradeError::SpawnFailed)?;

        if status.success() {
            Ok(())
        } else {
            Err(UpgradeError::PackageManagerFailed {
                command: args.first().copied().unwrap_or_default().to_string(),
                code: status.code().unwrap_or(-1),
            })
        }
    }
}

/// Install the latest published version when it is newer than this one.
pub async fn run_upgrade(cargo: &Cargo, client: &Client, base_url: &str) -> Result<UpgradeOutcome, UpgradeError> {
    let current = current_version()?;
    println!("Checking for updates (current version {})...", current);

    let latest = latest_version(client, base_url).await?;
    if !is_newer(&latest, &current) {
        println!("autopush {} is already the latest version.", current);
        return Ok(UpgradeOutcome::UpToDate(current));
    }

    println!("Upgrading autopush {} -> {}", current, latest);
    let version = latest.to_string();
    cargo.run(&["install", CRATE_NAME, "--force", "--version", &version])?;

    println!("Upgraded to autopush {}.", latest);
    Ok(UpgradeOutcome::Upgraded {
        from: current,
        to: latest,
    })
}

/// Uninstall the binary, then offer to delete the config directory.
///
/// Returns `false` when the user cancelled.
pub fn run_uninstall(cargo: &Cargo, prompter: &dyn Prompter, paths: &Paths) -> Result<bool, UpgradeError> {
    if !prompter.confirm("Uninstall autopush?", false)? {
        println!("Uninstall cancelled.");
        return Ok(false);
    }

    cargo.run(&["uninstall", CRATE_NAME])?;
    println!("autopush has been uninstalled.");

    if paths.dir.exists()
        && prompter.confirm(
            &format!("Also remove your configuration at {}?", paths.dir.display()),
            false,
        )?
    {
        remove_config_dir(&paths.dir)?;
        println!("Removed {}.", paths.dir.display());
    }

    Ok(true)
}

fn remove_config_dir(dir: &Path) -> Result<(), UpgradeError> {
    fs::remove_dir_all(dir).map_err(|source| UpgradeError::RemoveFailed {
        path: dir.to_path_buf(),
        source,
    })
}
