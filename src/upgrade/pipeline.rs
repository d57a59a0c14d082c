//! The upgrade pipeline: resolve, fetch, clean, extract, clean up.
//!
//! Steps run strictly in order and the first failure ends the run. Each
//! failure is wrapped with the name of the [`Stage`] it happened in, so the
//! message printed by `main` always says which step broke.

use crate::constants::{CONNECT_TIMEOUT, USER_AGENT};
use crate::core::UpdateError;
use crate::upgrade::cleaner::{CleanOutcome, remove_install_dir};
use crate::upgrade::config::UpgradeConfig;
use crate::upgrade::download::{DownloadTarget, FetchOutcome, fetch_archive};
use crate::upgrade::extract::{ExtractSummary, extract_in_background};
use crate::upgrade::version_check::{VersionIdentifier, resolve_latest};
use crate::utils::platform::ensure_privileged;
use anyhow::{Context, Result};
use std::fmt;
use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info};

/// Pipeline steps, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Preflight,
    ResolveVersion,
    Fetch,
    Clean,
    Extract,
    Cleanup,
    Done,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Preflight => "privilege check",
            Self::ResolveVersion => "version lookup",
            Self::Fetch => "download",
            Self::Clean => "removal of the old installation",
            Self::Extract => "extraction",
            Self::Cleanup => "archive cleanup",
            Self::Done => "done",
        };
        f.write_str(name)
    }
}

/// What a successful run did.
#[derive(Debug, Clone)]
pub struct UpgradeReport {
    pub version: VersionIdentifier,
    /// The version came from `--version` rather than the listing page.
    pub pinned: bool,
    pub archive: PathBuf,
    pub install_dir: PathBuf,
    pub fetch: FetchOutcome,
    pub clean: CleanOutcome,
    pub extract: ExtractSummary,
    pub archive_removed: bool,
}

/// Run the whole upgrade described by `config`.
///
/// Version lookup and download share one deadline of
/// `config.network_timeout`, measured from the start of the lookup. When it
/// passes, the in-flight request is dropped and the run fails with a
/// [`UpdateError::Network`] timeout. Extraction is not time-limited.
///
/// A failure to delete the archive fails the run even though the new
/// toolchain is already in place.
///
/// # Errors
///
/// Returns the first step failure, with context naming the step.
///
/// # Examples
///
/// ```rust,no_run
/// use update_golang::upgrade::{UpgradeConfig, pipeline};
///
/// # async fn example() -> anyhow::Result<()> {
/// let report = pipeline::run(&UpgradeConfig::new().with_version("go1.23.2")).await?;
/// println!("installed {} into {}", report.version, report.install_dir.display());
/// # Ok(())
/// # }
/// ```
pub async fn run(config: &UpgradeConfig) -> Result<UpgradeReport> {
    let install_dir = config.install_dir();

    if config.check_privileges {
        enter(Stage::Preflight);
        ensure_privileged(&config.install_root)
            .with_context(|| format!("{} failed", Stage::Preflight))?;
    } else {
        debug!("Privilege check disabled");
    }

    let client = reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .connect_timeout(CONNECT_TIMEOUT)
        .build()
        .context("Failed to build HTTP client")?;

    let deadline = Instant::now().checked_add(config.network_timeout).ok_or_else(|| {
        UpdateError::Other {
            message: format!(
                "network timeout of {}s is too large",
                config.network_timeout.as_secs()
            ),
        }
    })?;

    enter(Stage::ResolveVersion);
    let (version, pinned) = match &config.version {
        Some(raw) => {
            let version = VersionIdentifier::parse_override(raw)
                .with_context(|| format!("{} failed", Stage::ResolveVersion))?;
            info!("Using requested version {}", version);
            (version, true)
        }
        None => {
            let version = with_deadline(
                deadline,
                config.network_timeout,
                &config.listing_url,
                resolve_latest(&client, &config.listing_url),
            )
            .await
            .with_context(|| format!("{} failed", Stage::ResolveVersion))?;
            (version, false)
        }
    };

    enter(Stage::Fetch);
    let target = DownloadTarget::new(&config.download_base, &config.download_dir, &version);
    let fetch = with_deadline(
        deadline,
        config.network_timeout,
        &target.url,
        fetch_archive(&client, &target, config.show_progress),
    )
    .await
    .with_context(|| format!("{} failed", Stage::Fetch))?;

    enter(Stage::Clean);
    let clean = remove_install_dir(&install_dir)
        .await
        .with_context(|| format!("{} failed", Stage::Clean))?;

    enter(Stage::Extract);
    let extract = extract_in_background(
        target.path.clone(),
        config.install_root.clone(),
        config.show_progress,
    )
    .await
    .with_context(|| format!("{} failed", Stage::Extract))?;

    let archive_removed = if config.keep_archive {
        debug!("Keeping {}", target.path.display());
        false
    } else {
        enter(Stage::Cleanup);
        tokio::fs::remove_file(&target.path)
            .await
            .map_err(|e| UpdateError::from_io("remove archive", &target.path, &e))
            .with_context(|| format!("{} failed", Stage::Cleanup))?;
        true
    };

    enter(Stage::Done);
    Ok(UpgradeReport {
        version,
        pinned,
        archive: target.path,
        install_dir,
        fetch,
        clean,
        extract,
        archive_removed,
    })
}

fn enter(stage: Stage) {
    debug!("Pipeline stage: {}", stage);
}

async fn with_deadline<T>(
    deadline: Instant,
    budget: Duration,
    url: &str,
    step: impl Future<Output = Result<T, UpdateError>>,
) -> Result<T, UpdateError> {
    tokio::time::timeout_at(deadline, step).await.map_err(|_| UpdateError::Network {
        url: url.to_string(),
        reason: format!("timed out after {}s", budget.as_secs()),
    })?
}
