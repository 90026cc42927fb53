//! Sign in through the configured service set and print one page of the
//! customers grid as text.
//!
//! Backend selection, base URL, seed, and session file come from the
//! `WEALTHDESK_*` settings; the flags below only drive the page itself.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::ffi::OsString;
use std::io::{self, Write};

use clap::Parser;
use color_eyre::eyre::{Context, Result, eyre};
use tokio::runtime::Builder;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use wealthdesk::composition::ServiceRegistry;
use wealthdesk::config::AppSettings;
use wealthdesk::domain::CustomerStatus;
use wealthdesk::outbound::memory::{FIXTURE_EMAIL, FIXTURE_PASSWORD};
use wealthdesk::pages::FetchOutcome;
use wealthdesk::view::{GridEvent, render_grid_text};

/// `wealthdesk-cli` arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "wealthdesk-cli",
    about = "Print one page of the WealthDesk customers grid",
    version
)]
struct CliArgs {
    /// Login email.
    #[arg(long, default_value = FIXTURE_EMAIL)]
    email: String,
    /// Login password.
    #[arg(long, default_value = FIXTURE_PASSWORD)]
    password: String,
    /// Zero-based page index.
    #[arg(long, default_value_t = 0)]
    page: u32,
    /// Rows per page.
    #[arg(long = "per-page", default_value_t = 10)]
    per_page: u32,
    /// Only customers with this status (`active` or `inactive`).
    #[arg(long)]
    status: Option<CustomerStatus>,
    /// Case-insensitive search over name, email, and mobile.
    #[arg(long)]
    search: Option<String>,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .compact()
        .with_writer(io::stderr)
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let args = CliArgs::parse();
    // Flags belong to clap; settings come from the environment and config file.
    let settings = AppSettings::from_args([OsString::from("wealthdesk-cli")])
        .wrap_err("failed to load settings")?;
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .wrap_err("failed to create Tokio runtime")?;
    let rendered = runtime.block_on(render_page(&settings, args))?;

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{rendered}").wrap_err("failed to write grid")?;
    Ok(())
}

async fn render_page(settings: &AppSettings, args: CliArgs) -> Result<String> {
    let registry = ServiceRegistry::from_settings(settings).wrap_err("failed to compose services")?;
    let store = registry.store();
    if !store.login(&args.email, &args.password).await {
        let message = store.state().error.unwrap_or_default();
        return Err(eyre!("login failed: {message}"));
    }

    let mut page = registry.customers_page();
    if let Some(status) = args.status {
        page.filter_by_status(Some(status)).await;
    }
    if let Some(search) = args.search {
        page.set_search_text(search);
        page.search().await;
    }
    page.handle(GridEvent::RowsPerPageRequested(args.per_page)).await;
    if args.page > 0 {
        page.handle(GridEvent::PageRequested(args.page)).await;
    }

    if let FetchOutcome::Failed(message) = page.refresh().await {
        return Err(eyre!("failed to load customers: {message}"));
    }
    Ok(render_grid_text(&page.grid().view()))
}

#[cfg(test)]
mod tests {
    //! Unit tests for argument parsing and page rendering.

    use clap::Parser;
    use rstest::{fixture, rstest};
    use wealthdesk::config::AppSettings;
    use wealthdesk::domain::CustomerStatus;

    use super::{CliArgs, render_page};

    #[fixture]
    fn settings() -> AppSettings {
        AppSettings {
            latency_ms: Some(0),
            ..AppSettings::default()
        }
    }

    #[rstest]
    fn flags_default_to_the_fixture_operator() {
        let args = CliArgs::try_parse_from(["wealthdesk-cli"]).expect("defaults parse");
        assert_eq!(args.email, "admin@example.com");
        assert_eq!(args.page, 0);
        assert_eq!(args.per_page, 10);
        assert!(args.status.is_none());
    }

    #[rstest]
    fn status_flag_parses_wire_values() {
        let args = CliArgs::try_parse_from([
            "wealthdesk-cli",
            "--status",
            "inactive",
            "--per-page",
            "5",
        ])
        .expect("flags parse");
        assert_eq!(args.status, Some(CustomerStatus::Inactive));
        assert_eq!(args.per_page, 5);
    }

    #[rstest]
    #[tokio::test]
    async fn renders_one_page_of_customers(settings: AppSettings) {
        let args =
            CliArgs::try_parse_from(["wealthdesk-cli", "--per-page", "5"]).expect("flags parse");

        let rendered = render_page(&settings, args).await.expect("page renders");

        assert!(rendered.contains("Rows per page: 5"), "{rendered}");
        assert!(rendered.contains("1\u{2013}5 of "), "{rendered}");
    }

    #[rstest]
    #[tokio::test]
    async fn wrong_password_is_reported(settings: AppSettings) {
        let args = CliArgs::try_parse_from(["wealthdesk-cli", "--password", "nope"])
            .expect("flags parse");

        let error = render_page(&settings, args).await.expect_err("login must fail");

        assert!(error.to_string().contains("Invalid email or password"), "{error}");
    }
}
