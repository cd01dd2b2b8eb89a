use std::time::Duration;

use clap::Parser;

use crate::errors::ScrapeError;

pub const OFFER_URL: &str = "https://www.packtpub.com/packt/offers/free-learning";
pub const PROMO_LINK: &str = "https://www.packtpub.com/packt/offers/free-learning?utm_source=Pybonacci&utm_medium=referral&utm_campaign=FreeLearning2017CharityReferrals";
pub const SLACK_API: &str = "https://slack.com/api";
pub const DEFAULT_CHANNEL: &str = "CEH4K4RDF";
pub const TOKEN_ENV: &str = "SLACK_BOT_TOKEN";

// The offer page rejects non-browser agents.
pub const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_11_5) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/50.0.2661.102 Safari/537.36";

#[derive(Debug, Parser)]
#[command(author, version, about = "Post Packt's free book of the day to Slack")]
pub struct Cli {
    /// Log the extracted book fields.
    #[arg(long, short)]
    pub verbose: bool,

    /// Print the Slack payload as JSON instead of posting it.
    #[arg(long)]
    pub dry_run: bool,

    /// Slack channel (or user) id to post to.
    #[arg(long, default_value = DEFAULT_CHANNEL)]
    pub channel: String,

    /// Offer page to scrape.
    #[arg(long, default_value = OFFER_URL)]
    pub url: String,

    /// Base URL of the Slack Web API.
    #[arg(long, default_value = SLACK_API)]
    pub slack_api: String,

    /// Timeout for each HTTP request.
    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub url: String,
    pub channel: String,
    pub slack_api: String,
    pub token: Option<String>,
    pub timeout: Duration,
    pub verbose: bool,
    pub dry_run: bool,
}

impl Config {
    /// Resolve the command line against the process environment. The bot
    /// token is only required when the run will actually post.
    pub fn from_cli(cli: Cli) -> anyhow::Result<Self> {
        let token = std::env::var(TOKEN_ENV)
            .ok()
            .filter(|token| !token.trim().is_empty());
        if token.is_none() && !cli.dry_run {
            return Err(ScrapeError::Config(format!("{TOKEN_ENV} is not set")).into());
        }

        Ok(Self {
            url: cli.url,
            channel: cli.channel,
            slack_api: cli.slack_api,
            token,
            timeout: Duration::from_secs(cli.timeout_secs),
            verbose: cli.verbose,
            dry_run: cli.dry_run,
        })
    }
}
