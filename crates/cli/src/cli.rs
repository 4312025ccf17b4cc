use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use flow::FlowConfig;

#[derive(Parser, Debug)]
#[command(name = "clawlogin")]
#[command(about = "Automated GitHub login into the ClawCloud Run console")]
#[command(version)]
pub struct Cli {
    /// Increase verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Console URL to log into
    #[arg(long, default_value = flow::config::DEFAULT_TARGET_URL)]
    pub url: String,

    /// Directory for checkpoint screenshots
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub screenshot_dir: PathBuf,

    /// Run with a visible browser window instead of headless
    #[arg(long)]
    pub headed: bool,

    /// Verification-code attempts before giving up
    #[arg(long, value_name = "N", default_value_t = 3)]
    pub max_2fa_retries: u32,

    /// Seconds to wait after submitting a verification code
    #[arg(long, value_name = "SECS", default_value_t = 5)]
    pub wait_after_2fa: u64,

    /// Seconds to wait for the final redirect before the success check
    #[arg(long, value_name = "SECS", default_value_t = 25)]
    pub final_wait: u64,

    /// Seconds to wait for out-of-band device approval
    #[arg(long, value_name = "SECS", default_value_t = 60)]
    pub device_wait: u32,
}

impl Cli {
    pub fn flow_config(&self) -> flow::Result<FlowConfig> {
        // The stock config keeps the bare `claw.cloud` host marker, which
        // also matches region redirects; a full host is only derived for
        // explicit `--url` overrides.
        let mut config = if self.url == flow::config::DEFAULT_TARGET_URL {
            FlowConfig::default()
        } else {
            FlowConfig::for_target(&self.url)?
        };
        config.max_2fa_retries = self.max_2fa_retries;
        config.wait_after_2fa = Duration::from_secs(self.wait_after_2fa);
        config.final_wait = Duration::from_secs(self.final_wait);
        config.device_poll_ticks = self.device_wait;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_tuned_flow() {
        let cli = Cli::try_parse_from(["clawlogin"]).unwrap();
        assert_eq!(cli.url, flow::config::DEFAULT_TARGET_URL);
        assert_eq!(cli.max_2fa_retries, 3);
        assert_eq!(cli.final_wait, 25);
        assert_eq!(cli.device_wait, 60);
        assert!(!cli.headed);
    }

    #[test]
    fn default_url_keeps_the_bare_host_marker() {
        let cli = Cli::try_parse_from(["clawlogin"]).unwrap();
        let config = cli.flow_config().unwrap();
        assert_eq!(config.target_host, "claw.cloud");
    }

    #[test]
    fn overrides_flow_through_to_the_config() {
        let cli = Cli::try_parse_from([
            "clawlogin",
            "--url",
            "https://eu-west-1.run.claw.cloud/",
            "--max-2fa-retries",
            "5",
            "--final-wait",
            "10",
        ])
        .unwrap();
        let config = cli.flow_config().unwrap();
        assert_eq!(config.target_host, "eu-west-1.run.claw.cloud");
        assert_eq!(config.max_2fa_retries, 5);
        assert_eq!(config.final_wait, Duration::from_secs(10));
    }

    #[test]
    fn bad_target_url_is_rejected() {
        let cli = Cli::try_parse_from(["clawlogin", "--url", "not a url"]).unwrap();
        assert!(cli.flow_config().is_err());
    }

    #[test]
    fn verbose_flag_counts() {
        let cli = Cli::try_parse_from(["clawlogin", "-vv"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }
}
