use std::{
    fs,
    io::{self, Read},
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{Context, Result, anyhow, bail};
use clap::{Args, Parser, Subcommand};
use serde_json::Value;
use tnotify_core::adaptivecard::{
    self, Validate, new_code_block, new_fact, new_fact_set, new_mention_card,
    new_message_from_card, new_text_block_card, new_title_text_block,
};
use tnotify_core::botapi;
use tnotify_webhook::{WebhookClient, WebhookConfig};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    tnotify_telemetry::install("tnotify")?;
    let cli = Cli::parse();
    match cli.command {
        CliCommand::Send {
            card,
            delivery,
            dry_run,
        } => handle_send(card, delivery, dry_run).await,
        CliCommand::Preview { card } => handle_preview(card),
        CliCommand::Validate { file } => handle_validate(&file),
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "tnotify",
    version,
    about = "Build, check and send Microsoft Teams webhook notifications"
)]
struct Cli {
    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Subcommand, Debug)]
enum CliCommand {
    /// Build an Adaptive Card message and post it to an incoming webhook
    Send {
        #[command(flatten)]
        card: CardArgs,
        #[command(flatten)]
        delivery: DeliveryArgs,
        /// Print the payload instead of posting it.
        #[arg(long)]
        dry_run: bool,
    },
    /// Print the payload `send` would post
    Preview {
        #[command(flatten)]
        card: CardArgs,
    },
    /// Validate a message JSON document (`-` reads stdin)
    Validate {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

#[derive(Args, Debug)]
struct CardArgs {
    /// Heading shown above the text.
    #[arg(long)]
    title: Option<String>,
    /// Message text.
    #[arg(long)]
    text: String,
    /// Display name of a user to mention.
    #[arg(long, requires = "mention_id")]
    mention_name: Option<String>,
    /// Id (UPN or object id) of the mentioned user.
    #[arg(long, requires = "mention_name")]
    mention_id: Option<String>,
    /// Fact shown below the text; can be repeated.
    #[arg(long = "fact", value_name = "TITLE=VALUE", value_parser = parse_fact)]
    facts: Vec<(String, String)>,
    /// File whose contents are shown as a code block.
    #[arg(long, value_name = "FILE")]
    code: Option<PathBuf>,
    /// Language used to highlight `--code`.
    #[arg(long, default_value = "PlainText")]
    language: String,
}

#[derive(Args, Debug)]
struct DeliveryArgs {
    /// Incoming webhook or workflow URL.
    #[arg(long, env = "TNOTIFY_WEBHOOK_URL", hide_env_values = true)]
    webhook_url: Option<String>,
    /// Extra attempts after the first failure.
    #[arg(long)]
    retries: Option<u32>,
    /// Seconds between attempts.
    #[arg(long, value_name = "SECS")]
    retry_delay: Option<u64>,
    /// Per request timeout in seconds.
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,
    /// Accept webhook URLs outside the known Teams hosts.
    #[arg(long)]
    skip_url_validation: bool,
}

impl DeliveryArgs {
    fn config(&self, base: WebhookConfig) -> WebhookConfig {
        let mut config = base;
        if let Some(retries) = self.retries {
            config = config.with_retries(retries);
        }
        if let Some(secs) = self.retry_delay {
            config = config.with_retry_delay(Duration::from_secs(secs));
        }
        if let Some(secs) = self.timeout {
            config = config.with_timeout(Duration::from_secs(secs));
        }
        if self.skip_url_validation {
            config = config.with_url_validation(false);
        }
        config
    }
}

fn parse_fact(raw: &str) -> Result<(String, String), String> {
    let (title, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected TITLE=VALUE, got {raw:?}"))?;
    let (title, value) = (title.trim(), value.trim());
    if title.is_empty() || value.is_empty() {
        return Err(format!("fact title and value must not be empty in {raw:?}"));
    }
    Ok((title.to_string(), value.to_string()))
}

fn build_message(args: &CardArgs) -> Result<adaptivecard::Message> {
    let title = args.title.as_deref().unwrap_or("");
    let mut card = match (&args.mention_name, &args.mention_id) {
        (Some(name), Some(id)) => {
            let mut card = new_mention_card(name, id, &args.text)?;
            if !title.is_empty() {
                card.add_element(true, vec![new_title_text_block(title, true)])?;
            }
            card
        }
        _ => new_text_block_card(&args.text, title),
    };

    if !args.facts.is_empty() {
        let mut facts = new_fact_set();
        facts.add_fact(
            args.facts
                .iter()
                .map(|(title, value)| new_fact(title, value)),
        )?;
        card.add_element(false, vec![facts])?;
    }

    if let Some(path) = &args.code {
        let snippet = fs::read_to_string(path)
            .with_context(|| format!("read code snippet {}", path.display()))?;
        card.add_element(false, vec![new_code_block(&snippet, &args.language, 1)])?;
    }

    let mut message = new_message_from_card(card)?;
    message.prepare().context("prepare payload")?;
    Ok(message)
}

fn pretty(message: &adaptivecard::Message) -> Result<String> {
    message
        .pretty_print()
        .ok_or_else(|| anyhow!("message payload was not prepared"))
}

fn handle_preview(args: CardArgs) -> Result<()> {
    let message = build_message(&args)?;
    println!("{}", pretty(&message)?);
    Ok(())
}

async fn handle_send(card: CardArgs, delivery: DeliveryArgs, dry_run: bool) -> Result<()> {
    let mut message = build_message(&card)?;
    if dry_run {
        println!("{}", pretty(&message)?);
        return Ok(());
    }

    let Some(url) = delivery.webhook_url.as_deref() else {
        bail!("a webhook URL is required (--webhook-url or TNOTIFY_WEBHOOK_URL)");
    };
    let config = delivery.config(WebhookConfig::from_env());
    let retries = config.retries;
    let client = WebhookClient::new(config).context("build webhook client")?;
    client
        .send(url, &mut message)
        .await
        .context("deliver notification")?;
    info!(retries, "notification sent");
    Ok(())
}

fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut raw = String::new();
        io::stdin()
            .read_to_string(&mut raw)
            .context("read message from stdin")?;
        return Ok(raw);
    }
    fs::read_to_string(path).with_context(|| format!("read {}", path.display()))
}

fn handle_validate(path: &Path) -> Result<()> {
    let raw = read_input(path)?;
    let value: Value = serde_json::from_str(&raw).context("parse message JSON")?;

    let summary = if value.get("attachments").is_some() {
        let message: adaptivecard::Message =
            serde_json::from_value(value).context("decode adaptive card message")?;
        message
            .validate()
            .map_err(|err| anyhow!("{err} [{}]", err.kind().as_str()))?;
        format!("{} attachment(s)", message.attachments.len())
    } else {
        let message: botapi::Message =
            serde_json::from_value(value).context("decode text message")?;
        message
            .validate()
            .map_err(|err| anyhow!("{err} [{}]", err.kind().as_str()))?;
        format!("{} mention(s)", message.entities.len())
    };

    println!("valid: {summary}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card_args(text: &str) -> CardArgs {
        CardArgs {
            title: None,
            text: text.into(),
            mention_name: None,
            mention_id: None,
            facts: Vec::new(),
            code: None,
            language: "PlainText".into(),
        }
    }

    #[test]
    fn parses_facts() {
        assert_eq!(
            parse_fact("Env = prod").unwrap(),
            ("Env".to_string(), "prod".to_string())
        );
        assert_eq!(
            parse_fact("url=https://a.b/?x=1").unwrap().1,
            "https://a.b/?x=1"
        );
        assert!(parse_fact("novalue").is_err());
        assert!(parse_fact("=x").is_err());
    }

    #[test]
    fn builds_card_with_title_facts_and_mention() {
        let mut args = card_args("rollout done");
        args.title = Some("Release".into());
        args.facts = vec![("Env".into(), "prod".into())];
        args.mention_name = Some("Ann".into());
        args.mention_id = Some("ann@example.com".into());

        let message = build_message(&args).unwrap();
        let card = &message.attachments[0].content;
        assert_eq!(card.body[0].text, "Release");
        assert_eq!(card.body[1].text, "<at>Ann</at> rollout done");
        assert_eq!(card.body[2].facts[0].title, "Env");
        assert_eq!(card.mentions().len(), 1);
        assert!(message.payload().is_some());
    }

    #[test]
    fn delivery_flags_override_config() {
        let args = DeliveryArgs {
            webhook_url: None,
            retries: Some(4),
            retry_delay: Some(1),
            timeout: None,
            skip_url_validation: true,
        };
        let config = args.config(WebhookConfig::default());
        assert_eq!(config.retries, 4);
        assert_eq!(config.retry_delay, Duration::from_secs(1));
        assert_eq!(config.timeout, WebhookConfig::default().timeout);
        assert!(!config.validate_url);
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
