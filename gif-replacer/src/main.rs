use std::io::Read;

use argh::FromArgs;
use async_trait::async_trait;
use miette::{IntoDiagnostic, WrapErr};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gif_replacer::{Body, Config, Event, EventSink, Filter, UserContext};

/// Replace `/gif "query"` commands in a chat body read from stdin and print
/// the transformed body to stdout.
#[derive(Debug, FromArgs)]
struct Opts {
    /// path to the configuration file
    #[argh(option, default = "String::from(\"config.toml\")")]
    config: String,
}

/// An event sink that logs events instead of delivering them to a host.
struct LogSink;

#[async_trait]
impl EventSink for LogSink {
    async fn publish(&self, event: Event) -> Result<(), gif_replacer::Error> {
        info!(?event, "status event");

        Ok(())
    }
}

fn init_tracing() -> miette::Result<()> {
    // Logs go to stderr; stdout carries only the transformed body.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gif_replacer=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .into_diagnostic()
        .wrap_err("could not init registry")?;

    Ok(())
}

#[tokio::main]
async fn main() -> miette::Result<()> {
    init_tracing()?;

    let opts: Opts = argh::from_env();
    let config = Config::load(&opts.config).into_diagnostic()?;

    let filter = Filter::new(config.valves);
    let user = UserContext::new("local").with_valves(config.user);

    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .into_diagnostic()
        .wrap_err("could not read a chat body from stdin")?;
    let body: Body = serde_json::from_str(&input)
        .into_diagnostic()
        .wrap_err("could not parse the chat body")?;

    let body = filter.inlet(body, Some(&user));
    let body = filter.outlet(body, Some(&user), Some(&LogSink)).await;

    let output = serde_json::to_string_pretty(&body).into_diagnostic()?;
    println!("{output}");

    Ok(())
}
