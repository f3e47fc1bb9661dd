//! Terminal client entry point.
mod app;

use anyhow::Result;
use encounter_core::DifficultyTier;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let options = parse_args()?;
    app::run(options).await
}

pub struct Options {
    pub tier: DifficultyTier,
    pub seed: Option<u64>,
}

fn parse_args() -> Result<Options> {
    let mut tier = DifficultyTier::T1;
    let mut seed = None;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--tier" => {
                let id: u8 = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--tier needs a value"))?
                    .parse()?;
                tier = DifficultyTier::by_id(id);
            }
            "--seed" => {
                seed = Some(
                    args.next()
                        .ok_or_else(|| anyhow::anyhow!("--seed needs a value"))?
                        .parse()?,
                );
            }
            "--help" | "-h" => {
                println!("usage: encounter [--tier 1..4] [--seed N]");
                std::process::exit(0);
            }
            other => anyhow::bail!("unknown argument: {other}"),
        }
    }

    Ok(Options { tier, seed })
}
