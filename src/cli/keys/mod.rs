//! Generate-key command - prints a fresh API key

use clap::Args;

use crate::config::AppConfig;
use crate::infrastructure::api_key::{ApiKeyGenerator, GeneratedApiKey};

#[derive(Args, Debug, Clone, Default)]
pub struct GenerateKeyArgs {
    /// Key prefix; defaults to the configured `auth.key_prefix`
    #[arg(long)]
    pub prefix: Option<String>,
}

/// Generate a key and print it; the key is not stored anywhere
pub fn run(args: GenerateKeyArgs) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let prefix = match args.prefix {
        Some(prefix) => prefix,
        None => AppConfig::load()?.auth.key_prefix,
    };

    println!("{}", render(&ApiKeyGenerator::new(prefix).generate()));
    Ok(())
}

fn render(generated: &GeneratedApiKey) -> String {
    format!(
        "key:    {}\nprefix: {}\nhash:   {}",
        generated.key, generated.prefix, generated.hash
    )
}
