use clap::Parser;
use serde_json::Value;
use std::path::PathBuf;

use crate::domain::GenerationOptions;

/// Mockingbird - generate populated fixtures from class mock definitions
#[derive(Parser, Debug, Clone)]
#[command(name = "mockingbird", version, about, long_about = None)]
pub struct Cli {
    /// Class to generate
    pub class: Option<String>,

    /// Path to the configuration file
    #[arg(short, long, env = "MOCKINGBIRD_CONFIG", default_value = "mockingbird.toml")]
    pub config: PathBuf,

    /// Number of instances; more than one prints a JSON array
    #[arg(short = 'n', long)]
    pub count: Option<usize>,

    /// Properties to drop from each instance (comma separated or repeated)
    #[arg(long, value_delimiter = ',')]
    pub omit: Vec<String>,

    /// Force a property value, as KEY=VALUE; VALUE is parsed as JSON, else taken as a string
    #[arg(long = "set", value_parser = parse_mutation)]
    pub mutations: Vec<(String, Value)>,

    /// Locale for faked values (en, fr, ja, pt_BR, zh_CN, zh_TW)
    #[arg(long, env = "MOCKINGBIRD_LOCALE")]
    pub locale: Option<String>,

    /// Seed for reproducible output
    #[arg(long, env = "MOCKINGBIRD_SEED")]
    pub seed: Option<u64>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pub pretty: bool,

    /// List the configured classes and exit
    #[arg(long)]
    pub list: bool,
}

impl Cli {
    pub fn generation_options(&self) -> GenerationOptions {
        let mut options = GenerationOptions::new().omit(self.omit.iter().cloned());
        options.count = self.count;
        for (key, value) in &self.mutations {
            options = options.mutate(key.clone(), value.clone());
        }
        options
    }
}

fn parse_mutation(raw: &str) -> Result<(String, Value), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", raw))?;
    if key.is_empty() {
        return Err(format!("empty key in '{}'", raw));
    }
    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((key.to_string(), value))
}
