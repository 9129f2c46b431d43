use clap::Parser;
use mockingbird::cli::Cli;
use mockingbird::config::Settings;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries only JSON
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let settings = Settings::new_with_cli(&cli)?;

    if cli.list {
        let registry = settings.build_registry()?;
        for name in registry.class_names() {
            println!("{}", name);
        }
        return Ok(());
    }

    let class = cli
        .class
        .as_deref()
        .ok_or_else(|| anyhow::anyhow!("No class given; use --list to see the configured classes"))?;

    let generator = settings.build_generator()?;
    info!("Generating {} with locale {}", class, generator.source().locale());

    let generated = generator.create(class, &cli.generation_options())?;
    let output = if cli.pretty {
        serde_json::to_string_pretty(&generated)?
    } else {
        serde_json::to_string(&generated)?
    };
    println!("{}", output);

    Ok(())
}
