use anyhow::Context;
use clap::Parser;
use recreate::cli::{Args, Conf};
use recreate::{DockerRuntime, RecreateError, RecreateOptions, Recreator};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "recreate=warn".into()),
        )
        .init();

    let args = Args::parse();

    let conf = match &args.config {
        Some(path) => Conf::from_json_file(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => Conf::load_default().context("loading configuration")?,
    };

    let runtime = DockerRuntime::connect()
        .await
        .context("connecting to the container runtime")?;

    let recreator = Recreator::new(
        runtime,
        RecreateOptions {
            pull_image: args.pull,
            delete_container: args.delete,
            registries: conf.registries,
        },
    );

    info!(container = %args.container_id, "starting recreation");

    match recreator
        .recreate(&args.container_id, args.image_tag.as_deref())
        .await
    {
        Ok(recreation) => {
            println!(
                "Migrated `{}` from {} to {}.",
                args.container_id,
                short_id(&recreation.previous_container_id),
                short_id(&recreation.new_container_id),
            );
            Ok(())
        }
        Err(RecreateError::Swap(failure)) => {
            eprintln!("Error: {}", failure);
            if let Some(new_id) = &failure.new_container_id {
                eprintln!(
                    "An orphaned replacement container was left behind: {}.",
                    short_id(new_id)
                );
            }
            if failure.old_renamed {
                eprintln!(
                    "The old container no longer holds its original name; \
                     rename it back or rerun once the cause is fixed."
                );
            }
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Shorten a container id for display, the way the engine CLI does.
fn short_id(id: &str) -> &str {
    id.get(..12).unwrap_or(id)
}
