use anyhow::{Context, bail};
use serde::Serialize;
use std::sync::Arc;

use modlauncher::config::{SettingsPatch, SettingsStore};
use modlauncher::mods::RequiredPackage;
use modlauncher::{JoinRequest, LaunchService, StateKind, logging, paths};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    if args.is_empty() || args.iter().any(|arg| arg == "--help") {
        println!("{}", USAGE_TEXT);
        return Ok(());
    }

    let verbose = args.iter().any(|arg| arg == "--verbose");
    logging::init(verbose);

    let args: Vec<&str> = args
        .iter()
        .map(String::as_str)
        .filter(|arg| *arg != "--verbose")
        .collect();

    let settings = Arc::new(SettingsStore::open(paths::settings_file()));
    let service = LaunchService::system(settings);

    match args.as_slice() {
        ["join", address, rest @ ..] => join(&service, address, rest).await,
        ["fetch", ids @ ..] if !ids.is_empty() => {
            let ids: Vec<String> = ids.iter().map(|id| id.to_string()).collect();
            let outcome = service.fetch_missing(&ids).await;
            print_json(&outcome)?;
            if !outcome.accepted {
                std::process::exit(1);
            }
            Ok(())
        }
        ["list"] => {
            let mods = service.installed_mods().await?;
            print_json(&mods)
        }
        ["settings", rest @ ..] => {
            let patch = parse_settings_patch(rest)?;
            let current = if patch == SettingsPatch::default() {
                service.settings()
            } else {
                service.save_settings(patch)?
            };
            print_json(&current)
        }
        _ => {
            eprintln!("{}", USAGE_TEXT);
            std::process::exit(2);
        }
    }
}

async fn join(service: &LaunchService, address: &str, rest: &[&str]) -> anyhow::Result<()> {
    let fetch = rest.contains(&"--fetch");
    let required: Vec<RequiredPackage> = rest
        .iter()
        .filter(|arg| !arg.starts_with("--"))
        .map(|raw| RequiredPackage::parse(raw))
        .collect();

    let mut orch = service.orchestrator(JoinRequest::new(address, required));
    orch.check_and_launch().await?;

    if fetch && orch.kind() == StateKind::Missing {
        orch.fetch_missing().await?;
    }

    let missing = orch.kind() == StateKind::Missing;
    let outcome = orch.into_outcome()?;
    print_json(&outcome)?;
    if missing {
        // Missing content is a distinct outcome for scripts
        std::process::exit(3);
    }
    Ok(())
}

fn parse_settings_patch(args: &[&str]) -> anyhow::Result<SettingsPatch> {
    let mut patch = SettingsPatch::default();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if *arg != "--set" {
            bail!("unexpected argument '{arg}'");
        }
        let pair = iter.next().context("--set needs key=value")?;
        let (key, value) = pair
            .split_once('=')
            .with_context(|| format!("'{pair}' is not key=value"))?;
        patch.set(key, value).map_err(anyhow::Error::msg)?;
    }
    Ok(patch)
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

static USAGE_TEXT: &str = r#"
Usage: modlauncher [--verbose] <COMMAND>

Commands:
    join <address> <id>[=name]... [--fetch]
                            Check the server's Workshop content and start the game connected to
                            <address> (host:port). With --fetch, open anything missing in Steam
                            and check once more.
    fetch <id>...           Open the given Workshop items in Steam; press Subscribe there to
                            start the downloads
    list                    List Workshop content already downloaded for the game
    settings [--set key=value]...
                            Show settings, or change them (keys as in settings.json)

Options:
    --verbose               Debug logging (otherwise MODLAUNCHER_LOG / RUST_LOG, default info)
"#;
