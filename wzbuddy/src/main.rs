use anyhow::{bail, Context, Result};
use clap::Parser;
use std::fs;

use wzmap::{
    bonus_commands, find_gaps, highlight_unnamed, lighten, name_commands, penalty_commands, Report,
};
use wzsvg::Document;

mod api;
mod args;

use api::{Credentials, SetMapDetails};
use args::Cli;

fn main() -> Result<()> {
    // A missing .env is fine; flags and the real environment still apply.
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    run(cli)
}

fn run(cli: Cli) -> Result<()> {
    if cli.debug {
        println!("{:#?}", cli.redacted());
    }

    let doc = Document::open(&cli.file)
        .with_context(|| format!("Failed to read map {}", cli.file.display()))?;
    log::debug!("Parsed {} elements", doc.elements().count());

    if cli.find_skipped_ids {
        let gaps = find_gaps(&doc)?;
        println!("First ID: {}", gaps.first);
        println!("Last ID: {}", gaps.last);
        println!("Skipped IDs: {:?}", gaps.missing);
        let unlisted = gaps.missing_count - gaps.missing.len() as u64;
        if unlisted > 0 {
            println!("... and {} more skipped IDs", unlisted);
        }
        if !gaps.duplicates.is_empty() {
            println!("Duplicate IDs: {:?}", gaps.duplicates);
        }
    }

    if let Some(out) = cli.highlight_output() {
        let mut highlighted = doc.clone();
        let marked = highlight_unnamed(&mut highlighted);
        highlighted
            .save(&out)
            .with_context(|| format!("Failed to write {}", out.display()))?;
        println!(
            "Highlighted {} unnamed territories in {}",
            marked.len(),
            out.display()
        );
    }

    if let Some(out) = cli.clean_output() {
        let (light, stats) = lighten(&doc);
        let written = light
            .save(&out)
            .with_context(|| format!("Failed to write {}", out.display()))?;
        log::debug!("{:?}", stats);
        println!("Wrote {} ({} bytes)", out.display(), written);
    }

    if cli.size {
        let len = fs::metadata(&cli.file)
            .with_context(|| format!("Failed to stat {}", cli.file.display()))?
            .len();
        println!("{}: {} bytes", cli.file.display(), len);
    }

    let batch = build_batch(&cli, &doc)?;

    if cli.debug {
        println!("{}", serde_json::to_string_pretty(&batch.commands)?);
    }

    if batch.has_errors() {
        println!("Found issues while validating the commands to send:");
        for issue in &batch.issues {
            println!("  - {}", issue);
        }
        bail!(
            "{} issue(s) found, nothing was submitted",
            batch.issues.len()
        );
    }

    if batch.commands.is_empty() {
        if cli.wants_commands() {
            log::info!("No commands generated, nothing to submit");
        }
        return Ok(());
    }

    let credentials = Credentials::resolve(cli.email.clone(), cli.api_token.clone(), cli.mapid)?;
    let request = SetMapDetails::new(&credentials, &batch.commands);

    if cli.dry_run {
        println!("POST {}", cli.endpoint);
        println!("{}", serde_json::to_string_pretty(&request.redacted())?);
        return Ok(());
    }

    let response = api::submit(&cli.endpoint, &request)?;
    println!("{}", response);
    Ok(())
}

/// Runs the requested generators in order: names, bonuses, penalties.
fn build_batch(cli: &Cli, doc: &Document) -> Result<Report> {
    let mut batch = Report::new();
    if cli.update_territory_names {
        batch.merge(name_commands(doc)?);
    }
    if cli.create_bonuses {
        batch.merge(bonus_commands(doc)?);
    }
    if cli.create_penalties {
        batch.merge(penalty_commands(doc)?);
    }
    log::info!(
        "Generated {} commands ({} issues)",
        batch.commands.len(),
        batch.issues.len()
    );
    Ok(batch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::{Path, PathBuf};
    use tempfile::tempdir;

    const MAP: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" xmlns:inkscape="http://www.inkscape.org/namespaces/inkscape">
  <g id="Isles" inkscape:label="bonus">
    <path id="Territory_1" d="M 0 0" style="fill:#00ff00"><title>Dover</title></path>
    <path id="Territory_3" d="M 1 1" style="fill:#00ff00" inkscape:label="Calais"/>
  </g>
  <g id="layer9" inkscape:label="Penalties">
    <path id="Territory_4" d="M 2 2" inkscape:label="Marsh"/>
  </g>
</svg>
"##;

    const DUPLICATES: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" xmlns:inkscape="http://www.inkscape.org/namespaces/inkscape">
  <path id="Territory_1" inkscape:label="Dover"/>
  <path id="Territory_2" inkscape:label="Dover"/>
</svg>
"##;

    fn write_map(dir: &Path, content: &str) -> PathBuf {
        let path = dir.join("map.svg");
        fs::write(&path, content).unwrap();
        path
    }

    fn cli(file: PathBuf) -> Cli {
        Cli {
            file,
            update_territory_names: false,
            create_bonuses: false,
            create_penalties: false,
            clean: None,
            find_skipped_ids: false,
            highlight_unnamed: None,
            api_token: None,
            email: None,
            mapid: None,
            endpoint: api::SET_MAP_DETAILS_URL.to_string(),
            dry_run: false,
            size: false,
            debug: false,
            verbose: false,
        }
    }

    #[test]
    fn test_batch_order_names_bonuses_penalties() {
        let dir = tempdir().unwrap();
        let mut args = cli(write_map(dir.path(), MAP));
        args.update_territory_names = true;
        args.create_bonuses = true;
        args.create_penalties = true;

        let doc = Document::open(&args.file).unwrap();
        let batch = build_batch(&args, &doc).unwrap();
        let kinds: Vec<_> = batch
            .commands
            .iter()
            .map(|c| serde_json::to_value(c).unwrap()["command"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(
            kinds,
            vec![
                "setTerritoryName",
                "setTerritoryName",
                "setTerritoryName",
                "addBonus",
                "addTerritoryToBonus",
                "addTerritoryToBonus",
                "addBonus",
                "addTerritoryToBonus",
            ]
        );
    }

    #[test]
    fn test_duplicate_names_block_submission() {
        let dir = tempdir().unwrap();
        let mut args = cli(write_map(dir.path(), DUPLICATES));
        args.update_territory_names = true;
        // Credentials present: the failure must come from validation.
        args.email = Some("me@example.com".into());
        args.api_token = Some("token".into());
        args.mapid = Some(7);
        args.endpoint = "http://127.0.0.1:9/unreachable".into();

        let err = run(args).unwrap_err();
        assert!(err.to_string().contains("nothing was submitted"), "{}", err);
    }

    #[test]
    fn test_missing_credentials_block_submission() {
        let dir = tempdir().unwrap();
        let mut args = cli(write_map(dir.path(), MAP));
        args.create_bonuses = true;
        args.email = Some("me@example.com".into());

        let err = run(args).unwrap_err();
        let config = err.downcast_ref::<api::ConfigError>().unwrap();
        assert_eq!(
            config,
            &api::ConfigError::MissingCredentials(vec!["--api-token", "--mapid"])
        );
    }

    #[test]
    fn test_dry_run_succeeds_without_network() {
        let dir = tempdir().unwrap();
        let mut args = cli(write_map(dir.path(), MAP));
        args.create_penalties = true;
        args.dry_run = true;
        args.email = Some("me@example.com".into());
        args.api_token = Some("token".into());
        args.mapid = Some(7);
        args.endpoint = "http://127.0.0.1:9/unreachable".into();

        run(args).unwrap();
    }

    #[test]
    fn test_missing_penalty_layer_is_an_error() {
        let dir = tempdir().unwrap();
        let mut args = cli(write_map(dir.path(), DUPLICATES));
        args.create_penalties = true;
        assert!(run(args).is_err());
    }

    #[test]
    fn test_clean_and_highlight_write_default_outputs() {
        let dir = tempdir().unwrap();
        let mut args = cli(write_map(dir.path(), MAP));
        args.clean = Some(None);
        args.highlight_unnamed = Some(None);
        run(args).unwrap();

        let light = fs::read_to_string(dir.path().join("map.light.svg")).unwrap();
        assert!(!light.contains("<title>"));
        assert!(dir.path().join("map.highlighted.svg").exists());
        // Input is never rewritten.
        assert_eq!(fs::read_to_string(dir.path().join("map.svg")).unwrap(), MAP);
    }

    #[test]
    fn test_unreadable_map_reports_path() {
        let dir = tempdir().unwrap();
        let err = run(cli(dir.path().join("missing.svg"))).unwrap_err();
        assert!(err.to_string().contains("missing.svg"));
    }
}
