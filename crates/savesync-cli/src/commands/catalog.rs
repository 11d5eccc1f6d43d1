//! Catalog command - Inspect the item catalog
//!
//! `savesync catalog list` prints the target items a whole-catalog sync
//! would look for; `savesync catalog show <md5>` prints one raw record and
//! the directory names derived from it.

use std::path::Path;

use anyhow::{bail, Context, Result};
use clap::Subcommand;
use savesync_core::domain::{SyncRequest, TargetItem};
use tracing::info;

use super::load_context;
use crate::output::{get_formatter, OutputFormat};

/// Catalog subcommands
#[derive(Debug, Subcommand)]
pub enum CatalogCommand {
    /// List the items a whole-catalog sync would synchronize
    List,
    /// Show one catalog record
    Show {
        /// Content checksum of the item
        md5: String,
    },
}

impl CatalogCommand {
    /// Execute the catalog command
    pub async fn execute(&self, format: OutputFormat, config_path: &Path) -> Result<()> {
        match self {
            CatalogCommand::List => self.execute_list(format, config_path),
            CatalogCommand::Show { md5 } => self.execute_show(md5, format, config_path),
        }
    }

    fn execute_list(&self, format: OutputFormat, config_path: &Path) -> Result<()> {
        let formatter = get_formatter(format);
        let context = load_context(config_path)?;

        let targets = context.resolve_targets(&SyncRequest::All);
        info!(count = targets.len(), "Listing catalog targets");

        if format.is_json() {
            let json = serde_json::to_value(&targets).context("Failed to serialize targets")?;
            formatter.print_json(&json);
            return Ok(());
        }

        if targets.is_empty() {
            formatter.warn("No complete catalog records");
            return Ok(());
        }

        formatter.success(&format!(
            "{} item{} in catalog",
            targets.len(),
            if targets.len() == 1 { "" } else { "s" }
        ));
        for target in &targets {
            formatter.info("");
            print_target(formatter.as_ref(), target);
        }
        Ok(())
    }

    fn execute_show(&self, md5: &str, format: OutputFormat, config_path: &Path) -> Result<()> {
        let formatter = get_formatter(format);
        let context = load_context(config_path)?;

        let Some(entry) = context.catalog.lookup(md5) else {
            bail!("No catalog record for {}", md5);
        };
        let target = entry.complete_fields().map(|f| TargetItem::from_catalog(&f));

        if format.is_json() {
            let json = serde_json::json!({
                "entry": entry,
                "target": target,
            });
            formatter.print_json(&json);
            return Ok(());
        }

        formatter.success(&format!("Catalog record {}", entry.md5));
        let field = |v: &Option<String>| v.clone().unwrap_or_else(|| "-".to_string());
        formatter.info(&format!("crc:          {}", field(&entry.crc)));
        formatter.info(&format!("header name:  {}", field(&entry.header_name)));
        formatter.info(&format!("good name:    {}", field(&entry.good_name)));
        formatter.info(&format!("country code: {}", field(&entry.country_code)));
        formatter.info("");

        match target {
            Some(target) => print_target(formatter.as_ref(), &target),
            None => formatter.warn("Record is incomplete and is skipped by whole-catalog syncs"),
        }
        Ok(())
    }
}

fn print_target(formatter: &dyn crate::output::OutputFormatter, target: &TargetItem) {
    formatter.info(target.display_name());
    formatter.info(&format!("  primary:   {}", target.primary_dir_name()));
    formatter.info(&format!("  alternate: {}", target.alternate_dir_name()));
    formatter.info(&format!("  header:    {}", target.header_name()));
}

#[cfg(test)]
mod tests {
    use savesync_core::config::ConfigBuilder;

    use super::*;

    fn config_with_catalog(dir: &Path) -> std::path::PathBuf {
        let catalog_path = dir.join("catalog.yaml");
        std::fs::write(
            &catalog_path,
            "entries:\n  - md5: abc\n    crc: \"1234\"\n    header_name: SUPER GAME\n    good_name: Super Game\n    country_code: \"69\"\n",
        )
        .unwrap();

        let config = ConfigBuilder::new()
            .storage_game_data_dir(dir.join("GameData"))
            .catalog_path(catalog_path)
            .build();
        let config_path = dir.join("config.yaml");
        std::fs::write(&config_path, serde_yaml::to_string(&config).unwrap()).unwrap();
        config_path
    }

    #[test]
    fn test_show_known_record_succeeds() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = config_with_catalog(dir.path());

        let cmd = CatalogCommand::Show { md5: "abc".into() };
        assert!(cmd.execute_show("abc", OutputFormat::Json, &config_path).is_ok());
    }

    #[test]
    fn test_show_unknown_record_fails() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = config_with_catalog(dir.path());

        let cmd = CatalogCommand::Show { md5: "nope".into() };
        let err = cmd
            .execute_show("nope", OutputFormat::Json, &config_path)
            .unwrap_err();
        assert!(err.to_string().contains("nope"));
    }
}
