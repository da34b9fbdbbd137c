use anyhow::{Context, Result, bail};
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::Path;

use killboard_core::context::{AppConfigExt, KillCounting, OutputFormat};
use killboard_core::source::{
    Credentials, Report, ReportFilter, WarcraftLogsClient, load_reports, reports_to_records,
    save_reports,
};
use killboard_core::{AggregationTable, AppConfig, EncounterRecord, write_report};

use crate::CliContext;

pub async fn guild(
    ctx: &CliContext,
    name: &str,
    server: Option<&str>,
    region: Option<&str>,
) -> Result<()> {
    let Some(server) = server.or(ctx.config.default_server.as_deref()) else {
        bail!("no server given and no default_server configured");
    };
    let Some(region) = region.or(ctx.config.default_region.as_deref()) else {
        bail!("no region given and no default_region configured");
    };

    let filter = ReportFilter::Guild {
        name: name.to_string(),
        server_slug: server.to_string(),
        server_region: region.to_string(),
    };
    let reports = fetch(ctx, &filter).await?;
    summarize(ctx, &reports)
}

pub async fn user(ctx: &CliContext, id: i64) -> Result<()> {
    let reports = fetch(ctx, &ReportFilter::User { id }).await?;
    summarize(ctx, &reports)
}

pub fn file(ctx: &CliContext, path: &Path) -> Result<()> {
    let reports = load_reports(path)?;
    summarize(ctx, &reports)
}

pub fn show_config(ctx: &CliContext) -> Result<()> {
    match AppConfig::path() {
        Ok(path) => println!("Config file:     {}", path.display()),
        Err(err) => println!("Config file:     unavailable ({err})"),
    }

    let config = &ctx.config;
    let secret = match config.client_secret.as_deref() {
        Some(s) if !s.is_empty() => "<set>",
        _ => "<unset>",
    };
    println!(
        "Client id:       {}",
        config.client_id.as_deref().unwrap_or("<unset>")
    );
    println!("Client secret:   {secret}");
    println!(
        "Default server:  {}",
        config.default_server.as_deref().unwrap_or("<unset>")
    );
    println!(
        "Default region:  {}",
        config.default_region.as_deref().unwrap_or("<unset>")
    );
    println!("Kill counting:   {}", config.kill_counting.label());
    println!("Output format:   {:?}", config.output_format);
    println!(
        "Output file:     {}",
        if config.output_file.is_empty() {
            "<stdout>"
        } else {
            config.output_file.as_str()
        }
    );
    Ok(())
}

pub fn save_config(ctx: &CliContext) -> Result<()> {
    let path = AppConfig::path().context("failed to resolve config path")?;
    save_config_to(ctx, &path)
}

fn save_config_to(ctx: &CliContext, path: &Path) -> Result<()> {
    ctx.config
        .store_to(path)
        .with_context(|| format!("failed to save config to {}", path.display()))?;
    tracing::info!(path = %path.display(), "configuration saved");
    Ok(())
}

async fn fetch(ctx: &CliContext, filter: &ReportFilter) -> Result<Vec<Report>> {
    let credentials = Credentials::from_config(&ctx.config)?;
    let client = WarcraftLogsClient::new(credentials);
    let reports = client
        .fetch_reports(filter)
        .await
        .context("failed to fetch reports")?;

    if let Some(path) = &ctx.save_reports {
        save_reports(path, &reports)?;
    }
    Ok(reports)
}

fn summarize(ctx: &CliContext, reports: &[Report]) -> Result<()> {
    let records = reports_to_records(reports);
    let table = aggregate(&records, ctx.kill_counting());
    tracing::info!(
        records = records.len(),
        encounters = table.len(),
        difficulties = table.difficulties().len(),
        "aggregated encounters"
    );
    write_output(&table, ctx.output_format(), ctx.output_file())
}

/// Fold records into a fresh table.
pub fn aggregate(records: &[EncounterRecord], counting: KillCounting) -> AggregationTable {
    let mut table = AggregationTable::with_kill_counting(counting);
    table.merge_all(records);
    table
}

/// Write the report to `destination`, or to stdout if it is empty.
pub fn write_output(
    table: &AggregationTable,
    format: OutputFormat,
    destination: &str,
) -> Result<()> {
    if destination.is_empty() {
        let stdout = io::stdout();
        write_report(table, format, BufWriter::new(stdout.lock()))
            .context("failed to write report to stdout")?;
        return Ok(());
    }

    let file = File::create(destination)
        .with_context(|| format!("failed to create output file {destination}"))?;
    write_report(table, format, BufWriter::new(file))
        .with_context(|| format!("failed to write report to {destination}"))?;
    tracing::info!(path = destination, format = ?format, "report written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use killboard_core::source::Fight;

    fn reports() -> Vec<Report> {
        vec![Report {
            code: "abc".to_string(),
            start_time: 0.0,
            fights: vec![
                Fight {
                    name: "Boss A".to_string(),
                    difficulty: Some(3),
                    end_time: 100_000.0,
                    kill: Some(false),
                },
                Fight {
                    name: "Boss A".to_string(),
                    difficulty: Some(3),
                    end_time: 50_000.0,
                    kill: Some(true),
                },
                Fight {
                    name: "Boss B".to_string(),
                    difficulty: Some(4),
                    end_time: 70_000.0,
                    kill: Some(true),
                },
            ],
        }]
    }

    fn context_writing_to(path: &Path, format: OutputFormat) -> CliContext {
        CliContext::from_config(AppConfig {
            output_format: format,
            output_file: path.to_string_lossy().into_owned(),
            ..Default::default()
        })
    }

    #[test]
    fn test_file_command_writes_csv() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("reports.json");
        let output = dir.path().join("out.csv");
        save_reports(&input, &reports()).unwrap();

        let ctx = context_writing_to(&output, OutputFormat::Csv);
        file(&ctx, &input).unwrap();

        let written = std::fs::read_to_string(&output).unwrap();
        let lines: Vec<&str> = written.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Encounter,normal First Seen,"));
        assert_eq!(lines[0].split(',').count(), 9);
        assert_eq!(
            lines[1],
            "Boss A,1970-01-01 00:00:50.000 UTC,1970-01-01 00:00:50.000 UTC,2,1,,,0,0"
        );
        assert_eq!(
            lines[2],
            "Boss B,,,0,0,1970-01-01 00:01:10.000 UTC,1970-01-01 00:01:10.000 UTC,1,1"
        );
    }

    #[test]
    fn test_file_command_writes_text() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("reports.json");
        let output = dir.path().join("out.txt");
        save_reports(&input, &reports()).unwrap();

        let ctx = context_writing_to(&output, OutputFormat::Text);
        file(&ctx, &input).unwrap();

        let written = std::fs::read_to_string(&output).unwrap();
        assert!(written.starts_with("Boss A\n\tnormal: "));
        assert!(written.contains(":: 1/2\n"));
        assert!(written.contains("Boss B\n\theroic: "));
    }

    #[test]
    fn test_file_command_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context_writing_to(&dir.path().join("out.txt"), OutputFormat::Text);
        assert!(file(&ctx, &dir.path().join("missing.json")).is_err());
    }

    #[test]
    fn test_aggregate_uses_counting_policy() {
        let records = reports_to_records(&[Report {
            code: "abc".to_string(),
            start_time: 0.0,
            fights: vec![
                Fight {
                    name: "Boss A".to_string(),
                    difficulty: Some(5),
                    end_time: 10.0,
                    kill: Some(true),
                },
                Fight {
                    name: "Boss A".to_string(),
                    difficulty: Some(5),
                    end_time: 20.0,
                    kill: Some(true),
                },
            ],
        }]);

        let quirk = aggregate(&records, KillCounting::OnImprovement);
        let every = aggregate(&records, KillCounting::EveryKill);
        let tier = killboard_core::DifficultyTier::MYTHIC;
        assert_eq!(quirk.get("Boss A", tier).unwrap().kills, 1);
        assert_eq!(every.get("Boss A", tier).unwrap().kills, 2);
    }

    #[test]
    fn test_save_config_writes_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yml");

        let mut ctx = CliContext::from_config(AppConfig::default());
        ctx.config.kill_counting = KillCounting::EveryKill;
        ctx.config.default_server = Some("area-52".to_string());
        save_config_to(&ctx, &path).unwrap();

        let saved = AppConfig::load_from(&path).unwrap();
        assert_eq!(saved, ctx.config);
    }

    #[tokio::test]
    async fn test_guild_requires_server_and_region() {
        let ctx = CliContext::from_config(AppConfig::default());
        let err = guild(&ctx, "Progress", None, Some("us")).await.unwrap_err();
        assert!(err.to_string().contains("server"));

        let err = guild(&ctx, "Progress", Some("area-52"), None).await.unwrap_err();
        assert!(err.to_string().contains("region"));
    }

    #[tokio::test]
    async fn test_fetch_requires_credentials() {
        let ctx = CliContext::from_config(AppConfig::default());
        assert!(user(&ctx, 42).await.is_err());
    }
}
