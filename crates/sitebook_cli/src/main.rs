//! `sitebook` command-line adapter.
//!
//! # Responsibility
//! - Seed an in-memory store and expose list/show/export use cases.
//! - Map export failures to the generic user-facing notice.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;
use sitebook_core::report::format::{
    attachments_line, format_budget, format_date, format_date_range, format_progress,
    format_timestamp,
};
use sitebook_core::{
    default_log_level, init_logging, open_seeded_store, parse_log_level, DirectorySink,
    ProjectDetail, ProjectService, SeedData, SqliteProjectRepository,
};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "sitebook", version)]
#[command(about = "Track building projects and export project reports")]
struct Cli {
    /// JSON seed file; defaults to the built-in demo projects
    #[arg(long, global = true)]
    seed: Option<PathBuf>,

    /// trace|debug|info|warn|error; checked even when logging is off
    #[arg(long, global = true, value_parser = parse_log_level)]
    log_level: Option<&'static str>,

    /// Absolute directory for rolling log files; logging is off when unset
    #[arg(long, global = true, env = "SITEBOOK_LOG_DIR")]
    log_dir: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List all projects
    List,
    /// Show one project with its tasks and comments
    Show { project_id: String },
    /// Export one project's report as PDF
    Export {
        project_id: String,
        /// Directory receiving `<project-name>-report.pdf`
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.unwrap_or(default_log_level());
        init_logging(level, log_dir).context("failed to initialize logging")?;
    }

    let seed = match &cli.seed {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read seed file `{}`", path.display()))?;
            SeedData::from_json(&text)?
        }
        None => SeedData::builtin()?,
    };
    let conn = open_seeded_store(&seed)?;
    let service = ProjectService::new(SqliteProjectRepository::try_new(&conn)?);

    match cli.command {
        Command::List => {
            for project in service.list_projects()? {
                println!(
                    "{}  {}  [{}]  ends {}  {}  {} Complete",
                    project.id,
                    project.name,
                    project.status,
                    format_date(project.end_date),
                    format_budget(project.budget),
                    format_progress(project.progress)
                );
            }
        }
        Command::Show { project_id } => {
            let detail = service
                .select_project(&project_id)?
                .with_context(|| format!("project not found: {project_id}"))?;
            print_detail(&detail);
        }
        Command::Export {
            project_id,
            out_dir,
        } => {
            info!(
                "event=cli_export module=cli status=start project_id={}",
                project_id
            );
            let mut sink = DirectorySink::new(out_dir);
            match service.export_report(&project_id, &mut sink) {
                Ok(artifact) => println!("{}", artifact.location.display()),
                Err(err) => {
                    eprintln!("{}", err.user_notice());
                    return Err(anyhow::Error::new(err).context("report export failed"));
                }
            }
        }
    }

    Ok(())
}

fn print_detail(detail: &ProjectDetail) {
    let project = &detail.project;
    println!("{}", project.name);
    println!("{}", project.description);
    println!("Status: {}", project.status);
    println!(
        "Timeline: {}",
        format_date_range(project.start_date, project.end_date)
    );
    println!("Budget: {}", format_budget(project.budget));
    println!("Progress: {}", format_progress(project.progress));

    println!();
    println!("Tasks");
    for task in &detail.tasks {
        println!(
            "  {} | {} | {} | {} | {}",
            task.title,
            task.status,
            task.priority,
            task.assignee,
            format_date(task.due_date)
        );
    }

    println!();
    println!("Comments");
    for comment in &detail.comments {
        println!(
            "  {} ({})",
            comment.author,
            format_timestamp(comment.timestamp)
        );
        println!("    {}", comment.content);
        if let Some(line) = attachments_line(comment) {
            println!("    {line}");
        }
    }
}
