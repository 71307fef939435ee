//! Interview research command-line tool.
//!
//! ```text
//! interview-research --company Acme --role "Backend Engineer"
//! interview-research --json --company Acme --role SRE > acme.json
//! interview-research            # interactive session
//! ```

use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use dialoguer::{theme::ColorfulTheme, Input};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use interview_research::{
    CompanyBackground, InterviewProcess, PreparationGuide, ResearchConfig, ResearchPipeline,
    ResearchRecord,
};

const RECENT_NEWS_SHOWN: usize = 3;
const QUESTIONS_SHOWN: usize = 5;
const TECHNICAL_TOPICS_SHOWN: usize = 5;
const SHORT_LIST_SHOWN: usize = 3;

#[derive(Parser, Debug)]
#[command(name = "interview-research")]
#[command(about = "Research a company's interview process and build a preparation guide")]
struct Cli {
    /// Company to research
    #[arg(short, long)]
    company: Option<String>,

    /// Job role to prepare for
    #[arg(short, long)]
    role: Option<String>,

    /// Debug logging for this crate
    #[arg(short, long)]
    verbose: bool,

    /// Print the research record as JSON instead of formatted text
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = ResearchConfig::from_env().context("Failed to load configuration")?;
    let pipeline = ResearchPipeline::from_config(&config).context("Failed to set up providers")?;

    match (cli.company, cli.role) {
        (Some(company), Some(role)) => research_once(&pipeline, &company, &role, cli.json).await,
        _ => interactive(&pipeline, cli.json).await,
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "info,interview_research=debug"
    } else {
        "info,interview_research=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

async fn research_once(pipeline: &ResearchPipeline, company: &str, role: &str, json: bool) -> Result<()> {
    let start = Instant::now();
    println!(
        "\n{}",
        format!("🔍 Starting research for {} at {}...", role, company).bright_cyan()
    );

    let record = pipeline.run(company, role).await;

    if json {
        let out = serde_json::to_string_pretty(&record).context("Failed to serialize record")?;
        println!("{}", out);
    } else {
        println!(
            "\n{}",
            format!("✅ Research completed in {:.1} seconds", start.elapsed().as_secs_f64()).bright_green()
        );
        print_record(&record);
    }
    Ok(())
}

async fn interactive(pipeline: &ResearchPipeline, json: bool) -> Result<()> {
    let theme = ColorfulTheme::default();

    println!("\n{}", "=".repeat(50).bright_cyan());
    println!("{}", "🌟 Interview Research Agent".bright_cyan().bold());
    println!("{}", "=".repeat(50).bright_cyan());

    loop {
        println!("\n{}", "Type 'quit' or 'exit' at any prompt to end the session".dimmed());

        let Some(company) = prompt(&theme, "🏢 Company")? else {
            break;
        };
        let Some(role) = prompt(&theme, "💼 Job Role")? else {
            break;
        };

        if company.is_empty() || role.is_empty() {
            println!("{}", "⚠️  Please provide both company and job role".yellow());
            continue;
        }

        research_once(pipeline, &company, &role, json).await?;
    }

    println!(
        "\n{}",
        "👋 Exiting Interview Research Agent. Good luck with your interview preparation!".bright_blue()
    );
    Ok(())
}

/// Read one trimmed answer; `None` when the user asked to quit.
fn prompt(theme: &ColorfulTheme, label: &str) -> Result<Option<String>> {
    let answer: String = Input::with_theme(theme)
        .with_prompt(label)
        .allow_empty(true)
        .interact_text()?;
    let answer = answer.trim().to_string();

    if answer.eq_ignore_ascii_case("quit") || answer.eq_ignore_ascii_case("exit") {
        return Ok(None);
    }
    Ok(Some(answer))
}

fn print_record(record: &ResearchRecord) {
    if let Some(background) = &record.background {
        print_background(background);
    }
    if let Some(process) = &record.interview_process {
        print_process(process);
    }
    if let Some(guide) = &record.preparation_guide {
        print_guide(guide);
    }

    let fallbacks: Vec<String> = record
        .reports
        .iter()
        .filter(|r| r.provenance.is_placeholder())
        .map(|r| r.stage.to_string())
        .collect();
    if !fallbacks.is_empty() {
        println!(
            "\n{}",
            format!("ℹ️  Placeholder values used for: {}", fallbacks.join(", ")).dimmed()
        );
    }
}

fn heading(title: &str) {
    println!("\n{}", title.bold());
    println!("{}", "=".repeat(40));
}

fn numbered(items: &[String], limit: usize) {
    for (i, item) in items.iter().take(limit).enumerate() {
        println!("  {}. {}", i + 1, item);
    }
}

fn print_background(background: &CompanyBackground) {
    heading("🏢 Company Information");
    println!("- Size: {}", background.company_size);
    println!("- Industry: {}", background.industry);
    println!("- Culture: {}", background.company_culture);
    if !background.values.is_empty() {
        let values: Vec<&str> = background.values.iter().map(String::as_str).collect();
        println!("- Values: {}", values.join(", "));
    }
    if !background.recent_news.is_empty() {
        println!("- Recent News:");
        for news in background.recent_news.iter().take(RECENT_NEWS_SHOWN) {
            println!("  • {}", news);
        }
    }
}

fn print_process(process: &InterviewProcess) {
    heading("📋 Interview Process");
    println!("- Duration: {}", process.duration);
    println!("- Stages:");
    numbered(&process.typical_stages, usize::MAX);

    let methods = process.assessment_methods();
    if !methods.is_empty() {
        println!("\n{}", "🔍 Assessment Methods:".bold());
        for method in methods {
            println!("  • {}", method);
        }
    }

    if !process.common_questions.is_empty() {
        println!("\n{}", "❓ Common Questions:".bold());
        numbered(&process.common_questions, QUESTIONS_SHOWN);
    }
}

fn print_guide(guide: &PreparationGuide) {
    heading("📚 Preparation Guide");

    if !guide.overview.is_empty() {
        println!("{}", guide.overview);
    }

    let sections: [(&str, &[String], usize); 5] = [
        ("🗓  Timeline:", guide.preparation_timeline.as_slice(), SHORT_LIST_SHOWN),
        ("- Technical Topics to Focus On:", guide.technical_preparation.as_slice(), TECHNICAL_TOPICS_SHOWN),
        ("- Behavioral Areas to Prepare:", guide.behavioral_preparation.as_slice(), SHORT_LIST_SHOWN),
        ("💡 Company-Specific Tips:", guide.company_specific_prep.as_slice(), SHORT_LIST_SHOWN),
        ("- Recommended Resources:", guide.additional_resources.as_slice(), SHORT_LIST_SHOWN),
    ];
    for (title, items, limit) in sections {
        if !items.is_empty() {
            println!("\n{}", title.bold());
            numbered(items, limit);
        }
    }

    let sources: Vec<&String> = guide.sources.values().flatten().collect();
    if !sources.is_empty() {
        println!("\n{}", "🔗 Sources:".bold());
        for url in sources {
            println!("  • {}", url.dimmed());
        }
    }
}
