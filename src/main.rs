mod api;
mod history;
mod llm;
mod server;

use clap::{Args, Parser, Subcommand};
use std::path::Path;

use dream_gacha::config::DiagnosisConfig;
use dream_gacha::{diagnose, format_float, BirthDate, DiagnosisInput, QuizAnswer};

#[derive(Parser)]
#[command(name = "dream-gacha", about = "Dream type gacha diagnosis")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    Diagnose(DiagnoseArgs),
    Serve(ServeArgs),
}

#[derive(Args, Debug, Clone)]
struct DiagnoseArgs {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    year: i32,
    #[arg(long)]
    month: u32,
    #[arg(long)]
    day: u32,
    /// Quiz answer as "questionId:optionId"; repeatable.
    #[arg(long = "answer")]
    answers: Vec<String>,
    #[arg(long)]
    ai: bool,
    #[arg(long)]
    ai_model: Option<String>,
    #[arg(long)]
    details: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    #[arg(long, default_value = "127.0.0.1")]
    host: String,
    #[arg(long, default_value_t = 8787)]
    port: u16,
    #[arg(long, default_value = "../webapp/dist")]
    web_root: String,
    #[arg(long, default_value = "data/history.json")]
    history_path: String,
}

#[tokio::main]
async fn main() {
    load_dotenv();
    init_tracing();
    if let Err(err) = run().await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), String> {
    let cli = Cli::parse();

    match cli.command {
        Command::Diagnose(args) => run_diagnose(args).await,
        Command::Serve(args) => server::serve(args).await,
    }
}

async fn run_diagnose(args: DiagnoseArgs) -> Result<(), String> {
    let birth_date = validate_birth_date(args.year, args.month, args.day)?;

    let mut answers = Vec::with_capacity(args.answers.len());
    for raw in &args.answers {
        answers.push(parse_answer(raw)?);
    }

    let input = DiagnosisInput {
        name: args.name.clone(),
        birth_date,
        answers,
    };

    let output = diagnose(&input);
    let profile = output.dream_type.profile();

    let composed = if args.ai {
        let config = DiagnosisConfig::load(None)
            .map(|(config, _)| config)
            .unwrap_or_default();
        let client = llm::LlmClient::from_env(args.ai_model, &config.llm)
            .ok_or_else(|| "LLM_API_KEY is not set".to_string())?;
        Some(
            client
                .compose_message(input.name.as_deref(), &output)
                .await?,
        )
    } else {
        None
    };

    println!(
        "Dream type: {} {} ({})",
        profile.icon,
        profile.display_name,
        profile.element.label()
    );
    println!("Keywords: {}", profile.keywords.join(", "));
    println!("Advice: {}", profile.advice);
    println!(
        "Questionnaire pick: {} | fortune pick: {} / {}",
        output.questionnaire.top.id(),
        output.fortune.dream_type.primary.id(),
        output.fortune.dream_type.secondary.id()
    );

    let bazi = &output.fortune.bazi;
    println!(
        "Four pillars: year {} | month {} | day {}",
        bazi.year_pillar, bazi.month_pillar, bazi.day_pillar
    );
    println!(
        "Element balance: wood {} | fire {} | earth {} | metal {} | water {}",
        bazi.element_balance.wood,
        bazi.element_balance.fire,
        bazi.element_balance.earth,
        bazi.element_balance.metal,
        bazi.element_balance.water
    );

    let star = &output.fortune.kyusei;
    println!("Nine star: {} — {}", star.name, star.character);

    let numerology = &output.fortune.numerology;
    println!(
        "Life path {}: {} — {}",
        numerology.number, numerology.name, numerology.mission
    );

    if let Some(composed) = &composed {
        println!("\nPersonalized reading:\n{}", composed.message.message);
        for highlight in &composed.message.highlights {
            println!("- {}", highlight);
        }
    }

    if args.details {
        let mut ranked = output.combined_scores.entries();
        ranked.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.0.priority_rank().cmp(&b.0.priority_rank()))
        });
        println!("\nCombined scores:");
        for (dream_type, score) in ranked {
            println!("  {}: {}", dream_type.id(), format_float(score, 2));
        }
    }

    Ok(())
}

fn validate_birth_date(year: i32, month: u32, day: u32) -> Result<BirthDate, String> {
    if !(1..=12).contains(&month) {
        return Err(format!("invalid month (1-12): {}", month));
    }
    if !(1..=31).contains(&day) {
        return Err(format!("invalid day (1-31): {}", day));
    }
    Ok(BirthDate { year, month, day })
}

fn parse_answer(raw: &str) -> Result<QuizAnswer, String> {
    let (question_id, answer_id) = raw
        .split_once(':')
        .ok_or_else(|| format!("invalid answer (expected questionId:optionId): {}", raw))?;
    let question_id = question_id
        .trim()
        .parse::<u32>()
        .map_err(|_| format!("invalid question id: {}", question_id))?;
    let answer_id = answer_id.trim();
    if answer_id.is_empty() {
        return Err(format!("missing option id in answer: {}", raw));
    }
    Ok(QuizAnswer {
        question_id,
        answer_id: Some(answer_id.to_string()),
        text_answer: None,
    })
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

fn load_dotenv() {
    let _ = dotenvy::dotenv();
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    let manifest_path = Path::new(manifest_dir).join(".env");
    let _ = dotenvy::from_path(manifest_path);
}
