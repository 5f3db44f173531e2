use crate::infra::build_assessment_service;
use check_mate::config::{load_dotenv, AppConfig, MailConfig, OcrConfig, TelemetryConfig};
use check_mate::error::AppError;
use check_mate::telemetry;
use check_mate::workflows::assessment::report::views::DisplayView;
use check_mate::workflows::assessment::report::{checklist_csv, scores_csv};
use check_mate::workflows::assessment::AnalysisRequest;
use check_mate::workflows::delivery::ReportDeliveryService;
use check_mate::workflows::intake::{TextExtractor, UploadedArtifact};
use chrono::Local;
use clap::{Args, ValueEnum};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
    Csv,
}

#[derive(Args, Debug)]
pub(crate) struct AnalyzeArgs {
    /// File holding the assessment conditions (text or image)
    #[arg(long)]
    pub(crate) conditions: PathBuf,
    /// File holding the student draft (text or image)
    #[arg(long)]
    pub(crate) draft: PathBuf,
    /// Output format for the report
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub(crate) format: OutputFormat,
}

#[derive(Args, Debug)]
pub(crate) struct ExtractArgs {
    /// Text or image file to extract
    #[arg(long)]
    pub(crate) file: PathBuf,
}

#[derive(Args, Debug)]
pub(crate) struct MailTestArgs {
    /// Recipient address for the sample report
    #[arg(long)]
    pub(crate) to: String,
}

pub(crate) async fn run_analyze(args: AnalyzeArgs) -> Result<(), AppError> {
    let AnalyzeArgs {
        conditions,
        draft,
        format,
    } = args;

    let config = AppConfig::load()?;
    telemetry::init_cli(&config.telemetry)?;
    let extractor = TextExtractor::from_config(&config.ocr);
    let request = AnalysisRequest {
        conditions_text: read_input(&extractor, &conditions).await?,
        draft_text: read_input(&extractor, &draft).await?,
    };

    let service = build_assessment_service(&config)?;
    let outcome = service.analyze(&request).await?;
    let display = &outcome.report.display;

    match format {
        OutputFormat::Text => print!("{}", render_text(display)),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&outcome).map_err(std::io::Error::from)?;
            println!("{json}");
        }
        OutputFormat::Csv => {
            print!("{}", checklist_csv(display)?);
            println!();
            print!("{}", scores_csv(display)?);
        }
    }

    Ok(())
}

pub(crate) async fn run_extract(args: ExtractArgs) -> Result<(), AppError> {
    load_dotenv();
    telemetry::init_cli(&TelemetryConfig::from_env())?;
    let extractor = TextExtractor::from_config(&OcrConfig::from_env());

    let text = read_input(&extractor, &args.file).await?;
    if text.is_empty() {
        eprintln!("No text could be extracted from {}", args.file.display());
    } else {
        println!("{text}");
    }
    Ok(())
}

pub(crate) async fn run_mail_test(args: MailTestArgs) -> Result<(), AppError> {
    load_dotenv();
    telemetry::init_cli(&TelemetryConfig::from_env())?;
    let delivery = ReportDeliveryService::from_config(&MailConfig::from_env()?)?;

    let receipt = delivery.send_test(&args.to).await?;
    println!(
        "Sent \"{}\" to {} from {}",
        receipt.subject,
        receipt.recipient,
        delivery.sender()
    );
    Ok(())
}

/// Reads a file and routes it through the extractor, guessing the MIME type
/// from the file name.
async fn read_input(extractor: &TextExtractor, path: &Path) -> Result<String, AppError> {
    let bytes = tokio::fs::read(path).await?;
    let content_type = mime_guess::from_path(path)
        .first()
        .map(|mime| mime.essence_str().to_string());
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned());

    let artifact = UploadedArtifact::new(file_name, content_type, bytes);
    Ok(extractor.extract(&artifact).await)
}

pub(crate) fn render_text(view: &DisplayView) -> String {
    let mut out = String::new();

    writeln!(
        out,
        "Check Mate 분석 결과 ({})",
        Local::now().format("%Y년 %m월 %d일 %H:%M")
    )
    .expect("write header");
    writeln!(out, "{}: {}", view.total.headline, view.total.score_label).expect("write total");

    writeln!(out, "\n조건별 충족 여부").expect("write checklist heading");
    if view.checklist.is_empty() {
        writeln!(out, "- 인식된 조건이 없습니다.").expect("write empty checklist");
    }
    for row in &view.checklist {
        writeln!(out, "- {} [{}] {}", row.condition, row.status_label, row.content)
            .expect("write checklist row");
        if !row.remarks.is_empty() {
            writeln!(out, "  비고: {}", row.remarks).expect("write remarks");
        }
    }

    writeln!(out, "\n세부 점수").expect("write score heading");
    for row in &view.scores {
        writeln!(
            out,
            "- {}: {} | {}",
            row.category_label, row.score_label, row.evaluation
        )
        .expect("write score row");
    }

    writeln!(out, "\n개선 제안").expect("write suggestion heading");
    if view.suggestions.is_empty() {
        writeln!(out, "개선 제안이 없습니다.").expect("write no suggestions");
    }
    for suggestion in &view.suggestions {
        writeln!(out, "{suggestion}").expect("write suggestion");
    }

    out
}
