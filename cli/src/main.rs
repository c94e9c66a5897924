//! Gradedrop CLI - upload assignment PDFs and view grades
//!
//! # Commands
//!
//! ```bash
//! gradedrop upload hw1.pdf hw2.pdf -t student -a A1   # Upload files
//! gradedrop check hw1.pdf                             # Dry-run validation
//! gradedrop grades student -s s42 -a A1               # One student's grades
//! gradedrop grades all -q QP7 -a A1                   # Whole class (teacher)
//! ```
//!
//! Endpoints come from the environment (`GRADEDROP_UPLOAD_ENDPOINT`,
//! `GRADEDROP_GRADES_ENDPOINT`, `.env` honored) or `--endpoint`.

mod render;
mod report;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use gradedrop::{
    Added, Config, FileSelection, GradesClient, MetadataBuilder, PresignClient, Uploader,
    UploadType,
};

use report::{format_file_size, ConsoleReporter};

#[derive(Parser)]
#[command(name = "gradedrop")]
#[command(about = "Upload assignment PDFs via presigned URLs and view grades", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload PDF files for an assignment
    Upload {
        /// PDF files to upload
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Who is uploading: student or teacher
        #[arg(short = 't', long)]
        upload_type: UploadType,

        /// Assignment ID (required for student uploads)
        #[arg(short, long, default_value = "")]
        assignment_id: String,

        /// Course ID (optional)
        #[arg(short, long)]
        course_id: Option<String>,

        /// Student ID (optional)
        #[arg(short, long)]
        student_id: Option<String>,

        /// Override the presign endpoint
        #[arg(long)]
        endpoint: Option<String>,
    },

    /// Validate files without uploading anything
    Check {
        /// Candidate files
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Fetch and render grade data
    Grades {
        #[command(subcommand)]
        view: GradesView,
    },
}

#[derive(Subcommand)]
enum GradesView {
    /// One student's grades for one assignment
    Student {
        #[arg(short, long)]
        student_id: String,

        #[arg(short, long)]
        assignment_id: String,

        /// Override the grades endpoint
        #[arg(long)]
        endpoint: Option<String>,
    },

    /// Every student's grade for a question paper (teacher view)
    All {
        #[arg(short, long)]
        qp_id: String,

        #[arg(short, long)]
        assignment_id: String,

        /// Override the grades endpoint
        #[arg(long)]
        endpoint: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    // Load .env file (if present)
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Upload {
            files,
            upload_type,
            assignment_id,
            course_id,
            student_id,
            endpoint,
        } => {
            cmd_upload(
                &files,
                upload_type,
                assignment_id,
                course_id,
                student_id,
                endpoint,
            )
            .await
        }

        Commands::Check { files } => cmd_check(&files),

        Commands::Grades { view } => match view {
            GradesView::Student {
                student_id,
                assignment_id,
                endpoint,
            } => cmd_grades_student(&student_id, &assignment_id, endpoint).await,
            GradesView::All {
                qp_id,
                assignment_id,
                endpoint,
            } => cmd_grades_all(&qp_id, &assignment_id, endpoint).await,
        },
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

async fn cmd_upload(
    files: &[PathBuf],
    upload_type: UploadType,
    assignment_id: String,
    course_id: Option<String>,
    student_id: Option<String>,
    endpoint: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = Config::from_env();
    if let Some(endpoint) = endpoint {
        config.api.upload_endpoint = endpoint;
    }

    eprintln!("📄 Selecting files:");
    let mut selection = FileSelection::new(config.upload.clone());
    for path in files {
        match selection.add_path(path) {
            Ok(Added::New) => {
                if let Some(file) = selection.files().last() {
                    eprintln!("   📄 {} ({})", file.name, format_file_size(file.size_bytes));
                }
            }
            Ok(Added::Duplicate) => {
                eprintln!("   ↪️  Skipping duplicate: {}", path.display());
            }
            // Rejections are per-file; keep going like the form does.
            Err(e) => eprintln!("   ⚠️  {}", e),
        }
    }

    let mut builder = MetadataBuilder::new()
        .upload_type(upload_type)
        .assignment_id(assignment_id);
    if let Some(course_id) = course_id {
        builder = builder.course_id(course_id);
    }
    if let Some(student_id) = student_id {
        builder = builder.student_id(student_id);
    }
    let metadata = builder.build(&selection)?;

    eprintln!(
        "📡 Requesting presigned URLs for {} file(s)...",
        metadata.files.len()
    );
    let urls = PresignClient::new(&config.api.upload_endpoint)
        .request_urls(&metadata)
        .await?;
    eprintln!("   ✅ Received {} URL(s)", urls.len());

    eprintln!("⬆️  Uploading...");
    let reporter = Arc::new(ConsoleReporter::new());
    let report = Uploader::new(config.upload)
        .upload_all(selection.files(), &urls, reporter)
        .await;

    if report.is_complete_success() {
        selection.clear();
        eprintln!("✅ {}", report.summary());
        Ok(())
    } else {
        eprintln!("⚠️  {}", report.summary());
        std::process::exit(1);
    }
}

fn cmd_check(files: &[PathBuf]) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env();
    let mut selection = FileSelection::new(config.upload);
    let mut rejected = 0usize;

    for path in files {
        match selection.add_path(path) {
            Ok(Added::New) => {
                if let Some(file) = selection.files().last() {
                    eprintln!("   ✅ {} ({})", file.name, format_file_size(file.size_bytes));
                }
            }
            Ok(Added::Duplicate) => {
                eprintln!("   ↪️  Duplicate name: {}", path.display());
            }
            Err(e) => {
                rejected += 1;
                eprintln!("   ❌ {}", e);
            }
        }
    }

    eprintln!(
        "\n📊 Results: {} accepted, {} rejected",
        selection.len(),
        rejected
    );

    if rejected > 0 {
        std::process::exit(1);
    }
    Ok(())
}

async fn cmd_grades_student(
    student_id: &str,
    assignment_id: &str,
    endpoint: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = grades_config(endpoint);

    eprintln!("📡 Fetching grades for student {}...", student_id);
    let grades = GradesClient::new(&config.api.grades_endpoint)
        .single_student(student_id, assignment_id)
        .await?;

    render::render_summary(&grades.summary);
    if !grades.details.is_empty() {
        render::render_details(&grades.details);
    }
    Ok(())
}

async fn cmd_grades_all(
    qp_id: &str,
    assignment_id: &str,
    endpoint: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = grades_config(endpoint);

    eprintln!("📡 Fetching all grades for question paper {}...", qp_id);
    let rows = GradesClient::new(&config.api.grades_endpoint)
        .all_students(qp_id, assignment_id)
        .await?;

    render::render_all_students(&rows);
    Ok(())
}

fn grades_config(endpoint: Option<String>) -> Config {
    let mut config = Config::from_env();
    if let Some(endpoint) = endpoint {
        config.api.grades_endpoint = endpoint;
    }
    config
}
