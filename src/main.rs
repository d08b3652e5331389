//! Studentdesk - student records desktop application
//!
//! Entry point: parses the command line, opens the data file and starts
//! the window (or prints the table with `--list`).

use anyhow::{anyhow, Context, Result};
use std::path::PathBuf;
use studentdesk::config::AppConfig;
use studentdesk::ui::StudentApp;
use studentdesk::StudentStore;
use tracing::{error, info};

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(
                "studentdesk=info"
                    .parse::<tracing_subscriber::filter::Directive>()
                    .context("invalid default log directive")?,
            ),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();

    let mut data_file: Option<PathBuf> = None;
    let mut list_only = false;
    let mut i = 1;

    while i < args.len() {
        match args[i].as_str() {
            "--version" | "-v" => {
                println!("studentdesk {}", studentdesk::VERSION);
                return Ok(());
            }
            "--help" | "-h" => {
                print_help();
                return Ok(());
            }
            "--list" | "-l" => {
                list_only = true;
            }
            "--data" | "-f" => {
                if i + 1 >= args.len() {
                    eprintln!("Error: --data requires a file path");
                    return Ok(());
                }
                data_file = Some(PathBuf::from(&args[i + 1]));
                i += 2;
                continue;
            }
            arg => {
                eprintln!("Unknown argument: {}", arg);
                print_help();
                return Ok(());
            }
        }
        i += 1;
    }

    let config_path = AppConfig::path();
    let config = AppConfig::load_from(&config_path);
    let data_file = data_file.unwrap_or_else(|| config.data_file());

    if list_only {
        let store = StudentStore::open(&data_file).with_context(|| {
            format!("Failed to open student data file {}", data_file.display())
        })?;
        print_table(&store);
        return Ok(());
    }

    // An unreadable data file is reported in the window, which starts with
    // an empty table and leaves the file alone until the user confirms
    let (store, load_error) = match StudentStore::open(&data_file) {
        Ok(store) => (store, None),
        Err(e) => {
            error!(path = %data_file.display(), error = %e, "Failed to load student data file");
            (StudentStore::new(&data_file), Some(e))
        }
    };

    info!(
        "Starting Studentdesk v{} with {} student(s)",
        studentdesk::VERSION,
        store.len()
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Student Data Management System")
            .with_inner_size([1100.0, 720.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Studentdesk",
        options,
        Box::new(move |cc| {
            let app = StudentApp::new(cc, store, config, config_path);
            Ok(Box::new(match load_error {
                Some(e) => app.with_load_error(e),
                None => app,
            }))
        }),
    )
    .map_err(|e| anyhow!("Window error: {}", e))
}

fn print_help() {
    println!("Usage: studentdesk [OPTIONS]");
    println!();
    println!("Options:");
    println!("  -f, --data FILE   Use FILE as the student data file");
    println!("  -l, --list        Print all students and exit");
    println!("  -v, --version     Show version");
    println!("  -h, --help        Show this help");
    println!();
    println!("Without --data, the file from the config (default: students.dat) is used.");
}

fn print_table(store: &StudentStore) {
    let stats = store.statistics();
    println!(
        "{:<4} {:<30} {:<14} {:<10} {:<8} {:>4} {:>6}",
        "ID", "Name", "Reg No", "Branch", "Program", "Age", "GPA"
    );
    println!("{}", "-".repeat(82));
    for student in store.students() {
        let p = &student.profile;
        println!(
            "{:<4} {:<30} {:<14} {:<10} {:<8} {:>4} {:>6.2}",
            student.id.get(), p.name, p.reg_num, p.branch, p.program, p.age, p.gpa
        );
    }
    println!("{}", "-".repeat(82));
    println!(
        "Total students: {} | Average GPA: {:.2}",
        stats.count, stats.average_gpa
    );
}
