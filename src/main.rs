use clap::CommandFactory;
use clap::Parser;
use colored::*;
use env_logger::{Builder, Env, Target};
use log::info;
use std::fs;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;
use text_finder::cli::{Cli, Commands};
use text_finder::error::{Result as TfResult, TextFinderError};
use text_finder::{
    BuildHandle, BuildStatus, FinderConfig, GlobEnumerator, JobFile, MultiFinderRunner, Verdict,
    WriterSink,
};

fn main() {
    let code = match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}", e.to_string().red());
            4
        }
    };
    std::process::exit(code);
}

fn run() -> TfResult<i32> {
    let cli = Cli::parse();
    setup_logging(&cli)?;

    match &cli.command {
        Commands::Scan {
            regexp,
            build_id,
            file_set,
            also_check_console,
            console,
            not_built_if_found,
            unstable_if_found,
            succeed_if_found,
            json,
        } => {
            let finder = FinderConfig {
                regexp: regexp.clone(),
                build_id: build_id.clone(),
                file_set: file_set.clone(),
                also_check_console: *also_check_console,
                not_built_if_found: *not_built_if_found,
                unstable_if_found: *unstable_if_found,
                succeed_if_found: *succeed_if_found,
            };
            run_finders(vec![finder], &cli, console.clone(), *json)
        }
        Commands::Run {
            config,
            console,
            json,
        } => {
            let job = JobFile::load(config)?;
            run_finders(job.finders, &cli, console.clone(), *json)
        }
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(*shell, &mut cmd, "text-finder", &mut io::stdout());
            Ok(0)
        }
    }
}

fn run_finders(
    finders: Vec<FinderConfig>,
    cli: &Cli,
    console: Option<PathBuf>,
    json: bool,
) -> TfResult<i32> {
    info!("Running {} finder(s) at {}", finders.len(), cli.path.display());

    let mut build = CliBuild {
        console,
        status: None,
        display_name: None,
    };
    let mut sink = WriterSink::new(io::stdout());
    let runner = MultiFinderRunner::new(finders);
    runner.run(&mut build, &cli.path, &GlobEnumerator, &mut sink);

    // An untouched build stays successful.
    let verdict = Verdict {
        status: build.status.unwrap_or(BuildStatus::Success),
        build_id: build.display_name.clone(),
    };

    if json {
        let rendered = serde_json::to_string_pretty(&verdict)
            .map_err(|e| TextFinderError::Other(e.to_string()))?;
        println!("{rendered}");
    } else {
        println!("{} {}", "Final status:".cyan(), paint(verdict.status));
        if let Some(id) = &verdict.build_id {
            println!("{} {}", "Build id:".cyan(), id.yellow());
        }
    }
    Ok(verdict.status.exit_code())
}

fn paint(status: BuildStatus) -> ColoredString {
    let text = status.to_string();
    match status {
        BuildStatus::Success => text.green().bold(),
        BuildStatus::Unstable => text.yellow().bold(),
        BuildStatus::Failure => text.red().bold(),
        BuildStatus::NotBuilt => text.dimmed(),
    }
}

/// Build handle for CLI runs: status and display name live in memory,
/// the console log is an optional file ("-" reads standard input).
struct CliBuild {
    console: Option<PathBuf>,
    status: Option<BuildStatus>,
    display_name: Option<String>,
}

impl BuildHandle for CliBuild {
    fn set_display_name(&mut self, name: &str) {
        info!("Build display name set to '{name}'");
        self.display_name = Some(name.to_string());
    }

    fn override_status(&mut self, status: BuildStatus) {
        info!("Build status overridden to {status}");
        self.status = Some(status);
    }

    fn open_console_reader(&self) -> io::Result<Box<dyn BufRead>> {
        match &self.console {
            Some(path) if path.as_os_str() == "-" => Ok(Box::new(BufReader::new(io::stdin()))),
            Some(path) => Ok(Box::new(BufReader::new(File::open(path)?))),
            None => Err(io::Error::new(
                io::ErrorKind::NotFound,
                "no console log attached; pass --console",
            )),
        }
    }
}

fn setup_logging(cli: &Cli) -> TfResult<()> {
    let default_filter = if cli.verbose { "debug" } else { "info" };
    let mut builder = Builder::from_env(Env::default().default_filter_or(default_filter));

    builder.format(|buf, record| {
        use std::io::Write;
        writeln!(
            buf,
            "{} [{}] [{}] {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
            record.level(),
            record.module_path().unwrap_or("unknown"),
            record.args()
        )
    });

    if let Some(log_path) = &cli.log {
        if let Some(parent_dir) = log_path.parent() {
            if !parent_dir.as_os_str().is_empty() && !parent_dir.exists() {
                fs::create_dir_all(parent_dir).map_err(TextFinderError::Io)?;
            }
        }
        let log_file = fs::File::create(log_path).map_err(TextFinderError::Io)?;
        builder.target(Target::Pipe(Box::new(log_file)));
    } else {
        builder.target(Target::Stderr);
    }

    builder
        .try_init()
        .map_err(|e| TextFinderError::Other(e.to_string()))?;
    Ok(())
}
