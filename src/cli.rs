// src/cli.rs
use std::{env, error::Error, path::PathBuf};

use crate::config::options::{HeroSelector, RunMode, RunOptions};
use crate::progress::Progress;
use crate::runner;

pub fn run() -> Result<(), Box<dyn Error>> {
    let opts = parse_cli(env::args().skip(1))?;

    if opts.list_heroes {
        for name in runner::list_heroes() {
            println!("{name}");
        }
        return Ok(());
    }

    let mut progress = CliProgress::default();
    let summary = runner::run(&opts, Some(&mut progress))?;
    println!(
        "{} profiles, {} judgements written",
        summary.profiles_written.len(),
        summary.judgements_written.len()
    );
    Ok(())
}

fn parse_cli(mut args: impl Iterator<Item = String>) -> Result<RunOptions, Box<dyn Error>> {
    let mut opts = RunOptions::default();
    let mut names: Vec<String> = Vec::new();

    while let Some(a) = args.next() {
        match a.as_str() {
            "--hero" => names.push(args.next().ok_or("Missing value for --hero")?),
            "--scrape-only" => opts.mode = RunMode::ScrapeOnly,
            "--assess-only" => opts.mode = RunMode::AssessOnly,
            "--heroes-dir" => {
                opts.heroes_dir =
                    PathBuf::from(args.next().ok_or("Missing value for --heroes-dir")?);
            }
            "--judgements-dir" => {
                opts.judgements_dir =
                    PathBuf::from(args.next().ok_or("Missing value for --judgements-dir")?);
            }
            "--list-heroes" => opts.list_heroes = true,
            "-h" | "--help" => {
                eprintln!(include_str!("cli_help.txt"));
                std::process::exit(0);
            }
            _ => return Err(format!("Unknown arg: {}", a).into()),
        }
    }

    if !names.is_empty() {
        opts.heroes = HeroSelector::Names(names);
    }
    Ok(opts)
}

/// Printing progress sink for terminal runs. Counts land on stdout,
/// failures on stderr; details go to the debug log.
#[derive(Default)]
pub struct CliProgress {
    total: usize,
    done: usize,
    failed: usize,
}

impl Progress for CliProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
        self.done = 0;
        self.failed = 0;
    }

    fn log(&mut self, msg: &str) {
        println!("{msg}");
    }

    fn item_done(&mut self, name: &str) {
        self.done += 1;
        println!("[{}/{}] {name}", self.done + self.failed, self.total);
    }

    fn item_failed(&mut self, name: &str) {
        self.failed += 1;
        eprintln!("[{}/{}] {name} FAILED", self.done + self.failed, self.total);
    }

    fn finish(&mut self) {
        if self.failed > 0 {
            eprintln!(
                "{} of {} items failed (see .store/debug.log)",
                self.failed, self.total
            );
        }
    }
}
