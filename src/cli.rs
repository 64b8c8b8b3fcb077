// src/cli.rs

use std::env;
use std::error::Error;
use std::path::{Path, PathBuf};

use crate::config::consts::DISABLED_GUARD;
use crate::config::options::RunOptions;
use crate::progress::Progress;
use crate::runner;
use crate::store::PageCache;

pub fn run() -> Result<(), Box<dyn Error>> {
    let mut opts = RunOptions::default();
    let mut stats = false;

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--list" => {
                let v = args.next().ok_or("Missing value for --list")?;
                opts.list_file = PathBuf::from(v);
            }
            "--url" => {
                let v = args.next().ok_or("Missing value for --url")?;
                opts.urls.get_or_insert_with(Vec::new).push(v);
            }
            "-o" | "--out" => {
                let v = args.next().ok_or("Missing value for --out")?;
                opts.out = PathBuf::from(v);
            }
            "--pretty" => opts.pretty = true,
            "--refresh" => opts.refresh = true,
            "--stats" => stats = true,
            "-h" | "--help" => {
                print!("{}", include_str!("cli_help.txt"));
                return Ok(());
            }
            _ => return Err(format!("Unknown argument: {} (try --help)", arg).into()),
        }
    }

    if stats {
        return print_cache_stats();
    }

    // Guard file: nothing is fetched until it is removed by hand.
    if Path::new(DISABLED_GUARD).exists() {
        eprintln!("WARNING");
        eprintln!("This tool fetches many pages from a live site.");
        eprintln!(
            "Review the request pacing in src/config/consts.rs, then \
             remove the {} file to enable it.",
            DISABLED_GUARD
        );
        return Ok(());
    }

    let mut progress = ConsoleProgress::default();
    let summary = runner::run(&opts, Some(&mut progress))?;

    println!(
        "{} records written to {}",
        summary.converted,
        summary.written.display()
    );
    if !summary.skipped.is_empty() {
        println!("{} pages skipped:", summary.skipped.len());
        for (url, reason) in &summary.skipped {
            println!("  {} ({})", url, reason);
        }
    }
    Ok(())
}

fn print_cache_stats() -> Result<(), Box<dyn Error>> {
    let cache = PageCache::load(&RunOptions::cache_path())?;
    let (with, without) = cache.partition();

    println!("{} pages cached", cache.len());
    println!();
    println!("== {} with a compat table ==", with.len());
    for url in &with {
        println!("{}", url);
    }
    println!();
    println!("== {} without ==", without.len());
    for url in &without {
        println!("{}", url);
    }
    Ok(())
}

#[derive(Default)]
struct ConsoleProgress {
    total: usize,
    done: usize,
}

impl Progress for ConsoleProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
    }

    fn log(&mut self, msg: &str) {
        eprintln!("{}", msg);
    }

    fn item_done(&mut self, _url: &str) {
        self.done += 1;
        if self.done % 25 == 0 {
            eprintln!("{} of {} pages...", self.done, self.total);
        }
    }

    fn item_failed(&mut self, url: &str, msg: &str) {
        self.done += 1;
        eprintln!("failed: {} ({})", url, msg);
    }

    fn finish(&mut self) {
        eprintln!("{} of {} pages done.", self.done, self.total);
    }
}
