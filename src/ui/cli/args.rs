// Thu Oct 15 2026 - Alex

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "wladx-symbols")]
#[command(author = "Alex")]
#[command(version = "1.0.0")]
#[command(about = "Import WLA-DX symbol files and map addresses to source lines", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true, default_value = "warn")]
    pub log_level: String,

    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[arg(long, global = true)]
    pub no_color: bool,

    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// CPU the symbols were built for (snes, gameboy, ...)
    #[arg(long, global = true, default_value = "snes")]
    pub cpu: String,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Import a symbol file and print a summary
    Import(ImportArgs),
    /// Find the ROM address of a source line
    Line(LineArgs),
    /// Find the source line of a ROM address
    Addr(AddrArgs),
    /// List imported labels
    Labels(LabelsArgs),
}

#[derive(Parser, Debug)]
pub struct ImportArgs {
    pub symbols: PathBuf,

    #[arg(long)]
    pub files: bool,
}

#[derive(Parser, Debug)]
pub struct LineArgs {
    pub symbols: PathBuf,

    #[arg(short, long)]
    pub file: String,

    #[arg(short = 'n', long)]
    pub line: u32,
}

#[derive(Parser, Debug)]
pub struct AddrArgs {
    pub symbols: PathBuf,

    /// PRG-ROM address, hex ($8000, 0x8000 or 8000)
    pub address: String,
}

#[derive(Parser, Debug)]
pub struct LabelsArgs {
    pub symbols: PathBuf,

    #[arg(long)]
    pub json: bool,
}

impl LineArgs {
    pub fn validate(&self) -> Result<(), String> {
        if self.file.is_empty() {
            return Err("file must not be empty".to_string());
        }
        Ok(())
    }
}

pub fn parse_hex_address(s: &str) -> Result<i32, String> {
    let digits = s
        .trim()
        .trim_start_matches('$')
        .trim_start_matches("0x")
        .trim_start_matches("0X");
    i32::from_str_radix(digits, 16)
        .ok()
        .filter(|a| *a >= 0)
        .ok_or_else(|| format!("invalid address: {}", s))
}
