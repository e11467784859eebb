// Thu Oct 15 2026 - Alex

use super::args::{parse_hex_address, AddrArgs, Args, Command, ImportArgs, LabelsArgs, LineArgs};
use crate::config::Config;
use crate::memory::{AddressInfo, CpuType, MemoryType, RangeTranslator, RomInfo};
use crate::symbol::line_index::LINE_MAPPING_MEMORY_TYPE;
use crate::symbol::{LabelStore, SymbolProvider, WlaDxImporter};
use crate::ui::{print_info, ConsoleNotifier};
use colored::Colorize;
use std::path::Path;
use std::sync::Arc;

pub struct CommandHandler {
    config: Config,
    cpu: CpuType,
    quiet: bool,
}

/// An importer wired to an in-memory label store.
pub struct Session {
    pub importer: WlaDxImporter,
    pub labels: Arc<LabelStore>,
}

impl CommandHandler {
    pub fn new(config: Config, cpu: CpuType) -> Self {
        Self { config, cpu, quiet: false }
    }

    pub fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    pub fn from_args(args: &Args) -> anyhow::Result<Self> {
        let config = match &args.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };
        config.validate()?;

        let cpu: CpuType = args.cpu.parse().map_err(|e: String| anyhow::anyhow!(e))?;

        Ok(Self::new(config, cpu).with_quiet(args.quiet))
    }

    pub fn execute(&self, command: Command) -> anyhow::Result<()> {
        match command {
            Command::Import(import_args) => self.handle_import(import_args),
            Command::Line(line_args) => self.handle_line(line_args),
            Command::Addr(addr_args) => self.handle_addr(addr_args),
            Command::Labels(labels_args) => self.handle_labels(labels_args),
        }
    }

    pub fn setup_logging(args: &Args) {
        let level = match args.log_level.to_lowercase().as_str() {
            "trace" => log::LevelFilter::Trace,
            "debug" => log::LevelFilter::Debug,
            "info" => log::LevelFilter::Info,
            "warn" => log::LevelFilter::Warn,
            "error" => log::LevelFilter::Error,
            "off" => log::LevelFilter::Off,
            _ => log::LevelFilter::Warn,
        };

        env_logger::Builder::new()
            .filter_level(level)
            .format_timestamp(None)
            .init();

        if args.no_color {
            colored::control::set_override(false);
        }
    }

    pub fn translator(&self) -> anyhow::Result<RangeTranslator> {
        let (preset, prg_rom) = match self.cpu {
            CpuType::Gameboy => (RangeTranslator::gameboy(), MemoryType::GbPrgRom),
            _ => (RangeTranslator::snes_lorom(), MemoryType::SnesPrgRom),
        };

        let mut translator = preset.with_overrides(self.config.mappings.clone())?;
        if let Some(size) = self.config.prg_rom_size {
            translator = translator.with_size(prg_rom, size);
        }
        Ok(translator)
    }

    pub fn session(&self) -> anyhow::Result<Session> {
        let labels = Arc::new(LabelStore::new());
        let importer = WlaDxImporter::new(
            Arc::new(self.translator()?),
            Arc::new(RomInfo::new(vec![self.cpu])),
            labels.clone(),
        )
        .with_integration(self.config.integration);

        Ok(Session { importer, labels })
    }

    fn load(&self, symbols: &Path, notify: bool) -> anyhow::Result<Session> {
        let session = self.session()?;
        let notifier = if notify && !self.quiet && self.config.show_import_result {
            ConsoleNotifier::new()
        } else {
            ConsoleNotifier::silent()
        };
        session.importer.import_and_notify(symbols, &notifier)?;
        Ok(session)
    }

    fn handle_import(&self, args: ImportArgs) -> anyhow::Result<()> {
        let session = self.load(&args.symbols, true)?;

        if args.files && !self.quiet {
            print_info(&format!("Source files relative to {}", session.importer.symbol_path().display()));
            for file in session.importer.source_files() {
                let status = if file.is_empty() {
                    "missing".yellow()
                } else {
                    format!("{} lines", file.line_count()).normal()
                };
                println!("  {} ({})", file.name(), status);
            }
        }

        Ok(())
    }

    fn handle_line(&self, args: LineArgs) -> anyhow::Result<()> {
        args.validate().map_err(|e| anyhow::anyhow!(e))?;
        let session = self.load(&args.symbols, false)?;

        let file = session
            .importer
            .source_files()
            .into_iter()
            .find(|f| f.name() == args.file)
            .ok_or_else(|| anyhow::anyhow!("Source file not in symbol file: {}", args.file))?;

        match session.importer.line_address(&file, args.line) {
            Some(address) => println!("{}:{} -> {}", file.name(), args.line, address.to_string().green()),
            None => println!("{}:{} -> {}", file.name(), args.line, "no address".yellow()),
        }
        Ok(())
    }

    fn handle_addr(&self, args: AddrArgs) -> anyhow::Result<()> {
        let address = parse_hex_address(&args.address).map_err(|e| anyhow::anyhow!(e))?;
        let session = self.load(&args.symbols, false)?;

        let info = AddressInfo::new(address, LINE_MAPPING_MEMORY_TYPE);
        match session.importer.source_code_line_info(info) {
            Some(location) => {
                println!("{} -> {}:{}", info, location.file.name().green(), location.line);
                if let Some(text) = location.text() {
                    println!("  {}", text.trim_end());
                }
            }
            None => println!("{} -> {}", info, "no source line".yellow()),
        }
        Ok(())
    }

    fn handle_labels(&self, args: LabelsArgs) -> anyhow::Result<()> {
        let session = self.load(&args.symbols, false)?;
        let labels = session.labels.labels();

        if args.json {
            println!("{}", serde_json::to_string_pretty(&labels)?);
            return Ok(());
        }

        for label in &labels {
            println!("{:<8} ${:06X}  {}", label.memory_type.name().cyan(), label.address, label.label);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::IntegrationConfig;
    use crate::memory::{AddressTranslator, MappingRule};
    use clap::Parser;

    #[test]
    fn test_translator_respects_config() {
        let config = Config::new()
            .with_prg_rom_size(0x8000)
            .with_mapping(MappingRule::new(MemoryType::SnesMemory, 0x2000, 0x20FF, MemoryType::SnesSaveRam, 0));
        let handler = CommandHandler::new(config, CpuType::Snes);
        let translator = handler.translator().unwrap();

        let rom = translator.absolute_address(AddressInfo::new(0x008000, MemoryType::SnesMemory));
        assert_eq!(rom, AddressInfo::new(0, MemoryType::SnesPrgRom));

        let past_end = translator.absolute_address(AddressInfo::new(0x018000, MemoryType::SnesMemory));
        assert!(!past_end.is_valid());

        let custom = translator.absolute_address(AddressInfo::new(0x002010, MemoryType::SnesMemory));
        assert_eq!(custom, AddressInfo::new(0x10, MemoryType::SnesSaveRam));
    }

    #[test]
    fn test_session_imports_into_store() {
        let dir = tempfile::tempdir().unwrap();
        let sym = dir.path().join("game.sym");
        std::fs::write(&sym, "[labels]\n00:8000 Reset\n7e:0010 Counter\n").unwrap();

        let handler = CommandHandler::new(Config::default(), CpuType::Snes).with_quiet(true);
        let session = handler.load(&sym, true).unwrap();

        assert_eq!(session.labels.len(), 2);
        assert_eq!(session.labels.get("Counter").unwrap().memory_type, MemoryType::SnesWorkRam);
    }

    #[test]
    fn test_session_applies_integration_config() {
        let dir = tempfile::tempdir().unwrap();
        let sym = dir.path().join("game.sym");
        std::fs::write(&sym, "[labels]\n00:8000 Reset\n7e:0010 Counter\n").unwrap();

        let config = Config::new().with_integration(IntegrationConfig {
            import_work_ram_labels: false,
            ..IntegrationConfig::default()
        });
        let handler = CommandHandler::new(config, CpuType::Snes).with_quiet(true);
        let session = handler.load(&sym, false).unwrap();

        assert_eq!(session.labels.len(), 1);
        assert!(session.labels.get("Counter").is_none());
    }

    #[test]
    fn test_from_args_parses_cpu() {
        let args = Args::try_parse_from(["wladx-symbols", "--cpu", "GB", "import", "game.sym"]).unwrap();
        let handler = CommandHandler::from_args(&args).unwrap();
        assert_eq!(handler.cpu, CpuType::Gameboy);

        let args = Args::try_parse_from(["wladx-symbols", "--cpu", "z80", "import", "game.sym"]).unwrap();
        assert!(CommandHandler::from_args(&args).is_err());
    }
}
