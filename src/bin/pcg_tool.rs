/// Example: .\pcg_tool.exe to-patch .\backups\*.PCG -o patches --program A,B --combi A --data .\data
/// Example: .\pcg_tool.exe from-patch .\patches\Program\USER-A\*.patch -o bin --model tritonextreme
/// Example: .\pcg_tool.exe pack-gm .\gm_patches\*.patch -o Factory_GM_Programs.bin

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{Parser, command, Subcommand};
use colored::Colorize;
use korg_pcg::bank::{KorgBanks, KorgModel, KorgPCG};
use korg_pcg::banks::{PatchMode, short_id_for_letter};
use korg_pcg::context::{ConversionContext, DataPaths};
use korg_pcg::convert::{pack_program, Conversion, Converter};
use korg_pcg::dtype::PCGError;
use korg_pcg::gm::write_packed;
use korg_pcg::patch::{patch_path, PatchFile, PATCH_EXTENSION};
use tracing_subscriber::EnvFilter;

#[path = "../fileutils.rs"]
mod fileutils;
use fileutils::VERSION;
use fileutils::{get_final_output_folder, get_input_output_pairs, open_file_overwrite_rw, valid_file_of_type};

#[derive(Parser)]
#[command(author = "Adakite", version = VERSION, about = "Tools for converting Korg Triton PCG files to and from .patch presets", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands
}

#[derive(Subcommand)]
enum Commands {
    ToPatch {
        /// Sets the path of the PCG files to be converted
        #[arg(value_name = "INPUT")]
        input_glob: String,

        /// Sets the folder to output the .patch files
        #[arg(short = 'o', long, value_name = "OUTPUT")]
        output_folder: Option<PathBuf>,

        /// Program banks to convert, in the order they are assigned to USER-A to USER-D
        #[arg(long, value_name = "BANKS", value_delimiter = ',', num_args = 1..=4)]
        program: Vec<String>,

        /// Combination banks to convert
        #[arg(long, value_name = "BANKS", value_delimiter = ',', num_args = 1..=4)]
        combi: Vec<String>,

        /// Sets the folder holding the templates, GM programs and factory PCG files
        #[arg(short = 'd', long, value_name = "DATA")]
        data: Option<PathBuf>,
    },
    FromPatch {
        /// Sets the path of the program .patch files
        #[arg(value_name = "INPUT")]
        input_glob: String,

        /// Sets the folder to output the raw program records
        #[arg(short = 'o', long, value_name = "OUTPUT")]
        output_folder: Option<PathBuf>,

        /// Model the records are written for. Only the Triton Extreme stores valve force settings.
        #[arg(short = 'm', long, value_name = "MODEL", default_value = "Triton")]
        model: KorgModel,
    },
    PackGM {
        /// Sets the path of the GM program .patch files, named BB_PPP.patch after their bank and program
        #[arg(value_name = "INPUT")]
        input_glob: String,

        /// Sets the packed file to write
        #[arg(short = 'o', long, value_name = "OUTPUT")]
        output_file: PathBuf,

        /// Model the records are written for
        #[arg(short = 'm', long, value_name = "MODEL", default_value = "Triton")]
        model: KorgModel,
    },
    Info {
        /// Sets the path of the PCG files to describe
        #[arg(value_name = "INPUT")]
        input_glob: String,
    }
}

fn pcg_files(input_glob: &str) -> Result<Vec<PathBuf>, PCGError> {
    Ok(glob::glob(input_glob)?.filter_map(|entry| entry.ok()).filter(|path| {
        let valid = valid_file_of_type(path, "pcg");
        if !valid {
            println!("Skipping {}!", path.display());
        }
        valid
    }).collect())
}

fn check_letters(mode: PatchMode, letters: &[String]) -> Result<(), PCGError> {
    for letter in letters {
        if short_id_for_letter(letter).is_none() {
            return Err(PCGError::Invalid(format!("Unknown {} bank \"{}\"", mode, letter)));
        }
    }
    Ok(())
}

fn write_patches(output_folder: &Path, converted: &[(&'static str, Vec<Conversion>)], model: KorgModel) -> Result<usize, PCGError> {
    let mut with_warnings = 0;
    for (target, conversions) in converted {
        for conv in conversions {
            let patch = PatchFile::from_conversion(conv, target, model)?;
            let path = patch_path(output_folder, conv.mode, target, conv.index);
            open_file_overwrite_rw(path)?.write_all(patch.to_json()?.as_bytes())?;
            if !conv.warnings.is_empty() {
                with_warnings += 1;
            }
        }
    }
    Ok(with_warnings)
}

fn describe(name: &str, banks: &Option<KorgBanks>) {
    let Some(banks) = banks else {
        return;
    };
    println!("  {} ({} items)", name, banks.item_count());
    for bank in &banks.banks {
        println!("    {} [{:#X}]: {} x {} bytes", bank.letter().unwrap_or("?"), bank.bank_id, bank.items.len(), bank.recordsize);
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::ToPatch { input_glob, output_folder, program, combi, data } => {
            check_letters(PatchMode::Program, program)?;
            check_letters(PatchMode::Combi, combi)?;
            let output_folder = get_final_output_folder(output_folder)?;
            let data_paths = DataPaths::in_folder(data.clone().unwrap_or(std::env::current_dir()?));
            let program: Vec<&str> = program.iter().map(|s| s.as_str()).collect();
            let combi: Vec<&str> = combi.iter().map(|s| s.as_str()).collect();

            let mut ctx: Option<ConversionContext> = None;
            for input_file_path in pcg_files(input_glob)? {
                print!("Converting {}... ", input_file_path.display());
                let pcg = KorgPCG::load(&input_file_path)?;
                if ctx.as_ref().map_or(true, |c| c.model != pcg.model) {
                    ctx = Some(ConversionContext::load(pcg.model, &data_paths)?);
                }
                let Some(ctx) = ctx.as_ref() else {
                    continue;
                };

                let converter = Converter::new(&pcg, ctx);
                let (programs, combis) = std::thread::scope(|s| {
                    let programs = s.spawn(|| converter.convert_banks(PatchMode::Program, &program));
                    let combis = converter.convert_banks(PatchMode::Combi, &combi);
                    (programs.join(), combis)
                });
                let programs = programs.map_err(|_| PCGError::Invalid("Program conversion panicked".to_string()))??;
                let combis = combis?;

                let with_warnings = write_patches(&output_folder, &programs, pcg.model)? + write_patches(&output_folder, &combis, pcg.model)?;
                println!("done!");
                if with_warnings > 0 {
                    println!("{}{} presets were converted with warnings, see the log above.", "Warning: ".yellow(), with_warnings);
                }
            }

            println!("\nAll files successfully processed.");
        },
        Commands::FromPatch { input_glob, output_folder, model } => {
            let output_folder = get_final_output_folder(output_folder)?;
            let input_file_paths: Vec<(PathBuf, PathBuf)> = get_input_output_pairs(input_glob, PATCH_EXTENSION, &output_folder, "bin")?;

            for (input_file_path, output_file_path) in input_file_paths {
                print!("Converting {}... ", input_file_path.display());
                let patch = PatchFile::load(&input_file_path)?;
                if patch.mode() != PatchMode::Program {
                    println!("{}{} is a {} patch, only programs can be written back.", "Warning: ".yellow(), input_file_path.display(), patch.mode());
                    continue;
                }
                let record = pack_program(&patch.to_param_list(), patch.name(), *model)?;
                open_file_overwrite_rw(output_file_path)?.write_all(&record)?;
                println!("done!");
            }

            println!("\nAll files successfully processed.");
        },
        Commands::PackGM { input_glob, output_file, model } => {
            let mut programs: Vec<(u8, u8, Vec<u8>)> = Vec::new();
            for entry in glob::glob(input_glob)? {
                let input_file_path = entry?.to_path_buf();
                if !valid_file_of_type(&input_file_path, PATCH_EXTENSION) {
                    println!("Skipping {}!", input_file_path.display());
                    continue;
                }
                let file_name = input_file_path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
                let (Some(bank), Some(program)) = (
                    file_name.get(0..2).and_then(|s| s.parse::<u8>().ok()),
                    file_name.get(3..6).and_then(|s| s.parse::<u8>().ok()),
                ) else {
                    println!("{}{} is not named BB_PPP.{}, skipping.", "Warning: ".yellow(), file_name, PATCH_EXTENSION);
                    continue;
                };

                print!("Packing {}... ", input_file_path.display());
                let patch = PatchFile::load(&input_file_path)?;
                let record = pack_program(&patch.to_param_list(), patch.name(), *model)?;
                programs.push((bank, program, record.to_vec()));
                println!("done!");
            }

            let written = write_packed(&programs, &mut open_file_overwrite_rw(output_file)?)?;
            println!("\nPacked {} GM programs ({} bytes) into {}.", programs.len(), written, output_file.display());
        },
        Commands::Info { input_glob } => {
            for input_file_path in pcg_files(input_glob)? {
                let pcg = KorgPCG::load(&input_file_path)?;
                println!("{}: {}", input_file_path.display(), pcg.model);
                describe("Programs", &pcg.program);
                describe("MOSS programs", &pcg.moss);
                describe("Combinations", &pcg.combination);
                describe("Drum kits", &pcg.drumkit);
                describe("Arpeggio patterns", &pcg.arpeggio);
                for block in [&pcg.csm1, &pcg.div1, &pcg.global].into_iter().flatten() {
                    println!("  {} block ({} bytes)", block.tag, block.data.len());
                }
            }
        }
    }

    Ok(())
}
