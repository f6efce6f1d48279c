use std::{path::{Path, PathBuf}, fs::{File, OpenOptions}, io::Seek};

use korg_pcg::dtype::PCGError;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn open_file_overwrite_rw<P: AsRef<Path>>(path: P) -> Result<File, PCGError> {
    if let Some(parent) = path.as_ref().parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut file = OpenOptions::new().append(false).create(true).read(true).write(true).open(path)?;
    file.set_len(0)?;
    file.seek(std::io::SeekFrom::Start(0))?;
    Ok(file)
}

pub fn get_input_output_pairs(input_glob: &str, source_file_format: &str, output_folder: &PathBuf, change_ext: &str) -> Result<Vec<(PathBuf, PathBuf)>, PCGError> {
    Ok(glob::glob(input_glob)?.filter_map(|entry| {
        match entry {
            Ok(path) => {
                if !valid_file_of_type(&path, source_file_format) {
                    println!("Skipping {}!", path.display());
                    None
                } else {
                    let input_file_name = path.file_name()?;
                    let mut output_path = output_folder.clone();
                    output_path.push(input_file_name);
                    output_path.set_extension(change_ext);
                    Some((path, output_path))
                }
            },
            Err(e) => {
                println!("{:?}", e);
                None
            }
        }
    }).collect())
}

pub fn get_final_output_folder(output_folder: &Option<PathBuf>) -> Result<PathBuf, PCGError> {
    if let Some(custom_output_folder) = output_folder {
        if !custom_output_folder.exists() {
            std::fs::create_dir_all(custom_output_folder)?;
        }
        if std::fs::metadata(custom_output_folder)?.is_dir() {
            Ok(custom_output_folder.clone())
        } else {
            Err(PCGError::Invalid("Output path must be a folder!".to_string()))
        }
    } else {
        Ok(std::env::current_dir()?)
    }
}

pub fn valid_file_of_type<P: AsRef<Path>>(path: P, t: &str) -> bool {
    let is_file = std::fs::metadata(&path).map(|m| m.is_file()).unwrap_or(false);
    let extension = path.as_ref().extension().and_then(|e| e.to_str());
    match extension {
        Some(extension) => is_file && extension.to_lowercase() == t.to_lowercase(),
        None => false,
    }
}
