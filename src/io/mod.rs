//! Reading and writing of `GtoGrid` files.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use anyhow::{self, format_err};
use bincode;
use serde::{de::DeserializeOwned, Serialize};
use serde_yaml;

pub(crate) mod format;


/// An enumerated type for `GtoGrid` file types.
pub enum GtoGridFileType {
    /// Variant for binary files containing grid-evaluation results.
    Ao,
}

impl GtoGridFileType {
    /// Returns the extension of the file type.
    pub fn ext(&self) -> String {
        match self {
            GtoGridFileType::Ao => "gtogrid.ao".to_string(),
        }
    }
}

/// Reads a `GtoGrid` binary file and deserialises it into an appropriate structure.
///
/// # Arguments
///
/// * `name` - The name of the file to be read in (without `GtoGrid`-specific extensions).
/// * `file_type` - The type of the `GtoGrid` file to be read in.
///
/// # Returns
///
/// A `Result` containing the structure deserialised from the read-in file.
pub fn read_gtogrid_binary<T, P: AsRef<Path>>(
    name: P,
    file_type: GtoGridFileType,
) -> Result<T, anyhow::Error>
where
    T: DeserializeOwned,
{
    let mut path = name.as_ref().to_path_buf();
    path.set_extension(file_type.ext());
    let mut reader = BufReader::new(File::open(path).map_err(|err| format_err!(err))?);
    bincode::deserialize_from(&mut reader).map_err(|err| format_err!(err))
}

/// Serialises a structure and writes into a `GtoGrid` binary file.
///
/// # Arguments
///
/// * `name` - The name of the file to be written (without `GtoGrid`-specific extensions).
/// * `file_type` - The type of the `GtoGrid` file to be written.
///
/// # Returns
///
/// A `Result` indicating if the serialisation and writing processes have been successful.
pub fn write_gtogrid_binary<T, P: AsRef<Path>>(
    name: P,
    file_type: GtoGridFileType,
    value: &T,
) -> Result<(), anyhow::Error>
where
    T: Serialize,
{
    let mut path = name.as_ref().to_path_buf();
    path.set_extension(file_type.ext());
    let mut writer = BufWriter::new(File::create(path)?);
    bincode::serialize_into(&mut writer, value).map_err(|err| format_err!(err))
}

/// Reads a `GtoGrid` configuration YAML file and deserialises it into an appropriate structure.
///
/// # Arguments
///
/// * `name` - The name of the file to be read in (with its `.yml` or `.yaml` extension).
///
/// # Returns
///
/// A `Result` containing the structure deserialised from the read-in file.
pub fn read_gtogrid_yaml<T, P: AsRef<Path>>(name: P) -> Result<T, anyhow::Error>
where
    T: DeserializeOwned,
{
    let mut reader = BufReader::new(File::open(name).map_err(|err| format_err!(err))?);
    serde_yaml::from_reader(&mut reader).map_err(|err| format_err!(err))
}
