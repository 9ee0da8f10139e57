//! ARINC-424 navigation tables, as exported to CSV by the source database.
//!
//! Each table is one CSV file with a header row using the column names of the
//! source database (`ARPT_IDENT`, `PROC_IDENT`, ...). Unknown columns are
//! ignored and empty cells deserialize to `None`.
//!
//! The tables can be read from a directory or from a zip archive containing
//! the CSV files.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use thiserror::Error;
use zip::read::ZipArchive;

pub mod airport;
pub mod database;
pub mod navaid;
pub mod path_terminator;
pub mod procedure_leg;
pub mod runway;
pub mod waypoint;

/// A record type stored as one CSV file.
pub trait Table: DeserializeOwned {
    /// File name of the table, e.g. `AIRPORT.csv`.
    const FILE_NAME: &'static str;
}

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("required table {0} not found")]
    MissingTable(&'static str),
    #[error("failed to parse {table}: {source}")]
    Csv {
        table: &'static str,
        #[source]
        source: csv::Error,
    },
    #[error("failed to read navigation data: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to read navigation archive: {0}")]
    Zip(#[from] zip::result::ZipError),
}

/// Where the CSV tables are read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableSource {
    Directory(PathBuf),
    Archive(PathBuf),
}

impl TableSource {
    /// A `.zip` path is read as an archive, anything else as a directory.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match path.extension() {
            Some(ext) if ext.eq_ignore_ascii_case("zip") => TableSource::Archive(path.to_path_buf()),
            _ => TableSource::Directory(path.to_path_buf()),
        }
    }

    /// Read all records of table `T`, in file order.
    pub fn read<T: Table>(&self) -> Result<Vec<T>, LoadError> {
        let records = match self {
            TableSource::Directory(dir) => {
                let path = dir.join(T::FILE_NAME);
                if !path.exists() {
                    return Err(LoadError::MissingTable(T::FILE_NAME));
                }
                parse_table::<T, _>(BufReader::new(File::open(path)?))
            }
            TableSource::Archive(path) => {
                let mut archive = ZipArchive::new(File::open(path)?)?;
                let mut records = None;
                for i in 0..archive.len() {
                    let file = archive.by_index(i)?;
                    if Path::new(file.name()).file_name().is_some_and(|n| n == T::FILE_NAME) {
                        records = Some(parse_table::<T, _>(BufReader::new(file)));
                        break;
                    }
                }
                records.ok_or(LoadError::MissingTable(T::FILE_NAME))?
            }
        };
        let records = records.map_err(|source| LoadError::Csv {
            table: T::FILE_NAME,
            source,
        })?;
        tracing::debug!("Loaded {} records from {}", records.len(), T::FILE_NAME);
        Ok(records)
    }
}

/// Deserialize every row of a CSV table.
///
/// Cells are not trimmed: the fixed-width ARINC codes (waypoint descriptors in
/// particular) are positional.
pub fn parse_table<T: DeserializeOwned, R: Read>(reader: R) -> Result<Vec<T>, csv::Error> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::None).from_reader(reader);
    reader.deserialize().collect()
}

/// A trimmed, non-empty view of an optional text cell.
pub(crate) fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::airport::Airport;
    use super::*;

    #[test]
    fn parse_table_with_extra_columns_and_blanks() {
        let csv = "ARPT_IDENT,ICAO_CODE,ARPT_ELEV,ARPT_LAT,ARPT_LON,TRANSITIONS_ALT,TRANSITION_LEVEL\n\
                   ZSPD,ZS,13,31.143378,121.805214,,\n\
                   ZUUU,ZU,1625,30.578528,103.947086,9800,11800\n";
        let airports: Vec<Airport> = parse_table(csv.as_bytes()).unwrap();
        assert_eq!(airports.len(), 2);
        assert_eq!(airports[0].ident, "ZSPD");
        assert_eq!(airports[0].transition_altitude, None);
        assert_eq!(airports[1].transition_level, Some(11800.0));
    }

    #[test]
    fn source_kind_from_extension() {
        assert!(matches!(TableSource::new("FSL-2313.zip"), TableSource::Archive(_)));
        assert!(matches!(TableSource::new("FSL-2313.ZIP"), TableSource::Archive(_)));
        assert!(matches!(TableSource::new("FSL-2313"), TableSource::Directory(_)));
    }

    #[test]
    fn missing_table_in_directory() {
        let dir = tempfile::tempdir().unwrap();
        let err = TableSource::new(dir.path()).read::<Airport>().unwrap_err();
        assert!(matches!(err, LoadError::MissingTable("AIRPORT.csv")));
    }

    #[test]
    fn blank_cells() {
        assert_eq!(non_blank(&Some("  RW09L ".to_string())), Some("RW09L"));
        assert_eq!(non_blank(&Some("   ".to_string())), None);
        assert_eq!(non_blank(&None), None);
    }
}
