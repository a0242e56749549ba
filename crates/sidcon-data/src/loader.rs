//! Catalog loading: finds data files, deserializes them, and builds a catalog.
//!
//! A catalog directory holds one file per [`DataFile`], each in any one of
//! the supported [`Format`]s.

use crate::schema::{TechnologyData, UnitData};
use serde::de::DeserializeOwned;
use sidcon_core::catalog::{Catalog, CatalogBuilder, CatalogError};
use sidcon_core::technology::Era;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

// ===========================================================================
// Data files
// ===========================================================================

/// The files a catalog directory may hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFile {
    /// `units.*`, required.
    Units,
    /// `technologies.*`, optional.
    Technologies,
}

impl DataFile {
    /// File stem, which doubles as the array key inside a TOML file.
    pub fn stem(self) -> &'static str {
        match self {
            DataFile::Units => "units",
            DataFile::Technologies => "technologies",
        }
    }
}

impl fmt::Display for DataFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.stem())
    }
}

/// Supported data file formats, in lookup order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Ron,
    Toml,
    Json,
}

impl Format {
    pub const ALL: [Format; 3] = [Format::Ron, Format::Toml, Format::Json];

    pub fn extension(self) -> &'static str {
        match self {
            Format::Ron => "ron",
            Format::Toml => "toml",
            Format::Json => "json",
        }
    }
}

// ===========================================================================
// Errors
// ===========================================================================

/// Errors that can occur while loading a catalog.
#[derive(Debug, thiserror::Error)]
pub enum DataLoadError {
    /// The unit file is absent in every supported format.
    #[error("no {file} file ({file}.ron, {file}.toml or {file}.json) in {dir}")]
    MissingRequired { file: DataFile, dir: PathBuf },

    /// The file has an extension we don't support.
    #[error("unsupported format for file: {file}")]
    UnsupportedFormat { file: PathBuf },

    /// The same data file exists in two formats.
    #[error("{file} data is given twice: {a} and {b}")]
    ConflictingFormats { file: DataFile, a: PathBuf, b: PathBuf },

    /// A deserialization error occurred.
    #[error("parse error in {file}: {detail}")]
    Parse { file: PathBuf, detail: String },

    /// A unit value that is negative or not a finite number.
    #[error("invalid value {value} for unit '{key}' in {file}")]
    InvalidValue { file: PathBuf, key: String, value: f64 },

    /// A technology era outside 1..=4.
    #[error("invalid era {era} for technology '{name}' in {file}")]
    InvalidEra { file: PathBuf, name: String, era: u8 },

    /// The entries deserialized but do not form a valid catalog.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// An I/O error occurred.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

// ===========================================================================
// File discovery
// ===========================================================================

/// Detect the format of a file from its extension.
pub fn detect_format(path: &Path) -> Result<Format, DataLoadError> {
    let extension = path.extension().and_then(|e| e.to_str());
    Format::ALL
        .into_iter()
        .find(|format| Some(format.extension()) == extension)
        .ok_or_else(|| DataLoadError::UnsupportedFormat {
            file: path.to_path_buf(),
        })
}

/// Locate `file` in `dir` in any supported format.
///
/// Returns `Ok(None)` if it is absent, and `ConflictingFormats` if it exists
/// in more than one format.
pub fn find_data_file(dir: &Path, file: DataFile) -> Result<Option<PathBuf>, DataLoadError> {
    let mut present = Format::ALL
        .into_iter()
        .map(|format| dir.join(format!("{file}.{}", format.extension())))
        .filter(|candidate| candidate.exists());
    let found = present.next();
    if let (Some(a), Some(b)) = (&found, present.next()) {
        return Err(DataLoadError::ConflictingFormats {
            file,
            a: a.clone(),
            b,
        });
    }
    Ok(found)
}

/// Like [`find_data_file`], but an absent file is `MissingRequired`.
pub fn require_data_file(dir: &Path, file: DataFile) -> Result<PathBuf, DataLoadError> {
    find_data_file(dir, file)?.ok_or_else(|| DataLoadError::MissingRequired {
        file,
        dir: dir.to_path_buf(),
    })
}

// ===========================================================================
// Deserialization
// ===========================================================================

fn parse_error(path: &Path, detail: impl ToString) -> DataLoadError {
    DataLoadError::Parse {
        file: path.to_path_buf(),
        detail: detail.to_string(),
    }
}

/// Deserialize the entries of `file` from `path`.
///
/// RON and JSON files are the bare list; a TOML file holds it as an array of
/// tables named after the file (`[[units]]`, `[[technologies]]`).
pub fn deserialize_list<T: DeserializeOwned>(
    path: &Path,
    file: DataFile,
) -> Result<Vec<T>, DataLoadError> {
    let format = detect_format(path)?;
    let content = std::fs::read_to_string(path)?;

    match format {
        Format::Ron => ron::from_str(&content).map_err(|e| parse_error(path, e)),
        Format::Json => serde_json::from_str(&content).map_err(|e| parse_error(path, e)),
        Format::Toml => {
            let mut table: toml::Table =
                toml::from_str(&content).map_err(|e| parse_error(path, e))?;
            let array = table
                .remove(file.stem())
                .ok_or_else(|| parse_error(path, format!("no [[{file}]] entries")))?;
            array
                .try_into()
                .map_err(|e: toml::de::Error| parse_error(path, e))
        }
    }
}

// ===========================================================================
// Catalog loading
// ===========================================================================

/// Load a catalog from `dir`.
///
/// `units.*` is required; `technologies.*` may be absent, in which case the
/// catalog has no technologies.
pub fn load_catalog(dir: &Path) -> Result<Catalog, DataLoadError> {
    let mut builder = CatalogBuilder::new();

    let units_path = require_data_file(dir, DataFile::Units)?;
    let units: Vec<UnitData> = deserialize_list(&units_path, DataFile::Units)?;
    for unit in &units {
        if let Some(value) = unit.value {
            if !value.is_finite() || value < 0.0 {
                return Err(DataLoadError::InvalidValue {
                    file: units_path,
                    key: unit.key.clone(),
                    value,
                });
            }
        }
        builder.unit(&unit.key, &unit.name, unit.donation, unit.value);
    }

    if let Some(path) = find_data_file(dir, DataFile::Technologies)? {
        let technologies: Vec<TechnologyData> = deserialize_list(&path, DataFile::Technologies)?;
        for technology in &technologies {
            let Some(era) = Era::from_number(technology.era) else {
                return Err(DataLoadError::InvalidEra {
                    file: path,
                    name: technology.name.clone(),
                    era: technology.era,
                });
            };
            builder.technology(&technology.name, era, technology.donation);
        }
    }

    let catalog = builder.build()?;
    debug!(
        dir = %dir.display(),
        units = catalog.unit_count(),
        technologies = catalog.technology_count(),
        "catalog loaded"
    );
    Ok(catalog)
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use sidcon_core::bundle::CountedBundle;
    use sidcon_core::converter::Converter;
    use sidcon_core::unit::Partition;
    use std::fs;

    /// Create a temporary directory with a unique name for test isolation.
    fn make_test_dir(suffix: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "sidcon_data_test_{suffix}_{}",
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn cleanup(dir: &Path) {
        let _ = fs::remove_dir_all(dir);
    }

    const UNITS_RON: &str = r#"[
        (key: "w", name: "White cube", value: Some(1.0)),
        (key: "T", name: "Blue cube", value: Some(1.5)),
        (key: "$", name: "Victory point", value: Some(3.0)),
        (key: "N", name: "Any colony"),
        (key: "$", name: "Victory point (donation)", donation: true, value: Some(3.0)),
    ]"#;

    // -----------------------------------------------------------------------
    // detect_format
    // -----------------------------------------------------------------------

    #[test]
    fn detect_format_by_extension() {
        assert_eq!(detect_format(Path::new("units.ron")).unwrap(), Format::Ron);
        assert_eq!(detect_format(Path::new("units.toml")).unwrap(), Format::Toml);
        assert_eq!(detect_format(Path::new("units.json")).unwrap(), Format::Json);
    }

    #[test]
    fn detect_format_unsupported() {
        assert!(matches!(
            detect_format(Path::new("units.yaml")),
            Err(DataLoadError::UnsupportedFormat { .. })
        ));
        assert!(matches!(
            detect_format(Path::new("units")),
            Err(DataLoadError::UnsupportedFormat { .. })
        ));
    }

    // -----------------------------------------------------------------------
    // find_data_file / require_data_file
    // -----------------------------------------------------------------------

    #[test]
    fn find_data_file_found_and_missing() {
        let dir = make_test_dir("find");
        assert_eq!(find_data_file(&dir, DataFile::Units).unwrap(), None);
        fs::write(dir.join("units.json"), "[]").unwrap();
        assert_eq!(find_data_file(&dir, DataFile::Units).unwrap(), Some(dir.join("units.json")));
        cleanup(&dir);
    }

    #[test]
    fn find_data_file_conflict() {
        let dir = make_test_dir("find_conflict");
        fs::write(dir.join("units.ron"), "[]").unwrap();
        fs::write(dir.join("units.json"), "[]").unwrap();
        match find_data_file(&dir, DataFile::Units) {
            Err(DataLoadError::ConflictingFormats { file, a, b }) => {
                assert_eq!(file, DataFile::Units);
                assert_eq!(a, dir.join("units.ron"));
                assert_eq!(b, dir.join("units.json"));
            }
            other => panic!("expected ConflictingFormats, got: {other:?}"),
        }
        // The other data file is unaffected.
        assert_eq!(find_data_file(&dir, DataFile::Technologies).unwrap(), None);
        cleanup(&dir);
    }

    #[test]
    fn require_data_file_missing_names_the_file() {
        let dir = make_test_dir("require_missing");
        let err = require_data_file(&dir, DataFile::Units).unwrap_err();
        assert!(matches!(
            err,
            DataLoadError::MissingRequired {
                file: DataFile::Units,
                ..
            }
        ));
        let message = err.to_string();
        assert!(message.starts_with("no units file (units.ron, units.toml or units.json)"));
        cleanup(&dir);
    }

    #[test]
    fn data_file_stems() {
        assert_eq!(DataFile::Units.to_string(), "units");
        assert_eq!(DataFile::Technologies.stem(), "technologies");
    }

    // -----------------------------------------------------------------------
    // deserialize_list
    // -----------------------------------------------------------------------

    #[test]
    fn deserialize_list_toml() {
        let dir = make_test_dir("list_toml");
        let path = dir.join("units.toml");
        fs::write(
            &path,
            r#"
[[units]]
key = "w"
name = "White cube"
value = 1.0

[[units]]
key = "N"
name = "Any colony"
"#,
        )
        .unwrap();
        let units: Vec<UnitData> = deserialize_list(&path, DataFile::Units).unwrap();
        assert_eq!(units.len(), 2);
        assert_eq!(units[0].value, Some(1.0));
        assert_eq!(units[1].value, None);
        cleanup(&dir);
    }

    #[test]
    fn deserialize_list_toml_missing_key() {
        let dir = make_test_dir("list_toml_missing");
        let path = dir.join("units.toml");
        fs::write(&path, r#"foo = "bar""#).unwrap();
        let result: Result<Vec<UnitData>, _> = deserialize_list(&path, DataFile::Units);
        assert!(matches!(result, Err(DataLoadError::Parse { .. })));
        cleanup(&dir);
    }

    #[test]
    fn deserialize_list_parse_error() {
        let dir = make_test_dir("list_parse_err");
        let path = dir.join("units.ron");
        fs::write(&path, "this is not valid RON {{{").unwrap();
        let result: Result<Vec<UnitData>, _> = deserialize_list(&path, DataFile::Units);
        assert!(matches!(result, Err(DataLoadError::Parse { .. })));
        cleanup(&dir);
    }

    // -----------------------------------------------------------------------
    // load_catalog
    // -----------------------------------------------------------------------

    #[test]
    fn load_units_without_technologies() {
        let dir = make_test_dir("load_units");
        fs::write(dir.join("units.ron"), UNITS_RON).unwrap();

        let catalog = load_catalog(&dir).unwrap();
        assert_eq!(catalog.unit_count(), 5);
        assert_eq!(catalog.technology_count(), 0);
        assert!(catalog.unit(Partition::Donation, "$").is_some());
        assert!(catalog.unit(Partition::Donation, "w").is_none());

        let bundle = CountedBundle::parse(&catalog, "2wT+$").unwrap();
        assert_eq!(bundle.value(), sidcon_core::fixed::f64_to_value(6.5));
        cleanup(&dir);
    }

    #[test]
    fn loaded_catalog_parses_converters() {
        let dir = make_test_dir("load_converter");
        fs::write(dir.join("units.ron"), UNITS_RON).unwrap();
        let catalog = load_catalog(&dir).unwrap();

        let c = Converter::parse_any(&catalog, "2w/T→$").unwrap();
        assert_eq!(c.max_net_value(), sidcon_core::fixed::f64_to_value(1.5));
        cleanup(&dir);
    }

    #[test]
    fn load_technologies_from_json() {
        let dir = make_test_dir("load_techs");
        fs::write(dir.join("units.ron"), UNITS_RON).unwrap();
        fs::write(
            dir.join("technologies.json"),
            r#"[
                {"name": "Nanotechnology", "era": 1},
                {"name": "+Nanotechnology", "era": 1, "donation": true},
                {"name": "Megastructures", "era": 3}
            ]"#,
        )
        .unwrap();

        let catalog = load_catalog(&dir).unwrap();
        assert_eq!(catalog.technology_count(), 3);
        assert_eq!(catalog.technology("Megastructures").unwrap().era, Era::III);
        assert!(catalog.technology("+Nanotechnology").unwrap().donation);
        cleanup(&dir);
    }

    #[test]
    fn load_missing_units_file() {
        let dir = make_test_dir("load_missing");
        fs::write(dir.join("technologies.ron"), "[]").unwrap();
        assert!(matches!(
            load_catalog(&dir),
            Err(DataLoadError::MissingRequired {
                file: DataFile::Units,
                ..
            })
        ));
        cleanup(&dir);
    }

    #[test]
    fn load_technologies_from_toml() {
        let dir = make_test_dir("load_techs_toml");
        fs::write(dir.join("units.ron"), UNITS_RON).unwrap();
        fs::write(
            dir.join("technologies.toml"),
            r#"
[[technologies]]
name = "Antimatter Power"
era = 2
"#,
        )
        .unwrap();

        let catalog = load_catalog(&dir).unwrap();
        assert_eq!(catalog.technology("Antimatter Power").unwrap().era, Era::II);
        cleanup(&dir);
    }

    #[test]
    fn load_rejects_negative_value() {
        let dir = make_test_dir("load_negative");
        fs::write(
            dir.join("units.ron"),
            r#"[(key: "w", name: "White cube", value: Some(-1.0))]"#,
        )
        .unwrap();
        match load_catalog(&dir) {
            Err(DataLoadError::InvalidValue { key, .. }) => assert_eq!(key, "w"),
            other => panic!("expected InvalidValue, got: {other:?}"),
        }
        cleanup(&dir);
    }

    #[test]
    fn load_rejects_invalid_era() {
        let dir = make_test_dir("load_bad_era");
        fs::write(dir.join("units.ron"), UNITS_RON).unwrap();
        fs::write(dir.join("technologies.ron"), r#"[(name: "Warp Drive", era: 5)]"#).unwrap();
        match load_catalog(&dir) {
            Err(DataLoadError::InvalidEra { name, era, .. }) => {
                assert_eq!(name, "Warp Drive");
                assert_eq!(era, 5);
            }
            other => panic!("expected InvalidEra, got: {other:?}"),
        }
        cleanup(&dir);
    }

    #[test]
    fn load_surfaces_catalog_errors() {
        let dir = make_test_dir("load_dup");
        fs::write(
            dir.join("units.ron"),
            r#"[(key: "w", name: "White cube"), (key: "w", name: "Wheat")]"#,
        )
        .unwrap();
        match load_catalog(&dir) {
            Err(DataLoadError::Catalog(CatalogError::DuplicateKey { key, .. })) => {
                assert_eq!(key, "w")
            }
            other => panic!("expected DuplicateKey, got: {other:?}"),
        }
        cleanup(&dir);
    }

    #[test]
    fn load_rejects_reserved_key() {
        let dir = make_test_dir("load_reserved");
        fs::write(dir.join("units.ron"), r#"[(key: "w/b", name: "Either cube")]"#).unwrap();
        assert!(matches!(
            load_catalog(&dir),
            Err(DataLoadError::Catalog(CatalogError::InvalidKey { .. }))
        ));
        cleanup(&dir);
    }
}
