use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use csv::{ErrorKind, ReaderBuilder, StringRecord};
use thiserror::Error;

use super::model::{Dataset, PubRecord};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Fatal load failures. A row with bad coordinates is never one of these;
/// it is simply left out of the dataset.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot open pub data file {path}: {source}", path = .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot read pub data file {path}: {source}", path = .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    /// Read failure from a source with no file name (see [`load_reader`]).
    #[error("failed reading pub data: {0}")]
    Stream(#[from] csv::Error),
}

// ---------------------------------------------------------------------------
// Column layout
// ---------------------------------------------------------------------------

/// Positions of the nine columns. The header row is skipped and never
/// consulted, so only the order matters.
mod column {
    pub const FSA_ID: usize = 0;
    pub const NAME: usize = 1;
    pub const ADDRESS: usize = 2;
    pub const POSTCODE: usize = 3;
    pub const EASTING: usize = 4;
    pub const NORTHING: usize = 5;
    pub const LATITUDE: usize = 6;
    pub const LONGITUDE: usize = 7;
    pub const LOCAL_AUTHORITY: usize = 8;
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load and clean the pub CSV at `path`.
///
/// Layout: one header row, then
/// `fsaID, name, address, postcode, easting, northing, latitude, longitude, localAuthority`.
/// Rows whose latitude or longitude is blank, non-numeric or non-finite are
/// dropped.
pub fn load_file(path: &Path) -> Result<Dataset, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let dataset = load_reader(file).map_err(|e| match e {
        LoadError::Stream(source) => LoadError::Read {
            path: path.to_path_buf(),
            source,
        },
        other => other,
    })?;
    log::info!("Loaded {} pubs from {}", dataset.len(), path.display());
    Ok(dataset)
}

/// Same as [`load_file`] but from any byte source.
pub fn load_reader<R: Read>(source: R) -> Result<Dataset, LoadError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(source);

    let mut records = Vec::new();
    let mut dropped = 0usize;

    for (row_no, result) in reader.records().enumerate() {
        let raw = match result {
            Ok(raw) => raw,
            Err(e) if matches!(e.kind(), ErrorKind::Io(_)) => return Err(e.into()),
            Err(e) => {
                log::debug!("CSV row {row_no}: unreadable, skipping ({e})");
                dropped += 1;
                continue;
            }
        };

        match clean_row(&raw) {
            Some(record) => records.push(record),
            None => {
                log::debug!("CSV row {row_no}: invalid coordinates, skipping");
                dropped += 1;
            }
        }
    }

    log::info!("Kept {} rows, dropped {dropped}", records.len());
    Ok(Dataset::from_records(records))
}

// ---------------------------------------------------------------------------
// Row cleaning
// ---------------------------------------------------------------------------

fn clean_row(raw: &StringRecord) -> Option<PubRecord> {
    let field = |idx: usize| raw.get(idx).unwrap_or("");

    let latitude = parse_coordinate(field(column::LATITUDE))?;
    let longitude = parse_coordinate(field(column::LONGITUDE))?;

    Some(PubRecord {
        id: field(column::FSA_ID).to_string(),
        name: field(column::NAME).to_string(),
        address: field(column::ADDRESS).to_string(),
        postcode: field(column::POSTCODE).to_string(),
        easting: parse_coordinate(field(column::EASTING)),
        northing: parse_coordinate(field(column::NORTHING)),
        latitude,
        longitude,
        authority: field(column::LOCAL_AUTHORITY).to_string(),
    })
}

/// Numeric coercion: anything that is not a finite number becomes `None`.
fn parse_coordinate(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use rstest::rstest;
    use tempfile::NamedTempFile;

    use super::*;

    const HEADER: &str =
        "fsa_id,name,address,postcode,easting,northing,latitude,longitude,local_authority\n";

    fn load_str(body: &str) -> Dataset {
        load_reader(format!("{HEADER}{body}").as_bytes()).expect("in-memory CSV loads")
    }

    #[rstest]
    #[case("51.5", Some(51.5))]
    #[case(" -0.08 ", Some(-0.08))]
    #[case("", None)]
    #[case("\\N", None)]
    #[case("abc", None)]
    #[case("NaN", None)]
    #[case("inf", None)]
    fn coerces_coordinates(#[case] input: &str, #[case] expected: Option<f64>) {
        assert_eq!(parse_coordinate(input), expected);
    }

    #[rstest]
    fn parses_well_formed_row() {
        let ds = load_str(
            "22,Anchor,\"Bankside, London\",SE1 9EF,532385,180470,51.507,-0.094,Southwark\n",
        );

        assert_eq!(ds.len(), 1);
        let r = &ds.records()[0];
        assert_eq!(r.id, "22");
        assert_eq!(r.name, "Anchor");
        assert_eq!(r.address, "Bankside, London");
        assert_eq!(r.postcode, "SE1 9EF");
        assert_eq!(r.easting, Some(532385.0));
        assert_eq!(r.northing, Some(180470.0));
        assert_eq!(r.latitude, 51.507);
        assert_eq!(r.longitude, -0.094);
        assert_eq!(r.authority, "Southwark");
    }

    #[rstest]
    fn drops_rows_with_bad_coordinates() {
        let ds = load_str(concat!(
            "1,Good,a,OX1 1AA,1,1,51.75,-1.25,Oxford\n",
            "2,NoLat,a,OX1 1AA,1,1,\\N,-1.25,Oxford\n",
            "3,NoLon,a,OX1 1AA,1,1,51.75,,Oxford\n",
            "4,Text,a,OX1 1AA,1,1,north,west,Oxford\n",
            "5,Short,a,OX1 1AA\n",
        ));

        let names: Vec<_> = ds.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Good"]);
        assert!(ds
            .iter()
            .all(|r| r.latitude.is_finite() && r.longitude.is_finite()));
    }

    #[rstest]
    fn header_names_are_ignored() {
        let ds = load_reader(
            "a,b,c,d,e,f,g,h,i\n1,Bell,x,W1 1AA,,,51.5,-0.1,Westminster\n".as_bytes(),
        )
        .expect("loads");

        assert_eq!(ds.len(), 1);
        assert_eq!(ds.records()[0].authority, "Westminster");
        assert_eq!(ds.records()[0].easting, None);
    }

    #[rstest]
    fn header_only_file_is_empty_dataset() {
        assert!(load_str("").is_empty());
    }

    #[rstest]
    fn loads_from_disk() {
        let mut file = NamedTempFile::new().expect("temp file");
        writeln!(file, "{HEADER}1,Bell,x,W1 1AA,1,1,51.5,-0.1,Westminster").expect("write");

        let ds = load_file(file.path()).expect("load temp file");
        assert_eq!(ds.len(), 1);
    }

    #[rstest]
    fn unreadable_file_is_read_error_naming_path() {
        let dir = tempfile::tempdir().expect("tempdir");

        let err = load_file(dir.path()).expect_err("a directory is not a CSV file");

        assert!(matches!(err, LoadError::Read { .. }), "got {err:?}");
        assert!(err.to_string().contains(&dir.path().display().to_string()));
    }

    /// Byte source that fails on the first read.
    struct BrokenSource;

    impl Read for BrokenSource {
        fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
            Err(std::io::Error::other("disk went away"))
        }
    }

    #[rstest]
    fn failing_reader_is_stream_error() {
        let err = load_reader(BrokenSource).expect_err("io failure is fatal");

        assert!(matches!(err, LoadError::Stream(_)));
        assert!(err.to_string().contains("disk went away"));
    }

    #[rstest]
    fn missing_file_is_open_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("missing.csv");

        let err = load_file(&path).expect_err("missing file must fail");
        assert!(matches!(err, LoadError::Open { .. }));
        assert!(err.to_string().contains("missing.csv"));
    }
}
