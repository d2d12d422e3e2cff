use serde::{de::DeserializeOwned, Serialize};
use std::{
    fs::{self, File},
    io::{self, BufReader},
    path::Path,
};

pub mod error {
    use std::{io, path::PathBuf};

    pub type Result<T> = std::result::Result<T, self::Error>;

    type Msg = &'static str;

    #[derive(Debug, thiserror::Error)]
    pub enum Error {
        #[error("{0} ({1}): {2}")]
        SingleIO(Msg, PathBuf, #[source] io::Error),

        #[error("Cannot serialize to JSON (dest='{0}'): {1}")]
        SerializeToJson(PathBuf, #[source] serde_json::Error),

        #[error("Cannot deserialize from JSON (src='{0}'): {1}")]
        DeserializeFromJson(PathBuf, #[source] serde_json::Error),
    }

    impl Error {
        pub fn is_not_found(&self) -> bool {
            matches!(self, Error::SingleIO(_, _, e) if e.kind() == io::ErrorKind::NotFound)
        }
    }
}
pub use error::{Error, Result};

#[must_use]
pub fn mkdir_all(path: impl AsRef<Path>) -> Result<()> {
    let dir = path.as_ref();
    fs::create_dir_all(dir).map_err(|e| Error::SingleIO("Cannot create dir", dir.to_owned(), e))
}

#[must_use]
pub fn write<P, C>(filepath: P, contents: C) -> Result<()>
where
    P: AsRef<Path>,
    C: AsRef<[u8]>,
{
    fs::write(&filepath, contents)
        .map_err(|e| Error::SingleIO("Cannot write file", filepath.as_ref().to_owned(), e))
}

#[must_use]
pub fn write_with_mkdir<P, C>(filepath: P, contents: C) -> Result<()>
where
    P: AsRef<Path>,
    C: AsRef<[u8]>,
{
    if let Some(dir) = filepath.as_ref().parent() {
        self::mkdir_all(dir)?;
    }
    self::write(filepath, contents)
}

/// Create (or truncate) a file, creating its parent dirs first.
#[must_use]
pub fn create_with_mkdir(filepath: impl AsRef<Path>) -> Result<File> {
    let filepath = filepath.as_ref();
    if let Some(dir) = filepath.parent() {
        self::mkdir_all(dir)?;
    }
    File::create(filepath)
        .map_err(|e| Error::SingleIO("Cannot create file", filepath.to_owned(), e))
}

#[must_use]
pub fn read_to_string(filepath: impl AsRef<Path>) -> Result<String> {
    fs::read_to_string(&filepath)
        .map_err(|e| Error::SingleIO("Cannot read file", filepath.as_ref().to_owned(), e))
}

#[must_use]
pub fn remove_file(filepath: impl AsRef<Path>) -> Result<()> {
    fs::remove_file(&filepath)
        .map_err(|e| Error::SingleIO("Cannot remove file", filepath.as_ref().to_owned(), e))
}

#[must_use]
pub fn write_json_with_mkdir<P, T>(filepath: P, data: &T) -> Result<()>
where
    P: AsRef<Path>,
    T: Serialize,
{
    let s = serde_json::to_string_pretty(data)
        .map_err(|e| Error::SerializeToJson(filepath.as_ref().to_owned(), e))?;
    write_with_mkdir(filepath, &s)
}

#[must_use]
pub fn read_json_with_deserialize<P, T>(filepath: P) -> Result<T>
where
    P: AsRef<Path>,
    T: DeserializeOwned,
{
    let filepath = filepath.as_ref();
    let f = File::open(filepath)
        .map_err(|e| Error::SingleIO("Cannot read file", filepath.to_owned(), e))?;
    serde_json::from_reader(BufReader::new(f))
        .map_err(|e| Error::DeserializeFromJson(filepath.to_owned(), e))
}

/// Wrap an I/O error raised while writing into `filepath`.
pub fn write_error(filepath: impl AsRef<Path>, e: io::Error) -> Error {
    Error::SingleIO("Cannot write file", filepath.as_ref().to_owned(), e)
}

#[cfg(test)]
mod test {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
    struct Marker {
        id: String,
        done: bool,
    }

    #[test]
    fn write_with_mkdir_creates_missing_parents() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("a").join("b").join("c.txt");

        write_with_mkdir(&path, "hello").unwrap();

        assert_eq!(read_to_string(&path).unwrap(), "hello");
    }

    #[test]
    fn create_with_mkdir_truncates_existing_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested").join("file.txt");
        write_with_mkdir(&path, "old contents").unwrap();

        drop(create_with_mkdir(&path).unwrap());

        assert_eq!(read_to_string(&path).unwrap(), "");
    }

    #[test]
    fn json_written_can_be_read_back() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("dir").join(".marker.json");
        let data = Marker {
            id: "abc".to_owned(),
            done: true,
        };

        write_json_with_mkdir(&path, &data).unwrap();
        let got: Marker = read_json_with_deserialize(&path).unwrap();

        assert_eq!(got, data);
    }

    #[test]
    fn missing_file_is_reported_as_not_found() {
        let tmp = TempDir::new().unwrap();
        let err = read_to_string(tmp.path().join("nope")).unwrap_err();
        assert!(err.is_not_found());

        let err = read_json_with_deserialize::<_, Marker>(tmp.path().join("nope")).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn broken_json_is_a_deserialize_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("broken.json");
        write(&path, "{ not json").unwrap();

        let err = read_json_with_deserialize::<_, Marker>(&path).unwrap_err();
        assert!(matches!(err, Error::DeserializeFromJson(p, _) if p == path));
    }
}
