use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use std::fs;
use std::io::{Read, Write};
use std::path::Path;

fn describe(path: Option<&Path>) -> String {
    match path {
        Some(path) if path != Path::new("-") => path.display().to_string(),
        _ => "stdin".to_string(),
    }
}

/// Bytes from `path`, or stdin when it is absent or `-`.
pub fn read_bytes(path: Option<&Path>) -> Result<Vec<u8>> {
    match path {
        Some(path) if path != Path::new("-") => fs::read(path).or_raise(|| ErrorKind::Read(describe(Some(path)))),
        _ => {
            let mut bytes = Vec::new();
            std::io::stdin().lock().read_to_end(&mut bytes).or_raise(|| ErrorKind::Read(describe(None)))?;
            Ok(bytes)
        },
    }
}

/// Text from `path` or stdin. Invalid UTF-8 is replaced rather than rejected.
pub fn read_input(path: Option<&Path>) -> Result<String> {
    let bytes = read_bytes(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Write to `path`, or stdout when it is absent or `-`.
pub fn write_output(path: Option<&Path>, bytes: &[u8]) -> Result<()> {
    match path {
        Some(path) if path != Path::new("-") => {
            fs::write(path, bytes).or_raise(|| ErrorKind::Write(path.display().to_string()))?;
            tracing::debug!(path = %path.display(), bytes = bytes.len(), "wrote output");
        },
        _ => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(bytes)
                .and_then(|()| stdout.flush())
                .or_raise(|| ErrorKind::Write("stdout".to_string()))?;
        },
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("batch.txt");
        write_output(Some(&path), "a.com\n\u{fffd}".as_bytes()).unwrap();
        assert_eq!(read_input(Some(&path)).unwrap(), "a.com\n\u{fffd}");
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("latin1.txt");
        fs::write(&path, b"caf\xe9.com").unwrap();
        assert_eq!(read_input(Some(&path)).unwrap(), "caf\u{fffd}.com");
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.txt");
        let err = read_input(Some(&path)).unwrap_err();
        assert_eq!(*err, ErrorKind::Read(path.display().to_string()));
    }
}
