use super::Backend;
use crate::Result;

use memmap2::Mmap;
use std::{fs, path::Path};

/// Input file backed by a physical file on disk
#[derive(Debug)]
pub struct Physical {
    data: Mmap,
}

impl Physical {
    /// Create a new physical backend
    ///
    /// ## Arguments
    /// * 'path' - The file path to use
    pub fn new(path: &Path) -> Result<Physical> {
        let file = fs::File::open(path)?;
        let data = unsafe { Mmap::map(&file)? };

        Ok(Physical { data })
    }
}

impl Backend for Physical {
    fn data(&self) -> &[u8] {
        self.data.as_ref()
    }

    fn len(&self) -> usize {
        self.data.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn physical() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"XNB payload").unwrap();
        file.flush().unwrap();

        let physical = Physical::new(file.path()).unwrap();

        assert_eq!(physical.len(), 11);
        assert_eq!(physical.data()[0], b'X');
        assert_eq!(&physical.data()[..3], b"XNB");
    }

    #[test]
    fn physical_invalid_file_path() {
        let result = Physical::new(Path::new("/nonexistent/path/to/file.xnb"));
        assert!(result.is_err());
        match result.unwrap_err() {
            crate::Error::Io(io_error) => {
                assert_eq!(io_error.kind(), std::io::ErrorKind::NotFound);
            }
            _ => panic!("Expected Io error"),
        }
    }
}
