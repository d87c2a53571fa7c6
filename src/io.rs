//! Byte sources and sinks the codec reads from and writes to.

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use tempfile::{Builder, NamedTempFile};

use crate::error::Result;

pub trait ByteSource {
    fn size(&self) -> Result<u64>;
    fn read_all(&mut self) -> Result<Vec<u8>>;
}

/// Destination for codec output. Written bytes only become visible at the
/// destination once `commit` succeeds.
pub trait ByteSink {
    fn write_bytes(&mut self, data: &[u8]) -> Result<()>;
    fn commit(self) -> Result<()>;
}

pub struct FileSource {
    file: File,
}

impl FileSource {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Ok(Self { file })
    }
}

impl ByteSource for FileSource {
    fn size(&self) -> Result<u64> {
        Ok(self.file.metadata()?.len())
    }

    fn read_all(&mut self) -> Result<Vec<u8>> {
        let mut data = Vec::with_capacity(self.size().unwrap_or_default() as usize);
        self.file.read_to_end(&mut data)?;
        Ok(data)
    }
}

/// Writes into a temporary file beside `path` and renames it into place on
/// commit. Dropping the sink uncommitted removes the temporary file.
///
/// The committed file gets the permissions `File::create` would give it, or
/// keeps those of the file it replaces.
pub struct FileSink {
    path: PathBuf,
    file: NamedTempFile,
}

impl FileSink {
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        #[cfg_attr(not(unix), allow(unused_mut))]
        let mut builder = Builder::new();
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            // Same creation mode as `File::create`; the umask still applies.
            builder.permissions(fs::Permissions::from_mode(0o666));
        }
        let file = builder.tempfile_in(dir)?;

        if let Ok(existing) = fs::metadata(&path) {
            file.as_file().set_permissions(existing.permissions())?;
        }
        Ok(Self { path, file })
    }
}

impl ByteSink for FileSink {
    fn write_bytes(&mut self, data: &[u8]) -> Result<()> {
        self.file.write_all(data)?;
        Ok(())
    }

    fn commit(mut self) -> Result<()> {
        self.file.flush()?;
        self.file.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }
}

impl ByteSource for &[u8] {
    fn size(&self) -> Result<u64> {
        Ok(self.len() as u64)
    }

    fn read_all(&mut self) -> Result<Vec<u8>> {
        Ok(self.to_vec())
    }
}

impl ByteSink for &mut Vec<u8> {
    fn write_bytes(&mut self, data: &[u8]) -> Result<()> {
        self.extend_from_slice(data);
        Ok(())
    }

    fn commit(self) -> Result<()> {
        Ok(())
    }
}
