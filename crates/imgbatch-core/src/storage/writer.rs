//! Temp-file writer that finalizes by atomic rename.

use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use super::TEMP_SUFFIX;

/// An in-progress download. Dropped without `finalize`, the temp file is removed
/// and the final path is left untouched.
pub struct ImageFile {
    temp: NamedTempFile,
    final_path: PathBuf,
    file_mode: u32,
}

impl ImageFile {
    /// Create a unique temp file (`.<name>.XXXXXX.part`) in the final path's directory.
    /// The directory must already exist.
    pub fn create(final_path: &Path, file_mode: u32) -> io::Result<Self> {
        let dir = final_path.parent().unwrap_or_else(|| Path::new("."));
        let name = final_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let temp = tempfile::Builder::new()
            .prefix(&format!(".{}.", name))
            .suffix(TEMP_SUFFIX)
            .tempfile_in(dir)?;
        Ok(Self {
            temp,
            final_path: final_path.to_path_buf(),
            file_mode,
        })
    }

    /// Copy the whole body into the temp file. Returns bytes written.
    pub fn copy_from<R: Read + ?Sized>(&mut self, body: &mut R) -> io::Result<u64> {
        io::copy(body, self.temp.as_file_mut())
    }

    pub fn temp_path(&self) -> &Path {
        self.temp.path()
    }

    /// Sync, apply the configured mode, and rename onto the final path (replacing
    /// any existing file). Returns the handle rewound to offset 0; it still refers
    /// to the bytes this writer produced even if another rename lands afterwards.
    pub fn finalize(self) -> io::Result<File> {
        self.temp.as_file().sync_all()?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            self.temp
                .as_file()
                .set_permissions(std::fs::Permissions::from_mode(self.file_mode))?;
        }
        let mut file = self.temp.persist(&self.final_path).map_err(|e| e.error)?;
        file.seek(SeekFrom::Start(0))?;
        Ok(file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn part_files(dir: &Path) -> Vec<PathBuf> {
        std::fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().path())
            .filter(|p| p.to_string_lossy().ends_with(TEMP_SUFFIX))
            .collect()
    }

    #[test]
    fn write_and_finalize() {
        let dir = tempfile::tempdir().unwrap();
        let final_path = dir.path().join("cat.png");

        let mut img = ImageFile::create(&final_path, 0o644).unwrap();
        assert!(img.temp_path().file_name().unwrap().to_string_lossy().starts_with(".cat.png."));
        let n = img.copy_from(&mut Cursor::new(b"payload".to_vec())).unwrap();
        assert_eq!(n, 7);
        assert!(!final_path.exists());

        let mut handle = img.finalize().unwrap();
        let mut back = String::new();
        handle.read_to_string(&mut back).unwrap();
        assert_eq!(back, "payload");
        assert_eq!(std::fs::read(&final_path).unwrap(), b"payload");
        assert!(part_files(dir.path()).is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn finalize_applies_mode() {
        use std::os::unix::fs::PermissionsExt;
        let dir = tempfile::tempdir().unwrap();
        let final_path = dir.path().join("m.png");
        let mut img = ImageFile::create(&final_path, 0o640).unwrap();
        img.copy_from(&mut Cursor::new(vec![1u8, 2, 3])).unwrap();
        img.finalize().unwrap();
        let mode = std::fs::metadata(&final_path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o640);
    }

    #[test]
    fn finalize_replaces_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let final_path = dir.path().join("dup.png");
        std::fs::write(&final_path, b"old content that is longer").unwrap();

        let mut img = ImageFile::create(&final_path, 0o644).unwrap();
        img.copy_from(&mut Cursor::new(b"new".to_vec())).unwrap();
        img.finalize().unwrap();
        assert_eq!(std::fs::read(&final_path).unwrap(), b"new");
    }

    #[test]
    fn dropped_writer_leaves_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let final_path = dir.path().join("gone.png");
        {
            let mut img = ImageFile::create(&final_path, 0o644).unwrap();
            img.copy_from(&mut Cursor::new(b"partial".to_vec())).unwrap();
        }
        assert!(!final_path.exists());
        assert!(part_files(dir.path()).is_empty());
    }

    #[test]
    fn handle_survives_later_rename() {
        let dir = tempfile::tempdir().unwrap();
        let final_path = dir.path().join("race.png");

        let mut first = ImageFile::create(&final_path, 0o644).unwrap();
        first.copy_from(&mut Cursor::new(b"first".to_vec())).unwrap();
        let mut second = ImageFile::create(&final_path, 0o644).unwrap();
        second.copy_from(&mut Cursor::new(b"second".to_vec())).unwrap();

        let mut first_handle = first.finalize().unwrap();
        second.finalize().unwrap();

        let mut own = String::new();
        first_handle.read_to_string(&mut own).unwrap();
        assert_eq!(own, "first");
        assert_eq!(std::fs::read(&final_path).unwrap(), b"second");
    }
}
