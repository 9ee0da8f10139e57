//! Output tree preparation and zip packing.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;

use walkdir::WalkDir;
use zip::result::ZipResult;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Sub-directories every exported tree has, empty or not.
pub const TREE_DIRECTORIES: [&str; 3] = ["Supp", "Star", "Sid"];

/// Remove any previous export at `root` and create an empty tree.
pub fn prepare_output_dir(root: &Path) -> io::Result<()> {
    match fs::remove_dir_all(root) {
        Err(e) if e.kind() != io::ErrorKind::NotFound => return Err(e),
        _ => {}
    }
    for directory in TREE_DIRECTORIES {
        fs::create_dir_all(root.join(directory))?;
    }
    Ok(())
}

/// Copy a file at the root of the tree, keeping its name.
pub fn copy_into(root: &Path, file: &Path) -> io::Result<()> {
    let name = file
        .file_name()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, format!("not a file: {}", file.display())))?;
    fs::copy(file, root.join(name))?;
    Ok(())
}

/// Pack every file below `root` into a deflated zip archive.
///
/// Entry names are relative to `root` with `/` separators, in file name order.
pub fn pack_directory(root: &Path, archive: &Path) -> ZipResult<()> {
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .compression_level(Some(9));
    let mut zip = ZipWriter::new(File::create(archive)?);

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(io::Error::from)?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Ok(relative) = entry.path().strip_prefix(root) else {
            continue;
        };
        let name = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        zip.start_file(name, options)?;
        zip.write_all(&fs::read(entry.path())?)?;
    }
    zip.finish()?;
    tracing::info!("Packed {} into {}", root.display(), archive.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use zip::ZipArchive;

    #[test]
    fn output_dir_is_recreated() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("iFly");
        fs::create_dir_all(root.join("Old")).unwrap();
        fs::write(root.join("Old/stale.sid"), "stale").unwrap();

        prepare_output_dir(&root).unwrap();
        let mut names: Vec<_> = fs::read_dir(&root)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().into_string().unwrap())
            .collect();
        names.sort();
        assert_eq!(names, ["Sid", "Star", "Supp"]);

        let fresh = tmp.path().join("fresh");
        prepare_output_dir(&fresh).unwrap();
        assert!(fresh.join("Supp").is_dir());
    }

    #[test]
    fn archive_has_relative_entries() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("iFly");
        prepare_output_dir(&root).unwrap();
        fs::write(root.join("Sid/ZZZZ.sid"), "[list]").unwrap();
        fs::write(root.join("Supp/ZZZZ.supp"), "[Speed_Transition]").unwrap();
        let notes = tmp.path().join("Installation.txt");
        fs::write(&notes, "copy to the navdata folder").unwrap();
        copy_into(&root, &notes).unwrap();

        let archive_path = tmp.path().join("iFly.zip");
        pack_directory(&root, &archive_path).unwrap();

        let mut archive = ZipArchive::new(File::open(&archive_path).unwrap()).unwrap();
        let mut names = Vec::new();
        for i in 0..archive.len() {
            names.push(archive.by_index(i).unwrap().name().to_string());
        }
        assert_eq!(names, ["Installation.txt", "Sid/ZZZZ.sid", "Supp/ZZZZ.supp"]);

        let mut contents = String::new();
        archive
            .by_name("Sid/ZZZZ.sid")
            .unwrap()
            .read_to_string(&mut contents)
            .unwrap();
        assert_eq!(contents, "[list]");
    }
}
