/*
 * Copyright © 2025, United States Government, as represented by the Administrator of 
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The “ODIN” software is licensed under the Apache License, Version 2.0 (the "License"); 
 * you may not use this file except in compliance with the License. You may obtain a copy 
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */
use std::fs::{self,File};
use std::io::{self,Read,Write,ErrorKind};
use std::path::{Path,PathBuf};
use tempfile::NamedTempFile;

use crate::io_error;

type Result<T> = std::result::Result<T,std::io::Error>;

/// check if dir pathname exists and is writable, try to create dir otherwise
pub fn ensure_writable_dir (path: impl AsRef<Path>) -> io::Result<()> {
    let path = path.as_ref();
    if path.is_dir() {
        let md = fs::metadata(&path)?;
        if md.permissions().readonly() {
            Err(io_error!(ErrorKind::PermissionDenied, "output_dir {:?} not writable", &path))
        } else {
            Ok(())
        }

    } else {
        fs::create_dir_all(path)
    }
}

/// the directory a file path lives in. Bare filenames resolve to the current dir
pub fn parent_dir (path: impl AsRef<Path>)->PathBuf {
    match path.as_ref().parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from(".")
    }
}

pub fn file_contents_as_string (file: &mut File) -> Result<String> {
    let len = file.metadata()?.len();
    let mut contents = String::with_capacity(len as usize);
    file.read_to_string(&mut contents)?;
    Ok(contents)
}

pub fn filepath_contents_as_string <P: AsRef<Path>> (path: &P) -> Result<String> {
    let mut file = File::open(path)?;
    file_contents_as_string( &mut file)
}

/// a temp file in the same directory as `path` so that a subsequent [`persist_tmp`] is a rename on the same filesystem
pub fn tmp_file_for (path: impl AsRef<Path>)->Result<NamedTempFile> {
    let dir = parent_dir( path);
    ensure_writable_dir( &dir)?;
    NamedTempFile::new_in( dir)
}

/// make a completely written temp file visible under its permanent name, replacing what was there before
pub fn persist_tmp (file: NamedTempFile, path: impl AsRef<Path>)->Result<()> {
    file.persist( path.as_ref()).map_err( |e| e.error)?;
    Ok(())
}

/// replace the contents of the file at `path`. Readers never see a partially written file
pub fn set_filepath_contents (path: impl AsRef<Path>, new_contents: &[u8]) -> Result<()>  {
    let path = path.as_ref();
    let mut file = tmp_file_for( path)?;
    file.write_all( new_contents)?;
    file.flush()?;
    persist_tmp( file, path)
}
