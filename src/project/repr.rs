//! Project configuration file representation

use crate::database;
use crate::project::program::Program;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::{fs, io};
use tracing::debug;

pub const DEFAULT_PROJECT_FILE: &str = "sfcdis.json";

/// In-memory representation of the current project configuration.
///
/// This file is typically read from a file named `sfcdis.json`, and it
/// contains settings for every program in the project.
#[derive(Serialize, Deserialize, Debug, Default)]
pub struct Project {
    #[serde(default)]
    programs: BTreeMap<String, Program>,

    /// Directory that relative paths in the project are resolved against.
    #[serde(skip)]
    root: PathBuf,
}

impl Project {
    pub fn read<P>(filename: P) -> io::Result<Self>
    where
        P: AsRef<Path>,
    {
        let filename = filename.as_ref();
        let project_file = io::BufReader::new(fs::File::open(filename)?);
        let mut project: Self = serde_json::from_reader(project_file)?;

        for (name, prog) in project.programs.iter_mut() {
            if prog.as_name().is_none() {
                prog.set_name(name);
            }
        }

        project.root = filename
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();

        Ok(project)
    }

    /// Read a project file, treating a missing file as an empty project.
    pub fn read_or_default<P>(filename: P) -> io::Result<Self>
    where
        P: AsRef<Path>,
    {
        match Self::read(filename.as_ref()) {
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(
                    "No project file at {}, using command line settings only",
                    filename.as_ref().display()
                );
                Ok(Self::default())
            }
            result => result,
        }
    }

    /// Get the program with the given name within the project.
    pub fn program(&self, name: &str) -> Option<&Program> {
        self.programs.get(name)
    }

    /// Get the project's default program.
    pub fn default_program(&self) -> Option<(&String, &Program)> {
        self.programs.iter().next()
    }

    pub fn iter_programs(&self) -> impl Iterator<Item = (&str, &Program)> {
        self.programs.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Combine the project's settings for a program with command line
    /// overrides.
    ///
    /// With no name given, the first program in the project is used, if any.
    /// A named program missing from the project is an error.
    pub fn resolve_program(
        &self,
        name: Option<&str>,
        overrides: &Program,
    ) -> database::Result<Program> {
        let base = match name {
            Some(name) => self
                .program(name)
                .ok_or_else(|| database::Error::UnknownProgram(name.to_string()))?,
            None => match self.default_program() {
                Some((_, prog)) => prog,
                None => return Ok(overrides.clone()),
            },
        };

        Ok(base.apply_override(overrides))
    }

    /// Resolve a path relative to the project file's directory.
    pub fn resolve_path<P>(&self, path: P) -> PathBuf
    where
        P: AsRef<Path>,
    {
        self.root.join(path)
    }

    /// Where a program's database lives on disk.
    pub fn database_path(&self, prog: &Program) -> PathBuf {
        prog.as_database_path().to_path(&self.root)
    }
}
