// SPDX-License-Identifier: PMPL-1.0-or-later
//! `dump-schema`: export the GraphQL schema in Schema Definition Language

use std::{
    io::Write,
    path::{Path, PathBuf},
};

use clap::Args;
use tracing::info;

use crate::{
    error::{BundleError, Result},
    sdl::{print_schema, PrintOptions, SchemaSource},
};

/// Export the GraphQL schema in Schema Definition Language (SDL)
#[derive(Debug, Clone, Default, Args)]
pub struct DumpSchemaCommand {
    /// Write output to file
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Where the dumped schema went
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DumpOutcome {
    Stdout,
    File(PathBuf),
}

impl DumpSchemaCommand {
    pub fn execute<S, W>(&self, schema: &S, options: &PrintOptions, stdout: &mut W) -> Result<DumpOutcome>
    where
        S: SchemaSource + ?Sized,
        W: Write,
    {
        let sdl = print_schema(schema, options)?;

        match &self.output {
            Some(path) => {
                write_file(path, &sdl)?;
                info!(path = %path.display(), bytes = sdl.len(), "Schema exported");
                writeln!(stdout, "Data written to {}.", path.display())?;
                Ok(DumpOutcome::File(path.clone()))
            }
            None => {
                stdout.write_all(sdl.as_bytes())?;
                stdout.flush()?;
                Ok(DumpOutcome::Stdout)
            }
        }
    }
}

fn write_file(path: &Path, sdl: &str) -> Result<()> {
    std::fs::write(path, sdl).map_err(|source| BundleError::Write {
        path: path.to_path_buf(),
        source,
    })
}
