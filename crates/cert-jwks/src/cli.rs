//! Argument parsing and the build loop.
//!
//! Each input is an independent build: one certificate in, one JWK Set
//! document out. Processing stops at the first input that fails.

use clap::Parser;
use jwks_core::certificate::MAX_INPUT_SIZE;
use jwks_core::{Certificate, JwksError, JwksOptions, KeyEncoder, KeySetBuilder, KeyUsage};
use std::fmt;
use std::fs::File;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use thiserror::Error;

const STDIN_MARKER: &str = "-";

#[derive(Parser, Debug)]
#[command(name = "cert-jwks")]
#[command(about = "Publish the public key of an X.509 certificate as a JWK Set")]
pub struct Args {
    /// Declared key usage: verification (sig) or encryption (enc)
    #[arg(short = 'u', long)]
    pub key_usage: Option<KeyUsage>,

    /// Include the end-entity certificate in x5c
    #[arg(long)]
    pub include_certificate: bool,

    /// Include the end-entity certificate and its issuers in x5c
    #[arg(long)]
    pub include_certificate_chain: bool,

    /// Emit compact JSON instead of indented JSON
    #[arg(short, long)]
    pub compress: bool,

    /// Write log lines as JSON
    #[arg(long)]
    pub json_logs: bool,

    /// PEM or DER certificate files ("-" reads standard input, at most once)
    pub files: Vec<PathBuf>,
}

impl Args {
    /// Options given explicitly on the command line.
    ///
    /// A switch that was not passed stays unset so configured defaults can
    /// fill it.
    pub fn options(&self) -> JwksOptions {
        JwksOptions {
            key_usage: self.key_usage,
            include_certificate: self.include_certificate.then_some(true),
            include_certificate_chain: self.include_certificate_chain.then_some(true),
            compress: self.compress.then_some(true),
        }
    }

    /// Inputs in command-line order. No files means standard input.
    ///
    /// # Errors
    ///
    /// Returns `CliError::RepeatedStdin` if `-` is given more than once.
    pub fn inputs(&self) -> Result<Vec<Input>, CliError> {
        if self.files.is_empty() {
            return Ok(vec![Input::Stdin]);
        }

        let inputs: Vec<Input> = self
            .files
            .iter()
            .map(|path| {
                if path.as_os_str() == STDIN_MARKER {
                    Input::Stdin
                } else {
                    Input::File(path.clone())
                }
            })
            .collect();

        if inputs.iter().filter(|input| **input == Input::Stdin).count() > 1 {
            return Err(CliError::RepeatedStdin);
        }
        Ok(inputs)
    }
}

/// Where one certificate is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Stdin,
    File(PathBuf),
}

impl fmt::Display for Input {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Input::Stdin => f.write_str("<stdin>"),
            Input::File(path) => write!(f, "{}", path.display()),
        }
    }
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Failed to read {input}: {source}")]
    Read { input: String, source: io::Error },

    #[error("{input}: {source}")]
    Build { input: String, source: JwksError },

    #[error("Standard input ('-') can only be given once")]
    RepeatedStdin,

    #[error("Failed to write output: {0}")]
    Write(#[from] io::Error),
}

/// Build one document per input and write each, newline-terminated, to `out`.
///
/// Returns the number of documents written.
///
/// # Errors
///
/// Stops at the first input that cannot be read or built. Documents for
/// earlier inputs have already been written.
pub fn run<E, R, W>(
    builder: &KeySetBuilder<E>,
    inputs: &[Input],
    options: &JwksOptions,
    mut stdin: R,
    mut out: W,
) -> Result<usize, CliError>
where
    E: KeyEncoder,
    R: Read,
    W: Write,
{
    let mut published = 0;

    for input in inputs {
        let bytes = read_input(input, &mut stdin).map_err(|source| CliError::Read {
            input: input.to_string(),
            source,
        })?;

        tracing::debug!(
            target: "cert_jwks.cli",
            input = %input,
            bytes = bytes.len(),
            "Read certificate input"
        );

        let json = Certificate::from_bytes(&bytes)
            .and_then(|certificate| builder.build(&certificate, options))
            .map_err(|source| CliError::Build {
                input: input.to_string(),
                source,
            })?;

        writeln!(out, "{}", json)?;
        published += 1;

        tracing::info!(target: "cert_jwks.cli", input = %input, "Published JWK Set");
    }

    out.flush()?;
    Ok(published)
}

/// Read at most one byte past the size limit so oversized input is rejected
/// by the loader without buffering all of it.
fn read_input<R: Read>(input: &Input, stdin: &mut R) -> io::Result<Vec<u8>> {
    let limit = MAX_INPUT_SIZE as u64 + 1;
    let mut bytes = Vec::new();

    match input {
        Input::Stdin => {
            stdin.by_ref().take(limit).read_to_end(&mut bytes)?;
        }
        Input::File(path) => {
            File::open(path)?.take(limit).read_to_end(&mut bytes)?;
        }
    }

    Ok(bytes)
}
