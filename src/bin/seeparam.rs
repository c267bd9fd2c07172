//! Demonstration tool that prints the memory-layout report for a
//! program-parameters record.
//!
//! With no arguments a built-in sample layout is shown. Pass the path of
//! a JSON-encoded record (or `-` for standard input) to inspect a
//! captured one.

use anyhow::{bail, Context, Result};
use progparam::{logging, report, ProgParams, ReportOptions, SegAddr};
use std::io::{self, Read};

const USAGE: &str = "\
usage: seeparam [OPTIONS] [PATH]

Prints the memory-layout report for a program-parameters record.

  PATH           JSON-encoded record; `-` reads standard input. When
                 omitted, a built-in sample layout is reported.
  --separate-id  include the constant-data range (separate-I&D builds)
  --all          also show the fields unused on current targets
  --flat         append flat physical spans to each segmented line
  -h, --help     show this message
";

fn main() -> Result<()> {
    logging::init_tracing();

    let mut options = ReportOptions::default();
    let mut path: Option<String> = None;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--separate-id" => options.separate_inst_data = true,
            "--all" => options.show_unused = true,
            "--flat" => options.show_linear = true,
            "-h" | "--help" => {
                print!("{}", USAGE);
                return Ok(());
            }
            other if other.starts_with('-') && other != "-" => {
                bail!("unknown option `{}`\n{}", other, USAGE);
            }
            _ => {
                if path.replace(arg.clone()).is_some() {
                    bail!("at most one PATH may be given\n{}", USAGE);
                }
            }
        }
    }

    let params = match path.as_deref() {
        None => sample_params(),
        Some("-") => {
            let mut json = String::new();
            io::stdin()
                .read_to_string(&mut json)
                .context("reading record from standard input")?;
            ProgParams::from_json(&json).context("decoding record from standard input")?
        }
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading record from {}", path))?;
            ProgParams::from_json(&json)
                .with_context(|| format!("decoding record from {}", path))?
        }
    };
    params.validate().context("record failed validation")?;

    let stdout = io::stdout();
    report::render(&params, &options, &mut stdout.lock())?;
    Ok(())
}

/// A layout representative of a small separate-I&D build: code and
/// constants low in flash, data under DATASEG, xmem code through the
/// paging window.
fn sample_params() -> ProgParams {
    ProgParams {
        root_code_begin: SegAddr::new(0x00, 0x0000),
        root_code_end: SegAddr::new(0x00, 0x5fff),
        xmem_code_begin: SegAddr::new(0xf5, 0xe000),
        xmem_code_end: SegAddr::new(0xf8, 0xe7ff),
        root_data_begin: SegAddr::new(0x7a, 0x7000),
        root_data_end: SegAddr::new(0x7a, 0xafff),
        xmem_data_begin: SegAddr::new(0x00, 0x0000),
        xmem_data_end: SegAddr::new(0x00, 0x0000),
        constant_begin: SegAddr::new(0x00, 0x6000),
        constant_end: SegAddr::new(0x00, 0x6fff),
        highest_program_addr: SegAddr::new(0xf8, 0xe7ff),
        aux_stack_begin: 0,
        aux_stack_end: 0,
        stack_begin: 0xd000,
        stack_end: 0xdfff,
        free_begin: 0,
        free_end: 0,
        heap_begin: 0,
        heap_end: 0,
    }
}
