//! The memory-layout report.
//!
//! Renders the classic diagnostic tour of a program-parameters record,
//! one line per region, in the exact format the original toolchain demo
//! prints.

use crate::core::params::ProgParams;
use crate::core::region::{MemoryRegion, RegionKind};
use crate::error::{ProgParamError, Result};
use std::io::Write;
use tracing::debug;

/// Options controlling which lines the report includes.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportOptions {
    /// Include the constant-data range. On the original toolchain this is
    /// a compile-time separate-I&D flag; here it is per render.
    pub separate_inst_data: bool,
    /// Also print the fields current targets leave unused: xmem data,
    /// aux stack, free space, and heap bounds.
    pub show_unused: bool,
    /// Append the flat physical span to each segmented line.
    pub show_linear: bool,
}

/// Render the memory-layout report into the writer.
pub fn render<W: Write>(params: &ProgParams, options: &ReportOptions, out: &mut W) -> Result<()> {
    debug!(
        separate_inst_data = options.separate_inst_data,
        show_unused = options.show_unused,
        "rendering memory-layout report"
    );

    region_line(params.region(RegionKind::RootCode), options, out)?;
    region_line(params.region(RegionKind::RootData), options, out)?;
    region_line(params.region(RegionKind::XmemCode), options, out)?;
    if options.show_unused {
        region_line(params.region(RegionKind::XmemData), options, out)?;
    }

    writeln!(
        out,
        "stack begins at {:x}, ends at {:x}",
        params.stack_begin, params.stack_end
    )?;
    if options.show_unused {
        writeln!(
            out,
            "aux stack begins at {:x}, ends at {:x}",
            params.aux_stack_begin, params.aux_stack_end
        )?;
        writeln!(
            out,
            "free space begins at {:x}, ends at {:x}",
            params.free_begin, params.free_end
        )?;
        writeln!(
            out,
            "heap begins at {:x}, ends at {:x}",
            params.heap_begin, params.heap_end
        )?;
    }

    if options.separate_inst_data {
        region_line(params.region(RegionKind::ConstantData), options, out)?;
    }

    if options.show_linear {
        writeln!(
            out,
            "highest used program address is {} (linear {:#07x})",
            params.highest_program_addr,
            params.highest_program_addr.linear()
        )?;
    } else {
        writeln!(
            out,
            "highest used program address is {}",
            params.highest_program_addr
        )?;
    }
    Ok(())
}

/// Render the report to a String.
pub fn render_to_string(params: &ProgParams, options: &ReportOptions) -> Result<String> {
    let mut buf = Vec::new();
    render(params, options, &mut buf)?;
    String::from_utf8(buf).map_err(|e| ProgParamError::Serialization(e.to_string()))
}

fn region_line<W: Write>(region: MemoryRegion, options: &ReportOptions, out: &mut W) -> Result<()> {
    if options.show_linear {
        let (begin, end) = region.linear_span();
        writeln!(out, "{} (linear {:#07x}..{:#07x})", region, begin, end)?;
    } else {
        writeln!(out, "{}", region)?;
    }
    Ok(())
}
