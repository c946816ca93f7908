//! `dispatch` and `drain` subcommands

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use linedrop_core::{
    CursorKind, CursorProvider, Dispatch, DrainReport, DrainStop, HostCapabilities,
    LegacySelection, LineDispatcher, LinedropConfig, NoSelection, SelectionRange, SlotTable,
    Variant,
};
use serde::Serialize;
use tracing::{debug, info};

use crate::ui;

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariantArg {
    /// Split at the cursor offset
    Cursor,
    /// Take the first line, ignoring the cursor
    FirstLine,
}

impl From<VariantArg> for Variant {
    fn from(arg: VariantArg) -> Self {
        match arg {
            VariantArg::Cursor => Variant::Cursor,
            VariantArg::FirstLine => Variant::FirstLine,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    Text,
}

#[derive(Parser, Debug)]
pub struct DispatchArgs {
    /// Buffer file to read (stdin when omitted or "-")
    #[arg(long = "input", alias = "in", value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Current slot values, comma-separated (empty entries are empty slots)
    #[arg(long, value_delimiter = ',', conflicts_with = "slots_file")]
    pub slots: Option<Vec<String>>,

    /// JSON array of slot values
    #[arg(long, value_name = "PATH")]
    pub slots_file: Option<PathBuf>,

    /// Dispatch variant (default from config)
    #[arg(long, value_enum)]
    pub variant: Option<VariantArg>,

    /// Cursor offset in characters (range-based reporting)
    #[arg(long, conflicts_with = "legacy_selection")]
    pub cursor: Option<usize>,

    /// Legacy selection as THROUGH:SELECTED character counts
    #[arg(long, value_name = "THROUGH:SELECTED", value_parser = parse_legacy_selection)]
    pub legacy_selection: Option<LegacySelection>,

    /// Write the updated buffer (and slots file) back in place
    #[arg(long)]
    pub in_place: bool,

    /// Output format
    #[arg(long, value_enum, default_value = "json")]
    pub format: OutputFormat,
}

#[derive(Parser, Debug)]
pub struct DrainArgs {
    /// Buffer file to read (stdin when omitted or "-")
    #[arg(long = "input", alias = "in", value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Number of empty slots to fill (default: the configured table)
    #[arg(long)]
    pub slots: Option<usize>,

    /// Dispatch variant (default from config)
    #[arg(long, value_enum)]
    pub variant: Option<VariantArg>,

    /// Write the leftover buffer back to the input file
    #[arg(long)]
    pub in_place: bool,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Serialize)]
struct DispatchOutput<'a> {
    cursor: CursorKind,
    variant: Variant,
    #[serde(flatten)]
    dispatch: &'a Dispatch,
    slots: Vec<String>,
}

#[derive(Serialize)]
struct DrainOutput<'a> {
    variant: Variant,
    #[serde(flatten)]
    report: &'a DrainReport,
    slots: Vec<String>,
}

fn parse_legacy_selection(raw: &str) -> Result<LegacySelection, String> {
    let (through, selected) = raw
        .split_once(':')
        .ok_or_else(|| format!("expected THROUGH:SELECTED, got '{}'", raw))?;

    let through = through
        .trim()
        .parse::<usize>()
        .map_err(|e| format!("invalid THROUGH '{}': {}", through, e))?;
    let selected = selected
        .trim()
        .parse::<usize>()
        .map_err(|e| format!("invalid SELECTED '{}': {}", selected, e))?;

    Ok(LegacySelection {
        through_selection: through,
        selected,
    })
}

/// Pick the cursor provider once from what the caller reported
fn cursor_provider(args: &DispatchArgs) -> Box<dyn CursorProvider> {
    let caps = HostCapabilities {
        selection_range: args.cursor.is_some(),
        legacy_selection: args.legacy_selection.is_some(),
    };

    match CursorKind::detect(caps) {
        CursorKind::Range => Box::new(SelectionRange::caret(args.cursor.unwrap_or(0))),
        CursorKind::Legacy => Box::new(args.legacy_selection.unwrap_or_default()),
        CursorKind::Unsupported => Box::new(NoSelection),
    }
}

fn is_stdin(path: Option<&PathBuf>) -> bool {
    path.map_or(true, |p| p.as_os_str() == "-")
}

fn read_buffer(path: Option<&PathBuf>) -> Result<String> {
    match path {
        Some(path) if !is_stdin(Some(path)) => {
            fs::read_to_string(path).with_context(|| format!("Failed to read buffer {:?}", path))
        }
        _ => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read buffer from stdin")?;
            Ok(buffer)
        }
    }
}

fn read_slots_file(path: &Path) -> Result<SlotTable> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read slots {:?}", path))?;
    SlotTable::from_json(&content).with_context(|| format!("Invalid slots file {:?}", path))
}

fn slot_table(args: &DispatchArgs, cfg: &LinedropConfig) -> Result<SlotTable> {
    if let Some(values) = &args.slots {
        return Ok(SlotTable::from_values(values));
    }
    if let Some(path) = &args.slots_file {
        return read_slots_file(path);
    }
    cfg.build_table().context("Invalid [table] config")
}

pub fn run_dispatch(args: DispatchArgs, cfg: &LinedropConfig) -> Result<()> {
    if args.in_place && is_stdin(args.input.as_ref()) {
        bail!("--in-place needs a buffer file (--input PATH)");
    }

    let variant: Variant = args.variant.map(Into::into).unwrap_or(cfg.dispatch.variant);
    let buffer = read_buffer(args.input.as_ref())?;
    let table = slot_table(&args, cfg)?;
    let cursor = cursor_provider(&args);
    let cursor_kind = cursor.kind();

    debug!(%variant, cursor = %cursor_kind, slots = table.slot_count(), "dispatching");

    let mut dispatcher =
        LineDispatcher::new(table, cursor, cfg.dispatch_settings()).with_buffer(buffer);
    let result = dispatcher.dispatch(variant);

    if args.in_place {
        if let Some(path) = &args.input {
            if result.buffer_changed {
                fs::write(path, dispatcher.buffer())
                    .with_context(|| format!("Failed to write buffer {:?}", path))?;
                info!("updated buffer {:?}", path);
            }
        }
        if let Some(path) = &args.slots_file {
            let json = serde_json::to_string_pretty(&dispatcher.table().slot_values())?;
            fs::write(path, json).with_context(|| format!("Failed to write slots {:?}", path))?;
            info!("updated slots {:?}", path);
        }
    }

    match args.format {
        OutputFormat::Json => {
            let output = DispatchOutput {
                cursor: cursor_kind,
                variant,
                dispatch: &result,
                slots: dispatcher.table().slot_values(),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Text => print_dispatch_text(&result),
    }

    Ok(())
}

/// One-line summary of a dispatch for text output
fn dispatch_summary(result: &Dispatch) -> String {
    match (&result.line, result.updated_slot_index) {
        // An empty line leaves its slot empty
        (Some(line), _) if line.is_empty() => "nothing before the cursor".to_string(),
        (Some(line), Some(index)) => format!("slot {} <- {}", index, line),
        (Some(line), None) => format!("no empty slot, dropped: {}", line),
        (None, _) => "no line to dispatch".to_string(),
    }
}

fn print_dispatch_text(result: &Dispatch) {
    println!("{}", dispatch_summary(result));
    if result.buffer_changed {
        println!("--- buffer ---");
        println!("{}", result.updated_buffer);
    }
}

pub fn run_drain(args: DrainArgs, cfg: &LinedropConfig) -> Result<()> {
    if args.in_place && is_stdin(args.input.as_ref()) {
        bail!("--in-place needs a buffer file (--input PATH)");
    }

    let variant: Variant = args.variant.map(Into::into).unwrap_or(cfg.dispatch.variant);
    let buffer = read_buffer(args.input.as_ref())?;
    let table = match args.slots {
        Some(0) => bail!("--slots must be at least 1"),
        Some(count) => SlotTable::from_values(vec![""; count]),
        None => cfg.build_table().context("Invalid [table] config")?,
    };

    let pb = ui::spinner(format!("Draining into {} slots", table.slot_count()));

    let mut dispatcher =
        LineDispatcher::new(table, NoSelection, cfg.dispatch_settings()).with_buffer(buffer);
    let report = dispatcher.drain(variant);

    let summary = format!("filled {} slots", report.filled.len());
    match report.stopped {
        DrainStop::SlotsFull if !report.remaining.trim().is_empty() => {
            ui::finish_warning(pb, format!("{}, slots full with lines left over", summary))
        }
        _ => ui::finish_success(pb, summary),
    }

    if args.in_place {
        if let Some(path) = &args.input {
            fs::write(path, &report.remaining)
                .with_context(|| format!("Failed to write buffer {:?}", path))?;
            info!("updated buffer {:?}", path);
        }
    }

    match args.format {
        OutputFormat::Json => {
            let output = DrainOutput {
                variant,
                report: &report,
                slots: dispatcher.table().slot_values(),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Text => {
            for (index, line) in &report.filled {
                println!("{}\t{}", index, line);
            }
        }
    }

    Ok(())
}
