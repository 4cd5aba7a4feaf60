use std::fs;
use std::io::{self, IsTerminal, Read};

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use cregexp::highlight::{format_spans, paint_line, stdout_painter};
use cregexp::pattern::unit;
use cregexp::{CompileOptions, Matcher, Regex, ScanMode};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Pattern to search for
    #[arg(value_name = "PATTERN")]
    pattern: String,

    /// File to search (standard input if omitted)
    #[arg(value_name = "FILE")]
    file: Option<String>,

    /// Ignore case
    #[arg(short = 'i', long)]
    ignore_case: bool,

    /// `^` and `$` match at line terminators
    #[arg(short = 'm', long)]
    multiline: bool,

    /// `.` matches line terminators
    #[arg(short = 's', long)]
    single_line: bool,

    /// Ignore whitespace in the pattern
    #[arg(short = 'x', long)]
    extended: bool,

    /// Only try a match at the start of each line
    #[arg(long)]
    anchored: bool,

    /// Offset that `~` anchors to on every line
    #[arg(long, value_name = "N", default_value_t = 0)]
    scheme_start: usize,

    /// Pattern matched first on each line; its captures feed `\y` and `\Y`
    #[arg(long, value_name = "PATTERN")]
    back: Option<String>,

    /// Print match offsets instead of highlighted lines
    #[arg(long)]
    spans: bool,

    /// Print the compiled operation tree and exit
    #[arg(long)]
    dump: bool,

    /// Give up on a line after this many matcher steps
    #[arg(long, value_name = "N")]
    step_limit: Option<u64>,

    /// Never colour the output
    #[arg(long)]
    no_color: bool,
}

impl Args {
    fn options(&self) -> CompileOptions {
        CompileOptions::default()
            .ignore_case(self.ignore_case)
            .multiline(self.multiline)
            .single_line(self.single_line)
            .extended(self.extended)
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut regex = Regex::new(&args.pattern, args.options())
        .with_context(|| format!("invalid pattern {:?}", args.pattern))?;
    if args.dump {
        print!("{}", regex.pattern().dump());
        return Ok(());
    }
    regex.matcher().set_step_limit(args.step_limit);

    let mut back = args
        .back
        .as_deref()
        .map(|p| {
            Regex::new(p, args.options()).with_context(|| format!("invalid back pattern {p:?}"))
        })
        .transpose()?;

    let text = match args.file.as_deref() {
        Some(path) => fs::read_to_string(path).with_context(|| format!("failed to read {path}"))?,
        None => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("failed to read stdin")?;
            text
        }
    };

    let mode = if args.anchored {
        ScanMode::Anchored
    } else {
        ScanMode::Scan
    };
    let mut painter = stdout_painter(!args.no_color && io::stdout().is_terminal());
    let mut total = 0;
    for (line_no, line) in text.lines().enumerate() {
        let units = unit::encode(line);
        if let Some(back) = back.as_mut() {
            if back.find_units(&units, 0).is_some() {
                regex.attach_back_reference_from(back, &units);
            } else {
                regex.matcher().detach_back_reference();
            }
        }
        let spans = line_spans(regex.matcher(), &units, args.scheme_start, mode);
        if spans.is_empty() {
            continue;
        }
        total += spans.len();
        if args.spans {
            println!("{}", format_spans(line_no + 1, &spans));
        } else {
            paint_line(painter.as_mut(), &units, &spans)?;
        }
    }
    info!("{total} matches");
    Ok(())
}

/// Non-overlapping matches of one line.
fn line_spans(
    matcher: &mut Matcher,
    units: &[u16],
    scheme_start: usize,
    mode: ScanMode,
) -> Vec<std::ops::Range<usize>> {
    let mut spans = Vec::new();
    let mut start = 0;
    while start <= units.len() {
        let Some(m) = matcher.exec(units, start, units.len(), scheme_start, mode) else {
            break;
        };
        spans.push(m.range());
        if mode == ScanMode::Anchored {
            break;
        }
        start = if m.end() > start { m.end() } else { start + 1 };
    }
    spans
}
