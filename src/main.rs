//! # lsb-text
//!
//! Command-line front end for concealing a message in a text pixel stream and revealing it.
//!
//! ## Usage
//!
//! ```bash
//! lsb-text --mode e --message "hello" --input cover.txt --output package.txt
//! lsb-text --mode d --input package.txt
//! ```
//!
//! Anything not given as an argument is asked for interactively.
//!
//! Exit codes: `0` success, `1` incorrect input, `4` input file cannot be opened,
//! `5` output file cannot be created, `6` encoding or decoding failed.

use clap::Parser;
use env_logger::{Builder, Env};
use log::{debug, error};
use lsb_text::{text, Error};
use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
    process::ExitCode,
};

const MODE_QUESTION: &str = "Do you want to encode (E/e) or decode (D/d) a message?";
const MESSAGE_QUESTION: &str = "Enter a message to be encoded:";
const INPUT_QUESTION: &str = "Enter input file name:";
const OUTPUT_QUESTION: &str = "Enter output file name:";

/// Longest file name accepted at the interactive prompt.
const MAX_FILE_NAME_LEN: usize = 29;

/// Command-line arguments; omitted values are prompted for.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Encode (E/e) or decode (D/d)
    #[arg(short, long)]
    mode: Option<String>,

    /// Message to conceal when encoding
    #[arg(long)]
    message: Option<String>,

    /// Cover file when encoding, package file when decoding
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Package file to create when encoding
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Reveal at most `limit - 1` characters when decoding
    #[arg(short, long, default_value_t = text::DEFAULT_OUTPUT_LIMIT)]
    limit: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Encode,
    Decode,
}

impl Mode {
    fn parse(answer: &str) -> Option<Self> {
        match answer.chars().next()?.to_ascii_uppercase() {
            'E' => Some(Self::Encode),
            'D' => Some(Self::Decode),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Exit {
    Success = 0,
    IncorrectInput = 1,
    InputUnopenable = 4,
    OutputUncreatable = 5,
    Failed = 6,
}

impl From<Exit> for ExitCode {
    fn from(exit: Exit) -> Self {
        ExitCode::from(exit as u8)
    }
}

struct Prompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompt<R, W> {
    /// Asks a question and returns the answer without its line terminator, or `None` on EOF.
    fn line(&mut self, question: &str) -> anyhow::Result<Option<String>> {
        write!(self.output, "{question}")?;
        self.output.flush()?;

        let mut answer = String::new();
        if self.input.read_line(&mut answer)? == 0 {
            return Ok(None);
        }

        let len = answer.trim_end_matches(['\r', '\n']).len();
        answer.truncate(len);
        Ok(Some(answer))
    }

    /// Asks for a single short file name.
    fn file_name(&mut self, question: &str) -> anyhow::Result<Option<PathBuf>> {
        let Some(answer) = self.line(question)? else {
            return Ok(None);
        };

        let mut words = answer.split_whitespace();
        Ok(match (words.next(), words.next()) {
            (Some(name), None) if name.chars().count() <= MAX_FILE_NAME_LEN => Some(name.into()),
            _ => None,
        })
    }
}

/// Initialize logging to stderr, so that prompts and revealed messages on stdout stay clean.
///
/// The level is taken from `RUST_LOG` and defaults to `warn`.
fn init_logger() {
    Builder::from_env(Env::default().default_filter_or("warn"))
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .init();
}

fn main() -> ExitCode {
    init_logger();

    let args = Args::parse();

    match run(args) {
        Ok(exit) => exit.into(),
        Err(err) => {
            error!("{err:#}");
            println!("Incorrect input");
            Exit::IncorrectInput.into()
        }
    }
}

fn run(args: Args) -> anyhow::Result<Exit> {
    let mut prompt = Prompt {
        input: io::stdin().lock(),
        output: io::stdout(),
    };

    let answer = match args.mode.clone() {
        Some(mode) => Some(mode),
        None => prompt.line(MODE_QUESTION)?,
    };
    let Some(answer) = answer else {
        println!("Incorrect input");
        return Ok(Exit::IncorrectInput);
    };
    let Some(mode) = Mode::parse(&answer) else {
        println!("Incorrect input data");
        return Ok(Exit::IncorrectInput);
    };
    debug!("mode {mode:?}");

    match mode {
        Mode::Encode => encode(args, &mut prompt),
        Mode::Decode => decode(args, &mut prompt),
    }
}

fn encode<R: BufRead, W: Write>(args: Args, prompt: &mut Prompt<R, W>) -> anyhow::Result<Exit> {
    let message = match args.message {
        Some(message) => Some(message),
        None => prompt.line(MESSAGE_QUESTION)?,
    };
    let input = match args.input {
        Some(input) => Some(input),
        None => prompt.file_name(INPUT_QUESTION)?,
    };
    let output = match args.output {
        Some(output) => Some(output),
        None => prompt.file_name(OUTPUT_QUESTION)?,
    };

    let (Some(message), Some(input), Some(output)) = (message, input, output) else {
        println!("Incorrect input");
        return Ok(Exit::IncorrectInput);
    };

    match text::encode_file(&input, message.as_bytes(), &output) {
        Ok(samples) => {
            debug!("wrote {samples} samples to {}", output.display());
            println!("file saved");
            Ok(Exit::Success)
        }
        Err(err) => Ok(report(&err)),
    }
}

fn decode<R: BufRead, W: Write>(args: Args, prompt: &mut Prompt<R, W>) -> anyhow::Result<Exit> {
    let input = match args.input {
        Some(input) => Some(input),
        None => prompt.file_name(INPUT_QUESTION)?,
    };
    let Some(input) = input else {
        println!("Incorrect input");
        return Ok(Exit::IncorrectInput);
    };

    let result = text::decode_file(&input, args.limit, io::stdout().lock());
    if matches!(result, Ok(_) | Err(Error::CorruptPayload { .. })) {
        println!();
    }

    match result {
        Ok(len) => {
            debug!("revealed {len} bytes from {}", input.display());
            Ok(Exit::Success)
        }
        Err(err) => Ok(report(&err)),
    }
}

fn report(err: &Error) -> Exit {
    match std::error::Error::source(err) {
        Some(source) => error!("{err}: {source}"),
        None => error!("{err}"),
    }

    match err {
        Error::SourceUnreadable(_) => {
            println!("couldn't open file");
            Exit::InputUnopenable
        }
        Error::DestinationUnwritable(_) => {
            println!("couldn't create file");
            Exit::OutputUncreatable
        }
        Error::NullArgument(_) => {
            println!("Incorrect input");
            Exit::IncorrectInput
        }
        _ => {
            println!("file corrupted");
            Exit::Failed
        }
    }
}
