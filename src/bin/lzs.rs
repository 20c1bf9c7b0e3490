use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use memmap2::Mmap;

use lzs::{
    compress_with_stats, decompress_all, frame, try_decompress, try_decompress_all_with_header,
    Error, FrameHeader, Token, TokenReader,
};

#[derive(Parser, Debug)]
#[command(name = "lzs")]
#[command(about = "Compress and decompress LZS game-asset blobs")]
#[command(version)]
struct Args {
    /// Input file (use - for stdin)
    #[arg(short, long)]
    input: PathBuf,

    /// Output file (use - for stdout)
    #[arg(short, long, required_unless_present = "inspect")]
    output: Option<PathBuf>,

    /// Decompress instead of compress
    #[arg(short, long)]
    decompress: bool,

    /// Read/write the 4-byte little-endian length prefix
    #[arg(long)]
    header: bool,

    /// Stop decompressing after this many output bytes
    #[arg(long, conflicts_with = "header")]
    max: Option<usize>,

    /// After compressing, decompress again and compare CRC32 checksums
    #[arg(long)]
    verify: bool,

    /// Print token statistics of a coded stream and exit
    #[arg(long, conflicts_with_all = ["decompress", "verify"])]
    inspect: bool,

    /// Show verbose statistics
    #[arg(short, long)]
    verbose: bool,
}

const EXIT_ERROR: u8 = 2;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

fn run() -> lzs::Result<()> {
    let args = Args::parse();
    let input = InputData::open(&args.input)?;
    let data = input.as_bytes();

    if args.inspect {
        return inspect(data, args.header);
    }

    // Output is required unless inspecting
    let output_path = args
        .output
        .as_deref()
        .ok_or_else(|| Error::Internal("output required when not inspecting".to_string()))?;

    let start = std::time::Instant::now();
    let output = if args.decompress {
        let decoded = if args.header {
            try_decompress_all_with_header(data)?
        } else if let Some(max) = args.max {
            try_decompress(data, max)?
        } else {
            decompress_all(data)
        };

        if args.verbose {
            eprintln!("Decompression complete:");
            eprintln!("  Coded bytes:      {}", data.len());
            eprintln!("  Output bytes:     {}", decoded.len());
        }
        decoded
    } else {
        let (coded, stats) = compress_with_stats(data);

        if args.verify {
            verify_round_trip(data, &coded)?;
        }

        if args.verbose {
            eprintln!("Compression complete:");
            eprintln!("  Input bytes:      {}", stats.input_bytes);
            eprintln!("  Output bytes:     {}", stats.output_bytes);
            eprintln!("  Literals:         {}", stats.literals);
            eprintln!("  Matches:          {}", stats.matches);
            eprintln!("  Blocks:           {}", stats.blocks);
            if stats.input_bytes > 0 {
                eprintln!(
                    "  Ratio:            {:.1}%",
                    stats.output_bytes as f64 * 100.0 / stats.input_bytes as f64
                );
            }
            if args.verify {
                eprintln!("  Verified:         yes");
            }
        }

        if args.header {
            frame(&coded)
        } else {
            coded
        }
    };
    let elapsed = start.elapsed();

    write_output(output_path, &output)?;

    if args.verbose {
        eprintln!("  Time:             {:.2?}", elapsed);
    }

    Ok(())
}

/// Decode the freshly coded stream and compare checksums with the input
fn verify_round_trip(original: &[u8], coded: &[u8]) -> lzs::Result<()> {
    let expected = crc32fast::hash(original);
    let found = crc32fast::hash(&decompress_all(coded));
    if expected != found {
        return Err(Error::VerifyMismatch { expected, found });
    }
    Ok(())
}

fn inspect(data: &[u8], framed: bool) -> lzs::Result<()> {
    let coded = if framed { FrameHeader::split(data)?.1 } else { data };

    let mut reader = TokenReader::new(coded);
    let (mut literals, mut matches, mut decoded) = (0u64, 0u64, 0u64);
    for token in reader.by_ref() {
        match token {
            Token::Literal(_) => literals += 1,
            Token::Match { .. } => matches += 1,
        }
        decoded += token.uncompressed_size() as u64;
    }

    eprintln!("Coded bytes:      {}", coded.len());
    eprintln!("Literals:         {}", literals);
    eprintln!("Matches:          {}", matches);
    eprintln!("Decoded size:     {} bytes", decoded);
    if reader.consumed() < coded.len() {
        eprintln!("Truncated:        {} trailing bytes unused", coded.len() - reader.consumed());
    }
    Ok(())
}

/// Input bytes, memory-mapped for regular files
enum InputData {
    Mapped(Mmap),
    Buffered(Vec<u8>),
}

impl InputData {
    fn open(path: &Path) -> io::Result<Self> {
        if path.to_str() == Some("-") {
            let mut buf = Vec::new();
            io::stdin().lock().read_to_end(&mut buf)?;
            return Ok(Self::Buffered(buf));
        }

        let file = File::open(path)?;
        // Zero-length files cannot be mapped on every platform
        if file.metadata()?.len() == 0 {
            return Ok(Self::Buffered(Vec::new()));
        }
        // SAFETY: the map is read-only and dropped before the process exits;
        // concurrent truncation of the input by another process is not supported.
        let map = unsafe { Mmap::map(&file)? };
        Ok(Self::Mapped(map))
    }

    fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Mapped(map) => map.as_ref(),
            Self::Buffered(buf) => buf.as_slice(),
        }
    }
}

fn write_output(path: &Path, data: &[u8]) -> io::Result<()> {
    if path.to_str() == Some("-") {
        let mut stdout = io::stdout().lock();
        stdout.write_all(data)?;
        stdout.flush()
    } else {
        let mut output = BufWriter::new(File::create(path)?);
        output.write_all(data)?;
        output.flush()
    }
}
