use anyhow::{Context, Result};
use clap::{arg, command, ArgAction, ArgMatches, Command};
use tracing::Level;

use huffman_compress::{CodecConfig, OverflowPolicy};

fn main() -> Result<()> {
    let matches = command!()
        .arg(
            arg!(-v --verbose "Increase log output")
                .action(ArgAction::Count)
                .global(true),
        )
        .arg(
            arg!(--strict "Fail instead of rescaling counts above 255")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand_required(true)
        .subcommand(
            Command::new("compress")
                .about("Compress a file")
                .arg(arg!(input: <INPUT> "File to compress"))
                .arg(arg!(output: [OUTPUT] "Output path, defaults to INPUT.huf")),
        )
        .subcommand(
            Command::new("decompress")
                .about("Decompress a file")
                .arg(arg!(input: <INPUT> "File to decompress"))
                .arg(arg!(output: [OUTPUT] "Output path, defaults to INPUT.dec")),
        )
        .subcommand(
            Command::new("inspect")
                .about("Print the header and code table of a compressed file")
                .arg(arg!(input: <INPUT> "Compressed file")),
        )
        .get_matches();

    init_tracing(matches.get_count("verbose").into());

    let config = match matches.get_flag("strict") {
        true => CodecConfig::new().with_overflow(OverflowPolicy::Strict),
        false => CodecConfig::new(),
    };

    match matches.subcommand() {
        Some(("compress", matches)) => compress(matches, &config),
        Some(("decompress", matches)) => decompress(matches),
        Some(("inspect", matches)) => inspect(matches),
        _ => anyhow::bail!("No command given"),
    }
}

fn init_tracing(verbosity: u64) {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn paths(matches: &ArgMatches, extension: &str) -> Result<(String, String)> {
    let input = matches
        .get_one::<String>("input")
        .context("missing input path")?
        .clone();
    let output = match matches.get_one::<String>("output") {
        Some(output) => output.clone(),
        None => format!("{input}.{extension}"),
    };
    Ok((input, output))
}

fn compress(matches: &ArgMatches, config: &CodecConfig) -> Result<()> {
    let (input, output) = paths(matches, "huf")?;
    let stats = huffman_compress::compress_file(&input, &output, config)
        .with_context(|| format!("Compression of {input} failed"))?;

    println!("Compression successful!");
    println!("Original size: {} bytes", stats.input_size);
    println!("Compressed size: {} bytes", stats.output_size);
    println!("Compression ratio: {:.2}%", stats.ratio());
    Ok(())
}

fn decompress(matches: &ArgMatches) -> Result<()> {
    let (input, output) = paths(matches, "dec")?;
    huffman_compress::decompress_file(&input, &output)
        .with_context(|| format!("Decompression of {input} failed"))?;

    println!("Decompression successful! Output written to: {output}");
    Ok(())
}

fn inspect(matches: &ArgMatches) -> Result<()> {
    let input = matches
        .get_one::<String>("input")
        .context("missing input path")?;
    let data = std::fs::read(input).with_context(|| format!("Couldn't read {input}"))?;
    let (header, codes) = huffman_compress::inspect(&data)?;

    println!("Original size: {} bytes", header.original_size);
    println!("Padding bits: {}", header.padding_bits);
    println!("Symbols: {}", header.table.len());
    println!("Payload: {} bytes", data.len() - header.encoded_len());
    println!("{}", codes.describe());
    Ok(())
}
