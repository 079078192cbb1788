use clap::{arg,crate_version,Command};
use std::io::{BufReader,BufWriter,Read,Write};
use bitpress::lzss;

fn main() -> Result<(),Box<dyn std::error::Error>>
{
    env_logger::init();

    let long_help =
"Examples:
---------
Compress:      `bitpress -c -i my_file -o my_file.lzss`
Decompress:    `bitpress -d -i my_file.lzss -o my_file`
Either path may be omitted to use stdin/stdout.";

    let main_cmd = Command::new("bitpress")
        .about("Compress and decompress LZSS streams")
        .after_long_help(long_help)
        .version(crate_version!())
        .arg(arg!(-c --compress "compress the input"))
        .arg(arg!(-d --decompress "decompress the input"))
        .arg(arg!(-i --input <PATH> "input path, stdin if omitted").required(false))
        .arg(arg!(-o --output <PATH> "output path, stdout if omitted").required(false));

    let matches = main_cmd.get_matches();

    let compressing = matches.get_flag("compress");
    let decompressing = matches.get_flag("decompress");
    if compressing == decompressing {
        eprintln!("exactly one of -c or -d is required");
        return Err(Box::new(std::fmt::Error));
    }

    let mut reader: Box<dyn Read> = match matches.get_one::<String>("input") {
        Some(path) => Box::new(BufReader::new(std::fs::File::open(path)?)),
        None => Box::new(std::io::stdin().lock())
    };
    let mut writer: Box<dyn Write> = match matches.get_one::<String>("output") {
        Some(path) => Box::new(BufWriter::new(std::fs::File::create(path)?)),
        None => Box::new(std::io::stdout().lock())
    };

    let (in_size,out_size) = match compressing {
        true => lzss::compress(&mut reader,&mut writer)?,
        false => lzss::expand(&mut reader,&mut writer)?
    };
    writer.flush()?;
    log::info!("processed {} bytes into {}",in_size,out_size);

    Ok(())
}
